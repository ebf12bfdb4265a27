use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiringSignal {
    Yes,
    Unknown,
}

impl HiringSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiringSignal::Yes => "Yes",
            HiringSignal::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Yes" => HiringSignal::Yes,
            _ => HiringSignal::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Contacted,
    Replied,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Replied => "replied",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "contacted" => LeadStatus::Contacted,
            "replied" => LeadStatus::Replied,
            _ => LeadStatus::New,
        }
    }
}

/// One discovered company/person pair, destined for outreach. Uniquely
/// identified by (company_name, key_person, role, profile_url); the dedup
/// gate enforces that before every insert.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: String,
    pub company_size: Option<u32>,
    pub hiring: HiringSignal,
    pub key_person: String,
    pub role: String,
    pub profile_url: String,
    pub about: String,
    pub recent_post: String,
    pub is_preferred: bool,
    pub message: Option<String>,
    pub message_variant: Option<String>,
    pub message_reply: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// A lead for an accepted decision-maker.
    #[allow(clippy::too_many_arguments)]
    pub fn for_person(
        company_name: String,
        website: Option<String>,
        industry: String,
        company_size: Option<u32>,
        hiring: HiringSignal,
        key_person: String,
        role: String,
        profile_url: String,
        about: String,
        recent_post: String,
    ) -> Self {
        Lead {
            id: Uuid::new_v4(),
            company_name,
            website,
            industry,
            company_size,
            hiring,
            key_person,
            role,
            profile_url,
            about,
            recent_post,
            is_preferred: true,
            message: None,
            message_variant: None,
            message_reply: None,
            status: LeadStatus::New,
            created_at: Utc::now(),
        }
    }

    /// Entities with no accepted decision-maker still get recorded at the
    /// company level so the run is not a total loss for them.
    pub fn company_only(
        company_name: String,
        website: Option<String>,
        industry: String,
        company_size: Option<u32>,
        hiring: HiringSignal,
        company_url: String,
    ) -> Self {
        Lead {
            id: Uuid::new_v4(),
            company_name,
            website,
            industry,
            company_size,
            hiring,
            key_person: String::new(),
            role: String::new(),
            profile_url: company_url,
            about: String::new(),
            recent_post: String::new(),
            is_preferred: false,
            message: None,
            message_variant: None,
            message_reply: None,
            status: LeadStatus::New,
            created_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> (&str, &str, &str, &str) {
        (
            &self.company_name,
            &self.key_person,
            &self.role,
            &self.profile_url,
        )
    }
}
