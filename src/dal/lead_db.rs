use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::lead::{HiringSignal, Lead, LeadStatus};

use super::LeadStore;

/// Postgres-backed lead store. Queries are bound at runtime so the crate
/// builds without a live database; the `lead` table DDL lives with the CRM
/// that owns the schema.
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        PgLeadStore { pool }
    }
}

fn row_to_lead(row: &sqlx::postgres::PgRow) -> Lead {
    Lead {
        id: row.get::<Uuid, _>("id"),
        company_name: row.get("company_name"),
        website: row.get("website"),
        industry: row.get("industry"),
        company_size: row
            .get::<Option<i32>, _>("company_size")
            .map(|size| size.max(0) as u32),
        hiring: HiringSignal::parse(row.get::<String, _>("hiring").as_str()),
        key_person: row.get("key_person"),
        role: row.get("role"),
        profile_url: row.get("profile_url"),
        about: row.get("about"),
        recent_post: row.get("recent_post"),
        is_preferred: row.get("is_preferred"),
        message: row.get("message"),
        message_variant: row.get("message_variant"),
        message_reply: row.get("message_reply"),
        status: LeadStatus::parse(row.get::<String, _>("status").as_str()),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            insert into lead
                (id, company_name, website, industry, company_size, hiring,
                 key_person, role, profile_url, about, recent_post,
                 is_preferred, message, message_variant, message_reply,
                 status, created_at)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                 $14, $15, $16, $17)
            "#,
        )
        .bind(lead.id)
        .bind(&lead.company_name)
        .bind(&lead.website)
        .bind(&lead.industry)
        .bind(lead.company_size.map(|size| size as i32))
        .bind(lead.hiring.as_str())
        .bind(&lead.key_person)
        .bind(&lead.role)
        .bind(&lead.profile_url)
        .bind(&lead.about)
        .bind(&lead.recent_post)
        .bind(lead.is_preferred)
        .bind(&lead.message)
        .bind(&lead.message_variant)
        .bind(&lead.message_reply)
        .bind(lead.status.as_str())
        .bind(lead.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn exists(
        &self,
        company_name: &str,
        key_person: &str,
        role: &str,
        profile_url: &str,
    ) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"
            select exists(
                select 1 from lead
                where
                    company_name = $1 and
                    key_person = $2 and
                    role = $3 and
                    profile_url = $4
            )
            "#,
        )
        .bind(company_name)
        .bind(key_person)
        .bind(role)
        .bind(profile_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn distinct_industries(&self) -> anyhow::Result<Vec<String>> {
        let industries: Vec<String> = sqlx::query_scalar(
            r#"
            select distinct industry from lead where industry <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(industries)
    }

    async fn leads_with_replies(&self) -> anyhow::Result<Vec<Lead>> {
        let rows = sqlx::query(
            r#"
            select * from lead
            where
                message_variant is not null and
                message_reply is not null and
                trim(message_reply) <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_lead).collect())
    }
}
