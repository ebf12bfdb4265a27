use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::lead::Lead;

use super::LeadStore;

/// In-memory lead store for tests and dry runs. Mirrors the Postgres store's
/// contract, including the identity-tuple existence check.
#[derive(Default)]
pub struct InMemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads.lock().expect("lead store lock").clone()
    }

    pub fn len(&self) -> usize {
        self.leads.lock().expect("lead store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Test hook: record a reply against an already-persisted lead.
    pub fn record_reply(&self, profile_url: &str, reply: &str) {
        let mut leads = self.leads.lock().expect("lead store lock");
        if let Some(lead) = leads.iter_mut().find(|l| l.profile_url == profile_url) {
            lead.message_reply = Some(reply.to_string());
        }
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()> {
        self.leads
            .lock()
            .expect("lead store lock")
            .push(lead.clone());
        Ok(())
    }

    async fn exists(
        &self,
        company_name: &str,
        key_person: &str,
        role: &str,
        profile_url: &str,
    ) -> anyhow::Result<bool> {
        let leads = self.leads.lock().expect("lead store lock");
        Ok(leads
            .iter()
            .any(|lead| lead.identity() == (company_name, key_person, role, profile_url)))
    }

    async fn distinct_industries(&self) -> anyhow::Result<Vec<String>> {
        let leads = self.leads.lock().expect("lead store lock");
        let mut industries: Vec<String> = leads
            .iter()
            .map(|lead| lead.industry.clone())
            .filter(|industry| !industry.is_empty())
            .collect();
        industries.sort();
        industries.dedup();
        Ok(industries)
    }

    async fn leads_with_replies(&self) -> anyhow::Result<Vec<Lead>> {
        let leads = self.leads.lock().expect("lead store lock");
        Ok(leads
            .iter()
            .filter(|lead| {
                lead.message_variant.is_some()
                    && lead
                        .message_reply
                        .as_deref()
                        .is_some_and(|reply| !reply.trim().is_empty())
            })
            .cloned()
            .collect())
    }
}
