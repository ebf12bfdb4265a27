pub mod lead_db;
pub mod memory;

pub use lead_db::*;
pub use memory::*;

use async_trait::async_trait;

use crate::domain::lead::Lead;

/// The persistence collaborator. The engine only calls these four
/// operations; schema and migrations are owned elsewhere.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()>;

    /// Existence check on the full identity tuple, run immediately before
    /// every insert.
    async fn exists(
        &self,
        company_name: &str,
        key_person: &str,
        role: &str,
        profile_url: &str,
    ) -> anyhow::Result<bool>;

    async fn distinct_industries(&self) -> anyhow::Result<Vec<String>>;

    /// Leads carrying both a variant label and a non-empty captured reply.
    async fn leads_with_replies(&self) -> anyhow::Result<Vec<Lead>>;
}
