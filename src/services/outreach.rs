use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::lead::Lead;
use crate::domain::personalizer::{generate_contextual_comment, post_mentions_engagement};
use crate::domain::quota::QuotaCounters;

use super::behavior::BehaviorSimulator;
use super::driver::{DriverError, PageDriver};
use super::selectors;

/// Per-action attempt probabilities. Each action also rolls an independent
/// skip so outreach never looks deterministic.
#[derive(Debug, Clone, Copy)]
pub struct OutreachPolicy {
    pub connect_probability: f64,
    pub comment_probability: f64,
    pub message_probability: f64,
}

impl Default for OutreachPolicy {
    fn default() -> Self {
        OutreachPolicy {
            connect_probability: 0.85,
            comment_probability: 0.50,
            message_probability: 0.50,
        }
    }
}

/// Decides and performs outreach actions for one accepted lead. Assumes the
/// driver is currently on the lead's profile page. Each action is gated by
/// its own quota counter; failures are logged and skipped without
/// decrementing quota or aborting the run.
pub struct OutreachEngine {
    driver: Arc<dyn PageDriver>,
    policy: OutreachPolicy,
    rng: StdRng,
}

impl OutreachEngine {
    pub fn new(driver: Arc<dyn PageDriver>, policy: OutreachPolicy) -> Self {
        Self::seeded(driver, policy, rand::random())
    }

    pub fn seeded(driver: Arc<dyn PageDriver>, policy: OutreachPolicy, seed: u64) -> Self {
        OutreachEngine {
            driver,
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the three independent outreach decisions for one lead. Only a
    /// lost session propagates; everything else is contained here.
    pub async fn engage(
        &mut self,
        behavior: &mut BehaviorSimulator,
        quotas: &mut QuotaCounters,
        lead: &Lead,
    ) -> Result<(), DriverError> {
        if quotas.can_connect() {
            if self.rng.gen_bool(self.policy.connect_probability) {
                match self.send_connection_request(behavior, lead).await {
                    Ok(true) => quotas.record_connection(),
                    Ok(false) => log::info!("Already connected to {}", lead.profile_url),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => log::error!(
                        "Could not send connection request to {}: {:?}",
                        lead.profile_url,
                        e
                    ),
                }
            } else {
                log::info!(
                    "Skipping connection request for {} to mimic human randomness",
                    lead.profile_url
                );
            }
        }

        if quotas.can_comment() && self.rng.gen_bool(self.policy.comment_probability) {
            match self.comment_on_recent_post(behavior, lead).await {
                Ok(true) => quotas.record_comment(),
                Ok(false) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::error!(
                    "Could not comment on posts for {}: {:?}",
                    lead.profile_url,
                    e
                ),
            }
        }

        if quotas.can_message() && self.rng.gen_bool(self.policy.message_probability) {
            match self.send_direct_message(behavior, lead).await {
                Ok(true) => quotas.record_message(),
                Ok(false) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::error!(
                    "Could not send message to {}: {:?}",
                    lead.profile_url,
                    e
                ),
            }
        }

        Ok(())
    }

    async fn send_connection_request(
        &mut self,
        behavior: &mut BehaviorSimulator,
        lead: &Lead,
    ) -> Result<bool, DriverError> {
        behavior.pre_action_routine().await;

        if self
            .driver
            .exists(&selectors::already_connected_marker())
            .await
        {
            return Ok(false);
        }

        self.driver.click(&selectors::connect_button()).await?;
        behavior.pause_range(2_000, 4_000).await;

        let note = format!(
            "Hi {}, I'd love to connect and discuss {} opportunities!",
            lead.key_person, lead.industry
        );
        if self.driver.click(&selectors::add_note_button()).await.is_ok() {
            let _ = self.driver.clear(&selectors::note_box()).await;
            behavior.type_slowly(&selectors::note_box(), &note).await?;
        }
        self.driver.click(&selectors::send_now_button()).await?;

        log::info!("Connection request sent to {}", lead.profile_url);
        behavior.pause_range(2_000, 5_000).await;
        Ok(true)
    }

    /// Comments on the first recent post that mentions an engagement
    /// keyword; at most one comment per lead.
    async fn comment_on_recent_post(
        &mut self,
        behavior: &mut BehaviorSimulator,
        lead: &Lead,
    ) -> Result<bool, DriverError> {
        behavior.pre_action_routine().await;

        let posts = self.driver.texts_of(&selectors::post_card()).await?;
        for (index, post_text) in posts.iter().enumerate() {
            if !post_mentions_engagement(post_text) {
                continue;
            }

            let comment = generate_contextual_comment(post_text, &lead.industry, &mut self.rng);
            self.driver
                .click_nth(&selectors::comment_button(), index)
                .await?;
            behavior.pause_range(1_000, 2_000).await;
            behavior
                .type_slowly(&selectors::comment_box(), &comment)
                .await?;
            self.driver
                .click(&selectors::post_comment_button())
                .await?;

            log::info!("Commented on post: {}", comment);
            behavior.pause_range(2_000, 5_000).await;
            return Ok(true);
        }

        Ok(false)
    }

    async fn send_direct_message(
        &mut self,
        behavior: &mut BehaviorSimulator,
        lead: &Lead,
    ) -> Result<bool, DriverError> {
        let Some(message) = lead.message.as_deref() else {
            return Ok(false);
        };

        behavior.pre_action_routine().await;

        self.driver.click(&selectors::message_button()).await?;
        behavior.pause_range(1_000, 2_000).await;
        behavior
            .type_slowly(&selectors::message_box(), message)
            .await?;
        self.driver
            .click(&selectors::send_message_button())
            .await?;

        log::info!("Sent message to {}: {}", lead.key_person, message);
        behavior.pause_range(2_000, 5_000).await;
        Ok(true)
    }
}
