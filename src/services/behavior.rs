use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::driver::{DriverError, Locator, PageDriver};
use super::pacer::Pacer;
use super::selectors;

const IDLE_PROBABILITY: f64 = 0.10;
const TAB_SWITCH_PROBABILITY: f64 = 0.20;
const MISCLICK_PROBABILITY: f64 = 0.10;

/// Produces randomized human-like interaction noise between structural
/// actions. Every operation except `type_slowly` is cosmetic and swallows
/// its failures; most are no-ops most of the time so automated and human
/// timing distributions overlap.
pub struct BehaviorSimulator {
    driver: Arc<dyn PageDriver>,
    pacer: Arc<dyn Pacer>,
    rng: StdRng,
}

impl BehaviorSimulator {
    pub fn new(driver: Arc<dyn PageDriver>, pacer: Arc<dyn Pacer>) -> Self {
        Self::seeded(driver, pacer, rand::random())
    }

    pub fn seeded(driver: Arc<dyn PageDriver>, pacer: Arc<dyn Pacer>, seed: u64) -> Self {
        BehaviorSimulator {
            driver,
            pacer,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The standard set, run at every page transition.
    pub async fn page_routine(&mut self) {
        self.move_to_random_element().await;
        self.idle_maybe().await;
        self.scroll_random().await;
        self.switch_tab_maybe().await;
        self.misclick_maybe().await;
        self.pause_range(3_000, 6_000).await;
    }

    /// A lighter set, run before destructive actions.
    pub async fn pre_action_routine(&mut self) {
        self.move_to_random_element().await;
        self.idle_maybe().await;
        self.scroll_random().await;
    }

    pub async fn move_to_random_element(&mut self) {
        let targets = selectors::cosmetic_targets();
        let available = self.driver.count(&targets).await;
        if available == 0 {
            return;
        }
        let index = self.rng.gen_range(0..available);
        if self.driver.hover_nth(&targets, index).await.is_ok() {
            self.pause_range(500, 2_000).await;
        }
    }

    pub async fn idle_maybe(&mut self) {
        if self.rng.gen_bool(IDLE_PROBABILITY) {
            log::info!("Simulating user reading/thinking");
            self.pause_range(10_000, 30_000).await;
        }
    }

    pub async fn scroll_random(&mut self) {
        let scrolls = self.rng.gen_range(1..=3);
        for _ in 0..scrolls {
            let delta: i64 = if self.rng.gen_bool(0.5) { 600 } else { -600 };
            let _ = self.driver.scroll_by(delta).await;
            self.pause_range(500, 1_500).await;
        }
    }

    pub async fn switch_tab_maybe(&mut self) {
        let tabs = self.driver.tab_count().await;
        if tabs > 1 && self.rng.gen_bool(TAB_SWITCH_PROBABILITY) {
            log::info!("Simulating user switching to another tab");
            if self.driver.switch_tab(0).await.is_ok() {
                self.pause_range(2_000, 8_000).await;
                let _ = self.driver.switch_tab(tabs - 1).await;
            }
        }
    }

    pub async fn misclick_maybe(&mut self) {
        if !self.rng.gen_bool(MISCLICK_PROBABILITY) {
            return;
        }
        let targets = selectors::misclick_targets();
        let available = self.driver.count(&targets).await;
        if available == 0 {
            return;
        }
        let index = self.rng.gen_range(0..available);
        if self.driver.click_nth(&targets, index).await.is_ok() {
            log::info!("Simulating user mistake click");
            self.pause_range(2_000, 5_000).await;
            let _ = self.driver.back().await;
            self.pause_range(1_000, 3_000).await;
        }
    }

    /// Character-by-character input with a human inter-key delay. Unlike the
    /// cosmetic operations this carries the actual payload, so failures
    /// propagate to the caller.
    pub async fn type_slowly(&mut self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        for character in text.chars() {
            self.driver
                .send_keys(locator, &character.to_string())
                .await?;
            let delay = self.rng.gen_range(50..=200);
            self.pacer.wait(Duration::from_millis(delay)).await;
        }
        Ok(())
    }

    pub async fn pause_range(&mut self, low_ms: u64, high_ms: u64) {
        let millis = self.rng.gen_range(low_ms..=high_ms);
        self.pacer.wait(Duration::from_millis(millis)).await;
    }
}
