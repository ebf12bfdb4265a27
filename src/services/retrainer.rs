use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::dal::LeadStore;
use crate::domain::variant::{store_model, tally_reply_variants, RetrainOutcome};

/// Background worker: re-derives the best message variant from captured
/// replies on a fixed cycle. Shares nothing with the crawl worker beyond the
/// lead store and the model artifact. The first pass runs at startup.
pub async fn retrain_handler(store: Arc<dyn LeadStore>, model_path: PathBuf, interval_hours: u64) {
    log::info!("Started message variant retrainer");
    let mut interval = time::interval(Duration::from_secs(interval_hours * 60 * 60));

    loop {
        interval.tick().await;
        retrain_once(store.as_ref(), &model_path).await;
    }
}

/// A single retraining pass. Zero reply-bearing leads is a logged no-op;
/// any previously published model stays valid.
pub async fn retrain_once(store: &dyn LeadStore, model_path: &Path) {
    let leads = match store.leads_with_replies().await {
        Ok(leads) => leads,
        Err(e) => {
            log::error!("Could not load reply-bearing leads: {:?}", e);
            return;
        }
    };

    match tally_reply_variants(&leads) {
        RetrainOutcome::Updated(model) => match store_model(model_path, &model) {
            Ok(()) => log::info!("Message model retrained, best variant: {}", model.best_variant),
            Err(e) => log::error!("Could not persist message model: {:?}", e),
        },
        RetrainOutcome::NoReplyData => {
            log::info!("Not enough reply data to retrain message model");
        }
    }
}
