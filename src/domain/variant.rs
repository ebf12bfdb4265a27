use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;

/// The artifact the retrainer publishes and the personalizer consumes.
/// Absent until the first retraining run with reply data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantModel {
    pub best_variant: String,
    pub variant_counts: HashMap<String, u64>,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum RetrainOutcome {
    Updated(VariantModel),
    NoReplyData,
}

/// Tallies replies per variant across the given leads. Ties resolve to the
/// lexicographically smaller label so retraining stays deterministic.
pub fn tally_reply_variants(leads: &[Lead]) -> RetrainOutcome {
    let variant_counts: HashMap<String, u64> = leads
        .iter()
        .filter(|lead| {
            lead.message_reply
                .as_deref()
                .is_some_and(|reply| !reply.trim().is_empty())
        })
        .filter_map(|lead| lead.message_variant.clone())
        .counts()
        .into_iter()
        .map(|(variant, count)| (variant, count as u64))
        .collect();

    let best = variant_counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(variant, _)| variant.clone());

    match best {
        Some(best_variant) => RetrainOutcome::Updated(VariantModel {
            best_variant,
            variant_counts,
            trained_at: Utc::now(),
        }),
        None => RetrainOutcome::NoReplyData,
    }
}

pub fn load_model(path: &Path) -> Option<VariantModel> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(model) => Some(model),
        Err(e) => {
            log::error!("Could not parse variant model at {:?}: {:?}", path, e);
            None
        }
    }
}

pub fn store_model(path: &Path, model: &VariantModel) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(model)?;
    std::fs::write(path, raw)?;
    Ok(())
}

/// The personalizer's view: the favored variant, or None when no model has
/// been trained yet.
pub fn predict_best_variant(path: &Path) -> Option<String> {
    load_model(path).map(|model| model.best_variant)
}
