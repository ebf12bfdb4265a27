use std::path::PathBuf;
use std::sync::Arc;

use magnet::dal::{InMemoryLeadStore, LeadStore};
use magnet::domain::{
    load_model, predict_best_variant, HiringSignal, Lead, VariantModel,
};
use magnet::services::retrainer::retrain_once;

fn temp_model_path() -> PathBuf {
    std::env::temp_dir().join(format!("magnet-model-{}.json", uuid::Uuid::new_v4()))
}

fn replied_lead(person: &str, variant: &str) -> Lead {
    let mut lead = Lead::for_person(
        "Acme".to_string(),
        None,
        "Software".to_string(),
        Some(100),
        HiringSignal::Unknown,
        person.to_string(),
        "CTO".to_string(),
        format!("https://site.test/in/{}", person.to_lowercase()),
        String::new(),
        String::new(),
    );
    lead.message_variant = Some(variant.to_string());
    lead.message_reply = Some("sounds interesting".to_string());
    lead
}

#[tokio::test]
async fn retraining_publishes_the_mode_variant() {
    let store = InMemoryLeadStore::new();
    for i in 0..3 {
        store
            .insert(&replied_lead(&format!("short-{}", i), "short_0"))
            .await
            .unwrap();
    }
    for i in 0..5 {
        store
            .insert(&replied_lead(&format!("medium-{}", i), "medium_1"))
            .await
            .unwrap();
    }
    store
        .insert(&replied_lead("long-0", "long_2"))
        .await
        .unwrap();

    let model_path = temp_model_path();
    retrain_once(&store, &model_path).await;

    assert_eq!(
        predict_best_variant(&model_path),
        Some("medium_1".to_string())
    );
    let model = load_model(&model_path).unwrap();
    assert_eq!(model.variant_counts["medium_1"], 5);
    assert_eq!(model.variant_counts["short_0"], 3);
    assert_eq!(model.variant_counts["long_2"], 1);

    std::fs::remove_file(model_path).unwrap();
}

#[tokio::test]
async fn retraining_without_replies_leaves_the_model_alone() {
    let store = InMemoryLeadStore::new();
    let model_path = temp_model_path();

    // No model yet: a no-op run must not create one.
    retrain_once(&store, &model_path).await;
    assert_eq!(predict_best_variant(&model_path), None);

    // A previously published model survives an empty retrain untouched.
    let existing = VariantModel {
        best_variant: "long_1".to_string(),
        variant_counts: [("long_1".to_string(), 4)].into_iter().collect(),
        trained_at: chrono::Utc::now(),
    };
    magnet::domain::store_model(&model_path, &existing).unwrap();
    retrain_once(&store, &model_path).await;
    assert_eq!(load_model(&model_path), Some(existing));

    std::fs::remove_file(model_path).unwrap();
}

#[tokio::test]
async fn retrained_model_feeds_the_personalizer() {
    let store = InMemoryLeadStore::new();
    store
        .insert(&replied_lead("solo", "short_2"))
        .await
        .unwrap();

    let model_path = temp_model_path();
    retrain_once(&store, &model_path).await;

    let profile = magnet::domain::ProspectProfile {
        name: "Sam".to_string(),
        company: "Acme".to_string(),
        ..Default::default()
    };
    let forced = predict_best_variant(&model_path);
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(7);
    let (_, variant) =
        magnet::domain::generate_message(&profile, forced.as_deref(), &mut rng);
    assert_eq!(variant, "short_2");

    std::fs::remove_file(model_path).unwrap();
}

#[tokio::test]
async fn distinct_industries_reads_back_from_the_store() {
    let store = Arc::new(InMemoryLeadStore::new());
    store
        .insert(&replied_lead("one", "short_0"))
        .await
        .unwrap();

    let industries = store.distinct_industries().await.unwrap();
    assert_eq!(industries, vec!["Software".to_string()]);
}
