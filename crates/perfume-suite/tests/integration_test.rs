use actor_framework::ActorClient;
use chrono::Datelike;
use perfume_suite::config::SuiteConfig;
use perfume_suite::lifecycle::PerfumeSuite;
use perfume_suite::model::{
    BottleVolume, Category, PlantCreate, PlantId, PlantStatus, PlantUpdate, ProductionRequest,
    RunKey, RunStage,
};
use perfume_suite::fulfillment_actor::FulfillmentError;
use perfume_suite::perfume_actor::PerfumeError;
use perfume_suite::plant_actor::PlantError;
use rust_decimal::Decimal;
use std::collections::HashSet;

fn request(name: &str, bottle_count: u32, bottle_volume: BottleVolume) -> ProductionRequest {
    ProductionRequest {
        name: name.to_string(),
        category: Category::Parfum,
        bottle_count,
        bottle_volume,
    }
}

fn jasmine(potency: i64) -> PlantCreate {
    PlantCreate {
        name: "Jasmine".to_string(),
        taxonomic_name: "Jasminum grandiflorum".to_string(),
        origin: "Grasse".to_string(),
        potency: Some(Decimal::new(potency, 2)),
    }
}

#[tokio::test]
async fn test_produce_plants_harvests_and_assembles() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());

    let perfumes = suite
        .fulfillment
        .produce(request("Rose", 4, BottleVolume::Ml150))
        .await
        .unwrap();

    assert_eq!(perfumes.len(), 4);
    let serials: HashSet<&str> = perfumes.iter().map(|p| p.serial.as_str()).collect();
    assert_eq!(serials.len(), 4);
    for perfume in &perfumes {
        let expected = format!("PP-{}-{}", perfume.created_at.year(), perfume.id.0);
        assert_eq!(perfume.serial, expected);
        assert!(perfume.expires_at > perfume.created_at);
        assert_eq!(perfume.volume, BottleVolume::Ml150);

        let plant = suite.plants.get(perfume.source_plant).await.unwrap().unwrap();
        assert_eq!(plant.status, PlantStatus::Harvested);
        assert!(plant.potency <= Decimal::new(400, 2));
        assert_eq!(plant.origin, "Unknown");
    }

    // All 12 planted plants were harvested.
    assert_eq!(suite.plants.available_count("Rose").await.unwrap(), 0);
    for id in 1..=12 {
        let plant = suite.plants.get(PlantId(id)).await.unwrap().unwrap();
        assert_eq!(plant.status, PlantStatus::Harvested);
    }

    let found = suite
        .perfumes
        .find_by_serial(&perfumes[0].serial)
        .await
        .unwrap();
    assert_eq!(found.as_ref(), Some(&perfumes[0]));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_produce_uses_existing_stock_first() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    suite
        .plants
        .plant_batch(jasmine(250), 20)
        .await
        .unwrap();

    let key = RunKey::from("jasmine-1");
    suite
        .fulfillment
        .produce_with_key(key.clone(), request("Jasmine", 3, BottleVolume::Ml250))
        .await
        .unwrap();

    let run = suite.fulfillment.find_run(&key).await.unwrap().unwrap();
    assert_eq!(run.stage, RunStage::Committed);
    assert_eq!(run.units_needed, 15);
    assert_eq!(run.replenished, 0);
    assert_eq!(suite.plants.available_count("Jasmine").await.unwrap(), 5);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_produce_is_idempotent_per_key() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let key = RunKey::from("order-99");

    let first = suite
        .fulfillment
        .produce_with_key(key.clone(), request("Iris", 2, BottleVolume::Ml150))
        .await
        .unwrap();
    let again = suite
        .fulfillment
        .produce_with_key(key.clone(), request("Iris", 2, BottleVolume::Ml150))
        .await
        .unwrap();

    assert_eq!(first, again);
    // Six plants planted once, not twice.
    assert!(suite.plants.get(PlantId(7)).await.unwrap().is_none());

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_runs_never_share_plants() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());

    let (a, b) = tokio::join!(
        suite.fulfillment.produce(request("Rose", 4, BottleVolume::Ml150)),
        suite.fulfillment.produce(request("Rose", 4, BottleVolume::Ml150)),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let sources_a: HashSet<PlantId> = a.iter().map(|p| p.source_plant).collect();
    let sources_b: HashSet<PlantId> = b.iter().map(|p| p.source_plant).collect();
    assert!(sources_a.is_disjoint(&sources_b));

    let serials: HashSet<String> = a.iter().chain(b.iter()).map(|p| p.serial.clone()).collect();
    assert_eq!(serials.len(), 8);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_harvests_are_all_or_nothing() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    suite.plants.plant_batch(jasmine(300), 10).await.unwrap();

    let (a, b) = tokio::join!(
        suite.plants.harvest("Jasmine", 6),
        suite.plants.harvest("Jasmine", 6),
    );

    let results = [a, b];
    let won: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(won.len(), 1);
    assert_eq!(won[0].len(), 6);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(PlantError::InsufficientStock {
            requested: 6,
            available: 4,
            ..
        })
    )));
    assert_eq!(suite.plants.available_count("Jasmine").await.unwrap(), 4);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_adjust_potency_and_fifo_harvest() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let first = suite.plants.create_plant(jasmine(465)).await.unwrap();
    let second = suite.plants.create_plant(jasmine(120)).await.unwrap();

    let adjusted = suite.plants.adjust_potency(first, 65).await.unwrap();
    assert_eq!(adjusted.potency, Decimal::new(302, 2));

    // Floored at the minimum potency.
    let floored = suite.plants.adjust_potency(second, 10).await.unwrap();
    assert_eq!(floored.potency, Decimal::new(100, 2));

    let units = suite.plants.harvest("Jasmine", 1).await.unwrap();
    assert_eq!(units[0].id, first);

    let err = suite.plants.adjust_potency(PlantId(404), 50).await.unwrap_err();
    assert!(matches!(err, PlantError::NotFound(_)));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_plant_keeps_untouched_fields() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let id = suite.plants.create_plant(jasmine(250)).await.unwrap();

    let updated = suite
        .plants
        .update_plant(
            id,
            PlantUpdate {
                origin: Some("Egypt".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.origin, "Egypt");
    assert_eq!(updated.taxonomic_name, "Jasminum grandiflorum");
    assert_eq!(updated.potency, Decimal::new(250, 2));

    let stored = suite.plants.get(id).await.unwrap().unwrap();
    assert_eq!(stored.origin, "Egypt");

    let err = suite
        .plants
        .update_plant(PlantId(404), PlantUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PlantError::NotFound(_)));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_produced_records_cannot_be_deleted() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let key = RunKey::from("keep-1");
    let perfumes = suite
        .fulfillment
        .produce_with_key(key.clone(), request("Rose", 1, BottleVolume::Ml150))
        .await
        .unwrap();
    let perfume = &perfumes[0];

    let err = suite.plants.delete(perfume.source_plant).await.unwrap_err();
    assert!(matches!(err, PlantError::ValidationError(_)));
    assert!(suite.plants.get(perfume.source_plant).await.unwrap().is_some());

    let err = suite.perfumes.delete(perfume.id).await.unwrap_err();
    assert!(matches!(err, PerfumeError::ValidationError(_)));
    assert!(suite.perfumes.get(perfume.id).await.unwrap().is_some());

    let run = suite.fulfillment.find_run(&key).await.unwrap().unwrap();
    let err = suite.fulfillment.delete(run.id).await.unwrap_err();
    assert!(matches!(err, FulfillmentError::ValidationError(_)));

    // The key still replays the same perfumes.
    let again = suite
        .fulfillment
        .produce_with_key(key, request("Rose", 1, BottleVolume::Ml150))
        .await
        .unwrap();
    assert_eq!(again, perfumes);

    suite.shutdown().await.unwrap();
}
