use perfume_suite::config::SuiteConfig;
use perfume_suite::dispatch::{DispatchEngine, DispatchError, Role};
use perfume_suite::lifecycle::PerfumeSuite;
use perfume_suite::model::{
    PackageCreate, PackageId, PackageStatus, PackageUpdate, WarehouseCreate, WarehouseId,
};
use perfume_suite::package_actor::PackageError;
use perfume_suite::warehouse_actor::WarehouseError;
use actor_framework::ActorClient;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

fn parcel(n: u32) -> PackageCreate {
    PackageCreate {
        label: format!("parcel-{n}"),
        sender_address: "Harbour Rd 4".to_string(),
        item_refs: Vec::new(),
    }
}

async fn warehouse(suite: &PerfumeSuite, capacity: u32) -> WarehouseId {
    suite
        .warehouses
        .create_warehouse(WarehouseCreate {
            label: "North".to_string(),
            location: "Rotterdam".to_string(),
            capacity,
        })
        .await
        .unwrap()
}

async fn fill(engine: &DispatchEngine, warehouse: WarehouseId, count: u32) -> Vec<PackageId> {
    let mut ids = Vec::new();
    for n in 0..count {
        ids.push(engine.intake(warehouse, parcel(n)).await.unwrap().id);
    }
    ids
}

#[tokio::test(start_paused = true)]
async fn test_depot_dispatches_one_package_every_2500_ms() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 10).await;
    fill(&suite.dispatch, north, 6).await;

    let start = Instant::now();
    let report = suite.dispatch.dispatch(5, Role::Depot).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.dispatched_count(), 5);
    assert!(!report.is_partial());
    assert!(elapsed >= Duration::from_millis(12_500), "took {elapsed:?}");
    assert!(elapsed < Duration::from_millis(13_000), "took {elapsed:?}");
    assert_eq!(suite.dispatch.stored_count(north).await.unwrap(), 1);

    suite.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_distribution_dispatches_in_batches_of_three() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 10).await;
    let ids = fill(&suite.dispatch, north, 7).await;

    let start = Instant::now();
    let report = suite.dispatch.dispatch(7, Role::Distribution).await.unwrap();
    let elapsed = start.elapsed();

    // ceil(7 / 3) = 3 batches of 500 ms.
    assert!(elapsed >= Duration::from_millis(1_500), "took {elapsed:?}");
    assert!(elapsed < Duration::from_millis(2_000), "took {elapsed:?}");

    // Oldest first, all delivered.
    let delivered: Vec<PackageId> = report.packages.iter().map(|p| p.id).collect();
    assert_eq!(delivered, ids);
    assert!(report
        .packages
        .iter()
        .all(|p| p.status == PackageStatus::Delivered));

    suite.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_delivers_what_is_stored() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 10).await;
    fill(&suite.dispatch, north, 2).await;

    let report = suite.dispatch.dispatch(5, Role::Distribution).await.unwrap();
    assert_eq!(report.dispatched_count(), 2);
    assert_eq!(report.requested, 5);
    assert!(report.is_partial());

    // Nothing left: an empty, immediate result.
    let start = Instant::now();
    let report = suite.dispatch.dispatch(3, Role::Depot).await.unwrap();
    assert_eq!(report.dispatched_count(), 0);
    assert_eq!(start.elapsed(), Duration::ZERO);

    suite.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_non_positive_quantity_rejected() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 10).await;
    fill(&suite.dispatch, north, 1).await;

    for requested in [0, -3] {
        let err = suite
            .dispatch
            .dispatch(requested, Role::Distribution)
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::InvalidQuantity(requested));
    }
    assert_eq!(suite.dispatch.stored_count(north).await.unwrap(), 1);

    suite.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_dispatches_never_share_packages() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 10).await;
    fill(&suite.dispatch, north, 6).await;

    let (a, b) = tokio::join!(
        suite.dispatch.dispatch(4, Role::Distribution),
        suite.dispatch.dispatch(4, Role::Depot),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.dispatched_count() + b.dispatched_count(), 6);
    let ids: HashSet<PackageId> = a
        .packages
        .iter()
        .chain(b.packages.iter())
        .map(|p| p.id)
        .collect();
    assert_eq!(ids.len(), 6);
    assert_eq!(suite.dispatch.stored_count(north).await.unwrap(), 0);

    suite.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_dispatch_still_delivers_its_claim() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 3).await;
    let ids = fill(&suite.dispatch, north, 3).await;

    // The caller gives up long before the first 2500 ms batch.
    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        suite.dispatch.dispatch(3, Role::Depot),
    )
    .await;
    assert!(abandoned.is_err());

    // The dispatch keeps running and finishes its three batches.
    tokio::time::sleep(Duration::from_millis(8_000)).await;
    assert_eq!(suite.dispatch.stored_count(north).await.unwrap(), 0);
    for id in ids {
        let package = suite.packages.get(id).await.unwrap().unwrap();
        assert_eq!(package.status, PackageStatus::Delivered);
    }

    // Capacity is free again and new stock dispatches normally.
    fill(&suite.dispatch, north, 3).await;
    let report = suite.dispatch.dispatch(3, Role::Distribution).await.unwrap();
    assert_eq!(report.dispatched_count(), 3);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_intake_respects_capacity() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let small = warehouse(&suite, 2).await;

    let first = suite.dispatch.intake(small, parcel(1)).await.unwrap();
    assert_eq!(first.status, PackageStatus::Stored);
    assert_eq!(first.warehouse_id, Some(small));
    suite.dispatch.intake(small, parcel(2)).await.unwrap();

    let err = suite.dispatch.intake(small, parcel(3)).await.unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Package(PackageError::CapacityExceeded {
            stored: 2,
            capacity: 2,
            ..
        })
    ));
    assert_eq!(suite.dispatch.stored_count(small).await.unwrap(), 2);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dispatch_frees_capacity() {
    let mut config = SuiteConfig::default();
    config.dispatch.distribution.inter_batch_delay_ms = 0;
    let suite = PerfumeSuite::new(&config);
    let small = warehouse(&suite, 1).await;

    suite.dispatch.intake(small, parcel(1)).await.unwrap();
    assert!(suite.dispatch.intake(small, parcel(2)).await.is_err());

    suite.dispatch.dispatch(1, Role::Distribution).await.unwrap();
    suite.dispatch.intake(small, parcel(2)).await.unwrap();

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_store_moves_packed_package_in() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 1).await;

    let id = suite.packages.create_package(parcel(1)).await.unwrap();
    let packed = suite.packages.get(id).await.unwrap().unwrap();
    assert_eq!(packed.status, PackageStatus::Packed);
    assert_eq!(packed.warehouse_id, None);

    let stored = suite.dispatch.store(north, id).await.unwrap();
    assert_eq!(stored.status, PackageStatus::Stored);
    assert_eq!(stored.warehouse_id, Some(north));

    // Already stored: not PACKED any more.
    let err = suite.dispatch.store(north, id).await.unwrap_err();
    assert!(matches!(err, DispatchError::Package(_)));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_warehouse() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());

    let err = suite
        .dispatch
        .intake(WarehouseId(42), parcel(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Warehouse(WarehouseError::NotFound(_))));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stored_package_cannot_be_deleted() {
    let suite = PerfumeSuite::new(&SuiteConfig::default());
    let north = warehouse(&suite, 1).await;
    let stored = suite.dispatch.intake(north, parcel(1)).await.unwrap();

    let err = suite.packages.delete(stored.id).await.unwrap_err();
    assert!(matches!(err, PackageError::ValidationError(_)));

    // Still occupying the only slot.
    assert_eq!(suite.dispatch.stored_count(north).await.unwrap(), 1);
    assert!(suite.dispatch.intake(north, parcel(2)).await.is_err());

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_relabel_until_delivered() {
    let mut config = SuiteConfig::default();
    config.dispatch.depot.inter_batch_delay_ms = 0;
    let suite = PerfumeSuite::new(&config);
    let north = warehouse(&suite, 2).await;
    let stored = suite.dispatch.intake(north, parcel(1)).await.unwrap();

    let relabelled = suite
        .packages
        .update_package(
            stored.id,
            PackageUpdate {
                label: Some("fragile".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(relabelled.label, "fragile");
    assert_eq!(relabelled.sender_address, "Harbour Rd 4");
    assert_eq!(relabelled.status, PackageStatus::Stored);

    suite.dispatch.dispatch(1, Role::Depot).await.unwrap();
    let err = suite
        .packages
        .update_package(stored.id, PackageUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PackageError::ValidationError(_)));

    suite.shutdown().await.unwrap();
}
