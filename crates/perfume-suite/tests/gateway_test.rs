use perfume_suite::config::SuiteConfig;
use perfume_suite::lifecycle::PerfumeSuite;
use perfume_suite::model::{
    BottleVolume, Category, PackageCreate, PlantCreate, PlantId, ProductionOrder,
    ProductionRequest, WarehouseCreate, WarehouseId,
};
use perfume_suite::rpc::dto::HarvestBody;
use perfume_suite::rpc::{
    Headers, RpcCall, RpcRequest, RpcResponse, DISPATCH_ROLE_HEADER, INTERNAL_SECRET_HEADER,
};
use rust_decimal::Decimal;
use serde_json::json;

const SECRET: &str = "s3cret";

fn start() -> PerfumeSuite {
    let mut config = SuiteConfig::default();
    config.rpc.internal_secret = SECRET.to_string();
    config.dispatch.distribution.inter_batch_delay_ms = 0;
    config.dispatch.depot.inter_batch_delay_ms = 0;
    PerfumeSuite::new(&config)
}

fn trusted() -> Headers {
    Headers::new().with(INTERNAL_SECRET_HEADER, SECRET)
}

async fn call(suite: &PerfumeSuite, headers: Headers, call: RpcCall) -> RpcResponse {
    suite.gateway.respond(RpcRequest::new(headers, call)).await
}

fn lavender(potency: Option<i64>) -> PlantCreate {
    PlantCreate {
        name: "Lavender".to_string(),
        taxonomic_name: "Lavandula angustifolia".to_string(),
        origin: "Provence".to_string(),
        potency: potency.map(|p| Decimal::new(p, 2)),
    }
}

fn parcel() -> PackageCreate {
    PackageCreate {
        label: "parcel".to_string(),
        sender_address: "Harbour Rd 4".to_string(),
        item_refs: Vec::new(),
    }
}

fn assert_error(response: &RpcResponse, status: u16, kind: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["error"], kind);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_calls_without_the_secret_are_rejected() {
    let suite = start();
    let available = RpcCall::AvailableCount {
        name: "Lavender".into(),
    };

    let missing = call(&suite, Headers::new(), available.clone()).await;
    assert_error(&missing, 401, "UnauthorizedInternalError");

    let wrong = call(
        &suite,
        Headers::new().with(INTERNAL_SECRET_HEADER, "guess"),
        available.clone(),
    )
    .await;
    assert_error(&wrong, 401, "UnauthorizedInternalError");

    // Header names are case-insensitive.
    let ok = call(
        &suite,
        Headers::new().with("X-Internal-Secret", SECRET),
        available,
    )
    .await;
    assert_eq!(ok.status, 200);
    assert_eq!(ok.body, json!({ "name": "Lavender", "available": 0 }));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_plant_lifecycle_over_rpc() {
    let suite = start();

    let created = call(&suite, trusted(), RpcCall::CreateUnit(lavender(Some(465)))).await;
    assert_eq!(created.status, 200);
    assert_eq!(created.body["status"], "PLANTED");
    let id = PlantId(created.body["id"].as_u64().unwrap() as u32);

    let adjusted = call(&suite, trusted(), RpcCall::AdjustPotency { id, percent: 65 }).await;
    assert_eq!(adjusted.status, 200);
    let potency: Decimal = serde_json::from_value(adjusted.body["potency"].clone()).unwrap();
    assert_eq!(potency, Decimal::new(302, 2));

    call(&suite, trusted(), RpcCall::CreateUnit(lavender(None))).await;
    let harvested = call(
        &suite,
        trusted(),
        RpcCall::Harvest(HarvestBody {
            name: "Lavender".into(),
            count: 2,
        }),
    )
    .await;
    assert_eq!(harvested.status, 200);
    assert_eq!(harvested.body["harvestedUnits"].as_array().unwrap().len(), 2);

    let too_many = call(
        &suite,
        trusted(),
        RpcCall::Harvest(HarvestBody {
            name: "Lavender".into(),
            count: 1,
        }),
    )
    .await;
    assert_error(&too_many, 409, "InsufficientStockError");

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_plant_errors_map_to_statuses() {
    let suite = start();

    let missing = call(
        &suite,
        trusted(),
        RpcCall::AdjustPotency {
            id: PlantId(99),
            percent: 50,
        },
    )
    .await;
    assert_error(&missing, 404, "NotFoundError");

    let created = call(&suite, trusted(), RpcCall::CreateUnit(lavender(Some(300)))).await;
    let id = PlantId(created.body["id"].as_u64().unwrap() as u32);
    for percent in [0, 101] {
        let invalid = call(&suite, trusted(), RpcCall::AdjustPotency { id, percent }).await;
        assert_error(&invalid, 400, "ValidationError");
    }

    let out_of_range = call(&suite, trusted(), RpcCall::CreateUnit(lavender(Some(700)))).await;
    assert_error(&out_of_range, 400, "ValidationError");

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dispatch_requires_a_known_role() {
    let suite = start();
    let dispatch = RpcCall::Dispatch {
        requested_quantity: 1,
    };

    let missing = call(&suite, trusted(), dispatch.clone()).await;
    assert_error(&missing, 400, "ValidationError");

    let unknown = call(
        &suite,
        trusted().with(DISPATCH_ROLE_HEADER, "courier"),
        dispatch.clone(),
    )
    .await;
    assert_error(&unknown, 400, "ValidationError");

    let zero = call(
        &suite,
        trusted().with(DISPATCH_ROLE_HEADER, "depot"),
        RpcCall::Dispatch {
            requested_quantity: 0,
        },
    )
    .await;
    assert_error(&zero, 400, "ValidationError");

    let empty = call(
        &suite,
        trusted().with(DISPATCH_ROLE_HEADER, "DEPOT"),
        dispatch,
    )
    .await;
    assert_eq!(empty.status, 200);
    assert_eq!(empty.body["role"], "depot");
    assert_eq!(empty.body["dispatchedCount"], 0);

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_intake_and_dispatch_over_rpc() {
    let suite = start();
    let north = suite
        .warehouses
        .create_warehouse(WarehouseCreate {
            label: "North".into(),
            location: "Rotterdam".into(),
            capacity: 2,
        })
        .await
        .unwrap();

    let intake = |warehouse_id: WarehouseId| RpcCall::Intake {
        warehouse_id,
        package: parcel(),
    };

    for _ in 0..2 {
        let stored = call(&suite, trusted(), intake(north)).await;
        assert_eq!(stored.status, 200);
        assert_eq!(stored.body["status"], "STORED");
    }
    let full = call(&suite, trusted(), intake(north)).await;
    assert_error(&full, 409, "CapacityExceededError");

    let nowhere = call(&suite, trusted(), intake(WarehouseId(77))).await;
    assert_error(&nowhere, 404, "NotFoundError");

    let dispatched = call(
        &suite,
        trusted().with(DISPATCH_ROLE_HEADER, "distribution"),
        RpcCall::Dispatch {
            requested_quantity: 5,
        },
    )
    .await;
    assert_eq!(dispatched.status, 200);
    assert_eq!(dispatched.body["dispatchedCount"], 2);
    let packages = dispatched.body["packages"].as_array().unwrap();
    assert!(packages.iter().all(|p| p["status"] == "DELIVERED"));

    suite.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_produce_over_rpc() {
    let suite = start();
    let request = ProductionRequest {
        name: "Lavender".into(),
        category: Category::Cologne,
        bottle_count: 2,
        bottle_volume: BottleVolume::Ml250,
    };

    let produced = call(
        &suite,
        trusted(),
        RpcCall::Produce(ProductionOrder::from(request.clone())),
    )
    .await;
    assert_eq!(produced.status, 200, "body: {}", produced.body);
    let perfumes = produced.body.as_array().unwrap();
    assert_eq!(perfumes.len(), 2);
    assert!(perfumes.iter().all(|p| p["category"] == "cologne"));

    let invalid = call(
        &suite,
        trusted(),
        RpcCall::Produce(ProductionOrder::from(ProductionRequest {
            bottle_count: 0,
            ..request
        })),
    )
    .await;
    assert_error(&invalid, 400, "ValidationError");

    suite.shutdown().await.unwrap();
}
