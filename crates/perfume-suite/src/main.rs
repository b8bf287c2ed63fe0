//! Starts the suite and walks one order through it: a warehouse, a production run, intake of
//! the bottled perfumes, and a distribution dispatch, all over the internal gateway.

use perfume_suite::config::SuiteConfig;
use perfume_suite::lifecycle::{setup_tracing, PerfumeSuite};
use perfume_suite::model::{
    BottleVolume, Category, PackageCreate, PerfumeId, ProductionOrder, ProductionRequest, RunKey,
    WarehouseCreate,
};
use perfume_suite::rpc::{
    Headers, RpcCall, RpcRequest, DISPATCH_ROLE_HEADER, INTERNAL_SECRET_HEADER,
};
use serde_json::Value;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SuiteConfig::from_env().map_err(|e| e.to_string())?;
    let suite = PerfumeSuite::new(&config);
    let headers = Headers::new().with(INTERNAL_SECRET_HEADER, config.rpc.internal_secret.clone());

    let warehouse = suite
        .warehouses
        .create_warehouse(WarehouseCreate {
            label: "Central".to_string(),
            location: "Belgrade".to_string(),
            capacity: 10,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%warehouse, "Warehouse ready");

    let span = tracing::info_span!("production");
    let produced = async {
        let order = ProductionOrder {
            key: Some(RunKey::generate()),
            request: ProductionRequest {
                name: "Rose".to_string(),
                category: Category::Parfum,
                bottle_count: 4,
                bottle_volume: BottleVolume::Ml150,
            },
        };
        suite
            .gateway
            .respond(RpcRequest::new(headers.clone(), RpcCall::Produce(order)))
            .await
    }
    .instrument(span)
    .await;
    if !produced.is_success() {
        error!(body = %produced.body, "Production failed");
        suite.shutdown().await?;
        return Err(format!("production failed with status {}", produced.status));
    }

    let serials = bottled(&produced.body);
    info!(count = serials.len(), "Perfumes bottled");

    for (id, serial) in &serials {
        let intake = RpcCall::Intake {
            warehouse_id: warehouse,
            package: PackageCreate {
                label: serial.clone(),
                sender_address: "Perfume Suite, Belgrade".to_string(),
                item_refs: vec![*id],
            },
        };
        let response = suite.gateway.respond(RpcRequest::new(headers.clone(), intake)).await;
        if !response.is_success() {
            error!(body = %response.body, "Intake failed");
        }
    }

    let span = tracing::info_span!("dispatch");
    let dispatched = async {
        suite
            .gateway
            .respond(RpcRequest::new(
                headers.clone().with(DISPATCH_ROLE_HEADER, "distribution"),
                RpcCall::Dispatch { requested_quantity: 5 },
            ))
            .await
    }
    .instrument(span)
    .await;
    info!(
        status = dispatched.status,
        dispatched = %dispatched.body["dispatchedCount"],
        "Dispatch finished"
    );

    suite.shutdown().await?;
    info!("Demo completed");
    Ok(())
}

/// Id and serial of every perfume in a produce response. Entries with an id outside the
/// `u32` range are skipped.
fn bottled(body: &Value) -> Vec<(PerfumeId, String)> {
    body.as_array()
        .map(|perfumes| {
            perfumes
                .iter()
                .filter_map(|p| {
                    let id = u32::try_from(p["id"].as_u64()?).ok()?;
                    Some((PerfumeId(id), p["serial"].as_str()?.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}
