//! Dispatches authenticated internal calls to the suite's components.

use super::auth::{InternalCredential, DISPATCH_ROLE_HEADER};
use super::dto::{
    AvailableCountResponse, DispatchResponse, ErrorBody, HarvestResponse, RpcCall, RpcRequest,
    RpcResponse,
};
use super::RpcError;
use crate::clients::{FulfillmentClient, PlantClient};
use crate::dispatch::{DispatchEngine, Role};
use actor_framework::ActorClient;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct Gateway {
    credential: InternalCredential,
    plants: PlantClient,
    fulfillment: FulfillmentClient,
    dispatch: DispatchEngine,
}

impl Gateway {
    pub fn new(
        credential: InternalCredential,
        plants: PlantClient,
        fulfillment: FulfillmentClient,
        dispatch: DispatchEngine,
    ) -> Self {
        Self {
            credential,
            plants,
            fulfillment,
            dispatch,
        }
    }

    /// Handles a call and renders the outcome, errors included, as a response.
    #[instrument(skip(self, request), fields(op = request.call.name()))]
    pub async fn respond(&self, request: RpcRequest) -> RpcResponse {
        match self.handle(request).await {
            Ok(body) => {
                info!(status = 200, "Call ok");
                RpcResponse { status: 200, body }
            }
            Err(e) => {
                warn!(status = e.status(), error = %e, "Call failed");
                RpcResponse {
                    status: e.status(),
                    body: error_body(&e),
                }
            }
        }
    }

    /// Handles a call, returning the success body.
    pub async fn handle(&self, request: RpcRequest) -> Result<Value, RpcError> {
        self.credential.verify(&request.headers)?;

        match request.call {
            RpcCall::AvailableCount { name } => {
                let available = self.plants.available_count(&name).await?;
                to_body(&AvailableCountResponse { name, available })
            }
            RpcCall::CreateUnit(params) => {
                let id = self.plants.create_plant(params).await?;
                let plant = self
                    .plants
                    .get(id)
                    .await?
                    .ok_or_else(|| RpcError::NotFound(id.to_string()))?;
                to_body(&plant)
            }
            RpcCall::Harvest(body) => {
                let harvested_units = self.plants.harvest(&body.name, body.count).await?;
                to_body(&HarvestResponse { harvested_units })
            }
            RpcCall::AdjustPotency { id, percent } => {
                let plant = self.plants.adjust_potency(id, percent).await?;
                to_body(&plant)
            }
            RpcCall::Dispatch { requested_quantity } => {
                let role: Role = request
                    .headers
                    .get(DISPATCH_ROLE_HEADER)
                    .ok_or_else(|| {
                        RpcError::Validation(format!("missing {DISPATCH_ROLE_HEADER} header"))
                    })?
                    .parse()?;
                let report = self.dispatch.dispatch(requested_quantity, role).await?;
                to_body(&DispatchResponse::from(report))
            }
            RpcCall::Intake {
                warehouse_id,
                package,
            } => {
                let package = self.dispatch.intake(warehouse_id, package).await?;
                to_body(&package)
            }
            RpcCall::Produce(order) => {
                let perfumes = self.fulfillment.submit(order).await?;
                to_body(&perfumes)
            }
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::Internal(e.to_string()))
}

fn error_body(e: &RpcError) -> Value {
    let body = ErrorBody {
        error: e.kind(),
        message: e.to_string(),
    };
    serde_json::to_value(&body).unwrap_or(Value::Null)
}
