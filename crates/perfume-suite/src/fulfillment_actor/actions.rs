//! Collection commands for the Fulfillment actor.

use crate::model::{FulfillmentRun, Perfume, ProductionOrder, RunKey};

#[derive(Debug, Clone)]
pub enum FulfillmentCommand {
    /// Runs (or resumes, or replays) the run registered under the order's key.
    Produce(ProductionOrder),
    FindByKey(RunKey),
}

/// Results from FulfillmentCommands - variants match 1:1 with FulfillmentCommand
#[derive(Debug, Clone)]
pub enum FulfillmentCommandResult {
    Produce(Vec<Perfume>),
    FindByKey(Option<FulfillmentRun>),
}
