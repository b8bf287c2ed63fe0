//! Collection commands for the Perfume actor. Perfumes have no per-entity actions.

use crate::model::{Perfume, PerfumeDraft};

#[derive(Debug, Clone)]
pub enum PerfumeCommand {
    /// Stores a whole batch in one write, assigning ids and serials.
    Assemble(Vec<PerfumeDraft>),
    FindBySerial(String),
}

/// Results from PerfumeCommands - variants match 1:1 with PerfumeCommand
#[derive(Debug, Clone, PartialEq)]
pub enum PerfumeCommandResult {
    Assemble(Vec<Perfume>),
    FindBySerial(Option<Perfume>),
}
