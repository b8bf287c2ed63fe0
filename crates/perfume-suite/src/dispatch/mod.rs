//! # Dispatch Engine
//!
//! Intake into capacity-bound warehouses and role-throttled dispatch out of them. The engine is
//! not an actor: it sequences calls to the package and warehouse actors and does its waiting
//! between those calls, so one dispatch's delays never hold up another request.
//!
//! | Role | Batch | Delay before each batch |
//! |------|-------|-------------------------|
//! | distribution | 3 | 500 ms |
//! | depot | 1 | 2500 ms |

pub mod engine;
pub mod error;
pub mod strategy;

pub use engine::{DispatchEngine, DispatchReport};
pub use error::DispatchError;
pub use strategy::{DispatchStrategies, DispatchStrategy, Role};
