//! # Perfume Suite
//!
//! The fulfillment core of a perfume producer, built as resource actors on `actor-framework`.
//!
//! - **[plant_actor]**: plants, FIFO harvest, reservations
//! - **[perfume_actor]**: finished perfumes with `PP-<year>-<id>` serials
//! - **[fulfillment_actor]**: production runs (replenish, reserve, harvest, normalize, assemble)
//! - **[warehouse_actor]**, **[package_actor]**, **[dispatch]**: intake and throttled dispatch
//! - **[rpc]**: the internal call/response contract behind a shared secret
//! - **[lifecycle]**: [`PerfumeSuite`](lifecycle::PerfumeSuite) and tracing setup
//! - **[config]**: TOML configuration
//!
//! See `tests/` for end-to-end flows.

pub mod clients;
pub mod config;
pub mod dispatch;
pub mod fulfillment_actor;
pub mod lifecycle;
pub mod model;
pub mod package_actor;
pub mod perfume_actor;
pub mod plant_actor;
pub mod rpc;
pub mod warehouse_actor;
