//! # Internal RPC
//!
//! The call/response contract between components, guarded by a shared secret. Transport
//! framing is left to whatever carries [`RpcRequest`]s; the [`Gateway`] only authenticates,
//! routes and maps errors to statuses:
//!
//! | Error | Status |
//! |-------|--------|
//! | Validation | 400 |
//! | UnauthorizedInternal | 401 |
//! | NotFound | 404 |
//! | InsufficientStock, CapacityExceeded | 409 |
//! | Unavailable | 503 |

pub mod auth;
pub mod dto;
pub mod error;
pub mod gateway;

pub use auth::{InternalCredential, DISPATCH_ROLE_HEADER, INTERNAL_SECRET_HEADER};
pub use dto::{Headers, RpcCall, RpcRequest, RpcResponse};
pub use error::RpcError;
pub use gateway::Gateway;
