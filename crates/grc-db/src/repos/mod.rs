//! Repository modules implementing CRUD operations for all entities.
//!
//! Each module adds methods to `GrcService` via `impl GrcService` blocks.

pub mod activity;
pub mod audit;
pub mod audit_item;
pub mod auditable;
pub mod control;
pub mod data_request;
pub mod implementation;
pub mod standard;
