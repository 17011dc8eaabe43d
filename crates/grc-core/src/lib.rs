//! # grc-core
//!
//! Core types, ID prefixes, and error types for the GRC audit workflow.
//!
//! This crate provides the foundational types shared across all GRC crates:
//! - Entity structs for standards, controls, implementations, audits and
//!   their audit items, data requests and the activity log
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Lifecycle transition errors
//! - Acting-user identity and roles
//! - Activity detail sub-types

pub mod activity_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
