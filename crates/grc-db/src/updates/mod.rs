//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. The serialized
//! update (changed fields only) becomes the `detail` of the `updated`
//! activity entry.

pub mod audit;
pub mod audit_item;
pub mod implementation;
