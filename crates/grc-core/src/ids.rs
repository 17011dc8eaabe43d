//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated by the store.

pub const PREFIX_STANDARD: &str = "std";
pub const PREFIX_CONTROL: &str = "ctl";
pub const PREFIX_IMPLEMENTATION: &str = "imp";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_AUDIT_ITEM: &str = "itm";
pub const PREFIX_DATA_REQUEST: &str = "drq";
pub const PREFIX_DATA_REQUEST_RESPONSE: &str = "drr";
pub const PREFIX_FILE_ATTACHMENT: &str = "att";
pub const PREFIX_ACTIVITY: &str = "act";

/// All prefixes, for exhaustive ID tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_STANDARD,
    PREFIX_CONTROL,
    PREFIX_IMPLEMENTATION,
    PREFIX_AUDIT,
    PREFIX_AUDIT_ITEM,
    PREFIX_DATA_REQUEST,
    PREFIX_DATA_REQUEST_RESPONSE,
    PREFIX_FILE_ATTACHMENT,
    PREFIX_ACTIVITY,
];

/// Extract the prefix from an ID like `"aud-a3f8b2c1"`.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}
