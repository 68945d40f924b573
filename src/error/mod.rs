//! Error and issue types.
//!
//! Validation issues are data, surfaced through results. The only error this
//! crate raises on its own is [`AsyncSchemaError`], a usage error.

mod async_schema;
mod issue;

pub use async_schema::AsyncSchemaError;
pub use issue::{Issue, Issues};
