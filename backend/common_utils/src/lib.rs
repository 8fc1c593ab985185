//! Common utilities for the shurjoPay gateway crates

pub mod consts;
pub mod custom_serde;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;

// Re-export commonly used items
pub use errors::{CustomResult, ParsingError};
pub use hyperswitch_masking::{Maskable, Secret};
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::StringMajorUnit;

/// Generate a time-ordered (time-sortable) unique identifier, appended directly to `prefix`
#[inline]
pub fn generate_time_ordered_id(prefix: &str) -> String {
    format!("{prefix}{}", uuid::Uuid::now_v7().as_simple())
}
