//! Problem definitions served by the upstream problem store.
//!
//! A [`Problem`] is deserialized once from JSON and stays immutable. Raw type
//! descriptors are turned into [`crate::generator::JavaType`] during
//! deserialization, so everything downstream matches on a closed enum instead
//! of comparing strings.

mod load;
mod types;

pub use load::*;
pub use types::*;
