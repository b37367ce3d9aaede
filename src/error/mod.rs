//! Error handling using `thiserror` and `anyhow`.
//!
//! Domain errors cover the preference file; operational helpers add context
//! and log failures that the binding layer deliberately swallows.

pub mod domain;
pub mod operational;

pub use {
    domain::StoreError,
    operational::{ErrorReporter, ResultExt},
};
