//! Operational error context propagation with `anyhow`.
//!
//! Store writes are fire-and-forget from the point of view of a setting, so
//! failures end up here to be logged instead of returned.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::warn,
};

/// Extension trait for enhanced error context.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized reporting for errors that are logged rather than propagated.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports a dropped preference write.
    ///
    /// The in-memory value has already changed; only durability was lost.
    pub fn dropped_write(error: &Error, key: &str) {
        warn!(key = key, error = %Self::describe(error), "Preference write dropped");
    }

    /// Formats an error with its whole cause chain on one line.
    #[must_use]
    pub fn describe(error: &Error) -> String {
        format!("{error:#}")
    }
}
