//! Tracing utilities for query rendering observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the rendered query and its stage count.
///
/// ```ignore
/// esql_trace_query!(&query, stages);
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! esql_trace_query {
    ($query:expr, $stages:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(query = %$query, stages = $stages, "esql.render");
    };
}

/// Emit a warn-level tracing event when a builder operation rejects its input.
///
/// ```ignore
/// esql_trace_error!(Command::Sort, &err);
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! esql_trace_error {
    ($command:expr, $err:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(command = %$command, error = %$err, "esql.rejected");
    };
}
