//! Error types for the mempage crate.
//!
//! None of these abort a request. Resolution failures and malformed filter
//! values are folded into [`Diagnostics`](crate::Diagnostics); only
//! configuration loading returns an error to the caller.

use std::num::ParseIntError;

use serde::Serialize;
use thiserror::Error;

/// Why a dotted key did not resolve against a record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum ResolveError {
    /// No field of the record carries this serialized name.
    #[error("{record} has no field named '{tag}'")]
    UnknownTag { tag: String, record: &'static str },

    /// The field was found but its value could not be read, typically
    /// because an empty pointer sits on the way to it.
    #[error("field '{field}' of {record} could not be read")]
    UnreadableField { field: String, record: &'static str },

    /// The path descends into a value that is not a record.
    #[error("'{segment}' holds a {found} value, not a record")]
    NotARecord { segment: String, found: &'static str },
}

/// Errors that can occur when loading a [`PageConfig`](crate::PageConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The page size is not an integer.
    #[error("invalid {variable} '{value}': {source}")]
    InvalidPageSize {
        variable: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The page size is zero or negative.
    #[error("{variable} must be at least 1, got {value}")]
    NonPositivePageSize { variable: &'static str, value: i64 },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
