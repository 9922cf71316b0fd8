//! Structured diagnostics collected while serving one request.
//!
//! Anomalies never change what a request returns: an unresolved key still
//! excludes the record (filtering) or ties the pair (sorting), and a
//! malformed filter value still fails to match. They are recorded here so
//! callers can surface them, and mirrored to `tracing` at debug level.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::error::ResolveError;

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Filter,
    Sort,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Filter => "filter",
            Stage::Sort => "sort",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single anomaly observed during a request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A filter or sort key did not resolve against a record.
    ///
    /// `index` is the record's position in the collection the stage
    /// received: the input for filtering, the survivors for sorting.
    #[error("{stage}: key '{key}' unresolved on record {index}: {source}")]
    Unresolved {
        stage: Stage,
        index: usize,
        key: String,
        source: ResolveError,
    },

    /// A filter value could not be parsed as the field's kind.
    #[error("filter: value '{value}' for key '{key}' is not a valid {expected}")]
    MalformedValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Ordered collection of [`Diagnostic`]s for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Records an unresolved key.
    pub fn unresolved(&mut self, stage: Stage, index: usize, key: &str, source: ResolveError) {
        debug!(%stage, index, key, reason = %source, "key did not resolve");
        self.entries.push(Diagnostic::Unresolved {
            stage,
            index,
            key: key.to_owned(),
            source,
        });
    }

    /// Records a filter value that failed to parse.
    pub fn malformed(&mut self, key: &str, value: &str, expected: &'static str) {
        debug!(key, value, expected, "malformed filter value");
        self.entries.push(Diagnostic::MalformedValue {
            key: key.to_owned(),
            value: value.to_owned(),
            expected,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
