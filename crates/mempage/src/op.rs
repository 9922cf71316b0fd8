//! Filter operations.
//!
//! The [`Operation`] enum names how a filter's values are matched against a
//! field's string form. Boolean and 64-bit integer fields ignore the
//! operation entirely; see [`FilterSpec`](crate::FilterSpec).

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Matching operation of a filter.
///
/// On the wire an operation is one of `"like"`, `"eq"`, `"ne"`, `"in"`,
/// `"not in"`, `"is null"` or `"not null"`. Any other string reads as
/// [`Operation::Like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Operation {
    /// Field contains any value as a substring. The fallback.
    #[default]
    Like,
    /// Field equals any value exactly.
    Eq,
    /// Field equals none of the values.
    Ne,
    /// Field contains any comma-separated sub-value as a substring.
    In,
    /// Field equals none of the comma-separated sub-values.
    NotIn,
    /// Field is empty. Decides the whole match on its own.
    IsNull,
    /// Field is not empty. Decides the whole match on its own.
    NotNull,
}

impl Operation {
    /// Parses a wire name, falling back to [`Operation::Like`].
    pub fn parse(name: &str) -> Operation {
        match name {
            "eq" => Operation::Eq,
            "ne" => Operation::Ne,
            "in" => Operation::In,
            "not in" => Operation::NotIn,
            "is null" => Operation::IsNull,
            "not null" => Operation::NotNull,
            _ => Operation::Like,
        }
    }

    /// Returns the wire name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Like => "like",
            Operation::Eq => "eq",
            Operation::Ne => "ne",
            Operation::In => "in",
            Operation::NotIn => "not in",
            Operation::IsNull => "is null",
            Operation::NotNull => "not null",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Operation::parse(s))
    }
}

impl From<String> for Operation {
    fn from(name: String) -> Self {
        Operation::parse(&name)
    }
}

impl From<Operation> for &'static str {
    fn from(op: Operation) -> Self {
        op.as_str()
    }
}
