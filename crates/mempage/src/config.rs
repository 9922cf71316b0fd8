//! Engine configuration.
//!
//! The only setting is the default page size, substituted when a request
//! asks for a page size of exactly zero. It lives in a [`PageConfig`] value
//! owned by each [`Pager`](crate::Pager) rather than in global state.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Page size used when a request asks for zero.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Environment variable read by [`PageConfig::from_env`].
pub const PAGE_SIZE_VAR: &str = "MEMPAGE_DEFAULT_PAGE_SIZE";

/// Configuration for a [`Pager`](crate::Pager).
///
/// # Example
///
/// ```
/// use mempage::PageConfig;
///
/// let config = PageConfig::default().with_default_page_size(25);
/// assert_eq!(config.effective_page_size(0), 25);
/// assert_eq!(config.effective_page_size(5), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Page size substituted for a requested size of zero.
    pub default_page_size: i64,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        PageConfig::default()
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: i64) -> Self {
        self.default_page_size = size;
        self
    }

    /// Page size to use for a requested size: the default when zero,
    /// otherwise the request unchanged.
    pub fn effective_page_size(&self, requested: i64) -> i64 {
        if requested == 0 {
            self.default_page_size
        } else {
            requested
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads [`PAGE_SIZE_VAR`]; when unset the default is kept.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through a variable lookup function.
    ///
    /// The value must be an integer of at least 1.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = lookup(PAGE_SIZE_VAR) else {
            return Ok(PageConfig::default());
        };

        let size = raw
            .trim()
            .parse::<i64>()
            .map_err(|source| ConfigError::InvalidPageSize {
                variable: PAGE_SIZE_VAR,
                value: raw.clone(),
                source,
            })?;

        if size < 1 {
            return Err(ConfigError::NonPositivePageSize {
                variable: PAGE_SIZE_VAR,
                value: size,
            });
        }

        Ok(PageConfig::default().with_default_page_size(size))
    }
}
