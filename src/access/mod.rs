//! Access gating for the campaign wizard
//!
//! Every conversation starts locked behind a serial access code. The gate
//! holds the configured allow-list and answers membership checks; codes are
//! compared exactly, with no trimming or case folding.

use std::collections::HashSet;
use tracing::debug;

/// Allow-list of serial access codes
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    codes: HashSet<String>,
}

impl AccessGate {
    /// Create a gate from the configured code list
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: HashSet<String> = codes.into_iter().map(Into::into).collect();
        debug!(count = codes.len(), "Access gate initialized");
        Self { codes }
    }

    /// Check a submitted code against the allow-list
    pub fn validate(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Number of configured codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no codes are configured; such a gate admits nobody
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
