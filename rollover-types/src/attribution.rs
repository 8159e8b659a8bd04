//! Attribution types for spliced series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ContractSymbol;

/// A continuous span of timestamps [start..=end] that a contract contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start timestamp.
    pub start: DateTime<Utc>,
    /// Inclusive end timestamp.
    pub end: DateTime<Utc>,
}

/// Attribution of a continuous series: which contract supplied which timestamp spans.
///
/// Behavior:
/// - Built after de-duplication, so each emitted timestamp is credited to exactly one contract.
/// - A contract gets one span per contiguous run of bars it supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attribution {
    /// Series label the attribution refers to (root symbol or first contract).
    pub label: String,
    /// Collected spans annotated by contract.
    pub spans: Vec<(ContractSymbol, Span)>,
}

impl Attribution {
    /// Create a new attribution container for a series label.
    #[must_use]
    pub const fn new(label: String) -> Self {
        Self {
            label,
            spans: vec![],
        }
    }

    /// Record a contract span contribution.
    pub fn push(&mut self, item: (ContractSymbol, Span)) {
        self.spans.push(item);
    }

    /// Spans credited to `contract`.
    pub fn spans_for<'a>(&'a self, contract: &'a str) -> impl Iterator<Item = &'a Span> + 'a {
        self.spans
            .iter()
            .filter(move |(c, _)| c.as_str() == contract)
            .map(|(_, s)| s)
    }
}
