use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Capability;

/// Unified error type for the rollover workspace.
///
/// Every failure aborts the current build; no partial series is ever returned. Variants
/// carry the root symbol, contract and timestamp where they are known so callers can log
/// a precise location.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RollError {
    /// The symbol matches neither the root-symbol nor the contract-symbol grammar.
    #[error("not supported instrument: {symbol}")]
    UnsupportedInstrument {
        /// The offending input as given by the caller.
        symbol: String,
    },

    /// An explicit contract list mixes more than one root symbol.
    #[error("multiple root symbols in contract list: {roots:?}")]
    AmbiguousChain {
        /// Distinct roots found in the list, in first-seen order.
        roots: Vec<String>,
    },

    /// The boundary-equality contract did not hold at a roll.
    #[error("continuity violation for {root} at {contract} ({at}): {detail}")]
    ContinuityViolation {
        /// Root symbol of the series under construction.
        root: String,
        /// Contract on the incoming side of the offending roll.
        contract: String,
        /// Anchor timestamp of the roll.
        at: DateTime<Utc>,
        /// Human-readable description of the mismatch.
        detail: String,
    },

    /// A bar store or chain directory call failed.
    #[error("{connector} failed for {root}/{}: {source}", .contract.as_deref().unwrap_or("-"))]
    UpstreamFetchFailure {
        /// Connector name that failed.
        connector: String,
        /// Root symbol of the series under construction.
        root: String,
        /// Contract being fetched, when the call was contract-scoped.
        contract: Option<String>,
        /// Lower bound of the fetch window, when the call was time-scoped.
        at: Option<DateTime<Utc>>,
        /// Error reported by the connector.
        source: Box<RollError>,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "contracts for IF".
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// No registered connector provides the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label (e.g. "chain-table").
        capability: String,
    },

    /// A connector-level failure, reported by connector implementations.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl RollError {
    /// Helper: build an `Unsupported` error for a capability.
    #[must_use]
    pub fn unsupported(cap: Capability) -> Self {
        Self::Unsupported {
            capability: cap.to_string(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `UnsupportedInstrument` error.
    pub fn unsupported_instrument(symbol: impl Into<String>) -> Self {
        Self::UnsupportedInstrument {
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `ContinuityViolation` error.
    pub fn continuity(
        root: impl Into<String>,
        contract: impl Into<String>,
        at: DateTime<Utc>,
        detail: impl Into<String>,
    ) -> Self {
        Self::ContinuityViolation {
            root: root.into(),
            contract: contract.into(),
            at,
            detail: detail.into(),
        }
    }

    /// Returns the innermost error, unwrapping any `UpstreamFetchFailure` layers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::UpstreamFetchFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
