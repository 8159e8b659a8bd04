//! Build requests and resolved chains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Adjustment, CalendarGate, Contract, Direction, Frequency, RollError, RootSymbol};

/// Chain table version used when a caller asks for "the" curated chain.
pub const DEFAULT_CHAIN_VERSION: u32 = 1;

/// What to build a continuous series for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// A root symbol (`IF`) or a single literal contract symbol (`IF1906`).
    Root(String),
    /// An explicit list of contracts sharing one root.
    Contracts(Vec<String>),
}

impl Instrument {
    /// Instrument for a root or single contract symbol.
    pub fn root(symbol: impl Into<String>) -> Self {
        Self::Root(symbol.into())
    }

    /// Instrument for an explicit contract list.
    pub fn contracts<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Contracts(symbols.into_iter().map(Into::into).collect())
    }

    /// Label used in logs and attribution.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Root(s) => s.clone(),
            Self::Contracts(list) => list.join(","),
        }
    }
}

/// Parameters of one `build` call.
///
/// `adjustment`, `direction` and `grace` override the engine configuration for this
/// call only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Instrument to build.
    pub instrument: Instrument,
    /// Bar cadence.
    pub frequency: Frequency,
    /// Inclusive window start.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive window end.
    pub to: Option<DateTime<Utc>>,
    /// Expiry months (1..=12) to keep during discovery.
    pub included: Option<Vec<u8>>,
    /// Curated chain table version; `None` discovers contracts instead.
    pub chain_version: Option<u32>,
    /// Adjustment composition override.
    pub adjustment: Option<Adjustment>,
    /// Adjustment direction override.
    pub direction: Option<Direction>,
    /// Calendar gate override.
    pub grace: Option<CalendarGate>,
}

impl BuildRequest {
    /// A request over the whole available history with engine defaults.
    #[must_use]
    pub const fn new(instrument: Instrument, frequency: Frequency) -> Self {
        Self {
            instrument,
            frequency,
            from: None,
            to: None,
            included: None,
            chain_version: None,
            adjustment: None,
            direction: None,
            grace: None,
        }
    }

    /// Restrict the request to `[from, to]`.
    #[must_use]
    pub const fn window(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Keep only contracts expiring in the given months.
    #[must_use]
    pub fn included(mut self, months: impl IntoIterator<Item = u8>) -> Self {
        self.included = Some(months.into_iter().collect());
        self
    }

    /// Use the curated chain table of the given version.
    #[must_use]
    pub const fn chain_version(mut self, version: u32) -> Self {
        self.chain_version = Some(version);
        self
    }

    /// Override the adjustment composition.
    #[must_use]
    pub const fn adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = Some(adjustment);
        self
    }

    /// Override the adjustment direction.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Override the calendar gate.
    #[must_use]
    pub const fn grace(mut self, gate: CalendarGate) -> Self {
        self.grace = Some(gate);
        self
    }

    /// Check the request for argument errors.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `from > to`, a month code is outside `1..=12`, or the
    /// contract list is empty.
    pub fn validate(&self) -> Result<(), RollError> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(RollError::InvalidArg(format!(
                "window start {from} is after end {to}"
            )));
        }
        if let Some(months) = &self.included
            && let Some(bad) = months.iter().find(|m| !(1..=12).contains(*m))
        {
            return Err(RollError::InvalidArg(format!("bad month code: {bad}")));
        }
        if matches!(&self.instrument, Instrument::Contracts(list) if list.is_empty()) {
            return Err(RollError::InvalidArg("empty contract list".into()));
        }
        Ok(())
    }
}

/// How a chain was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// A single literal contract; no rolls.
    SingleContract,
    /// A curated chain table of the given version.
    Explicit {
        /// Chain table version.
        version: u32,
    },
    /// Contracts discovered from the bar store by root.
    Discovered,
    /// An explicit contract list supplied by the caller.
    ContractList,
}

/// One resolved chain member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Contract metadata.
    pub contract: Contract,
    /// Chain table effective timestamp; only set for explicit chains.
    pub effective_from: Option<DateTime<Utc>>,
}

/// Ordered chain produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChain {
    /// Root symbol shared by every member.
    pub root: RootSymbol,
    /// Resolution strategy that produced the chain.
    pub kind: ChainKind,
    /// Members in roll order.
    pub links: Vec<ChainLink>,
}

impl ResolvedChain {
    /// Contract symbols in roll order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.contract.symbol.as_str()).collect()
    }
}
