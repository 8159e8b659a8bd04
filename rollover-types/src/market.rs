//! Contracts, bars and the continuous series built from them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Adjustment, Attribution, ContractSymbol, Direction, RootSymbol};

/// Bar cadence served by the bar store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// One bar per minute.
    Minute,
    /// One bar per trading day.
    #[default]
    Day,
}

/// Ordering of a bar sequence returned by the bar store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

/// Metadata of one expiring contract. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Bar store key of the contract.
    pub id: u64,
    /// Contract symbol, e.g. `IF1906`.
    pub symbol: ContractSymbol,
    /// Root symbol the contract belongs to.
    pub root: RootSymbol,
    /// Price multiplier applied to every emitted price.
    pub multiplier: Decimal,
    /// Minimum price increment.
    pub tick_size: Decimal,
    /// First listing date, when known.
    pub listed: Option<NaiveDate>,
    /// Last trading date.
    pub last_traded: NaiveDate,
}

/// One raw OHLCV bar of a single contract.
///
/// Missing prices model non-trading days that the store still reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp, unique within a contract.
    pub ts: DateTime<Utc>,
    /// Open price.
    pub open: Option<Decimal>,
    /// High price.
    pub high: Option<Decimal>,
    /// Low price.
    pub low: Option<Decimal>,
    /// Close price.
    pub close: Option<Decimal>,
    /// Traded volume.
    pub volume: u64,
    /// Open interest at the close of the bar.
    pub open_interest: u64,
}

impl Bar {
    /// Whether the bar carries a trade: positive volume and all four prices present.
    #[must_use]
    pub const fn is_tradeable(&self) -> bool {
        self.volume > 0
            && self.open.is_some()
            && self.high.is_some()
            && self.low.is_some()
            && self.close.is_some()
    }
}

/// Parameters of a bar store fetch. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRequest {
    /// Requested cadence.
    pub frequency: Frequency,
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub to: Option<DateTime<Utc>>,
    /// Requested ordering of the result.
    pub order: SortOrder,
}

impl BarRequest {
    /// Ascending request over `[from, to]`.
    #[must_use]
    pub const fn ascending(
        frequency: Frequency,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            frequency,
            from,
            to,
            order: SortOrder::Ascending,
        }
    }

    /// Whether `ts` falls inside the request window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from.is_none_or(|f| ts >= f) && self.to.is_none_or(|t| ts <= t)
    }
}

/// One row of a chain table: from `effective_from` on, `contract` is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Contract that becomes current.
    pub contract: ContractSymbol,
    /// Timestamp from which the contract is current.
    pub effective_from: DateTime<Utc>,
}

/// A bar of the continuous series: adjusted, multiplier-scaled, tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedBar {
    /// Bar timestamp.
    pub ts: DateTime<Utc>,
    /// Adjusted open.
    pub open: Decimal,
    /// Adjusted high.
    pub high: Decimal,
    /// Adjusted low.
    pub low: Decimal,
    /// Adjusted close.
    pub close: Decimal,
    /// Raw volume.
    pub volume: u64,
    /// Raw open interest.
    pub open_interest: u64,
    /// Contract that supplied the bar.
    pub contract: ContractSymbol,
}

/// A switch between two contracts, expressed in raw prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    /// Anchor timestamp shared by both contracts.
    pub at: DateTime<Utc>,
    /// Contract rolled out of.
    pub outgoing: ContractSymbol,
    /// Contract rolled into.
    pub incoming: ContractSymbol,
    /// Raw close of the outgoing contract at `at`.
    pub outgoing_close: Decimal,
    /// Raw close of the incoming contract at `at`.
    pub incoming_close: Decimal,
    /// `outgoing_close - incoming_close`.
    pub gap: Decimal,
}

/// The final output of a build call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousSeries {
    /// Root symbol of the series; `None` when built from an explicit contract list of
    /// two or more contracts. A one-element list is built as a single contract and
    /// keeps its root.
    pub root: Option<RootSymbol>,
    /// Cadence of the bars.
    pub frequency: Frequency,
    /// Adjustment composition that was applied.
    pub adjustment: Adjustment,
    /// Adjustment direction that was applied.
    pub direction: Direction,
    /// Bars in strictly increasing timestamp order.
    pub bars: Vec<AdjustedBar>,
    /// Rolls in chronological order.
    pub rolls: Vec<RollRecord>,
    /// Which contract supplied which span of the series.
    pub attribution: Attribution,
}

impl ContinuousSeries {
    /// Whether the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
