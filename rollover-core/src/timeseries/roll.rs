use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rollover_types::{
    Bar, CalendarGate, Contract, LiquidityComparison, LiquidityRule, LiquiditySignal,
};

/// Where a series switches from one contract to the next.
///
/// `at` is a timestamp at which both contracts have a bar with a close; those closes
/// define the roll's delta and ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollPoint {
    /// Anchor timestamp shared by both contracts.
    pub at: DateTime<Utc>,
    /// Raw close of the outgoing contract at `at`.
    pub outgoing_close: Decimal,
    /// Raw close of the incoming contract at `at`.
    pub incoming_close: Decimal,
}

impl RollPoint {
    /// Build a roll point from the two bars sharing the anchor timestamp.
    ///
    /// Returns `None` if the timestamps differ or either close is missing.
    #[must_use]
    pub fn from_bars(outgoing: &Bar, incoming: &Bar) -> Option<Self> {
        if outgoing.ts != incoming.ts {
            return None;
        }
        Some(Self {
            at: outgoing.ts,
            outgoing_close: outgoing.close?,
            incoming_close: incoming.close?,
        })
    }
}

/// The bars one contract contributes between two rolls.
///
/// A segment after a roll starts with its bar at the previous roll's anchor; a segment
/// with an `exit` ends with its bar at that roll's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Contract supplying the bars.
    pub contract: Contract,
    /// Raw bars, ascending.
    pub bars: Vec<Bar>,
    /// Roll into the next segment; `None` for the last segment.
    pub exit: Option<RollPoint>,
}

/// Outcome of evaluating one bar of the active contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDecision {
    /// Stay on the current contract.
    Continue,
    /// Switch to the next contract at the contained anchor.
    Roll(RollPoint),
}

/// Whether `gate` allows a roll on a bar at `ts` for a contract last traded on `last_traded`.
#[must_use]
pub fn calendar_gate_open(gate: CalendarGate, ts: DateTime<Utc>, last_traded: NaiveDate) -> bool {
    let day = ts.date_naive();
    match gate {
        CalendarGate::DaysBeforeExpiry(n) => last_traded
            .checked_sub_days(Days::new(u64::from(n)))
            .is_none_or(|open| day >= open),
        CalendarGate::SameIsoWeek => day.iso_week() == last_traded.iso_week(),
    }
}

/// Whether liquidity has moved from `outgoing` to `incoming` under `rule`.
#[must_use]
pub fn liquidity_shifted(rule: LiquidityRule, outgoing: &Bar, incoming: &Bar) -> bool {
    let shifted = |out: u64, inc: u64| match rule.comparison {
        LiquidityComparison::AtLeast => inc >= out,
        LiquidityComparison::Exceeds => inc > out,
    };
    let volume = shifted(outgoing.volume, incoming.volume);
    let open_interest = shifted(outgoing.open_interest, incoming.open_interest);
    match rule.signal {
        LiquiditySignal::Volume => volume,
        LiquiditySignal::OpenInterest => open_interest,
        LiquiditySignal::VolumeOrOpenInterest => volume || open_interest,
        LiquiditySignal::VolumeAndOpenInterest => volume && open_interest,
    }
}

/// Heuristic roll rule: calendar gate plus liquidity gate.
///
/// Evaluated after the current bar is taken, and only against the next contract's bar
/// at the same timestamp, so a decision never looks past the bar it is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollDetector {
    gate: CalendarGate,
    liquidity: LiquidityRule,
}

impl RollDetector {
    /// Create a detector from its two gates.
    #[must_use]
    pub const fn new(gate: CalendarGate, liquidity: LiquidityRule) -> Self {
        Self { gate, liquidity }
    }

    /// Whether the calendar gate is open for `bar` of `outgoing`.
    #[must_use]
    pub fn gate_open(&self, outgoing: &Contract, bar: &Bar) -> bool {
        calendar_gate_open(self.gate, bar.ts, outgoing.last_traded)
    }

    /// Decide whether to roll on `bar` of `outgoing`.
    ///
    /// `incoming` is the next contract's bar at `bar.ts`, if it has one. Without it the
    /// liquidity gate cannot fire and evaluation retries on later bars. A roll also
    /// needs both closes so the anchor is priced.
    #[must_use]
    pub fn decide(&self, outgoing: &Contract, bar: &Bar, incoming: Option<&Bar>) -> RollDecision {
        if !self.gate_open(outgoing, bar) {
            return RollDecision::Continue;
        }
        let Some(next) = incoming else {
            return RollDecision::Continue;
        };
        if !liquidity_shifted(self.liquidity, bar, next) {
            return RollDecision::Continue;
        }
        RollPoint::from_bars(bar, next).map_or(RollDecision::Continue, RollDecision::Roll)
    }
}
