//! Configuration types for the roll, adjustment and splice stages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default calendar distance, in days, before `last_traded` at which a roll may occur.
pub const DEFAULT_GRACE_DAYS: u32 = 5;

/// How continuity is restored at a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Raw concatenation; every roll keeps its price gap.
    None,
    /// Shift prices by the accumulated price difference.
    #[default]
    #[serde(rename = "add")]
    Additive,
    /// Scale prices by the accumulated price ratio.
    #[serde(rename = "mul")]
    Multiplicative,
}

/// Which side of a roll absorbs the adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// History is revised; the most recent contract keeps its raw level.
    #[default]
    Backward,
    /// Later segments inherit the offset; the oldest contract keeps its raw level.
    Forward,
}

/// Calendar condition that must hold before a heuristic roll may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarGate {
    /// Open once the bar date is at or after `last_traded - n` calendar days.
    DaysBeforeExpiry(u32),
    /// Open when the bar falls in the same ISO week as `last_traded`.
    SameIsoWeek,
}

impl Default for CalendarGate {
    fn default() -> Self {
        Self::DaysBeforeExpiry(DEFAULT_GRACE_DAYS)
    }
}

/// Liquidity measure compared between the outgoing and incoming contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquiditySignal {
    /// Traded volume only.
    Volume,
    /// Open interest only.
    OpenInterest,
    /// Either volume or open interest has shifted.
    #[default]
    VolumeOrOpenInterest,
    /// Both volume and open interest have shifted.
    VolumeAndOpenInterest,
}

/// Comparison operator applied as `incoming <op> outgoing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityComparison {
    /// Incoming measure is greater than or equal to the outgoing one.
    #[default]
    AtLeast,
    /// Incoming measure is strictly greater than the outgoing one.
    Exceeds,
}

/// Liquidity gate of the heuristic roll rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiquidityRule {
    /// Which measure to compare.
    pub signal: LiquiditySignal,
    /// How to compare it.
    pub comparison: LiquidityComparison,
}

/// Which contract supplies the bar at a roll's shared timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryBar {
    /// The incoming contract's bar wins.
    #[default]
    Incoming,
    /// The outgoing contract's bar wins; the series switches on the bar after the roll.
    Outgoing,
}

/// Global configuration for the `Rollover` engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloverConfig {
    /// Adjustment composition used when a request does not override it.
    pub adjustment: Adjustment,
    /// Adjustment direction used when a request does not override it.
    pub direction: Direction,
    /// Calendar gate used by heuristic rolls when a request does not override it.
    pub calendar_gate: CalendarGate,
    /// Liquidity gate used by heuristic rolls.
    pub liquidity: LiquidityRule,
    /// Precedence at a roll's shared timestamp.
    pub boundary_bar: BoundaryBar,
    /// Relative tolerance for the multiplicative continuity check.
    ///
    /// Additive continuity is always checked exactly.
    pub continuity_tolerance: Decimal,
}

impl Default for RolloverConfig {
    fn default() -> Self {
        Self {
            adjustment: Adjustment::default(),
            direction: Direction::default(),
            calendar_gate: CalendarGate::default(),
            liquidity: LiquidityRule::default(),
            boundary_bar: BoundaryBar::default(),
            continuity_tolerance: Decimal::new(1, 12),
        }
    }
}
