//! Rollover builds continuous futures price series from chains of expiring contracts.
//!
//! Overview
//! - Resolves a root symbol, a single contract or an explicit contract list into an
//!   ordered contract chain, from a curated chain table or by discovery.
//! - Detects where the series switches contracts: at chain table dates, or where a
//!   calendar gate opens and liquidity has moved to the next contract.
//! - Removes the price gap at every roll by additive or multiplicative adjustment,
//!   backward or forward, then splices everything into one ascending series.
//!
//! Key behaviors and trade-offs
//! - Adjustment:
//!   - `Additive`: preserves point moves; far history can turn negative.
//!   - `Multiplicative`: preserves returns; point moves are rescaled.
//!   - `None`: raw prices; every roll leaves its gap in the series.
//! - Direction: `Backward` keeps the newest prices tradeable as quoted and rewrites
//!   history, so past values change as new rolls happen. `Forward` keeps the oldest
//!   prices fixed instead.
//! - Boundary bar: the roll timestamp carries both contracts. `Incoming` (default)
//!   emits the new contract's bar; `Outgoing` emits the bar the roll was decided on.
//! - Non-trading bars (zero volume or missing prices) still take part in roll
//!   decisions but never appear in the output.
//!
//! Examples
//! Building an engine and a backward-adjusted series from a chain table:
//! ```rust,ignore
//! use std::sync::Arc;
//! use rollover::{BuildRequest, Frequency, Instrument, Rollover};
//! use rollover_mock::MockConnector;
//!
//! let engine = Rollover::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//! let series = engine
//!     .build(
//!         BuildRequest::new(Instrument::root("IF"), Frequency::Day)
//!             .chain_version(rollover::DEFAULT_CHAIN_VERSION),
//!     )
//!     .await?;
//! for roll in &series.rolls {
//!     println!("{} -> {} at {} (gap {})", roll.outgoing, roll.incoming, roll.at, roll.gap);
//! }
//! ```
//!
//! Inspecting chain membership without fetching bars:
//! ```rust,ignore
//! let chain = engine
//!     .resolve(&BuildRequest::new(Instrument::root("IF"), Frequency::Day).included([6, 12]))
//!     .await?;
//! assert_eq!(chain.symbols(), ["IF1906", "IF1912"]);
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod engine;

pub use core::{Rollover, RolloverBuilder};

// Re-export core types for convenience
pub use rollover_core::{
    AdjustedBar, Adjustment, Attribution, Bar, BarRequest, BoundaryBar, BuildRequest,
    CalendarGate, Capability, ChainEntry, ChainKind, ChainLink, ContinuousSeries, Contract,
    ContractSymbol, DEFAULT_CHAIN_VERSION, DEFAULT_GRACE_DAYS, DataConnector, Decimal,
    Direction, Frequency, Instrument, LiquidityComparison, LiquidityRule, LiquiditySignal,
    ResolvedChain, RollError, RollRecord, RolloverConfig, RootSymbol, SortOrder, Span,
};
