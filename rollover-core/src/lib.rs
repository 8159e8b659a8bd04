//! rollover-core
//!
//! Core types, traits, and algorithms shared across the rollover crates.
//!
//! - `types`: data model, configuration and errors re-exported from `rollover-types`.
//! - `connector`: the `DataConnector` trait and the bar store / chain directory roles.
//! - `timeseries`: chain trimming and filtering, roll detection, price adjustment and
//!   splicing into one continuous series.
//!
//! Everything under `timeseries` is synchronous and pure: it works on bars already
//! fetched by the caller and never touches a connector.
#![warn(missing_docs)]

/// Connector role traits and the primary `DataConnector` interface.
pub mod connector;
/// Algorithms for resolving, rolling, adjusting and splicing contract series.
pub mod timeseries;
pub mod types;

pub use connector::{BarStore, ChainDirectory, DataConnector};
pub use timeseries::adjust::{AdjustmentTerm, segment_terms};
pub use timeseries::chain::{
    ParsedInstrument, filter_discovered, parse_instrument, single_root, trim_chain,
};
pub use timeseries::roll::{RollDecision, RollDetector, RollPoint, Segment};
pub use timeseries::splice::{Spliced, splice};
pub use types::*;
