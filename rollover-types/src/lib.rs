//! Data transfer objects, configuration primitives and the error taxonomy shared by the
//! rollover crates.
#![warn(missing_docs)]

mod attribution;
mod capability;
mod config;
mod error;
mod market;
mod request;
mod symbol;

pub use attribution::{Attribution, Span};
pub use capability::Capability;
pub use config::{
    Adjustment, BoundaryBar, CalendarGate, DEFAULT_GRACE_DAYS, Direction, LiquidityComparison,
    LiquidityRule, LiquiditySignal, RolloverConfig,
};
pub use error::RollError;
pub use market::{
    AdjustedBar, Bar, BarRequest, ChainEntry, ContinuousSeries, Contract, Frequency, RollRecord,
    SortOrder,
};
pub use request::{
    BuildRequest, ChainKind, ChainLink, DEFAULT_CHAIN_VERSION, Instrument, ResolvedChain,
};
pub use symbol::{ContractSymbol, RootSymbol};

/// Re-export of the decimal type used for every price field.
pub use rust_decimal::Decimal;
