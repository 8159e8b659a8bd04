//! Re-export of foundational types from `rollover-types`.
// Consolidated re-exports so downstream crates can depend on `rollover-core` only

pub use rollover_types::{Capability, RollError};

pub use rollover_types::{
    Adjustment, BoundaryBar, CalendarGate, DEFAULT_GRACE_DAYS, Direction, LiquidityComparison,
    LiquidityRule, LiquiditySignal, RolloverConfig,
};

pub use rollover_types::{
    AdjustedBar, Attribution, Bar, BarRequest, ChainEntry, ContinuousSeries, Contract,
    ContractSymbol, Decimal, Frequency, RollRecord, RootSymbol, SortOrder, Span,
};

pub use rollover_types::{
    BuildRequest, ChainKind, ChainLink, DEFAULT_CHAIN_VERSION, Instrument, ResolvedChain,
};
