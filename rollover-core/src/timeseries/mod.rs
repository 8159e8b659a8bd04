//! Continuous-series algorithms, leaves first.
//!
//! Modules include:
//! - `chain`: parse instruments, trim chain tables and filter discovered contracts
//! - `roll`: calendar and liquidity gates, roll points and per-contract segments
//! - `adjust`: compose per-roll deltas or ratios into per-segment adjustment terms
//! - `splice`: apply terms and multipliers, de-duplicate boundaries, attribute spans
//! - `util`: bar lookup helpers shared by the stages above
/// Adjustment composition across rolls.
pub mod adjust;
/// Chain resolution helpers that need no connector.
pub mod chain;
/// Roll gates and segment types.
pub mod roll;
/// Splicing segments into one ordered series.
pub mod splice;
/// Shared bar helpers.
pub mod util;
