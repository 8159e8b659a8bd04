//! The `build` pipeline: resolve the chain, cut it into segments, adjust, splice.
//!
//! Bar fetches run strictly in chain order because each contract's fetch window starts
//! at the previous roll. Contract metadata lookups are independent and run
//! concurrently.

mod chain;
mod explicit;
mod heuristic;

use rollover_core::connector::BarStore;
use rollover_core::timeseries::util::sorted_unique;
use rollover_core::{
    Bar, BarRequest, BuildRequest, ChainKind, ContinuousSeries, Contract, RollDetector, RollError,
    ResolvedChain, segment_terms, splice,
};

use crate::Rollover;
use crate::core::tag_err;

impl Rollover {
    /// Build one continuous series for `req`.
    ///
    /// Behavior:
    /// - A root symbol with `chain_version` follows the curated chain table; an empty or
    ///   unknown table falls back to discovery. A root without a version is discovered
    ///   from the bar store. Rolls of a discovered chain are detected from the bars.
    /// - `adjustment`, `direction` and `grace` in the request override the configuration
    ///   for this call only.
    /// - Any connector failure aborts the build; no partial series is returned.
    ///
    /// # Errors
    /// - `InvalidArg` for a malformed request.
    /// - `UnsupportedInstrument` or `AmbiguousChain` for bad symbols.
    /// - `NotFound` when discovery finds no contract.
    /// - `Unsupported` when no registered connector serves a needed role.
    /// - `UpstreamFetchFailure` wrapping any connector error.
    /// - `ContinuityViolation` when a roll cannot be anchored or adjusted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollover::engine::build",
            skip(self, req),
            fields(instrument = %req.instrument.label(), frequency = ?req.frequency),
        )
    )]
    pub async fn build(&self, req: BuildRequest) -> Result<ContinuousSeries, RollError> {
        let chain = self.resolve(&req).await?;

        let adjustment = req.adjustment.unwrap_or(self.cfg.adjustment);
        let direction = req.direction.unwrap_or(self.cfg.direction);
        let gate = req.grace.unwrap_or(self.cfg.calendar_gate);

        let segments = match chain.kind {
            ChainKind::Explicit { .. } => explicit::segments(self, &chain, &req).await?,
            ChainKind::SingleContract | ChainKind::Discovered | ChainKind::ContractList => {
                let detector = RollDetector::new(gate, self.cfg.liquidity);
                heuristic::segments(self, &chain, &req, detector).await?
            }
        };

        let root = chain.root.as_str();
        let terms = segment_terms(root, &segments, adjustment, direction)?;
        let spliced = splice(
            root,
            &segments,
            &terms,
            adjustment,
            self.cfg.boundary_bar,
            self.cfg.continuity_tolerance,
        )?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            root = root,
            segments = segments.len(),
            rolls = spliced.rolls.len(),
            bars = spliced.bars.len(),
            adjustment = ?adjustment,
            direction = ?direction,
            "built continuous series"
        );

        let tagged_root = match chain.kind {
            ChainKind::ContractList => None,
            _ => Some(chain.root),
        };
        Ok(ContinuousSeries {
            root: tagged_root,
            frequency: req.frequency,
            adjustment,
            direction,
            bars: spliced.bars,
            rolls: spliced.rolls,
            attribution: spliced.attribution,
        })
    }

    /// Resolve the ordered contract chain `build` would splice, without fetching bars.
    ///
    /// # Errors
    /// Same as [`Rollover::build`], minus the errors raised while rolling.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollover::engine::resolve",
            skip(self, req),
            fields(instrument = %req.instrument.label(), chain_version = ?req.chain_version),
        )
    )]
    pub async fn resolve(&self, req: &BuildRequest) -> Result<ResolvedChain, RollError> {
        req.validate()?;
        chain::resolve(self, req).await
    }
}

/// Fetch the ascending, de-duplicated bars of `contract` inside `req`'s window.
pub(crate) async fn fetch_bars(
    connector: &'static str,
    store: &dyn BarStore,
    root: &str,
    contract: &Contract,
    req: BarRequest,
) -> Result<Vec<Bar>, RollError> {
    let mut bars = store
        .bars(contract.id, req)
        .await
        .map_err(|e| tag_err(connector, root, Some(contract.symbol.as_str()), req.from, e))?;
    bars.retain(|b| req.contains(b.ts));
    Ok(sorted_unique(bars, req.order))
}
