use std::sync::Arc;

use chrono::{DateTime, Utc};
use rollover_core::connector::{BarStore, ChainDirectory, DataConnector};
use rollover_core::{
    Adjustment, BoundaryBar, CalendarGate, Capability, Decimal, Direction, LiquidityRule,
    RollError, RolloverConfig,
};

/// Orchestrator that builds continuous series from registered connectors.
pub struct Rollover {
    pub(crate) connectors: Vec<Arc<dyn DataConnector>>,
    pub(crate) cfg: RolloverConfig,
}

/// Builder for constructing a `Rollover` orchestrator with custom configuration.
pub struct RolloverBuilder {
    connectors: Vec<Arc<dyn DataConnector>>,
    cfg: RolloverConfig,
}

impl Default for RolloverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloverBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via [`Self::with_connector`].
    /// - Defaults: backward additive adjustment, a five-day calendar gate, rolls when the
    ///   next contract's volume or open interest catches up, incoming bar wins at the
    ///   shared roll timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: RolloverConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Behavior and trade-offs:
    /// - The first registered connector advertising a role serves every call for that
    ///   role; later ones are ignored for it.
    /// - A connector may serve both roles. Bars and chain tables can also come from
    ///   different connectors.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn DataConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration, e.g. one deserialized from a file.
    #[must_use]
    pub fn config(mut self, cfg: RolloverConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select how roll gaps are removed.
    ///
    /// - `Additive` keeps point differences intact, `Multiplicative` keeps returns.
    /// - `None` splices raw prices and leaves every gap in the series.
    #[must_use]
    pub const fn adjustment(mut self, adjustment: Adjustment) -> Self {
        self.cfg.adjustment = adjustment;
        self
    }

    /// Select which end of the series keeps raw prices.
    ///
    /// `Backward` leaves the newest contract untouched and moves history onto it;
    /// `Forward` leaves the oldest untouched.
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.cfg.direction = direction;
        self
    }

    /// Set the calendar gate of the heuristic roll rule.
    #[must_use]
    pub const fn calendar_gate(mut self, gate: CalendarGate) -> Self {
        self.cfg.calendar_gate = gate;
        self
    }

    /// Shorthand for `calendar_gate(CalendarGate::DaysBeforeExpiry(days))`.
    #[must_use]
    pub const fn grace_days(self, days: u32) -> Self {
        self.calendar_gate(CalendarGate::DaysBeforeExpiry(days))
    }

    /// Set the liquidity gate of the heuristic roll rule.
    #[must_use]
    pub const fn liquidity_rule(mut self, rule: LiquidityRule) -> Self {
        self.cfg.liquidity = rule;
        self
    }

    /// Choose which contract supplies the bar at a roll's shared timestamp.
    ///
    /// `Outgoing` keeps the bar the roll decision was made on, so a backtest never
    /// trades the incoming contract on the bar that triggered the switch.
    #[must_use]
    pub const fn boundary_bar(mut self, boundary: BoundaryBar) -> Self {
        self.cfg.boundary_bar = boundary;
        self
    }

    /// Relative tolerance of the multiplicative continuity check.
    #[must_use]
    pub const fn continuity_tolerance(mut self, tolerance: Decimal) -> Self {
        self.cfg.continuity_tolerance = tolerance;
        self
    }

    /// Build the `Rollover` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`Self::with_connector`] or the continuity tolerance is negative.
    pub fn build(self) -> Result<Rollover, RollError> {
        if self.connectors.is_empty() {
            return Err(RollError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.continuity_tolerance.is_sign_negative() {
            return Err(RollError::InvalidArg(format!(
                "negative continuity tolerance: {}",
                self.cfg.continuity_tolerance
            )));
        }

        Ok(Rollover {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Wrap a connector failure with the context of the call that produced it.
///
/// Errors that already carry upstream context pass through unchanged.
pub(crate) fn tag_err(
    connector: &str,
    root: &str,
    contract: Option<&str>,
    at: Option<DateTime<Utc>>,
    e: RollError,
) -> RollError {
    match e {
        e @ RollError::UpstreamFetchFailure { .. } => e,
        other => RollError::UpstreamFetchFailure {
            connector: connector.to_string(),
            root: root.to_string(),
            contract: contract.map(str::to_string),
            at,
            source: Box::new(other),
        },
    }
}

impl Rollover {
    /// Start building a new `Rollover` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use rollover::{Adjustment, Rollover};
    /// use rollover_mock::MockConnector;
    ///
    /// let engine = Rollover::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .adjustment(Adjustment::Multiplicative)
    ///     .grace_days(3)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RolloverBuilder {
        RolloverBuilder::new()
    }

    /// The configuration every build falls back to.
    #[must_use]
    pub const fn config(&self) -> &RolloverConfig {
        &self.cfg
    }

    pub(crate) fn bar_store(&self) -> Result<(&'static str, &dyn BarStore), RollError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_bar_store().map(|s| (c.name(), s)))
            .ok_or_else(|| RollError::unsupported(Capability::Bars))
    }

    pub(crate) fn chain_directory(
        &self,
    ) -> Result<(&'static str, &dyn ChainDirectory), RollError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_chain_directory().map(|d| (c.name(), d)))
            .ok_or_else(|| RollError::unsupported(Capability::ChainTable))
    }
}
