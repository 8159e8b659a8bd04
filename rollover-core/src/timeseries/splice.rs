use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::RollError;
use crate::timeseries::adjust::AdjustmentTerm;
use crate::timeseries::roll::Segment;
use rollover_types::{AdjustedBar, Adjustment, Attribution, BoundaryBar, RollRecord, Span};

/// Output of [`splice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    /// Adjusted bars with strictly increasing timestamps.
    pub bars: Vec<AdjustedBar>,
    /// One record per roll, in chain order.
    pub rolls: Vec<RollRecord>,
    /// Contract spans of `bars`.
    pub attribution: Attribution,
}

/// Splice adjusted segments into one ordered series.
///
/// - Continuity is verified for every roll before any bar is emitted: the outgoing
///   anchor close under its segment's term must equal the incoming anchor close under
///   the next segment's term, exactly for additive terms and within `tolerance`
///   (relative) for multiplicative ones.
/// - Each price is transformed by its segment's term and then scaled once by the
///   owning contract's multiplier.
/// - Bars without a trade are dropped.
/// - On a shared timestamp, `boundary` decides which contract's bar is kept.
///
/// # Errors
/// `ContinuityViolation` when a roll fails the continuity check, `InvalidArg` when
/// `terms` does not have one entry per segment.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollover_core::splice",
        skip(segments, terms, tolerance),
        fields(segments = segments.len()),
    )
)]
pub fn splice(
    label: &str,
    segments: &[Segment],
    terms: &[AdjustmentTerm],
    adjustment: Adjustment,
    boundary: BoundaryBar,
    tolerance: Decimal,
) -> Result<Spliced, RollError> {
    if terms.len() != segments.len() {
        return Err(RollError::InvalidArg(format!(
            "{} adjustment terms for {} segments",
            terms.len(),
            segments.len()
        )));
    }
    if !matches!(adjustment, Adjustment::None) {
        check_continuity(label, segments, terms, tolerance)?;
    }

    let mut map: BTreeMap<DateTime<Utc>, AdjustedBar> = BTreeMap::new();
    let mut emit = |seg: &Segment, term: AdjustmentTerm| {
        let mul = seg.contract.multiplier;
        let px = |v: Decimal| term.apply(v) * mul;
        for b in &seg.bars {
            if !b.is_tradeable() {
                continue;
            }
            let (Some(o), Some(h), Some(l), Some(c)) = (b.open, b.high, b.low, b.close) else {
                continue;
            };
            map.entry(b.ts).or_insert_with(|| AdjustedBar {
                ts: b.ts,
                open: px(o),
                high: px(h),
                low: px(l),
                close: px(c),
                volume: b.volume,
                open_interest: b.open_interest,
                contract: seg.contract.symbol.clone(),
            });
        }
    };
    // First-wins insertion: walk the winning side of each boundary first.
    match boundary {
        BoundaryBar::Incoming => {
            for (seg, term) in segments.iter().zip(terms).rev() {
                emit(seg, *term);
            }
        }
        BoundaryBar::Outgoing => {
            for (seg, term) in segments.iter().zip(terms) {
                emit(seg, *term);
            }
        }
    }
    let bars: Vec<AdjustedBar> = map.into_values().collect();

    let rolls = segments
        .windows(2)
        .filter_map(|w| {
            w[0].exit.map(|p| RollRecord {
                at: p.at,
                outgoing: w[0].contract.symbol.clone(),
                incoming: w[1].contract.symbol.clone(),
                outgoing_close: p.outgoing_close,
                incoming_close: p.incoming_close,
                gap: p.outgoing_close - p.incoming_close,
            })
        })
        .collect();

    let attribution = build_attribution(label, &bars);

    #[cfg(feature = "tracing")]
    tracing::debug!(bars = bars.len(), "spliced continuous series");

    Ok(Spliced {
        bars,
        rolls,
        attribution,
    })
}

fn check_continuity(
    label: &str,
    segments: &[Segment],
    terms: &[AdjustmentTerm],
    tolerance: Decimal,
) -> Result<(), RollError> {
    for (i, w) in segments.windows(2).enumerate() {
        let Some(p) = w[0].exit else {
            continue;
        };
        let out = terms[i].apply(p.outgoing_close);
        let inc = terms[i + 1].apply(p.incoming_close);
        let ok = match terms[i + 1] {
            AdjustmentTerm::Factor(_) => {
                let scale = out.abs().max(inc.abs());
                (out - inc).abs() <= tolerance * scale
            }
            AdjustmentTerm::Identity | AdjustmentTerm::Offset(_) => out == inc,
        };
        if !ok {
            return Err(RollError::continuity(
                label,
                w[1].contract.symbol.as_str(),
                p.at,
                format!(
                    "adjusted close {out} of {} does not meet {inc} of {}",
                    w[0].contract.symbol, w[1].contract.symbol
                ),
            ));
        }
    }
    Ok(())
}

fn build_attribution(label: &str, bars: &[AdjustedBar]) -> Attribution {
    let mut attr = Attribution::new(label.to_string());
    let mut run: Option<(usize, usize)> = None;
    for (i, b) in bars.iter().enumerate() {
        match run {
            Some((start, _)) if bars[start].contract == b.contract => run = Some((start, i)),
            Some((start, end)) => {
                attr.push((
                    bars[start].contract.clone(),
                    Span {
                        start: bars[start].ts,
                        end: bars[end].ts,
                    },
                ));
                run = Some((i, i));
            }
            None => run = Some((i, i)),
        }
    }
    if let Some((start, end)) = run {
        attr.push((
            bars[start].contract.clone(),
            Span {
                start: bars[start].ts,
                end: bars[end].ts,
            },
        ));
    }
    attr
}
