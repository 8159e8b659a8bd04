use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::RollError;
use crate::timeseries::roll::{RollPoint, Segment};
use rollover_types::{Adjustment, Direction};

/// Price transform applied to every OHLC field of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentTerm {
    /// Leave prices untouched.
    Identity,
    /// Add a constant.
    Offset(Decimal),
    /// Multiply by a constant.
    Factor(Decimal),
}

impl AdjustmentTerm {
    /// Apply the term to a raw price.
    #[must_use]
    pub fn apply(self, px: Decimal) -> Decimal {
        match self {
            Self::Identity => px,
            Self::Offset(d) => px + d,
            Self::Factor(r) => px * r,
        }
    }
}

/// Compose per-roll deltas or ratios into one term per segment.
///
/// Roll `i` joins segment `i` to segment `i + 1`. With `delta_i = out_i - in_i` and
/// `ratio_i = out_i / in_i`:
///
/// - backward: segment `j` absorbs every later roll, `offset_j = -sum(delta_i, i >= j)`
///   or `factor_j = prod(1 / ratio_i, i >= j)`; the last segment is untouched.
/// - forward: segment `j` inherits every earlier roll, `offset_j = sum(delta_i, i < j)`
///   or `factor_j = prod(ratio_i, i < j)`; the first segment is untouched.
///
/// # Errors
/// `ContinuityViolation` when a non-final segment lacks its roll point, a
/// multiplicative roll is anchored on a zero close, or a composed term overflows.
pub fn segment_terms(
    root: &str,
    segments: &[Segment],
    adjustment: Adjustment,
    direction: Direction,
) -> Result<Vec<AdjustmentTerm>, RollError> {
    let n = segments.len();
    if matches!(adjustment, Adjustment::None) {
        return Ok(vec![AdjustmentTerm::Identity; n]);
    }
    let rolls = roll_points(root, segments)?;

    let step = |i: usize, p: &RollPoint| -> Result<Decimal, RollError> {
        let incoming = segments[i + 1].contract.symbol.as_str();
        match adjustment {
            Adjustment::Additive => Ok(p.outgoing_close - p.incoming_close),
            _ => {
                if p.outgoing_close.is_zero() || p.incoming_close.is_zero() {
                    return Err(RollError::continuity(
                        root,
                        incoming,
                        p.at,
                        "multiplicative roll anchored on a zero close",
                    ));
                }
                // Backward composition divides by the ratio, forward multiplies by it.
                let (num, den) = match direction {
                    Direction::Backward => (p.incoming_close, p.outgoing_close),
                    Direction::Forward => (p.outgoing_close, p.incoming_close),
                };
                num.checked_div(den).ok_or_else(|| {
                    RollError::continuity(root, incoming, p.at, "ratio overflow")
                })
            }
        }
    };

    let combine = |acc: Decimal, s: Decimal, i: usize| -> Result<Decimal, RollError> {
        let out = match (adjustment, direction) {
            (Adjustment::Additive, Direction::Backward) => acc.checked_sub(s),
            (Adjustment::Additive, Direction::Forward) => acc.checked_add(s),
            _ => acc.checked_mul(s),
        };
        out.ok_or_else(|| {
            RollError::continuity(
                root,
                segments[i + 1].contract.symbol.as_str(),
                rolls[i].at,
                "adjustment overflow",
            )
        })
    };
    let wrap = |v: Decimal| match adjustment {
        Adjustment::Additive => AdjustmentTerm::Offset(v),
        _ => AdjustmentTerm::Factor(v),
    };
    let unit = match adjustment {
        Adjustment::Additive => Decimal::ZERO,
        _ => Decimal::ONE,
    };

    let mut acc = unit;
    let mut terms = vec![wrap(unit); n];
    match direction {
        Direction::Backward => {
            for i in (0..rolls.len()).rev() {
                acc = combine(acc, step(i, &rolls[i])?, i)?;
                terms[i] = wrap(acc);
            }
        }
        Direction::Forward => {
            for (i, p) in rolls.iter().enumerate() {
                acc = combine(acc, step(i, p)?, i)?;
                terms[i + 1] = wrap(acc);
            }
        }
    }
    Ok(terms)
}

fn roll_points(root: &str, segments: &[Segment]) -> Result<Vec<RollPoint>, RollError> {
    let Some((_, body)) = segments.split_last() else {
        return Ok(Vec::new());
    };
    body.iter()
        .zip(segments.iter().skip(1))
        .map(|(seg, next)| {
            seg.exit.ok_or_else(|| {
                let at = seg.bars.last().or_else(|| next.bars.first()).map(|b| b.ts);
                RollError::continuity(
                    root,
                    next.contract.symbol.as_str(),
                    at.unwrap_or_default(),
                    format!("{} ends without a roll point", seg.contract.symbol),
                )
            })
        })
        .collect()
}
