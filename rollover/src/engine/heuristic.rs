use rollover_core::timeseries::util::bar_at;
use rollover_core::{
    Bar, BarRequest, BuildRequest, Contract, ResolvedChain, RollDecision, RollDetector, RollError,
    RollPoint, Segment,
};

use super::fetch_bars;
use crate::Rollover;

/// Cut a discovered chain into segments by walking each contract's bars through
/// `detector`.
///
/// The next contract is fetched the first time the calendar gate opens on the current
/// one, starting at that bar. An incoming contract is never rolled out of on its anchor
/// bar, so two rolls never share a timestamp. The series ends where the current
/// contract's bars end.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollover::engine::heuristic",
        skip(r, chain, req, detector),
        fields(root = %chain.root, contracts = chain.links.len()),
    )
)]
pub(super) async fn segments(
    r: &Rollover,
    chain: &ResolvedChain,
    req: &BuildRequest,
    detector: RollDetector,
) -> Result<Vec<Segment>, RollError> {
    let (name, store) = r.bar_store()?;
    let root = chain.root.as_str();
    let mut pending = chain.links.iter().map(|l| &l.contract);

    let mut current: Option<(Contract, Vec<Bar>)> = None;
    for c in pending.by_ref() {
        let req = BarRequest::ascending(req.frequency, req.from, req.to);
        let bars = fetch_bars(name, store, root, c, req).await?;
        if !bars.is_empty() {
            current = Some((c.clone(), bars));
            break;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(contract = %c.symbol, "no bars in window; skipping");
    }
    let Some((mut contract, mut bars)) = current else {
        return Ok(Vec::new());
    };

    let mut out: Vec<Segment> = Vec::new();
    // After a roll the first bar is the anchor; it was already decided on.
    let mut start = 0usize;
    loop {
        let Some(next) = pending.next() else {
            out.push(Segment {
                contract,
                bars,
                exit: None,
            });
            break;
        };

        let mut next_bars: Option<Vec<Bar>> = None;
        let mut roll: Option<(usize, RollPoint, usize)> = None;
        for (i, b) in bars.iter().enumerate().skip(start) {
            if !detector.gate_open(&contract, b) {
                continue;
            }
            if next_bars.is_none() {
                let req = BarRequest::ascending(req.frequency, Some(b.ts), req.to);
                next_bars = Some(fetch_bars(name, store, root, next, req).await?);
            }
            let Some(candidates) = next_bars.as_deref() else {
                continue;
            };
            let incoming = bar_at(candidates, b.ts);
            if let RollDecision::Roll(point) =
                detector.decide(&contract, b, incoming.map(|(_, x)| x))
                && let Some((j, _)) = incoming
            {
                roll = Some((i, point, j));
                break;
            }
        }

        let Some((i, point, j)) = roll else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                contract = %contract.symbol,
                next = %next.symbol,
                remaining = pending.len() + 1,
                "bars ended before a roll; series stops here"
            );
            out.push(Segment {
                contract,
                bars,
                exit: None,
            });
            break;
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            outgoing = %contract.symbol,
            incoming = %next.symbol,
            at = %point.at,
            outgoing_close = %point.outgoing_close,
            incoming_close = %point.incoming_close,
            "roll"
        );

        bars.truncate(i + 1);
        let mut incoming_bars = next_bars.unwrap_or_default();
        incoming_bars.drain(..j);
        out.push(Segment {
            contract,
            bars,
            exit: Some(point),
        });
        contract = next.clone();
        bars = incoming_bars;
        start = 1;
    }
    Ok(out)
}
