use rollover::{
    BoundaryBar, BuildRequest, CalendarGate, Decimal, Direction, Frequency, Instrument,
};

use crate::helpers::*;

fn if_daily() -> BuildRequest {
    BuildRequest::new(Instrument::root("IF"), Frequency::Day)
}

#[tokio::test]
async fn backward_additive_rolls_where_liquidity_moves() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r.build(if_daily()).await.unwrap();
    assert_eq!(s.root, Some(root("IF")));
    assert_eq!(s.direction, Direction::Backward);

    assert_eq!(s.rolls.len(), 1);
    let roll = &s.rolls[0];
    assert_eq!(roll.at, day(2019, 6, 18));
    assert_eq!(roll.outgoing.as_str(), "IF1906");
    assert_eq!(roll.incoming.as_str(), "IF1909");
    assert_eq!(roll.outgoing_close, dec(106));
    assert_eq!(roll.incoming_close, dec(108));
    assert_eq!(roll.gap, dec(-2));

    // Six June bars before the roll, nine September bars from the anchor on.
    assert_eq!(s.bars.len(), 15);
    assert_eq!(s.bars[0].close, dec(102));
    let last_june = s.bars.iter().find(|b| b.ts == day(2019, 6, 17)).unwrap();
    assert_eq!(last_june.close, dec(107));
    assert_eq!(last_june.contract.as_str(), "IF1906");
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 18)).unwrap();
    assert_eq!(anchor.close, dec(108));
    assert_eq!(anchor.contract.as_str(), "IF1909");

    let june: Vec<_> = s.attribution.spans_for("IF1906").collect();
    assert_eq!((june[0].start, june[0].end), (day(2019, 6, 10), day(2019, 6, 17)));
    let sept: Vec<_> = s.attribution.spans_for("IF1909").collect();
    assert_eq!((sept[0].start, sept[0].end), (day(2019, 6, 18), day(2019, 6, 28)));
}

#[tokio::test]
async fn next_contract_is_fetched_lazily_from_the_gate() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    r.build(if_daily()).await.unwrap();
    let log = ctrl.bar_requests().await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, 1);
    assert_eq!(log[0].1.from, None);
    assert_eq!(log[1].0, 2);
    assert_eq!(log[1].1.from, Some(day(2019, 6, 17)));
}

#[tokio::test]
async fn forward_override_keeps_the_oldest_prices() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r
        .build(if_daily().direction(Direction::Forward))
        .await
        .unwrap();
    assert_eq!(s.direction, Direction::Forward);
    assert_eq!(s.bars[0].close, dec(100));
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 18)).unwrap();
    assert_eq!(anchor.close, dec(106));
    assert_eq!(s.bars.last().unwrap().close, dec(116) - dec(2));
}

#[tokio::test]
async fn multiplicative_keeps_returns() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r
        .build(if_daily().adjustment(rollover::Adjustment::Multiplicative))
        .await
        .unwrap();
    let factor = dec(108) / dec(106);
    let last_june = s.bars.iter().find(|b| b.ts == day(2019, 6, 17)).unwrap();
    assert_eq!(last_june.close, dec(105) * factor);
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 18)).unwrap();
    assert_eq!(anchor.close, dec(108));
}

#[tokio::test]
async fn outgoing_boundary_keeps_the_decision_bar() {
    let (r, ctrl) = engine_with(|b| b.boundary_bar(BoundaryBar::Outgoing));
    seed_pair(&ctrl).await;

    let s = r.build(if_daily()).await.unwrap();
    assert_eq!(s.bars.len(), 15);
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 18)).unwrap();
    assert_eq!(anchor.contract.as_str(), "IF1906");
    // Outgoing 106 shifted onto the incoming level.
    assert_eq!(anchor.close, dec(108));
}

#[tokio::test]
async fn holidays_are_not_emitted() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    let mut sept = series(day(2019, 6, 10), day(2019, 6, 28), |i| {
        (102 + i as i64, if i < 6 { 40 } else { 120 }, 500)
    });
    let idx = sept.iter().position(|b| b.ts == day(2019, 6, 20)).unwrap();
    sept[idx] = holiday(day(2019, 6, 20));
    ctrl.set_bars(2, sept).await;

    let s = r.build(if_daily()).await.unwrap();
    assert_eq!(s.bars.len(), 14);
    assert!(s.bars.iter().all(|b| b.ts != day(2019, 6, 20)));
    assert!(s.bars.windows(2).all(|w| w[0].ts < w[1].ts));
}

#[tokio::test]
async fn missing_incoming_bar_defers_the_roll() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    let sept: Vec<_> = series(day(2019, 6, 10), day(2019, 6, 28), |i| {
        (102 + i as i64, if i < 6 { 40 } else { 120 }, 500)
    })
    .into_iter()
    .filter(|b| b.ts != day(2019, 6, 18))
    .collect();
    ctrl.set_bars(2, sept).await;

    let s = r.build(if_daily()).await.unwrap();
    assert_eq!(s.rolls[0].at, day(2019, 6, 19));
    assert_eq!(s.rolls[0].gap, dec(-2));
}

#[tokio::test]
async fn grace_override_moves_the_gate() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r
        .build(if_daily().grace(CalendarGate::DaysBeforeExpiry(1)))
        .await
        .unwrap();
    assert_eq!(s.rolls[0].at, day(2019, 6, 20));
    let log = ctrl.bar_requests().await;
    assert_eq!(log[1].1.from, Some(day(2019, 6, 20)));
}

#[tokio::test]
async fn series_ends_with_the_last_stream() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    ctrl.set_bars(2, vec![]).await;

    let s = r.build(if_daily()).await.unwrap();
    assert!(s.rolls.is_empty());
    assert_eq!(s.bars.len(), 10);
    assert!(s.bars.iter().all(|b| b.contract.as_str() == "IF1906"));
    assert_eq!(s.attribution.spans.len(), 1);
}

#[tokio::test]
async fn leading_contract_without_bars_is_skipped() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    ctrl.set_contract(contract(3, "IF1903", day(2019, 3, 15)))
        .await;

    let s = r.build(if_daily()).await.unwrap();
    assert_eq!(s.rolls.len(), 1);
    assert_eq!(s.rolls[0].outgoing.as_str(), "IF1906");
    let log = ctrl.bar_requests().await;
    assert_eq!(log[0].0, 3);
    assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn no_adjustment_keeps_the_raw_gap() {
    let (r, ctrl) = engine_with(|b| b.adjustment(rollover::Adjustment::None));
    seed_pair(&ctrl).await;

    let s = r.build(if_daily()).await.unwrap();
    let last_june = s.bars.iter().find(|b| b.ts == day(2019, 6, 17)).unwrap();
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 18)).unwrap();
    assert_eq!(last_june.close, dec(105));
    assert_eq!(anchor.close, dec(108));
    assert_eq!(s.rolls[0].gap, Decimal::from(-2));
}

#[tokio::test]
async fn anchor_bar_is_not_rolled_out_of_again() {
    let (r, ctrl) = engine_with(|b| b.grace_days(40));
    ctrl.set_contract(contract(1, "IF1906", day(2019, 6, 21)))
        .await;
    ctrl.set_contract(contract(2, "IF1907", day(2019, 7, 19)))
        .await;
    ctrl.set_contract(contract(3, "IF1908", day(2019, 8, 16)))
        .await;
    ctrl.set_bars(
        1,
        series(day(2019, 6, 10), day(2019, 6, 21), |i| (100 + i as i64, 100, 1000)),
    )
    .await;
    ctrl.set_bars(
        2,
        series(day(2019, 6, 10), day(2019, 7, 19), |i| {
            (102 + i as i64, if i < 6 { 40 } else { 120 }, 500)
        }),
    )
    .await;
    ctrl.set_bars(
        3,
        series(day(2019, 6, 10), day(2019, 8, 16), |i| (105 + i as i64, 200, 0)),
    )
    .await;

    let s = r.build(if_daily()).await.unwrap();
    let at: Vec<_> = s.rolls.iter().map(|x| x.at).collect();
    // Both gates are open from the start; IF1907 is only left on the bar after its anchor.
    assert_eq!(at, vec![day(2019, 6, 18), day(2019, 6, 19)]);
    assert_eq!(s.rolls[1].outgoing.as_str(), "IF1907");
    assert_eq!(s.rolls[1].incoming.as_str(), "IF1908");
    let middle: Vec<_> = s
        .bars
        .iter()
        .filter(|b| b.contract.as_str() == "IF1907")
        .collect();
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].ts, day(2019, 6, 18));
    assert!(s.bars.windows(2).all(|w| w[0].ts < w[1].ts));
}
