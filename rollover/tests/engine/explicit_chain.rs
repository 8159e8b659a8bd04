use rollover::{BuildRequest, ChainKind, Frequency, Instrument, RollError};
use rollover_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::*;

fn if_v1() -> BuildRequest {
    BuildRequest::new(Instrument::root("IF"), Frequency::Day).chain_version(1)
}

async fn seed_table(ctrl: &rollover_mock::DynamicMockController) {
    seed_pair(ctrl).await;
    ctrl.set_chain(
        root("IF"),
        1,
        vec![
            entry("IF1909", day(2019, 6, 17)),
            entry("IF1906", day(2019, 1, 2)),
        ],
    )
    .await;
}

#[tokio::test]
async fn rolls_on_the_last_priced_bar_before_the_entry() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;

    let s = r.build(if_v1()).await.unwrap();
    assert_eq!(s.rolls.len(), 1);
    let roll = &s.rolls[0];
    assert_eq!(roll.at, day(2019, 6, 14));
    assert_eq!(roll.outgoing_close, dec(104));
    assert_eq!(roll.incoming_close, dec(106));

    // June bars 06-10..06-13, September from the 06-14 anchor to 06-28.
    assert_eq!(s.bars.len(), 4 + 11);
    assert_eq!(s.bars[0].close, dec(102));
    let anchor = s.bars.iter().find(|b| b.ts == day(2019, 6, 14)).unwrap();
    assert_eq!(anchor.contract.as_str(), "IF1909");
    assert_eq!(anchor.close, dec(106));
}

#[tokio::test]
async fn fetch_windows_follow_the_table() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;

    r.build(if_v1()).await.unwrap();
    let log = ctrl.bar_requests().await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, 1);
    assert_eq!(log[0].1.from, Some(day(2019, 1, 2)));
    assert_eq!(log[0].1.to, Some(day(2019, 6, 17)));
    assert_eq!(log[1].0, 2);
    assert_eq!(log[1].1.from, Some(day(2019, 6, 14)));
    assert_eq!(log[1].1.to, None);
}

#[tokio::test]
async fn holiday_before_the_entry_moves_the_anchor_back() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;
    let mut june = series(day(2019, 6, 10), day(2019, 6, 21), |i| (100 + i as i64, 100, 1000));
    june[4] = holiday(day(2019, 6, 14));
    ctrl.set_bars(1, june).await;

    let s = r.build(if_v1()).await.unwrap();
    assert_eq!(s.rolls[0].at, day(2019, 6, 13));
    assert_eq!(s.rolls[0].gap, dec(-2));
}

#[tokio::test]
async fn incoming_without_anchor_bar_is_a_continuity_violation() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;
    ctrl.set_bars(2, series(day(2019, 6, 17), day(2019, 6, 28), |i| (108 + i as i64, 1, 1)))
        .await;

    let err = r.build(if_v1()).await.unwrap_err();
    match err {
        RollError::ContinuityViolation {
            root, contract, at, ..
        } => {
            assert_eq!(root, "IF");
            assert_eq!(contract, "IF1909");
            assert_eq!(at, day(2019, 6, 14));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn window_start_keeps_only_the_current_entry() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;

    let req = if_v1().window(Some(day(2019, 6, 20)), None);
    let chain = r.resolve(&req).await.unwrap();
    assert_eq!(chain.symbols(), ["IF1909"]);
    assert_eq!(chain.kind, ChainKind::Explicit { version: 1 });

    let s = r.build(req).await.unwrap();
    assert!(s.rolls.is_empty());
    assert_eq!(s.bars.first().unwrap().ts, day(2019, 6, 20));
}

#[tokio::test]
async fn entry_after_the_window_only_bounds_the_last_segment() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;
    ctrl.set_contract(contract(3, "IF1912", day(2019, 12, 20)))
        .await;
    ctrl.set_chain(
        root("IF"),
        1,
        vec![
            entry("IF1906", day(2019, 1, 2)),
            entry("IF1909", day(2019, 6, 17)),
            entry("IF1912", day(2019, 9, 16)),
        ],
    )
    .await;

    let req = if_v1().window(None, Some(day(2019, 6, 26)));
    assert_eq!(
        r.resolve(&req).await.unwrap().symbols(),
        ["IF1906", "IF1909", "IF1912"]
    );
    let s = r.build(req).await.unwrap();
    assert_eq!(s.rolls.len(), 1);
    assert_eq!(s.bars.last().unwrap().ts, day(2019, 6, 26));
    assert!(ctrl.bar_requests().await.iter().all(|(id, _)| *id != 3));
}

#[tokio::test]
async fn unknown_version_falls_back_to_discovery() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;

    let req = BuildRequest::new(Instrument::root("IF"), Frequency::Day).chain_version(7);
    let chain = r.resolve(&req).await.unwrap();
    assert_eq!(chain.kind, ChainKind::Discovered);

    ctrl.set_chain(root("IF"), 7, vec![]).await;
    let s = r.build(req).await.unwrap();
    assert_eq!(s.rolls[0].at, day(2019, 6, 18));
}

#[tokio::test]
async fn chain_directory_failure_is_tagged() {
    let (r, ctrl) = engine();
    seed_table(&ctrl).await;
    ctrl.set_chain_behavior(
        root("IF"),
        1,
        MockBehavior::Fail(RollError::connector(MOCK, "table offline")),
    )
    .await;

    let err = r.build(if_v1()).await.unwrap_err();
    match &err {
        RollError::UpstreamFetchFailure {
            connector,
            root,
            contract,
            ..
        } => {
            assert_eq!(connector, MOCK);
            assert_eq!(root, "IF");
            assert!(contract.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(err.root_cause(), RollError::Connector { .. }));
}

#[tokio::test]
async fn chain_version_without_directory_is_unsupported() {
    let (conn, ctrl) = DynamicMockConnector::bars_only_with_controller(MOCK);
    let r = shared(conn);
    seed_pair(&ctrl).await;

    let err = r.build(if_v1()).await.unwrap_err();
    assert_eq!(
        err,
        RollError::Unsupported {
            capability: "chain-table".into()
        }
    );

    // Without a version the same connector discovers the chain.
    let s = r
        .build(BuildRequest::new(Instrument::root("IF"), Frequency::Day))
        .await
        .unwrap();
    assert_eq!(s.rolls.len(), 1);
}
