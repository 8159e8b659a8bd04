use rollover::{BuildRequest, ChainKind, Frequency, Instrument, RollError};

use crate::helpers::*;

#[tokio::test]
async fn single_contract_is_returned_raw() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r
        .build(BuildRequest::new(Instrument::root("IF1906"), Frequency::Day))
        .await
        .unwrap();
    assert_eq!(s.root, Some(root("IF")));
    assert!(s.rolls.is_empty());
    assert_eq!(s.bars.len(), 10);
    for (i, b) in s.bars.iter().enumerate() {
        assert_eq!(b.close, dec(100 + i as i64));
        assert_eq!(b.contract.as_str(), "IF1906");
    }
    assert_eq!(s.attribution.spans.len(), 1);

    // Only the requested contract is fetched.
    let log = ctrl.bar_requests().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, 1);
}

#[tokio::test]
async fn single_contract_honors_the_window() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let s = r
        .build(
            BuildRequest::new(Instrument::root("IF1909"), Frequency::Day)
                .window(Some(day(2019, 6, 19)), Some(day(2019, 6, 25))),
        )
        .await
        .unwrap();
    assert_eq!(s.bars.first().unwrap().ts, day(2019, 6, 19));
    assert_eq!(s.bars.last().unwrap().ts, day(2019, 6, 25));
    assert_eq!(s.bars.len(), 5);
}

#[tokio::test]
async fn contract_list_is_ordered_by_expiry() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    let req = BuildRequest::new(Instrument::contracts(["IF1909", "IF1906"]), Frequency::Day);

    let chain = r.resolve(&req).await.unwrap();
    assert_eq!(chain.kind, ChainKind::ContractList);
    assert_eq!(chain.symbols(), ["IF1906", "IF1909"]);

    let s = r.build(req).await.unwrap();
    assert_eq!(s.root, None);
    assert_eq!(s.rolls.len(), 1);
    assert_eq!(s.rolls[0].at, day(2019, 6, 18));
    assert_eq!(s.rolls[0].outgoing.as_str(), "IF1906");
}

#[tokio::test]
async fn one_element_list_is_a_single_contract() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;
    let req = BuildRequest::new(Instrument::contracts(["IF1909"]), Frequency::Day);

    let chain = r.resolve(&req).await.unwrap();
    assert_eq!(chain.kind, ChainKind::SingleContract);

    let s = r.build(req).await.unwrap();
    assert_eq!(s.root, Some(root("IF")));
    assert!(s.rolls.is_empty());
    assert_eq!(s.bars.len(), 15);
}

#[tokio::test]
async fn contract_list_drops_contracts_outside_the_window() {
    let (r, ctrl) = engine();
    seed_pair(&ctrl).await;

    let req = BuildRequest::new(Instrument::contracts(["IF1906", "IF1909"]), Frequency::Day)
        .window(Some(day(2019, 6, 24)), None);
    let s = r.build(req).await.unwrap();
    assert_eq!(s.root, None);
    assert!(s.rolls.is_empty());
    assert!(s.bars.iter().all(|b| b.contract.as_str() == "IF1909"));
    assert_eq!(s.bars.first().unwrap().ts, day(2019, 6, 24));

    let late = BuildRequest::new(Instrument::contracts(["IF1906", "IF1909"]), Frequency::Day)
        .window(Some(day(2019, 10, 1)), None);
    assert!(matches!(
        r.build(late).await.unwrap_err(),
        RollError::NotFound { .. }
    ));
}
