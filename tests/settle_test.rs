//! CLIの割り当て適用テスト

use paycheck::assign::parse_assign;
use paycheck::error::PayCheckError;
use paycheck::settle::apply_assignments;
use paycheck_common::{CheckEvent, CheckSession, ItemKey, LineItem, SettleType};

fn loaded_session(settle_type: SettleType) -> CheckSession {
    let items = ["X", "Y", "X"]
        .iter()
        .enumerate()
        .map(|(i, name)| LineItem {
            id: i as i64 + 1,
            store_name: "편의점".to_string(),
            item_name: name.to_string(),
            quantity: 1,
            unit_price: 1000,
            total_amount: 1000,
            receipt: 5,
        })
        .collect();

    let mut session = CheckSession::new(settle_type);
    session.dispatch(CheckEvent::Loaded {
        items,
        members: vec!["A".to_string(), "B".to_string()],
    });
    session
}

#[test]
fn test_apply_assignments_builds_item_request() {
    let mut session = loaded_session(SettleType::Item);
    let specs = vec![parse_assign("5:0=A").unwrap(), parse_assign("5:1=B").unwrap()];

    let pending = apply_assignments(&mut session, &specs)
        .unwrap()
        .expect("最後の割り当てでリクエストが出るはず");

    assert_eq!(pending.request.method, "item");
    assert_eq!(pending.request.receipts.len(), 1);
    let items = &pending.request.receipts[0].items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_name, "X");
    assert_eq!(items[0].participants, vec!["A".to_string()]);
    assert_eq!(items[1].item_name, "Y");
    assert_eq!(items[1].participants, vec!["B".to_string()]);
}

/// 同名の品目でもインデックスで区別される
#[test]
fn test_same_name_items_are_independent() {
    let mut session = loaded_session(SettleType::Item);
    let specs = vec![parse_assign("5:2=A,B").unwrap()];

    apply_assignments(&mut session, &specs).unwrap();

    assert!(session.display_participants(ItemKey::new(5, 0)).is_empty());
    assert_eq!(
        session.display_participants(ItemKey::new(5, 2)),
        vec!["A".to_string(), "B".to_string()]
    );
}

#[test]
fn test_unknown_participant_is_rejected() {
    let mut session = loaded_session(SettleType::Item);
    let specs = vec![parse_assign("5:0=C").unwrap()];

    let err = apply_assignments(&mut session, &specs).unwrap_err();
    match err {
        PayCheckError::InvalidAssignment(message) => {
            assert!(message.contains("리스트에 있는 이름이 아닙니다"), "{}", message);
        }
        other => panic!("InvalidAssignmentになるはず: {:?}", other),
    }
    assert!(session.display_participants(ItemKey::new(5, 0)).is_empty());
}

#[test]
fn test_missing_item_is_rejected() {
    let mut session = loaded_session(SettleType::Item);

    for spec in ["5:3=A", "9:0=A"] {
        let specs = vec![parse_assign(spec).unwrap()];
        let err = apply_assignments(&mut session, &specs).unwrap_err();
        assert!(matches!(err, PayCheckError::InvalidAssignment(_)), "{}", spec);
    }
}

#[test]
fn test_no_specs_returns_none() {
    let mut session = loaded_session(SettleType::Item);
    assert!(apply_assignments(&mut session, &[]).unwrap().is_none());
}
