//! 結果画面（check）の状態とイベント処理
//!
//! 変更系のイベントを処理するたびに `reconcile` で精算リクエストを組み立て直す。
//! 画面側は `dispatch` が返したリクエストを送り、レスポンスを `complete` に渡す。

use crate::assignment::{validate_participant, AssignmentTracker, ItemError, ItemKey, Validation};
use crate::grouping::{group_by_receipt, ReceiptGroup};
use crate::roster::Roster;
use crate::settlement::{plan_settlement, Completion, SettlementPlan, SettlementTracker, Ticket};
use crate::types::{LineItem, SettleType, SettlementRequest, SettlementResponse, SettlementResult};
use std::collections::HashMap;

/// 初回データ取得の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// 画面から届くイベント
#[derive(Debug, Clone, PartialEq)]
pub enum CheckEvent {
    /// 品目と参加者一覧の取得完了
    Loaded { items: Vec<LineItem>, members: Vec<String> },
    /// 取得失敗
    LoadFailed(String),
    /// 精算方式の切り替え
    SetSettleType(SettleType),
    /// 品目に参加者を追加
    AddParticipant { key: ItemKey, name: String },
    /// 品目から参加者を削除
    RemoveParticipant { key: ItemKey, name: String },
    /// 品目の入力欄が編集された
    InputChanged(ItemKey),
}

/// 送信待ちの精算リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSettlement {
    pub ticket: Ticket,
    pub request: SettlementRequest,
}

/// 結果画面の状態
#[derive(Debug, Clone, Default)]
pub struct CheckSession {
    fetch: FetchState,
    settle_type: SettleType,
    items: Vec<LineItem>,
    groups: Vec<ReceiptGroup>,
    roster: Roster,
    assignments: AssignmentTracker,
    errors: HashMap<ItemKey, ItemError>,
    settlement: SettlementTracker,
}

impl CheckSession {
    pub fn new(settle_type: SettleType) -> Self {
        Self { settle_type, ..Default::default() }
    }

    /// イベントを処理し、必要なら精算リクエストを返す
    pub fn dispatch(&mut self, event: CheckEvent) -> Option<PendingSettlement> {
        match event {
            CheckEvent::Loaded { items, members } => {
                self.groups = group_by_receipt(&items);
                self.items = items;
                self.roster = members.into_iter().collect();
                self.fetch = FetchState::Ready;
            }
            CheckEvent::LoadFailed(message) => {
                self.fetch = FetchState::Failed(message);
                return None;
            }
            CheckEvent::SetSettleType(settle_type) => {
                self.settle_type = settle_type;
                self.errors.clear();
            }
            CheckEvent::AddParticipant { key, name } => {
                if !self.add_participant(key, &name) {
                    return None;
                }
            }
            CheckEvent::RemoveParticipant { key, name } => {
                let item_name = self.item(key).map(|i| i.item_name.clone())?;
                let participants: Vec<String> = self
                    .assignments
                    .participants(key)
                    .iter()
                    .filter(|p| **p != name)
                    .cloned()
                    .collect();
                self.assignments.set(key, &item_name, participants);
            }
            CheckEvent::InputChanged(key) => {
                self.errors.remove(&key);
                return None;
            }
        }

        self.reconcile()
    }

    /// 品目に参加者を追加。精算の再計算が必要ならtrue
    fn add_participant(&mut self, key: ItemKey, input: &str) -> bool {
        let Some(item_name) = self.item(key).map(|i| i.item_name.clone()) else {
            return false;
        };

        match validate_participant(input, &self.roster) {
            Validation::Empty => {
                self.errors.remove(&key);
                false
            }
            Validation::NotInList => {
                self.errors.insert(key, ItemError::NotInList);
                false
            }
            Validation::Valid(name) => {
                self.errors.remove(&key);
                let mut participants = self.assignments.participants(key).to_vec();
                if !participants.contains(&name) {
                    participants.push(name);
                }
                self.assignments.set(key, &item_name, participants);
                true
            }
        }
    }

    /// 現在の状態から精算リクエストを組み立てる
    pub fn reconcile(&mut self) -> Option<PendingSettlement> {
        if self.fetch != FetchState::Ready {
            return None;
        }

        match plan_settlement(self.settle_type, &self.groups, &self.roster, &self.assignments) {
            SettlementPlan::Skip => None,
            SettlementPlan::Clear => {
                self.settlement.clear();
                None
            }
            SettlementPlan::Send(request) => Some(PendingSettlement {
                ticket: self.settlement.issue(),
                request,
            }),
        }
    }

    /// 精算レスポンスを反映
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<SettlementResponse, String>,
    ) -> Completion {
        self.settlement.complete(ticket, outcome)
    }

    fn item(&self, key: ItemKey) -> Option<&LineItem> {
        self.groups
            .iter()
            .find(|g| g.receipt == key.receipt)
            .and_then(|g| g.items.get(key.index))
    }

    /// 画面に表示する品目の参加者
    ///
    /// 1/N精算では全員、品目別では割り当て済みの参加者。
    pub fn display_participants(&self, key: ItemKey) -> Vec<String> {
        match self.settle_type {
            SettleType::Even => self.roster.names().to_vec(),
            SettleType::Item => self.assignments.participants(key).to_vec(),
        }
    }

    pub fn item_error(&self, key: ItemKey) -> Option<ItemError> {
        self.errors.get(&key).copied()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn settle_type(&self) -> SettleType {
        self.settle_type
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn groups(&self) -> &[ReceiptGroup] {
        &self.groups
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn assignments(&self) -> &AssignmentTracker {
        &self.assignments
    }

    pub fn result(&self) -> Option<&SettlementResult> {
        self.settlement.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, receipt: i64, name: &str) -> LineItem {
        LineItem {
            id,
            store_name: "편의점".to_string(),
            item_name: name.to_string(),
            quantity: 1,
            unit_price: 1000,
            total_amount: 1000,
            receipt,
        }
    }

    fn loaded(settle_type: SettleType) -> CheckSession {
        let mut session = CheckSession::new(settle_type);
        session.dispatch(CheckEvent::Loaded {
            items: vec![line(1, 1, "X"), line(2, 1, "Y")],
            members: vec!["A".to_string(), "B".to_string()],
        });
        session
    }

    fn add(session: &mut CheckSession, index: usize, name: &str) -> Option<PendingSettlement> {
        session.dispatch(CheckEvent::AddParticipant {
            key: ItemKey::new(1, index),
            name: name.to_string(),
        })
    }

    fn ok(amount: i64) -> Result<SettlementResponse, String> {
        Ok(SettlementResponse {
            success: true,
            message: "ok".to_string(),
            result: [("A".to_string(), amount)].into_iter().collect(),
        })
    }

    #[test]
    fn test_no_request_while_loading() {
        let mut session = CheckSession::new(SettleType::Even);
        assert!(session.dispatch(CheckEvent::SetSettleType(SettleType::Even)).is_none());
        assert_eq!(session.fetch_state(), &FetchState::Loading);
    }

    #[test]
    fn test_no_request_after_failed_fetch() {
        let mut session = CheckSession::new(SettleType::Even);
        session.dispatch(CheckEvent::LoadFailed("network".into()));
        assert!(session.dispatch(CheckEvent::SetSettleType(SettleType::Even)).is_none());
        assert_eq!(session.fetch_state(), &FetchState::Failed("network".into()));
    }

    #[test]
    fn test_equal_request_on_load() {
        let mut session = CheckSession::new(SettleType::Even);
        let pending = session
            .dispatch(CheckEvent::Loaded {
                items: vec![line(1, 1, "X"), line(2, 2, "Y"), line(3, 1, "Z")],
                members: vec!["A".to_string()],
            })
            .expect("リクエストが発行されるはず");
        assert_eq!(pending.request.method, "equal");
        assert_eq!(pending.request.receipts.len(), 2);
    }

    #[test]
    fn test_no_request_with_empty_roster() {
        let mut session = CheckSession::new(SettleType::Even);
        let pending = session.dispatch(CheckEvent::Loaded {
            items: vec![line(1, 1, "X")],
            members: vec![],
        });
        assert!(pending.is_none());
    }

    #[test]
    fn test_item_assignments_build_request() {
        let mut session = loaded(SettleType::Item);
        assert!(add(&mut session, 0, "A").is_some());
        let pending = add(&mut session, 1, "B").expect("リクエストが発行されるはず");

        assert_eq!(pending.request.method, "item");
        assert_eq!(pending.request.receipts.len(), 1);
        let items = &pending.request.receipts[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name, "X");
        assert_eq!(items[0].participants, vec!["A".to_string()]);
        assert_eq!(items[1].item_name, "Y");
        assert_eq!(items[1].participants, vec!["B".to_string()]);
    }

    #[test]
    fn test_unknown_participant_sets_error() {
        let mut session = loaded(SettleType::Item);
        add(&mut session, 0, "A");

        assert!(add(&mut session, 0, "Zed").is_none());
        assert_eq!(session.item_error(ItemKey::new(1, 0)), Some(ItemError::NotInList));
        assert_eq!(session.display_participants(ItemKey::new(1, 0)), vec!["A".to_string()]);

        session.dispatch(CheckEvent::InputChanged(ItemKey::new(1, 0)));
        assert_eq!(session.item_error(ItemKey::new(1, 0)), None);
    }

    #[test]
    fn test_blank_input_clears_error() {
        let mut session = loaded(SettleType::Item);
        add(&mut session, 1, "nobody");
        assert!(session.item_error(ItemKey::new(1, 1)).is_some());
        assert!(add(&mut session, 1, "   ").is_none());
        assert!(session.item_error(ItemKey::new(1, 1)).is_none());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut session = loaded(SettleType::Item);
        add(&mut session, 0, "A");
        add(&mut session, 0, " A ");
        assert_eq!(session.display_participants(ItemKey::new(1, 0)), vec!["A".to_string()]);
    }

    #[test]
    fn test_remove_last_participant_clears_result() {
        let mut session = loaded(SettleType::Item);
        let pending = add(&mut session, 0, "A").unwrap();
        session.complete(pending.ticket, ok(1000));
        assert!(session.result().is_some());

        let pending = session.dispatch(CheckEvent::RemoveParticipant {
            key: ItemKey::new(1, 0),
            name: "A".to_string(),
        });
        assert!(pending.is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_toggle_settle_type_restores_assignments() {
        let mut session = loaded(SettleType::Item);
        add(&mut session, 0, "A");
        add(&mut session, 1, "B");
        let before = session.assignments().clone();

        session.dispatch(CheckEvent::SetSettleType(SettleType::Even));
        assert_eq!(
            session.display_participants(ItemKey::new(1, 1)),
            vec!["A".to_string(), "B".to_string()]
        );

        session.dispatch(CheckEvent::SetSettleType(SettleType::Item));
        assert_eq!(session.assignments(), &before);
        assert_eq!(session.display_participants(ItemKey::new(1, 1)), vec!["B".to_string()]);
    }

    #[test]
    fn test_rejected_response_keeps_result() {
        let mut session = loaded(SettleType::Even);
        let first = session.reconcile().unwrap();
        assert_eq!(session.complete(first.ticket, ok(1000)), Completion::Applied);

        let second = session.reconcile().unwrap();
        let rejected = Ok(SettlementResponse {
            success: false,
            message: "error".to_string(),
            result: Default::default(),
        });
        assert!(matches!(session.complete(second.ticket, rejected), Completion::Rejected(_)));
        assert_eq!(session.result().and_then(|r| r.get("A")), Some(&1000));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut session = loaded(SettleType::Item);
        let first = add(&mut session, 0, "A").unwrap();
        let second = add(&mut session, 1, "B").unwrap();

        assert_eq!(session.complete(second.ticket, ok(2000)), Completion::Applied);
        assert_eq!(session.complete(first.ticket, ok(1000)), Completion::Stale);
        assert_eq!(session.result().and_then(|r| r.get("A")), Some(&2000));
    }

    /// 再読み込みで名簿から消えた参加者の割り当ては残る
    #[test]
    fn test_removed_roster_member_keeps_assignment() {
        let mut session = loaded(SettleType::Item);
        add(&mut session, 0, "B");
        session.dispatch(CheckEvent::Loaded {
            items: vec![line(1, 1, "X"), line(2, 1, "Y")],
            members: vec!["A".to_string()],
        });
        assert!(!session.roster().contains("B"));
        assert_eq!(session.display_participants(ItemKey::new(1, 0)), vec!["B".to_string()]);
    }
}
