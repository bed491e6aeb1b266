//! 品目別の参加者割り当て
//!
//! 割り当ては (レシートID, レシート内の品目インデックス) をキーに保持する。
//! 品目名は同じレシート内で重複し得るため、キーには使わない。

use crate::roster::Roster;
use crate::types::{ItemEntry, ReceiptId};
use std::collections::BTreeMap;

/// 品目を一意に指すキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub receipt: ReceiptId,
    /// レシートグループ内の品目インデックス
    pub index: usize,
}

impl ItemKey {
    pub fn new(receipt: ReceiptId, index: usize) -> Self {
        Self { receipt, index }
    }
}

/// 1品目の割り当て
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAssignment {
    pub item_name: String,
    pub participants: Vec<String>,
}

/// 品目入力欄のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemError {
    /// 参加者リストにない名前
    NotInList,
}

impl ItemError {
    pub fn message(&self) -> &'static str {
        match self {
            ItemError::NotInList => "리스트에 있는 이름이 아닙니다",
        }
    }
}

/// 入力された参加者名の検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// 空入力（エラー表示を消すだけ）
    Empty,
    /// 参加者リストにない
    NotInList,
    /// 有効な名前（trim済み）
    Valid(String),
}

/// 入力値をtrimして参加者リストと照合
pub fn validate_participant(input: &str, roster: &Roster) -> Validation {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Validation::Empty
    } else if !roster.contains(trimmed) {
        Validation::NotInList
    } else {
        Validation::Valid(trimmed.to_string())
    }
}

/// レシートID → 品目別割り当て
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentTracker {
    receipts: BTreeMap<ReceiptId, BTreeMap<usize, ItemAssignment>>,
}

impl AssignmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 品目の参加者リストを丸ごと置き換える
    pub fn set(&mut self, key: ItemKey, item_name: &str, participants: Vec<String>) {
        let entry = self
            .receipts
            .entry(key.receipt)
            .or_default()
            .entry(key.index)
            .or_default();
        entry.item_name = item_name.to_string();
        entry.participants = participants;
    }

    pub fn get(&self, key: ItemKey) -> Option<&ItemAssignment> {
        self.receipts.get(&key.receipt)?.get(&key.index)
    }

    /// 品目の参加者（未割り当てなら空）
    pub fn participants(&self, key: ItemKey) -> &[String] {
        self.get(key).map(|a| a.participants.as_slice()).unwrap_or(&[])
    }

    /// レシート内の割り当て済み品目（インデックス順、参加者0人の品目は除外）
    pub fn item_entries(&self, receipt: ReceiptId) -> Vec<ItemEntry> {
        self.receipts
            .get(&receipt)
            .map(|items| {
                items
                    .values()
                    .filter(|a| !a.participants.is_empty())
                    .map(|a| ItemEntry {
                        item_name: a.item_name.clone(),
                        participants: a.participants.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 1人以上割り当てられた品目が存在するか
    pub fn has_any(&self) -> bool {
        self.receipts
            .values()
            .flat_map(|items| items.values())
            .any(|a| !a.participants.is_empty())
    }

    pub fn clear(&mut self) {
        self.receipts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        ["A", "B"].into_iter().collect()
    }

    #[test]
    fn test_validate_participant() {
        let roster = roster();
        assert_eq!(validate_participant("  ", &roster), Validation::Empty);
        assert_eq!(validate_participant("C", &roster), Validation::NotInList);
        assert_eq!(validate_participant("a", &roster), Validation::NotInList);
        assert_eq!(validate_participant(" A ", &roster), Validation::Valid("A".to_string()));
    }

    #[test]
    fn test_set_and_get() {
        let mut tracker = AssignmentTracker::new();
        let key = ItemKey::new(1, 0);
        assert!(tracker.participants(key).is_empty());

        tracker.set(key, "X", vec!["A".to_string()]);
        assert_eq!(tracker.participants(key), &["A".to_string()]);
        assert_eq!(tracker.get(key).map(|a| a.item_name.as_str()), Some("X"));
    }

    #[test]
    fn test_same_item_name_tracked_separately() {
        let mut tracker = AssignmentTracker::new();
        tracker.set(ItemKey::new(1, 0), "콜라", vec!["A".to_string()]);
        tracker.set(ItemKey::new(1, 1), "콜라", vec!["B".to_string()]);

        let entries = tracker.item_entries(1);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].participants, vec!["A".to_string()]);
        assert_eq!(entries[1].participants, vec!["B".to_string()]);
    }

    #[test]
    fn test_empty_items_are_not_entries() {
        let mut tracker = AssignmentTracker::new();
        tracker.set(ItemKey::new(1, 0), "X", vec![]);
        assert!(tracker.item_entries(1).is_empty());
        assert!(!tracker.has_any());

        tracker.set(ItemKey::new(2, 3), "Y", vec!["B".to_string()]);
        assert!(tracker.has_any());
        assert!(tracker.item_entries(99).is_empty());
    }
}
