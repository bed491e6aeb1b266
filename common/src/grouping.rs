//! レシート単位のグルーピング

use crate::types::{LineItem, ReceiptId};
use std::collections::HashMap;

/// 同じレシートIDを持つ品目のまとまり（初出順）
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptGroup {
    pub receipt: ReceiptId,
    pub items: Vec<LineItem>,
}

impl ReceiptGroup {
    /// 상호명（先頭品目から取得）
    pub fn store_name(&self) -> &str {
        self.items.first().map(|i| i.store_name.as_str()).unwrap_or("")
    }

    /// レシートの合計金額
    pub fn total(&self) -> i64 {
        self.items.iter().map(|i| i.total_amount).sum()
    }
}

/// 品目をレシートIDごとにまとめる
///
/// グループの並びはIDが最初に現れた順。グループ内の品目順も入力順のまま。
pub fn group_by_receipt(items: &[LineItem]) -> Vec<ReceiptGroup> {
    let mut index_of: HashMap<ReceiptId, usize> = HashMap::new();
    let mut groups: Vec<ReceiptGroup> = Vec::new();

    for item in items {
        let idx = *index_of.entry(item.receipt).or_insert_with(|| {
            groups.push(ReceiptGroup { receipt: item.receipt, items: Vec::new() });
            groups.len() - 1
        });
        groups[idx].items.push(item.clone());
    }

    groups
}

/// 全レシートの合計金額
pub fn grand_total(groups: &[ReceiptGroup]) -> i64 {
    groups.iter().map(|g| g.total()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, receipt: ReceiptId, name: &str, amount: i64) -> LineItem {
        LineItem {
            id,
            store_name: format!("store-{}", receipt),
            item_name: name.to_string(),
            quantity: 1,
            unit_price: amount,
            total_amount: amount,
            receipt,
        }
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_receipt(&[]).is_empty());
    }

    #[test]
    fn test_group_first_seen_order() {
        let items = vec![
            item(1, 20, "a", 100),
            item(2, 10, "b", 200),
            item(3, 20, "c", 300),
            item(4, 30, "d", 400),
            item(5, 10, "e", 500),
        ];

        let groups = group_by_receipt(&items);
        let ids: Vec<ReceiptId> = groups.iter().map(|g| g.receipt).collect();
        assert_eq!(ids, vec![20, 10, 30]);

        let first: Vec<i64> = groups[0].items.iter().map(|i| i.id).collect();
        assert_eq!(first, vec![1, 3]);
        let second: Vec<i64> = groups[1].items.iter().map(|i| i.id).collect();
        assert_eq!(second, vec![2, 5]);
    }

    #[test]
    fn test_group_flatten_keeps_every_item_once() {
        let items: Vec<LineItem> = (0..40)
            .map(|i| item(i, (i * 7) % 5, "x", i))
            .collect();

        let groups = group_by_receipt(&items);
        let mut flat: Vec<i64> = groups
            .iter()
            .flat_map(|g| {
                assert!(!g.items.is_empty());
                assert!(g.items.iter().all(|i| i.receipt == g.receipt));
                g.items.iter().map(|i| i.id)
            })
            .collect();
        assert_eq!(flat.len(), items.len());
        flat.sort();
        assert_eq!(flat, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_group_totals() {
        let items = vec![item(1, 1, "a", 13000), item(2, 1, "b", 2000), item(3, 2, "c", 500)];
        let groups = group_by_receipt(&items);
        assert_eq!(groups[0].total(), 15000);
        assert_eq!(groups[0].store_name(), "store-1");
        assert_eq!(grand_total(&groups), 15500);
    }
}
