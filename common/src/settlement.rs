//! 精算リクエストの組み立てとレスポンスの反映
//!
//! リクエストごとにエポックを発行し、最新でないレスポンスは捨てる。

use crate::assignment::AssignmentTracker;
use crate::grouping::ReceiptGroup;
use crate::roster::Roster;
use crate::types::{ReceiptEntry, SettleType, SettlementRequest, SettlementResponse, SettlementResult};

/// 再計算の結果どうするか
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementPlan {
    /// 何もしない（表示中の結果はそのまま）
    Skip,
    /// リクエストせず、表示中の結果を消す
    Clear,
    /// このリクエストを送る
    Send(SettlementRequest),
}

/// 精算リクエストを組み立てる
///
/// 参加者が0人ならSkip。品目別で割り当てが1件もなければClear。
pub fn plan_settlement(
    settle_type: SettleType,
    groups: &[ReceiptGroup],
    roster: &Roster,
    tracker: &AssignmentTracker,
) -> SettlementPlan {
    if roster.is_empty() {
        return SettlementPlan::Skip;
    }

    match settle_type {
        SettleType::Even => SettlementPlan::Send(SettlementRequest {
            method: settle_type.method().to_string(),
            participants: Some(roster.names().to_vec()),
            receipts: groups
                .iter()
                .map(|g| ReceiptEntry { receipt_id: g.receipt, items: Vec::new() })
                .collect(),
        }),
        SettleType::Item => {
            let receipts: Vec<ReceiptEntry> = groups
                .iter()
                .filter_map(|g| {
                    let items = tracker.item_entries(g.receipt);
                    (!items.is_empty()).then(|| ReceiptEntry { receipt_id: g.receipt, items })
                })
                .collect();

            if receipts.is_empty() {
                SettlementPlan::Clear
            } else {
                SettlementPlan::Send(SettlementRequest {
                    method: settle_type.method().to_string(),
                    participants: None,
                    receipts,
                })
            }
        }
    }
}

/// 発行済みリクエストの識別子（エポック）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn epoch(&self) -> u64 {
        self.0
    }
}

/// レスポンス反映の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// 結果を更新した
    Applied,
    /// 古いリクエストへのレスポンスなので捨てた
    Stale,
    /// success:false（前回の結果を維持）
    Rejected(String),
    /// 通信・解析エラー（前回の結果を維持）
    Failed(String),
}

/// 精算結果とエポックの管理
#[derive(Debug, Clone, Default)]
pub struct SettlementTracker {
    latest: u64,
    result: Option<SettlementResult>,
}

impl SettlementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいリクエスト用のチケットを発行
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// 結果を消す。実行中のレスポンスも無効になる
    pub fn clear(&mut self) {
        self.latest += 1;
        self.result = None;
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// レスポンスを反映
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<SettlementResponse, String>,
    ) -> Completion {
        if !self.is_latest(ticket) {
            return Completion::Stale;
        }

        match outcome {
            Ok(resp) if resp.success => {
                self.result = Some(resp.result);
                Completion::Applied
            }
            Ok(resp) => Completion::Rejected(resp.message),
            Err(e) => Completion::Failed(e),
        }
    }

    pub fn result(&self) -> Option<&SettlementResult> {
        self.result.as_ref()
    }
}
