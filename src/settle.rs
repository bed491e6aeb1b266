//! CLIからの精算実行
//!
//! Webの結果画面と同じ `CheckSession` にイベントを流し、
//! 最後に発行されたリクエストだけを送る。

use crate::assign::AssignSpec;
use crate::client::BackendClient;
use crate::error::{PayCheckError, Result};
use paycheck_common::{
    grand_total, CheckEvent, CheckSession, Completion, ItemKey, PendingSettlement, SettleType,
};

/// 品目と参加者を取得してセッションを作る
///
/// 返り値の2番目は読み込み直後に発行されたリクエスト（1/N精算なら必ずある）
pub async fn load_session(
    client: &BackendClient,
    settle_type: SettleType,
) -> Result<(CheckSession, Option<PendingSettlement>)> {
    let mut session = CheckSession::new(settle_type);
    let (items, members) = tokio::join!(client.analyze(), client.members());

    match (items, members) {
        (Ok(items), Ok(members)) => {
            log::debug!("loaded {} items, {} members", items.len(), members.len());
            let pending = session.dispatch(CheckEvent::Loaded { items, members });
            Ok((session, pending))
        }
        (Err(e), _) | (_, Err(e)) => {
            session.dispatch(CheckEvent::LoadFailed(e.to_string()));
            Err(e)
        }
    }
}

/// 割り当て指定をセッションに適用し、最後のリクエストを返す
pub fn apply_assignments(
    session: &mut CheckSession,
    specs: &[AssignSpec],
) -> Result<Option<PendingSettlement>> {
    let mut latest = None;

    for spec in specs {
        ensure_item_exists(session, spec.key)?;
        for name in &spec.names {
            let pending = session.dispatch(CheckEvent::AddParticipant {
                key: spec.key,
                name: name.clone(),
            });
            if let Some(error) = session.item_error(spec.key) {
                return Err(PayCheckError::InvalidAssignment(format!(
                    "{}:{} {} ({})",
                    spec.key.receipt,
                    spec.key.index,
                    name,
                    error.message()
                )));
            }
            if pending.is_some() {
                latest = pending;
            }
        }
    }

    Ok(latest)
}

fn ensure_item_exists(session: &CheckSession, key: ItemKey) -> Result<()> {
    let exists = session
        .groups()
        .iter()
        .any(|g| g.receipt == key.receipt && key.index < g.items.len());
    if exists {
        Ok(())
    } else {
        Err(PayCheckError::InvalidAssignment(format!(
            "영수증 {} 에 {}번 항목이 없습니다",
            key.receipt, key.index
        )))
    }
}

/// リクエストを送ってセッションに反映
pub async fn send(
    client: &BackendClient,
    session: &mut CheckSession,
    pending: PendingSettlement,
) -> Completion {
    let outcome = client
        .calculate(&pending.request)
        .await
        .map_err(|e| e.to_string());

    let completion = session.complete(pending.ticket, outcome);
    match &completion {
        Completion::Applied => log::debug!("settlement applied (epoch {})", pending.ticket.epoch()),
        Completion::Stale => log::debug!("stale settlement dropped (epoch {})", pending.ticket.epoch()),
        Completion::Rejected(message) => log::warn!("정산 계산 실패: {}", message),
        Completion::Failed(message) => log::error!("정산 요청 오류: {}", message),
    }
    completion
}

/// 精算方式に合わないオプション（品目別専用のもの）を返す
pub fn ignored_item_options(method: SettleType, has_assign: bool, interactive: bool) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    if method == SettleType::Even {
        if has_assign {
            ignored.push("--assign");
        }
        if interactive {
            ignored.push("--interactive");
        }
    }
    ignored
}

/// 결제내역と정산 결과を表示
pub fn print_summary(session: &CheckSession) {
    println!("결제내역");
    for group in session.groups() {
        println!("\n[영수증 {}] {}", group.receipt, group.store_name());
        println!("  {:<4} {:<20} {:>4} {:>10}  {}", "#", "품목", "수량", "금액", "참여자");
        for (index, item) in group.items.iter().enumerate() {
            let participants = session.display_participants(ItemKey::new(group.receipt, index));
            println!(
                "  {:<4} {:<20} {:>4} {:>10}  {}",
                index,
                item.item_name,
                item.quantity,
                item.total_amount,
                participants.join(", ")
            );
        }
        println!("  총액 {}원", group.total());
    }

    println!("\n총액 {}원", grand_total(session.groups()));

    println!("\n정산 결과 ({})", session.settle_type().label());
    match session.result() {
        Some(result) if !result.is_empty() => {
            for (name, amount) in result {
                println!("  {:<12} {:>10}원", name, amount);
            }
        }
        _ => println!("  (결과 없음)"),
    }
}
