//! 対話式入力（参加者・品目別割り当て）

use crate::error::Result;
use paycheck_common::{CheckEvent, CheckSession, ItemKey, PendingSettlement, Roster};
use dialoguer::Input;

/// 空行が入力されるまで参加者名を聞く
pub fn prompt_participants() -> Result<Roster> {
    println!("참여자 이름을 입력하세요 (빈 줄로 종료)");
    let mut roster = Roster::new();

    loop {
        let name: String = Input::new()
            .with_prompt(format!("참여자 {}", roster.len() + 1))
            .allow_empty(true)
            .interact_text()?;

        if name.trim().is_empty() {
            break;
        }
        if !roster.add(&name) {
            println!("  이미 추가된 이름입니다: {}", name.trim());
        }
    }

    Ok(roster)
}

/// 品目ごとに参加者を聞いて割り当てる（カンマ区切り、空行でスキップ）
pub fn prompt_assignments(session: &mut CheckSession) -> Result<Option<PendingSettlement>> {
    println!("참여자: {}", session.roster().names().join(", "));
    let mut latest = None;

    let targets: Vec<(ItemKey, String)> = session
        .groups()
        .iter()
        .flat_map(|g| {
            g.items
                .iter()
                .enumerate()
                .map(move |(index, item)| (ItemKey::new(g.receipt, index), item.item_name.clone()))
        })
        .collect();

    for (key, item_name) in targets {
        loop {
            let input: String = Input::new()
                .with_prompt(format!("{} ({}:{})", item_name, key.receipt, key.index))
                .allow_empty(true)
                .interact_text()?;

            let mut rejected = false;
            for name in input.split(',') {
                let pending = session.dispatch(CheckEvent::AddParticipant {
                    key,
                    name: name.to_string(),
                });
                if let Some(error) = session.item_error(key) {
                    println!("  {}: {}", name.trim(), error.message());
                    session.dispatch(CheckEvent::InputChanged(key));
                    rejected = true;
                }
                if pending.is_some() {
                    latest = pending;
                }
            }

            if !rejected {
                break;
            }
        }
    }

    Ok(latest)
}
