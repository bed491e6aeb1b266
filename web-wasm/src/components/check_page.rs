//! 結果画面
//!
//! 状態はすべて `CheckSession` に置き、変更は `dispatch` 経由でのみ行う。
//! 精算リクエストは dispatch が返した時だけ送る。

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paycheck_common::share::{KAKAO_APP_KEY, SHARE_IMAGE_PATH, SHARE_TITLE};
use paycheck_common::{
    grand_total, settlement_description, CheckEvent, CheckSession, Completion, FeedPayload,
    FetchState, LazyShare, PendingSettlement, SettleType,
};
use crate::api::backend;
use crate::app::Page;
use crate::components::{receipt_detail::ReceiptDetail, settle_type_selector::SettleTypeSelector};
use crate::export::excel_wasm;
use crate::kakao::{self, KakaoSdk};

const EXCEL_FILE_NAME: &str = "paycheck_정산결과.xlsx";

/// 精算APIを呼び、最新のリクエストなら結果を反映
async fn send_settlement(session: RwSignal<CheckSession>, pending: PendingSettlement) {
    let outcome = backend::calculate(&pending.request).await;
    let completion = session.try_update(|s| s.complete(pending.ticket, outcome));

    match completion {
        Some(Completion::Applied) => {
            console::log!(format!("정산 결과 반영 (#{})", pending.ticket.epoch()));
        }
        Some(Completion::Stale) => {
            console::log!(format!("이전 정산 응답 무시 (#{})", pending.ticket.epoch()));
        }
        Some(Completion::Rejected(message)) => {
            console::error!(format!("정산 실패: {}", message));
        }
        Some(Completion::Failed(e)) => {
            console::error!(format!("정산 요청 오류: {}", e));
        }
        // 画面を離れた後の応答
        None => {}
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[component]
pub fn CheckPage(settle_type: SettleType, set_page: WriteSignal<Page>) -> impl IntoView {
    let session = RwSignal::new(CheckSession::new(settle_type));
    let share = StoredValue::new(LazyShare::new(KakaoSdk, KAKAO_APP_KEY));

    let dispatch = move |event: CheckEvent| {
        let mut pending = None;
        session.update(|s| pending = s.dispatch(event));
        if let Some(pending) = pending {
            spawn_local(send_settlement(session, pending));
        }
    };

    // レシート明細と参加者名簿は並行して取得
    spawn_local(async move {
        let (items, members) = futures::join!(backend::analyze(), backend::members());
        let event = match (items, members) {
            (Ok(items), Ok(members)) => CheckEvent::Loaded { items, members },
            (Err(e), _) | (_, Err(e)) => {
                console::error!(format!("데이터 조회 실패: {}", e));
                CheckEvent::LoadFailed(e)
            }
        };
        dispatch(event);
    });

    if let Err(e) = kakao::load_script() {
        console::error!(format!("카카오 SDK 로드 실패: {}", e));
    }

    let fetch_state = Memo::new(move |_| session.with(|s| s.fetch_state().clone()));
    let current_type = Memo::new(move |_| session.with(|s| s.settle_type()));
    let groups = Memo::new(move |_| session.with(|s| s.groups().to_vec()));
    let total = move || session.with(|s| grand_total(s.groups()));

    let on_export_excel = move |_| {
        if let Err(e) = session.with_untracked(|s| excel_wasm::download_excel(s, EXCEL_FILE_NAME)) {
            console::error!(format!("Excel 출력 실패: {}", e));
        }
    };

    let on_share = move |_| {
        let description = session.with_untracked(|s| settlement_description(s.result()));
        let origin = page_origin();
        let payload = FeedPayload::new(
            SHARE_TITLE,
            &description,
            &format!("{}{}", origin, SHARE_IMAGE_PATH),
            &origin,
        );

        let mut outcome = Ok(());
        share.update_value(|sdk| outcome = sdk.share(&payload));
        if let Err(e) = outcome {
            console::error!(format!("공유 실패: {}", e));
        }
    };

    let ready_view = move || {
        view! {
            <SettleTypeSelector
                selected=current_type
                on_select=move |value: SettleType| dispatch(CheckEvent::SetSettleType(value))
            />

            <h2 class="page-title">"결제내역"</h2>
            <For
                each=move || groups.get()
                key=|group| group.receipt
                children=move |group| view! {
                    <ReceiptDetail
                        group=group
                        session=session.read_only()
                        settle_type=current_type
                        allow_participant_editing=true
                        dispatch=dispatch
                    />
                }
            />

            <div class="grand-total">
                <span>"총액"</span>
                <span>{move || format!("{}원", total())}</span>
            </div>

            <section class="settlement-result">
                <h2>"정산 결과"</h2>
                {move || session.with(|s| match s.result() {
                    Some(result) => result
                        .iter()
                        .map(|(name, amount)| view! {
                            <div class="result-row">
                                <span class="result-name">{name.clone()}</span>
                                <span class="result-amount">{format!("{}원", amount)}</span>
                            </div>
                        })
                        .collect_view()
                        .into_any(),
                    None => view! { <p class="text-muted">"참여자를 지정하면 정산 결과가 표시됩니다"</p> }.into_any(),
                })}
            </section>

            <div class="result-buttons">
                <button class="btn btn-excel" on:click=on_export_excel>"엑셀로 내보내기"</button>
                <button class="btn btn-share" on:click=on_share>"공유하기"</button>
            </div>
        }
    };

    view! {
        <div class="check-page">
            {move || match fetch_state.get() {
                FetchState::Loading => view! { <p class="text-muted">"영수증을 불러오는 중..."</p> }.into_any(),
                FetchState::Failed(_) => view! {
                    <p class="error">"데이터를 불러오지 못했습니다. 잠시 후 다시 시도해 주세요."</p>
                }.into_any(),
                FetchState::Ready => ready_view().into_any(),
            }}

            <button class="btn btn-reset" on:click=move |_| set_page.set(Page::Landing)>
                "처음으로"
            </button>
        </div>
    }
}
