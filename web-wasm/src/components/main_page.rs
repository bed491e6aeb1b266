//! アップロード・設定画面

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paycheck_common::{Roster, SettleType};
use web_sys::File;
use crate::api::backend;
use crate::app::Page;
use crate::components::{
    participant_editor::ParticipantEditor,
    settle_type_selector::SettleTypeSelector,
    upload_area::UploadArea,
};

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn MainPage(set_page: WriteSignal<Page>) -> impl IntoView {
    let (files, set_files) = signal_local(Vec::<File>::new());
    let (roster, set_roster) = signal(Roster::new());
    let (settle_type, set_settle_type) = signal(SettleType::Even);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_files_added = move |new_files: Vec<File>| {
        set_files.update(|f| f.extend(new_files));
    };

    // アップロード → 参加者登録 → 結果画面へ
    let on_submit = move |_| {
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);

        let files = files.get_untracked();
        let roster = roster.get_untracked();
        let settle_type = settle_type.get_untracked();

        spawn_local(async move {
            if !files.is_empty() {
                if let Err(e) = backend::upload_receipts(&files).await {
                    console::error!(format!("영수증 업로드 실패: {}", e));
                    alert("영수증 업로드에 실패했습니다. 다시 시도해 주세요.");
                    set_is_submitting.set(false);
                    return;
                }
            }

            for name in roster.names() {
                if let Err(e) = backend::join(name).await {
                    console::error!(format!("참여자 등록 실패 ({}): {}", name, e));
                }
            }

            set_page.set(Page::Check(settle_type));
        });
    };

    view! {
        <div class="main-page">
            <section class="section">
                <h2>"영수증 이미지 첨부"</h2>
                <UploadArea files=files on_files_added=on_files_added />
            </section>

            <ParticipantEditor roster=roster set_roster=set_roster />

            <SettleTypeSelector
                selected=settle_type
                on_select=move |value: SettleType| set_settle_type.set(value)
            />

            <div class="submit-area">
                <button
                    class="btn btn-paycheck"
                    disabled=move || is_submitting.get()
                    on:click=on_submit
                >
                    {move || if is_submitting.get() { "처리 중..." } else { "PayCheck" }}
                </button>
            </div>
        </div>
    }
}
