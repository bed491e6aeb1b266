//! ランディング画面

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api::backend;
use crate::app::Page;

#[component]
pub fn LandingPage(set_page: WriteSignal<Page>) -> impl IntoView {
    // 表示時に一度だけサーバーのデータを初期化（結果は待たない）
    spawn_local(async {
        if let Err(e) = backend::clear_all_data().await {
            console::error!(format!("데이터 초기화 실패: {}", e));
        }
    });

    view! {
        <div class="landing">
            <span class="landing-catch">"나만의 회계 비서,"</span>
            <img src="/logo.svg" alt="logo" class="landing-logo" />
            <button class="btn btn-primary btn-start" on:click=move |_| set_page.set(Page::Main)>
                "시작하기"
            </button>
            <div class="landing-footer">
                <img src="/barcode.svg" alt="barcode" class="landing-barcode" />
                <span>"ChillGuys!"</span>
            </div>
        </div>
    }
}
