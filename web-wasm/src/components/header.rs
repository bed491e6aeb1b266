//! ヘッダー・フッター付きレイアウト

use leptos::prelude::*;
use crate::app::Page;

#[component]
pub fn Header(set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <nav class="header">
            <div class="header-logo" on:click=move |_| set_page.set(Page::Landing)>
                <img src="/barcode.svg" alt="바코드 로고" class="header-barcode" />
                <h1>"PayCheck"</h1>
            </div>
        </nav>
    }
}

#[component]
pub fn Layout(set_page: WriteSignal<Page>, children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <Header set_page=set_page />
            <main class="content">{children()}</main>
            <footer class="footer">
                <span>"ChillGuys!"</span>
            </footer>
        </div>
    }
}
