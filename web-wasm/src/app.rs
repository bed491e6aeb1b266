//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    check_page::CheckPage,
    header::Layout,
    landing::LandingPage,
    main_page::MainPage,
};
use paycheck_common::SettleType;

/// 表示中の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Main,
    /// 結果画面（選択された精算方式を引き継ぐ）
    Check(SettleType),
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Landing);

    view! {
        {move || match page.get() {
            Page::Landing => view! { <LandingPage set_page=set_page /> }.into_any(),
            Page::Main => view! {
                <Layout set_page=set_page>
                    <MainPage set_page=set_page />
                </Layout>
            }.into_any(),
            Page::Check(settle_type) => view! {
                <Layout set_page=set_page>
                    <CheckPage settle_type=settle_type set_page=set_page />
                </Layout>
            }.into_any(),
        }}
    }
}
