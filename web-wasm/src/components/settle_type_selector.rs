//! 精算方式の選択ボタン

use leptos::prelude::*;
use paycheck_common::SettleType;

#[component]
pub fn SettleTypeSelector<F>(
    #[prop(into)] selected: Signal<SettleType>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(SettleType) + 'static + Clone,
{
    let button = move |value: SettleType, on_select: F| {
        view! {
            <button
                type="button"
                class=move || {
                    if selected.get() == value { "btn btn-settle selected" } else { "btn btn-settle" }
                }
                on:click=move |_| on_select(value)
            >
                {value.label()}
            </button>
        }
    };

    view! {
        <section class="section">
            <h2>"정산 방식 선택"</h2>
            <div class="settle-buttons">
                {button(SettleType::Even, on_select.clone())}
                {button(SettleType::Item, on_select)}
            </div>
        </section>
    }
}
