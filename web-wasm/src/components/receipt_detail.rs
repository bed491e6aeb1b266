//! レシート明細コンポーネント
//!
//! 1/N精算と品目別精算の両方をこの1つで表示する。
//! 品目別かつ `allow_participant_editing` の時だけ参加者の入力欄を出す。

use leptos::prelude::*;
use paycheck_common::{CheckEvent, CheckSession, ItemKey, LineItem, ReceiptGroup, SettleType};
use web_sys::{HtmlInputElement, KeyboardEvent};

#[component]
pub fn ReceiptDetail<F>(
    group: ReceiptGroup,
    session: ReadSignal<CheckSession>,
    #[prop(into)] settle_type: Signal<SettleType>,
    allow_participant_editing: bool,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(CheckEvent) + 'static + Clone + Send + Sync,
{
    let editable = move || allow_participant_editing && settle_type.get() == SettleType::Item;
    let store_name = group.store_name().to_string();
    let receipt = group.receipt;

    let rows = group
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            view! {
                <ItemRow
                    item_key=ItemKey::new(receipt, index)
                    item=item
                    session=session
                    editable=Signal::derive(editable)
                    dispatch=dispatch.clone()
                />
            }
        })
        .collect_view();

    view! {
        <div class="receipt-detail">
            <h3 class="store-name">{store_name}</h3>
            <table class="receipt-items">
                <thead>
                    <tr>
                        <th>"품목"</th>
                        <th>"수량"</th>
                        <th>"금액"</th>
                        <th>"참여자"</th>
                    </tr>
                </thead>
                {rows}
            </table>
        </div>
    }
}

#[component]
fn ItemRow<F>(
    item_key: ItemKey,
    item: LineItem,
    session: ReadSignal<CheckSession>,
    editable: Signal<bool>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(CheckEvent) + 'static + Clone + Send + Sync,
{
    let key = item_key;
    let participants = move || session.with(|s| s.display_participants(key));
    let error = move || session.with(|s| s.item_error(key).map(|e| e.message()));

    let on_keydown = {
        let dispatch = dispatch.clone();
        move |ev: KeyboardEvent| {
            if ev.key() != "Enter" {
                return;
            }
            let input: HtmlInputElement = event_target(&ev);
            dispatch(CheckEvent::AddParticipant { key, name: input.value() });
            // 名簿にない名前は入力を残して修正できるようにする
            if session.with_untracked(|s| s.item_error(key).is_none()) {
                input.set_value("");
            }
        }
    };

    let on_input = {
        let dispatch = dispatch.clone();
        move |_: web_sys::Event| {
            if session.with_untracked(|s| s.item_error(key).is_some()) {
                dispatch(CheckEvent::InputChanged(key));
            }
        }
    };

    let tags = move || {
        let dispatch = dispatch.clone();
        participants()
            .into_iter()
            .map(|name| {
                let dispatch = dispatch.clone();
                let target = name.clone();
                view! {
                    <span class="tag">
                        <span class="tag-name">{name}</span>
                        <button
                            class="tag-remove"
                            type="button"
                            aria-label="참여자 삭제"
                            on:click=move |_| dispatch(CheckEvent::RemoveParticipant {
                                key,
                                name: target.clone(),
                            })
                        >
                            "×"
                        </button>
                    </span>
                }
            })
            .collect_view()
    };

    view! {
        <tbody>
            <tr class="item-row">
                <td>{item.item_name.clone()}</td>
                <td>{item.quantity}</td>
                <td>{item.total_amount}</td>
                <td class="participants">
                    <Show
                        when=move || editable.get()
                        fallback=move || view! { <span>{move || participants().join(", ")}</span> }
                    >
                        <input
                            type="text"
                            placeholder="참여자 추가"
                            on:keydown=on_keydown.clone()
                            on:input=on_input.clone()
                        />
                    </Show>
                </td>
            </tr>
            <Show when=move || editable.get() && !participants().is_empty()>
                <tr class="tag-row">
                    <td colspan="4">
                        <div class="tags">{tags.clone()}</div>
                    </td>
                </tr>
            </Show>
            {move || error().map(|message| view! {
                <tr class="error-row">
                    <td colspan="4" class="item-error">{message}</td>
                </tr>
            })}
        </tbody>
    }
}
