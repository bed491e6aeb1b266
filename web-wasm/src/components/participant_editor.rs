//! 参加者リスト編集

use leptos::prelude::*;
use paycheck_common::Roster;
use web_sys::KeyboardEvent;

#[component]
pub fn ParticipantEditor(
    roster: ReadSignal<Roster>,
    set_roster: WriteSignal<Roster>,
) -> impl IntoView {
    let (input, set_input) = signal(String::new());

    // 追加できた時だけ入力欄を空にする
    let add = move || {
        let mut added = false;
        set_roster.update(|r| added = r.add(&input.get_untracked()));
        if added {
            set_input.set(String::new());
        }
    };

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            add();
        }
    };

    view! {
        <section class="section">
            <h2>"참여자 리스트"</h2>
            <div class="participant-input">
                <input
                    type="text"
                    placeholder="참여자 이름 입력"
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="btn btn-primary" type="button" on:click=move |_| add()>
                    "추가"
                </button>
            </div>
            <div class="participant-list">
                <For
                    each=move || roster.get().names().to_vec()
                    key=|name| name.clone()
                    children=move |name| {
                        let target = name.clone();
                        view! {
                            <span class="tag">
                                <span class="tag-name">{name}</span>
                                <button
                                    class="tag-remove"
                                    type="button"
                                    aria-label="참여자 삭제"
                                    on:click=move |_| set_roster.update(|r| r.remove(&target))
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }
                />
            </div>
        </section>
    }
}
