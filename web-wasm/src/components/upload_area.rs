//! アップロードエリアコンポーネント

use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

fn files_of(list: FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn UploadArea<F>(
    files: ReadSignal<Vec<File>, LocalStorage>,
    on_files_added: F,
) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let on_drop = {
        let on_files_added = on_files_added.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
                on_files_added(files_of(list));
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // 隠しinputでファイル選択ダイアログを開く
    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            on_files_added(files_of(list));
        }
        // 同じファイルを再選択できるようにする
        input.set_value("");
    };

    view! {
        <input
            node_ref=input_ref
            type="file"
            accept="image/*"
            multiple=true
            class="hidden"
            on:change=on_change
        />
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <img src="/add.svg" alt="이미지 추가" class="upload-icon" />
            <Show
                when=move || !files.with(|f| f.is_empty())
                fallback=|| view! { <p>"이미지를 첨부하세요"</p> }
            >
                <p>{move || format!("영수증 {}장 선택됨", files.with(|f| f.len()))}</p>
                <ul class="file-list">
                    {move || files.with(|f| {
                        f.iter()
                            .map(|file| view! { <li>{file.name()}</li> })
                            .collect_view()
                    })}
                </ul>
            </Show>
        </div>
    }
}
