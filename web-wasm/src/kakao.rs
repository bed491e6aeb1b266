//! Kakao SDK バインディング
//!
//! `window.Kakao` は `ShareSdk` の実装としてのみ触る。

use paycheck_common::share::KAKAO_SDK_URL;
use paycheck_common::{FeedPayload, ShareSdk};
use wasm_bindgen::prelude::*;

const SCRIPT_ID: &str = "kakao-sdk";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Kakao, js_name = "init", catch)]
    fn kakao_init(key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = Kakao, js_name = "isInitialized", catch)]
    fn kakao_is_initialized() -> Result<bool, JsValue>;

    #[wasm_bindgen(js_namespace = ["Kakao", "Link"], js_name = "sendDefault", catch)]
    fn kakao_send_default(payload: &JsValue) -> Result<(), JsValue>;
}

/// SDKスクリプトが読み込まれているか
fn sdk_loaded() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("Kakao")).unwrap_or(false))
        .unwrap_or(false)
}

/// SDKスクリプトを `<head>` に追加（二重追加しない）
pub fn load_script() -> Result<(), String> {
    if sdk_loaded() {
        return Ok(());
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document가 없습니다")?;
    if document.get_element_by_id(SCRIPT_ID).is_some() {
        return Ok(());
    }

    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|e| format!("{:?}", e))?;
    script.set_id(SCRIPT_ID);
    script.set_src(KAKAO_SDK_URL);

    let head = document.head().ok_or("head가 없습니다")?;
    head.append_child(&script).map_err(|e| format!("{:?}", e))?;
    Ok(())
}

/// `window.Kakao` を包む `ShareSdk` 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct KakaoSdk;

impl ShareSdk for KakaoSdk {
    fn init(&mut self, key: &str) -> Result<(), String> {
        if !sdk_loaded() {
            return Err("카카오 SDK가 아직 로드되지 않았습니다".into());
        }
        kakao_init(key).map_err(|e| format!("카카오 초기화 실패: {:?}", e))
    }

    fn is_ready(&self) -> bool {
        sdk_loaded() && kakao_is_initialized().unwrap_or(false)
    }

    fn share(&self, payload: &FeedPayload) -> Result<(), String> {
        let value = serde_wasm_bindgen::to_value(payload).map_err(|e| e.to_string())?;
        kakao_send_default(&value).map_err(|e| format!("카카오 공유 실패: {:?}", e))
    }
}
