//! バックエンドAPI連携
//!
//! すべてのページがこのモジュール経由で `window.fetch` を呼ぶ。
//! 接続先は `PAYCHECK_API_URL`（ビルド時）で差し替えられる。

use paycheck_common::api::{DEFAULT_BASE_URL, UPLOAD_FIELD};
use paycheck_common::{
    AnalyzeResponse, Endpoint, JoinRequest, LineItem, MembersResponse, SettlementRequest,
    SettlementResponse,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

pub fn base_url() -> &'static str {
    option_env!("PAYCHECK_API_URL").unwrap_or(DEFAULT_BASE_URL)
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// リクエスト本体
enum Body<'a> {
    Empty,
    Json(String),
    Form(&'a FormData),
}

/// API呼び出し（共通処理）
async fn call(endpoint: Endpoint, body: Body<'_>) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(endpoint.method().as_str());
    opts.set_mode(RequestMode::Cors);

    let is_json = matches!(body, Body::Json(_));
    match body {
        Body::Empty => {}
        Body::Json(json) => opts.set_body(&JsValue::from_str(&json)),
        // Content-Typeはブラウザがboundary付きで設定する
        Body::Form(form) => opts.set_body(form),
    }

    let request = Request::new_with_str_and_init(&endpoint.url(base_url()), &opts).map_err(js_error)?;
    if is_json {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or("window가 없습니다")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(format!("API 오류 ({}): {}", resp.status(), endpoint.path()));
    }
    Ok(resp)
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// サーバー側のレシート・参加者データを全削除
pub async fn clear_all_data() -> Result<(), String> {
    call(Endpoint::ClearAllData, Body::Empty).await.map(|_| ())
}

/// レシート画像をまとめてアップロード
pub async fn upload_receipts(files: &[File]) -> Result<(), String> {
    let form = FormData::new().map_err(js_error)?;
    for file in files {
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(js_error)?;
    }
    call(Endpoint::Upload, Body::Form(&form)).await.map(|_| ())
}

pub async fn join(name: &str) -> Result<(), String> {
    let body = serde_json::to_string(&JoinRequest { name }).map_err(|e| e.to_string())?;
    call(Endpoint::Join, Body::Json(body)).await.map(|_| ())
}

pub async fn members() -> Result<Vec<String>, String> {
    let resp = call(Endpoint::Members, Body::Empty).await?;
    let members: MembersResponse = read_json(resp).await?;
    Ok(members.names())
}

pub async fn analyze() -> Result<Vec<LineItem>, String> {
    let resp = call(Endpoint::Analyze, Body::Empty).await?;
    let analyzed: AnalyzeResponse = read_json(resp).await?;
    Ok(analyzed.results)
}

pub async fn calculate(request: &SettlementRequest) -> Result<SettlementResponse, String> {
    let body = serde_json::to_string(request).map_err(|e| e.to_string())?;
    let resp = call(Endpoint::Calculate, Body::Json(body)).await?;
    read_json(resp).await
}
