//! Excel出力（WASM版）
//!
//! 共通ライブラリで生成したバッファをBlob URL経由でダウンロードさせる

use paycheck_common::export::excel_core::generate_settlement_buffer;
use paycheck_common::CheckSession;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 精算結果をExcelファイルとしてダウンロード
pub fn download_excel(session: &CheckSession, file_name: &str) -> Result<(), String> {
    let bytes = generate_settlement_buffer(session).map_err(|e| e.to_string())?;

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(XLSX_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob 생성 실패: {:?}", e))?;

    let url = Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;
    let result = click_download(&url, file_name);
    // 失敗してもURLは解放する
    let _ = Url::revoke_object_url(&url);
    result
}

fn click_download(url: &str, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document가 없습니다")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|e| format!("{:?}", e))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}
