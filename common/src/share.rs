//! チャット共有SDK（Kakao）の抽象化
//!
//! SDK本体はグローバルオブジェクトなので、`ShareSdk` トレイトの裏に隠し、
//! 初期化は `LazyShare` が一度だけ行う。

use crate::types::SettlementResult;
use serde::Serialize;

/// SDKのスクリプトURL
pub const KAKAO_SDK_URL: &str = "https://developers.kakao.com/sdk/js/kakao.js";

/// KakaoのJavaScriptアプリキー
pub const KAKAO_APP_KEY: &str = "c4913a27ee144670505405de9ee16631";

/// 共有ボタンのラベル
pub const SHARE_BUTTON_TITLE: &str = "웹으로 보기";

/// フィードのタイトル
pub const SHARE_TITLE: &str = "PayCheck 정산 결과";

/// サムネイル画像のパス（サイトのルートから）
pub const SHARE_IMAGE_PATH: &str = "/logo.png";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub mobile_web_url: String,
    pub web_url: String,
}

impl ShareLink {
    pub fn same(url: &str) -> Self {
        Self { mobile_web_url: url.to_string(), web_url: url.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: ShareLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedButton {
    pub title: String,
    pub link: ShareLink,
}

/// フィード形式の共有ペイロード
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPayload {
    pub object_type: String,
    pub content: FeedContent,
    pub buttons: Vec<FeedButton>,
}

impl FeedPayload {
    pub fn new(title: &str, description: &str, image_url: &str, link_url: &str) -> Self {
        Self {
            object_type: "feed".to_string(),
            content: FeedContent {
                title: title.to_string(),
                description: description.to_string(),
                image_url: image_url.to_string(),
                link: ShareLink::same(link_url),
            },
            buttons: vec![FeedButton {
                title: SHARE_BUTTON_TITLE.to_string(),
                link: ShareLink::same(link_url),
            }],
        }
    }
}

/// 精算結果を共有用の一行にまとめる
///
/// 結果が無い場合は案内文を返す。
pub fn settlement_description(result: Option<&SettlementResult>) -> String {
    match result {
        Some(result) if !result.is_empty() => result
            .iter()
            .map(|(name, amount)| format!("{} {}원", name, amount))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "정산 결과를 확인해 보세요".to_string(),
    }
}

/// 共有SDKの機能
pub trait ShareSdk {
    /// アプリキーで初期化
    fn init(&mut self, key: &str) -> Result<(), String>;
    /// 初期化済みか
    fn is_ready(&self) -> bool;
    /// 共有シートを開く
    fn share(&self, payload: &FeedPayload) -> Result<(), String>;
}

/// 初回の共有時に一度だけ初期化するラッパー
pub struct LazyShare<S: ShareSdk> {
    sdk: S,
    key: String,
}

impl<S: ShareSdk> LazyShare<S> {
    pub fn new(sdk: S, key: &str) -> Self {
        Self { sdk, key: key.to_string() }
    }

    /// 未初期化なら初期化する（何度呼んでもよい）
    pub fn ensure_ready(&mut self) -> Result<(), String> {
        if !self.sdk.is_ready() {
            self.sdk.init(&self.key)?;
        }
        Ok(())
    }

    pub fn share(&mut self, payload: &FeedPayload) -> Result<(), String> {
        self.ensure_ready()?;
        self.sdk.share(payload)
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSdk {
        ready: bool,
        init_calls: usize,
        shared: std::cell::RefCell<Vec<FeedPayload>>,
    }

    impl ShareSdk for FakeSdk {
        fn init(&mut self, key: &str) -> Result<(), String> {
            assert_eq!(key, KAKAO_APP_KEY);
            self.init_calls += 1;
            self.ready = true;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn share(&self, payload: &FeedPayload) -> Result<(), String> {
            self.shared.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    #[test]
    fn test_init_once() {
        let mut share = LazyShare::new(FakeSdk::default(), KAKAO_APP_KEY);
        let payload = FeedPayload::new("PayCheck", "정산 결과", "https://example.com/a.png", "https://example.com");

        share.share(&payload).unwrap();
        share.share(&payload).unwrap();
        share.ensure_ready().unwrap();

        assert_eq!(share.sdk().init_calls, 1);
        assert_eq!(share.sdk().shared.borrow().len(), 2);
    }

    #[test]
    fn test_settlement_description() {
        let mut result = SettlementResult::new();
        result.insert("모수진".into(), 6500);
        result.insert("하승연".into(), 6500);
        assert_eq!(settlement_description(Some(&result)), "모수진 6500원, 하승연 6500원");
        assert_eq!(settlement_description(None), "정산 결과를 확인해 보세요");
        assert_eq!(settlement_description(Some(&SettlementResult::new())), "정산 결과를 확인해 보세요");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = FeedPayload::new("T", "D", "https://img", "https://link");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["objectType"], "feed");
        assert_eq!(json["content"]["imageUrl"], "https://img");
        assert_eq!(json["content"]["link"]["mobileWebUrl"], "https://link");
        assert_eq!(json["buttons"][0]["title"], SHARE_BUTTON_TITLE);
        assert_eq!(json["buttons"][0]["link"]["webUrl"], "https://link");
    }
}
