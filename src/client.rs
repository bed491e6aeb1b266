//! バックエンドHTTPクライアント
//!
//! すべてのAPI呼び出しはこの1つの `BackendClient` を通す。

use crate::config::Config;
use crate::error::{PayCheckError, Result};
use crate::scanner::ReceiptImage;
use paycheck_common::api::UPLOAD_FIELD;
use paycheck_common::{
    AnalyzeResponse, Endpoint, JoinRequest, LineItem, MembersResponse, SettlementRequest,
    SettlementResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, endpoint: Endpoint) -> RequestBuilder {
        let url = endpoint.url(&self.base_url);
        log::debug!("{} {}", endpoint.method().as_str(), url);
        match endpoint.method() {
            paycheck_common::Method::Get => self.http.get(url),
            paycheck_common::Method::Post => self.http.post(url),
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PayCheckError::Api { status: status.as_u16(), message })
    }

    /// 全データ初期化
    pub async fn clear_all_data(&self) -> Result<()> {
        let response = self.request(Endpoint::ClearAllData).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// レシート画像をまとめてアップロード（フィールド名 `image` を繰り返す）
    pub async fn upload_images(&self, images: &[ReceiptImage]) -> Result<()> {
        let mut form = Form::new();
        for image in images {
            let bytes = tokio::fs::read(&image.path).await?;
            let part = Part::bytes(bytes)
                .file_name(image.file_name.clone())
                .mime_str(mime_for(&image.file_name))?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self.request(Endpoint::Upload).multipart(form).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// 参加者を1人登録
    pub async fn join(&self, name: &str) -> Result<()> {
        let response = self
            .request(Endpoint::Join)
            .json(&JoinRequest { name })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// 登録済み参加者の名前一覧
    pub async fn members(&self) -> Result<Vec<String>> {
        let response = self.request(Endpoint::Members).send().await?;
        let body: MembersResponse = Self::check(response).await?.json().await?;
        Ok(body.names())
    }

    /// 解析済み品目
    pub async fn analyze(&self) -> Result<Vec<LineItem>> {
        let response = self.request(Endpoint::Analyze).send().await?;
        let body: AnalyzeResponse = Self::check(response).await?.json().await?;
        Ok(body.results)
    }

    /// 精算計算
    pub async fn calculate(&self, request: &SettlementRequest) -> Result<SettlementResponse> {
        let response = self.request(Endpoint::Calculate).json(request).send().await?;
        let body: SettlementResponse = Self::check(response).await?.json().await?;
        Ok(body)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    if file_name.to_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("receipt.PNG"), "image/png");
        assert_eq!(mime_for("receipt.jpg"), "image/jpeg");
        assert_eq!(mime_for("receipt.jpeg"), "image/jpeg");
    }

    #[test]
    fn test_client_keeps_base_url() {
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }
}
