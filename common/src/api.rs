//! バックエンドAPIのエンドポイント定義
//!
//! CLI(reqwest)とWeb(fetch)の両方がこの表を参照する。

/// デフォルトのバックエンドURL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 画像アップロードのmultipartフィールド名
pub const UPLOAD_FIELD: &str = "image";

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// バックエンドのエンドポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// 全データ初期化（ランディング表示時）
    ClearAllData,
    /// レシート画像アップロード（multipart）
    Upload,
    /// 参加者登録
    Join,
    /// 参加者一覧
    Members,
    /// 解析済み品目一覧
    Analyze,
    /// 精算計算
    Calculate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ClearAllData => "/api/receipt/clear_all_data/",
            Endpoint::Upload => "/api/receipt/upload/",
            Endpoint::Join => "/api/participant/join/",
            Endpoint::Members => "/api/participant/members/",
            Endpoint::Analyze => "/api/receiptinfo/analyze/",
            Endpoint::Calculate => "/api/settlement/calculate/",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Members | Endpoint::Analyze => Method::Get,
            _ => Method::Post,
        }
    }

    /// ベースURLと結合した完全なURL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}
