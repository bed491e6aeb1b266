//! バックエンドとやり取りする型の定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - LineItem: 解析済みレシートの品目1行
//! - Member: 登録済み参加者
//! - SettlementRequest / SettlementResponse: 精算計算API

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// レシートID（バックエンドの整数ID）
pub type ReceiptId = i64;

/// 精算結果（参加者名 → 負担額）
pub type SettlementResult = BTreeMap<String, i64>;

/// 解析済みの品目1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: i64,
    pub store_name: String,
    pub item_name: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub quantity: i64,
    #[serde(deserialize_with = "lenient_amount")]
    pub unit_price: i64,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_amount: i64,
    /// 親となるレシートのID
    pub receipt: ReceiptId,
}

/// OCR結果の数値は整数とは限らないので、小数は四捨五入して受ける（nullは0）
fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Int(n)) => n,
        Some(Amount::Float(f)) => f.round() as i64,
        None => 0,
    })
}

/// `GET /api/receiptinfo/analyze/` のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub results: Vec<LineItem>,
}

/// 登録済み参加者
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: i64,
    pub name: String,
}

/// `GET /api/participant/members/` のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MembersResponse {
    pub data: Vec<Member>,
}

impl MembersResponse {
    /// 参加者名だけを取り出す（API順）
    pub fn names(&self) -> Vec<String> {
        self.data.iter().map(|m| m.name.clone()).collect()
    }
}

/// `POST /api/participant/join/` のリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequest<'a> {
    pub name: &'a str,
}

/// 精算方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SettleType {
    /// 1/N 精算（全員で均等割り）
    #[default]
    Even,
    /// 品目別精算
    Item,
}

impl SettleType {
    /// API上のmethod文字列
    pub fn method(&self) -> &'static str {
        match self {
            SettleType::Even => "equal",
            SettleType::Item => "item",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            SettleType::Even => "1/N 정산",
            SettleType::Item => "항목별 정산",
        }
    }
}

impl std::str::FromStr for SettleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "even" | "equal" | "1/n" => Ok(SettleType::Even),
            "item" | "items" => Ok(SettleType::Item),
            _ => Err(format!("Unknown settle type: {}. Use even or item", s)),
        }
    }
}

impl std::fmt::Display for SettleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettleType::Even => write!(f, "even"),
            SettleType::Item => write!(f, "item"),
        }
    }
}

/// 品目ごとの参加者（精算リクエスト用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub item_name: String,
    pub participants: Vec<String>,
}

/// レシートごとの精算リクエスト要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptEntry {
    pub receipt_id: ReceiptId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemEntry>,
}

/// `POST /api/settlement/calculate/` のリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    pub receipts: Vec<ReceiptEntry>,
}

/// `POST /api/settlement/calculate/` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettlementResponse {
    pub success: bool,
    pub message: String,
    pub result: SettlementResult,
}
