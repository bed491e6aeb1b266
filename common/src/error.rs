//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 通信エラーは各フロントエンド側で扱うので、ここには共通処理の失敗だけを置く
#[derive(Error, Debug)]
pub enum Error {
    #[error("Export error: {0}")]
    Export(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_export() {
        let error = Error::Export("시트 생성 실패".to_string());
        assert_eq!(format!("{}", error), "Export error: 시트 생성 실패");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Export("쓰기 실패".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Export"));
        assert!(debug.contains("쓰기 실패"));
    }
}
