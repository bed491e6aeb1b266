//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::Result;
use paycheck_common::export::excel_core::generate_settlement_buffer;
use paycheck_common::CheckSession;
use std::path::Path;

pub fn generate_excel(session: &CheckSession, output_path: &Path) -> Result<()> {
    let buffer = generate_settlement_buffer(session)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, buffer)?;
    log::info!("Excel written: {}", output_path.display());
    Ok(())
}
