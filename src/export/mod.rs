pub mod excel;

use std::path::{Path, PathBuf};

/// 出力先がフォルダ（または拡張子なし）ならタイムスタンプ付きファイル名を付ける
pub fn output_path_for(output: &Path, title: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        output.join(format!("{}-{}.xlsx", title, stamp))
    } else {
        output.to_path_buf()
    }
}
