//! レシート画像のスキャン
//!
//! フォルダ直下の画像を列挙し、内容が同一のファイルは1枚にまとめる。

use crate::error::{PayCheckError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ReceiptImage {
    pub path: PathBuf,
    pub file_name: String,
    /// 内容のSHA-256（16進）
    pub hash: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn hash_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn to_image(path: &Path) -> Result<ReceiptImage> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ReceiptImage {
        path: path.to_path_buf(),
        file_name,
        hash: hash_file(path)?,
    })
}

/// フォルダ直下のレシート画像を列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ReceiptImage>> {
    if !folder.is_dir() {
        return Err(PayCheckError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_image_path(path) {
            images.push(to_image(path)?);
        }
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(dedup_images(images))
}

/// 引数のパス（ファイルまたはフォルダ）からレシート画像を集める
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<ReceiptImage>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            if is_image_path(path) {
                images.push(to_image(path)?);
            } else {
                log::warn!("이미지가 아니므로 건너뜁니다: {}", path.display());
            }
        } else {
            return Err(PayCheckError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(dedup_images(images))
}

/// 同一内容の画像を除く（先に現れたものを残す）
pub fn dedup_images(images: Vec<ReceiptImage>) -> Vec<ReceiptImage> {
    let mut seen = HashSet::new();
    images
        .into_iter()
        .filter(|img| {
            let fresh = seen.insert(img.hash.clone());
            if !fresh {
                log::info!("중복 이미지를 건너뜁니다: {}", img.file_name);
            }
            fresh
        })
        .collect()
}
