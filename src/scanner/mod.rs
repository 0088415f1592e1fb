//! 画像ファイルの検出と読み込み

use crate::error::{CounterAiError, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// 送信用の画像データ
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// 表示・通知用のラベル（ファイル名）
    pub label: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

fn image_info(path: &Path) -> Option<ImageInfo> {
    let ext = path.extension()?.to_string_lossy();
    if !is_image_extension(&ext) {
        return None;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Some(ImageInfo {
        path: path.to_path_buf(),
        file_name,
    })
}

pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(CounterAiError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| image_info(e.path()))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// ファイル・フォルダの混在指定を画像一覧に展開（指定順を保つ）
pub fn scan_paths(paths: &[PathBuf], recursive: bool) -> Result<Vec<ImageInfo>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path, recursive)?);
        } else if path.is_file() {
            match image_info(path) {
                Some(info) => images.push(info),
                None => tracing::warn!(path = %path.display(), "画像以外のファイルをスキップ"),
            }
        } else {
            return Err(CounterAiError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}

/// 画像を読み込み、長辺が `max_size` を超える場合はJPEGに縮小
pub fn load_payload(info: &ImageInfo, max_size: u32) -> Result<ImagePayload> {
    let bytes = std::fs::read(&info.path)?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| CounterAiError::ImageLoad(format!("{}: {}", info.file_name, e)))?;
    let (width, height) = decoded.dimensions();

    if max_size == 0 || width.max(height) <= max_size {
        return Ok(ImagePayload {
            label: info.file_name.clone(),
            mime_type: mime_type_for(&info.path).to_string(),
            bytes,
        });
    }

    let resized = decoded.resize(max_size, max_size, FilterType::Triangle);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .map_err(|e| CounterAiError::ImageLoad(format!("{}: {}", info.file_name, e)))?;

    tracing::debug!(
        file = %info.file_name,
        from = %format!("{}x{}", width, height),
        to = %format!("{}x{}", rgb.width(), rgb.height()),
        "画像を縮小"
    );

    Ok(ImagePayload {
        label: info.file_name.clone(),
        mime_type: "image/jpeg".to_string(),
        bytes: buffer,
    })
}
