//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use counter_ai_rust::config::Config;
use counter_ai_rust::error::CounterAiError;
use counter_ai_rust::scanner;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result.unwrap_err(), CounterAiError::FolderNotFound(_)));
}

/// 画像のないフォルダは空のVec
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_paths(&[dir.path().to_path_buf()], false);
    assert!(result.unwrap().is_empty());
}

/// 存在しないファイル指定
#[test]
fn test_scan_missing_file() {
    let result = scanner::scan_paths(&[PathBuf::from("/nonexistent/board.jpg")], false);
    assert!(matches!(result.unwrap_err(), CounterAiError::FileNotFound(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CounterAiError::JsonParse(_))));
}

/// ボーダー0の機種は設定エラー
#[test]
fn test_config_with_zero_threshold() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"machine_models": [{"name": "X", "rb_threshold": 0}]}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(matches!(config.profile_table(), Err(CounterAiError::Common(_))));
}

/// CounterAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CounterAiError::Config("テスト設定エラー".to_string()),
        CounterAiError::FileNotFound("test.jpg".to_string()),
        CounterAiError::FolderNotFound("/path/to/folder".to_string()),
        CounterAiError::ApiCall("API呼び出し失敗".to_string()),
        CounterAiError::ExcelGeneration("Excel生成エラー".to_string()),
        CounterAiError::Ledger("記録エラー".to_string()),
        CounterAiError::UnknownMachineModel("謎の機種".to_string()),
        CounterAiError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }

    assert!(CounterAiError::MissingApiKey.to_string().contains("GOOGLE_API_KEY"));
}

/// 共通ライブラリのエラーは透過的に表示
#[test]
fn test_common_error_transparent() {
    let err: CounterAiError = counter_ai_common::Error::Parse("壊れた表".into()).into();
    assert_eq!(err.to_string(), "Parse error: 壊れた表");
}
