use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`counter-ai config --set-api-key YOUR_KEY` または環境変数 GOOGLE_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("収支記録エラー: {0}")]
    Ledger(String),

    #[error("機種が見つかりません: {0}")]
    UnknownMachineModel(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error(transparent)]
    Common(#[from] counter_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, CounterAiError>;
