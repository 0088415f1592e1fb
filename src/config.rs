use crate::error::{CounterAiError, Result};
use counter_ai_common::{FieldAliases, MachineModelProfile, ProfileTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 既定のバックエンド候補（先頭から順に試す）
pub const DEFAULT_BACKENDS: &[&str] = &[
    "gemini-2.0-flash-exp",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
    "gemini-2.0-flash",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub backends: Vec<String>,
    /// 画像ごとの待機時間（ミリ秒）
    pub pacing_ms: u64,
    pub timeout_seconds: u64,
    /// アップロード前に縮小する長辺ピクセル数
    pub max_image_size: u32,
    pub default_machine_model: Option<String>,
    pub ledger_path: Option<PathBuf>,
    pub log_filter: String,
    /// 組み込み機種表への追加・上書き
    pub machine_models: Vec<MachineModelProfile>,
    /// キー名エイリアスの追加分
    pub extra_aliases: Option<FieldAliases>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            backends: DEFAULT_BACKENDS.iter().map(|b| b.to_string()).collect(),
            pacing_ms: 1000,
            timeout_seconds: 120,
            max_image_size: 1568,
            default_machine_model: None,
            ledger_path: None,
            log_filter: "warn".into(),
            machine_models: Vec::new(),
            extra_aliases: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.backends.is_empty() {
            return Err(CounterAiError::Config("backends が空です".into()));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CounterAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("counter-ai"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        for var in ["GOOGLE_API_KEY", "GEMINI_API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CounterAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 組み込み機種表に設定ファイルの機種を重ねた表
    pub fn profile_table(&self) -> Result<ProfileTable> {
        Ok(ProfileTable::with_overrides(&self.machine_models)?)
    }

    /// 組み込みエイリアスに追加分を連結した表
    pub fn field_aliases(&self) -> FieldAliases {
        let mut aliases = FieldAliases::default();
        if let Some(extra) = &self.extra_aliases {
            aliases.merge(extra);
        }
        aliases
    }

    /// 収支記録ファイルの場所
    pub fn ledger_path(&self) -> Result<PathBuf> {
        match &self.ledger_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("juggler_db.xlsx")),
        }
    }
}
