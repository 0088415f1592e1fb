//! 機種プロファイル
//!
//! 機種名 → REGボーダー（1/N のN）の読み取り専用テーブル。
//! 起動時に一度だけ組み立て、判定時に明示的に渡す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 機種ごとの判定ボーダー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineModelProfile {
    pub name: String,
    /// REG確率 1/N のN。これ以下なら高設定目安
    pub rb_threshold: u32,
}

impl MachineModelProfile {
    pub fn new(name: impl Into<String>, rb_threshold: u32) -> Self {
        Self {
            name: name.into(),
            rb_threshold,
        }
    }
}

/// 組み込みの機種テーブル
const BUILTIN_PROFILES: &[(&str, u32)] = &[
    ("アイムジャグラーEX(6号機)", 300),
    ("マイジャグラーV", 270),
    ("ファンキージャグラー2", 300),
    ("ハッピージャグラーV III", 280),
    ("ゴーゴージャグラー3", 250),
];

/// 機種プロファイル表（宣言順を保持）
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    profiles: Vec<MachineModelProfile>,
}

impl ProfileTable {
    /// プロファイル一覧から作成（名前の重複・ボーダー0はエラー）
    pub fn new(profiles: Vec<MachineModelProfile>) -> Result<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(Error::Config("機種名が空です".into()));
            }
            if profile.rb_threshold == 0 {
                return Err(Error::Config(format!(
                    "ボーダーは1以上にしてください: {}",
                    profile.name
                )));
            }
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(Error::Config(format!("機種名が重複しています: {}", profile.name)));
            }
        }
        Ok(Self { profiles })
    }

    /// 組み込みテーブル
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN_PROFILES
                .iter()
                .map(|&(name, border)| MachineModelProfile::new(name, border))
                .collect(),
        }
    }

    /// 組み込みテーブルに設定ファイルの機種を重ねる
    ///
    /// 同名の機種はボーダーを上書きし、新しい機種は末尾に追加する。
    pub fn with_overrides(overrides: &[MachineModelProfile]) -> Result<Self> {
        let mut profiles = Self::builtin().profiles;
        for extra in overrides {
            match profiles.iter_mut().find(|p| p.name == extra.name) {
                Some(existing) => existing.rb_threshold = extra.rb_threshold,
                None => profiles.push(extra.clone()),
            }
        }
        Self::new(profiles)
    }

    pub fn get(&self, name: &str) -> Option<&MachineModelProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MachineModelProfile> {
        self.profiles.iter()
    }

    /// 既定の機種（先頭）
    pub fn first(&self) -> Option<&MachineModelProfile> {
        self.profiles.first()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}
