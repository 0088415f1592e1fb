//! 実戦記録と集計
//!
//! ホールでの1回分の投資・回収を記録し、通算収支・勝率を求める。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 設定推測
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SettingGuess {
    #[default]
    Unknown,
    Low,
    Middle,
    High,
    ConfirmedSix,
}

impl SettingGuess {
    pub const ALL: [SettingGuess; 5] = [
        SettingGuess::Unknown,
        SettingGuess::Low,
        SettingGuess::Middle,
        SettingGuess::High,
        SettingGuess::ConfirmedSix,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingGuess::Unknown => "不明",
            SettingGuess::Low => "低設定(1-3)",
            SettingGuess::Middle => "中間(4)",
            SettingGuess::High => "高設定(5-6)",
            SettingGuess::ConfirmedSix => "設定6確定",
        }
    }
}

impl fmt::Display for SettingGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SettingGuess {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(guess) = Self::ALL.iter().find(|g| g.label() == s) {
            return Ok(*guess);
        }
        match s.to_lowercase().as_str() {
            "unknown" | "" => Ok(SettingGuess::Unknown),
            "low" => Ok(SettingGuess::Low),
            "middle" | "mid" | "4" => Ok(SettingGuess::Middle),
            "high" => Ok(SettingGuess::High),
            "six" | "6" => Ok(SettingGuess::ConfirmedSix),
            _ => Err(Error::Parse(format!("設定推測が不正です: {}", s))),
        }
    }
}

/// 実戦1回分の記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// 実戦日 (YYYY-MM-DD)
    pub date: String,
    pub hall: String,
    pub machine_no: String,
    pub machine_model: String,
    pub setting_guess: SettingGuess,
    /// 投資枚数
    pub invest: u32,
    /// 回収枚数
    pub payout: u32,
    pub memo: String,
    /// 登録日時 (YYYY-MM-DD HH:MM:SS)
    pub recorded_at: String,
}

impl SessionRecord {
    /// 差枚
    pub fn profit(&self) -> i64 {
        i64::from(self.payout) - i64::from(self.invest)
    }
}

/// 通算の集計値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub total_profit: i64,
    /// 勝率 (%)
    pub win_rate: f64,
    pub count: usize,
}

impl SessionSummary {
    /// 記録が無ければ `None`
    pub fn from_records(records: &[SessionRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total_profit = records.iter().map(SessionRecord::profit).sum();
        let wins = records.iter().filter(|r| r.profit() > 0).count();

        Some(Self {
            total_profit,
            win_rate: wins as f64 / records.len() as f64 * 100.0,
            count: records.len(),
        })
    }
}
