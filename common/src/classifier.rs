//! RB確率による判定
//!
//! 累計回転数 / RB回数 を機種ごとのボーダーと比較して3段階に分類する。
//! ボーダーは呼び出し側が機種プロファイルから渡す。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 確率が計算できないときの値（並べ替えで最下位になる）
pub const UNDEFINED_RATIO: f64 = 9999.0;

/// ボーダーに対するチャンス帯の倍率
pub const CHANCE_BAND: f64 = 1.1;

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// ボーダー以下
    Hot,
    /// ボーダーの1.1倍以内
    Chance,
    Neutral,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Hot => "🔥 激アツ",
            Status::Chance => "✨ チャンス",
            Status::Neutral => "☁️",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// RB確率の分母を計算して判定
///
/// 回転数・RB回数のどちらかが0以下（-1センチネルを含む）なら
/// 確率は [`UNDEFINED_RATIO`]。
///
/// # Examples
/// ```
/// use counter_ai_common::{classify, Status};
///
/// assert_eq!(classify(250, 1, 300), (250.0, Status::Hot));
/// assert_eq!(classify(310, 1, 300), (310.0, Status::Chance));
/// ```
pub fn classify(cumulative_spins: i64, regular_bonus_count: i64, threshold: u32) -> (f64, Status) {
    let ratio = if cumulative_spins > 0 && regular_bonus_count > 0 {
        cumulative_spins as f64 / regular_bonus_count as f64
    } else {
        UNDEFINED_RATIO
    };

    let border = f64::from(threshold);
    let status = if ratio <= border {
        Status::Hot
    } else if ratio <= border * CHANCE_BAND {
        Status::Chance
    } else {
        Status::Neutral
    };

    (ratio, status)
}
