//! フィールド名エイリアス
//!
//! AIの出力はキー名が揺れる（日本語/英語、略称）。
//! 論理フィールドごとに受け付けるキー名を優先順で持ち、
//! 最初に見つかったキーの値を採用する。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 論理フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 台番号
    SlotLabel,
    /// 累計回転数
    CumulativeSpins,
    /// BB回数
    BigBonus,
    /// RB回数
    RegularBonus,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::SlotLabel,
        Field::CumulativeSpins,
        Field::BigBonus,
        Field::RegularBonus,
    ];
}

/// 論理フィールドごとのキー名エイリアス表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub slot_label: Vec<String>,
    pub cumulative_spins: Vec<String>,
    pub big_bonus: Vec<String>,
    pub regular_bonus: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        fn owned(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|k| k.to_string()).collect()
        }

        Self {
            slot_label: owned(&["台番号", "台番", "slot", "machine"]),
            cumulative_spins: owned(&["累計", "総回転", "total", "games"]),
            big_bonus: owned(&["BB", "big"]),
            regular_bonus: owned(&["RB", "REG", "reg"]),
        }
    }
}

impl FieldAliases {
    /// 組み込みの表だけを持つ空の追加設定
    pub fn empty() -> Self {
        Self {
            slot_label: Vec::new(),
            cumulative_spins: Vec::new(),
            big_bonus: Vec::new(),
            regular_bonus: Vec::new(),
        }
    }

    /// JSON文字列から読み込み（未指定フィールドは組み込み値）
    pub fn from_json(json: &str) -> Result<Self> {
        let aliases: Self = serde_json::from_str(json)?;
        Ok(aliases)
    }

    pub fn keys(&self, field: Field) -> &[String] {
        match field {
            Field::SlotLabel => &self.slot_label,
            Field::CumulativeSpins => &self.cumulative_spins,
            Field::BigBonus => &self.big_bonus,
            Field::RegularBonus => &self.regular_bonus,
        }
    }

    fn keys_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::SlotLabel => &mut self.slot_label,
            Field::CumulativeSpins => &mut self.cumulative_spins,
            Field::BigBonus => &mut self.big_bonus,
            Field::RegularBonus => &mut self.regular_bonus,
        }
    }

    /// 追加エイリアスを後ろに連結（既存キーは優先順を保ったまま）
    pub fn merge(&mut self, other: &FieldAliases) {
        for field in Field::ALL {
            for key in other.keys(field) {
                let keys = self.keys_mut(field);
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
    }

    /// オブジェクトから最初に存在するエイリアスの値を取得
    pub fn lookup<'a>(&self, object: &'a Map<String, Value>, field: Field) -> Option<&'a Value> {
        self.keys(field).iter().find_map(|key| object.get(key))
    }
}
