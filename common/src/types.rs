//! 解析結果の型定義
//!
//! - RawFieldSet: AI出力の1行分（未検証の値）
//! - MachineRecord: 正規化・判定済みの1台分

use crate::alias::{Field, FieldAliases};
use crate::classifier::{classify, Status};
use crate::numeric::{normalize, UNREADABLE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 台番号が読めなかったときの表示
pub const UNKNOWN_SLOT: &str = "不明";

/// AI出力1行分の生フィールド
///
/// 各フィールドはエイリアス解決済みで、どのキーも無ければ `None`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFieldSet {
    pub slot_label: Option<Value>,
    pub cumulative_spins: Option<Value>,
    pub big_bonus: Option<Value>,
    pub regular_bonus: Option<Value>,
}

impl RawFieldSet {
    /// JSONオブジェクトからエイリアス表に従って取り出す
    pub fn from_object(object: &Map<String, Value>, aliases: &FieldAliases) -> Self {
        let pick = |field| aliases.lookup(object, field).cloned();
        Self {
            slot_label: pick(Field::SlotLabel),
            cumulative_spins: pick(Field::CumulativeSpins),
            big_bonus: pick(Field::BigBonus),
            regular_bonus: pick(Field::RegularBonus),
        }
    }

    /// 件数フィールドを正規化（キーが無ければ -1）
    pub fn count(&self, field: Field) -> i64 {
        let value = match field {
            Field::CumulativeSpins => &self.cumulative_spins,
            Field::BigBonus => &self.big_bonus,
            Field::RegularBonus => &self.regular_bonus,
            Field::SlotLabel => return UNREADABLE,
        };
        value.as_ref().map(normalize).unwrap_or(UNREADABLE)
    }

    /// 台番号を文字列化
    pub fn slot_label(&self) -> String {
        match &self.slot_label {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => UNKNOWN_SLOT.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// 正規化・判定済みの台データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRecord {
    pub slot_label: String,
    pub cumulative_spins: i64,
    pub big_bonus_count: i64,
    pub regular_bonus_count: i64,
    /// "1/272.5" 形式、RBが0以下なら "-"
    pub reg_probability_display: String,
    pub status: Status,
    /// RB確率の分母（小さいほど良い）
    pub sort_key: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_by_backend: Option<String>,
}

impl MachineRecord {
    /// 生フィールドを正規化し、ボーダーで判定して組み立てる
    pub fn assemble(raw: &RawFieldSet, threshold: u32, served_by: Option<&str>) -> Self {
        let cumulative_spins = raw.count(Field::CumulativeSpins);
        let regular_bonus_count = raw.count(Field::RegularBonus);
        let (ratio, status) = classify(cumulative_spins, regular_bonus_count, threshold);

        Self {
            slot_label: raw.slot_label(),
            cumulative_spins,
            big_bonus_count: raw.count(Field::BigBonus),
            regular_bonus_count,
            reg_probability_display: format_reg_probability(ratio, regular_bonus_count),
            status,
            sort_key: ratio,
            served_by_backend: served_by.map(str::to_string),
        }
    }
}

/// RB確率の表示文字列
pub fn format_reg_probability(ratio: f64, regular_bonus_count: i64) -> String {
    if regular_bonus_count > 0 {
        format!("1/{:.1}", ratio)
    } else {
        "-".to_string()
    }
}
