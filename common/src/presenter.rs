//! 表示用の整形
//!
//! 結果をRB確率の良い順に並べ、並べ替えキーを外して
//! 行ごとのハイライト指定を付ける。I/Oは行わない。

use crate::classifier::Status;
use crate::types::MachineRecord;
use serde::{Deserialize, Serialize};

/// 行ハイライト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// 行全体を強調（赤背景・太字）
    Strong,
    /// 控えめな強調（黄背景）
    Light,
    None,
}

/// 表示オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentOptions {
    /// チャンス行を控えめに強調する
    pub highlight_chance: bool,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            highlight_chance: true,
        }
    }
}

/// 表示層へ渡す1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedRecord {
    pub slot_label: String,
    pub cumulative_spins: i64,
    pub big_bonus_count: i64,
    pub regular_bonus_count: i64,
    pub reg_probability_display: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_by_backend: Option<String>,
    pub highlight: Highlight,
}

/// 判定からハイライトを決定
pub fn highlight_for(status: Status, options: PresentOptions) -> Highlight {
    match status {
        Status::Hot => Highlight::Strong,
        Status::Chance if options.highlight_chance => Highlight::Light,
        _ => Highlight::None,
    }
}

/// 結果を並べ替えて表示用に変換
///
/// 並べ替えは安定ソートなので、同じ確率の行は元の順序を保つ。
pub fn present(records: Vec<MachineRecord>, options: PresentOptions) -> Vec<PresentedRecord> {
    let mut records = records;
    records.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));

    records
        .into_iter()
        .map(|r| PresentedRecord {
            highlight: highlight_for(r.status, options),
            slot_label: r.slot_label,
            cumulative_spins: r.cumulative_spins,
            big_bonus_count: r.big_bonus_count,
            regular_bonus_count: r.regular_bonus_count,
            reg_probability_display: r.reg_probability_display,
            status: r.status,
            served_by_backend: r.served_by_backend,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::types::format_reg_probability;

    fn record(label: &str, total: i64, rb: i64) -> MachineRecord {
        let (ratio, status) = classify(total, rb, 300);
        MachineRecord {
            slot_label: label.to_string(),
            cumulative_spins: total,
            big_bonus_count: 0,
            regular_bonus_count: rb,
            reg_probability_display: format_reg_probability(ratio, rb),
            status,
            sort_key: ratio,
            served_by_backend: None,
        }
    }

    #[test]
    fn test_present_sorts_ascending_and_stable() {
        let records = vec![
            record("a", 0, 0),
            record("b", 250, 1),
            record("c", -1, -1),
            record("d", 310, 1),
        ];
        let presented = present(records, PresentOptions::default());
        let labels: Vec<&str> = presented.iter().map(|r| r.slot_label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_present_highlights() {
        let records = vec![record("hot", 250, 1), record("chance", 310, 1), record("n", 400, 1)];
        let presented = present(records, PresentOptions::default());
        assert_eq!(presented[0].highlight, Highlight::Strong);
        assert_eq!(presented[1].highlight, Highlight::Light);
        assert_eq!(presented[2].highlight, Highlight::None);
    }

    #[test]
    fn test_present_without_chance_highlight() {
        let options = PresentOptions {
            highlight_chance: false,
        };
        let presented = present(vec![record("chance", 310, 1)], options);
        assert_eq!(presented[0].status, Status::Chance);
        assert_eq!(presented[0].highlight, Highlight::None);
    }

    #[test]
    fn test_presented_shape_has_no_sort_key() {
        let presented = present(vec![record("x", 250, 1)], PresentOptions::default());
        let value = serde_json::to_value(&presented[0]).unwrap();
        assert!(value.get("sortKey").is_none());
        assert_eq!(value["highlight"], "strong");
        assert_eq!(value["regProbabilityDisplay"], "1/250.0");
    }

    #[test]
    fn test_present_empty() {
        assert!(present(Vec::new(), PresentOptions::default()).is_empty());
    }
}
