pub mod excel;

use crate::error::Result;
use counter_ai_common::{Highlight, PresentedRecord};
use std::path::Path;

/// 表の列見出し
pub const COLUMNS: &[&str] = &["台番号", "総回転", "BB", "RB", "REG確率", "判定", "担当AI"];

/// 1行分のセル文字列
pub fn row_cells(record: &PresentedRecord) -> Vec<String> {
    vec![
        record.slot_label.clone(),
        record.cumulative_spins.to_string(),
        record.big_bonus_count.to_string(),
        record.regular_bonus_count.to_string(),
        record.reg_probability_display.clone(),
        record.status.to_string(),
        record.served_by_backend.clone().unwrap_or_default(),
    ]
}

pub fn write_json(records: &[PresentedRecord], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 端末向けの表を組み立てる
pub fn render_table(records: &[PresentedRecord]) -> String {
    if records.is_empty() {
        return "結果がありません".to_string();
    }

    let mut lines = vec![format!("   {}", COLUMNS.join(" | "))];
    for record in records {
        let marker = match record.highlight {
            Highlight::Strong => "!!",
            Highlight::Light => " *",
            Highlight::None => "  ",
        };
        lines.push(format!("{} {}", marker, row_cells(record).join(" | ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use counter_ai_common::Status;

    fn presented(label: &str, highlight: Highlight) -> PresentedRecord {
        PresentedRecord {
            slot_label: label.into(),
            cumulative_spins: 2500,
            big_bonus_count: 9,
            regular_bonus_count: 10,
            reg_probability_display: "1/250.0".into(),
            status: Status::Hot,
            served_by_backend: Some("gemini-1.5-flash".into()),
            highlight,
        }
    }

    #[test]
    fn test_row_cells() {
        let cells = row_cells(&presented("101", Highlight::Strong));
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "101");
        assert_eq!(cells[4], "1/250.0");
        assert_eq!(cells[5], "🔥 激アツ");
        assert_eq!(cells[6], "gemini-1.5-flash");
    }

    #[test]
    fn test_render_table_marks_highlight() {
        let table = render_table(&[presented("101", Highlight::Strong), presented("102", Highlight::None)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("!! 101"));
        assert!(lines[2].starts_with("   102"));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "結果がありません");
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&[presented("101", Highlight::Strong)], &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["slotLabel"], "101");
        assert!(value[0].get("sortKey").is_none());
    }
}
