//! 実戦収支の記録ファイル (.xlsx)
//!
//! 1行1記録。追記は全行を読み直し、同じフォルダの一時ファイルに
//! 書き出してから置き換える。

use crate::error::{CounterAiError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Local, NaiveDate};
use counter_ai_common::{SessionRecord, SettingGuess};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::{Path, PathBuf};

const SHEET_NAME: &str = "records";

pub const HEADER: &[&str] = &[
    "日付", "ホール名", "台番", "機種", "設定推測", "投資", "回収", "差枚", "メモ", "登録日時",
];

/// 入力値から記録を作成（日付を検証し、登録日時を付与）
#[allow(clippy::too_many_arguments)]
pub fn new_session_record(
    date: &str,
    hall: &str,
    machine_no: &str,
    machine_model: &str,
    setting_guess: SettingGuess,
    invest: u32,
    payout: u32,
    memo: &str,
) -> Result<SessionRecord> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| CounterAiError::Ledger(format!("日付が不正です ({}): {}", date, e)))?;

    Ok(SessionRecord {
        date: date.format("%Y-%m-%d").to_string(),
        hall: hall.trim().to_string(),
        machine_no: machine_no.trim().to_string(),
        machine_model: machine_model.to_string(),
        setting_guess,
        invest,
        payout,
        memo: memo.to_string(),
        recorded_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn ledger_error(e: XlsxError) -> CounterAiError {
    CounterAiError::Ledger(e.to_string())
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn cell_count(cell: Option<&Data>, row: usize, column: &str) -> Result<u32> {
    let invalid = || CounterAiError::Ledger(format!("{}行目の{}が数値ではありません", row + 1, column));
    match cell {
        Some(Data::Float(f)) if *f >= 0.0 && f.fract() == 0.0 => Ok(*f as u32),
        Some(Data::Int(i)) => u32::try_from(*i).map_err(|_| invalid()),
        Some(Data::String(s)) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub struct SessionLedger {
    path: PathBuf,
}

impl SessionLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 書き込み途中のファイル（置き換え前）
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// 全記録を読み込む（ファイルが無ければ空）
    pub fn read_all(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e: calamine::XlsxError| CounterAiError::Ledger(e.to_string()))?;
        let range = workbook
            .worksheet_range(SHEET_NAME)
            .map_err(|e| CounterAiError::Ledger(e.to_string()))?;

        let mut records = Vec::new();
        for (i, row) in range.rows().enumerate().skip(1) {
            if row.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            let setting = cell_text(row.get(4));
            records.push(SessionRecord {
                date: cell_text(row.first()),
                hall: cell_text(row.get(1)),
                machine_no: cell_text(row.get(2)),
                machine_model: cell_text(row.get(3)),
                setting_guess: setting.parse().unwrap_or_default(),
                invest: cell_count(row.get(5), i, HEADER[5])?,
                payout: cell_count(row.get(6), i, HEADER[6])?,
                memo: cell_text(row.get(8)),
                recorded_at: cell_text(row.get(9)),
            });
        }

        Ok(records)
    }

    /// 1件追記
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());
        self.write_all(&records)
    }

    fn write_all(&self, records: &[SessionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(ledger_error)?;

        let header = Format::new().set_bold();
        for (col, title) in HEADER.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *title, &header)
                .map_err(ledger_error)?;
        }

        for (i, r) in records.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_string(row, 0, &r.date).map_err(ledger_error)?;
            worksheet.write_string(row, 1, &r.hall).map_err(ledger_error)?;
            worksheet.write_string(row, 2, &r.machine_no).map_err(ledger_error)?;
            worksheet.write_string(row, 3, &r.machine_model).map_err(ledger_error)?;
            worksheet
                .write_string(row, 4, r.setting_guess.label())
                .map_err(ledger_error)?;
            worksheet
                .write_number(row, 5, f64::from(r.invest))
                .map_err(ledger_error)?;
            worksheet
                .write_number(row, 6, f64::from(r.payout))
                .map_err(ledger_error)?;
            worksheet
                .write_number(row, 7, r.profit() as f64)
                .map_err(ledger_error)?;
            worksheet.write_string(row, 8, &r.memo).map_err(ledger_error)?;
            worksheet.write_string(row, 9, &r.recorded_at).map_err(ledger_error)?;
        }

        let staging = self.staging_path();
        if let Err(e) = workbook.save(&staging) {
            let _ = std::fs::remove_file(&staging);
            return Err(ledger_error(e));
        }
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_record_validates_date() {
        let record = new_session_record(
            "2026-10-18", " 駅前店 ", "123", "マイジャグラーV", SettingGuess::High, 500, 1350, "",
        )
        .unwrap();
        assert_eq!(record.date, "2026-10-18");
        assert_eq!(record.hall, "駅前店");
        assert_eq!(record.profit(), 850);
        assert_eq!(record.recorded_at.len(), "2026-10-18 00:00:00".len());

        let invalid = new_session_record(
            "10/18", "駅前店", "123", "マイジャグラーV", SettingGuess::Unknown, 0, 0, "",
        );
        assert!(matches!(invalid, Err(CounterAiError::Ledger(_))));
    }

    fn sample(hall: &str) -> SessionRecord {
        new_session_record("2026-10-18", hall, "123", "マイジャグラーV", SettingGuess::Unknown, 500, 700, "")
            .unwrap()
    }

    #[test]
    fn test_append_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SessionLedger::new(dir.path().join("db.xlsx"));
        ledger.append(&sample("駅前店")).unwrap();
        ledger.append(&sample("北口店")).unwrap();

        assert_eq!(ledger.read_all().unwrap().len(), 2);
        assert_eq!(ledger.staging_path(), dir.path().join("db.xlsx.tmp"));
        assert!(!ledger.staging_path().exists());
    }

    #[test]
    fn test_failed_save_keeps_existing_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SessionLedger::new(dir.path().join("db.xlsx"));
        ledger.append(&sample("駅前店")).unwrap();

        // 一時ファイルの位置をフォルダで塞いで保存を失敗させる
        std::fs::create_dir(ledger.staging_path()).unwrap();
        assert!(ledger.append(&sample("北口店")).is_err());

        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hall, "駅前店");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(Some(&Data::Float(123.0))), "123");
        assert_eq!(cell_text(Some(&Data::String("A".into()))), "A");
        assert_eq!(cell_text(None), "");
    }
}
