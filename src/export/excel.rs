//! Excel出力
//!
//! 解析結果を1シートの表として書き出す。判定に応じて行を色付けする。

use super::{row_cells, COLUMNS};
use crate::error::{CounterAiError, Result};
use counter_ai_common::{Highlight, PresentedRecord};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "解析結果";

fn excel_error(e: XlsxError) -> CounterAiError {
    CounterAiError::ExcelGeneration(e.to_string())
}

fn row_format(highlight: Highlight) -> Format {
    match highlight {
        Highlight::Strong => Format::new()
            .set_background_color(Color::RGB(0xFFCCCC))
            .set_font_color(Color::Red)
            .set_bold(),
        Highlight::Light => Format::new()
            .set_background_color(Color::RGB(0xFFFFCC))
            .set_font_color(Color::Black),
        Highlight::None => Format::new(),
    }
}

pub fn generate_excel(records: &[PresentedRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(excel_error)?;

    let header = Format::new().set_bold();
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header)
            .map_err(excel_error)?;
        worksheet.set_column_width(col as u16, 14).map_err(excel_error)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let format = row_format(record.highlight);
        let numbers = [
            record.cumulative_spins,
            record.big_bonus_count,
            record.regular_bonus_count,
        ];

        for (col, cell) in row_cells(record).iter().enumerate() {
            let col16 = col as u16;
            match col {
                1..=3 => worksheet
                    .write_number_with_format(row, col16, numbers[col - 1] as f64, &format)
                    .map_err(excel_error)?,
                _ => worksheet
                    .write_string_with_format(row, col16, cell, &format)
                    .map_err(excel_error)?,
            };
        }
    }

    workbook.save(output_path).map_err(excel_error)?;
    Ok(())
}
