//! Excel生成（rust_xlsxwriter）
//!
//! 1シートに元の列＋判定列を書き出す。
//! ヘッダー固定・オートフィルタ付き、No-show行は薄い赤で塗る。

use super::ResultSheet;
use crate::error::Result;
use no_show_common::Status;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::Path;

/// 列幅の上限（文字数）
const MAX_COL_WIDTH: usize = 60;
const MIN_COL_WIDTH: usize = 8;

/// 列幅を内容から決める
pub fn column_widths(sheet: &ResultSheet) -> Vec<f64> {
    sheet
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = sheet
                .rows
                .iter()
                .filter_map(|r| r.get(col))
                .map(|v| v.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH) as f64
        })
        .collect()
}

pub fn generate_excel(sheet: &ResultSheet, output_path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(sheet, sheet_name)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(sheet: &ResultSheet, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let no_show_format = Format::new().set_background_color(Color::RGB(0xF8D7DA));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        let no_show = sheet.statuses.get(i) == Some(&Status::NoShowTechnical);

        for (col, value) in row.iter().enumerate() {
            if no_show {
                worksheet.write_string_with_format(row_num, col as u16, value, &no_show_format)?;
            } else {
                worksheet.write_string(row_num, col as u16, value)?;
            }
        }
    }

    for (col, width) in column_widths(sheet).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }

    if !sheet.headers.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, sheet.rows.len() as u32, (sheet.headers.len() - 1) as u16)?;
    }

    Ok(workbook.save_to_buffer()?)
}
