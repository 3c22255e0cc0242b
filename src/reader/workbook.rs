//! Excel/ODS読み込み（calamine）

use super::into_table;
use crate::error::{Result, ValidatorError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use no_show_common::Table;
use std::path::Path;

pub(super) fn load(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(ValidatorError::SheetNotFound(name.to_string()));
            }
            workbook.worksheet_range(name)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ValidatorError::SheetNotFound("(先頭シート)".into()))??,
    };

    Ok(table_from_range(&range))
}

/// ブック内のシート名一覧
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names())
}

/// calamineのRangeをテーブルにする
pub fn table_from_range(range: &Range<Data>) -> Table {
    let records = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    into_table(records)
}

/// セル値を文字列にする（空セル・エラーセルは空文字）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // 整数は小数点なしで表示
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::String("A. B. C".into())), "A. B. C");
        assert_eq!(cell_to_string(&Data::Float(12.0)), "12");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_table_from_range() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Id".into()));
        range.set_value((0, 1), Data::String("Texto".into()));
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((1, 1), Data::String("A. B. C".into()));
        range.set_value((2, 0), Data::Float(2.0));

        let table = table_from_range(&range);
        assert_eq!(table.headers, vec!["Id", "Texto"]);
        assert_eq!(table.rows, vec![vec!["1", "A. B. C"], vec!["2", ""]]);
    }
}
