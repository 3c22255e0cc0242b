//! CSV/TSV読み込み

use super::into_table;
use crate::error::Result;
use no_show_common::Table;
use std::path::Path;

pub(super) fn load(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let content = decode_utf8_or_windows_1252(bytes);
    table_from_csv_str(&content)
}

/// UTF-8として読めなければ Windows-1252 とみなす（Excel出力のCSVに多い）
pub fn decode_utf8_or_windows_1252(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// 1列ファイル用の区切り文字（ASCII Unit Separator）
///
/// テキスト中には現れないので、行全体が1フィールドになる。引用符は通常どおり外れる。
const SINGLE_COLUMN_DELIMITER: u8 = 0x1F;

/// 先頭数行で列数が最も安定する区切り文字を選ぶ
///
/// 候補: タブ、セミコロン、カンマ、パイプ。ヘッダーがどれでも2列以上に
/// ならなければ1列ファイルとみなして None。
pub fn sniff_delimiter(content: &str) -> Option<u8> {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return None;
    }

    let mut best = None;
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = Some(delim);
        }
    }

    best
}

/// CSV文字列をテーブルにする（1行目はヘッダー）
pub fn table_from_csv_str(content: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(content).unwrap_or(SINGLE_COLUMN_DELIMITER))
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(into_table(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a;b\n1;2\n"), Some(b';'));
        assert_eq!(sniff_delimiter("a\tb\n1\t2\n"), Some(b'\t'));
        assert_eq!(sniff_delimiter("a,b\n1,2\n"), Some(b','));
        // 1列だけなら区切りなし
        assert_eq!(sniff_delimiter("Texto\nCausa. Motivo. Mascara\n"), None);
        assert_eq!(sniff_delimiter("Texto\nCausa. Motivo. Nome: Ana, Doc: 1\n"), None);
        assert_eq!(sniff_delimiter(""), None);
    }

    #[test]
    fn test_single_column_keeps_unquoted_commas() {
        let table = table_from_csv_str("Texto\nCausa. Motivo. Nome: Ana, Doc: 123\nA; B. C\n").unwrap();
        assert_eq!(table.headers, vec!["Texto"]);
        assert_eq!(table.width(), 1);
        assert_eq!(table.cell(0, 0), Some("Causa. Motivo. Nome: Ana, Doc: 123"));
        assert_eq!(table.cell(1, 0), Some("A; B. C"));
    }

    #[test]
    fn test_single_column_with_commas_in_quotes() {
        let table = table_from_csv_str(
            "Texto\n\"Causa. Motivo. Nome: Ana, Silva\"\n\"Causa. Motivo. Nome: 0\"\n",
        )
        .unwrap();
        assert_eq!(table.headers, vec!["Texto"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some("Causa. Motivo. Nome: Ana, Silva"));
    }

    #[test]
    fn test_semicolon_table() {
        let table = table_from_csv_str("Id;Texto\n1;A. B. C\n2;\n").unwrap();
        assert_eq!(table.headers, vec!["Id", "Texto"]);
        assert_eq!(table.cell(0, 1), Some("A. B. C"));
        assert_eq!(table.cell(1, 1), Some(""));
    }

    #[test]
    fn test_decode_windows_1252() {
        // "Não" in Windows-1252
        let bytes = vec![b'N', 0xE3, b'o'];
        assert_eq!(decode_utf8_or_windows_1252(bytes), "Não");
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = "\u{FEFF}Texto".as_bytes().to_vec();
        assert_eq!(decode_utf8_or_windows_1252(bytes), "Texto");
    }
}
