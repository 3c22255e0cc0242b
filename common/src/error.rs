//! エラー型定義
//!
//! 照合エンジン自体は行単位で必ず結果を返すため、
//! ここに現れるのは列指定の解決失敗だけ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列番号が範囲外です: {index} (列数: {width})")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    #[error("テーブルに列がありません")]
    EmptyTable,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_column_not_found() {
        let error = Error::ColumnNotFound("Causa".to_string());
        assert_eq!(format!("{}", error), "列が見つかりません: Causa");
    }

    #[test]
    fn test_error_display_out_of_range() {
        let error = Error::ColumnIndexOutOfRange { index: 4, width: 2 };
        let display = format!("{}", error);
        assert!(display.contains('4'));
        assert!(display.contains('2'));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::ColumnNotFound("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("ColumnNotFound"));
        assert!(debug.contains("テスト"));
    }
}
