use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（xlsx/xls/xlsb/ods/csv/tsv に対応）")]
    UnsupportedFormat(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("列の選択に失敗: {0}")]
    ColumnSelection(String),

    #[error(transparent)]
    Common(#[from] no_show_common::Error),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
