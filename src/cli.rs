use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "no-show")]
#[command(about = "プロバイダ入力マスクのNo-show技術判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// エクスポートをカタログと照合して結果を出力
    Validate {
        /// エクスポートファイル (xlsx/csv): 1列に "Causa. Motivo. Mascara"
        #[arg(required = true)]
        export: PathBuf,

        /// カタログファイル (xlsx/csv): 1列に "Causa. Motivo. MascaraModelo"
        #[arg(required = true)]
        catalog: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: カレントに resultado_validacion_no_show.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (excel/csv/json)。省略時は出力ファイルの拡張子から判定
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// エクスポートの列（ヘッダー名、または #N で N 列目）
        #[arg(long)]
        export_column: Option<String>,

        /// カタログの列（ヘッダー名、または #N で N 列目）
        #[arg(long)]
        catalog_column: Option<String>,

        /// エクスポートのシート名（Excelのみ）
        #[arg(long)]
        export_sheet: Option<String>,

        /// カタログのシート名（Excelのみ）
        #[arg(long)]
        catalog_sheet: Option<String>,

        /// Causa/Motivo/Mascara の抽出列を出力しない
        #[arg(long)]
        no_extracted: bool,

        /// No-show行が1件でもあれば終了コード1
        #[arg(long)]
        fail_on_no_show: bool,
    },

    /// カタログのルール一覧を表示
    Rules {
        /// カタログファイル
        #[arg(required = true)]
        catalog: PathBuf,

        /// カタログの列
        #[arg(long)]
        catalog_column: Option<String>,

        /// カタログのシート名
        #[arg(long)]
        catalog_sheet: Option<String>,
    },

    /// 1件の文字列を判定
    Check {
        /// カタログファイル
        #[arg(required = true)]
        catalog: PathBuf,

        /// 判定する文字列 "Causa. Motivo. Mascara"
        #[arg(required = true)]
        text: String,

        /// カタログの列
        #[arg(long)]
        catalog_column: Option<String>,

        /// カタログのシート名
        #[arg(long)]
        catalog_sheet: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 一致時のラベルを設定
        #[arg(long)]
        set_match_label: Option<String>,

        /// No-show時のラベルを設定
        #[arg(long)]
        set_no_show_label: Option<String>,

        /// 並列判定を始める行数を設定
        #[arg(long)]
        set_parallel_threshold: Option<usize>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// 出力パスの拡張子から判定（不明ならExcel）
    pub fn from_output_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use excel, csv, or json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_from_output_path() {
        assert_eq!(ExportFormat::from_output_path(Path::new("r.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_output_path(Path::new("r.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_output_path(Path::new("out")), ExportFormat::Excel);
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = Cli::try_parse_from([
            "no-show",
            "validate",
            "export.xlsx",
            "regras.csv",
            "--export-column",
            "#2",
            "-f",
            "json",
            "--fail-on-no-show",
        ])
        .unwrap();

        match cli.command {
            Commands::Validate {
                export_column,
                format,
                fail_on_no_show,
                no_extracted,
                ..
            } => {
                assert_eq!(export_column.as_deref(), Some("#2"));
                assert_eq!(format, Some(ExportFormat::Json));
                assert!(fail_on_no_show);
                assert!(!no_extracted);
            }
            _ => panic!("validate として解析されるべき"),
        }
    }
}
