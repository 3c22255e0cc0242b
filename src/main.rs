use anyhow::Context;
use clap::Parser;
use no_show_common::{classify_detailed, validate_tables, RuleIndex, Table, ValidationSummary};
use no_show_validator::progress::spinner;
use no_show_validator::{cli, column_selector, config, export, logging, reader};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Validate {
            export,
            catalog,
            output,
            format,
            export_column,
            catalog_column,
            export_sheet,
            catalog_sheet,
            no_extracted,
            fail_on_no_show,
        } => {
            println!("🔎 no-show - マスク検証\n");

            // 1. 読み込み
            println!("[1/3] ファイルを読み込み中...");
            let pb = spinner("読み込み中...");
            let export_table = load(&export, export_sheet.as_deref())?;
            let catalog_table = load(&catalog, catalog_sheet.as_deref())?;
            pb.finish_and_clear();
            println!(
                "✔ エクスポート {}行 / カタログ {}行\n",
                export_table.len(),
                catalog_table.len()
            );

            let export_col = column_selector::choose_column(&export_table, export_column.as_deref(), "エクスポート")?;
            let catalog_col = column_selector::choose_column(&catalog_table, catalog_column.as_deref(), "カタログ")?;

            // 2. 判定
            println!("[2/3] 判定中...");
            let pb = spinner("判定中...");
            let report = validate_tables(
                &catalog_table,
                &catalog_col,
                &export_table,
                &export_col,
                &config.validation_options(),
            )?;
            pb.finish_and_clear();
            print_summary(&report.summary, &config);
            for dup in &report.duplicates {
                println!(
                    "⚠ 重複キー {}: {}行目が{}行目で上書きされました",
                    dup.key,
                    dup.first_row + 1,
                    dup.overwritten_by_row + 1
                );
            }

            // 3. 出力
            println!("\n[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let format = format.unwrap_or_else(|| ExportFormat::from_output_path(&output));
            let include_extracted = config.include_extracted && !no_extracted;
            let path = export::export_results(&export_table, &report, &format, &output, &config, include_extracted)?;
            println!("✔ {}出力: {}", format, path.display());

            println!("\n✅ 検証完了");

            if fail_on_no_show && report.summary.no_show > 0 {
                std::process::exit(1);
            }
        }

        Commands::Rules {
            catalog,
            catalog_column,
            catalog_sheet,
        } => {
            let index = load_index(&catalog, catalog_column.as_deref(), catalog_sheet.as_deref())?;

            println!("📋 ルール一覧 ({}件)\n", index.len());
            for (key, rule) in index.iter() {
                let template = &rule.template;
                println!("{} [{}行目]", key, rule.row + 1);
                println!("  モデル: {}", template.source());
                match template.pattern() {
                    Some(pattern) => println!("  パターン: {}", pattern),
                    None => println!("  パターン: (文字列比較)"),
                }
                if template.is_fallback() {
                    println!("  ⚠ パターン生成に失敗したためリテラル一致");
                } else if template.placeholder_count() == 0 {
                    println!("  ⚠ プレースホルダ('0')がありません（完全一致のみ）");
                }
            }

            if index.skipped_rows() > 0 {
                println!("\n空セル {}行をスキップ", index.skipped_rows());
            }
            for dup in index.duplicates() {
                println!(
                    "⚠ 重複キー {}: {}行目が{}行目で上書きされました",
                    dup.key,
                    dup.first_row + 1,
                    dup.overwritten_by_row + 1
                );
            }
        }

        Commands::Check {
            catalog,
            text,
            catalog_column,
            catalog_sheet,
        } => {
            let index = load_index(&catalog, catalog_column.as_deref(), catalog_sheet.as_deref())?;
            let c = classify_detailed(&text, &index);

            println!("Causa:   {}", c.parsed.cause);
            println!("Motivo:  {}", c.parsed.reason);
            println!("Mascara: {}", c.parsed.mask);
            println!("結果:    {}", config.label(c.result.status));
            if !c.result.is_match() {
                println!("詳細:    {}", c.result.detail_text());
            }
            if !c.filled.is_empty() {
                println!("入力値:  {}", c.filled.join(" | "));
            }
        }

        Commands::Config {
            show,
            set_match_label,
            set_no_show_label,
            set_parallel_threshold,
        } => {
            let mut config = config;

            if set_match_label.is_some() || set_no_show_label.is_some() {
                config.set_labels(set_match_label, set_no_show_label)?;
                println!("✔ ラベルを設定しました");
            }

            if let Some(threshold) = set_parallel_threshold {
                config.set_parallel_threshold(threshold)?;
                println!("✔ 並列判定の閾値を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  一致ラベル: {}", config.match_label);
                println!("  No-showラベル: {}", config.no_show_label);
                println!("  シート名: {}", config.sheet_name);
                println!("  抽出列: {}", if config.include_extracted { "出力する" } else { "出力しない" });
                println!("  並列判定の閾値: {}行", config.parallel_threshold);
            }
        }
    }

    Ok(())
}

fn load(path: &Path, sheet: Option<&str>) -> anyhow::Result<Table> {
    reader::load_table(path, sheet).with_context(|| format!("読み込みに失敗: {}", path.display()))
}

fn load_index(path: &Path, column: Option<&str>, sheet: Option<&str>) -> anyhow::Result<RuleIndex> {
    let table = load(path, sheet)?;
    let selector = column_selector::choose_column(&table, column, "カタログ")?;
    let col = selector.resolve(&table.headers)?;
    Ok(RuleIndex::build(table.column_values(col)))
}

fn print_summary(summary: &ValidationSummary, config: &Config) {
    println!("✔ 判定完了 ({}行)", summary.total);
    println!("  {}: {}", config.match_label, summary.matched);
    println!("  {}: {}", config.no_show_label, summary.no_show);
    if summary.no_show > 0 {
        println!("    - テンプレートなし: {}", summary.missing_template);
        println!("    - 未入力の'0': {}", summary.unfilled_placeholder);
        println!("    - 不一致: {}", summary.template_mismatch);
    }
    println!("  一致率: {:.1}%", summary.match_rate() * 100.0);
}
