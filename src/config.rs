use crate::error::{Result, ValidatorError};
use no_show_common::{Status, ValidationOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "NO_SHOW_VALIDATOR_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 一致時のラベル
    pub match_label: String,
    /// No-show時のラベル
    pub no_show_label: String,
    /// Excel出力のシート名
    pub sheet_name: String,
    /// Causa/Motivo/Mascara の抽出列を出力に含める
    pub include_extracted: bool,
    /// この行数以上で並列判定
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_label: Status::MatchOk.default_label().into(),
            no_show_label: Status::NoShowTechnical.default_label().into(),
            sheet_name: "Resultado".into(),
            include_extracted: true,
            parallel_threshold: ValidationOptions::default().parallel_threshold,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| ValidatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("no-show-validator").join("config.json"))
    }

    /// ステータスの表示ラベル
    pub fn label(&self, status: Status) -> &str {
        match status {
            Status::MatchOk => &self.match_label,
            Status::NoShowTechnical => &self.no_show_label,
        }
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            parallel_threshold: self.parallel_threshold,
        }
    }

    pub fn set_labels(&mut self, match_label: Option<String>, no_show_label: Option<String>) -> Result<()> {
        for label in [&match_label, &no_show_label].into_iter().flatten() {
            if label.trim().is_empty() {
                return Err(ValidatorError::Config("ラベルは空にできません".into()));
            }
        }
        if let Some(label) = match_label {
            self.match_label = label;
        }
        if let Some(label) = no_show_label {
            self.no_show_label = label;
        }
        self.save()
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) -> Result<()> {
        self.parallel_threshold = threshold;
        self.save()
    }
}
