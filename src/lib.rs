//! No-show Validator
//!
//! 判定エンジン（no-show-common）に、ファイル入出力・CLI・設定・ログを付けたもの。

pub mod cli;
pub mod column_selector;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod progress;
pub mod reader;

pub use no_show_common as common;
