//! 進捗表示（indicatif）

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 読み込み・判定中に回すスピナー
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
