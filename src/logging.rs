//! ログ初期化
//!
//! 画面向けの進捗表示は println のまま。`tracing` のイベント
//! （重複キー警告、フォールバック、件数など）は stderr に出す。
//!
//! - 既定: warn
//! - `-v`: debug
//! - `RUST_LOG` が設定されていればそちらを優先

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time();

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
