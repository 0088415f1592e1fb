//! 診断ログの初期化
//!
//! 進捗表示は標準出力、診断ログは tracing で標準エラーへ出す。

use tracing_subscriber::EnvFilter;

/// ログフィルタを決定（RUST_LOG > --verbose > 設定ファイル）
pub fn resolve_filter(verbose: bool, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose { "debug" } else { configured };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn init(verbose: bool, configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
