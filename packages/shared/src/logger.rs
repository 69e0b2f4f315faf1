//! Logging setup utilities for the Tandem matchmaking server.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Every crate in `targets` gets `default_log_level`; the `RUST_LOG`
/// environment variable overrides the whole filter when set.
///
/// # Arguments
///
/// * `targets` - Crate or binary names to enable (e.g. `["tandem_server"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tandem_shared::logger::setup_logger;
///
/// setup_logger(&["tandem_server", "tower_http"], "info");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| build_default_filter(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_default_filter(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_filter_normalizes_crate_names() {
        // テスト項目: ハイフンを含むクレート名がアンダースコアに正規化される
        // given (前提条件):
        let targets = ["tandem-server", "tower_http"];

        // when (操作):
        let filter = build_default_filter(&targets, "debug");

        // then (期待する結果):
        assert_eq!(filter, "tandem_server=debug,tower_http=debug");
    }

    #[test]
    fn test_build_default_filter_with_no_targets() {
        // テスト項目: 対象が空の場合は空のフィルタになる
        // given (前提条件):
        let targets: [&str; 0] = [];

        // when (操作):
        let filter = build_default_filter(&targets, "info");

        // then (期待する結果):
        assert!(filter.is_empty());
    }
}
