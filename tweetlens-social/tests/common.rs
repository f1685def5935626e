use std::path::PathBuf;
use std::sync::OnceLock;

use tweetlens_common::observability::{LogConfig, init_logging};

static LOG_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Route extractor events at `trace` level into a file under the system temp dir.
///
/// Returns the log file when the subscriber could be installed.
pub fn init_test_tracing() -> Option<&'static PathBuf> {
    LOG_FILE
        .get_or_init(|| {
            init_logging(LogConfig {
                app_name: "tweetlens-social-tests",
                log_dir: Some(std::env::temp_dir().join("tweetlens-social-tests")),
                default_filter: "tweetlens_social=trace".to_string(),
                ..LogConfig::default()
            })
            .ok()
        })
        .as_ref()
}
