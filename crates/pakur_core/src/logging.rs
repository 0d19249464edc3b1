//! Logging setup shared by the desktop app and tests.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Installs a compact fmt subscriber. `RUST_LOG` wins over `level`; both
/// absent means `info`. Calling it again is harmless.
pub fn init_logger(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logger(Some("debug"));
        init_logger(None);
        tracing::info!("logger initialised twice");
    }

    #[test]
    fn garbage_level_falls_back_to_default() {
        init_logger(Some("not a [valid] directive"));
    }
}
