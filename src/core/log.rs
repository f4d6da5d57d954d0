use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Logs go to stderr so command output on stdout stays pipeable.
///
/// A valid `RUST_LOG` decides on its own; otherwise only this crate logs, and only
/// when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return filter;
    }
    if verbose {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), LevelFilter::DEBUG))
    } else {
        EnvFilter::new(LevelFilter::OFF.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn debug_enabled(verbose: bool, rust_log: Option<&str>) -> bool {
        let subscriber = tracing_subscriber::registry().with(log_filter(verbose, rust_log));
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::DEBUG))
    }

    #[test]
    fn test_rust_log_enables_without_verbose() {
        assert!(debug_enabled(false, Some("debug")));
        assert!(debug_enabled(false, Some("fxconv=debug")));
    }

    #[test]
    fn test_rust_log_can_silence_verbose() {
        assert!(!debug_enabled(true, Some("off")));
        assert!(!debug_enabled(true, Some("info")));
    }

    #[test]
    fn test_verbose_flag_without_rust_log() {
        assert!(debug_enabled(true, None));
        assert!(!debug_enabled(false, None));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_flag() {
        assert!(debug_enabled(true, Some("fxconv=notalevel")));
        assert!(!debug_enabled(false, Some("fxconv=notalevel")));
    }
}
