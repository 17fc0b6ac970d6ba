use log::{debug, error, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        let result = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("listo", log::LevelFilter::Debug) // More verbose for our app
            .filter_module("listo_lib", log::LevelFilter::Debug)
            .filter_module("diesel", log::LevelFilter::Warn) // Reduce diesel noise
            .filter_module("hyper", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("tokio", log::LevelFilter::Warn) // Reduce tokio noise
            .parse_env("RUST_LOG") // RUST_LOG wins over the defaults above
            .format_timestamp_secs()
            .format_module_path(false)
            .try_init();

        match result {
            Ok(()) => info!("Logging system initialized"),
            // Another logger is already installed (e.g. a test harness)
            Err(e) => debug!("Logger already initialized: {}", e),
        }
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log storage operations
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log integrity problems found in persisted data
    pub fn integrity_warning(store: &str, problem: &str) {
        warn!("Integrity: {} - {}", store, problem);
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    /// Only report when the operation exceeded `threshold_ms`
    pub fn finish_if_slow(self, threshold_ms: u64) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        if duration > threshold_ms {
            LogContext::performance_metric(&self.operation, duration, Some("slow"));
        }
        duration
    }
}
