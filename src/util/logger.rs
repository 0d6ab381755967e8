use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Holds the appender worker guards; dropping them stops background writers,
/// so the instance must live for the whole process.
pub struct Logger {
    _guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all("logs")?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,openscholar_backend=debug"));
        let file_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".into());
        let error_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".into());

        let (all_writer, all_guard) =
            non_blocking(rolling::daily("logs", "openscholar-backend.log"));
        let (error_writer, error_guard) =
            non_blocking(rolling::daily("logs/error", "openscholar-backend-error.log"));
        let (json_writer, json_guard) =
            non_blocking(rolling::daily("logs/json", "openscholar-backend.json"));

        let console_layer = fmt::layer()
            .pretty()
            .with_thread_ids(true)
            .with_filter(console_filter);
        let all_layer = fmt::layer()
            .with_writer(all_writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(file_level.clone()));
        let error_layer = fmt::layer()
            .with_writer(error_writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(error_level));
        let json_layer = fmt::layer()
            .json()
            .with_writer(json_writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(file_level));

        tracing_subscriber::registry()
            .with(console_layer)
            .with(all_layer)
            .with(error_layer)
            .with(json_layer)
            .init();

        Ok(Logger {
            _guards: vec![all_guard, error_guard, json_guard],
        })
    }
}
