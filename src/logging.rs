use tracing_subscriber::{fmt, EnvFilter};

/// Variable holding the log filter, e.g. `SYSCALL_LOG=debug`.
pub const LOG_ENV: &str = "SYSCALL_LOG";

/// Installs the stderr logger. Quiet unless `SYSCALL_LOG` asks otherwise, so
/// that only echo output and the calls' own effects reach the terminal.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
