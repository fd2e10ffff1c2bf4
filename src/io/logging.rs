use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TASKDECK_LOG";

/// Where diagnostic output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; created if missing
    File(PathBuf),
    /// No subscriber at all (TUI without a log file: stderr is the screen)
    Off,
}

/// Filter precedence: TASKDECK_LOG, then the configured directive, then
/// `default_directive`.
fn build_filter(configured: Option<&str>, default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(default_directive)))
        .unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global `tracing` subscriber. Calling it twice is harmless.
pub fn init(
    target: LogTarget,
    configured: Option<&str>,
    default_directive: &str,
) -> std::io::Result<()> {
    let filter = build_filter(configured, default_directive);
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
    Ok(())
}
