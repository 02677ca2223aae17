//! Tracing subscriber setup.
//!
//! Diagnostics go to a file or nowhere: once raw mode is engaged, stdout
//! and stderr belong to the screen, and a stray log line would corrupt it.
//! With no log file configured, no subscriber is installed at all.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a file-backed subscriber when a log file is configured. The
/// filter honors `RUST_LOG` and defaults to info-level events from this
/// crate.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ttychat=info"));
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_events_to_the_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        init(Some(&path)).unwrap();
        tracing::info!(target: "ttychat", "marker event");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("logging initialized"));
    }

    #[test]
    fn no_log_file_is_a_quiet_no_op() {
        init(None).unwrap();
    }
}
