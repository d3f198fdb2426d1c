//! Logging setup for binaries and tests built on Tabula.
//!
//! The library crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed, either by the caller or through [`init`].

use std::sync::{Mutex, OnceLock, PoisonError};

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

static INITIALIZED: OnceLock<()> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Install a global fmt subscriber writing to stdout.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Subsequent
/// calls are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_writer(std::io::stdout));
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = INITIALIZED.set(());

    tracing::debug!("Logging initialized");
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
