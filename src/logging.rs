//! Structured logging setup.
//!
//! The terminal belongs to the UI, so events are written as JSON lines to a log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install a JSON file subscriber.
///
/// # Arguments
/// * `log_path` - File to append to; parent directories are created
///
/// # Returns
/// * `bool` - Whether logging was enabled
///
/// # Details
/// `RUST_LOG` selects the level (default `info`). If the file cannot be
/// opened, logging stays disabled and the app runs anyway.
pub fn init(log_path: &Path) -> bool {
    if let Some(parent) = log_path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return false;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .json()
        .with_writer(Mutex::new(file))
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}
