/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Logging setup, and logging of multi-line text one line at a time.

use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config;

/// Severity of a [`log_lines`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Logged at error level, followed by a final "Aborting due to
    /// errors." record. Aborting is left to the caller.
    Fatal,
}

// Held while logging one text so that concurrent calls do not
// interleave their lines.
static LOG_LINES: Mutex<()> = Mutex::new(());

fn log_line(severity: Severity, file: &str, line: u32, message: &str) {
    match severity {
        Severity::Info => tracing::info!(file = file, line = line, "{}", message),
        Severity::Warning => tracing::warn!(file = file, line = line, "{}", message),
        Severity::Error | Severity::Fatal => {
            tracing::error!(file = file, line = line, "{}", message)
        }
    }
}

/// Logs every line of `text` as its own record, attributed to
/// `file:line`. A trailing newline does not produce an empty record.
pub fn log_lines(severity: Severity, text: &str, file: &str, line: u32) {
    let _guard = LOG_LINES.lock().unwrap_or_else(PoisonError::into_inner);
    for message in text.split_terminator('\n') {
        log_line(severity, file, line, message);
    }
    if severity == Severity::Fatal {
        log_line(severity, file, line, "Aborting due to errors.");
    }
}

/// Installs a global `tracing` subscriber writing to stderr. The
/// filter comes from `RUST_LOG`, falling back to
/// [`Config::log_level`](crate::config::Config::log_level). Does
/// nothing if a subscriber is already installed.
pub fn initialize_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config::global().log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
