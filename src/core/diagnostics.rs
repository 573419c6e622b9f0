//! Internal diagnostic channel
//!
//! The framework never reports its own problems through the logging pipeline
//! it implements. Failures inside dispatch, appenders, or configuration go to
//! stderr through this module instead, and its own write failures are
//! swallowed: diagnostics must not introduce a second failure path.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences (or re-enables) all diagnostic output process-wide.
pub fn set_quiet_mode(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Recoverable misconfiguration, e.g. a logger with no appenders.
pub fn warning(message: &str) {
    emit("[LOGGER WARNING]", message);
}

/// An operation failed but the pipeline continues, e.g. one appender erroring.
pub fn error(message: &str) {
    emit("[LOGGER ERROR]", message);
}

/// A caught panic or other fault that would otherwise have torn down a caller.
pub fn critical(message: &str) {
    emit("[LOGGER CRITICAL]", message);
}

fn emit(prefix: &str, message: &str) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    let stderr = std::io::stderr();
    let _ = writeln!(stderr.lock(), "{} {}", prefix, message);
}
