//! Structured logging with box-drawing output.
//!
//! Every line the clock prints goes through this module so the console output
//! reads as one continuous tree:
//!
//! ```text
//! ┏ garbage-clock v0.3.0 ━━╸
//! ┃
//! ┣ Loaded configuration
//! ┃   Time provider: worldtimeapi (America/Los_Angeles)
//! ┃
//! ┣ Time synchronized: 2020-11-28 20:45:15 (-08:00)
//! ┃   SAT, garbage day in 4 days
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - **`log_block_start!`** opens a new conceptual block (sync attempt, night mode change,
//!   startup phase). It prints a spacer pipe followed by `┣ message`.
//! - **`log_decorated!`** continues a block with `┣ message`.
//! - **`log_indented!`** prints nested details as `┃   message`.
//! - **`log_pipe!`** inserts an empty `┃` line, typically before a semantic message.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`** print `┣[LEVEL] message`.
//! - **`log_error_exit!`** closes the tree with `┗[ERROR] message` before a fatal exit.
//! - **`log_version!`** / **`log_end!`** open and close the whole output.
//!
//! Output can be disabled at runtime with [`Log::set_enabled`], which the test
//! suites use to keep their output readable.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static TIMESTAMPS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Runtime switches for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Prefix every line with the host wall-clock time (used with `--debug`).
    pub fn set_timestamps(enabled: bool) {
        TIMESTAMPS_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Timestamp prefix for the current line, empty unless timestamps are on.
    pub fn get_timestamp_prefix() -> String {
        if TIMESTAMPS_ENABLED.load(Ordering::SeqCst) {
            format!("[{}] ", chrono::Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Write a fully formatted chunk to stdout. Public for macro access.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Shared expansion for every logging macro: `$head` goes before the message
/// on each line, `$lead` is an optional extra line printed first.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($lead:expr, $head:expr, $($arg:tt)*) => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($($arg)*);
            let lead: &str = $lead;
            let formatted = if lead.is_empty() {
                format!("{prefix}{}{message}\n", $head)
            } else {
                format!("{prefix}{lead}\n{prefix}{}{message}\n", $head)
            };
            $crate::common::logger::write_output(&formatted);
        }
    }};
}

/// Log a decorated message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => { $crate::__log_line!("", "┣ ", $($arg)*) };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => { $crate::__log_line!("", "┃   ", $($arg)*) };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => { $crate::__log_line!("", "┃", "") };
}

/// Start a new block of related messages.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => { $crate::__log_line!("┃", "┣ ", $($arg)*) };
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_line!("", "┏ ", "garbage-clock v{} ━━╸", env!("CARGO_PKG_VERSION"))
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => { $crate::__log_line!("", "╹", "") };
}

/// Log an informational message.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_line!("", "┣[\x1b[32mINFO\x1b[0m] ", $($arg)*) };
}

/// Log a warning in yellow.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => { $crate::__log_line!("", "┣[\x1b[33mWARNING\x1b[0m] ", $($arg)*) };
}

/// Log an error in red.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_line!("", "┣[\x1b[31mERROR\x1b[0m] ", $($arg)*) };
}

/// Log a fatal error and close the output tree.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => { $crate::__log_line!("┃", "┗[\x1b[31mERROR\x1b[0m] ", $($arg)*) };
}

/// Log a debug message.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_line!("", "┣[\x1b[32mDEBUG\x1b[0m] ", $($arg)*) };
}
