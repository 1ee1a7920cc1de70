//! Shutdown signal handling.
//!
//! SIGINT, SIGTERM and SIGHUP set a shared flag that the render loop polls
//! between frames and during its sleep. A second signal while the flag is
//! already set terminates the process immediately, so a stuck HTTP request
//! can always be interrupted.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    flag,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

const SHUTDOWN_SIGNALS: [i32; 3] = [SIGINT, SIGTERM, SIGHUP];

/// Exit status used when a repeated signal forces termination.
const FORCED_EXIT_STATUS: i32 = 130;

/// Shared shutdown state.
#[derive(Debug, Clone, Default)]
pub struct SignalState {
    shutdown: Arc<AtomicBool>,
}

impl SignalState {
    /// A state no signal is wired to; useful for tests and one-shot runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the application should keep running.
    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::SeqCst)
    }

    /// Ask the render loop to stop after the current step.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Register the shutdown signals and return the state they control.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::new();

    for signal in SHUTDOWN_SIGNALS {
        // Order matters: the conditional exit only fires once the flag is already set.
        flag::register_conditional_shutdown(signal, FORCED_EXIT_STATUS, Arc::clone(&state.shutdown))
            .with_context(|| format!("failed to register handler for signal {signal}"))?;
        flag::register(signal, Arc::clone(&state.shutdown))
            .with_context(|| format!("failed to register handler for signal {signal}"))?;
    }

    if debug_enabled {
        log_debug!("Signal handlers registered for SIGINT, SIGTERM and SIGHUP");
    }

    Ok(state)
}
