//! # Garbage Clock Library
//!
//! Internal library for the garbage-clock binary.
//!
//! This library exists to enable testing of the clock internals and to keep
//! CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: [`GarbageClock`] wires configuration, time sync and the display together
//! - **Core Logic**: `core` holds the render loop, the clock controller and the garbage day rule
//! - **Time Sync**: `sync` talks to worldtimeapi.org or Adafruit IO (or the offline demo)
//! - **Display**: `display` composes frames for a 64x32 matrix and draws them
//! - **Configuration**: `config` loads and validates `garbage-clock.toml`
//! - **Infrastructure**: Signal handling, logging, time parsing and the board clock

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod args;
pub mod config;
pub mod core;
pub mod display;
pub mod io;
pub mod sync;
pub mod time;

mod garbage_clock;

pub use garbage_clock::GarbageClock;
