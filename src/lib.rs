//! rtc - window and backbuffer presentation shell for a software ray tracer
//!
//! The display core is platform independent and testable anywhere; the
//! Win32 bindings live under `platform` and only build on Windows.

// Declared first so log! and log_fn! are visible to the modules below
#[macro_use]
pub mod log;

pub mod config;
pub mod display;
pub mod math;
pub mod platform;
