//! Shared utilities for the BUX wallet client.

pub mod display;
pub mod logging;

pub use display::format_sat_as_bsv;
pub use logging::init_tracing;
