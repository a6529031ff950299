//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! External dependencies (clock, backend) are abstracted behind traits.
//! This crate provides test-friendly implementations that:
//! - Return deterministic, scripted values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod backend;
pub mod clock;

pub use backend::{BackendCall, NullBackend};
pub use clock::NullClock;
