//! Earshot Simulator Library
//!
//! Drives the playback controller against the simulated media backend on a
//! virtual clock, so whole listening sessions can be replayed from the
//! command line.
//!
//! This library exposes the session runner and configuration for testing
//! purposes.

pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use session::{load_playlist, run_session, SessionOptions, SessionReport};
