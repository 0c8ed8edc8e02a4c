//! Command handlers invoked by the CLI

pub mod sweep;

pub use sweep::{handle_sweep_command, SweepArgs};
