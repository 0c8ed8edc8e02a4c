//! Core discovery-and-dispatch engine
//!
//! This module provides:
//! - Repository detection and config-based selection
//! - The per-root tree walk with nested-repository suppression
//! - Dispatch of one unit of work per repository
//! - Result collection bounded by a global deadline

// Internal modules - not part of public API
pub(crate) mod collector;
pub(crate) mod detect;
pub(crate) mod discovery;
pub(crate) mod dispatch;
pub(crate) mod error;
pub(crate) mod filter;
pub(crate) mod report;

pub mod config;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
