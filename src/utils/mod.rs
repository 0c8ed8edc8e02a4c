pub(crate) mod logger;

// Public API - utilities used by the binary
pub use logger::setup_logging;
