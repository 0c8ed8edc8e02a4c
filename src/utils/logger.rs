//! Logging setup for the binary

use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Installs the global logger on stderr so stdout carries only result lines
///
/// `RUST_LOG` is honoured; without it dependencies log warnings only and this
/// crate logs at info, or debug when `verbose` is set.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .parse_default_env()
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            match record.level() {
                Level::Error | Level::Warn => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    name,
                    record.level(),
                    record.target(),
                    record.args()
                ),
                _ => writeln!(buf, "[{}] {}", name, record.args()),
            }
        })
        .init();
}
