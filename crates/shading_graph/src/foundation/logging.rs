//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Intended for binaries embedding the material graph; reads `RUST_LOG`.
pub fn init() {
    env_logger::init();
}

/// Initialize a logger that writes through the test harness
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
