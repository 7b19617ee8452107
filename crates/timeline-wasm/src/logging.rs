//! Logging for the browser adapter
//!
//! `tracing` events from the controllers and the adapter go to the browser
//! console through `tracing-wasm`.

use std::sync::Once;
use tracing_wasm::{ConsoleConfig, WASMLayerConfigBuilder};

/// Initialize panic reporting and the console subscriber.
///
/// Only the first call installs anything.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let config = WASMLayerConfigBuilder::new()
            .set_max_level(max_level())
            .set_console_config(ConsoleConfig::ReportWithoutConsoleColor)
            .set_report_logs_in_timings(false)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}

#[cfg(debug_assertions)]
fn max_level() -> tracing::Level {
    tracing::Level::DEBUG
}

#[cfg(not(debug_assertions))]
fn max_level() -> tracing::Level {
    tracing::Level::WARN
}
