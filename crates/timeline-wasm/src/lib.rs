//! Timeline WASM - browser activation for timeline interactivity
//!
//! Loading this module is enough: the start function waits for the document
//! to be ready, discovers the timeline, and installs the controllers from
//! `timeline-core` against [`dom::DomDocument`]. Nothing is exported to
//! JavaScript.

#![forbid(unsafe_code)]

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod error;
pub mod logging;
pub mod wiring;

pub use dom::DomDocument;
pub use error::{WasmError, WasmResult};

/// Module entry point
#[wasm_bindgen(start)]
pub fn start() {
    logging::init_logging();

    if let Err(err) = wiring::boot() {
        tracing::error!(error = %err, "timeline activation failed");
    }
}
