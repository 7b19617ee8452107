//! Error handling for the browser adapter

use thiserror::Error;
use timeline_core::{NodeId, TimelineError};
use wasm_bindgen::prelude::*;

/// Error type for DOM operations
#[derive(Error, Debug)]
pub enum WasmError {
    /// A browser global (window, document) is unavailable.
    #[error("Missing browser global: {0}")]
    MissingGlobal(&'static str),

    /// Node handle does not resolve to a registered element.
    #[error("Unregistered node: {0}")]
    UnknownNode(NodeId),

    /// JavaScript interop error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Error reported by the timeline controllers.
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),
}

impl From<JsValue> for WasmError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .or_else(|| {
                js_val
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| "Unknown JavaScript error".to_string());
        WasmError::JavaScript(message)
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<WasmError> for TimelineError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::Timeline(inner) => inner,
            WasmError::UnknownNode(node) => TimelineError::unknown_node(node),
            other => TimelineError::host(other.to_string()),
        }
    }
}

/// Result type for DOM operations
pub type WasmResult<T> = Result<T, WasmError>;
