//! Timeline Testing Infrastructure
//!
//! An in-memory host document that implements every `timeline-core` effect
//! trait, plus builders and a tracing setup for tests.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! timeline-testkit = { path = "../timeline-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,ignore
//! use timeline_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(3));
//!     // ... dispatch events, advance the clock, inspect `doc`
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod builders;
pub mod mock_document;

pub use builders::{MockDocumentBuilder, DEFAULT_VIEWPORT_HEIGHT};
pub use mock_document::{MockDocument, NodeState};

use std::rc::Rc;
use std::sync::Once;

use timeline_core::{Timeline, TimelineConfig};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// Build the document and install a timeline with default config.
///
/// # Panics
///
/// If the document has no items.
pub fn installed_timeline(builder: MockDocumentBuilder) -> (Rc<MockDocument>, Timeline<MockDocument>) {
    init_test_tracing();
    let doc = builder.build();
    let timeline = Timeline::install(Rc::clone(&doc), TimelineConfig::default())
        .expect("default config is valid")
        .expect("document has timeline items");
    (doc, timeline)
}
