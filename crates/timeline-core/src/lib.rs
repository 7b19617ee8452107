//! Timeline Core - interactivity controllers for rendered timeline entries
//!
//! This crate adds behavior to a timeline that is already present in a host
//! document. It owns no layout or styling; it only reacts to viewport and
//! pointer events and writes visual state back through effect interfaces.
//!
//! # Controllers
//!
//! - `RevealScheduler`: one-shot, staggered reveal when an item scrolls into view
//! - `PointerTiltController`: 3-D tilt of a card toward the pointer
//! - `SelectionController`: exclusive "active" card with centering scroll
//! - `ProgressTracker`: visible fraction of the timeline container
//!
//! # Effect Interfaces
//!
//! Controllers never touch a browser API directly. Every host capability is a
//! trait in [`effects`]; `timeline-wasm` implements them over `web-sys` and
//! `timeline-testkit` implements them in memory for tests.
//!
//! The item collection is a static snapshot captured by [`Timeline::install`].
//! Items added to or removed from the host document afterwards are not tracked.

#![forbid(unsafe_code)]

/// Typed configuration with observed defaults
pub mod config;

/// Host capability interfaces
pub mod effects;

/// Unified error handling
pub mod errors;

/// Bounding boxes and pointer positions
pub mod geometry;

/// Scroll-progress computation and publishing
pub mod progress;

/// One-shot staggered reveal
pub mod reveal;

/// Exclusive card selection
pub mod selection;

/// CSS transform and transition values
pub mod style;

/// Pointer-driven 3-D tilt
pub mod tilt;

/// Installation and event dispatch
pub mod timeline;

/// Item, node and event types
pub mod types;

pub use config::{
    ProgressConfig, RevealConfig, SelectionConfig, Selectors, TiltConfig, TimelineConfig,
};
pub use effects::{
    DocumentEffects, GeometryEffects, ScrollEffects, StyleEffects, TimelineEffects, TimerEffects,
    VisibilityEffects,
};
pub use errors::{TimelineError, TimelineResult};
pub use geometry::{Point, Rect};
pub use progress::{compute_progress, ProgressTracker};
pub use reveal::{ObserverOptions, RevealPhase, RevealScheduler};
pub use selection::{SelectionController, SelectionOutcome};
pub use style::{Cursor, Tilt, Transform, Transition, TransitionProperty};
pub use tilt::{compute_tilt, PointerTiltController};
pub use timeline::{Timeline, TimelineSnapshot};
pub use types::{ItemId, ItemNodes, NodeId, Side, TimelineEvent, TimelineItem, VisibilityEntry};
