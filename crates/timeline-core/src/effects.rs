//! Host capability interfaces
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effects
//! - **Implementation**: `timeline-wasm` (browser), `timeline-testkit` (in-memory)
//! - **Usage**: Every controller in this crate
//!
//! The controllers are written against these traits only. All methods take
//! `&self`: handlers live behind an `Rc` on a single-threaded event loop and
//! use interior mutability for whatever state they keep. A handler must not
//! call back into a controller synchronously from inside one of these methods,
//! with the single exception of timer tasks, which run later.

use std::time::Duration;

use crate::config::Selectors;
use crate::errors::TimelineResult;
use crate::geometry::Rect;
use crate::style::{Cursor, Transform, Transition};
use crate::types::{ItemNodes, NodeId};

/// Element discovery in the host document
pub trait DocumentEffects {
    /// Snapshot of every timeline item currently in the document, in document order
    fn timeline_items(&self, selectors: &Selectors) -> Vec<ItemNodes>;

    /// The element spanning the whole timeline, if present
    fn timeline_container(&self, selectors: &Selectors) -> Option<NodeId>;
}

/// Visibility-crossing observation.
///
/// Threshold and margin are fixed when the handler is created (see
/// `RevealScheduler::observer_options`). Crossings are delivered by the
/// handler's owner to `Timeline::dispatch` as `TimelineEvent::Visibility`.
pub trait VisibilityEffects {
    /// Start reporting crossings for a node
    fn observe(&self, node: NodeId) -> TimelineResult<()>;

    /// Stop reporting crossings for a node
    fn unobserve(&self, node: NodeId) -> TimelineResult<()>;
}

/// On-screen geometry
pub trait GeometryEffects {
    /// Current bounding box of a node in client coordinates
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// Current viewport (window inner) height
    fn viewport_height(&self) -> f64;
}

/// Declarative visual state
pub trait StyleEffects {
    /// Set the node's opacity
    fn set_opacity(&self, node: NodeId, opacity: f64) -> TimelineResult<()>;

    /// Set the node's transform
    fn set_transform(&self, node: NodeId, transform: &Transform) -> TimelineResult<()>;

    /// Remove any transform, restoring the stylesheet's default
    fn clear_transform(&self, node: NodeId) -> TimelineResult<()>;

    /// Set the node's transition list
    fn set_transition(&self, node: NodeId, transition: &Transition) -> TimelineResult<()>;

    /// Set the cursor shown over the node
    fn set_cursor(&self, node: NodeId, cursor: Cursor) -> TimelineResult<()>;

    /// Add a named visual-state class
    fn add_class(&self, node: NodeId, class: &str) -> TimelineResult<()>;

    /// Remove a named visual-state class
    fn remove_class(&self, node: NodeId, class: &str) -> TimelineResult<()>;

    /// Whether the node currently carries a class
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Set a custom property for downstream styling
    fn set_custom_property(&self, node: NodeId, name: &str, value: &str) -> TimelineResult<()>;
}

/// Viewport scrolling
pub trait ScrollEffects {
    /// Smoothly scroll the node to the vertical center of the viewport
    fn scroll_into_view_centered(&self, node: NodeId) -> TimelineResult<()>;
}

/// Deferred execution on the same event loop
pub trait TimerEffects {
    /// Run `task` once after `delay`. Scheduled tasks cannot be cancelled.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Every capability the timeline needs
pub trait TimelineEffects:
    DocumentEffects + VisibilityEffects + GeometryEffects + StyleEffects + ScrollEffects + TimerEffects
{
}

impl<T> TimelineEffects for T where
    T: DocumentEffects
        + VisibilityEffects
        + GeometryEffects
        + StyleEffects
        + ScrollEffects
        + TimerEffects
        + ?Sized
{
}
