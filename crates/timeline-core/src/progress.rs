//! Scroll progress of the timeline container
//!
//! On every scroll the visible share of the container is recomputed from
//! scratch and published as a custom property. When the container is entirely
//! off screen nothing is published and the previous value stays in place.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ProgressConfig;
use crate::effects::{GeometryEffects, StyleEffects};
use crate::errors::tolerate;
use crate::geometry::Rect;
use crate::types::NodeId;

/// Percentage of `container` inside a viewport of `viewport_height`.
///
/// `min(viewport_height - top, height) / height * 100`, or `None` when the
/// container does not intersect the viewport or has no height. The result is
/// not clamped: for any rect that intersects the viewport it already lies in
/// `(0, 100]`.
pub fn compute_progress(container: &Rect, viewport_height: f64) -> Option<f64> {
    if container.height <= 0.0 || !container.intersects_viewport(viewport_height) {
        return None;
    }
    let visible = (viewport_height - container.top).min(container.height);
    Some(visible / container.height * 100.0)
}

/// Publishes the container's visible percentage
pub struct ProgressTracker<E: ?Sized> {
    effects: Rc<E>,
    container: NodeId,
    last: Cell<Option<f64>>,
    config: ProgressConfig,
}

impl<E> ProgressTracker<E>
where
    E: GeometryEffects + StyleEffects + ?Sized,
{
    /// Track `container`; nothing is published until the first scroll
    pub fn new(effects: Rc<E>, container: NodeId, config: ProgressConfig) -> Self {
        Self {
            effects,
            container,
            last: Cell::new(None),
            config,
        }
    }

    /// Tracked container
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Last published percentage
    pub fn current(&self) -> Option<f64> {
        self.last.get()
    }

    /// Recompute from current geometry; returns the value published this tick
    pub fn on_scroll(&self) -> Option<f64> {
        let rect = self.effects.bounding_rect(self.container)?;
        let percentage = compute_progress(&rect, self.effects.viewport_height())?;

        tracing::trace!(percentage, "timeline progress");
        tolerate(
            self.effects.set_custom_property(
                self.container,
                &self.config.property,
                &format!("{percentage}%"),
            ),
            "progress.publish",
        );
        self.last.set(Some(percentage));
        Some(percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(top: f64, height: f64) -> Rect {
        Rect::new(0.0, top, 600.0, height)
    }

    #[test]
    fn test_partial_view() {
        assert_eq!(compute_progress(&container(0.0, 1000.0), 800.0), Some(80.0));
    }

    #[test]
    fn test_scrolled_past_top() {
        assert_eq!(compute_progress(&container(-300.0, 1000.0), 800.0), Some(100.0));
    }

    #[test]
    fn test_container_below_viewport() {
        assert_eq!(compute_progress(&container(800.0, 1000.0), 800.0), None);
        assert_eq!(compute_progress(&container(900.0, 1000.0), 800.0), None);
    }

    #[test]
    fn test_container_above_viewport() {
        assert_eq!(compute_progress(&container(-1000.0, 1000.0), 800.0), None);
    }

    #[test]
    fn test_short_container_fully_visible() {
        assert_eq!(compute_progress(&container(100.0, 200.0), 800.0), Some(100.0));
    }

    #[test]
    fn test_zero_height_container() {
        assert_eq!(compute_progress(&container(100.0, 0.0), 800.0), None);
    }
}
