//! Pointer-driven 3-D tilt of hovered cards
//!
//! Each move event fully determines the transform from the pointer position
//! and the card's current bounding box. Nothing is carried between events.

use std::rc::Rc;

use crate::config::TiltConfig;
use crate::effects::{GeometryEffects, StyleEffects};
use crate::errors::tolerate;
use crate::geometry::{Point, Rect};
use crate::style::{Cursor, Tilt, Transform};
use crate::types::NodeId;

/// Tilt toward a pointer at `client` over a card occupying `rect`.
///
/// `rotate_x = (y - h/2) / divisor` and `rotate_y = (w/2 - x) / divisor`,
/// with `x, y` relative to the card's top-left corner. A pointer below center
/// tips the top edge away from the viewer; a pointer right of center brings
/// the left edge forward.
pub fn compute_tilt(rect: &Rect, client: Point, config: &TiltConfig) -> Tilt {
    let local = rect.to_local(client);
    let center = rect.half_extent();
    Tilt {
        lift: config.lift,
        perspective: config.perspective,
        rotate_x: (local.y - center.y) / config.divisor,
        rotate_y: (center.x - local.x) / config.divisor,
        scale: config.scale,
    }
}

/// Applies and clears the tilt transform on hover
pub struct PointerTiltController<E: ?Sized> {
    effects: Rc<E>,
    cards: Rc<[NodeId]>,
    config: TiltConfig,
}

impl<E> PointerTiltController<E>
where
    E: StyleEffects + GeometryEffects + ?Sized,
{
    pub fn new(effects: Rc<E>, cards: Rc<[NodeId]>, config: TiltConfig) -> Self {
        Self {
            effects,
            cards,
            config,
        }
    }

    /// Cards this controller reacts to
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    fn owns(&self, card: NodeId) -> bool {
        self.cards.contains(&card)
    }

    /// Install the short hover transition and the pointer cursor
    pub fn on_enter(&self, card: NodeId) {
        if !self.owns(card) {
            return;
        }
        tolerate(
            self.effects.set_transition(card, &self.config.transition),
            "tilt.transition",
        );
        tolerate(self.effects.set_cursor(card, Cursor::Pointer), "tilt.cursor");
    }

    /// Recompute and apply the tilt for the current pointer position.
    ///
    /// Returns the applied tilt, or `None` if the card is unknown or its
    /// geometry could not be read.
    pub fn on_move(&self, card: NodeId, client: Point) -> Option<Tilt> {
        if !self.owns(card) {
            return None;
        }
        let rect = self.effects.bounding_rect(card)?;
        let tilt = compute_tilt(&rect, client, &self.config);
        tracing::trace!(%card, rotate_x = tilt.rotate_x, rotate_y = tilt.rotate_y, "tilt");
        tolerate(
            self.effects.set_transform(card, &Transform::Tilt(tilt)),
            "tilt.transform",
        );
        Some(tilt)
    }

    /// Return the card to its untransformed state
    pub fn on_leave(&self, card: NodeId) {
        if !self.owns(card) {
            return;
        }
        tolerate(self.effects.clear_transform(card), "tilt.clear");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_example() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let tilt = compute_tilt(&rect, Point::new(150.0, 25.0), &TiltConfig::default());
        assert_eq!(tilt.rotate_x, -1.25);
        assert_eq!(tilt.rotate_y, -2.5);
        assert_eq!(tilt.lift, 5.0);
        assert_eq!(tilt.perspective, 1000.0);
        assert_eq!(tilt.scale, 1.02);
    }

    #[test]
    fn test_tilt_uses_card_offset() {
        let rect = Rect::new(300.0, 400.0, 200.0, 100.0);
        let tilt = compute_tilt(&rect, Point::new(450.0, 425.0), &TiltConfig::default());
        assert_eq!(tilt.rotate_x, -1.25);
        assert_eq!(tilt.rotate_y, -2.5);
    }

    #[test]
    fn test_centered_pointer_is_flat() {
        let rect = Rect::new(40.0, 60.0, 200.0, 100.0);
        let tilt = compute_tilt(&rect, Point::new(140.0, 110.0), &TiltConfig::default());
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
    }

    #[test]
    fn test_sign_convention() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let config = TiltConfig::default();

        let below = compute_tilt(&rect, Point::new(100.0, 90.0), &config);
        assert!(below.rotate_x > 0.0);

        let right = compute_tilt(&rect, Point::new(190.0, 50.0), &config);
        assert!(right.rotate_y < 0.0);
    }
}
