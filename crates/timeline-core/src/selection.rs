//! Exclusive card selection
//!
//! At most one card carries the active class. The class on the clicked card
//! is the source of truth for "was it active"; every click strips the class
//! from all known cards before (maybe) re-adding it, so the invariant holds
//! even if something else had left two cards marked.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

use crate::config::SelectionConfig;
use crate::effects::{ScrollEffects, StyleEffects};
use crate::errors::tolerate;
use crate::style::Cursor;
use crate::types::NodeId;

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// Card became active and was scrolled to center
    Activated(NodeId),
    /// Card was active and now nothing is
    Deactivated(NodeId),
    /// Not a card this controller manages
    Ignored,
}

/// Owns the single optional active card
pub struct SelectionController<E: ?Sized> {
    effects: Rc<E>,
    cards: Rc<[NodeId]>,
    active: Cell<Option<NodeId>>,
    config: SelectionConfig,
}

impl<E> SelectionController<E>
where
    E: StyleEffects + ScrollEffects + ?Sized,
{
    /// Mark every card clickable
    pub fn install(effects: Rc<E>, cards: Rc<[NodeId]>, config: SelectionConfig) -> Self {
        for &card in cards.iter() {
            tolerate(effects.set_cursor(card, Cursor::Pointer), "selection.cursor");
        }
        Self {
            effects,
            cards,
            active: Cell::new(None),
            config,
        }
    }

    /// Currently active card
    pub fn active(&self) -> Option<NodeId> {
        self.active.get()
    }

    /// Toggle `card`, deactivating every other card
    pub fn on_click(&self, card: NodeId) -> SelectionOutcome {
        if !self.cards.contains(&card) {
            return SelectionOutcome::Ignored;
        }
        let class = self.config.active_class.as_str();
        let was_active = self.effects.has_class(card, class);

        for &other in self.cards.iter() {
            tolerate(self.effects.remove_class(other, class), "selection.clear");
        }

        if was_active {
            self.active.set(None);
            tracing::debug!(%card, "card deactivated");
            return SelectionOutcome::Deactivated(card);
        }

        tolerate(self.effects.add_class(card, class), "selection.activate");
        self.active.set(Some(card));
        tolerate(
            self.effects.scroll_into_view_centered(card),
            "selection.scroll",
        );
        tracing::debug!(%card, "card activated");
        SelectionOutcome::Activated(card)
    }
}
