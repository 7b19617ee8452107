//! Installation and event dispatch for the four controllers
//!
//! `Timeline::install` takes the static snapshot of items, wires each
//! controller to the same effect handler and returns a single object the host
//! routes events into. The controllers never read one another's state.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::config::TimelineConfig;
use crate::effects::TimelineEffects;
use crate::errors::TimelineResult;
use crate::progress::ProgressTracker;
use crate::reveal::{ObserverOptions, RevealPhase, RevealScheduler};
use crate::selection::SelectionController;
use crate::tilt::PointerTiltController;
use crate::types::{ItemId, NodeId, TimelineEvent, TimelineItem};

/// Point-in-time view of controller state, for diagnostics and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    /// Items captured at installation
    pub items: usize,
    /// Items still hidden and observed
    pub pending: usize,
    /// Items waiting on their stagger delay
    pub scheduled: usize,
    /// Items fully shown
    pub revealed: usize,
    /// Card carrying the active class, if any
    pub active_card: Option<NodeId>,
    /// Last published progress percentage
    pub progress: Option<f64>,
}

/// An installed timeline
pub struct Timeline<E: ?Sized> {
    items: Rc<[TimelineItem]>,
    cards: Rc<[NodeId]>,
    reveal: RevealScheduler<E>,
    tilt: PointerTiltController<E>,
    selection: SelectionController<E>,
    progress: Option<ProgressTracker<E>>,
}

impl<E> Timeline<E>
where
    E: TimelineEffects + ?Sized + 'static,
{
    /// Discover the timeline in the host document and install every controller.
    ///
    /// Returns `Ok(None)` when the document has no timeline items; the
    /// system is then a no-op. A missing container only disables progress
    /// tracking.
    pub fn install(effects: Rc<E>, config: TimelineConfig) -> TimelineResult<Option<Self>> {
        config.validate()?;

        let items: Rc<[TimelineItem]> = effects
            .timeline_items(&config.selectors)
            .into_iter()
            .enumerate()
            .map(|(index, nodes)| TimelineItem {
                id: ItemId(index),
                nodes,
            })
            .collect();

        if items.is_empty() {
            tracing::debug!("no timeline items found; nothing to install");
            return Ok(None);
        }

        let cards: Rc<[NodeId]> = items.iter().filter_map(TimelineItem::card).collect();

        let reveal = RevealScheduler::install(
            Rc::clone(&effects),
            Rc::clone(&items),
            config.reveal,
        );
        let tilt = PointerTiltController::new(Rc::clone(&effects), Rc::clone(&cards), config.tilt);
        let selection =
            SelectionController::install(Rc::clone(&effects), Rc::clone(&cards), config.selection);

        let progress = match effects.timeline_container(&config.selectors) {
            Some(container) => Some(ProgressTracker::new(
                Rc::clone(&effects),
                container,
                config.progress,
            )),
            None => {
                tracing::debug!("no timeline container; progress tracking disabled");
                None
            }
        };

        tracing::info!(
            items = items.len(),
            cards = cards.len(),
            progress = progress.is_some(),
            "timeline installed"
        );

        Ok(Some(Self {
            items,
            cards,
            reveal,
            tilt,
            selection,
            progress,
        }))
    }

    /// Route one host event to the controller that owns it
    pub fn dispatch(&self, event: TimelineEvent) {
        match event {
            TimelineEvent::Visibility(batch) => {
                self.reveal.handle_batch(&batch);
            }
            TimelineEvent::PointerEnter { card } => self.tilt.on_enter(card),
            TimelineEvent::PointerMove { card, client } => {
                self.tilt.on_move(card, client);
            }
            TimelineEvent::PointerLeave { card } => self.tilt.on_leave(card),
            TimelineEvent::Click { card } => {
                self.selection.on_click(card);
            }
            TimelineEvent::Scroll => {
                if let Some(progress) = &self.progress {
                    progress.on_scroll();
                }
            }
        }
    }

    /// Items captured at installation
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Cards of those items, in item order
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    /// Container used for progress tracking, if any
    pub fn container(&self) -> Option<NodeId> {
        self.progress.as_ref().map(ProgressTracker::container)
    }

    /// Options the host visibility observer must be created with
    pub fn observer_options(&self) -> ObserverOptions {
        self.reveal.observer_options()
    }

    /// Reveal controller
    pub fn reveal(&self) -> &RevealScheduler<E> {
        &self.reveal
    }

    /// Tilt controller
    pub fn tilt(&self) -> &PointerTiltController<E> {
        &self.tilt
    }

    /// Selection controller
    pub fn selection(&self) -> &SelectionController<E> {
        &self.selection
    }

    /// Progress tracker, absent without a container
    pub fn progress(&self) -> Option<&ProgressTracker<E>> {
        self.progress.as_ref()
    }

    /// Counts and current values across all controllers
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            items: self.items.len(),
            pending: self.reveal.count(RevealPhase::Pending),
            scheduled: self.reveal.count(RevealPhase::Scheduled),
            revealed: self.reveal.count(RevealPhase::Revealed),
            active_card: self.selection.active(),
            progress: self.progress.as_ref().and_then(ProgressTracker::current),
        }
    }
}
