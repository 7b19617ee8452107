//! One-shot, staggered reveal of timeline items
//!
//! Every item starts hidden and pushed outward. When a visibility batch
//! reports it visible, the item moves `Pending -> Scheduled` immediately and
//! `Scheduled -> Revealed` when its stagger delay elapses. Only `Pending`
//! items can be scheduled, so duplicate or late crossings are inert even if
//! the host keeps reporting the element after `unobserve`.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::config::RevealConfig;
use crate::effects::{StyleEffects, TimerEffects, VisibilityEffects};
use crate::errors::tolerate;
use crate::style::Transform;
use crate::types::{ItemId, NodeId, TimelineItem, VisibilityEntry};

/// Reveal state of a single item. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Hidden and observed
    Pending,
    /// Reported visible; reveal task queued, no longer observed
    Scheduled,
    /// Fully visible, at rest
    Revealed,
}

/// Options the host's visibility observer must be created with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Visible fraction that counts as a crossing
    pub threshold: f64,
    /// CSS-style root margin, e.g. `0px 0px -100px 0px`
    pub root_margin: String,
}

impl ObserverOptions {
    /// Derive options from reveal settings
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: format!("0px 0px {}px 0px", -config.bottom_margin),
        }
    }
}

/// Drives each item from hidden to revealed exactly once
pub struct RevealScheduler<E: ?Sized> {
    effects: Rc<E>,
    items: Rc<[TimelineItem]>,
    by_node: HashMap<NodeId, ItemId>,
    phases: Rc<RefCell<Vec<RevealPhase>>>,
    config: Rc<RevealConfig>,
}

impl<E> RevealScheduler<E>
where
    E: StyleEffects + VisibilityEffects + TimerEffects + ?Sized + 'static,
{
    /// Hide every item, install its transition and start observing it
    pub fn install(effects: Rc<E>, items: Rc<[TimelineItem]>, config: RevealConfig) -> Self {
        for item in items.iter() {
            let node = item.element();
            let offset = item.side().offset_sign() * config.offset;
            tolerate(effects.set_opacity(node, 0.0), "reveal.hide");
            tolerate(
                effects.set_transform(node, &Transform::TranslateX(offset)),
                "reveal.offset",
            );
            tolerate(
                effects.set_transition(node, &config.transition),
                "reveal.transition",
            );
            tolerate(effects.observe(node), "reveal.observe");
        }

        let by_node = items.iter().map(|item| (item.element(), item.id)).collect();
        let phases = Rc::new(RefCell::new(vec![RevealPhase::Pending; items.len()]));

        tracing::debug!(items = items.len(), "reveal scheduler installed");

        Self {
            effects,
            items,
            by_node,
            phases,
            config: Rc::new(config),
        }
    }

    /// Options the host observer must use for this scheduler
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::from_config(&self.config)
    }

    /// React to one visibility-crossing callback.
    ///
    /// The stagger delay is the entry's position in the whole batch times the
    /// configured step. Returns the number of items newly scheduled.
    pub fn handle_batch(&self, batch: &[VisibilityEntry]) -> usize {
        let mut scheduled = 0;

        for (position, entry) in batch.iter().enumerate() {
            if !entry.is_visible {
                continue;
            }
            let Some(&id) = self.by_node.get(&entry.node) else {
                tracing::trace!(node = %entry.node, "visibility entry for unknown node");
                continue;
            };
            if !self.begin(id) {
                continue;
            }

            let item = self.items[id.0];
            tolerate(self.effects.unobserve(item.element()), "reveal.unobserve");

            let delay = stagger_delay(self.config.stagger_step, position);
            tracing::debug!(item = %id, delay_ms = delay.as_millis() as u64, "reveal scheduled");

            let effects = Rc::clone(&self.effects);
            let phases = Rc::clone(&self.phases);
            let config = Rc::clone(&self.config);
            self.effects.schedule(
                delay,
                Box::new(move || {
                    finish_reveal(&*effects, &item, &config);
                    phases.borrow_mut()[id.0] = RevealPhase::Revealed;
                }),
            );
            scheduled += 1;
        }

        scheduled
    }

    /// Current phase of an item
    pub fn phase(&self, id: ItemId) -> Option<RevealPhase> {
        self.phases.borrow().get(id.0).copied()
    }

    /// Number of items currently in `phase`
    pub fn count(&self, phase: RevealPhase) -> usize {
        self.phases.borrow().iter().filter(|p| **p == phase).count()
    }

    /// `Pending -> Scheduled`; false if the item already left `Pending`
    fn begin(&self, id: ItemId) -> bool {
        let mut phases = self.phases.borrow_mut();
        match phases.get_mut(id.0) {
            Some(phase @ RevealPhase::Pending) => {
                *phase = RevealPhase::Scheduled;
                true
            }
            _ => false,
        }
    }
}

fn finish_reveal<E>(effects: &E, item: &TimelineItem, config: &RevealConfig)
where
    E: StyleEffects + ?Sized,
{
    let node = item.element();
    tolerate(effects.set_opacity(node, 1.0), "reveal.show");
    tolerate(
        effects.set_transform(node, &Transform::IDENTITY_OFFSET),
        "reveal.settle",
    );
    match item.marker() {
        Some(marker) => tolerate(
            effects.add_class(marker, &config.marker_class),
            "reveal.marker",
        ),
        None => tracing::trace!(item = %item.id, "no marker to pulse"),
    }
    tracing::debug!(item = %item.id, "revealed");
}

fn stagger_delay(step: Duration, position: usize) -> Duration {
    u32::try_from(position)
        .ok()
        .and_then(|n| step.checked_mul(n))
        .unwrap_or(Duration::MAX)
}
