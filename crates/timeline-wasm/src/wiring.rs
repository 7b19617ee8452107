//! Activation: observer creation, controller installation and DOM listeners
//!
//! Listeners are registered once and leaked with `Closure::forget`; they live
//! as long as the page, like the timeline they feed.

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use timeline_core::{
    NodeId, ObserverOptions, Point, Timeline, TimelineConfig, TimelineEvent, VisibilityEntry,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventTarget, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent,
};

use crate::dom::DomDocument;
use crate::error::WasmResult;

/// Filled once installation succeeds; listeners registered earlier read it lazily.
type TimelineSlot = Rc<OnceCell<Timeline<DomDocument>>>;

fn dispatch(slot: &TimelineSlot, event: TimelineEvent) {
    if let Some(timeline) = slot.get() {
        timeline.dispatch(event);
    }
}

/// Activate now, or on `DOMContentLoaded` if the document is still loading
pub fn boot() -> WasmResult<()> {
    let dom = Rc::new(DomDocument::new()?);

    if dom.document().ready_state() != "loading" {
        return activate(dom);
    }

    let document = dom.document().clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(err) = activate(dom) {
            tracing::error!(error = %err, "timeline activation failed");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

/// Install the controllers with default configuration and wire every listener
pub fn activate(dom: Rc<DomDocument>) -> WasmResult<()> {
    let config = TimelineConfig::default();
    let slot: TimelineSlot = Rc::new(OnceCell::new());

    // The observer must exist before installation, which observes every item
    let observer = create_observer(
        Rc::downgrade(&dom),
        &ObserverOptions::from_config(&config.reveal),
        Rc::clone(&slot),
    )?;
    dom.set_observer(observer);

    let Some(timeline) = Timeline::install(Rc::clone(&dom), config)? else {
        tracing::debug!("no timeline on this page");
        return Ok(());
    };
    let cards = timeline.cards().to_vec();
    let track_progress = timeline.container().is_some();
    let _ = slot.set(timeline);

    for card in cards {
        let element = dom.element(card)?;
        listen_card(&element, card, &slot)?;
    }

    if track_progress {
        let slot = Rc::clone(&slot);
        listen(dom.window(), "scroll", move |_| {
            dispatch(&slot, TimelineEvent::Scroll);
        })?;
    }

    Ok(())
}

fn create_observer(
    dom: Weak<DomDocument>,
    options: &ObserverOptions,
    slot: TimelineSlot,
) -> WasmResult<IntersectionObserver> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let Some(dom) = dom.upgrade() else {
                return;
            };
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let node = dom.node_for(&entry.target())?;
                    Some(VisibilityEntry {
                        node,
                        is_visible: entry.is_intersecting(),
                    })
                })
                .collect();
            dispatch(&slot, TimelineEvent::Visibility(batch));
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

fn listen_card(element: &EventTarget, card: NodeId, slot: &TimelineSlot) -> WasmResult<()> {
    let on_enter = Rc::clone(slot);
    listen(element, "mouseenter", move |_| {
        dispatch(&on_enter, TimelineEvent::PointerEnter { card });
    })?;

    let on_move = Rc::clone(slot);
    listen(element, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let client = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            dispatch(&on_move, TimelineEvent::PointerMove { card, client });
        }
    })?;

    let on_leave = Rc::clone(slot);
    listen(element, "mouseleave", move |_| {
        dispatch(&on_leave, TimelineEvent::PointerLeave { card });
    })?;

    let on_click = Rc::clone(slot);
    listen(element, "click", move |_| {
        dispatch(&on_click, TimelineEvent::Click { card });
    })
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> WasmResult<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
