//! Effect handlers backed by the browser DOM
//!
//! `DomDocument` hands out a `NodeId` for every element it reports to the
//! controllers and resolves those handles back to elements when a controller
//! writes. The registry only grows; elements are never unregistered because
//! the item snapshot lives as long as the page.

use std::cell::RefCell;
use std::time::Duration;

use timeline_core::{
    Cursor, DocumentEffects, GeometryEffects, ItemNodes, NodeId, Rect, ScrollEffects, Selectors,
    Side, StyleEffects, TimelineError, TimelineResult, TimerEffects, Transform, Transition,
    VisibilityEffects,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CssStyleDeclaration, Document, Element, HtmlElement, IntersectionObserver, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::error::{WasmError, WasmResult};

/// The host page as seen by the timeline controllers
pub struct DomDocument {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<HtmlElement>>,
    observer: RefCell<Option<IntersectionObserver>>,
}

impl DomDocument {
    /// Bind to the current window and document
    pub fn new() -> WasmResult<Self> {
        let window = web_sys::window().ok_or(WasmError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(WasmError::MissingGlobal("document"))?;
        Ok(Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        })
    }

    /// Browser window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Host document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Use `observer` for all subsequent `observe`/`unobserve` calls
    pub fn set_observer(&self, observer: IntersectionObserver) {
        *self.observer.borrow_mut() = Some(observer);
    }

    /// Handle for `element`, registering it on first sight
    pub fn register(&self, element: HtmlElement) -> NodeId {
        if let Some(node) = self.node_for(&element) {
            return node;
        }
        let mut nodes = self.nodes.borrow_mut();
        let node = NodeId::new(nodes.len() as u32);
        nodes.push(element);
        node
    }

    /// Handle of an already registered element
    pub fn node_for(&self, element: &Element) -> Option<NodeId> {
        let target: &Node = element.as_ref();
        self.nodes
            .borrow()
            .iter()
            .position(|known| known.is_same_node(Some(target)))
            .map(|index| NodeId::new(index as u32))
    }

    /// Element behind a handle
    pub fn element(&self, node: NodeId) -> WasmResult<HtmlElement> {
        self.nodes
            .borrow()
            .get(node.index())
            .cloned()
            .ok_or(WasmError::UnknownNode(node))
    }

    fn style(&self, node: NodeId) -> WasmResult<CssStyleDeclaration> {
        Ok(self.element(node)?.style())
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> TimelineResult<()> {
        self.style(node)?
            .set_property(property, value)
            .map_err(|e| WasmError::from(e).into())
    }

    fn child(&self, parent: &HtmlElement, selector: &str) -> Option<NodeId> {
        let child = parent.query_selector(selector).ok().flatten()?;
        let child = child.dyn_into::<HtmlElement>().ok()?;
        Some(self.register(child))
    }
}

impl DocumentEffects for DomDocument {
    fn timeline_items(&self, selectors: &Selectors) -> Vec<ItemNodes> {
        let list = match self.document.query_selector_all(&selectors.item) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(error = %WasmError::from(err), "item query failed");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| {
                let side = if element.class_list().contains(&selectors.left_class) {
                    Side::Left
                } else {
                    Side::Right
                };
                let marker = self.child(&element, &selectors.marker);
                let card = self.child(&element, &selectors.card);
                ItemNodes {
                    element: self.register(element),
                    side,
                    marker,
                    card,
                }
            })
            .collect()
    }

    fn timeline_container(&self, selectors: &Selectors) -> Option<NodeId> {
        let container = self
            .document
            .query_selector(&selectors.container)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(self.register(container))
    }
}

impl VisibilityEffects for DomDocument {
    fn observe(&self, node: NodeId) -> TimelineResult<()> {
        let element = self.element(node)?;
        match self.observer.borrow().as_ref() {
            Some(observer) => {
                observer.observe(&element);
                Ok(())
            }
            None => Err(TimelineError::host("visibility observer not installed")),
        }
    }

    fn unobserve(&self, node: NodeId) -> TimelineResult<()> {
        let element = self.element(node)?;
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.unobserve(&element);
        }
        Ok(())
    }
}

impl GeometryEffects for DomDocument {
    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        let rect = self.element(node).ok()?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }
}

impl StyleEffects for DomDocument {
    fn set_opacity(&self, node: NodeId, opacity: f64) -> TimelineResult<()> {
        self.set_style(node, "opacity", &opacity.to_string())
    }

    fn set_transform(&self, node: NodeId, transform: &Transform) -> TimelineResult<()> {
        self.set_style(node, "transform", &transform.to_css())
    }

    fn clear_transform(&self, node: NodeId) -> TimelineResult<()> {
        self.style(node)?
            .remove_property("transform")
            .map(|_| ())
            .map_err(|e| WasmError::from(e).into())
    }

    fn set_transition(&self, node: NodeId, transition: &Transition) -> TimelineResult<()> {
        self.set_style(node, "transition", &transition.to_css())
    }

    fn set_cursor(&self, node: NodeId, cursor: Cursor) -> TimelineResult<()> {
        self.set_style(node, "cursor", cursor.as_css())
    }

    fn add_class(&self, node: NodeId, class: &str) -> TimelineResult<()> {
        self.element(node)?
            .class_list()
            .add_1(class)
            .map_err(|e| WasmError::from(e).into())
    }

    fn remove_class(&self, node: NodeId, class: &str) -> TimelineResult<()> {
        self.element(node)?
            .class_list()
            .remove_1(class)
            .map_err(|e| WasmError::from(e).into())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_custom_property(&self, node: NodeId, name: &str, value: &str) -> TimelineResult<()> {
        self.set_style(node, name, value)
    }
}

impl ScrollEffects for DomDocument {
    fn scroll_into_view_centered(&self, node: NodeId) -> TimelineResult<()> {
        let element = self.element(node)?;
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }
}

impl TimerEffects for DomDocument {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            tracing::warn!(error = %WasmError::from(err), "failed to schedule timer");
        }
    }
}
