//! Builders for mock timeline documents

use std::rc::Rc;

use timeline_core::{ItemNodes, NodeId, Rect, Side};

use crate::mock_document::{MockDocument, NodeState};

/// Default viewport height used by fixtures
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Builds a [`MockDocument`] item by item, allocating node handles in
/// document order.
///
/// ```rust,ignore
/// let doc = MockDocumentBuilder::new()
///     .item(Side::Left)
///     .item_with(Side::Right, false, true)
///     .container(Rect::new(0.0, 0.0, 600.0, 1000.0))
///     .build();
/// ```
#[derive(Default)]
pub struct MockDocumentBuilder {
    nodes: Vec<NodeState>,
    items: Vec<ItemNodes>,
    container: Option<NodeId>,
    viewport_height: Option<f64>,
}

impl MockDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(NodeState::default());
        id
    }

    /// Item with both a marker and a card
    pub fn item(self, side: Side) -> Self {
        self.item_with(side, true, true)
    }

    /// Item with a card but no marker
    pub fn item_without_marker(self, side: Side) -> Self {
        self.item_with(side, false, true)
    }

    /// Item with a marker but no card
    pub fn item_without_card(self, side: Side) -> Self {
        self.item_with(side, true, false)
    }

    pub fn item_with(mut self, side: Side, marker: bool, card: bool) -> Self {
        let mut nodes = ItemNodes::new(self.alloc(), side);
        if marker {
            nodes = nodes.with_marker(self.alloc());
        }
        if card {
            let card = self.alloc();
            // Cards default to a 200x100 box at the origin
            self.nodes[card.index()].rect = Some(Rect::new(0.0, 0.0, 200.0, 100.0));
            nodes = nodes.with_card(card);
        }
        self.items.push(nodes);
        self
    }

    /// `count` items alternating left and right, starting on the left
    pub fn alternating(mut self, count: usize) -> Self {
        for i in 0..count {
            let side = if i % 2 == 0 { Side::Left } else { Side::Right };
            self = self.item(side);
        }
        self
    }

    /// Container with its current bounding box
    pub fn container(mut self, rect: Rect) -> Self {
        let id = self.alloc();
        self.nodes[id.index()].rect = Some(rect);
        self.container = Some(id);
        self
    }

    pub fn viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn build(self) -> Rc<MockDocument> {
        Rc::new(MockDocument::new(
            self.nodes,
            self.items,
            self.container,
            self.viewport_height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT),
        ))
    }
}
