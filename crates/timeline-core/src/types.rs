//! Item, node and event types shared by every controller

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point;

/// Opaque handle to an element in the host document.
///
/// Handles are assigned by the host adapter when it first reports an element
/// and stay valid for the lifetime of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw adapter index
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw adapter index
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Raw index as a `usize`, for adapters that keep nodes in a `Vec`
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Position of an item in the snapshot taken at installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Which side of the timeline spine an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Item is laid out left of the spine and slides in from the left
    Left,
    /// Item is laid out right of the spine and slides in from the right
    Right,
}

impl Side {
    /// Sign of the initial horizontal offset: items start pushed outward.
    pub fn offset_sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Element handles for one item as reported by the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNodes {
    /// The item element itself (observed for visibility)
    pub element: NodeId,
    /// Side classification, fixed at creation
    pub side: Side,
    /// Optional marker dot on the spine
    pub marker: Option<NodeId>,
    /// Optional interactive card
    pub card: Option<NodeId>,
}

impl ItemNodes {
    /// Item without marker or card
    pub fn new(element: NodeId, side: Side) -> Self {
        Self {
            element,
            side,
            marker: None,
            card: None,
        }
    }

    /// Attach a marker handle
    pub fn with_marker(mut self, marker: NodeId) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Attach a card handle
    pub fn with_card(mut self, card: NodeId) -> Self {
        self.card = Some(card);
        self
    }
}

/// A timeline entry captured at installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Identity: position in the initial collection
    pub id: ItemId,
    /// Host element handles
    pub nodes: ItemNodes,
}

impl TimelineItem {
    /// Item element handle
    pub fn element(&self) -> NodeId {
        self.nodes.element
    }

    /// Item side
    pub fn side(&self) -> Side {
        self.nodes.side
    }

    /// Marker handle, if the item has one
    pub fn marker(&self) -> Option<NodeId> {
        self.nodes.marker
    }

    /// Card handle, if the item has one
    pub fn card(&self) -> Option<NodeId> {
        self.nodes.card
    }
}

/// One element's state within a visibility-crossing callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityEntry {
    /// The observed element
    pub node: NodeId,
    /// Whether the element is past the configured threshold
    pub is_visible: bool,
}

impl VisibilityEntry {
    /// Entry reporting the node as visible
    pub fn visible(node: NodeId) -> Self {
        Self {
            node,
            is_visible: true,
        }
    }

    /// Entry reporting the node as not visible
    pub fn hidden(node: NodeId) -> Self {
        Self {
            node,
            is_visible: false,
        }
    }
}

/// Host events routed to the controllers
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// One visibility-crossing callback; order is the batch order
    Visibility(Vec<VisibilityEntry>),
    /// Pointer entered a card
    PointerEnter {
        /// The hovered card
        card: NodeId,
    },
    /// Pointer moved over a card, in viewport (client) coordinates
    PointerMove {
        /// The hovered card
        card: NodeId,
        /// Pointer position in client coordinates
        client: Point,
    },
    /// Pointer left a card
    PointerLeave {
        /// The card that was left
        card: NodeId,
    },
    /// A card was clicked
    Click {
        /// The clicked card
        card: NodeId,
    },
    /// The window scrolled
    Scroll,
}
