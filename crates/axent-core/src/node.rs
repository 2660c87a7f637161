//! Snapshot node types for accessibility-based automation.
//!
//! This module defines the data structures representing UI elements as
//! reported by an automation backend. A snapshot is a point-in-time copy of
//! the accessibility tree; nothing in it stays live, so consumers that need
//! current state re-request a tree from the backend. Nodes form a tree via
//! the `children` field.

use serde::{Deserialize, Serialize};

use crate::filter::TextAttribute;

/// A UI element from an accessibility tree snapshot.
///
/// Field names on the wire use the AX-style keys backends emit. All fields
/// are optional because backends only report the attributes a node actually
/// carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxNode {
    /// The unique accessibility identifier for this node (AXUniqueId).
    #[serde(rename = "AXUniqueId", default)]
    pub identifier: Option<String>,

    /// The accessibility label (AXLabel), typically the user-visible text.
    #[serde(rename = "AXLabel", default)]
    pub label: Option<String>,

    /// The current value of the node (AXValue), e.g., text field contents.
    #[serde(rename = "AXValue", default)]
    pub value: Option<String>,

    /// The placeholder text of the node (AXPlaceholderValue).
    #[serde(rename = "AXPlaceholderValue", default)]
    pub placeholder_value: Option<String>,

    /// The kind of UI element (e.g., "Button", "TextField", "View").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// The node's frame (position and size) in screen coordinates.
    #[serde(default)]
    pub frame: Option<NodeFrame>,

    /// Whether a synthetic tap at the node's location would land on it.
    /// Absent when the backend does not report hit-test results.
    #[serde(default)]
    pub hittable: Option<bool>,

    /// Whether the node accepts interaction (AXEnabled).
    #[serde(rename = "AXEnabled", default)]
    pub enabled: Option<bool>,

    /// Whether the node is selected (AXSelected).
    #[serde(rename = "AXSelected", default)]
    pub selected: Option<bool>,

    /// Whether the node has input focus (AXFocused).
    #[serde(rename = "AXFocused", default)]
    pub focused: Option<bool>,

    /// Child nodes nested within this node.
    #[serde(default)]
    pub children: Vec<AxNode>,
}

impl AxNode {
    /// Returns the text attribute used by filter evaluation, if the node
    /// carries it.
    pub fn attribute(&self, attribute: TextAttribute) -> Option<&str> {
        match attribute {
            TextAttribute::Label => self.label.as_deref(),
            TextAttribute::Value => self.value.as_deref(),
            TextAttribute::PlaceholderValue => self.placeholder_value.as_deref(),
            TextAttribute::Identifier => self.identifier.as_deref(),
        }
    }
}

/// The frame (position and dimensions) of a UI element.
///
/// Coordinates are in screen points, with the origin at the top-left corner
/// of the screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    /// The x-coordinate of the node's top-left corner.
    pub x: f64,
    /// The y-coordinate of the node's top-left corner.
    pub y: f64,
    /// The width of the node in points.
    pub width: f64,
    /// The height of the node in points.
    pub height: f64,
}

impl NodeFrame {
    /// Resolves a normalized offset within this frame to an absolute screen
    /// point.
    ///
    /// `(0.0, 0.0)` is the top-left corner and `(1.0, 1.0)` the bottom-right.
    /// Offsets outside `[0.0, 1.0]` are not clamped and extrapolate outside
    /// the frame.
    pub fn point_at(&self, dx: f64, dy: f64) -> (f64, f64) {
        (self.x + self.width * dx, self.y + self.height * dy)
    }
}
