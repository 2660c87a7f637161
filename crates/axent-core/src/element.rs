//! Element handles and state probes.
//!
//! An [`Element`] is a re-resolvable reference to a live UI node: a driver
//! plus a [`Selector`]. Nothing is cached: every property read re-resolves
//! the selector against a fresh tree snapshot, so two probes of the same
//! handle can disagree when the UI changes in between. That is the point:
//! handles stay valid across screen transitions as long as the selector
//! still matches something.

use std::sync::Arc;

use tracing::debug;

use crate::driver::{find_node, find_siblings, AutomationDriver, DriverError};
use crate::node::AxNode;
use crate::query::ElementQuery;

/// How an element is located in a tree snapshot.
///
/// The value is compared exactly against the identifier or label; `kind`
/// optionally restricts the element kind. The first match in depth-first
/// pre-order wins.
#[derive(Debug, Clone)]
pub struct Selector {
    /// The value compared against the identifier or label.
    pub value: String,
    /// If true, `value` is matched against labels; otherwise identifiers.
    pub by_label: bool,
    /// Optional element kind restriction (e.g., "Button").
    pub kind: Option<String>,
}

/// A named boolean-valued element property the state waiter can probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementState {
    /// The selector resolves to a node in the current tree.
    #[default]
    Exists,
    /// The node exists and a tap at its location would land on it.
    Hittable,
    /// The node exists and accepts interaction.
    Enabled,
    /// The node exists and is selected.
    Selected,
    /// The node exists and has input focus.
    ///
    /// Desktop-class targets have no focus probe; building with the
    /// `desktop` feature removes this variant.
    #[cfg(not(feature = "desktop"))]
    Focused,
}

impl ElementState {
    /// Returns a short, static name for this state, used in tracing
    /// metadata.
    pub fn name(&self) -> &'static str {
        match self {
            ElementState::Exists => "exists",
            ElementState::Hittable => "hittable",
            ElementState::Enabled => "enabled",
            ElementState::Selected => "selected",
            #[cfg(not(feature = "desktop"))]
            ElementState::Focused => "focused",
        }
    }
}

/// A re-resolvable handle to a UI element.
///
/// Cloning is cheap; clones share the driver.
#[derive(Clone)]
pub struct Element {
    driver: Arc<dyn AutomationDriver>,
    selector: Selector,
}

impl Element {
    /// An element located by accessibility identifier.
    pub fn by_id(driver: Arc<dyn AutomationDriver>, identifier: impl Into<String>) -> Self {
        Self {
            driver,
            selector: Selector {
                value: identifier.into(),
                by_label: false,
                kind: None,
            },
        }
    }

    /// An element located by accessibility label.
    pub fn by_label(driver: Arc<dyn AutomationDriver>, label: impl Into<String>) -> Self {
        Self {
            driver,
            selector: Selector {
                value: label.into(),
                by_label: true,
                kind: None,
            },
        }
    }

    /// Restricts the selector to an element kind (e.g., "Button").
    pub fn of_kind(mut self, kind: impl Into<String>) -> Self {
        self.selector.kind = Some(kind.into());
        self
    }

    /// The selector this handle resolves with.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Resolves the handle against a fresh tree snapshot.
    ///
    /// `Ok(None)` means the tree was readable but nothing matched the
    /// selector.
    pub async fn snapshot(&self) -> Result<Option<AxNode>, DriverError> {
        let tree = self.driver.dump_tree().await?;
        Ok(find_node(
            &tree,
            &self.selector.value,
            self.selector.by_label,
            self.selector.kind.as_deref(),
        )
        .cloned())
    }

    /// Probes a named state against a fresh snapshot.
    ///
    /// Absent `hittable`/`enabled` flags on an existing node count as
    /// hittable/enabled; backends typically only report these when they
    /// are off. `Selected` and focus require an explicit flag.
    pub async fn state(&self, state: ElementState) -> Result<bool, DriverError> {
        let node = self.snapshot().await?;
        Ok(match state {
            ElementState::Exists => node.is_some(),
            ElementState::Hittable => node.is_some_and(|n| n.hittable != Some(false)),
            ElementState::Enabled => node.is_some_and(|n| n.enabled != Some(false)),
            ElementState::Selected => node.is_some_and(|n| n.selected == Some(true)),
            #[cfg(not(feature = "desktop"))]
            ElementState::Focused => node.is_some_and(|n| n.focused == Some(true)),
        })
    }

    /// Whether the selector currently resolves to a node.
    pub async fn exists(&self) -> Result<bool, DriverError> {
        self.state(ElementState::Exists).await
    }

    /// Whether the element currently accepts a tap at its location.
    pub async fn is_hittable(&self) -> Result<bool, DriverError> {
        self.state(ElementState::Hittable).await
    }

    /// Whether the element currently accepts interaction.
    pub async fn is_enabled(&self) -> Result<bool, DriverError> {
        self.state(ElementState::Enabled).await
    }

    /// Whether the element is currently selected.
    pub async fn is_selected(&self) -> Result<bool, DriverError> {
        self.state(ElementState::Selected).await
    }

    /// Whether the element currently has input focus.
    #[cfg(not(feature = "desktop"))]
    pub async fn is_focused(&self) -> Result<bool, DriverError> {
        self.state(ElementState::Focused).await
    }

    /// Taps at a normalized offset within the element's current frame,
    /// regardless of its state.
    ///
    /// `(0.0, 0.0)` is the top-left corner of the frame, `(1.0, 1.0)` the
    /// bottom-right; offsets outside `[0.0, 1.0]` extrapolate outside the
    /// frame. No hittability or enabled check happens first; this is the
    /// escape hatch for elements the backend mis-reports as untappable.
    pub async fn tap_at_offset(&self, dx: f64, dy: f64) -> Result<(), DriverError> {
        let node = self.snapshot().await?.ok_or_else(|| {
            DriverError::CommandFailed(format!("element '{}' not found", self.selector.value))
        })?;
        let frame = node.frame.ok_or_else(|| {
            DriverError::CommandFailed(format!("element '{}' has no frame", self.selector.value))
        })?;

        let (x, y) = frame.point_at(dx, dy);
        debug!(selector = %self.selector.value, x, y, "tap at offset");
        self.driver.tap_location(x, y).await
    }

    /// Taps the center of the element's current frame, regardless of its
    /// state.
    pub async fn tap(&self) -> Result<(), DriverError> {
        self.tap_at_offset(0.5, 0.5).await
    }

    /// Finds sibling elements of `sibling_kind` under a shared parent of
    /// `parent_kind`.
    ///
    /// The whole tree is searched for parents of `parent_kind`; the first
    /// one (depth-first pre-order) whose direct children contain a node
    /// identity-equal to this element — by non-empty identifier, falling
    /// back to non-empty label — wins. The returned query yields that
    /// parent's children of `sibling_kind`, excluding this element by
    /// whichever attribute matched, and re-runs the search on every access.
    ///
    /// `Ok(None)` when this element cannot be resolved, carries neither an
    /// identifier nor a label, or no parent contains it.
    pub async fn siblings(
        &self,
        sibling_kind: &str,
        parent_kind: &str,
    ) -> Result<Option<ElementQuery>, DriverError> {
        let tree = self.driver.dump_tree().await?;
        let Some(node) = find_node(
            &tree,
            &self.selector.value,
            self.selector.by_label,
            self.selector.kind.as_deref(),
        ) else {
            return Ok(None);
        };

        let identifier = node.identifier.clone().unwrap_or_default();
        let label = node.label.clone().unwrap_or_default();
        if identifier.is_empty() && label.is_empty() {
            return Ok(None);
        }

        if find_siblings(&tree, &identifier, &label, sibling_kind, parent_kind).is_none() {
            return Ok(None);
        }

        Ok(Some(ElementQuery::siblings_of(
            Arc::clone(&self.driver),
            identifier,
            label,
            sibling_kind.to_string(),
            parent_kind.to_string(),
        )))
    }
}
