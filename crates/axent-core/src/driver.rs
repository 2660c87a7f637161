//! Automation driver trait for backend-agnostic UI automation.
//!
//! This module defines the [`AutomationDriver`] trait, the seam between this
//! library and whatever actually owns the UI: an on-device accessibility
//! agent, a CLI inspection tool, or a test double. Everything above this
//! seam works on tree snapshots; the two required methods are a fresh
//! snapshot and a tap at absolute coordinates.
//!
//! The free functions in this module are the pure snapshot searches that
//! back element resolution and query evaluation. They take `&[AxNode]` and
//! never touch a backend, which keeps them trivially unit-testable.

use async_trait::async_trait;
use thiserror::Error;

use crate::node::AxNode;

/// Errors that can occur during automation driver operations.
///
/// This enum unifies errors from all backends behind a single type, so
/// consumers can handle failures uniformly regardless of the underlying
/// automation backend.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or operation failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// An operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

/// Trait for backend-agnostic UI automation.
///
/// Implementors provide a point-in-time snapshot of the accessibility tree
/// and a way to deliver a tap at absolute screen coordinates. Everything
/// else in this library — state probes, waiting, text-predicate queries,
/// sibling discovery, offset taps — is built on those two operations.
///
/// All methods are async so that both synchronous CLI tools (wrapped in
/// `spawn_blocking`) and native async backends fit behind the same seam.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// Get a fresh snapshot of the full accessibility tree.
    ///
    /// Returns the root nodes of the tree for the current screen. Each node
    /// may contain nested children. Callers must not cache the result when
    /// they need current state; the tree is a copy, not a live view.
    async fn dump_tree(&self) -> Result<Vec<AxNode>, DriverError>;

    /// Synthesize a tap at absolute screen coordinates.
    ///
    /// Coordinates are in screen points. No element lookup or state check
    /// happens here; the tap lands wherever the point is.
    async fn tap_location(&self, x: f64, y: f64) -> Result<(), DriverError>;
}

/// Finds the first node matching a selector, depth-first pre-order.
///
/// `by_label` selects which attribute the selector is compared against
/// (label vs identifier); the comparison is exact. When `kind` is given the
/// node's element kind must also match.
pub fn find_node<'a>(
    nodes: &'a [AxNode],
    selector: &str,
    by_label: bool,
    kind: Option<&str>,
) -> Option<&'a AxNode> {
    for node in nodes {
        let selector_matches = if by_label {
            node.label.as_deref() == Some(selector)
        } else {
            node.identifier.as_deref() == Some(selector)
        };

        let kind_matches = match kind {
            Some(k) => node.kind.as_deref() == Some(k),
            None => true,
        };

        if selector_matches && kind_matches {
            return Some(node);
        }

        if let Some(found) = find_node(&node.children, selector, by_label, kind) {
            return Some(found);
        }
    }
    None
}

/// Collects every node of the given kind, depth-first pre-order.
///
/// With `kind` of `None`, every node in the tree is collected. Nested
/// matches are included: a matching node's descendants are still visited.
pub fn collect_kind<'a>(nodes: &'a [AxNode], kind: Option<&str>, out: &mut Vec<&'a AxNode>) {
    for node in nodes {
        let kind_matches = match kind {
            Some(k) => node.kind.as_deref() == Some(k),
            None => true,
        };
        if kind_matches {
            out.push(node);
        }
        collect_kind(&node.children, kind, out);
    }
}

/// Finds the sibling set of an element identified by `identifier`/`label`.
///
/// Walks every node of `parent_kind` in depth-first pre-order. For each
/// candidate parent, its direct children are scanned in order; a child is
/// identity-equal to the target when its identifier equals a non-empty
/// `identifier`, falling back to a non-empty `label` comparison. The first
/// candidate parent containing such a child wins: the result is that
/// parent's direct children of `sibling_kind`, excluding nodes equal to the
/// target by whichever attribute matched.
///
/// Returns `None` when no candidate parent contains a matching child. When
/// several parents could match, tree order decides; callers that need a
/// deterministic answer should give the target a unique identifier.
pub fn find_siblings(
    nodes: &[AxNode],
    identifier: &str,
    label: &str,
    sibling_kind: &str,
    parent_kind: &str,
) -> Option<Vec<AxNode>> {
    let mut parents = Vec::new();
    collect_kind(nodes, Some(parent_kind), &mut parents);

    for parent in parents {
        for child in &parent.children {
            let by_identifier =
                !identifier.is_empty() && child.identifier.as_deref() == Some(identifier);
            let by_label =
                !by_identifier && !label.is_empty() && child.label.as_deref() == Some(label);

            if !(by_identifier || by_label) {
                continue;
            }

            let siblings = parent
                .children
                .iter()
                .filter(|c| c.kind.as_deref() == Some(sibling_kind))
                .filter(|c| {
                    if by_identifier {
                        c.identifier.as_deref() != Some(identifier)
                    } else {
                        c.label.as_deref() != Some(label)
                    }
                })
                .cloned()
                .collect();
            return Some(siblings);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: &str) -> AxNode {
        AxNode {
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    fn node_with_id(kind: &str, id: &str) -> AxNode {
        AxNode {
            identifier: Some(id.to_string()),
            ..node(kind)
        }
    }

    fn node_with_label(kind: &str, label: &str) -> AxNode {
        AxNode {
            label: Some(label.to_string()),
            ..node(kind)
        }
    }

    #[test]
    fn driver_error_display() {
        let err = DriverError::CommandFailed("tap failed".to_string());
        assert!(err.to_string().contains("tap failed"));

        let err = DriverError::NotConnected;
        assert!(err.to_string().contains("Not connected"));

        let err = DriverError::Timeout;
        assert!(err.to_string().contains("timed out"));

        let err = DriverError::JsonParse("unexpected token".to_string());
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn find_node_by_identifier() {
        let tree = vec![AxNode {
            children: vec![node_with_id("Button", "submit")],
            ..node("View")
        }];

        let found = find_node(&tree, "submit", false, None);
        assert!(found.is_some());
        assert_eq!(found.unwrap().kind.as_deref(), Some("Button"));

        assert!(find_node(&tree, "cancel", false, None).is_none());
    }

    #[test]
    fn find_node_by_label_with_kind_filter() {
        let tree = vec![
            node_with_label("StaticText", "Submit"),
            node_with_label("Button", "Submit"),
        ];

        let found = find_node(&tree, "Submit", true, Some("Button"));
        assert!(found.is_some());
        assert_eq!(found.unwrap().kind.as_deref(), Some("Button"));

        assert!(find_node(&tree, "Submit", true, Some("Switch")).is_none());
    }

    #[test]
    fn find_node_ignores_label_when_matching_identifier() {
        let tree = vec![node_with_label("Button", "submit")];
        assert!(find_node(&tree, "submit", false, None).is_none());
    }

    #[test]
    fn collect_kind_is_preorder_and_includes_nested() {
        let tree = vec![AxNode {
            children: vec![
                AxNode {
                    children: vec![node_with_id("Cell", "inner")],
                    ..node_with_id("Cell", "outer")
                },
                node_with_id("Cell", "last"),
            ],
            ..node("Table")
        }];

        let mut cells = Vec::new();
        collect_kind(&tree, Some("Cell"), &mut cells);
        let ids: Vec<_> = cells.iter().map(|c| c.identifier.as_deref()).collect();
        assert_eq!(ids, vec![Some("outer"), Some("inner"), Some("last")]);
    }

    #[test]
    fn find_siblings_excludes_matched_identifier() {
        // Parent of kind "Stack" with children A(id=s1), B(id=s1), C(id=other).
        let tree = vec![AxNode {
            children: vec![
                node_with_id("ImageView", "s1"),
                node_with_id("Button", "s1"),
                node_with_id("Button", "other"),
            ],
            ..node("Stack")
        }];

        let siblings = find_siblings(&tree, "s1", "", "Button", "Stack").unwrap();
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].identifier.as_deref(), Some("other"));
    }

    #[test]
    fn find_siblings_falls_back_to_label() {
        let tree = vec![AxNode {
            children: vec![
                node_with_label("StaticText", "Price"),
                node_with_label("StaticText", "Total"),
                node_with_label("Button", "Price"),
            ],
            ..node("Row")
        }];

        // No identifier anywhere, so the label comparison decides identity
        // and the exclusion.
        let siblings = find_siblings(&tree, "", "Price", "StaticText", "Row").unwrap();
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].label.as_deref(), Some("Total"));
    }

    #[test]
    fn find_siblings_first_parent_in_preorder_wins() {
        let first = AxNode {
            children: vec![
                node_with_id("Button", "target"),
                node_with_id("Button", "from-first"),
            ],
            ..node("Stack")
        };
        let second = AxNode {
            children: vec![
                node_with_id("Button", "target"),
                node_with_id("Button", "from-second"),
            ],
            ..node("Stack")
        };
        let tree = vec![first, second];

        let siblings = find_siblings(&tree, "target", "", "Button", "Stack").unwrap();
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].identifier.as_deref(), Some("from-first"));
    }

    #[test]
    fn find_siblings_none_without_matching_parent() {
        let tree = vec![AxNode {
            children: vec![node_with_id("Button", "elsewhere")],
            ..node("Stack")
        }];

        assert!(find_siblings(&tree, "target", "", "Button", "Stack").is_none());
        // Right child, wrong parent kind.
        assert!(find_siblings(&tree, "elsewhere", "", "Button", "Row").is_none());
    }

    #[test]
    fn find_siblings_empty_identity_never_matches() {
        // Children with no identifier and no label must not be treated as
        // identity-equal to a target with empty identifier and label.
        let tree = vec![AxNode {
            children: vec![node("Button"), node("Button")],
            ..node("Stack")
        }];

        assert!(find_siblings(&tree, "", "", "Button", "Stack").is_none());
    }

    #[test]
    fn find_siblings_can_return_empty_set() {
        // Identity match succeeds but no children carry the sibling kind.
        let tree = vec![AxNode {
            children: vec![node_with_id("ImageView", "target")],
            ..node("Stack")
        }];

        let siblings = find_siblings(&tree, "target", "", "Button", "Stack").unwrap();
        assert!(siblings.is_empty());
    }
}
