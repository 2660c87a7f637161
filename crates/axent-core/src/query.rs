//! Lazy element queries.
//!
//! An [`ElementQuery`] is an immutable description of a collection of
//! nodes: a driver, a scope, an optional element-kind restriction, and a
//! list of text filters. Filtering methods return a new query value;
//! nothing touches the backend until an accessor runs, and every accessor
//! works on a fresh tree snapshot, so repeated evaluation tracks the live
//! UI.

use std::sync::Arc;

use tracing::debug;

use crate::driver::{collect_kind, find_siblings, AutomationDriver, DriverError};
use crate::filter::{MatchMode, TextAttribute, TextFilter};
use crate::node::AxNode;

/// What part of the tree a query draws its candidate nodes from.
#[derive(Debug, Clone)]
enum QueryScope {
    /// Every node in the tree.
    Tree,
    /// The sibling set of a previously identified element; the search
    /// re-runs on every evaluation with the identity captured at build
    /// time.
    Siblings {
        identifier: String,
        label: String,
        sibling_kind: String,
        parent_kind: String,
    },
}

/// A lazy, re-evaluated-on-access collection of element nodes.
///
/// Cloning is cheap; clones share the driver.
#[derive(Clone)]
pub struct ElementQuery {
    driver: Arc<dyn AutomationDriver>,
    scope: QueryScope,
    kind: Option<String>,
    filters: Vec<TextFilter>,
}

impl ElementQuery {
    /// A query over every node in the tree.
    pub fn tree(driver: Arc<dyn AutomationDriver>) -> Self {
        Self {
            driver,
            scope: QueryScope::Tree,
            kind: None,
            filters: Vec::new(),
        }
    }

    pub(crate) fn siblings_of(
        driver: Arc<dyn AutomationDriver>,
        identifier: String,
        label: String,
        sibling_kind: String,
        parent_kind: String,
    ) -> Self {
        Self {
            driver,
            scope: QueryScope::Siblings {
                identifier,
                label,
                sibling_kind,
                parent_kind,
            },
            kind: None,
            filters: Vec::new(),
        }
    }

    /// Restricts the query to an element kind (e.g., "Button").
    pub fn of_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Returns a query with an additional text filter.
    ///
    /// Filters accumulate: a node must pass every filter applied to the
    /// query.
    pub fn filtered(mut self, filter: TextFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Labels containing every given substring (case-sensitive).
    pub fn label_containing(self, texts: &[&str]) -> Self {
        self.text_filter(TextAttribute::Label, MatchMode::Containing, texts)
    }

    /// Labels fully matching every given pattern.
    pub fn label_matching(self, patterns: &[&str]) -> Self {
        self.text_filter(TextAttribute::Label, MatchMode::Matching, patterns)
    }

    /// Values containing every given substring (case-sensitive).
    pub fn value_containing(self, texts: &[&str]) -> Self {
        self.text_filter(TextAttribute::Value, MatchMode::Containing, texts)
    }

    /// Values fully matching every given pattern.
    pub fn value_matching(self, patterns: &[&str]) -> Self {
        self.text_filter(TextAttribute::Value, MatchMode::Matching, patterns)
    }

    /// Placeholder values containing every given substring
    /// (case-sensitive).
    pub fn placeholder_containing(self, texts: &[&str]) -> Self {
        self.text_filter(TextAttribute::PlaceholderValue, MatchMode::Containing, texts)
    }

    /// Placeholder values fully matching every given pattern.
    pub fn placeholder_matching(self, patterns: &[&str]) -> Self {
        self.text_filter(TextAttribute::PlaceholderValue, MatchMode::Matching, patterns)
    }

    /// Identifiers containing every given substring (case-sensitive).
    pub fn identifier_containing(self, texts: &[&str]) -> Self {
        self.text_filter(TextAttribute::Identifier, MatchMode::Containing, texts)
    }

    /// Identifiers fully matching every given pattern.
    pub fn identifier_matching(self, patterns: &[&str]) -> Self {
        self.text_filter(TextAttribute::Identifier, MatchMode::Matching, patterns)
    }

    /// Shared body of the convenience filter grid. Combine mode and case
    /// handling come from [`TextFilter`] defaults (And, case-sensitive);
    /// use [`filtered`](Self::filtered) for full control. An empty slice
    /// adds no filter.
    fn text_filter(self, attribute: TextAttribute, mode: MatchMode, texts: &[&str]) -> Self {
        let Some((first, rest)) = texts.split_first() else {
            return self;
        };
        let mut filter = TextFilter::new(attribute, mode, *first);
        for text in rest {
            filter = filter.text(*text);
        }
        self.filtered(filter)
    }

    /// Evaluates the query against a fresh tree snapshot.
    pub async fn all(&self) -> Result<Vec<AxNode>, DriverError> {
        let tree = self.driver.dump_tree().await?;

        let mut nodes: Vec<AxNode> = match &self.scope {
            QueryScope::Tree => {
                let mut collected = Vec::new();
                collect_kind(&tree, self.kind.as_deref(), &mut collected);
                collected.into_iter().cloned().collect()
            }
            QueryScope::Siblings {
                identifier,
                label,
                sibling_kind,
                parent_kind,
            } => {
                let siblings =
                    find_siblings(&tree, identifier, label, sibling_kind, parent_kind)
                        .unwrap_or_default();
                match self.kind.as_deref() {
                    Some(kind) => siblings
                        .into_iter()
                        .filter(|n| n.kind.as_deref() == Some(kind))
                        .collect(),
                    None => siblings,
                }
            }
        };

        for filter in &self.filters {
            let compiled = filter.compile();
            nodes.retain(|node| compiled.matches(node));
        }

        debug!(count = nodes.len(), filters = self.filters.len(), "query evaluated");
        Ok(nodes)
    }

    /// The number of nodes the query currently matches.
    pub async fn count(&self) -> Result<usize, DriverError> {
        Ok(self.all().await?.len())
    }

    /// The node at `index` in tree order, if the query currently matches
    /// that many.
    pub async fn element_bound_by(&self, index: usize) -> Result<Option<AxNode>, DriverError> {
        let mut nodes = self.all().await?;
        if index < nodes.len() {
            Ok(Some(nodes.swap_remove(index)))
        } else {
            Ok(None)
        }
    }

    /// The first matching node in tree order, if any.
    pub async fn first(&self) -> Result<Option<AxNode>, DriverError> {
        Ok(self.all().await?.into_iter().next())
    }
}
