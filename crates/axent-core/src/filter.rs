//! Text filter expressions for element queries.
//!
//! A [`TextFilter`] is a structured description of a text match: one element
//! attribute, one match mode, a case flag, and one or more texts combined
//! via [`Combine`]. Filters are plain data until a query evaluates them;
//! [`TextFilter::compile`] produces the matcher that is run against node
//! snapshots. Building the expression as a tagged tree instead of
//! interpolating a predicate string means literal values containing quotes
//! or pattern metacharacters cannot corrupt the filter.

use regex::RegexBuilder;
use tracing::warn;

use crate::node::AxNode;

/// The element attribute a text filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAttribute {
    /// The accessibility label.
    Label,
    /// The current value.
    Value,
    /// The placeholder text.
    PlaceholderValue,
    /// The accessibility identifier.
    Identifier,
}

impl TextAttribute {
    /// Returns a short, static name for this attribute, used in tracing
    /// metadata.
    pub fn name(&self) -> &'static str {
        match self {
            TextAttribute::Label => "label",
            TextAttribute::Value => "value",
            TextAttribute::PlaceholderValue => "placeholder_value",
            TextAttribute::Identifier => "identifier",
        }
    }
}

/// How a single text is compared against an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Substring containment.
    Containing,
    /// Full-pattern regex match over the entire attribute value.
    Matching,
}

/// How the per-text sub-matches of a filter combine into one verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// Every sub-match must hold.
    #[default]
    And,
    /// At least one sub-match must hold.
    Or,
    /// No sub-match may hold.
    Not,
}

/// A text filter over one element attribute.
///
/// Constructed with a single text (the minimum arity); more texts are
/// appended with [`text`](Self::text). Defaults: combined with
/// [`Combine::And`], case-sensitive.
///
/// ```
/// use axent_core::filter::{Combine, TextAttribute, TextFilter};
///
/// let filter = TextFilter::containing(TextAttribute::Label, "Save")
///     .text("Draft")
///     .combine(Combine::Or)
///     .case_insensitive();
/// ```
#[derive(Debug, Clone)]
pub struct TextFilter {
    attribute: TextAttribute,
    mode: MatchMode,
    texts: Vec<String>,
    combine: Combine,
    case_sensitive: bool,
}

impl TextFilter {
    /// A substring-containment filter on `attribute`.
    pub fn containing(attribute: TextAttribute, text: impl Into<String>) -> Self {
        Self::new(attribute, MatchMode::Containing, text)
    }

    /// A full-pattern regex filter on `attribute`.
    ///
    /// The pattern must match the entire attribute value. An invalid
    /// pattern is reported once at evaluation time and matches nothing.
    pub fn matching(attribute: TextAttribute, pattern: impl Into<String>) -> Self {
        Self::new(attribute, MatchMode::Matching, pattern)
    }

    pub(crate) fn new(attribute: TextAttribute, mode: MatchMode, text: impl Into<String>) -> Self {
        Self {
            attribute,
            mode,
            texts: vec![text.into()],
            combine: Combine::And,
            case_sensitive: true,
        }
    }

    /// Appends another text; sub-matches are combined per
    /// [`combine`](Self::combine).
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.texts.push(text.into());
        self
    }

    /// Sets how the per-text sub-matches combine.
    pub fn combine(mut self, combine: Combine) -> Self {
        self.combine = combine;
        self
    }

    /// Makes every sub-match case-insensitive.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// The attribute this filter compares against.
    pub fn attribute(&self) -> TextAttribute {
        self.attribute
    }

    /// Compiles the filter into the matcher queries run against snapshots.
    pub(crate) fn compile(&self) -> CompiledFilter {
        let matchers = self
            .texts
            .iter()
            .map(|text| match self.mode {
                MatchMode::Containing => {
                    if self.case_sensitive {
                        Matcher::Contains(text.clone())
                    } else {
                        Matcher::ContainsFolded(text.to_lowercase())
                    }
                }
                MatchMode::Matching => {
                    // Anchor so the pattern must cover the whole value.
                    let anchored = format!("^(?:{})$", text);
                    let regex = RegexBuilder::new(&anchored)
                        .case_insensitive(!self.case_sensitive)
                        .build();
                    match regex {
                        Ok(re) => Matcher::Pattern(Box::new(re)),
                        Err(error) => {
                            warn!(
                                attribute = self.attribute.name(),
                                pattern = %text,
                                %error,
                                "invalid match pattern; matches nothing"
                            );
                            Matcher::Never
                        }
                    }
                }
            })
            .collect();

        CompiledFilter {
            attribute: self.attribute,
            combine: self.combine,
            matchers,
        }
    }
}

/// A compiled filter, ready to test nodes.
#[derive(Debug)]
pub(crate) struct CompiledFilter {
    attribute: TextAttribute,
    combine: Combine,
    matchers: Vec<Matcher>,
}

#[derive(Debug)]
enum Matcher {
    Contains(String),
    ContainsFolded(String),
    Pattern(Box<regex::Regex>),
    /// Stand-in for a pattern that failed to compile.
    Never,
}

impl Matcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::Contains(needle) => value.contains(needle.as_str()),
            Matcher::ContainsFolded(needle) => value.to_lowercase().contains(needle.as_str()),
            Matcher::Pattern(regex) => regex.is_match(value),
            Matcher::Never => false,
        }
    }
}

impl CompiledFilter {
    /// Tests a node against the filter.
    ///
    /// A node without the attribute fails every sub-match, so it is dropped
    /// by `And`/`Or` filters and retained by `Not`.
    pub(crate) fn matches(&self, node: &AxNode) -> bool {
        let Some(value) = node.attribute(self.attribute) else {
            return self.combine == Combine::Not;
        };

        match self.combine {
            Combine::And => self.matchers.iter().all(|m| m.matches(value)),
            Combine::Or => self.matchers.iter().any(|m| m.matches(value)),
            Combine::Not => !self.matchers.iter().any(|m| m.matches(value)),
        }
    }
}
