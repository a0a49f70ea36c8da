//! LDAP Filter Trees
//!
//! Filters arrive already compiled by an external filter compiler. The evaluator and
//! the objectClass extractor only need a narrow view of such a tree: the node kind,
//! its ordered children and the raw leaf payload. That view is the [`FilterTree`]
//! trait; [`FilterNode`] is the owned implementation used by this crate and its tests.
//!
//! # Filter Shapes (RFC 4511 Section 4.5.1)
//! ```text
//! and             [0] SET OF Filter
//! or              [1] SET OF Filter
//! not             [2] Filter                     -> exactly one child
//! equalityMatch   [3] AttributeValueAssertion    -> children: attribute, value
//! substrings      [4] SubstringFilter            -> children: attribute, SEQUENCE of segments
//! greaterOrEqual  [5] AttributeValueAssertion
//! lessOrEqual     [6] AttributeValueAssertion
//! present         [7] AttributeDescription       -> payload: attribute
//! approxMatch     [8] AttributeValueAssertion
//! extensibleMatch [9] MatchingRuleAssertion
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FilterError;

/// Position of a substring segment inside a substrings filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstringKind {
    Initial,
    Any,
    Final,
}

/// Kind of a node in a filter tree
///
/// The first ten variants are the filter choices of the protocol grammar. The
/// remaining ones describe the component nodes hanging below an equality or
/// substrings filter, plus any tag the compiler produced that is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    And,
    Or,
    Not,
    EqualityMatch,
    Substrings,
    GreaterOrEqual,
    LessOrEqual,
    Present,
    ApproxMatch,
    ExtensibleMatch,
    /// Attribute description or assertion value leaf
    Value,
    /// Container of substring segments
    SubstringList,
    /// One substring segment
    Substring(SubstringKind),
    Unknown(u8),
}

impl FilterKind {
    /// Maps a context-specific filter choice tag to its kind
    ///
    /// # Examples
    /// ```
    /// use ldap_filter_rs::filter::FilterKind;
    ///
    /// assert_eq!(FilterKind::from_tag(3), FilterKind::EqualityMatch);
    /// assert_eq!(FilterKind::from_tag(7), FilterKind::Present);
    /// assert_eq!(FilterKind::from_tag(42), FilterKind::Unknown(42));
    /// ```
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0 => FilterKind::And,
            1 => FilterKind::Or,
            2 => FilterKind::Not,
            3 => FilterKind::EqualityMatch,
            4 => FilterKind::Substrings,
            5 => FilterKind::GreaterOrEqual,
            6 => FilterKind::LessOrEqual,
            7 => FilterKind::Present,
            8 => FilterKind::ApproxMatch,
            9 => FilterKind::ExtensibleMatch,
            other => FilterKind::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::And => "And",
            FilterKind::Or => "Or",
            FilterKind::Not => "Not",
            FilterKind::EqualityMatch => "Equality Match",
            FilterKind::Substrings => "Substrings",
            FilterKind::GreaterOrEqual => "Greater Or Equal",
            FilterKind::LessOrEqual => "Less Or Equal",
            FilterKind::Present => "Present",
            FilterKind::ApproxMatch => "Approx Match",
            FilterKind::ExtensibleMatch => "Extensible Match",
            FilterKind::Value => "Value",
            FilterKind::SubstringList => "Substring List",
            FilterKind::Substring(SubstringKind::Initial) => "Substring Initial",
            FilterKind::Substring(SubstringKind::Any) => "Substring Any",
            FilterKind::Substring(SubstringKind::Final) => "Substring Final",
            FilterKind::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Unknown(tag) => write!(f, "Unknown (tag {})", tag),
            kind => f.write_str(kind.name()),
        }
    }
}

/// Read-only traversal over a compiled filter tree
pub trait FilterTree: Sized {
    fn kind(&self) -> FilterKind;

    fn children(&self) -> &[Self];

    /// Raw leaf payload; empty for composite nodes
    fn payload(&self) -> &[u8];

    fn text(&self) -> Option<&str> {
        std::str::from_utf8(self.payload()).ok()
    }
}

/// Owned filter tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterNode {
    pub kind: FilterKind,
    #[serde(default)]
    pub payload: Vec<u8>,
    #[serde(default)]
    pub children: Vec<FilterNode>,
}

/// One segment of a substrings filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstringSegment {
    pub kind: SubstringKind,
    pub value: Vec<u8>,
}

impl SubstringSegment {
    pub fn initial(value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: SubstringKind::Initial,
            value: value.into(),
        }
    }

    pub fn any(value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: SubstringKind::Any,
            value: value.into(),
        }
    }

    pub fn final_(value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: SubstringKind::Final,
            value: value.into(),
        }
    }
}

impl FilterNode {
    /// Builds a node without checking its shape, for trees handed over by a compiler
    pub fn new(kind: FilterKind, payload: Vec<u8>, children: Vec<FilterNode>) -> Self {
        Self {
            kind,
            payload,
            children,
        }
    }

    pub fn value(payload: impl Into<Vec<u8>>) -> Self {
        Self::new(FilterKind::Value, payload.into(), Vec::new())
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        Self::new(FilterKind::And, Vec::new(), children)
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        Self::new(FilterKind::Or, Vec::new(), children)
    }

    /// Negation of `child`
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FilterNode) -> Self {
        Self::new(FilterKind::Not, Vec::new(), vec![child])
    }

    pub fn equality(attribute: &str, value: &str) -> Self {
        Self::assertion(FilterKind::EqualityMatch, attribute, value)
    }

    pub fn present(attribute: &str) -> Self {
        Self::new(FilterKind::Present, attribute.as_bytes().to_vec(), Vec::new())
    }

    pub fn substrings(
        attribute: &str,
        segments: impl IntoIterator<Item = SubstringSegment>,
    ) -> Self {
        let list = segments
            .into_iter()
            .map(|s| Self::new(FilterKind::Substring(s.kind), s.value, Vec::new()))
            .collect();
        Self::new(
            FilterKind::Substrings,
            Vec::new(),
            vec![
                Self::value(attribute),
                Self::new(FilterKind::SubstringList, Vec::new(), list),
            ],
        )
    }

    pub fn greater_or_equal(attribute: &str, value: &str) -> Self {
        Self::assertion(FilterKind::GreaterOrEqual, attribute, value)
    }

    pub fn less_or_equal(attribute: &str, value: &str) -> Self {
        Self::assertion(FilterKind::LessOrEqual, attribute, value)
    }

    pub fn approx_match(attribute: &str, value: &str) -> Self {
        Self::assertion(FilterKind::ApproxMatch, attribute, value)
    }

    fn assertion(kind: FilterKind, attribute: &str, value: &str) -> Self {
        Self::new(
            kind,
            Vec::new(),
            vec![Self::value(attribute), Self::value(value)],
        )
    }
}

impl FilterTree for FilterNode {
    fn kind(&self) -> FilterKind {
        self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Text payload of a leaf, or a structural error naming the filter it belongs to
pub(crate) fn leaf_text<F: FilterTree>(leaf: &F, kind: FilterKind) -> Result<&str, FilterError> {
    leaf.text().ok_or(FilterError::InvalidUtf8 { kind })
}

/// Attribute and value of an attribute value assertion (equality match and friends)
pub(crate) fn attribute_value_assertion<F: FilterTree>(
    filter: &F,
) -> Result<(&str, &str), FilterError> {
    let kind = filter.kind();
    match filter.children() {
        [attribute, value] => Ok((leaf_text(attribute, kind)?, leaf_text(value, kind)?)),
        children => Err(FilterError::Arity {
            kind,
            expected: 2,
            found: children.len(),
        }),
    }
}
