//! Filter Evaluation
//!
//! Decides whether a single entry matches a compiled filter tree.
//!
//! # Outcomes
//! - `(true, Success)`: the entry matches
//! - `(false, Success)`: the entry does not match; evaluation itself succeeded
//! - `(false, OperationsError)`: the tree is malformed, too deep, or uses a filter
//!   kind this evaluator does not implement (ordering, approximate and extensible
//!   matches)
//!
//! # Matching Rules
//! - Attribute names always compare ASCII case-insensitively
//! - Equality values compare ASCII case-insensitively
//! - Substring segments compare byte for byte, and only the first segment of a
//!   substrings filter is consulted
//! - AND stops at the first non-matching child; OR evaluates every child and only
//!   stops early on an error
//! - An empty AND matches, an empty OR does not

use tracing::debug;

use crate::config::{Config, DEFAULT_MAX_FILTER_DEPTH};
use crate::error::FilterError;
use crate::filter::{attribute_value_assertion, leaf_text, FilterKind, FilterTree, SubstringKind};
use crate::ldap_lib::LdapResultCode;
use crate::models::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterEvaluator {
    max_depth: usize,
}

impl Default for FilterEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILTER_DEPTH)
    }
}

impl FilterEvaluator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_filter_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluates `filter` against `entry`, folding failures into the result code
    pub fn evaluate<F: FilterTree>(&self, filter: &F, entry: &Entry) -> (bool, LdapResultCode) {
        match self.try_evaluate(filter, entry) {
            Ok(matched) => (matched, LdapResultCode::Success),
            Err(err) => (false, err.result_code()),
        }
    }

    /// Same as [`evaluate`](Self::evaluate) but keeps the reason for a failure
    pub fn try_evaluate<F: FilterTree>(
        &self,
        filter: &F,
        entry: &Entry,
    ) -> Result<bool, FilterError> {
        self.apply(filter, entry, 1)
    }

    fn apply<F: FilterTree>(
        &self,
        filter: &F,
        entry: &Entry,
        depth: usize,
    ) -> Result<bool, FilterError> {
        if depth > self.max_depth {
            debug!("Filter depth {} exceeds limit {}", depth, self.max_depth);
            return Err(FilterError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match filter.kind() {
            FilterKind::EqualityMatch => {
                let (attribute, value) = attribute_value_assertion(filter)?;
                Ok(entry.has_value(attribute, value))
            }
            FilterKind::Present => {
                let attribute = leaf_text(filter, FilterKind::Present)?;
                Ok(entry.has_attribute(attribute))
            }
            FilterKind::And => {
                for child in filter.children() {
                    if !self.apply(child, entry, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            FilterKind::Or => {
                let mut any_matched = false;
                for child in filter.children() {
                    if self.apply(child, entry, depth + 1)? {
                        any_matched = true;
                    }
                }
                Ok(any_matched)
            }
            FilterKind::Not => match filter.children() {
                [child] => Ok(!self.apply(child, entry, depth + 1)?),
                children => Err(arity(FilterKind::Not, 1, children.len())),
            },
            FilterKind::Substrings => match_substrings(filter, entry),
            kind => {
                debug!("Cannot evaluate {} filter", kind);
                Err(FilterError::Unsupported(kind))
            }
        }
    }
}

fn match_substrings<F: FilterTree>(filter: &F, entry: &Entry) -> Result<bool, FilterError> {
    let [attribute, segments] = filter.children() else {
        return Err(arity(FilterKind::Substrings, 2, filter.children().len()));
    };
    let attribute = leaf_text(attribute, FilterKind::Substrings)?;
    // Only the first segment takes part in matching.
    let segment = segments
        .children()
        .first()
        .ok_or(FilterError::EmptySubstrings)?;
    let FilterKind::Substring(position) = segment.kind() else {
        return Ok(false);
    };
    let needle = segment.payload();

    Ok(entry.values_of(attribute).any(|value| {
        let value = value.as_bytes();
        match position {
            SubstringKind::Initial => value.starts_with(needle),
            SubstringKind::Any => contains(value, needle),
            SubstringKind::Final => value.ends_with(needle),
        }
    }))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn arity(kind: FilterKind, expected: usize, found: usize) -> FilterError {
    debug!(
        "{} filter has {} children, expected {}",
        kind, found, expected
    );
    FilterError::Arity {
        kind,
        expected,
        found,
    }
}

/// Evaluates with the default depth limit
///
/// # Examples
/// ```
/// use ldap_filter_rs::evaluator::evaluate;
/// use ldap_filter_rs::filter::FilterNode;
/// use ldap_filter_rs::ldap_lib::LdapResultCode;
/// use ldap_filter_rs::models::Entry;
///
/// let entry = Entry::new("cn=alice,dc=example,dc=com").with_attribute("CN", &["alice", "bob"]);
/// let filter = FilterNode::equality("cn", "Alice");
/// assert_eq!(evaluate(&filter, &entry), (true, LdapResultCode::Success));
/// ```
pub fn evaluate<F: FilterTree>(filter: &F, entry: &Entry) -> (bool, LdapResultCode) {
    FilterEvaluator::default().evaluate(filter, entry)
}
