//! ObjectClass Extraction
//!
//! Walks a filter looking for an `objectClass` equality assertion so a caller can
//! route a search before evaluating any entry. Only equality, AND, OR and NOT
//! take part in the walk; every other kind contributes nothing. When several
//! assertions are found the last one in tree order wins.

use tracing::debug;

use crate::config::{Config, DEFAULT_MAX_FILTER_DEPTH};
use crate::error::FilterError;
use crate::filter::{attribute_value_assertion, FilterKind, FilterTree};

const OBJECT_CLASS: &str = "objectclass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectClassExtractor {
    max_depth: usize,
}

impl Default for ObjectClassExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILTER_DEPTH)
    }
}

impl ObjectClassExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_filter_depth)
    }

    /// Lowercased objectClass asserted by `filter`, or an empty string if none
    pub fn extract<F: FilterTree>(&self, filter: &F) -> Result<String, FilterError> {
        Ok(self.walk(filter, 1)?.to_ascii_lowercase())
    }

    fn walk<F: FilterTree>(&self, filter: &F, depth: usize) -> Result<String, FilterError> {
        if depth > self.max_depth {
            debug!("Filter depth {} exceeds limit {}", depth, self.max_depth);
            return Err(FilterError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match filter.kind() {
            FilterKind::EqualityMatch => {
                let (attribute, value) = attribute_value_assertion(filter)?;
                if attribute.eq_ignore_ascii_case(OBJECT_CLASS) {
                    Ok(value.to_ascii_lowercase())
                } else {
                    Ok(String::new())
                }
            }
            FilterKind::And | FilterKind::Or => {
                let mut object_class = String::new();
                for child in filter.children() {
                    let found = self.walk(child, depth + 1)?;
                    if !found.is_empty() {
                        object_class = found;
                    }
                }
                Ok(object_class)
            }
            FilterKind::Not => match filter.children() {
                [child] => self.walk(child, depth + 1),
                children => Err(FilterError::Arity {
                    kind: FilterKind::Not,
                    expected: 1,
                    found: children.len(),
                }),
            },
            _ => Ok(String::new()),
        }
    }
}

/// Extracts with the default depth limit
///
/// # Examples
/// ```
/// use ldap_filter_rs::filter::FilterNode;
/// use ldap_filter_rs::object_class::extract_object_class;
///
/// let filter = FilterNode::and(vec![
///     FilterNode::equality("objectClass", "top"),
///     FilterNode::equality("objectClass", "Person"),
/// ]);
/// assert_eq!(extract_object_class(&filter).unwrap(), "person");
/// ```
pub fn extract_object_class<F: FilterTree>(filter: &F) -> Result<String, FilterError> {
    ObjectClassExtractor::default().extract(filter)
}
