//! Compare operation (RFC 4511 Section 4.10)
//!
//! Answers an attribute value assertion against a single entry using the same
//! case-insensitive equality semantics as equality-match filters.

use serde::{Deserialize, Serialize};

use crate::ldap_lib::LdapResultCode;
use crate::models::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValueAssertion {
    pub attribute_desc: String,
    pub assertion_value: String,
}

impl AttributeValueAssertion {
    pub fn new(attribute_desc: &str, assertion_value: &str) -> Self {
        Self {
            attribute_desc: attribute_desc.to_string(),
            assertion_value: assertion_value.to_string(),
        }
    }
}

/// `CompareTrue`, `CompareFalse`, or `NoSuchAttribute` when the entry lacks the attribute
pub fn compare(entry: &Entry, assertion: &AttributeValueAssertion) -> LdapResultCode {
    if !entry.has_attribute(&assertion.attribute_desc) {
        return LdapResultCode::NoSuchAttribute;
    }

    if entry.has_value(&assertion.attribute_desc, &assertion.assertion_value) {
        LdapResultCode::CompareTrue
    } else {
        LdapResultCode::CompareFalse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry::new("cn=john,ou=acme,dc=example,dc=com")
            .with_attribute("cn", &["john"])
            .with_attribute("mail", &["john@acme.test"])
    }

    #[test]
    fn test_compare_true() {
        let ava = AttributeValueAssertion::new("CN", "JOHN");
        assert_eq!(compare(&entry(), &ava), LdapResultCode::CompareTrue);
    }

    #[test]
    fn test_compare_false() {
        let ava = AttributeValueAssertion::new("mail", "jane@acme.test");
        assert_eq!(compare(&entry(), &ava), LdapResultCode::CompareFalse);
    }

    #[test]
    fn test_compare_missing_attribute() {
        let ava = AttributeValueAssertion::new("telephoneNumber", "555");
        assert_eq!(compare(&entry(), &ava), LdapResultCode::NoSuchAttribute);
    }
}
