/// Tests for filter evaluation through the public API
///
/// This test suite ensures that:
/// 1. Equality and presence ignore case, substrings do not
/// 2. AND / OR / NOT propagate errors and results in evaluation order
/// 3. Unsupported filter kinds report an operations error for every entry
/// 4. Entries materialized from JSON evaluate the same as built ones
use ldap_filter_rs::{
    evaluate, Entry, FilterEvaluator, FilterKind, FilterNode, LdapResultCode, SubstringSegment,
};

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: LdapResultCode = LdapResultCode::Success;
    const OPERATIONS_ERROR: LdapResultCode = LdapResultCode::OperationsError;

    fn directory() -> Vec<Entry> {
        serde_json::from_str(
            r#"[
                {
                    "dn": "cn=alice,ou=people,dc=example,dc=com",
                    "attributes": [
                        {"name": "CN", "values": ["alice", "bob"]},
                        {"name": "objectClass", "values": ["top", "person", "inetOrgPerson"]},
                        {"name": "mail", "values": ["alice@example.com"]}
                    ]
                },
                {
                    "dn": "cn=admins,ou=groups,dc=example,dc=com",
                    "attributes": [
                        {"name": "cn", "values": ["admins"]},
                        {"name": "objectClass", "values": ["groupOfNames"]},
                        {"name": "member", "values": ["cn=alice,ou=people,dc=example,dc=com"]}
                    ]
                },
                {
                    "dn": "cn=empty,dc=example,dc=com"
                }
            ]"#,
        )
        .expect("fixture should deserialize")
    }

    fn alice() -> Entry {
        directory().remove(0)
    }

    #[test]
    fn test_equality_example_from_directory() {
        let entry = Entry::new("cn=alice").with_attribute("CN", &["alice", "bob"]);
        assert_eq!(
            evaluate(&FilterNode::equality("cn", "Alice"), &entry),
            (true, SUCCESS)
        );
    }

    #[test]
    fn test_filter_selects_expected_entries() {
        let filter = FilterNode::or(vec![
            FilterNode::equality("objectClass", "GROUPOFNAMES"),
            FilterNode::substrings("mail", [SubstringSegment::final_("@example.com")]),
        ]);
        let matched: Vec<String> = directory()
            .into_iter()
            .filter(|e| evaluate(&filter, e) == (true, SUCCESS))
            .map(|e| e.dn)
            .collect();
        assert_eq!(
            matched,
            vec![
                "cn=alice,ou=people,dc=example,dc=com".to_string(),
                "cn=admins,ou=groups,dc=example,dc=com".to_string(),
            ]
        );
    }

    #[test]
    fn test_entry_without_attributes() {
        let entry = directory().remove(2);
        assert_eq!(
            evaluate(&FilterNode::present("cn"), &entry),
            (false, SUCCESS)
        );
        assert_eq!(
            evaluate(&FilterNode::not(FilterNode::present("cn")), &entry),
            (true, SUCCESS)
        );
    }

    #[test]
    fn test_presence_ignores_name_case() {
        assert_eq!(
            evaluate(&FilterNode::present("OBJECTCLASS"), &alice()),
            (true, SUCCESS)
        );
    }

    #[test]
    fn test_substring_value_case_matters() {
        let upper = FilterNode::substrings("mail", [SubstringSegment::any("EXAMPLE")]);
        let lower = FilterNode::substrings("mail", [SubstringSegment::any("example")]);
        assert_eq!(evaluate(&upper, &alice()), (false, SUCCESS));
        assert_eq!(evaluate(&lower, &alice()), (true, SUCCESS));
    }

    #[test]
    fn test_substrings_consult_first_segment_only() {
        let entry = Entry::new("cn=x").with_attribute("cn", &["xycd"]);
        let filter = FilterNode::substrings(
            "cn",
            [SubstringSegment::initial("ab"), SubstringSegment::any("cd")],
        );
        assert_eq!(evaluate(&filter, &entry), (false, SUCCESS));
    }

    #[test]
    fn test_substrings_wrong_arity() {
        let filter = FilterNode::new(
            FilterKind::Substrings,
            Vec::new(),
            vec![FilterNode::value("cn")],
        );
        assert_eq!(evaluate(&filter, &alice()), (false, OPERATIONS_ERROR));
    }

    #[test]
    fn test_or_reports_later_error_after_non_match() {
        let filter = FilterNode::or(vec![
            FilterNode::equality("cn", "x"),
            FilterNode::greater_or_equal("uidNumber", "1"),
        ]);
        for entry in directory() {
            assert_eq!(evaluate(&filter, &entry), (false, OPERATIONS_ERROR));
        }
    }

    #[test]
    fn test_greater_or_equal_never_evaluates() {
        let filter = FilterNode::greater_or_equal("cn", "a");
        for entry in directory() {
            assert_eq!(evaluate(&filter, &entry), (false, OPERATIONS_ERROR));
        }
    }

    #[test]
    fn test_double_negation() {
        let entry = alice();
        let hit = FilterNode::equality("cn", "bob");
        let miss = FilterNode::equality("cn", "carol");
        let broken = FilterNode::approx_match("cn", "bob");

        // A matching child under NOT yields (false, Success), so negating twice
        // restores the inner outcome for match and no-match alike.
        assert_eq!(
            evaluate(&FilterNode::not(FilterNode::not(hit.clone())), &entry),
            evaluate(&hit, &entry)
        );
        assert_eq!(
            evaluate(&FilterNode::not(FilterNode::not(miss.clone())), &entry),
            evaluate(&miss, &entry)
        );
        assert_eq!(
            evaluate(&FilterNode::not(FilterNode::not(broken)), &entry),
            (false, OPERATIONS_ERROR)
        );
        assert_eq!(evaluate(&FilterNode::not(hit), &entry), (false, SUCCESS));
    }

    #[test]
    fn test_empty_and_or_convention() {
        for entry in directory() {
            assert_eq!(evaluate(&FilterNode::and(vec![]), &entry), (true, SUCCESS));
            assert_eq!(evaluate(&FilterNode::or(vec![]), &entry), (false, SUCCESS));
        }
    }

    #[test]
    fn test_deeply_nested_filter_is_rejected() {
        let mut filter = FilterNode::present("cn");
        for _ in 0..200 {
            filter = FilterNode::not(filter);
        }
        let evaluator = FilterEvaluator::default();
        let err = evaluator.try_evaluate(&filter, &alice()).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(
            evaluator.evaluate(&filter, &alice()),
            (false, OPERATIONS_ERROR)
        );
    }

    #[test]
    fn test_unsupported_is_not_structural() {
        let err = FilterEvaluator::default()
            .try_evaluate(&FilterNode::approx_match("cn", "alise"), &alice())
            .unwrap_err();
        assert!(!err.is_structural());
        assert_eq!(err.result_code(), OPERATIONS_ERROR);
    }
}
