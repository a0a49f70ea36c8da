/// Tests for objectClass extraction used to route searches
use ldap_filter_rs::{
    extract_object_class, FilterError, FilterKind, FilterNode, ObjectClassExtractor,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_non_empty_value_wins() {
        let filter = FilterNode::and(vec![
            FilterNode::equality("objectClass", "top"),
            FilterNode::equality("objectClass", "person"),
        ]);
        assert_eq!(extract_object_class(&filter).unwrap(), "person");
    }

    #[test]
    fn test_empty_values_do_not_overwrite() {
        let filter = FilterNode::and(vec![
            FilterNode::equality("objectClass", "posixGroup"),
            FilterNode::or(vec![
                FilterNode::equality("memberUid", "john"),
                FilterNode::equality("memberUid", "jane"),
            ]),
        ]);
        assert_eq!(extract_object_class(&filter).unwrap(), "posixgroup");
    }

    #[test]
    fn test_nested_composites() {
        let filter = FilterNode::or(vec![
            FilterNode::and(vec![
                FilterNode::equality("objectClass", "groupOfNames"),
                FilterNode::equality("cn", "admins"),
            ]),
            FilterNode::not(FilterNode::equality("ObjectClass", "Computer")),
        ]);
        assert_eq!(extract_object_class(&filter).unwrap(), "computer");
    }

    #[test]
    fn test_non_walked_root_yields_empty() {
        assert_eq!(
            extract_object_class(&FilterNode::present("objectClass")).unwrap(),
            ""
        );
        assert_eq!(
            extract_object_class(&FilterNode::approx_match("objectClass", "person")).unwrap(),
            ""
        );
        assert_eq!(extract_object_class(&FilterNode::and(vec![])).unwrap(), "");
    }

    #[test]
    fn test_equality_arity_error() {
        let filter = FilterNode::new(FilterKind::EqualityMatch, Vec::new(), Vec::new());
        assert_eq!(
            extract_object_class(&filter),
            Err(FilterError::Arity {
                kind: FilterKind::EqualityMatch,
                expected: 2,
                found: 0,
            })
        );
    }

    #[test]
    fn test_not_with_two_children_inside_and() {
        let bad_not = FilterNode::new(
            FilterKind::Not,
            Vec::new(),
            vec![FilterNode::present("cn"), FilterNode::present("sn")],
        );
        let filter = FilterNode::and(vec![FilterNode::equality("objectClass", "person"), bad_not]);
        assert!(extract_object_class(&filter).is_err());
    }

    #[test]
    fn test_depth_guard() {
        let mut filter = FilterNode::equality("objectClass", "top");
        for _ in 0..10 {
            filter = FilterNode::and(vec![filter]);
        }
        assert_eq!(
            ObjectClassExtractor::new(11).extract(&filter).unwrap(),
            "top"
        );
        assert_eq!(
            ObjectClassExtractor::new(10).extract(&filter),
            Err(FilterError::DepthExceeded { limit: 10 })
        );
    }
}
