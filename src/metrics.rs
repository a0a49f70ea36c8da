//! Prometheus counters for search handling
//!
//! Counters live in the default registry and are registered on first use.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, CounterVec};

use crate::ldap_lib::LdapResultCode;

/// Per-entry filter evaluations (match / no_match / error)
pub static FILTER_EVALUATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ldap_filter_evaluations_total",
        "Total number of filter evaluations against directory entries",
        &["outcome"]
    )
    .expect("Failed to register filter_evaluations counter")
});

/// Completed searches by result code
pub static SEARCH_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ldap_filter_search_requests_total",
        "Total number of search requests handled",
        &["result"]
    )
    .expect("Failed to register search_requests counter")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationOutcome {
    Match,
    NoMatch,
    Error,
}

/// Helper function to record one filter evaluation
pub fn record_filter_evaluation(outcome: EvaluationOutcome) {
    let outcome = match outcome {
        EvaluationOutcome::Match => "match",
        EvaluationOutcome::NoMatch => "no_match",
        EvaluationOutcome::Error => "error",
    };
    FILTER_EVALUATIONS.with_label_values(&[outcome]).inc();
}

/// Helper function to record a finished search
pub fn record_search(code: LdapResultCode) {
    let label = code.description().to_ascii_lowercase().replace(' ', "_");
    SEARCH_REQUESTS.with_label_values(&[label.as_str()]).inc();
}
