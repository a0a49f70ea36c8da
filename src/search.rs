//! Search Handling
//!
//! Ties the objectClass extractor and the filter evaluator to a
//! [`DirectoryStore`]: the filter is walked once to narrow the candidate set,
//! then every candidate is evaluated in store order.
//!
//! # Result Codes
//! - `Success`: all candidates evaluated
//! - `SizeLimitExceeded`: more entries matched than the configured limit; the
//!   entries up to the limit are returned
//! - any evaluation failure aborts the search with an [`LdapError`]
//! - a store failure is returned as is and counted as `Unavailable`

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::DirectoryStore;
use crate::error::{LdapError, Result};
use crate::evaluator::FilterEvaluator;
use crate::filter::FilterTree;
use crate::ldap_lib::LdapResultCode;
use crate::metrics::{record_filter_evaluation, record_search, EvaluationOutcome};
use crate::models::Entry;
use crate::object_class::ObjectClassExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub entries: Vec<Entry>,
    pub result_code: LdapResultCode,
}

pub struct SearchHandler {
    store: Arc<dyn DirectoryStore>,
    evaluator: FilterEvaluator,
    extractor: ObjectClassExtractor,
    size_limit: Option<usize>,
}

impl SearchHandler {
    pub fn new(store: Arc<dyn DirectoryStore>, config: &Config) -> Self {
        Self {
            store,
            evaluator: FilterEvaluator::from_config(config),
            extractor: ObjectClassExtractor::from_config(config),
            size_limit: config.search_size_limit,
        }
    }

    pub async fn search<F: FilterTree>(&self, filter: &F) -> Result<SearchOutcome> {
        let object_class = self.extractor.extract(filter).map_err(|e| {
            warn!("Rejecting search filter: {}", e);
            record_search(e.result_code());
            LdapError::from(e)
        })?;
        debug!("Search routed on objectClass '{}'", object_class);

        let candidates = self.store.candidates(&object_class).await.map_err(|e| {
            warn!("Error loading search candidates: {}", e);
            record_search(LdapResultCode::Unavailable);
            e
        })?;

        let mut entries = Vec::new();
        let mut result_code = LdapResultCode::Success;

        for entry in candidates {
            match self.evaluator.try_evaluate(filter, &entry) {
                Ok(true) => {
                    record_filter_evaluation(EvaluationOutcome::Match);
                    if self.size_limit == Some(entries.len()) {
                        result_code = LdapResultCode::SizeLimitExceeded;
                        break;
                    }
                    entries.push(entry);
                }
                Ok(false) => record_filter_evaluation(EvaluationOutcome::NoMatch),
                Err(e) => {
                    record_filter_evaluation(EvaluationOutcome::Error);
                    record_search(e.result_code());
                    warn!("Filter evaluation failed on '{}': {}", entry.dn, e);
                    return Err(LdapError::from(e).into());
                }
            }
        }

        info!(
            "Search finished: {} entries, result {}",
            entries.len(),
            result_code.description()
        );
        record_search(result_code);
        Ok(SearchOutcome {
            entries,
            result_code,
        })
    }
}
