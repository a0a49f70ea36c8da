//! LDAP search filter evaluation
//!
//! - [`evaluator`]: decides whether an entry matches a compiled filter tree
//! - [`object_class`]: finds the objectClass a filter asserts, for search routing
//! - [`ldap_lib`]: result codes and decoding of `LDAPResult` responses
//! - [`search`]: runs a filter over the candidates of a [`db::DirectoryStore`]

pub mod compare;
pub mod config;
pub mod db;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod ldap_lib;
pub mod metrics;
pub mod models;
pub mod object_class;
pub mod search;

pub use config::Config;
pub use error::{AppError, FilterError, LdapError, Result};
pub use evaluator::{evaluate, FilterEvaluator};
pub use filter::{FilterKind, FilterNode, FilterTree, SubstringKind, SubstringSegment};
pub use ldap_lib::{check_result, decode_result, LdapResultCode, Packet};
pub use models::{Attribute, Entry};
pub use object_class::{extract_object_class, ObjectClassExtractor};
pub use search::{SearchHandler, SearchOutcome};
