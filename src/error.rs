use thiserror::Error;

use crate::filter::FilterKind;
use crate::ldap_lib::LdapResultCode;

/// Failure to evaluate or walk a filter tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{kind} filter must have exactly {expected} children, found {found}")]
    Arity {
        kind: FilterKind,
        expected: usize,
        found: usize,
    },

    #[error("Substrings filter has no substring segments")]
    EmptySubstrings,

    #[error("{kind} filter carries a value that is not valid UTF-8")]
    InvalidUtf8 { kind: FilterKind },

    #[error("{0} filters are not supported")]
    Unsupported(FilterKind),

    #[error("Filter nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

impl FilterError {
    /// Protocol code reported for this failure
    pub fn result_code(&self) -> LdapResultCode {
        LdapResultCode::OperationsError
    }

    /// True for malformed trees, false for well-formed filters of an unsupported kind
    pub fn is_structural(&self) -> bool {
        !matches!(self, FilterError::Unsupported(_))
    }
}

/// Protocol result code paired with a diagnostic message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("LDAP Result Code {} \"{}\": {}", .code.code(), .code.description(), .message)]
pub struct LdapError {
    pub code: LdapResultCode,
    pub message: String,
}

impl LdapError {
    pub fn new(code: LdapResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<FilterError> for LdapError {
    fn from(err: FilterError) -> Self {
        LdapError::new(err.result_code(), err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directory store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Ldap(#[from] LdapError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(FilterError::EmptySubstrings.is_structural());
        assert!(FilterError::DepthExceeded { limit: 4 }.is_structural());
        assert!(!FilterError::Unsupported(FilterKind::ApproxMatch).is_structural());
    }

    #[test]
    fn test_every_filter_error_is_an_operations_error() {
        let errors = [
            FilterError::EmptySubstrings,
            FilterError::Unsupported(FilterKind::LessOrEqual),
            FilterError::InvalidUtf8 {
                kind: FilterKind::Present,
            },
        ];
        for err in errors {
            assert_eq!(err.result_code(), LdapResultCode::OperationsError);
        }
    }

    #[test]
    fn test_ldap_error_display() {
        let err = LdapError::new(LdapResultCode::NoSuchObject, "entry missing");
        assert_eq!(
            err.to_string(),
            "LDAP Result Code 32 \"No Such Object\": entry missing"
        );
    }

    #[test]
    fn test_ldap_error_from_filter_error() {
        let err: LdapError = FilterError::Unsupported(FilterKind::GreaterOrEqual).into();
        assert_eq!(err.code, LdapResultCode::OperationsError);
        assert_eq!(err.message, "Greater Or Equal filters are not supported");
    }
}
