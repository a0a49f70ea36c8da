//! LDAP Result Codes and Response Decoding
//!
//! This module holds the protocol result code table and the generic packet tree
//! handed over by the wire codec, plus the function that pulls the `LDAPResult`
//! out of a decoded response.
//!
//! # LDAPResult (RFC 4511 Section 4.1.9)
//! ```text
//! LDAPMessage ::= SEQUENCE {
//!     messageID       MessageID,
//!     protocolOp      [APPLICATION n] SEQUENCE {
//!         resultCode         ENUMERATED,
//!         matchedDN          LDAPDN,
//!         diagnosticMessage  LDAPString,
//!         ... },
//!     ... }
//! ```
//!
//! # Local Codes
//! - 200: network error, used when a response cannot be interpreted at all

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LdapError;

/// Diagnostic returned alongside [`LdapResultCode::Network`] for malformed responses
pub const INVALID_PACKET_FORMAT: &str = "Invalid packet format";

/// LDAP Result Codes (RFC 4511 Appendix A)
///
/// Codes missing from the table are carried through unchanged as `Unrecognized`.
/// `Other` is the protocol's own code 80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LdapResultCode {
    Success,
    OperationsError,
    ProtocolError,
    TimeLimitExceeded,
    SizeLimitExceeded,
    CompareFalse,
    CompareTrue,
    AuthMethodNotSupported,
    StrongerAuthRequired,
    Referral,
    AdminLimitExceeded,
    UnavailableCriticalExtension,
    ConfidentialityRequired,
    SaslBindInProgress,
    NoSuchAttribute,
    UndefinedAttributeType,
    InappropriateMatching,
    ConstraintViolation,
    AttributeOrValueExists,
    InvalidAttributeSyntax,
    NoSuchObject,
    AliasProblem,
    InvalidDnSyntax,
    AliasDereferencingProblem,
    InappropriateAuthentication,
    InvalidCredentials,
    InsufficientAccessRights,
    Busy,
    Unavailable,
    UnwillingToPerform,
    LoopDetect,
    NamingViolation,
    ObjectClassViolation,
    NotAllowedOnNonLeaf,
    NotAllowedOnRdn,
    EntryAlreadyExists,
    ObjectClassModsProhibited,
    AffectsMultipleDsas,
    Other,
    /// Local sentinel for transport or decoding failures, never sent on the wire
    Network,
    Unrecognized(u64),
}

/// (code, variant) pairs for every code in the table, used for decoding
const RESULT_CODES: &[(u64, LdapResultCode)] = &[
    (0, LdapResultCode::Success),
    (1, LdapResultCode::OperationsError),
    (2, LdapResultCode::ProtocolError),
    (3, LdapResultCode::TimeLimitExceeded),
    (4, LdapResultCode::SizeLimitExceeded),
    (5, LdapResultCode::CompareFalse),
    (6, LdapResultCode::CompareTrue),
    (7, LdapResultCode::AuthMethodNotSupported),
    (8, LdapResultCode::StrongerAuthRequired),
    (10, LdapResultCode::Referral),
    (11, LdapResultCode::AdminLimitExceeded),
    (12, LdapResultCode::UnavailableCriticalExtension),
    (13, LdapResultCode::ConfidentialityRequired),
    (14, LdapResultCode::SaslBindInProgress),
    (16, LdapResultCode::NoSuchAttribute),
    (17, LdapResultCode::UndefinedAttributeType),
    (18, LdapResultCode::InappropriateMatching),
    (19, LdapResultCode::ConstraintViolation),
    (20, LdapResultCode::AttributeOrValueExists),
    (21, LdapResultCode::InvalidAttributeSyntax),
    (32, LdapResultCode::NoSuchObject),
    (33, LdapResultCode::AliasProblem),
    (34, LdapResultCode::InvalidDnSyntax),
    (36, LdapResultCode::AliasDereferencingProblem),
    (48, LdapResultCode::InappropriateAuthentication),
    (49, LdapResultCode::InvalidCredentials),
    (50, LdapResultCode::InsufficientAccessRights),
    (51, LdapResultCode::Busy),
    (52, LdapResultCode::Unavailable),
    (53, LdapResultCode::UnwillingToPerform),
    (54, LdapResultCode::LoopDetect),
    (64, LdapResultCode::NamingViolation),
    (65, LdapResultCode::ObjectClassViolation),
    (66, LdapResultCode::NotAllowedOnNonLeaf),
    (67, LdapResultCode::NotAllowedOnRdn),
    (68, LdapResultCode::EntryAlreadyExists),
    (69, LdapResultCode::ObjectClassModsProhibited),
    (71, LdapResultCode::AffectsMultipleDsas),
    (80, LdapResultCode::Other),
    (200, LdapResultCode::Network),
];

impl LdapResultCode {
    /// Numeric value of the code
    ///
    /// # Examples
    /// ```
    /// use ldap_filter_rs::ldap_lib::LdapResultCode;
    ///
    /// assert_eq!(LdapResultCode::InvalidCredentials.code(), 49);
    /// assert_eq!(LdapResultCode::from(49), LdapResultCode::InvalidCredentials);
    /// assert_eq!(LdapResultCode::from(4711).code(), 4711);
    /// ```
    pub fn code(self) -> u64 {
        match self {
            LdapResultCode::Success => 0,
            LdapResultCode::OperationsError => 1,
            LdapResultCode::ProtocolError => 2,
            LdapResultCode::TimeLimitExceeded => 3,
            LdapResultCode::SizeLimitExceeded => 4,
            LdapResultCode::CompareFalse => 5,
            LdapResultCode::CompareTrue => 6,
            LdapResultCode::AuthMethodNotSupported => 7,
            LdapResultCode::StrongerAuthRequired => 8,
            LdapResultCode::Referral => 10,
            LdapResultCode::AdminLimitExceeded => 11,
            LdapResultCode::UnavailableCriticalExtension => 12,
            LdapResultCode::ConfidentialityRequired => 13,
            LdapResultCode::SaslBindInProgress => 14,
            LdapResultCode::NoSuchAttribute => 16,
            LdapResultCode::UndefinedAttributeType => 17,
            LdapResultCode::InappropriateMatching => 18,
            LdapResultCode::ConstraintViolation => 19,
            LdapResultCode::AttributeOrValueExists => 20,
            LdapResultCode::InvalidAttributeSyntax => 21,
            LdapResultCode::NoSuchObject => 32,
            LdapResultCode::AliasProblem => 33,
            LdapResultCode::InvalidDnSyntax => 34,
            LdapResultCode::AliasDereferencingProblem => 36,
            LdapResultCode::InappropriateAuthentication => 48,
            LdapResultCode::InvalidCredentials => 49,
            LdapResultCode::InsufficientAccessRights => 50,
            LdapResultCode::Busy => 51,
            LdapResultCode::Unavailable => 52,
            LdapResultCode::UnwillingToPerform => 53,
            LdapResultCode::LoopDetect => 54,
            LdapResultCode::NamingViolation => 64,
            LdapResultCode::ObjectClassViolation => 65,
            LdapResultCode::NotAllowedOnNonLeaf => 66,
            LdapResultCode::NotAllowedOnRdn => 67,
            LdapResultCode::EntryAlreadyExists => 68,
            LdapResultCode::ObjectClassModsProhibited => 69,
            LdapResultCode::AffectsMultipleDsas => 71,
            LdapResultCode::Other => 80,
            LdapResultCode::Network => 200,
            LdapResultCode::Unrecognized(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == LdapResultCode::Success
    }

    pub fn description(self) -> &'static str {
        match self {
            LdapResultCode::Success => "Success",
            LdapResultCode::OperationsError => "Operations Error",
            LdapResultCode::ProtocolError => "Protocol Error",
            LdapResultCode::TimeLimitExceeded => "Time Limit Exceeded",
            LdapResultCode::SizeLimitExceeded => "Size Limit Exceeded",
            LdapResultCode::CompareFalse => "Compare False",
            LdapResultCode::CompareTrue => "Compare True",
            LdapResultCode::AuthMethodNotSupported => "Auth Method Not Supported",
            LdapResultCode::StrongerAuthRequired => "Stronger Auth Required",
            LdapResultCode::Referral => "Referral",
            LdapResultCode::AdminLimitExceeded => "Admin Limit Exceeded",
            LdapResultCode::UnavailableCriticalExtension => "Unavailable Critical Extension",
            LdapResultCode::ConfidentialityRequired => "Confidentiality Required",
            LdapResultCode::SaslBindInProgress => "Sasl Bind In Progress",
            LdapResultCode::NoSuchAttribute => "No Such Attribute",
            LdapResultCode::UndefinedAttributeType => "Undefined Attribute Type",
            LdapResultCode::InappropriateMatching => "Inappropriate Matching",
            LdapResultCode::ConstraintViolation => "Constraint Violation",
            LdapResultCode::AttributeOrValueExists => "Attribute Or Value Exists",
            LdapResultCode::InvalidAttributeSyntax => "Invalid Attribute Syntax",
            LdapResultCode::NoSuchObject => "No Such Object",
            LdapResultCode::AliasProblem => "Alias Problem",
            LdapResultCode::InvalidDnSyntax => "Invalid DN Syntax",
            LdapResultCode::AliasDereferencingProblem => "Alias Dereferencing Problem",
            LdapResultCode::InappropriateAuthentication => "Inappropriate Authentication",
            LdapResultCode::InvalidCredentials => "Invalid Credentials",
            LdapResultCode::InsufficientAccessRights => "Insufficient Access Rights",
            LdapResultCode::Busy => "Busy",
            LdapResultCode::Unavailable => "Unavailable",
            LdapResultCode::UnwillingToPerform => "Unwilling To Perform",
            LdapResultCode::LoopDetect => "Loop Detect",
            LdapResultCode::NamingViolation => "Naming Violation",
            LdapResultCode::ObjectClassViolation => "Object Class Violation",
            LdapResultCode::NotAllowedOnNonLeaf => "Not Allowed On Non Leaf",
            LdapResultCode::NotAllowedOnRdn => "Not Allowed On RDN",
            LdapResultCode::EntryAlreadyExists => "Entry Already Exists",
            LdapResultCode::ObjectClassModsProhibited => "Object Class Mods Prohibited",
            LdapResultCode::AffectsMultipleDsas => "Affects Multiple DSAs",
            LdapResultCode::Other => "Other",
            LdapResultCode::Network => "Network Error",
            LdapResultCode::Unrecognized(_) => "Unknown Result Code",
        }
    }
}

impl From<u64> for LdapResultCode {
    fn from(code: u64) -> Self {
        RESULT_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, variant)| *variant)
            .unwrap_or(LdapResultCode::Unrecognized(code))
    }
}

/// BER tag class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagClass {
    Universal,
    Application,
    Context,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagType {
    Primitive,
    Constructed,
}

/// Decoded value of a primitive packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketValue {
    None,
    Integer(u64),
    Boolean(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl PacketValue {
    fn as_integer(&self) -> Option<u64> {
        match self {
            PacketValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            PacketValue::Text(text) => Some(text),
            PacketValue::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

/// Generic packet tree produced by the wire codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub class: TagClass,
    pub tag_type: TagType,
    pub tag: u8,
    pub value: PacketValue,
    pub children: Vec<Packet>,
}

impl Packet {
    pub fn primitive(class: TagClass, tag: u8, value: PacketValue) -> Self {
        Self {
            class,
            tag_type: TagType::Primitive,
            tag,
            value,
            children: Vec::new(),
        }
    }

    pub fn constructed(class: TagClass, tag: u8, children: Vec<Packet>) -> Self {
        Self {
            class,
            tag_type: TagType::Constructed,
            tag,
            value: PacketValue::None,
            children,
        }
    }

    /// Universal SEQUENCE
    pub fn sequence(children: Vec<Packet>) -> Self {
        Self::constructed(TagClass::Universal, 0x10, children)
    }

    /// Universal INTEGER
    pub fn integer(value: u64) -> Self {
        Self::primitive(TagClass::Universal, 0x02, PacketValue::Integer(value))
    }

    /// Universal ENUMERATED
    pub fn enumerated(value: u64) -> Self {
        Self::primitive(TagClass::Universal, 0x0a, PacketValue::Integer(value))
    }

    /// Universal OCTET STRING holding text
    pub fn octet_string(value: &str) -> Self {
        Self::primitive(
            TagClass::Universal,
            0x04,
            PacketValue::Text(value.to_string()),
        )
    }

    /// Response message carrying an `LDAPResult` as its protocol operation
    pub fn ldap_result(
        message_id: u64,
        op_tag: u8,
        code: u64,
        matched_dn: &str,
        message: &str,
    ) -> Self {
        Self::sequence(vec![
            Self::integer(message_id),
            Self::constructed(
                TagClass::Application,
                op_tag,
                vec![
                    Self::enumerated(code),
                    Self::octet_string(matched_dn),
                    Self::octet_string(message),
                ],
            ),
        ])
    }
}

/// Extracts the result code and diagnostic message from a response
///
/// The code is passed through without checking it against the table. Any packet
/// whose protocol operation is not an application-class constructed node with
/// exactly three children decodes to [`LdapResultCode::Network`] and
/// [`INVALID_PACKET_FORMAT`].
///
/// # Examples
/// ```
/// use ldap_filter_rs::ldap_lib::{decode_result, LdapResultCode, Packet};
///
/// let response = Packet::ldap_result(1, 1, 49, "", "bad password");
/// let (code, message) = decode_result(&response);
/// assert_eq!(code, LdapResultCode::InvalidCredentials);
/// assert_eq!(message, "bad password");
/// ```
pub fn decode_result(packet: &Packet) -> (LdapResultCode, String) {
    if let Some((code, message)) = result_fields(packet) {
        return (LdapResultCode::from(code), message.to_string());
    }

    debug!(
        "Rejecting response packet with {} top-level children",
        packet.children.len()
    );
    (LdapResultCode::Network, INVALID_PACKET_FORMAT.to_string())
}

/// Numeric code and diagnostic message of a well-formed response
fn result_fields(packet: &Packet) -> Option<(u64, &str)> {
    let response = packet.children.get(1)?;
    if response.class != TagClass::Application || response.tag_type != TagType::Constructed {
        return None;
    }
    match response.children.as_slice() {
        [code, _matched_dn, message] => Some((code.value.as_integer()?, message.value.as_text()?)),
        _ => None,
    }
}

/// Like [`decode_result`], but turns every non-success code into an error
pub fn check_result(packet: &Packet) -> Result<(), LdapError> {
    match decode_result(packet) {
        (LdapResultCode::Success, _) => Ok(()),
        (code, message) => Err(LdapError::new(code, message)),
    }
}
