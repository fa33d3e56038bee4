/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for IronSpec.
//!
//! This module provides the error hierarchy using `thiserror`:
//! - [`ValidationError`]: the first rule a message violates
//! - [`SpecificationError`]: failures while loading or writing a specification
//! - [`FormatError`]: a raw value rejected by its field type converter

use crate::types::FieldType;
use thiserror::Error;

/// Result type alias using [`IronSpecError`] as the error type.
pub type Result<T> = std::result::Result<T, IronSpecError>;

/// Top-level error type for all IronSpec operations.
#[derive(Debug, Error)]
pub enum IronSpecError {
    /// A message failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A specification document could not be loaded.
    #[error("specification error: {0}")]
    Specification(#[from] SpecificationError),

    /// A raw value could not be converted.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Message validation failures.
///
/// Validation is fail-fast: only the first violated rule is reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Message type is not defined in the dictionary.
    #[error("invalid message type: {msg_type}")]
    InvalidMessageType {
        /// The offending MsgType value.
        msg_type: String,
    },

    /// Message BeginString does not match the dictionary version.
    #[error("unsupported version: expected {expected}, received {actual}")]
    UnsupportedVersion {
        /// Version of the dictionary.
        expected: String,
        /// BeginString carried by the message.
        actual: String,
    },

    /// Tag is not defined in the dictionary.
    #[error("invalid tag number: {tag}")]
    InvalidTagNumber {
        /// The offending tag.
        tag: u32,
    },

    /// Value does not convert to the field's declared type.
    #[error("incorrect data format for value: tag {tag}")]
    IncorrectDataFormat {
        /// The offending tag.
        tag: u32,
    },

    /// Value is not one of the field's enumerated values.
    #[error("value is incorrect (out of range) for this tag: {tag}")]
    IncorrectTagValue {
        /// The offending tag.
        tag: u32,
    },

    /// Field is present with an empty value.
    #[error("tag specified without a value: {tag}")]
    NoTagValue {
        /// The offending tag.
        tag: u32,
    },

    /// Field is not allowed in its section for this message type.
    #[error("tag not defined for this message type: {tag}")]
    TagNotDefinedForMessage {
        /// The offending tag.
        tag: u32,
    },

    /// Field appears before a field declared ahead of it.
    #[error("tag specified out of required order: {tag}")]
    TagOutOfOrder {
        /// The offending tag.
        tag: u32,
    },

    /// Group instance does not start with its delimiter field.
    #[error("repeating group fields out of order: {tag}")]
    RepeatingGroupFieldsOutOfOrder {
        /// The first tag of the offending instance.
        tag: u32,
    },

    /// NumInGroup value differs from the number of instances present.
    #[error("incorrect NumInGroup count for repeating group: {tag}")]
    RepeatingGroupCountMismatch {
        /// The group count tag.
        tag: u32,
    },

    /// A required field is missing.
    #[error("required tag missing: {tag}")]
    RequiredTagMissing {
        /// The missing tag.
        tag: u32,
    },
}

impl ValidationError {
    /// Returns the tag this error refers to, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<u32> {
        match self {
            Self::InvalidMessageType { .. } | Self::UnsupportedVersion { .. } => None,
            Self::InvalidTagNumber { tag }
            | Self::IncorrectDataFormat { tag }
            | Self::IncorrectTagValue { tag }
            | Self::NoTagValue { tag }
            | Self::TagNotDefinedForMessage { tag }
            | Self::TagOutOfOrder { tag }
            | Self::RepeatingGroupFieldsOutOfOrder { tag }
            | Self::RepeatingGroupCountMismatch { tag }
            | Self::RequiredTagMissing { tag } => Some(*tag),
        }
    }

    /// Returns the SessionRejectReason (tag 373) code for this error.
    ///
    /// `UnsupportedVersion` has no reject reason; sessions answer it with a Logout.
    #[must_use]
    pub const fn reject_reason(&self) -> Option<u32> {
        match self {
            Self::InvalidTagNumber { .. } => Some(0),
            Self::RequiredTagMissing { .. } => Some(1),
            Self::TagNotDefinedForMessage { .. } => Some(2),
            Self::NoTagValue { .. } => Some(4),
            Self::IncorrectTagValue { .. } => Some(5),
            Self::IncorrectDataFormat { .. } => Some(6),
            Self::InvalidMessageType { .. } => Some(11),
            Self::TagOutOfOrder { .. } => Some(14),
            Self::RepeatingGroupFieldsOutOfOrder { .. } => Some(15),
            Self::RepeatingGroupCountMismatch { .. } => Some(16),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

/// Errors raised while loading or writing a specification document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    /// Document is not well-formed XML.
    #[error("malformed document: {0}")]
    Xml(String),

    /// A mandatory element is absent.
    #[error("missing <{element}> element")]
    MissingElement {
        /// Name of the missing element.
        element: String,
    },

    /// A mandatory attribute is absent.
    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// An attribute has a value that cannot be interpreted.
    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Name of the attribute.
        attribute: String,
        /// The rejected value.
        value: String,
    },

    /// A member references a field name with no definition.
    #[error("unknown field reference: {name}")]
    UnknownField {
        /// The unresolved field name.
        name: String,
    },

    /// A member references a component with no definition.
    #[error("unknown component reference: {name}")]
    UnknownComponent {
        /// The unresolved component name.
        name: String,
    },

    /// A component includes itself, directly or transitively.
    #[error("recursive component reference: {name}")]
    RecursiveComponent {
        /// The component that closes the cycle.
        name: String,
    },

    /// A group declares no member fields, so it has no delimiter.
    #[error("group {name} has no member fields")]
    EmptyGroup {
        /// Name of the group count field.
        name: String,
    },

    /// A tag has no registered name and cannot be written back.
    #[error("field {tag} has no name")]
    UnnamedField {
        /// The unnamed tag.
        tag: u32,
    },

    /// The document could not be read.
    #[error("i/o error: {0}")]
    Io(String),
}

impl SpecificationError {
    /// Creates a missing attribute error.
    #[must_use]
    pub fn missing_attr(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Creates an invalid attribute error.
    #[must_use]
    pub fn invalid_attr(element: &str, attribute: &str, value: &str) -> Self {
        Self::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<std::io::Error> for SpecificationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// A raw value rejected by a field type converter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert '{value}' to {field_type}")]
pub struct FormatError {
    /// The type the value was checked against.
    pub field_type: FieldType,
    /// The rejected raw value.
    pub value: String,
}

impl FormatError {
    /// Creates a new format error.
    #[must_use]
    pub fn new(field_type: FieldType, value: &str) -> Self {
        Self {
            field_type,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::RequiredTagMissing { tag: 21 };
        assert_eq!(err.to_string(), "required tag missing: 21");
    }

    #[test]
    fn test_validation_error_tag() {
        assert_eq!(ValidationError::IncorrectDataFormat { tag: 55 }.tag(), Some(55));
        let err = ValidationError::InvalidMessageType {
            msg_type: "ZZ".to_string(),
        };
        assert_eq!(err.tag(), None);
    }

    #[test]
    fn test_reject_reason_codes() {
        assert_eq!(
            ValidationError::InvalidTagNumber { tag: 1 }.reject_reason(),
            Some(0)
        );
        assert_eq!(
            ValidationError::RepeatingGroupCountMismatch { tag: 78 }.reject_reason(),
            Some(16)
        );
        let err = ValidationError::UnsupportedVersion {
            expected: "FIX.4.4".to_string(),
            actual: "FIX.4.2".to_string(),
        };
        assert_eq!(err.reject_reason(), None);
    }

    #[test]
    fn test_ironspec_error_from_validation() {
        let err: IronSpecError = ValidationError::NoTagValue { tag: 58 }.into();
        assert!(matches!(
            err,
            IronSpecError::Validation(ValidationError::NoTagValue { tag: 58 })
        ));
    }

    #[test]
    fn test_specification_error_display() {
        let err = SpecificationError::missing_attr("field", "number");
        assert_eq!(err.to_string(), "missing attribute 'number' on <field>");
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::new(FieldType::Int, "xyz");
        assert_eq!(err.to_string(), "cannot convert 'xyz' to INT");
    }
}
