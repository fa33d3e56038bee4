/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Decoded fields and well-known tags.
//!
//! This module provides:
//! - [`Field`]: A decoded (tag, raw value) pair
//! - [`tags`]: Tag numbers the validator and loader need by number

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag numbers with fixed meaning across protocol versions.
pub mod tags {
    /// BeginString (8).
    pub const BEGIN_STRING: u32 = 8;
    /// BodyLength (9).
    pub const BODY_LENGTH: u32 = 9;
    /// CheckSum (10).
    pub const CHECK_SUM: u32 = 10;
    /// MsgType (35).
    pub const MSG_TYPE: u32 = 35;
    /// First tag of the user-defined range.
    pub const USER_MIN: u32 = 5000;
}

/// A decoded field: tag number and raw string value.
///
/// Values are kept exactly as they appeared on the wire; interpretation is
/// left to the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// The field tag number.
    pub tag: u32,
    /// The raw field value.
    pub value: String,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The raw value
    #[inline]
    #[must_use]
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Parses the value as the specified type.
    ///
    /// # Returns
    /// `None` if the value does not parse.
    #[must_use]
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.value.parse().ok()
    }

    /// Returns true if this tag is in the user-defined range.
    #[inline]
    #[must_use]
    pub const fn is_user_defined(&self) -> bool {
        self.tag >= tags::USER_MIN
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let field = Field::new(11, "ORDER123");
        assert_eq!(field.as_str(), "ORDER123");
        assert!(!field.is_empty());
        assert!(!field.is_user_defined());
        assert!(Field::new(5001, "x").is_user_defined());
    }

    #[test]
    fn test_field_parse() {
        let field = Field::new(38, "100");
        assert_eq!(field.parse::<u32>(), Some(100));
        assert_eq!(Field::new(38, "abc").parse::<u32>(), None);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new(35, "D").to_string(), "35=D");
    }
}
