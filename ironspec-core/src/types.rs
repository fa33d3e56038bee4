/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field type registry.
//!
//! [`FieldType`] is the closed set of semantic types a dictionary can declare
//! for a field. Each variant dispatches to a converter in [`crate::convert`];
//! `Unknown` is the type of any field whose type was never declared and
//! accepts every value.

use crate::convert;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldType {
    /// Free-form string.
    String,
    /// Single character.
    Char,
    /// Price.
    Price,
    /// Signed integer.
    Int,
    /// Amount (price * quantity).
    Amt,
    /// Quantity.
    Qty,
    /// Currency code (ISO 4217).
    Currency,
    /// Space-separated list of values.
    MultipleValueString,
    /// Exchange code (ISO 10383 MIC).
    Exchange,
    /// UTC timestamp.
    UtcTimeStamp,
    /// Boolean (Y/N).
    Boolean,
    /// Local market date.
    LocalMktDate,
    /// Raw data.
    Data,
    /// Floating point number.
    Float,
    /// Price offset.
    PriceOffset,
    /// Month-year.
    MonthYear,
    /// Day of month (1-31).
    DayOfMonth,
    /// UTC date only.
    UtcDate,
    /// UTC time only.
    UtcTimeOnly,
    /// Number of entries in a repeating group.
    NumInGroup,
    /// Percentage.
    Percentage,
    /// Sequence number.
    SeqNum,
    /// Length of a data field.
    Length,
    /// Country code (ISO 3166).
    Country,
    /// Type never declared; every value is accepted.
    #[default]
    Unknown,
}

impl FieldType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 25] = [
        Self::String,
        Self::Char,
        Self::Price,
        Self::Int,
        Self::Amt,
        Self::Qty,
        Self::Currency,
        Self::MultipleValueString,
        Self::Exchange,
        Self::UtcTimeStamp,
        Self::Boolean,
        Self::LocalMktDate,
        Self::Data,
        Self::Float,
        Self::PriceOffset,
        Self::MonthYear,
        Self::DayOfMonth,
        Self::UtcDate,
        Self::UtcTimeOnly,
        Self::NumInGroup,
        Self::Percentage,
        Self::SeqNum,
        Self::Length,
        Self::Country,
        Self::Unknown,
    ];

    /// Maps a specification type token to a field type.
    ///
    /// Matching is case-insensitive. Versions earlier than FIX.4.2 declared
    /// string fields as `CHAR`, so for those documents `CHAR` maps to `String`.
    ///
    /// # Arguments
    /// * `token` - The `type` attribute of a field definition
    /// * `version` - The version of the document being read
    #[must_use]
    pub fn from_xml(token: &str, version: &str) -> Self {
        let parsed = token.parse().unwrap_or(Self::Unknown);
        if parsed == Self::Char && version.starts_with("FIX.") && version < "FIX.4.2" {
            return Self::String;
        }
        parsed
    }

    /// Returns the specification token for this type.
    #[must_use]
    pub const fn xml_name(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Char => "CHAR",
            Self::Price => "PRICE",
            Self::Int => "INT",
            Self::Amt => "AMT",
            Self::Qty => "QTY",
            Self::Currency => "CURRENCY",
            Self::MultipleValueString => "MULTIPLEVALUESTRING",
            Self::Exchange => "EXCHANGE",
            Self::UtcTimeStamp => "UTCTIMESTAMP",
            Self::Boolean => "BOOLEAN",
            Self::LocalMktDate => "LOCALMKTDATE",
            Self::Data => "DATA",
            Self::Float => "FLOAT",
            Self::PriceOffset => "PRICEOFFSET",
            Self::MonthYear => "MONTHYEAR",
            Self::DayOfMonth => "DAYOFMONTH",
            Self::UtcDate => "UTCDATE",
            Self::UtcTimeOnly => "UTCTIMEONLY",
            Self::NumInGroup => "NUMINGROUP",
            Self::Percentage => "PERCENTAGE",
            Self::SeqNum => "SEQNUM",
            Self::Length => "LENGTH",
            Self::Country => "COUNTRY",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Checks that a raw value converts to this type.
    ///
    /// # Arguments
    /// * `value` - The raw field value
    ///
    /// # Errors
    /// Returns `FormatError` if the converter for this type rejects the value.
    pub fn validate_format(&self, value: &str) -> Result<(), FormatError> {
        let accepted = match self {
            Self::String
            | Self::Currency
            | Self::MultipleValueString
            | Self::Exchange
            | Self::Data
            | Self::Country
            | Self::Unknown => true,
            Self::Char => convert::char(value).is_some(),
            Self::Int => convert::int(value).is_some(),
            Self::NumInGroup | Self::SeqNum | Self::Length => convert::unsigned(value).is_some(),
            Self::DayOfMonth => convert::day_of_month(value).is_some(),
            Self::Price
            | Self::Amt
            | Self::Qty
            | Self::Float
            | Self::PriceOffset
            | Self::Percentage => convert::decimal(value).is_some(),
            Self::Boolean => convert::boolean(value).is_some(),
            Self::UtcTimeStamp => convert::utc_timestamp(value).is_some(),
            Self::UtcTimeOnly => convert::utc_time_only(value).is_some(),
            Self::UtcDate | Self::LocalMktDate => convert::utc_date(value).is_some(),
            Self::MonthYear => convert::month_year(value),
        };
        if accepted {
            Ok(())
        } else {
            Err(FormatError::new(*self, value))
        }
    }

    /// Returns true if this type represents a numeric value.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Length
                | Self::SeqNum
                | Self::NumInGroup
                | Self::DayOfMonth
                | Self::Float
                | Self::Qty
                | Self::Price
                | Self::PriceOffset
                | Self::Amt
                | Self::Percentage
        )
    }

    /// Returns true if this type represents a date or time.
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(
            self,
            Self::UtcTimeStamp | Self::UtcTimeOnly | Self::UtcDate | Self::LocalMktDate
        )
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Creates a FieldType from a specification token, `Unknown` if unrecognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "STRING" => Self::String,
            "CHAR" => Self::Char,
            "PRICE" => Self::Price,
            "INT" => Self::Int,
            "AMT" | "AMOUNT" => Self::Amt,
            "QTY" | "QUANTITY" => Self::Qty,
            "CURRENCY" => Self::Currency,
            "MULTIPLEVALUESTRING" | "MULTIPLESTRINGVALUE" | "MULTIPLECHARVALUE" => {
                Self::MultipleValueString
            }
            "EXCHANGE" => Self::Exchange,
            "UTCTIMESTAMP" | "TIME" => Self::UtcTimeStamp,
            "BOOLEAN" => Self::Boolean,
            "LOCALMKTDATE" => Self::LocalMktDate,
            "DATA" => Self::Data,
            "FLOAT" => Self::Float,
            "PRICEOFFSET" => Self::PriceOffset,
            "MONTHYEAR" => Self::MonthYear,
            "DAYOFMONTH" => Self::DayOfMonth,
            "UTCDATE" | "UTCDATEONLY" | "DATE" => Self::UtcDate,
            "UTCTIMEONLY" => Self::UtcTimeOnly,
            "NUMINGROUP" => Self::NumInGroup,
            "PERCENTAGE" => Self::Percentage,
            "SEQNUM" => Self::SeqNum,
            "LENGTH" => Self::Length,
            "COUNTRY" => Self::Country,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("INT".parse::<FieldType>().unwrap(), FieldType::Int);
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::String);
        assert_eq!("QUANTITY".parse::<FieldType>().unwrap(), FieldType::Qty);
        assert_eq!(
            "MULTIPLECHARVALUE".parse::<FieldType>().unwrap(),
            FieldType::MultipleValueString
        );
        assert_eq!("TENOR".parse::<FieldType>().unwrap(), FieldType::Unknown);
    }

    #[test]
    fn test_xml_name_roundtrip() {
        for field_type in FieldType::ALL {
            assert_eq!(
                field_type.xml_name().parse::<FieldType>().unwrap(),
                field_type
            );
        }
    }

    #[test]
    fn test_char_before_fix42_is_string() {
        assert_eq!(FieldType::from_xml("CHAR", "FIX.4.0"), FieldType::String);
        assert_eq!(FieldType::from_xml("CHAR", "FIX.4.1"), FieldType::String);
        assert_eq!(FieldType::from_xml("CHAR", "FIX.4.2"), FieldType::Char);
        assert_eq!(FieldType::from_xml("CHAR", "FIXT.1.1"), FieldType::Char);
    }

    #[test]
    fn test_unknown_accepts_anything() {
        assert!(FieldType::Unknown.validate_format("").is_ok());
        assert!(FieldType::Unknown.validate_format("anything at all").is_ok());
    }

    #[test]
    fn test_validate_format_dispatch() {
        assert!(FieldType::Int.validate_format("-42").is_ok());
        assert!(FieldType::Int.validate_format("xyz").is_err());
        assert!(FieldType::Price.validate_format("101.25").is_ok());
        assert!(FieldType::Price.validate_format("1e5").is_err());
        assert!(FieldType::Boolean.validate_format("Y").is_ok());
        assert!(FieldType::Boolean.validate_format("T").is_err());
        assert!(FieldType::Char.validate_format("AB").is_err());
        assert!(FieldType::NumInGroup.validate_format("-1").is_err());
        assert!(
            FieldType::UtcTimeStamp
                .validate_format("20240115-13:45:30.123")
                .is_ok()
        );
        assert!(FieldType::UtcDate.validate_format("20240230").is_err());
        assert!(FieldType::MonthYear.validate_format("202403w2").is_ok());
    }

    #[test]
    fn test_format_error_carries_type() {
        let err = FieldType::Qty.validate_format("ten").unwrap_err();
        assert_eq!(err.field_type, FieldType::Qty);
        assert_eq!(err.value, "ten");
    }

    #[test]
    fn test_field_type_is_numeric() {
        assert!(FieldType::Int.is_numeric());
        assert!(FieldType::Price.is_numeric());
        assert!(!FieldType::String.is_numeric());
        assert!(FieldType::UtcDate.is_timestamp());
    }
}
