/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronSpec
//!
//! FIX data dictionary loading and message validation for Rust.
//!
//! IronSpec reads QuickFIX-style XML specifications into a queryable
//! [`DataDictionary`](dictionary::DataDictionary) and validates decoded
//! messages against it, reporting the first violated rule with its
//! session-level reject reason.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ironspec::prelude::*;
//!
//! let dictionary = DataDictionary::from_path("specs/FIX44.xml")?;
//! let mut message = Message::new("FIX.4.4", "0");
//! // ... populate header, body and trailer ...
//! if let Err(err) = dictionary.validate(&message) {
//!     println!("rejected: {err} (reason {:?})", err.reject_reason());
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Field types, converters, message views and error definitions
//! - [`dictionary`]: Specification loading, the schema model and validation
//! - [`specs`]: Bundled specification documents

pub mod core {
    //! Field types, converters, message views and error definitions.
    pub use ironspec_core::*;
}

pub mod dictionary {
    //! Specification loading, the schema model and validation.
    pub use ironspec_dictionary::*;
}

pub mod specs {
    //! Bundled specification documents.

    /// A FIX 4.4 subset covering the session messages, orders and executions.
    pub const FIX44: &str = include_str!("../specs/FIX44.xml");
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironspec_core::{
        Field, FieldMap, FieldMapView, FieldType, FormatError, IronSpecError, Message,
        MessageView, Result, SpecificationError, ValidationError, tags,
    };

    // Dictionary
    pub use ironspec_dictionary::{
        DataDictionary, DictionaryRegistry, HEADER_SCOPE, TRAILER_SCOPE, ValidationPolicy,
        Validator, validate, write_specification,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn fix44() -> DataDictionary {
        DataDictionary::from_xml(super::specs::FIX44).unwrap()
    }

    fn header(msg_type: &str) -> FieldMap {
        FieldMap::new()
            .with_field(8, "FIX.4.4")
            .with_field(9, "154")
            .with_field(35, msg_type)
            .with_field(49, "CLIENT")
            .with_field(56, "BROKER")
            .with_field(34, "2")
            .with_field(52, "20260119-14:30:00.000")
    }

    fn new_order() -> Message {
        let body = FieldMap::new()
            .with_field(11, "ORD-1")
            .with_group(
                453,
                FieldMap::new()
                    .with_field(448, "TRADER1")
                    .with_field(447, "D")
                    .with_field(452, "11"),
            )
            .with_field(21, "1")
            .with_field(18, "G 1")
            .with_field(55, "AAPL")
            .with_field(200, "202603")
            .with_field(54, "1")
            .with_field(60, "20260119-14:30:00")
            .with_field(38, "100")
            .with_field(40, "2")
            .with_field(44, "187.25")
            .with_field(59, "0");
        Message::from_sections(header("D"), body, FieldMap::new().with_field(10, "128"))
    }

    #[test]
    fn test_bundled_specification_loads() {
        let dict = fix44();
        assert_eq!(dict.version(), Some("FIX.4.4"));
        assert_eq!(dict.msg_name("8"), Some("ExecutionReport"));
        assert!(dict.is_required_field("D", 55));
        assert!(!dict.is_required_field("D", 38));
        assert!(dict.is_group("D", 453));
        assert!(dict.is_group("8", 453));
        assert!(dict.is_group(HEADER_SCOPE, 627));
        let (_, parties) = dict.get_group("D", 453).unwrap();
        assert!(parties.is_group("D", 802));
        assert_eq!(dict.field_type(52), FieldType::UtcTimeStamp);
    }

    #[test]
    fn test_new_order_validates() {
        let dict = fix44();
        assert_eq!(dict.validate(&new_order()), Ok(()));
        let strict = ValidationPolicy::new().with_check_fields_out_of_order(true);
        assert_eq!(validate(&dict, &new_order(), &strict), Ok(()));

        let mut msg = new_order();
        msg.header_mut().remove_field(49);
        msg.header_mut().set_field(49, "CLIENT");
        assert_eq!(dict.validate(&msg), Ok(()));
        assert_eq!(
            validate(&dict, &msg, &strict),
            Err(ValidationError::TagOutOfOrder { tag: 49 })
        );
    }

    #[test]
    fn test_reject_reasons() {
        let dict = fix44();

        let mut msg = new_order();
        msg.body_mut().set_field(44, "abc");
        let err = dict.validate(&msg).unwrap_err();
        assert_eq!(err, ValidationError::IncorrectDataFormat { tag: 44 });
        assert_eq!(err.reject_reason(), Some(6));

        let mut msg = new_order();
        msg.body_mut().remove_field(60);
        let err = dict.validate(&msg).unwrap_err();
        assert_eq!(err, ValidationError::RequiredTagMissing { tag: 60 });
        assert_eq!(err.tag(), Some(60));
        assert_eq!(err.reject_reason(), Some(1));

        let mut msg = new_order();
        msg.header_mut().set_field(35, "ZZ");
        let err = dict.validate(&msg).unwrap_err();
        assert_eq!(err.reject_reason(), Some(11));
    }

    #[test]
    fn test_registry_with_written_specification() {
        let dict = fix44();
        let written = write_specification(&dict).unwrap();
        let registry = DictionaryRegistry::new();
        registry
            .register(DataDictionary::from_xml(&written).unwrap())
            .unwrap();
        assert_eq!(registry.validate(&new_order()), Ok(()));
        let err: IronSpecError = registry
            .validate(&Message::new("FIX.4.2", "D"))
            .unwrap_err()
            .into();
        assert!(matches!(err, IronSpecError::Validation(_)));
    }
}
