/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronSpec Dictionary
//!
//! Specification loading, schema queries and message validation.
//!
//! This crate provides:
//! - **Schema model**: [`DataDictionary`] with recursively owned group schemas
//! - **Specification loading**: QuickFIX-style XML documents, through the
//!   abstract [`DocumentNode`] reader
//! - **Specification writing**: serialization back to the same format
//! - **Validation**: fail-fast message checks driven by a [`ValidationPolicy`]
//! - **Registry**: dictionaries shared by version across threads

pub mod config;
pub mod dictionary;
pub mod document;
pub mod loader;
pub mod registry;
pub mod validator;
pub mod writer;
pub mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::ValidationPolicy;
pub use dictionary::{DataDictionary, GroupSchema, HEADER_SCOPE, TRAILER_SCOPE};
pub use document::{DocumentNode, SpecDocument};
pub use loader::{load, load_path, load_str};
pub use registry::DictionaryRegistry;
pub use validator::{Validator, validate};
pub use writer::write_specification;
pub use xml::{XmlDocument, XmlNode};
