/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronSpec Core
//!
//! Core types, traits, and error definitions for IronSpec.
//!
//! This crate provides the building blocks shared by the dictionary and validator:
//! - **Error types**: Validation, specification and format errors with `thiserror`
//! - **Field type registry**: `FieldType` and its format converters
//! - **Message abstractions**: `FieldMapView`, `MessageView`, and the owned
//!   `FieldMap` / `Message` implementations

pub mod convert;
pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{FormatError, IronSpecError, Result, SpecificationError, ValidationError};
pub use field::{Field, tags};
pub use message::{FieldMap, FieldMapView, Message, MessageView};
pub use types::FieldType;
