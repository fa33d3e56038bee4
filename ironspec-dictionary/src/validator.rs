/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message validation against a [`DataDictionary`].
//!
//! Validation is fail-fast and deterministic. The message type is checked
//! first, then the version, then the header, body and trailer in that order.
//! Within a section every present field is checked in wire order:
//!
//! 1. the tag is defined
//! 2. the value converts to the field's type
//! 3. the value belongs to the field's value set
//! 4. the value is not empty (policy)
//! 5. the tag is legal in the section
//! 6. the tag does not precede an earlier declared field (policy)
//! 7. a group count matches its instances, and each instance is validated
//!
//! Required fields of a section are checked after all of its present fields.

use crate::config::ValidationPolicy;
use crate::dictionary::{DataDictionary, HEADER_SCOPE, TRAILER_SCOPE};
use ironspec_core::convert;
use ironspec_core::error::ValidationError;
use ironspec_core::field::tags;
use ironspec_core::message::{FieldMapView, MessageView};
use tracing::trace;

/// Validates a message against a dictionary with an explicit policy.
///
/// # Errors
/// Returns the first [`ValidationError`] the message violates.
pub fn validate<M: MessageView>(
    dictionary: &DataDictionary,
    message: &M,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    Validator::new(dictionary, policy).validate(message)
}

/// Section a field map is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Body,
    Trailer,
    Group,
}

/// Validates messages against one dictionary and policy.
///
/// Holds only shared references, so one validator can be used from many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    dictionary: &'a DataDictionary,
    policy: &'a ValidationPolicy,
}

impl<'a> Validator<'a> {
    /// Creates a validator.
    #[must_use]
    pub const fn new(dictionary: &'a DataDictionary, policy: &'a ValidationPolicy) -> Self {
        Self { dictionary, policy }
    }

    /// Validates a message.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] the message violates.
    pub fn validate<M: MessageView>(&self, message: &M) -> Result<(), ValidationError> {
        let result = self.check_message(message);
        if let Err(err) = &result {
            trace!(error = %err, reason = ?err.reject_reason(), "message rejected");
        }
        result
    }

    fn check_message<M: MessageView>(&self, message: &M) -> Result<(), ValidationError> {
        let header = message.header();
        let msg_type = header
            .get(tags::MSG_TYPE)
            .ok_or(ValidationError::RequiredTagMissing {
                tag: tags::MSG_TYPE,
            })?;
        if !self.dictionary.is_msg_type(msg_type) {
            return Err(ValidationError::InvalidMessageType {
                msg_type: msg_type.to_string(),
            });
        }
        self.check_version(header)?;

        self.check_section(self.dictionary, header, Section::Header, HEADER_SCOPE)?;
        self.check_section(self.dictionary, message.body(), Section::Body, msg_type)?;
        self.check_section(self.dictionary, message.trailer(), Section::Trailer, TRAILER_SCOPE)
    }

    fn check_version<F: FieldMapView>(&self, header: &F) -> Result<(), ValidationError> {
        let (Some(expected), Some(actual)) =
            (self.dictionary.version(), header.get(tags::BEGIN_STRING))
        else {
            return Ok(());
        };
        if expected == actual {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedVersion {
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    fn check_section<F: FieldMapView>(
        &self,
        dictionary: &DataDictionary,
        map: &F,
        section: Section,
        scope: &str,
    ) -> Result<(), ValidationError> {
        let mut last_position = None;
        for (tag, value) in map.fields() {
            let checked = self.policy.check_user_defined_fields || tag < tags::USER_MIN;
            if checked && !dictionary.is_field(tag) {
                return Err(ValidationError::InvalidTagNumber { tag });
            }
            if dictionary.field_type(tag).validate_format(value).is_err() {
                return Err(ValidationError::IncorrectDataFormat { tag });
            }
            if !dictionary.is_field_value(tag, value) {
                return Err(ValidationError::IncorrectTagValue { tag });
            }
            if self.policy.check_fields_have_values && value.is_empty() {
                return Err(ValidationError::NoTagValue { tag });
            }
            if checked && !is_in_section(dictionary, section, scope, tag) {
                return Err(ValidationError::TagNotDefinedForMessage { tag });
            }
            if self.policy.check_fields_out_of_order {
                check_order(dictionary, scope, tag, &mut last_position)?;
            }
            self.check_group(dictionary, map, scope, tag, value)?;
        }

        for tag in map.group_tags() {
            if !map.is_set(tag) || !dictionary.is_group(scope, tag) {
                return Err(ValidationError::RepeatingGroupCountMismatch { tag });
            }
        }

        match dictionary.required_fields(scope).find(|&tag| !map.is_set(tag)) {
            Some(tag) => Err(ValidationError::RequiredTagMissing { tag }),
            None => Ok(()),
        }
    }

    fn check_group<F: FieldMapView>(
        &self,
        dictionary: &DataDictionary,
        map: &F,
        scope: &str,
        tag: u32,
        value: &str,
    ) -> Result<(), ValidationError> {
        let Some((delimiter, group)) = dictionary.get_group(scope, tag) else {
            return Ok(());
        };
        let declared =
            convert::unsigned(value).ok_or(ValidationError::IncorrectDataFormat { tag })?;
        if declared != map.group_count(tag) as u64 {
            return Err(ValidationError::RepeatingGroupCountMismatch { tag });
        }

        for instance in map.groups(tag) {
            if self.policy.check_fields_out_of_order {
                if let Some((first, _)) = instance.fields().next() {
                    if first != delimiter {
                        return Err(ValidationError::RepeatingGroupFieldsOutOfOrder { tag: first });
                    }
                }
            }
            self.check_section(group, instance, Section::Group, scope)?;
        }
        Ok(())
    }
}

fn is_in_section(dictionary: &DataDictionary, section: Section, scope: &str, tag: u32) -> bool {
    match section {
        Section::Header => dictionary.is_header_field(tag),
        Section::Trailer => dictionary.is_trailer_field(tag),
        Section::Body => dictionary.is_msg_field(scope, tag),
        Section::Group => {
            dictionary.is_msg_field(scope, tag)
                || (scope == HEADER_SCOPE && dictionary.is_header_field(tag))
                || (scope == TRAILER_SCOPE && dictionary.is_trailer_field(tag))
        }
    }
}

/// Rejects a field declared before the previous declared field of the section.
///
/// Fields without a declared position do not take part in ordering.
fn check_order(
    dictionary: &DataDictionary,
    scope: &str,
    tag: u32,
    last_position: &mut Option<usize>,
) -> Result<(), ValidationError> {
    let Some(position) = dictionary.field_position(scope, tag) else {
        return Ok(());
    };
    if last_position.is_some_and(|last| position < last) {
        return Err(ValidationError::TagOutOfOrder { tag });
    }
    *last_position = Some(position);
    Ok(())
}
