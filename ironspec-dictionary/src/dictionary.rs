/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Queryable schema model.
//!
//! This module defines:
//! - [`DataDictionary`]: Fields, types, value sets, messages, required fields,
//!   header/trailer membership and declared field order for one schema scope
//! - [`GroupSchema`]: A repeating group entry, owning the child dictionary that
//!   describes one group instance
//!
//! Group dictionaries are owned by value, so cloning a [`DataDictionary`] is a
//! deep copy of the whole group tree and no group can ever contain itself.

use crate::config::ValidationPolicy;
use crate::validator;
use ironspec_core::error::ValidationError;
use ironspec_core::field::tags;
use ironspec_core::message::MessageView;
use ironspec_core::types::FieldType;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Scope key for header fields, header groups and header required fields.
pub const HEADER_SCOPE: &str = "_header_";

/// Scope key for trailer fields, trailer groups and trailer required fields.
pub const TRAILER_SCOPE: &str = "_trailer_";

/// A repeating group declared within a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSchema {
    delimiter: u32,
    dictionary: DataDictionary,
}

impl GroupSchema {
    /// Returns the tag that starts every group instance.
    #[inline]
    #[must_use]
    pub const fn delimiter(&self) -> u32 {
        self.delimiter
    }

    /// Returns the dictionary describing one group instance.
    #[inline]
    #[must_use]
    pub const fn dictionary(&self) -> &DataDictionary {
        &self.dictionary
    }
}

/// In-memory schema for one protocol version.
///
/// The same type describes the root schema and every group instance schema.
/// A group dictionary keys its membership and required fields by the scope of
/// the enclosing message (the message type, [`HEADER_SCOPE`] or [`TRAILER_SCOPE`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataDictionary {
    version: Option<String>,
    policy: ValidationPolicy,
    fields: BTreeSet<u32>,
    field_types: HashMap<u32, FieldType>,
    field_names: HashMap<u32, String>,
    names_to_fields: HashMap<String, u32>,
    field_values: HashMap<u32, BTreeSet<String>>,
    value_names: HashMap<u32, HashMap<String, String>>,
    messages: BTreeSet<String>,
    message_fields: HashMap<String, HashSet<u32>>,
    required_fields: HashMap<String, BTreeSet<u32>>,
    field_order: HashMap<String, Vec<u32>>,
    header_fields: HashSet<u32>,
    trailer_fields: HashSet<u32>,
    groups: BTreeMap<String, BTreeMap<u32, GroupSchema>>,
}

impl DataDictionary {
    /// Creates an empty dictionary with no version and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dictionary for a version.
    ///
    /// # Arguments
    /// * `version` - The BeginString this dictionary describes (e.g., "FIX.4.4")
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        let mut dictionary = Self::new();
        dictionary.set_version(version);
        dictionary
    }

    /// Returns the version, if one has been set.
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns true if a version has been set.
    #[inline]
    #[must_use]
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    /// Sets the version on this dictionary and every group dictionary below it.
    pub fn set_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        for group in self.groups.values_mut().flat_map(BTreeMap::values_mut) {
            group.dictionary.set_version(version.clone());
        }
        self.version = Some(version);
    }

    /// Returns the validation policy.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Sets the validation policy on this dictionary and every group dictionary below it.
    pub fn set_policy(&mut self, policy: ValidationPolicy) {
        for group in self.groups.values_mut().flat_map(BTreeMap::values_mut) {
            group.dictionary.set_policy(policy);
        }
        self.policy = policy;
    }

    /// Sets the validation policy and returns the dictionary.
    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    /// Declares a field tag.
    pub fn add_field(&mut self, tag: u32) {
        self.fields.insert(tag);
    }

    /// Returns true if the tag has been declared.
    #[inline]
    #[must_use]
    pub fn is_field(&self, tag: u32) -> bool {
        self.fields.contains(&tag)
    }

    /// Returns the declared tags in ascending order.
    pub fn fields(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields.iter().copied()
    }

    /// Sets the semantic type of a field.
    pub fn add_field_type(&mut self, tag: u32, field_type: FieldType) {
        self.field_types.insert(tag, field_type);
    }

    /// Returns the semantic type of a field.
    ///
    /// Undeclared tags, and declared tags without a type, are `Unknown`.
    #[must_use]
    pub fn field_type(&self, tag: u32) -> FieldType {
        if !self.is_field(tag) {
            return FieldType::Unknown;
        }
        self.field_types.get(&tag).copied().unwrap_or_default()
    }

    /// Returns true if the field carries raw data (type `DATA`).
    #[must_use]
    pub fn is_data_field(&self, tag: u32) -> bool {
        self.field_type(tag) == FieldType::Data
    }

    /// Returns true if the field holds space separated values.
    #[must_use]
    pub fn is_multiple_value_string_field(&self, tag: u32) -> bool {
        self.field_type(tag) == FieldType::MultipleValueString
    }

    /// Registers the name of a field in both directions.
    pub fn add_field_name(&mut self, tag: u32, name: impl Into<String>) {
        let name = name.into();
        self.names_to_fields.insert(name.clone(), tag);
        self.field_names.insert(tag, name);
    }

    /// Returns the name of a field.
    #[must_use]
    pub fn field_name(&self, tag: u32) -> Option<&str> {
        self.field_names.get(&tag).map(String::as_str)
    }

    /// Returns the tag registered under a field name.
    #[must_use]
    pub fn field_tag(&self, name: &str) -> Option<u32> {
        self.names_to_fields.get(name).copied()
    }

    /// Adds a permitted value to a field's value set.
    pub fn add_field_value(&mut self, tag: u32, value: impl Into<String>) {
        self.field_values.entry(tag).or_default().insert(value.into());
    }

    /// Returns true if the field is restricted to a value set.
    #[must_use]
    pub fn has_field_value(&self, tag: u32) -> bool {
        self.is_field(tag) && self.field_values.contains_key(&tag)
    }

    /// Returns the permitted values of a field, in sorted order.
    pub fn field_values(&self, tag: u32) -> impl Iterator<Item = &str> + '_ {
        self.field_values
            .get(&tag)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Returns true if a raw value is permitted for the field.
    ///
    /// Undeclared fields and fields without a value set accept everything.
    /// For `MULTIPLEVALUESTRING` fields the value is split on single spaces
    /// and every token, including the empty tokens produced by repeated
    /// spaces, must be permitted.
    #[must_use]
    pub fn is_field_value(&self, tag: u32, value: &str) -> bool {
        if !self.is_field(tag) {
            return true;
        }
        let Some(allowed) = self.field_values.get(&tag) else {
            return true;
        };
        if self.is_multiple_value_string_field(tag) {
            value.split(' ').all(|token| allowed.contains(token))
        } else {
            allowed.contains(value)
        }
    }

    /// Registers a human readable label for a field value.
    pub fn add_value_name(&mut self, tag: u32, value: impl Into<String>, name: impl Into<String>) {
        self.value_names
            .entry(tag)
            .or_default()
            .insert(value.into(), name.into());
    }

    /// Returns the label of a field value.
    #[must_use]
    pub fn value_name(&self, tag: u32, value: &str) -> Option<&str> {
        self.value_names
            .get(&tag)?
            .get(value)
            .map(String::as_str)
    }

    /// Returns the value carrying a label, the inverse of [`Self::value_name`].
    #[must_use]
    pub fn value_by_name(&self, tag: u32, name: &str) -> Option<&str> {
        self.value_names
            .get(&tag)?
            .iter()
            .find(|(_, label)| label.as_str() == name)
            .map(|(value, _)| value.as_str())
    }

    /// Declares a message type.
    pub fn add_msg_type(&mut self, msg_type: impl Into<String>) {
        self.messages.insert(msg_type.into());
    }

    /// Returns true if the message type has been declared.
    #[inline]
    #[must_use]
    pub fn is_msg_type(&self, msg_type: &str) -> bool {
        self.messages.contains(msg_type)
    }

    /// Returns the declared message types in sorted order.
    pub fn msg_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.messages.iter().map(String::as_str)
    }

    /// Returns the message name registered for a MsgType value.
    #[must_use]
    pub fn msg_name(&self, msg_type: &str) -> Option<&str> {
        self.value_name(tags::MSG_TYPE, msg_type)
    }

    /// Declares a field as legal within a scope.
    ///
    /// The first declaration of a tag also fixes its position in the scope's
    /// declared order.
    pub fn add_msg_field(&mut self, msg_type: &str, tag: u32) {
        let inserted = self
            .message_fields
            .entry(msg_type.to_string())
            .or_default()
            .insert(tag);
        if inserted {
            self.push_order(msg_type, tag);
        }
    }

    /// Returns true if the field is legal within a scope.
    #[must_use]
    pub fn is_msg_field(&self, msg_type: &str, tag: u32) -> bool {
        self.message_fields
            .get(msg_type)
            .is_some_and(|fields| fields.contains(&tag))
    }

    /// Declares a header field.
    pub fn add_header_field(&mut self, tag: u32) {
        if self.header_fields.insert(tag) {
            self.push_order(HEADER_SCOPE, tag);
        }
    }

    /// Returns true if the field belongs to the header.
    #[inline]
    #[must_use]
    pub fn is_header_field(&self, tag: u32) -> bool {
        self.header_fields.contains(&tag)
    }

    /// Declares a trailer field.
    pub fn add_trailer_field(&mut self, tag: u32) {
        if self.trailer_fields.insert(tag) {
            self.push_order(TRAILER_SCOPE, tag);
        }
    }

    /// Returns true if the field belongs to the trailer.
    #[inline]
    #[must_use]
    pub fn is_trailer_field(&self, tag: u32) -> bool {
        self.trailer_fields.contains(&tag)
    }

    /// Marks a field as mandatory within a scope.
    ///
    /// A required field is always legal in its scope. In [`HEADER_SCOPE`] and
    /// [`TRAILER_SCOPE`] it becomes a header or trailer field, unless it is
    /// already a member of a group instance in that scope. Elsewhere it is
    /// declared as a message field.
    pub fn add_required_field(&mut self, msg_type: &str, tag: u32) {
        match msg_type {
            HEADER_SCOPE | TRAILER_SCOPE if self.is_msg_field(msg_type, tag) => {}
            HEADER_SCOPE => self.add_header_field(tag),
            TRAILER_SCOPE => self.add_trailer_field(tag),
            _ => self.add_msg_field(msg_type, tag),
        }
        self.required_fields
            .entry(msg_type.to_string())
            .or_default()
            .insert(tag);
    }

    /// Returns true if the field is mandatory within a scope.
    #[must_use]
    pub fn is_required_field(&self, msg_type: &str, tag: u32) -> bool {
        self.required_fields
            .get(msg_type)
            .is_some_and(|fields| fields.contains(&tag))
    }

    /// Returns the mandatory fields of a scope in ascending tag order.
    pub fn required_fields(&self, msg_type: &str) -> impl Iterator<Item = u32> + '_ {
        self.required_fields
            .get(msg_type)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Returns the fields of a scope in declared order.
    #[must_use]
    pub fn field_order(&self, msg_type: &str) -> &[u32] {
        self.field_order
            .get(msg_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the declared position of a field within a scope.
    #[must_use]
    pub fn field_position(&self, msg_type: &str, tag: u32) -> Option<usize> {
        self.field_order(msg_type).iter().position(|&t| t == tag)
    }

    /// Moves a field to the first declared position of a scope.
    pub(crate) fn move_to_front(&mut self, msg_type: &str, tag: u32) {
        let Some(order) = self.field_order.get_mut(msg_type) else {
            return;
        };
        if let Some(position) = order.iter().position(|&t| t == tag) {
            let tag = order.remove(position);
            order.insert(0, tag);
        }
    }

    fn push_order(&mut self, msg_type: &str, tag: u32) {
        let order = self.field_order.entry(msg_type.to_string()).or_default();
        if !order.contains(&tag) {
            order.push(tag);
        }
    }

    /// Attaches a repeating group to a scope.
    ///
    /// The group dictionary is taken by value and becomes exclusively owned by
    /// this dictionary. It inherits this dictionary's version and policy.
    ///
    /// # Arguments
    /// * `msg_type` - Scope the group belongs to
    /// * `tag` - The NumInGroup count field
    /// * `delimiter` - The first field of every group instance
    /// * `dictionary` - Schema of one group instance
    pub fn add_group(
        &mut self,
        msg_type: &str,
        tag: u32,
        delimiter: u32,
        mut dictionary: DataDictionary,
    ) {
        if let Some(version) = &self.version {
            dictionary.set_version(version.clone());
        }
        dictionary.set_policy(self.policy);
        self.groups.entry(msg_type.to_string()).or_default().insert(
            tag,
            GroupSchema {
                delimiter,
                dictionary,
            },
        );
    }

    /// Returns true if the tag is a group count field within a scope.
    #[must_use]
    pub fn is_group(&self, msg_type: &str, tag: u32) -> bool {
        self.group_schema(msg_type, tag).is_some()
    }

    /// Returns the delimiter and instance dictionary of a group.
    #[must_use]
    pub fn get_group(&self, msg_type: &str, tag: u32) -> Option<(u32, &DataDictionary)> {
        self.group_schema(msg_type, tag)
            .map(|group| (group.delimiter, &group.dictionary))
    }

    /// Returns the group entry for a count field within a scope.
    #[must_use]
    pub fn group_schema(&self, msg_type: &str, tag: u32) -> Option<&GroupSchema> {
        self.groups.get(msg_type)?.get(&tag)
    }

    /// Returns mutable access to a group's instance dictionary.
    pub fn group_dictionary_mut(&mut self, msg_type: &str, tag: u32) -> Option<&mut DataDictionary> {
        self.groups
            .get_mut(msg_type)?
            .get_mut(&tag)
            .map(|group| &mut group.dictionary)
    }

    /// Returns the groups declared within a scope, by count tag.
    pub fn groups(&self, msg_type: &str) -> impl Iterator<Item = (u32, &GroupSchema)> + '_ {
        self.groups
            .get(msg_type)
            .into_iter()
            .flatten()
            .map(|(tag, group)| (*tag, group))
    }

    /// Returns the instance dictionaries of every group in every scope.
    pub fn group_dictionaries(&self) -> impl Iterator<Item = &DataDictionary> + '_ {
        self.groups
            .values()
            .flat_map(BTreeMap::values)
            .map(GroupSchema::dictionary)
    }

    /// Validates a message using this dictionary's policy.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] the message violates.
    pub fn validate<M: MessageView>(&self, message: &M) -> Result<(), ValidationError> {
        validator::validate(self, message, &self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_dictionary() -> DataDictionary {
        let mut dict = DataDictionary::with_version("FIX.4.4");
        for (tag, name, field_type) in [
            (11, "ClOrdID", FieldType::String),
            (18, "ExecInst", FieldType::MultipleValueString),
            (54, "Side", FieldType::Char),
            (78, "NoAllocs", FieldType::NumInGroup),
            (79, "AllocAccount", FieldType::String),
        ] {
            dict.add_field(tag);
            dict.add_field_name(tag, name);
            dict.add_field_type(tag, field_type);
        }
        dict.add_field_value(54, "1");
        dict.add_field_value(54, "2");
        dict.add_value_name(54, "1", "BUY");
        dict.add_value_name(54, "2", "SELL");
        dict.add_field_value(18, "A");
        dict.add_field_value(18, "B");
        dict.add_msg_type("D");
        dict.add_required_field("D", 11);
        dict.add_msg_field("D", 54);
        dict.add_msg_field("D", 78);
        let mut group = DataDictionary::new();
        group.add_field(79);
        group.add_msg_field("D", 79);
        dict.add_group("D", 78, 79, group);
        dict
    }

    #[test]
    fn test_unknown_tag_has_no_definition() {
        let mut dict = order_dictionary();
        assert!(!dict.is_field(9999));
        assert_eq!(dict.field_type(9999), FieldType::Unknown);
        dict.add_field_type(9999, FieldType::Int);
        assert_eq!(dict.field_type(9999), FieldType::Unknown);
        assert!(!dict.has_field_value(9999));
    }

    #[test]
    fn test_names_both_ways() {
        let dict = order_dictionary();
        assert_eq!(dict.field_name(11), Some("ClOrdID"));
        assert_eq!(dict.field_tag("ClOrdID"), Some(11));
        assert_eq!(dict.value_name(54, "2"), Some("SELL"));
        assert_eq!(dict.value_by_name(54, "BUY"), Some("1"));
        assert!(dict.value_name(54, "3").is_none());
    }

    #[test]
    fn test_required_implies_msg_field() {
        let dict = order_dictionary();
        assert!(dict.is_required_field("D", 11));
        assert!(dict.is_msg_field("D", 11));
        assert!(!dict.is_required_field("D", 54));
        assert_eq!(dict.field_order("D"), &[11, 54, 78]);
        assert_eq!(dict.field_position("D", 78), Some(2));
    }

    #[test]
    fn test_multiple_value_string_tokens() {
        let dict = order_dictionary();
        assert!(dict.is_field_value(18, "A B"));
        assert!(dict.is_field_value(18, "A"));
        assert!(!dict.is_field_value(18, "A C"));
        assert!(!dict.is_field_value(18, "A  B"));
        assert!(dict.is_field_value(54, "1"));
        assert!(!dict.is_field_value(54, "1 2"));
        assert!(dict.is_field_value(11, "anything"));
    }

    #[test]
    fn test_group_inherits_version_and_policy() {
        let mut dict = order_dictionary();
        let (delimiter, group) = dict.get_group("D", 78).unwrap();
        assert_eq!(delimiter, 79);
        assert_eq!(group.version(), Some("FIX.4.4"));
        assert!(dict.is_group("D", 78));
        assert!(!dict.is_group("D", 79));

        dict.set_version("FIX.4.2");
        dict.set_policy(ValidationPolicy::new().with_check_fields_out_of_order(true));
        let (_, group) = dict.get_group("D", 78).unwrap();
        assert_eq!(group.version(), Some("FIX.4.2"));
        assert!(group.policy().check_fields_out_of_order);
    }

    #[test]
    fn test_clone_is_isolated() {
        let original = order_dictionary();
        let snapshot = original.clone();
        let mut copy = original.clone();

        let group = copy.group_dictionary_mut("D", 78).unwrap();
        group.add_field(80);
        group.add_msg_field("D", 80);
        let mut nested = DataDictionary::new();
        nested.add_field(81);
        group.add_group("D", 80, 81, nested);

        assert_eq!(original, snapshot);
        let (_, group) = original.get_group("D", 78).unwrap();
        assert!(!group.is_msg_field("D", 80));
        assert!(!group.is_group("D", 80));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_header_and_trailer_scopes() {
        let mut dict = DataDictionary::new();
        dict.add_header_field(8);
        dict.add_header_field(35);
        dict.add_required_field(HEADER_SCOPE, 8);
        dict.add_trailer_field(10);
        dict.add_required_field(TRAILER_SCOPE, 10);
        assert!(dict.is_header_field(35));
        assert!(!dict.is_trailer_field(35));
        assert!(!dict.is_msg_field(HEADER_SCOPE, 8));
        assert_eq!(dict.required_fields(HEADER_SCOPE).collect::<Vec<_>>(), vec![8]);
        assert_eq!(dict.field_order(HEADER_SCOPE), &[8, 35]);
        assert_eq!(dict.field_order(TRAILER_SCOPE), &[10]);
    }

    #[test]
    fn test_required_header_and_trailer_fields_become_members() {
        let mut dict = DataDictionary::new();
        dict.add_required_field(HEADER_SCOPE, 34);
        dict.add_required_field(TRAILER_SCOPE, 10);
        assert!(dict.is_header_field(34));
        assert!(dict.is_trailer_field(10));
        assert!(!dict.is_msg_field(HEADER_SCOPE, 34));
        assert_eq!(dict.field_order(HEADER_SCOPE), &[34]);

        let mut hops = DataDictionary::new();
        hops.add_msg_field(HEADER_SCOPE, 628);
        hops.add_required_field(HEADER_SCOPE, 628);
        assert!(hops.is_msg_field(HEADER_SCOPE, 628));
        assert!(!hops.is_header_field(628));
    }

    #[test]
    fn test_value_set_ignored_for_undeclared_tag() {
        let mut dict = DataDictionary::new();
        dict.add_field_value(40, "1");
        assert!(!dict.has_field_value(40));
        assert!(dict.is_field_value(40, "9"));
        dict.add_field(40);
        assert!(dict.has_field_value(40));
        assert!(!dict.is_field_value(40, "9"));
    }

    #[test]
    fn test_msg_name_from_msg_type_values() {
        let mut dict = DataDictionary::new();
        dict.add_msg_type("D");
        dict.add_value_name(tags::MSG_TYPE, "D", "NewOrderSingle");
        assert_eq!(dict.msg_name("D"), Some("NewOrderSingle"));
        assert_eq!(dict.msg_types().collect::<Vec<_>>(), vec!["D"]);
    }
}
