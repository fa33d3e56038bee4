/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Decoded message abstractions.
//!
//! This module provides:
//! - [`FieldMapView`]: Read access to one section or group instance
//! - [`MessageView`]: Read access to the header, body and trailer of a message
//! - [`FieldMap`]: Owned, ordered field storage with nested group instances
//! - [`Message`]: A decoded message made of three [`FieldMap`] sections
//!
//! The validator is written against the traits only, so decoders that keep
//! their own representation can be validated without copying into a [`Message`].

use crate::field::{Field, tags};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Read access to an ordered set of fields and their repeating groups.
pub trait FieldMapView {
    /// Returns the present fields as (tag, raw value) pairs, in order.
    fn fields(&self) -> impl Iterator<Item = (u32, &str)>;

    /// Returns the raw value of a field.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    fn get(&self, tag: u32) -> Option<&str>;

    /// Returns true if the field is present.
    fn is_set(&self, tag: u32) -> bool {
        self.get(tag).is_some()
    }

    /// Returns the number of group instances stored under a count tag.
    fn group_count(&self, tag: u32) -> usize;

    /// Returns the group instances stored under a count tag.
    fn groups(&self, tag: u32) -> impl Iterator<Item = &Self>;

    /// Returns every count tag that has group instances.
    fn group_tags(&self) -> impl Iterator<Item = u32>;
}

/// Read access to a decoded message.
pub trait MessageView {
    /// Field map type used for every section.
    type Map: FieldMapView;

    /// Returns the header section.
    fn header(&self) -> &Self::Map;

    /// Returns the body section.
    fn body(&self) -> &Self::Map;

    /// Returns the trailer section.
    fn trailer(&self) -> &Self::Map;
}

/// Ordered field storage with nested repeating groups.
///
/// Setting a tag that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    /// Fields in insertion order.
    fields: SmallVec<[Field; 16]>,
    /// Group instances keyed by their count tag.
    groups: BTreeMap<u32, Vec<FieldMap>>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any existing value for the tag.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The raw value
    pub fn set_field(&mut self, tag: u32, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field::new(tag, value)),
        }
    }

    /// Sets a field and returns the map, for chained construction.
    #[must_use]
    pub fn with_field(mut self, tag: u32, value: impl Into<String>) -> Self {
        self.set_field(tag, value);
        self
    }

    /// Gets a field by tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Removes a field, returning it if it was present.
    pub fn remove_field(&mut self, tag: u32) -> Option<Field> {
        let position = self.fields.iter().position(|f| f.tag == tag)?;
        Some(self.fields.remove(position))
    }

    /// Appends a group instance under a count tag.
    ///
    /// The count field is set to the new number of instances.
    ///
    /// # Arguments
    /// * `tag` - The group count tag (NumInGroup field)
    /// * `group` - The group instance, starting with its delimiter field
    pub fn add_group(&mut self, tag: u32, group: FieldMap) {
        let instances = self.groups.entry(tag).or_default();
        instances.push(group);
        let count = instances.len();
        self.set_field(tag, count.to_string());
    }

    /// Appends a group instance and returns the map, for chained construction.
    #[must_use]
    pub fn with_group(mut self, tag: u32, group: FieldMap) -> Self {
        self.add_group(tag, group);
        self
    }

    /// Returns the group instances stored under a count tag.
    #[must_use]
    pub fn get_groups(&self, tag: u32) -> &[FieldMap] {
        self.groups
            .get(&tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns an iterator over all fields.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of fields, excluding group members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the map has neither fields nor groups.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.is_empty()
    }
}

impl FieldMapView for FieldMap {
    fn fields(&self) -> impl Iterator<Item = (u32, &str)> {
        self.fields.iter().map(|f| (f.tag, f.value.as_str()))
    }

    fn get(&self, tag: u32) -> Option<&str> {
        self.get_field(tag).map(Field::as_str)
    }

    fn group_count(&self, tag: u32) -> usize {
        self.groups.get(&tag).map_or(0, Vec::len)
    }

    fn groups(&self, tag: u32) -> impl Iterator<Item = &Self> {
        self.get_groups(tag).iter()
    }

    fn group_tags(&self) -> impl Iterator<Item = u32> {
        self.groups.keys().copied()
    }
}

/// A decoded message split into header, body and trailer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    header: FieldMap,
    body: FieldMap,
    trailer: FieldMap,
}

impl Message {
    /// Creates a message with BeginString and MsgType set in the header.
    ///
    /// # Arguments
    /// * `begin_string` - The protocol version (e.g., "FIX.4.4")
    /// * `msg_type` - The message type (e.g., "D")
    #[must_use]
    pub fn new(begin_string: &str, msg_type: &str) -> Self {
        let header = FieldMap::new()
            .with_field(tags::BEGIN_STRING, begin_string)
            .with_field(tags::MSG_TYPE, msg_type);
        Self::from_sections(header, FieldMap::new(), FieldMap::new())
    }

    /// Creates a message from already decoded sections.
    #[must_use]
    pub fn from_sections(header: FieldMap, body: FieldMap, trailer: FieldMap) -> Self {
        Self {
            header,
            body,
            trailer,
        }
    }

    /// Returns the MsgType value from the header.
    #[must_use]
    pub fn msg_type(&self) -> Option<&str> {
        self.header.get(tags::MSG_TYPE)
    }

    /// Returns the BeginString value from the header.
    #[must_use]
    pub fn begin_string(&self) -> Option<&str> {
        self.header.get(tags::BEGIN_STRING)
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut FieldMap {
        &mut self.header
    }

    /// Returns a mutable reference to the body.
    pub fn body_mut(&mut self) -> &mut FieldMap {
        &mut self.body
    }

    /// Returns a mutable reference to the trailer.
    pub fn trailer_mut(&mut self) -> &mut FieldMap {
        &mut self.trailer
    }
}

impl MessageView for Message {
    type Map = FieldMap;

    fn header(&self) -> &FieldMap {
        &self.header
    }

    fn body(&self) -> &FieldMap {
        &self.body
    }

    fn trailer(&self) -> &FieldMap {
        &self.trailer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_replaces_in_place() {
        let mut map = FieldMap::new().with_field(11, "A").with_field(55, "IBM");
        map.set_field(11, "B");
        let tags: Vec<u32> = map.fields().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![11, 55]);
        assert_eq!(map.get(11), Some("B"));
    }

    #[test]
    fn test_add_group_sets_count() {
        let mut map = FieldMap::new();
        map.add_group(78, FieldMap::new().with_field(79, "ACC1"));
        map.add_group(78, FieldMap::new().with_field(79, "ACC2"));
        assert_eq!(map.get(78), Some("2"));
        assert_eq!(map.group_count(78), 2);
        assert_eq!(map.group_count(79), 0);
        assert_eq!(map.group_tags().collect::<Vec<_>>(), vec![78]);
        let accounts: Vec<_> = map.groups(78).filter_map(|g| g.get(79)).collect();
        assert_eq!(accounts, vec!["ACC1", "ACC2"]);
    }

    #[test]
    fn test_remove_field() {
        let mut map = FieldMap::new().with_field(1, "x");
        assert_eq!(map.remove_field(1), Some(Field::new(1, "x")));
        assert!(map.remove_field(1).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_message_header_access() {
        let mut msg = Message::new("FIX.4.4", "D");
        msg.body_mut().set_field(11, "ORDER1");
        assert_eq!(msg.msg_type(), Some("D"));
        assert_eq!(msg.begin_string(), Some("FIX.4.4"));
        assert!(msg.body().is_set(11));
        assert!(!msg.trailer().is_set(10));
    }
}
