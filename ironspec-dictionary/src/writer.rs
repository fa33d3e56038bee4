/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Specification writer.
//!
//! Serializes a [`DataDictionary`] back into the document format read by
//! [`crate::loader`]. Components are not reconstructed: every member is
//! written inline in the scope it belongs to, which loads into an equivalent
//! dictionary.

use crate::dictionary::{DataDictionary, HEADER_SCOPE, TRAILER_SCOPE};
use ironspec_core::error::SpecificationError;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::collections::BTreeMap;

/// Session level message types, written with `msgcat="admin"`.
const ADMIN_MSG_TYPES: [&str; 7] = ["0", "1", "2", "3", "4", "5", "A"];

/// Writes a dictionary as an XML specification document.
///
/// Every tag referenced by a scope must be declared, with a name, in the
/// root dictionary or in the group dictionary that uses it. Definitions found
/// only in group dictionaries are written to the shared field catalog.
///
/// # Errors
/// Returns `SpecificationError::MissingAttribute` if the dictionary has no
/// version, `SpecificationError::InvalidAttribute` if the version cannot be
/// split into type, major and minor, and `SpecificationError::UnnamedField`
/// for a tag without a name.
pub fn write_specification(dictionary: &DataDictionary) -> Result<String, SpecificationError> {
    let version = dictionary
        .version()
        .ok_or_else(|| SpecificationError::missing_attr("fix", "version"))?;
    let (kind, major, minor, pack) = split_version(version)?;

    let mut out = SpecWriter {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        root: dictionary,
    };

    let mut fix = BytesStart::new("fix");
    fix.push_attribute(("type", kind));
    fix.push_attribute(("major", major));
    fix.push_attribute(("minor", minor));
    if let Some(pack) = pack {
        fix.push_attribute(("servicepack", pack));
    }
    out.start(fix)?;

    out.start(BytesStart::new("header"))?;
    out.members(dictionary, HEADER_SCOPE)?;
    out.end("header")?;

    out.start(BytesStart::new("trailer"))?;
    out.members(dictionary, TRAILER_SCOPE)?;
    out.end("trailer")?;

    out.start(BytesStart::new("messages"))?;
    for msg_type in dictionary.msg_types() {
        let mut message = BytesStart::new("message");
        message.push_attribute(("name", dictionary.msg_name(msg_type).unwrap_or(msg_type)));
        message.push_attribute(("msgtype", msg_type));
        let category = if ADMIN_MSG_TYPES.iter().any(|admin| *admin == msg_type) {
            "admin"
        } else {
            "app"
        };
        message.push_attribute(("msgcat", category));
        out.start(message)?;
        out.members(dictionary, msg_type)?;
        out.end("message")?;
    }
    out.end("messages")?;

    let mut definitions = BTreeMap::new();
    collect_definitions(dictionary, &mut definitions);
    out.start(BytesStart::new("fields"))?;
    for (tag, source) in definitions {
        out.field_definition(source, tag)?;
    }
    out.end("fields")?;

    out.end("fix")?;
    String::from_utf8(out.writer.into_inner()).map_err(xml_error)
}

/// Splits `FIX.4.4` or `FIX.5.0SP2` into type, major, minor and service pack.
fn split_version(version: &str) -> Result<(&str, &str, &str, Option<&str>), SpecificationError> {
    let invalid = || SpecificationError::invalid_attr("fix", "version", version);
    let mut parts = version.splitn(3, '.');
    let (Some(kind), Some(major), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let (minor, pack) = match rest.split_once("SP") {
        Some((minor, pack)) => (minor, Some(pack)),
        None => (rest, None),
    };
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if kind.is_empty() || !numeric(major) || !numeric(minor) || !pack.is_none_or(numeric) {
        return Err(invalid());
    }
    Ok((kind, major, minor, pack))
}

/// Maps every tag declared anywhere in the group tree to the dictionary that
/// defines it. A definition in the root takes precedence over group copies.
fn collect_definitions<'a>(
    dictionary: &'a DataDictionary,
    definitions: &mut BTreeMap<u32, &'a DataDictionary>,
) {
    for tag in dictionary.fields() {
        definitions.entry(tag).or_insert(dictionary);
    }
    for child in dictionary.group_dictionaries() {
        collect_definitions(child, definitions);
    }
}

struct SpecWriter<'a> {
    writer: Writer<Vec<u8>>,
    root: &'a DataDictionary,
}

impl SpecWriter<'_> {
    fn start(&mut self, element: BytesStart<'_>) -> Result<(), SpecificationError> {
        self.writer
            .write_event(Event::Start(element))
            .map_err(xml_error)
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<(), SpecificationError> {
        self.writer
            .write_event(Event::Empty(element))
            .map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<(), SpecificationError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn name_of(&self, dictionary: &DataDictionary, tag: u32) -> Result<String, SpecificationError> {
        self.root
            .field_name(tag)
            .or_else(|| dictionary.field_name(tag))
            .map(str::to_string)
            .ok_or(SpecificationError::UnnamedField { tag })
    }

    /// Writes the members of a scope in declared order, recursing into groups.
    fn members(&mut self, dictionary: &DataDictionary, scope: &str) -> Result<(), SpecificationError> {
        for &tag in dictionary.field_order(scope) {
            let name = self.name_of(dictionary, tag)?;
            let required = if dictionary.is_required_field(scope, tag) {
                "Y"
            } else {
                "N"
            };
            match dictionary.group_schema(scope, tag) {
                Some(group) => {
                    let mut element = BytesStart::new("group");
                    element.push_attribute(("name", name.as_str()));
                    element.push_attribute(("required", required));
                    self.start(element)?;
                    self.group_members(group.dictionary(), group.delimiter(), scope)?;
                    self.end("group")?;
                }
                None => {
                    let mut element = BytesStart::new("field");
                    element.push_attribute(("name", name.as_str()));
                    element.push_attribute(("required", required));
                    self.empty(element)?;
                }
            }
        }
        Ok(())
    }

    /// Writes a group instance's members with the delimiter first.
    fn group_members(
        &mut self,
        group: &DataDictionary,
        delimiter: u32,
        scope: &str,
    ) -> Result<(), SpecificationError> {
        if group.field_order(scope).first() == Some(&delimiter) {
            return self.members(group, scope);
        }
        let mut reordered = group.clone();
        reordered.move_to_front(scope, delimiter);
        self.members(&reordered, scope)
    }

    fn field_definition(
        &mut self,
        source: &DataDictionary,
        tag: u32,
    ) -> Result<(), SpecificationError> {
        let name = self.name_of(source, tag)?;
        let mut number = itoa::Buffer::new();
        let mut element = BytesStart::new("field");
        element.push_attribute(("number", number.format(tag)));
        element.push_attribute(("name", name.as_str()));
        element.push_attribute(("type", source.field_type(tag).xml_name()));

        if !source.has_field_value(tag) {
            return self.empty(element);
        }
        self.start(element)?;
        for value in source.field_values(tag) {
            let mut entry = BytesStart::new("value");
            entry.push_attribute(("enum", value));
            if let Some(label) = source.value_name(tag, value) {
                entry.push_attribute(("description", label));
            }
            self.empty(entry)?;
        }
        self.end("field")
    }
}

fn xml_error(err: impl std::fmt::Display) -> SpecificationError {
    SpecificationError::Xml(err.to_string())
}
