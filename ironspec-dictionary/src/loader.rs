/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Specification loader.
//!
//! Builds a [`DataDictionary`] from a QuickFIX-style specification document:
//!
//! ```xml
//! <fix type="FIX" major="4" minor="4">
//!   <header>..</header>
//!   <trailer>..</trailer>
//!   <messages><message name="NewOrderSingle" msgtype="D">..</message></messages>
//!   <components><component name="Instrument">..</component></components>
//!   <fields><field number="11" name="ClOrdID" type="STRING"/></fields>
//! </fix>
//! ```
//!
//! Components are flattened into the scope that references them. A member is
//! required only if it is marked required and every component reference
//! leading to it is marked required too. The dictionary is only returned once
//! the whole document has been read.

use crate::dictionary::{DataDictionary, HEADER_SCOPE, TRAILER_SCOPE};
use crate::document::{DocumentNode, SpecDocument};
use crate::xml::XmlDocument;
use ironspec_core::error::SpecificationError;
use ironspec_core::field::tags;
use ironspec_core::types::FieldType;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Section a member list is being loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Trailer,
    Body,
    Group,
}

/// Loads a dictionary from a parsed document.
///
/// # Errors
/// Returns a [`SpecificationError`] for a malformed document, a missing
/// mandatory element or attribute, or an unresolved field or component name.
pub fn load<D: SpecDocument>(document: &D) -> Result<DataDictionary, SpecificationError> {
    let root = document.root();
    if root.name() != "fix" {
        return Err(SpecificationError::MissingElement {
            element: "fix".to_string(),
        });
    }

    let version = read_version(root)?;
    let mut dictionary = DataDictionary::with_version(version.as_str());

    for node in required_child(root, "fields")?.children_named("field") {
        load_field(&mut dictionary, node, &version)?;
    }

    let mut components = HashMap::new();
    if let Some(section) = root.child("components") {
        for node in section.children_named("component") {
            components.insert(node.required_attribute("name")?, node);
        }
    }

    let builder = ScopeBuilder {
        catalog: dictionary.clone(),
        components,
    };
    let mut trail = Vec::new();

    let header = required_child(root, "header")?;
    builder.add_members(&mut dictionary, header, HEADER_SCOPE, Section::Header, true, &mut trail)?;
    let trailer = required_child(root, "trailer")?;
    builder.add_members(&mut dictionary, trailer, TRAILER_SCOPE, Section::Trailer, true, &mut trail)?;

    for node in required_child(root, "messages")?.children_named("message") {
        let msg_type = node.required_attribute("msgtype")?;
        let name = node.required_attribute("name")?;
        dictionary.add_msg_type(msg_type);
        dictionary.add_value_name(tags::MSG_TYPE, msg_type, name);
        builder.add_members(&mut dictionary, node, msg_type, Section::Body, true, &mut trail)?;
        trace!(msg_type, name, "loaded message definition");
    }

    debug!(
        version = %version,
        fields = dictionary.fields().count(),
        messages = dictionary.msg_types().count(),
        "loaded specification"
    );
    Ok(dictionary)
}

/// Parses and loads a specification from an XML string.
///
/// # Errors
/// Returns a [`SpecificationError`] if the document is malformed or incomplete.
pub fn load_str(xml: &str) -> Result<DataDictionary, SpecificationError> {
    load(&XmlDocument::parse(xml)?)
}

/// Reads and loads a specification from an XML file.
///
/// # Errors
/// Returns a [`SpecificationError`] if the file cannot be read, or if the
/// document is malformed or incomplete.
pub fn load_path(path: impl AsRef<Path>) -> Result<DataDictionary, SpecificationError> {
    load(&XmlDocument::from_path(path)?)
}

impl DataDictionary {
    /// Loads a dictionary from an XML specification string.
    ///
    /// # Errors
    /// Returns a [`SpecificationError`] if the document is malformed or incomplete.
    pub fn from_xml(xml: &str) -> Result<Self, SpecificationError> {
        load_str(xml)
    }

    /// Loads a dictionary from an XML specification file.
    ///
    /// # Errors
    /// Returns a [`SpecificationError`] if the file cannot be read, or if the
    /// document is malformed or incomplete.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecificationError> {
        load_path(path)
    }
}

fn required_child<'a, N: DocumentNode>(
    node: &'a N,
    name: &str,
) -> Result<&'a N, SpecificationError> {
    node.child(name)
        .ok_or_else(|| SpecificationError::MissingElement {
            element: name.to_string(),
        })
}

/// Builds the version string, e.g. `FIX.4.4` or `FIX.5.0SP2`.
fn read_version<N: DocumentNode>(root: &N) -> Result<String, SpecificationError> {
    let kind = root.attribute("type").unwrap_or("FIX");
    let major = read_number(root, "major")?;
    let minor = read_number(root, "minor")?;
    let mut version = format!("{kind}.{major}.{minor}");
    if let Some(pack) = root.attribute("servicepack") {
        let pack: u32 = pack
            .parse()
            .map_err(|_| SpecificationError::invalid_attr(root.name(), "servicepack", pack))?;
        if pack != 0 {
            version.push_str(&format!("SP{pack}"));
        }
    }
    Ok(version)
}

fn read_number<N: DocumentNode>(node: &N, attribute: &str) -> Result<u32, SpecificationError> {
    let raw = node.required_attribute(attribute)?;
    raw.parse()
        .map_err(|_| SpecificationError::invalid_attr(node.name(), attribute, raw))
}

fn load_field<N: DocumentNode>(
    dictionary: &mut DataDictionary,
    node: &N,
    version: &str,
) -> Result<(), SpecificationError> {
    let tag = read_number(node, "number")?;
    let name = node.required_attribute("name")?;
    let field_type = node.required_attribute("type")?;

    dictionary.add_field(tag);
    dictionary.add_field_name(tag, name);
    dictionary.add_field_type(tag, FieldType::from_xml(field_type, version));

    for value in node.children_named("value") {
        let literal = value.required_attribute("enum")?;
        dictionary.add_field_value(tag, literal);
        if let Some(description) = value.attribute("description") {
            dictionary.add_value_name(tag, literal, description);
        }
    }
    Ok(())
}

fn is_required<N: DocumentNode>(node: &N) -> bool {
    node.attribute("required")
        .is_some_and(|flag| flag.eq_ignore_ascii_case("Y"))
}

/// Resolves member lists against the field catalog and component table.
struct ScopeBuilder<'d, N> {
    catalog: DataDictionary,
    components: HashMap<&'d str, &'d N>,
}

impl<'d, N: DocumentNode> ScopeBuilder<'d, N> {
    /// Adds the members of `parent` to `target` under `scope`.
    ///
    /// Returns the first member tag, which is the delimiter when `parent` is
    /// a group.
    fn add_members(
        &self,
        target: &mut DataDictionary,
        parent: &N,
        scope: &str,
        section: Section,
        parent_required: bool,
        trail: &mut Vec<String>,
    ) -> Result<Option<u32>, SpecificationError> {
        let mut first = None;
        for node in parent.children() {
            let required = parent_required && is_required(node);
            let tag = match node.name() {
                "field" => {
                    let tag = self.lookup_field(node)?;
                    self.register(target, scope, section, tag, required);
                    tag
                }
                "group" => {
                    let tag = self.lookup_field(node)?;
                    self.register(target, scope, section, tag, required);
                    let mut child = DataDictionary::new();
                    let delimiter = self
                        .add_members(&mut child, node, scope, Section::Group, true, trail)?
                        .ok_or_else(|| SpecificationError::EmptyGroup {
                            name: node.attribute("name").unwrap_or_default().to_string(),
                        })?;
                    target.add_group(scope, tag, delimiter, child);
                    tag
                }
                "component" => {
                    let name = node.required_attribute("name")?;
                    let component = self.components.get(name).copied().ok_or_else(|| {
                        SpecificationError::UnknownComponent {
                            name: name.to_string(),
                        }
                    })?;
                    if trail.iter().any(|entered| entered == name) {
                        return Err(SpecificationError::RecursiveComponent {
                            name: name.to_string(),
                        });
                    }
                    trail.push(name.to_string());
                    let first_member =
                        self.add_members(target, component, scope, section, required, trail)?;
                    trail.pop();
                    match first_member {
                        Some(tag) => tag,
                        None => continue,
                    }
                }
                _ => continue,
            };
            first.get_or_insert(tag);
        }
        Ok(first)
    }

    fn lookup_field(&self, node: &N) -> Result<u32, SpecificationError> {
        let name = node.required_attribute("name")?;
        self.catalog
            .field_tag(name)
            .ok_or_else(|| SpecificationError::UnknownField {
                name: name.to_string(),
            })
    }

    fn register(
        &self,
        target: &mut DataDictionary,
        scope: &str,
        section: Section,
        tag: u32,
        required: bool,
    ) {
        match section {
            Section::Header => target.add_header_field(tag),
            Section::Trailer => target.add_trailer_field(tag),
            Section::Body => target.add_msg_field(scope, tag),
            Section::Group => {
                self.copy_definition(target, tag);
                target.add_msg_field(scope, tag);
            }
        }
        if required {
            target.add_required_field(scope, tag);
        }
    }

    /// Copies the catalog definition of a field into a group dictionary.
    fn copy_definition(&self, target: &mut DataDictionary, tag: u32) {
        target.add_field(tag);
        target.add_field_type(tag, self.catalog.field_type(tag));
        if let Some(name) = self.catalog.field_name(tag) {
            target.add_field_name(tag, name);
        }
        for value in self.catalog.field_values(tag) {
            target.add_field_value(tag, value);
            if let Some(label) = self.catalog.value_name(tag, value) {
                target.add_value_name(tag, value, label);
            }
        }
    }
}
