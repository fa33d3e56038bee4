/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! XML document reader built on `quick-xml`.

use crate::document::{DocumentNode, SpecDocument};
use ironspec_core::error::SpecificationError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// An element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, SpecificationError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(xml_error)?
            .to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(xml_error)?
                .to_string();
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

impl DocumentNode for XmlNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

/// A parsed XML specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlNode,
}

impl XmlDocument {
    /// Parses a document from a string.
    ///
    /// # Errors
    /// Returns `SpecificationError::Xml` if the input is not well-formed or has
    /// no single root element.
    pub fn parse(xml: &str) -> Result<Self, SpecificationError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root = None;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(XmlNode::from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let node = XmlNode::from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| SpecificationError::Xml("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(e)),
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(SpecificationError::Xml(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.map(|root| Self { root })
            .ok_or_else(|| SpecificationError::Xml("document has no root element".into()))
    }

    /// Reads and parses a document from a file.
    ///
    /// # Errors
    /// Returns `SpecificationError::Io` if the file cannot be read, or
    /// `SpecificationError::Xml` if it is not well-formed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecificationError> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }
}

impl SpecDocument for XmlDocument {
    type Node = XmlNode;

    fn root(&self) -> &XmlNode {
        &self.root
    }
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), SpecificationError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(SpecificationError::Xml("multiple root elements".into()));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn xml_error(err: impl std::fmt::Display) -> SpecificationError {
    SpecificationError::Xml(err.to_string())
}
