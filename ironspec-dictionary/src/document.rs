/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Abstract specification document reader.
//!
//! The loader only sees a tree of named nodes with attributes. Any parser
//! that can expose that shape can feed it; [`crate::xml`] provides the
//! default implementation.

use ironspec_core::error::SpecificationError;

/// A node of a specification document.
pub trait DocumentNode {
    /// Returns the element name.
    fn name(&self) -> &str;

    /// Returns the value of an attribute.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Returns the child elements in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Returns the child elements with a given name.
    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children().filter(move |child| child.name() == name)
    }

    /// Returns the first child element with a given name.
    fn child(&self, name: &str) -> Option<&Self> {
        self.children().find(|child| child.name() == name)
    }

    /// Returns the value of an attribute that must be present.
    ///
    /// # Errors
    /// Returns `SpecificationError::MissingAttribute` if the attribute is absent.
    fn required_attribute(&self, name: &str) -> Result<&str, SpecificationError> {
        self.attribute(name)
            .ok_or_else(|| SpecificationError::missing_attr(self.name(), name))
    }
}

/// A parsed specification document.
pub trait SpecDocument {
    /// Node type of this document.
    type Node: DocumentNode;

    /// Returns the root element.
    fn root(&self) -> &Self::Node;
}
