/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionaries shared by version.
//!
//! A [`DictionaryRegistry`] holds loaded dictionaries behind [`Arc`] so that
//! many validation calls can read them concurrently, and routes a message to
//! the dictionary matching its BeginString.

use crate::dictionary::DataDictionary;
use ironspec_core::error::{SpecificationError, ValidationError};
use ironspec_core::field::tags;
use ironspec_core::message::{FieldMapView, MessageView};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Thread-safe map from version to dictionary.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    dictionaries: RwLock<HashMap<String, Arc<DataDictionary>>>,
}

impl DictionaryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dictionary under its version, replacing any previous one.
    ///
    /// # Errors
    /// Returns `SpecificationError::MissingAttribute` if the dictionary has no version.
    pub fn register(
        &self,
        dictionary: DataDictionary,
    ) -> Result<Arc<DataDictionary>, SpecificationError> {
        let version = dictionary
            .version()
            .ok_or_else(|| SpecificationError::missing_attr("fix", "version"))?
            .to_string();
        let dictionary = Arc::new(dictionary);
        let previous = self
            .dictionaries
            .write()
            .insert(version.clone(), Arc::clone(&dictionary));
        if previous.is_some() {
            warn!(version = %version, "replaced registered dictionary");
        } else {
            debug!(version = %version, "registered dictionary");
        }
        Ok(dictionary)
    }

    /// Returns the dictionary for a version.
    #[must_use]
    pub fn get(&self, version: &str) -> Option<Arc<DataDictionary>> {
        self.dictionaries.read().get(version).cloned()
    }

    /// Removes the dictionary for a version.
    pub fn remove(&self, version: &str) -> Option<Arc<DataDictionary>> {
        self.dictionaries.write().remove(version)
    }

    /// Returns true if a dictionary is registered for the version.
    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.dictionaries.read().contains_key(version)
    }

    /// Returns the registered versions in sorted order.
    #[must_use]
    pub fn versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self.dictionaries.read().keys().cloned().collect();
        versions.sort();
        versions
    }

    /// Returns the number of registered dictionaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dictionaries.read().len()
    }

    /// Returns true if no dictionary is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionaries.read().is_empty()
    }

    /// Validates a message against the dictionary named by its BeginString.
    ///
    /// # Errors
    /// Returns `ValidationError::RequiredTagMissing` if BeginString is absent,
    /// `ValidationError::UnsupportedVersion` if no dictionary is registered for
    /// it, or the first rule the message violates.
    pub fn validate<M: MessageView>(&self, message: &M) -> Result<(), ValidationError> {
        let begin_string = message
            .header()
            .get(tags::BEGIN_STRING)
            .ok_or(ValidationError::RequiredTagMissing {
                tag: tags::BEGIN_STRING,
            })?;
        let dictionary = self
            .get(begin_string)
            .ok_or_else(|| ValidationError::UnsupportedVersion {
                expected: self.versions().join(", "),
                actual: begin_string.to_string(),
            })?;
        dictionary.validate(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SAMPLE;
    use crate::loader::load_str;
    use ironspec_core::message::{FieldMap, Message};
    use std::thread;

    fn heartbeat(begin_string: &str) -> Message {
        let header = FieldMap::new()
            .with_field(8, begin_string)
            .with_field(9, "55")
            .with_field(35, "0");
        Message::from_sections(header, FieldMap::new(), FieldMap::new().with_field(10, "100"))
    }

    #[test]
    fn test_register_and_get() {
        let registry = DictionaryRegistry::new();
        assert!(registry.is_empty());
        registry.register(load_str(SAMPLE).unwrap()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("FIX.4.4"));
        assert!(registry.get("FIX.4.2").is_none());
        assert_eq!(registry.versions(), vec!["FIX.4.4".to_string()]);
        assert!(registry.remove("FIX.4.4").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_requires_version() {
        let registry = DictionaryRegistry::new();
        assert_eq!(
            registry.register(DataDictionary::new()).unwrap_err(),
            SpecificationError::missing_attr("fix", "version")
        );
    }

    #[test]
    fn test_validate_routes_by_begin_string() {
        let registry = DictionaryRegistry::new();
        registry.register(load_str(SAMPLE).unwrap()).unwrap();

        assert_eq!(registry.validate(&heartbeat("FIX.4.4")), Ok(()));
        assert_eq!(
            registry.validate(&heartbeat("FIX.4.2")),
            Err(ValidationError::UnsupportedVersion {
                expected: "FIX.4.4".into(),
                actual: "FIX.4.2".into()
            })
        );

        let mut msg = heartbeat("FIX.4.4");
        msg.header_mut().remove_field(8);
        assert_eq!(
            registry.validate(&msg),
            Err(ValidationError::RequiredTagMissing { tag: 8 })
        );
    }

    #[test]
    fn test_concurrent_validation() {
        let registry = Arc::new(DictionaryRegistry::new());
        registry.register(load_str(SAMPLE).unwrap()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..100).all(|_| registry.validate(&heartbeat("FIX.4.4")).is_ok())
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
