/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Validation policy configuration.
//!
//! The policy is set by the owning configuration, never by the specification
//! document. It can be deserialized from a host configuration file; missing
//! keys take their defaults.

use serde::{Deserialize, Serialize};

/// Toggles for the optional validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject fields that appear out of their declared order.
    pub check_fields_out_of_order: bool,
    /// Reject fields present with an empty value.
    pub check_fields_have_values: bool,
    /// Apply tag and membership checks to user-defined tags (5000 and above).
    pub check_user_defined_fields: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            check_fields_out_of_order: false,
            check_fields_have_values: true,
            check_user_defined_fields: true,
        }
    }
}

impl ValidationPolicy {
    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether declared field order is enforced.
    #[must_use]
    pub const fn with_check_fields_out_of_order(mut self, check: bool) -> Self {
        self.check_fields_out_of_order = check;
        self
    }

    /// Sets whether empty values are rejected.
    #[must_use]
    pub const fn with_check_fields_have_values(mut self, check: bool) -> Self {
        self.check_fields_have_values = check;
        self
    }

    /// Sets whether user-defined tags are checked.
    #[must_use]
    pub const fn with_check_user_defined_fields(mut self, check: bool) -> Self {
        self.check_user_defined_fields = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy = ValidationPolicy::new();
        assert!(!policy.check_fields_out_of_order);
        assert!(policy.check_fields_have_values);
        assert!(policy.check_user_defined_fields);
    }

    #[test]
    fn test_policy_builder() {
        let policy = ValidationPolicy::new()
            .with_check_fields_out_of_order(true)
            .with_check_fields_have_values(false)
            .with_check_user_defined_fields(false);
        assert!(policy.check_fields_out_of_order);
        assert!(!policy.check_fields_have_values);
        assert!(!policy.check_user_defined_fields);
    }
}
