// Field Module
//
// This module defines the Field type: one column of a table model.

use serde::{Serialize, Deserialize};

use super::schema::CanonicalType;

/// Represents a column in a table model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column name, as written in the source (quotes stripped)
    name: String,
    /// Resolved column type
    #[serde(rename = "type")]
    field_type: CanonicalType,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: CanonicalType) -> Self {
        Field {
            name: name.into(),
            field_type,
        }
    }

    /// Get the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the resolved type
    pub fn field_type(&self) -> &CanonicalType {
        &self.field_type
    }
}
