//! Table Model Module
//!
//! This module defines the Table type, the sole artifact handed from the
//! DDL core to schema generation.

use serde::{Serialize, Deserialize};

use super::field::Field;

/// Represents a table: name, ordered fields and primary key columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    name: String,
    /// Fields in declaration order
    fields: Vec<Field>,
    /// Primary key column names, in declaration order
    primary_keys: Vec<String>,
}

impl Table {
    /// Create a new table with the given name, fields and primary keys
    pub fn new(name: impl Into<String>, fields: Vec<Field>, primary_keys: Vec<String>) -> Self {
        Table {
            name: name.into(),
            fields,
            primary_keys,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the primary key columns
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }
}
