// Type Map Module
//
// This module maps dialect column type names to canonical schema types.
// Lookups are exact and case-sensitive: every spelling a dialect supports
// has its own entry.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::schema::{BaseType, CanonicalType};

/// A dialect type name with no canonical mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown data type: {type_name}")]
pub struct UnknownTypeError {
    pub type_name: String,
}

// Built once on first use; never written afterwards
static SQLITE_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    let mut types = TypeMap::new("sqlite3");
    types.insert_all(
        &[
            "int", "INT", "integer", "INTEGER", "bigint", "BIGINT", "smallint", "SMALLINT",
            "tinyint", "TINYINT", "real", "REAL", "float", "FLOAT", "double", "DOUBLE",
            "numeric", "NUMERIC", "decimal", "DECIMAL",
        ],
        CanonicalType::number(),
    );
    types.insert_all(
        &["varchar", "VARCHAR", "char", "CHAR", "text", "TEXT", "clob", "CLOB"],
        CanonicalType::string(),
    );
    types.insert_all(&["boolean", "BOOLEAN", "bool", "BOOL"], CanonicalType::boolean());
    types.insert_all(
        &["datetime", "DATETIME", "timestamp", "TIMESTAMP"],
        CanonicalType::with_format(BaseType::String, "date-time"),
    );
    types.insert_all(&["date", "DATE"], CanonicalType::with_format(BaseType::String, "date"));
    types.insert_all(&["time", "TIME"], CanonicalType::with_format(BaseType::String, "time"));
    types
});

// MySQL DESCRIBE reports the full column type, arguments included
static MYSQL_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    let mut types = TypeMap::new("mysql");
    types.insert_all(
        &[
            "int", "int unsigned", "bigint", "bigint unsigned", "smallint", "double", "float",
            "decimal(10,2)",
        ],
        CanonicalType::number(),
    );
    types.insert_all(
        &["varchar(255)", "text", "longtext", "mediumtext"],
        CanonicalType::string(),
    );
    types.insert_all(&["tinyint(1)"], CanonicalType::boolean());
    types.insert_all(
        &["datetime", "datetime(3)", "timestamp"],
        CanonicalType::with_format(BaseType::String, "date-time"),
    );
    types.insert_all(&["date"], CanonicalType::with_format(BaseType::String, "date"));
    types
});

/// An immutable-by-convention lookup table from dialect type names to
/// canonical types. Pass it by reference to whatever needs to resolve types.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMap {
    dialect: String,
    entries: HashMap<String, CanonicalType>,
}

impl TypeMap {
    /// Create an empty table for the named dialect
    pub fn new(dialect: impl Into<String>) -> Self {
        TypeMap {
            dialect: dialect.into(),
            entries: HashMap::new(),
        }
    }

    /// Built-in SQLite table
    pub fn sqlite() -> &'static TypeMap {
        &SQLITE_TYPES
    }

    /// Built-in MySQL table
    pub fn mysql() -> &'static TypeMap {
        &MYSQL_TYPES
    }

    /// Built-in table for a driver name
    pub fn for_driver(driver: &str) -> Option<&'static TypeMap> {
        match driver {
            "sqlite3" => Some(Self::sqlite()),
            "mysql" => Some(Self::mysql()),
            _ => None,
        }
    }

    /// Dialect this table belongs to
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Add or replace a mapping, returning the previous one
    pub fn insert(&mut self, type_name: impl Into<String>, canonical: CanonicalType) -> Option<CanonicalType> {
        self.entries.insert(type_name.into(), canonical)
    }

    fn insert_all(&mut self, type_names: &[&str], canonical: CanonicalType) {
        for name in type_names {
            self.insert(*name, canonical.clone());
        }
    }

    /// Builder-style variant of `insert`
    pub fn with_type(mut self, type_name: impl Into<String>, canonical: CanonicalType) -> Self {
        self.insert(type_name, canonical);
        self
    }

    /// Look up a type name without failing
    pub fn get(&self, type_name: &str) -> Option<&CanonicalType> {
        self.entries.get(type_name)
    }

    /// Resolve a dialect type name. There is no fallback type.
    pub fn resolve(&self, type_name: &str) -> Result<CanonicalType, UnknownTypeError> {
        self.get(type_name).cloned().ok_or_else(|| UnknownTypeError {
            type_name: type_name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all mappings, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalType)> {
        self.entries.iter().map(|(name, canonical)| (name.as_str(), canonical))
    }
}

impl Extend<(String, CanonicalType)> for TypeMap {
    fn extend<I: IntoIterator<Item = (String, CanonicalType)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
