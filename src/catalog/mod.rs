//! Catalog Module
//!
//! This module holds the table model produced from DDL or catalog queries,
//! the canonical type vocabulary, and the per-dialect type tables.

pub mod schema;
pub mod field;
pub mod table;
pub mod type_map;
pub mod builder;

// Re-export key types
pub use self::schema::{BaseType, CanonicalType};
pub use self::field::Field;
pub use self::table::Table;
pub use self::type_map::{TypeMap, UnknownTypeError};
pub use self::builder::build_table;
