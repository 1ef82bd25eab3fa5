//! Catalog Driver Module
//!
//! Drivers enumerate the tables of a database and produce one table model
//! per table. SQLite goes through the DDL parser; MySQL maps DESCRIBE rows
//! directly.

pub mod sqlite;
pub mod mysql;

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::catalog::{CanonicalType, Table, TypeMap, UnknownTypeError};
use crate::ddl::DdlError;

pub use self::sqlite::SqliteDriver;
pub use self::mysql::{table_from_describe, DescribeRow, MysqlDriver};

/// Driver errors
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("MySQL error: {0}")]
    Mysql(#[from] sqlx::Error),
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("Failed to read table {table}: {source}")]
    Ddl {
        table: String,
        #[source]
        source: DdlError,
    },
    #[error("Failed to describe table {table}: {source}")]
    UnknownType {
        table: String,
        #[source]
        source: UnknownTypeError,
    },
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Source of table models
pub trait Driver {
    /// Read every user table, in catalog order
    fn read_tables(&self) -> DriverResult<Vec<Table>>;
}

/// Which driver to use and where the database lives
#[derive(Debug, Clone, Default)]
pub struct ConnectionInfo {
    pub driver: String,
    pub data_source: String,
    /// Extra or replacement entries for the driver's built-in type table
    pub type_overrides: HashMap<String, CanonicalType>,
}

impl ConnectionInfo {
    pub fn new(driver: impl Into<String>, data_source: impl Into<String>) -> Self {
        ConnectionInfo {
            driver: driver.into(),
            data_source: data_source.into(),
            type_overrides: HashMap::new(),
        }
    }

    /// The driver's built-in type table with the overrides applied
    pub fn type_map(&self) -> DriverResult<TypeMap> {
        let mut types = TypeMap::for_driver(&self.driver)
            .ok_or_else(|| DriverError::UnknownDriver(self.driver.clone()))?
            .clone();
        types.extend(self.type_overrides.iter().map(|(name, ty)| (name.clone(), ty.clone())));
        Ok(types)
    }
}

/// Create a driver for the given connection info
pub fn new_connection(info: &ConnectionInfo) -> DriverResult<Box<dyn Driver>> {
    let types = info.type_map()?;
    debug!(
        "Connecting with driver {} ({} known types)",
        info.driver,
        types.len()
    );

    match info.driver.as_str() {
        "sqlite3" => Ok(Box::new(SqliteDriver::with_types(info.data_source.clone(), types))),
        "mysql" => Ok(Box::new(MysqlDriver::with_types(info.data_source.clone(), types))),
        other => Err(DriverError::UnknownDriver(other.to_string())),
    }
}
