// Generation Request
//
// Ties a connection, table filters, and a generator request together.

use std::collections::HashSet;

use log::{debug, warn};
use thiserror::Error;

use crate::catalog::Table;
use crate::driver::{new_connection, ConnectionInfo, DriverError};
use crate::schema::{GeneratorError, GeneratorRequest};

/// Errors from a full generation run
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// One database-to-schema run
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub connection: ConnectionInfo,
    pub generator: GeneratorRequest,
    /// Table names to keep; empty keeps all
    pub includes: Vec<String>,
    /// Table names to drop
    pub excludes: Vec<String>,
}

impl Request {
    pub fn new(connection: ConnectionInfo, generator: GeneratorRequest) -> Self {
        Request {
            connection,
            generator,
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Apply the include and exclude lists, keeping table order
    pub fn filter_tables(&self, tables: Vec<Table>) -> Vec<Table> {
        if self.includes.is_empty() && self.excludes.is_empty() {
            return tables;
        }

        let includes: HashSet<&str> = self.includes.iter().map(String::as_str).collect();
        let excludes: HashSet<&str> = self.excludes.iter().map(String::as_str).collect();

        tables
            .into_iter()
            .filter(|t| includes.is_empty() || includes.contains(t.name()))
            .filter(|t| !excludes.contains(t.name()))
            .collect()
    }

    /// Read the tables, filter them, and generate schemas
    pub fn perform(&self) -> Result<(), RequestError> {
        debug!("Connecting to database: {:?}", self.connection);
        let driver = new_connection(&self.connection)?;
        let tables = driver.read_tables()?;

        let read = tables.len();
        let tables = self.filter_tables(tables);
        if read > 0 && tables.is_empty() {
            warn!("Filters excluded all {} tables", read);
        }

        debug!("Generating schemas: {:?}", self.generator);
        self.generator.perform(&tables)?;
        Ok(())
    }
}
