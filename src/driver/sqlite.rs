// SQLite Driver
//
// SQLite keeps the original CREATE TABLE text in sqlite_master, so every
// table is recovered by running that text through the DDL parser.

use log::{debug, info};
use rusqlite::{Connection, OpenFlags};

use crate::catalog::{Table, TypeMap};
use crate::ddl::parse_tables;
use super::{Driver, DriverError, DriverResult};

/// Name and DDL of one table as stored in sqlite_master
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteTable {
    pub name: String,
    pub sql: String,
}

/// Reads table models from a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    data_source: String,
    types: TypeMap,
}

impl SqliteDriver {
    /// Driver using the built-in SQLite type table
    pub fn new(data_source: impl Into<String>) -> Self {
        Self::with_types(data_source, TypeMap::sqlite().clone())
    }

    /// Driver using a caller-supplied type table
    pub fn with_types(data_source: impl Into<String>, types: TypeMap) -> Self {
        SqliteDriver {
            data_source: data_source.into(),
            types,
        }
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Open the database without ever creating it
    fn open(&self) -> DriverResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.data_source, flags)?)
    }
}

/// List user tables with their DDL, in creation order. SQLite's own
/// bookkeeping tables (sqlite_sequence, sqlite_stat1, ...) are skipped.
pub fn select_tables(conn: &Connection) -> DriverResult<Vec<SqliteTable>> {
    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY rowid",
    )?;

    let tables = stmt
        .query_map([], |row| {
            Ok(SqliteTable {
                name: row.get(0)?,
                sql: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tables)
}

impl Driver for SqliteDriver {
    fn read_tables(&self) -> DriverResult<Vec<Table>> {
        let conn = self.open()?;
        let tables = select_tables(&conn)?;
        info!("Found {} tables in {}", tables.len(), self.data_source());

        let statements: Vec<&str> = tables.iter().map(|t| t.sql.as_str()).collect();
        let results = parse_tables(&statements, &self.types);

        let mut parsed = Vec::with_capacity(tables.len());
        for (table, result) in tables.into_iter().zip(results) {
            match result {
                Ok(model) => {
                    debug!("Read table {} ({} fields)", model.name(), model.fields().len());
                    parsed.push(model);
                }
                Err(source) => {
                    return Err(DriverError::Ddl {
                        table: table.name,
                        source,
                    });
                }
            }
        }

        Ok(parsed)
    }
}
