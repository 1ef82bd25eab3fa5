// MySQL Driver
//
// MySQL reports columns in structured form, so its tables never go through
// the DDL parser. The driver lists tables with `SHOW TABLES` and maps each
// `DESCRIBE <table>` row straight to a field using the MySQL type table.

use log::{debug, info};
use serde::{Serialize, Deserialize};
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};

use crate::catalog::{Field, Table, TypeMap};
use super::{Driver, DriverError, DriverResult};

/// One row of `DESCRIBE <table>` output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescribeRow {
    pub field: String,
    /// Full column type, e.g. `varchar(255)` or `bigint unsigned`
    pub data_type: String,
    pub null: Option<String>,
    pub key: Option<String>,
    pub default: Option<String>,
    pub extra: Option<String>,
}

impl DescribeRow {
    pub fn new(field: impl Into<String>, data_type: impl Into<String>) -> Self {
        DescribeRow {
            field: field.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    /// Build a row from DESCRIBE's Field, Type, Null, Key, Default and Extra
    /// columns, in that order
    pub fn from_columns(columns: [Option<String>; 6]) -> Self {
        let [field, data_type, null, key, default, extra] = columns;
        DescribeRow {
            field: field.unwrap_or_default(),
            data_type: data_type.unwrap_or_default(),
            null,
            key,
            default,
            extra,
        }
    }

    /// Whether the column is part of the primary key
    pub fn is_primary_key(&self) -> bool {
        self.key.as_deref() == Some("PRI")
    }
}

/// Build a table model from DESCRIBE rows, in row order
pub fn table_from_describe(table_name: &str, rows: &[DescribeRow], types: &TypeMap) -> DriverResult<Table> {
    let mut fields = Vec::with_capacity(rows.len());
    let mut primary_keys = Vec::new();

    for row in rows {
        let field_type = types.resolve(&row.data_type).map_err(|source| DriverError::UnknownType {
            table: table_name.to_string(),
            source,
        })?;
        if row.is_primary_key() {
            primary_keys.push(row.field.clone());
        }
        fields.push(Field::new(row.field.clone(), field_type));
    }

    debug!("Described table {} ({} fields)", table_name, fields.len());
    Ok(Table::new(table_name, fields, primary_keys))
}

/// Reads table models from a MySQL server, given a `mysql://` URL
#[derive(Debug, Clone)]
pub struct MysqlDriver {
    data_source: String,
    types: TypeMap,
}

impl MysqlDriver {
    /// Driver using the built-in MySQL type table
    pub fn new(data_source: impl Into<String>) -> Self {
        Self::with_types(data_source, TypeMap::mysql().clone())
    }

    pub fn with_types(data_source: impl Into<String>, types: TypeMap) -> Self {
        MysqlDriver {
            data_source: data_source.into(),
            types,
        }
    }

    async fn read_tables_async(&self) -> DriverResult<Vec<Table>> {
        let mut conn = MySqlConnection::connect(&self.data_source).await?;

        let mut names = Vec::new();
        for row in sqlx::raw_sql("SHOW TABLES").fetch_all(&mut conn).await? {
            if let Some(name) = column_text(&row, 0)? {
                names.push(name);
            }
        }
        info!("Found {} tables", names.len());

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let sql = format!("DESCRIBE {}", quote_identifier(&name));
            let rows = sqlx::raw_sql(&sql)
                .fetch_all(&mut conn)
                .await?
                .iter()
                .map(describe_row)
                .collect::<Result<Vec<_>, sqlx::Error>>()?;
            tables.push(table_from_describe(&name, &rows, &self.types)?);
        }

        conn.close().await?;
        Ok(tables)
    }
}

impl Driver for MysqlDriver {
    fn read_tables(&self) -> DriverResult<Vec<Table>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DriverError::Runtime)?;
        runtime.block_on(self.read_tables_async())
    }
}

/// Backtick-quote a table name for use in a statement
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Read a text column. MySQL 8 reports some catalog columns as binary, so
/// the raw bytes are decoded here.
fn column_text(row: &MySqlRow, index: usize) -> Result<Option<String>, sqlx::Error> {
    let raw: Option<Vec<u8>> = row.try_get(index)?;
    Ok(raw.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

fn describe_row(row: &MySqlRow) -> Result<DescribeRow, sqlx::Error> {
    Ok(DescribeRow::from_columns([
        column_text(row, 0)?,
        column_text(row, 1)?,
        column_text(row, 2)?,
        column_text(row, 3)?,
        column_text(row, 4)?,
        column_text(row, 5)?,
    ]))
}
