// db2jsonschema
//
// Reads table definitions out of a database catalog and generates JSON
// Schema documents from them.

pub mod catalog;
pub mod config;
pub mod ddl;
pub mod driver;
pub mod request;
pub mod schema;

// Re-export key items for convenient access
pub use catalog::{BaseType, CanonicalType, Field, Table, TypeMap, UnknownTypeError};
pub use config::{ConfigError, FileConfig};
pub use ddl::{parse_table_sql, parse_tables, DdlError};
pub use ddl::parser::Parser;
pub use driver::{new_connection, ConnectionInfo, Driver, DriverError, MysqlDriver, SqliteDriver};
pub use request::{Request, RequestError};
pub use schema::{GeneratorError, GeneratorRequest, OutputFormat};
