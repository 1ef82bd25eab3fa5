// DDL Parser Components
//
// This module contains the separate components of the DDL parser.
// Each component handles a specific aspect of parsing.

// Core parser component
pub mod parser_core;
pub mod parser_ddl;

// Re-export frequently used items
pub use parser_core::{Parser, ParseResult, ParseError};
pub use parser_ddl::parse_create_table;
