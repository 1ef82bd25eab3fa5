// DDL Parser Module
//
// This module is responsible for parsing CREATE TABLE statements and
// converting them into an abstract syntax tree (AST) representation.

// Re-export public components
pub mod lexer;
pub mod ast;
pub mod components;

// Export key types
pub use self::components::{Parser, ParseResult, ParseError};
pub use self::lexer::{tokenize, Lexer, Token, TokenType, TokenizeError};
pub use self::ast::CreateTableStatement;
