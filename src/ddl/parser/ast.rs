// DDL Abstract Syntax Tree (AST) Implementation
//
// This module defines the AST nodes for a parsed CREATE TABLE statement.
// The tree is short-lived: the model builder consumes it by value.

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub table_name: String,
    pub if_not_exists: bool,
    /// Column declarations in source order
    pub fields: Vec<FieldDeclaration>,
    /// Columns of the table-level PRIMARY KEY clause, empty when absent
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyClause>,
    pub constraints: Vec<NamedConstraint>,
    pub checks: Vec<CheckClause>,
}

/// Column declaration for CREATE TABLE
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_spec: FieldTypeSpec,
    pub modifiers: Vec<FieldModifier>,
}

/// Dialect type name as written, plus the size/precision arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTypeSpec {
    pub name: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldModifier {
    NotNull,
    Default(DefaultValue),
    AutoIncrement,
}

/// Literal or bare word after DEFAULT
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Identifier(String),
    Number(String),
    String(String),
    Null,
}

/// Target of a foreign key
#[derive(Debug, Clone, PartialEq)]
pub struct TableReference {
    pub table: String,
    pub columns: Vec<String>,
}

/// FOREIGN KEY (cols) REFERENCES table (cols)
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyClause {
    pub columns: Vec<String>,
    pub references: TableReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
}

/// CONSTRAINT name {PRIMARY|FOREIGN} KEY (cols) [REFERENCES table (cols)]
#[derive(Debug, Clone, PartialEq)]
pub struct NamedConstraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    pub references: Option<TableReference>,
}

/// CHECK (column IN (values))
#[derive(Debug, Clone, PartialEq)]
pub struct CheckClause {
    pub column: String,
    pub values: Vec<CheckValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckValue {
    Number(String),
    String(String),
}
