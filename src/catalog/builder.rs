// Table Model Builder
//
// Turns a parsed CREATE TABLE statement into a Table model. Only field names,
// resolved types and the PRIMARY KEY clause survive; foreign keys, named
// constraints and checks are dropped here.

use log::debug;

use crate::ddl::parser::ast::CreateTableStatement;
use super::field::Field;
use super::table::Table;
use super::type_map::{TypeMap, UnknownTypeError};

/// Build a table model, stopping at the first type that does not resolve
pub fn build_table(statement: CreateTableStatement, types: &TypeMap) -> Result<Table, UnknownTypeError> {
    let mut fields = Vec::with_capacity(statement.fields.len());

    for declaration in statement.fields {
        let field_type = types.resolve(&declaration.type_spec.name)?;
        fields.push(Field::new(declaration.name, field_type));
    }

    debug!(
        "Built model for table {} with {} fields using {} types",
        statement.table_name,
        fields.len(),
        types.dialect()
    );

    Ok(Table::new(statement.table_name, fields, statement.primary_key))
}
