// DDL Statement Parser Implementation
//
// This module implements the CREATE TABLE grammar, one function per rule:
//
//   CreateTable := CREATE TABLE [IF NOT EXISTS] Ident "(" ColumnList ")"
//   ColumnList  := FieldDecl ("," FieldDecl)* PrimaryKey* ForeignKey* Constraint* Check*
//   FieldDecl   := Ident Ident ["(" Number ["," Number] ")"] Modifier*
//   Modifier    := NOT NULL | NOT_NULL | DEFAULT DefaultExpr | AUTO_INCREMENT
//   Constraint  := CONSTRAINT Ident (PRIMARY|FOREIGN) KEY "(" IdentList ")" [REFERENCES TableRef]
//   Check       := CHECK "(" Ident IN "(" Value ("," Value)* ")" ")"
//
// The table-level clauses must follow the field declarations in that order.

use log::debug;

use crate::ddl::parser::ast::*;
use crate::ddl::parser::lexer::TokenType;
use super::parser_core::{Parser, ParseResult, ParseError};

/// Which part of the column list the parser has reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ClauseGroup {
    Fields,
    PrimaryKey,
    ForeignKeys,
    Constraints,
    Checks,
}

impl Parser {
    /// Parse a complete CREATE TABLE statement; trailing input is an error
    pub fn parse_statement(&mut self) -> ParseResult<CreateTableStatement> {
        let statement = parse_create_table(self)?;
        self.expect_end()?;
        Ok(statement)
    }
}

/// Parse a CREATE TABLE statement
pub fn parse_create_table(parser: &mut Parser) -> ParseResult<CreateTableStatement> {
    parser.expect_token(TokenType::CREATE)?;
    parser.expect_token(TokenType::TABLE)?;

    let if_not_exists = if parser.consume_if(&TokenType::IF) {
        parser.expect_token(TokenType::NOT)?;
        parser.expect_token(TokenType::EXISTS)?;
        true
    } else {
        false
    };

    let table_name = parser.parse_identifier()?;

    parser.expect_token(TokenType::LeftParen)?;

    let mut statement = CreateTableStatement {
        table_name,
        if_not_exists,
        fields: Vec::new(),
        primary_key: Vec::new(),
        foreign_keys: Vec::new(),
        constraints: Vec::new(),
        checks: Vec::new(),
    };
    parse_column_list(parser, &mut statement)?;

    parser.expect_token(TokenType::RightParen)?;

    debug!(
        "Parsed CREATE TABLE {} ({} fields, {} constraints, {} checks)",
        statement.table_name,
        statement.fields.len(),
        statement.constraints.len(),
        statement.checks.len()
    );

    Ok(statement)
}

/// Parse the comma separated body of CREATE TABLE, up to the closing paren
fn parse_column_list(parser: &mut Parser, statement: &mut CreateTableStatement) -> ParseResult<()> {
    statement.fields.push(parse_field_declaration(parser)?);
    let mut group = ClauseGroup::Fields;

    while parser.consume_if(&TokenType::COMMA) {
        let next_group = match parser.current_token.token_type {
            TokenType::IDENTIFIER(_) => ClauseGroup::Fields,
            TokenType::PRIMARY => ClauseGroup::PrimaryKey,
            TokenType::FOREIGN => ClauseGroup::ForeignKeys,
            TokenType::CONSTRAINT => ClauseGroup::Constraints,
            TokenType::CHECK => ClauseGroup::Checks,
            _ => {
                return Err(parser.expected(vec![
                    TokenType::IDENTIFIER(String::new()),
                    TokenType::PRIMARY,
                    TokenType::FOREIGN,
                    TokenType::CONSTRAINT,
                    TokenType::CHECK,
                ]));
            }
        };

        if next_group < group {
            return Err(ParseError::UnexpectedToken(parser.current_token.clone()));
        }
        group = next_group;

        match group {
            ClauseGroup::Fields => statement.fields.push(parse_field_declaration(parser)?),
            ClauseGroup::PrimaryKey => statement.primary_key.extend(parse_primary_key(parser)?),
            ClauseGroup::ForeignKeys => statement.foreign_keys.push(parse_foreign_key(parser)?),
            ClauseGroup::Constraints => statement.constraints.push(parse_constraint(parser)?),
            ClauseGroup::Checks => statement.checks.push(parse_check(parser)?),
        }
    }

    if !parser.current_token_is(&TokenType::RightParen) {
        return Err(parser.expected(vec![TokenType::COMMA, TokenType::RightParen]));
    }

    Ok(())
}

/// Parse a single column declaration: name, type, modifiers
fn parse_field_declaration(parser: &mut Parser) -> ParseResult<FieldDeclaration> {
    // Name and type are told apart by position only
    let name = parser.parse_identifier()?;
    let type_spec = parse_field_type(parser)?;
    let modifiers = parse_field_modifiers(parser)?;

    Ok(FieldDeclaration {
        name,
        type_spec,
        modifiers,
    })
}

/// Parse a type name with its optional (size) or (precision, scale)
fn parse_field_type(parser: &mut Parser) -> ParseResult<FieldTypeSpec> {
    let name = parser.parse_identifier()?;
    let mut arguments = Vec::new();

    if parser.consume_if(&TokenType::LeftParen) {
        arguments.push(parser.parse_number()?);
        if parser.consume_if(&TokenType::COMMA) {
            arguments.push(parser.parse_number()?);
        }
        parser.expect_token(TokenType::RightParen)?;
    }

    Ok(FieldTypeSpec { name, arguments })
}

/// Parse column modifiers; any order, repeats allowed
fn parse_field_modifiers(parser: &mut Parser) -> ParseResult<Vec<FieldModifier>> {
    let mut modifiers = Vec::new();

    loop {
        match parser.current_token.token_type {
            TokenType::NOT => {
                parser.next_token();
                parser.expect_token(TokenType::NULL)?;
                modifiers.push(FieldModifier::NotNull);
            }
            TokenType::NotNull => {
                parser.next_token();
                modifiers.push(FieldModifier::NotNull);
            }
            TokenType::DEFAULT => {
                parser.next_token();
                modifiers.push(FieldModifier::Default(parse_default_expression(parser)?));
            }
            TokenType::AutoIncrement => {
                parser.next_token();
                modifiers.push(FieldModifier::AutoIncrement);
            }
            _ => break,
        }
    }

    Ok(modifiers)
}

/// DEFAULT value, bare or wrapped in parentheses
fn parse_default_expression(parser: &mut Parser) -> ParseResult<DefaultValue> {
    if parser.consume_if(&TokenType::LeftParen) {
        let value = parse_default_value(parser)?;
        parser.expect_token(TokenType::RightParen)?;
        Ok(value)
    } else {
        parse_default_value(parser)
    }
}

fn parse_default_value(parser: &mut Parser) -> ParseResult<DefaultValue> {
    let value = match &parser.current_token.token_type {
        TokenType::IDENTIFIER(name) => DefaultValue::Identifier(name.clone()),
        TokenType::NUMBER(text) => DefaultValue::Number(text.clone()),
        TokenType::STRING(text) => DefaultValue::String(text.clone()),
        TokenType::NULL => DefaultValue::Null,
        _ => {
            return Err(parser.expected(vec![
                TokenType::IDENTIFIER(String::new()),
                TokenType::NUMBER(String::new()),
                TokenType::STRING(String::new()),
                TokenType::NULL,
            ]));
        }
    };
    parser.next_token();
    Ok(value)
}

/// PRIMARY KEY (col, ...)
fn parse_primary_key(parser: &mut Parser) -> ParseResult<Vec<String>> {
    parser.expect_token(TokenType::PRIMARY)?;
    parser.expect_token(TokenType::KEY)?;
    parse_identifier_list(parser)
}

/// FOREIGN KEY (col, ...) REFERENCES table (col, ...)
fn parse_foreign_key(parser: &mut Parser) -> ParseResult<ForeignKeyClause> {
    parser.expect_token(TokenType::FOREIGN)?;
    parser.expect_token(TokenType::KEY)?;
    let columns = parse_identifier_list(parser)?;
    parser.expect_token(TokenType::REFERENCES)?;
    let references = parse_table_reference(parser)?;

    Ok(ForeignKeyClause { columns, references })
}

/// CONSTRAINT name {PRIMARY|FOREIGN} KEY (col, ...) [REFERENCES table (col, ...)]
fn parse_constraint(parser: &mut Parser) -> ParseResult<NamedConstraint> {
    parser.expect_token(TokenType::CONSTRAINT)?;
    let name = parser.parse_identifier()?;

    let kind = match parser.current_token.token_type {
        TokenType::PRIMARY => ConstraintKind::PrimaryKey,
        TokenType::FOREIGN => ConstraintKind::ForeignKey,
        _ => return Err(parser.expected(vec![TokenType::PRIMARY, TokenType::FOREIGN])),
    };
    parser.next_token();
    parser.expect_token(TokenType::KEY)?;

    let columns = parse_identifier_list(parser)?;
    let references = if parser.consume_if(&TokenType::REFERENCES) {
        Some(parse_table_reference(parser)?)
    } else {
        None
    };

    Ok(NamedConstraint {
        name,
        kind,
        columns,
        references,
    })
}

/// CHECK (col IN (value, ...))
fn parse_check(parser: &mut Parser) -> ParseResult<CheckClause> {
    parser.expect_token(TokenType::CHECK)?;
    parser.expect_token(TokenType::LeftParen)?;
    let column = parser.parse_identifier()?;
    parser.expect_token(TokenType::IN)?;
    parser.expect_token(TokenType::LeftParen)?;

    let mut values = vec![parse_check_value(parser)?];
    while parser.consume_if(&TokenType::COMMA) {
        values.push(parse_check_value(parser)?);
    }

    parser.expect_token(TokenType::RightParen)?;
    parser.expect_token(TokenType::RightParen)?;

    Ok(CheckClause { column, values })
}

fn parse_check_value(parser: &mut Parser) -> ParseResult<CheckValue> {
    let value = match &parser.current_token.token_type {
        TokenType::NUMBER(text) => CheckValue::Number(text.clone()),
        TokenType::STRING(text) => CheckValue::String(text.clone()),
        _ => {
            return Err(parser.expected(vec![
                TokenType::NUMBER(String::new()),
                TokenType::STRING(String::new()),
            ]));
        }
    };
    parser.next_token();
    Ok(value)
}

/// table (col, ...)
fn parse_table_reference(parser: &mut Parser) -> ParseResult<TableReference> {
    let table = parser.parse_identifier()?;
    let columns = parse_identifier_list(parser)?;
    Ok(TableReference { table, columns })
}

/// (ident, ...)
fn parse_identifier_list(parser: &mut Parser) -> ParseResult<Vec<String>> {
    parser.expect_token(TokenType::LeftParen)?;

    let mut identifiers = vec![parser.parse_identifier()?];
    while parser.consume_if(&TokenType::COMMA) {
        identifiers.push(parser.parse_identifier()?);
    }

    parser.expect_token(TokenType::RightParen)?;
    Ok(identifiers)
}
