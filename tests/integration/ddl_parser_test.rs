use anyhow::{Result, anyhow};
use db2jsonschema::catalog::{BaseType, CanonicalType, TypeMap, UnknownTypeError};
use db2jsonschema::ddl::parser::{ParseError, Parser, TokenType};
use db2jsonschema::ddl::{parse_table_sql, DdlError};

#[path = "../common/mod.rs"]
mod common;
use common::field_summary;

fn parse(sql: &str) -> Result<db2jsonschema::Table> {
    parse_table_sql(sql, TypeMap::sqlite()).map_err(|e| anyhow!("DDL error: {}", e))
}

fn field(name: &str, base: &str, format: Option<&str>) -> (String, String, Option<String>) {
    (name.to_string(), base.to_string(), format.map(str::to_string))
}

#[test]
fn test_simple_table() -> Result<()> {
    let table = parse("CREATE TABLE Example (id int, name varchar(255))")?;

    assert_eq!(table.name(), "Example");
    assert_eq!(
        field_summary(&table),
        vec![field("id", "number", None), field("name", "string", None)]
    );
    assert!(table.primary_keys().is_empty());

    Ok(())
}

#[test]
fn test_backticks_and_primary_key() -> Result<()> {
    let table = parse("CREATE TABLE `Example` (`id` int, `name` varchar(255), PRIMARY KEY (`id`, `name`))")?;

    assert_eq!(table.name(), "Example");
    assert_eq!(table.fields().len(), 2);
    assert_eq!(table.primary_keys(), ["id".to_string(), "name".to_string()]);

    Ok(())
}

#[test]
fn test_modifiers_and_datetime() -> Result<()> {
    let sql = "
CREATE TABLE Example (
  id int NOT_NULL AUTO_INCREMENT,
  name varchar(255),
  created_at datetime
)";
    let table = parse(sql)?;

    assert_eq!(
        field_summary(&table),
        vec![
            field("id", "number", None),
            field("name", "string", None),
            field("created_at", "string", Some("date-time")),
        ]
    );

    Ok(())
}

#[test]
fn test_if_not_exists() -> Result<()> {
    let table = parse(r#"CREATE TABLE IF NOT EXISTS "Example" (id int, name varchar(255))"#)?;
    assert_eq!(table.name(), "Example");
    assert_eq!(table.fields().len(), 2);
    Ok(())
}

#[test]
fn test_unknown_type_produces_no_table() {
    let result = parse_table_sql("CREATE TABLE Example (id int, shape widget)", TypeMap::sqlite());
    assert_eq!(
        result,
        Err(DdlError::UnknownType(UnknownTypeError {
            type_name: "widget".to_string()
        }))
    );
}

#[test]
fn test_table_constraints() -> Result<()> {
    let sql = r#"
CREATE TABLE Example (
  id int NOT_NULL AUTO_INCREMENT,
  name varchar(255),
  user_id integer,
  team_id integer,
  created_at datetime,
  PRIMARY KEY (id),
  FOREIGN KEY("Test") REFERENCES "Test" (id),
  CONSTRAINT fk_user_id FOREIGN KEY (user_id) REFERENCES user(id),
  CONSTRAINT fk_team_id FOREIGN KEY (team_id) REFERENCES team(id),
  CHECK ("isDeleted" IN (0, 1))
)"#;
    let table = parse(sql)?;

    assert_eq!(
        field_summary(&table),
        vec![
            field("id", "number", None),
            field("name", "string", None),
            field("user_id", "number", None),
            field("team_id", "number", None),
            field("created_at", "string", Some("date-time")),
        ]
    );
    assert_eq!(table.primary_keys(), ["id".to_string()]);

    Ok(())
}

#[test]
fn test_sqlalchemy_ddl() -> Result<()> {
    let sql = r#"
CREATE TABLE IF NOT EXISTS "Condition" (
  id INTEGER NOT_NULL,
  kind VARCHAR(255) NOT NULL,
  "conditionType" VARCHAR NOT NULL,
  "WorkflowStepProgressionId" INTEGER,
  "isDeleted" BOOLEAN,
  "deletedAt" DATETIME,
  "createdAt" DATETIME DEFAULT (CURRENT_TIMESTAMP),
  "updatedAt" DATETIME DEFAULT (CURRENT_TIMESTAMP),
  FOREIGN KEY("WorkflowStepProgressionId") REFERENCES "WorkflowStepProgression" (id),
  CONSTRAINT fk_team_id PRIMARY KEY (team_id),
  CONSTRAINT fk_team_id PRIMARY KEY (team_id) REFERENCES team(id),
  CHECK ("isDeleted" IN (0, 1))
)"#;
    let table = parse(sql)?;

    assert_eq!(table.name(), "Condition");
    assert_eq!(table.fields().len(), 8);
    assert_eq!(field_summary(&table)[0], field("id", "number", None));
    assert_eq!(field_summary(&table)[4], field("isDeleted", "boolean", None));
    // Named PRIMARY KEY constraints do not contribute primary keys
    assert!(table.primary_keys().is_empty());

    Ok(())
}

#[test]
fn test_alembic_ddl() -> Result<()> {
    let sql = r#"
CREATE TABLE "WorkflowTemplate" (
  id INTEGER,
  "isDeleted" BOOLEAN,
  "deletedAt" DATETIME,
  CHECK ("isDeleted" IN (0, 1))
)"#;
    let table = parse(sql)?;

    assert_eq!(table.name(), "WorkflowTemplate");
    assert_eq!(
        field_summary(&table),
        vec![
            field("id", "number", None),
            field("isDeleted", "boolean", None),
            field("deletedAt", "string", Some("date-time")),
        ]
    );

    Ok(())
}

#[test]
fn test_parsing_is_deterministic() -> Result<()> {
    let sql = "CREATE TABLE t (a int NOT NULL DEFAULT 0, b text DEFAULT 'x', PRIMARY KEY (a))";
    assert_eq!(parse(sql)?, parse(sql)?);
    Ok(())
}

#[test]
fn test_quoting_invariance() -> Result<()> {
    let bare = parse("CREATE TABLE Example (Name text, PRIMARY KEY (Name))")?;
    let backticks = parse("CREATE TABLE `Example` (`Name` text, PRIMARY KEY (`Name`))")?;
    let double = parse(r#"CREATE TABLE "Example" ("Name" text, PRIMARY KEY ("Name"))"#)?;

    assert_eq!(bare, backticks);
    assert_eq!(bare, double);
    Ok(())
}

#[test]
fn test_quoted_keyword_is_a_name() -> Result<()> {
    let table = parse(r#"CREATE TABLE "table" ("check" int, `key` text)"#)?;
    assert_eq!(table.name(), "table");
    assert_eq!(table.fields()[0].name(), "check");
    assert_eq!(table.fields()[1].name(), "key");
    Ok(())
}

#[test]
fn test_field_order_ignores_clause_positions() -> Result<()> {
    let table = parse("CREATE TABLE t (z int, a text, m bool, PRIMARY KEY (m, z), CHECK (a IN ('x', 'y')))")?;
    let names: Vec<&str> = table.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    assert_eq!(table.primary_keys(), ["m".to_string(), "z".to_string()]);
    Ok(())
}

#[test]
fn test_every_builtin_type_resolves() {
    let types = TypeMap::sqlite();
    for (name, expected) in types.iter() {
        let sql = format!("CREATE TABLE t (c {})", name);
        let table = parse_table_sql(&sql, types).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!(table.fields()[0].field_type(), expected, "type {}", name);
    }
}

#[test]
fn test_custom_type_table() -> Result<()> {
    let types = TypeMap::sqlite()
        .clone()
        .with_type("uuid", CanonicalType::with_format(BaseType::String, "uuid"));
    let table = parse_table_sql("CREATE TABLE t (id uuid)", &types)?;
    assert_eq!(table.fields()[0].field_type().format(), Some("uuid"));

    // The built-in table is untouched
    assert!(parse_table_sql("CREATE TABLE t (id uuid)", TypeMap::sqlite()).is_err());
    Ok(())
}

#[test]
fn test_parse_errors_report_position() {
    let err = Parser::new("CREATE TABLE t (\n  id int,\n)")
        .unwrap()
        .parse_statement()
        .unwrap_err();

    let found = err.found();
    assert_eq!(found.token_type, TokenType::RightParen);
    assert_eq!(found.line, 3);
    assert_eq!(found.column, 1);
    assert!(matches!(err, ParseError::ExpectedToken { .. }));
}

#[test]
fn test_malformed_statements_fail() {
    let bad = [
        "",
        "CREATE TABLE",
        "CREATE TABLE t ()",
        "CREATE TABLE t (id)",
        "CREATE TABLE t (id int",
        "CREATE TABLE t (id int) extra",
        "CREATE TABLE t (PRIMARY KEY (id), id int)",
        "CREATE TABLE t (id int, CHECK (id IN ()))",
        "CREATE TABLE t (id int, CONSTRAINT c CHECK (id))",
        "CREATE VIEW v AS SELECT 1",
    ];
    for sql in bad {
        assert!(parse_table_sql(sql, TypeMap::sqlite()).is_err(), "{:?} should fail", sql);
    }
}
