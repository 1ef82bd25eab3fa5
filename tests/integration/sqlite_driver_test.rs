use anyhow::Result;
use db2jsonschema::catalog::{CanonicalType, TypeMap};
use db2jsonschema::driver::{new_connection, ConnectionInfo, Driver, DriverError, SqliteDriver};
use db2jsonschema::ddl::DdlError;

#[path = "../common/mod.rs"]
mod common;
use common::{create_music_db, create_sqlite_fixture, field_summary, MUSIC_TABLES};

#[test]
fn test_read_tables_in_creation_order() -> Result<()> {
    let (_dir, path) = create_music_db()?;
    let driver = SqliteDriver::new(path.to_string_lossy());

    let tables = driver.read_tables()?;
    let names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
    assert_eq!(names, MUSIC_TABLES);

    Ok(())
}

#[test]
fn test_read_table_models() -> Result<()> {
    let (_dir, path) = create_music_db()?;
    let info = ConnectionInfo::new("sqlite3", path.to_string_lossy());
    let tables = new_connection(&info)?.read_tables()?;

    let tracks = tables
        .iter()
        .find(|t| t.name() == "tracks")
        .expect("tracks table");
    let summary = field_summary(tracks);
    assert_eq!(summary.len(), 8);
    assert_eq!(summary[1], ("created_at".to_string(), "string".to_string(), Some("date-time".to_string())));
    assert_eq!(summary[5], ("duration".to_string(), "number".to_string(), None));
    assert_eq!(tracks.primary_keys(), ["id".to_string()]);

    let join = tables
        .iter()
        .find(|t| t.name() == "artist_tracks")
        .expect("artist_tracks table");
    assert_eq!(join.primary_keys(), ["artist_id".to_string(), "track_id".to_string()]);

    Ok(())
}

#[test]
fn test_internal_tables_are_skipped() -> Result<()> {
    // sqlite_sequence outlives the table that needed it; its DDL has no
    // column types and would not parse
    let (_dir, path) = create_sqlite_fixture(&[
        "CREATE TABLE scratch (id integer PRIMARY KEY AUTOINCREMENT)",
        "INSERT INTO scratch DEFAULT VALUES",
        "DROP TABLE scratch",
        "CREATE TABLE counters (id integer, n int)",
        "CREATE INDEX idx_counters_n ON counters(n)",
        "ANALYZE",
    ])?;

    let tables = SqliteDriver::new(path.to_string_lossy()).read_tables()?;
    let names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["counters"]);

    Ok(())
}

#[test]
fn test_empty_database() -> Result<()> {
    let (_dir, path) = create_sqlite_fixture(&[])?;
    let tables = SqliteDriver::new(path.to_string_lossy()).read_tables()?;
    assert!(tables.is_empty());
    Ok(())
}

#[test]
fn test_first_failing_table_is_reported() -> Result<()> {
    let (_dir, path) = create_sqlite_fixture(&[
        "CREATE TABLE good (id int)",
        "CREATE TABLE spatial (id int, shape geometry)",
        "CREATE TABLE later (id int, blob_data blob)",
    ])?;

    let err = SqliteDriver::new(path.to_string_lossy()).read_tables().unwrap_err();
    match err {
        DriverError::Ddl { table, source } => {
            assert_eq!(table, "spatial");
            assert!(matches!(source, DdlError::UnknownType(e) if e.type_name == "geometry"));
        }
        other => panic!("Expected Ddl error, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_type_overrides() -> Result<()> {
    let (_dir, path) = create_sqlite_fixture(&["CREATE TABLE places (id int, shape geometry)"])?;

    let mut info = ConnectionInfo::new("sqlite3", path.to_string_lossy());
    info.type_overrides.insert("geometry".to_string(), CanonicalType::string());
    let tables = new_connection(&info)?.read_tables()?;
    assert_eq!(tables[0].fields()[1].field_type(), &CanonicalType::string());

    let types = TypeMap::sqlite().clone().with_type("geometry", CanonicalType::number());
    let tables = SqliteDriver::with_types(path.to_string_lossy(), types).read_tables()?;
    assert_eq!(tables[0].fields()[1].field_type(), &CanonicalType::number());

    Ok(())
}

#[test]
fn test_database_is_not_modified() -> Result<()> {
    let (_dir, path) = create_music_db()?;
    let before = std::fs::read(&path)?;

    SqliteDriver::new(path.to_string_lossy()).read_tables()?;

    assert_eq!(std::fs::read(&path)?, before);
    Ok(())
}
