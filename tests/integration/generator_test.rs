use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Result;
use db2jsonschema::driver::{ConnectionInfo, Driver, SqliteDriver};
use db2jsonschema::request::{Request, RequestError};
use db2jsonschema::schema::{
    make_table_properties, DefinitionsDocument, GeneratorError, GeneratorRequest, JsonSchema,
    OutputFormat,
};

#[path = "../common/mod.rs"]
mod common;
use common::{create_music_db, create_sqlite_fixture, MUSIC_TABLES};

fn schema_files(dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        names.insert(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

fn expected_files(tables: &[&str], ext: &str) -> BTreeSet<String> {
    tables.iter().map(|t| format!("{}.{}", t, ext)).collect()
}

fn directory_request(db: &Path, outdir: &Path, format: OutputFormat) -> Request {
    let mut generator = GeneratorRequest::new(format);
    generator.outdir = Some(outdir.to_path_buf());
    Request::new(ConnectionInfo::new("sqlite3", db.to_string_lossy()), generator)
}

#[test]
fn test_json_output() -> Result<()> {
    let (dir, db) = create_music_db()?;
    let outdir = dir.path().join("schemas_json");

    directory_request(&db, &outdir, OutputFormat::Json).perform()?;

    assert_eq!(schema_files(&outdir)?, expected_files(MUSIC_TABLES, "json"));
    for table in MUSIC_TABLES {
        let text = fs::read_to_string(outdir.join(format!("{}.json", table)))?;
        let schema: JsonSchema = serde_json::from_str(&text)?;
        assert_eq!(schema.title, *table);
        assert_eq!(schema.id, format!("{}.json", table));
        assert_eq!(schema.schema_type, "object");
        assert!(!schema.properties.is_empty(), "{} should have properties", table);
    }

    Ok(())
}

#[test]
fn test_yaml_output() -> Result<()> {
    let (dir, db) = create_music_db()?;
    let outdir = dir.path().join("nested").join("schemas_yaml");

    directory_request(&db, &outdir, OutputFormat::Yaml).perform()?;

    assert_eq!(schema_files(&outdir)?, expected_files(MUSIC_TABLES, "yaml"));
    let text = fs::read_to_string(outdir.join("tracks.yaml"))?;
    let schema: JsonSchema = serde_yaml::from_str(&text)?;
    let keys: Vec<&str> = schema.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["id", "created_at", "updated_at", "deleted_at", "title", "duration", "album_id", "genre_id"]
    );
    assert_eq!(schema.properties["deleted_at"].format.as_deref(), Some("date-time"));

    Ok(())
}

#[test]
fn test_filters_and_templates() -> Result<()> {
    let (dir, db) = create_music_db()?;
    let outdir = dir.path().join("filtered");

    let mut request = directory_request(&db, &outdir, OutputFormat::Json);
    request.includes = vec!["tracks".to_string(), "albums".to_string(), "genres".to_string()];
    request.excludes = vec!["genres".to_string()];
    request.generator.id_template = Some("https://example.com/schemas/{{ .Name }}.{{ .Format }}".to_string());
    request.generator.schema_type = Some("http://json-schema.org/draft-07/schema#".to_string());
    request.perform()?;

    assert_eq!(schema_files(&outdir)?, expected_files(&["albums", "tracks"], "json"));
    let schema: JsonSchema = serde_json::from_str(&fs::read_to_string(outdir.join("albums.json"))?)?;
    assert_eq!(schema.id, "https://example.com/schemas/albums.json");
    assert_eq!(schema.schema, "http://json-schema.org/draft-07/schema#");

    Ok(())
}

#[test]
fn test_definitions_document() -> Result<()> {
    let (_dir, db) = create_music_db()?;
    let tables = SqliteDriver::new(db.to_string_lossy()).read_tables()?;
    let properties: Vec<_> = tables.iter().map(make_table_properties).collect();

    let mut generator = GeneratorRequest::new(OutputFormat::Json);
    generator.title = Some("Music".to_string());
    let mut out = Vec::new();
    generator.write_definitions(&properties, &mut out)?;

    let doc: DefinitionsDocument = serde_json::from_slice(&out)?;
    assert_eq!(doc.id, "definitions.json");
    assert_eq!(doc.title, "Music");
    let names: Vec<&str> = doc.definitions.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, MUSIC_TABLES);
    assert_eq!(doc.definitions["artist_tracks"]["track_id"].property_type, "number");

    Ok(())
}

#[test]
fn test_table_names_cannot_escape_outdir() -> Result<()> {
    let (dir, db) = create_sqlite_fixture(&[
        "CREATE TABLE plain (id int)",
        r#"CREATE TABLE "../escaped" (id int)"#,
    ])?;
    let outdir = dir.path().join("out");

    let err = directory_request(&db, &outdir, OutputFormat::Json)
        .perform()
        .unwrap_err();
    assert!(matches!(
        err,
        RequestError::Generator(GeneratorError::InvalidFileName(name)) if name == "../escaped"
    ));
    assert!(!dir.path().join("escaped.json").exists());
    assert!(!outdir.join("plain.json").exists());

    Ok(())
}
