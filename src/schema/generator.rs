// Schema Generator
//
// Turns table models into either one definitions document (standard output)
// or one schema file per table (output directory).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use linked_hash_map::LinkedHashMap;
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Table;
use super::format::OutputFormat;
use super::properties::{
    make_properties_map, make_table_properties, DefinitionsDocument, JsonSchema, TableProperties,
};
use super::template::{format_id_template, TemplateError};

pub const DEFAULT_SCHEMA_TYPE: &str = "https://json-schema.org/draft/2020-12/schema";
pub const DEFAULT_ID_TEMPLATE: &str = "{{ .Name }}.{{ .Format }}";
pub const DEFAULT_DEFINITIONS_TITLE: &str = "Definitions";
pub const DEFINITIONS_NAME: &str = "definitions";

/// Generator errors
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Unknown format: {0}")]
    UnknownFormat(String),
    #[error("Invalid $id template: {0}")]
    Template(#[from] TemplateError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Table name {0:?} cannot be used as a file name")]
    InvalidFileName(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// How and where schemas are generated. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorRequest {
    pub format: OutputFormat,
    pub outdir: Option<PathBuf>,
    pub schema_type: Option<String>,
    pub id_template: Option<String>,
    pub title: Option<String>,
}

/// `<name>.<format>`, refusing names that would leave the output directory
pub fn schema_file_name(name: &str, format: OutputFormat) -> GeneratorResult<String> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(GeneratorError::InvalidFileName(name.to_string()));
    }
    Ok(format!("{}.{}", name, format))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl GeneratorRequest {
    pub fn new(format: OutputFormat) -> Self {
        GeneratorRequest {
            format,
            ..Default::default()
        }
    }

    /// `$schema` value of every document
    pub fn schema_type(&self) -> &str {
        non_empty(&self.schema_type).unwrap_or(DEFAULT_SCHEMA_TYPE)
    }

    pub fn id_template(&self) -> &str {
        non_empty(&self.id_template).unwrap_or(DEFAULT_ID_TEMPLATE)
    }

    /// Title of the definitions document
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or(DEFAULT_DEFINITIONS_TITLE)
    }

    /// Output directory, if one was given
    pub fn outdir(&self) -> Option<&Path> {
        self.outdir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Expand the `$id` template for a document name
    pub fn format_id(&self, name: &str) -> GeneratorResult<String> {
        Ok(format_id_template(self.id_template(), name, self.format)?)
    }

    /// One document holding every table, keyed by table name
    pub fn make_definitions_doc(&self, tables: &[TableProperties]) -> GeneratorResult<DefinitionsDocument> {
        let mut definitions = LinkedHashMap::new();
        for table in tables {
            definitions.insert(table.name.clone(), make_properties_map(&table.properties));
        }

        Ok(DefinitionsDocument {
            schema: self.schema_type().to_string(),
            id: self.format_id(DEFINITIONS_NAME)?,
            title: self.title().to_string(),
            definitions,
        })
    }

    /// One object schema per table, in table order
    pub fn make_schemas(&self, tables: &[TableProperties]) -> GeneratorResult<Vec<JsonSchema>> {
        tables
            .iter()
            .map(|table| {
                Ok(JsonSchema {
                    schema: self.schema_type().to_string(),
                    id: self.format_id(&table.name)?,
                    title: table.name.clone(),
                    schema_type: "object".to_string(),
                    properties: make_properties_map(&table.properties),
                })
            })
            .collect()
    }

    pub fn format_schema<T: Serialize>(&self, document: &T) -> GeneratorResult<String> {
        self.format.serialize(document)
    }

    /// Write the definitions document to `out`
    pub fn write_definitions<W: Write>(&self, tables: &[TableProperties], out: &mut W) -> GeneratorResult<()> {
        let doc = self.make_definitions_doc(tables)?;
        out.write_all(self.format_schema(&doc)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write `<table>.<format>` files into `dir`, creating it if needed.
    /// Every name is checked before anything is written. Returns the written
    /// paths in table order.
    pub fn write_directory(&self, tables: &[TableProperties], dir: &Path) -> GeneratorResult<Vec<PathBuf>> {
        let file_names = tables
            .iter()
            .map(|table| schema_file_name(&table.name, self.format))
            .collect::<GeneratorResult<Vec<_>>>()?;
        let schemas = self.make_schemas(tables)?;

        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(tables.len());
        for (schema, file_name) in schemas.iter().zip(file_names) {
            let text = self.format_schema(schema)?;
            let path = dir.join(file_name);
            info!("Writing to {}", path.display());
            fs::write(&path, text)?;
            written.push(path);
        }

        Ok(written)
    }

    /// Generate schemas for `tables`, to the output directory when one is
    /// set and to standard output otherwise
    pub fn perform(&self, tables: &[Table]) -> GeneratorResult<()> {
        let properties: Vec<TableProperties> = tables.iter().map(make_table_properties).collect();
        debug!("Generating {} schemas as {}", properties.len(), self.format);

        match self.outdir() {
            Some(dir) => {
                self.write_directory(&properties, dir)?;
            }
            None => {
                let stdout = io::stdout();
                self.write_definitions(&properties, &mut stdout.lock())?;
            }
        }

        Ok(())
    }
}
