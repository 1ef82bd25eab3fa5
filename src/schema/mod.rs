//! Schema Generation Module
//!
//! Projects table models into JSON Schema documents and serializes them as
//! JSON or YAML, either as one definitions document or one file per table.

pub mod format;
pub mod properties;
pub mod template;
pub mod generator;

pub use self::format::OutputFormat;
pub use self::properties::{
    make_properties_map, make_table_properties, DefinitionsDocument, JsonProperty, JsonSchema,
    PropertiesMap, TableProperties,
};
pub use self::template::{format_id_template, TemplateError};
pub use self::generator::{GeneratorError, GeneratorRequest, GeneratorResult};
