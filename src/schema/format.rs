// Output Format
//
// Serialization formats for generated schemas.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::generator::{GeneratorError, GeneratorResult};

/// Serialization format of generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Name used in `$id` templates and as the file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Serialize a document. The output always ends with a newline.
    pub fn serialize<T: Serialize>(&self, document: &T) -> GeneratorResult<String> {
        match self {
            OutputFormat::Json => {
                let mut text = serde_json::to_string_pretty(document)?;
                text.push('\n');
                Ok(text)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(GeneratorError::UnknownFormat(other.to_string())),
        }
    }
}
