// Schema Type Module
//
// This module defines the small vocabulary of schema-level types that every
// dialect column type is mapped into.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// JSON Schema primitive a column projects to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Number,
    String,
    Boolean,
}

impl BaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Number => "number",
            BaseType::String => "string",
            BaseType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(BaseType::Number),
            "string" => Ok(BaseType::String),
            "boolean" => Ok(BaseType::Boolean),
            _ => Err(format!("Unknown base type: {}", s)),
        }
    }
}

/// A resolved column type: base type plus an optional format refinement
/// such as `date-time`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalType {
    #[serde(rename = "type")]
    base_type: BaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

impl CanonicalType {
    pub fn new(base_type: BaseType) -> Self {
        CanonicalType {
            base_type,
            format: None,
        }
    }

    pub fn with_format(base_type: BaseType, format: impl Into<String>) -> Self {
        CanonicalType {
            base_type,
            format: Some(format.into()),
        }
    }

    pub fn number() -> Self {
        Self::new(BaseType::Number)
    }

    pub fn string() -> Self {
        Self::new(BaseType::String)
    }

    pub fn boolean() -> Self {
        Self::new(BaseType::Boolean)
    }

    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.format {
            Some(format) => write!(f, "{} ({})", self.base_type, format),
            None => write!(f, "{}", self.base_type),
        }
    }
}
