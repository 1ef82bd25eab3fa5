// Configuration File
//
// Optional YAML file carrying the same settings as the command-line flags,
// plus type table overrides. Command-line values win over file values.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CanonicalType;

pub const CONFIG_FILE_NAME: &str = ".db2jsonschema.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub driver: Option<String>,
    pub dburl: Option<String>,
    pub format: Option<String>,
    pub outdir: Option<PathBuf>,
    pub schematype: Option<String>,
    pub idtemplate: Option<String>,
    pub title: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Column type name to canonical type, merged over the dialect table
    pub types: HashMap<String, CanonicalType>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as a map
        if text.trim().is_empty() {
            return Ok(FileConfig::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default file in
    /// the home directory if present
    pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(None),
            },
        };
        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }
}

/// `$HOME/.db2jsonschema.yaml`
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}
