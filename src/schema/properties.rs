// Schema Documents
//
// Serializable shapes of the generated documents. Property maps keep field
// declaration order.

use linked_hash_map::LinkedHashMap;
use serde::{Serialize, Deserialize};

use crate::catalog::Table;

/// One column as a JSON Schema property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Property name to property, in field order
pub type PropertiesMap = LinkedHashMap<String, JsonProperty>;

/// Standalone schema for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: PropertiesMap,
}

/// All tables in one document, keyed by table name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionsDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    pub definitions: LinkedHashMap<String, PropertiesMap>,
}

/// A table reduced to its name and properties
#[derive(Debug, Clone, PartialEq)]
pub struct TableProperties {
    pub name: String,
    pub properties: Vec<JsonProperty>,
}

/// Project a table model into properties
pub fn make_table_properties(table: &Table) -> TableProperties {
    let properties = table
        .fields()
        .iter()
        .map(|field| JsonProperty {
            name: field.name().to_string(),
            property_type: field.field_type().base_type().to_string(),
            format: field.field_type().format().map(str::to_string),
        })
        .collect();

    TableProperties {
        name: table.name().to_string(),
        properties,
    }
}

/// Key properties by name. A repeated name keeps the last property.
pub fn make_properties_map(properties: &[JsonProperty]) -> PropertiesMap {
    let mut map = LinkedHashMap::new();
    for property in properties {
        map.insert(property.name.clone(), property.clone());
    }
    map
}
