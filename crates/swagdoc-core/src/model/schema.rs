use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A definition-level schema, or the schema of a response/body parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Propertie>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Propertie>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A field descriptor inside an object schema. Same shape as a leaf
/// [`Schema`], recursive through `items` and `properties`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Propertie {
    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Propertie>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Propertie>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Propertie>>,
}

impl Propertie {
    /// A bare `type` (and optional `format`) with nothing else set.
    pub fn primitive(schema_type: &str, format: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            format: format.to_string(),
            ..Default::default()
        }
    }

    /// An object reference to a named definition.
    pub fn reference(name: &str) -> Self {
        Self {
            ref_path: super::definition_ref(name),
            schema_type: "object".to_string(),
            ..Default::default()
        }
    }

    /// An array whose items are `item`.
    pub fn array_of(item: Propertie) -> Self {
        Self {
            schema_type: "array".to_string(),
            items: Some(Box::new(item)),
            ..Default::default()
        }
    }
}
