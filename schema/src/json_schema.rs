//! JSON schema vocabulary used in generated documents
//!
//! Keyword and type names live here so that the renderer and the override
//! parser agree on spelling.

use serde::Serialize;
use serde_json::Value;
use strum::AsRefStr;
use strum::Display;
use strum::EnumString;

/// JSON schema type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaType {
    /// Records, classes and maps
    Object,
    /// Collections and arrays
    Array,
    /// Text, characters and enum literals
    String,
    /// Floating point and arbitrary precision numbers
    Number,
    /// Fixed width integers
    Integer,
    /// `true` or `false`
    Boolean,
    /// Only in override literals
    Null,
}

impl From<JsonSchemaType> for Value {
    fn from(schema_type: JsonSchemaType) -> Self { Self::String(schema_type.as_ref().to_string()) }
}

/// Schema keywords understood by the generator
///
/// Anything else found in an override literal is passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SchemaField {
    /// Value schema for map entries
    AdditionalProperties,
    /// Conjunction of bound shapes
    AllOf,
    /// Shared definitions table
    #[strum(serialize = "$defs")]
    Defs,
    Description,
    /// Literal values of an enum
    Enum,
    /// Element schema for arrays
    Items,
    Properties,
    /// Key schema for maps keyed by an enum
    PropertyNames,
    /// Pointer into the shared definitions table
    #[strum(serialize = "$ref")]
    Ref,
    Required,
    Type,
}

impl From<SchemaField> for String {
    fn from(field: SchemaField) -> Self { field.as_ref().to_string() }
}

/// Prefix of every pointer into the shared definitions table
pub const DEFS_POINTER_PREFIX: &str = "#/$defs/";

/// Build the pointer text for a definition name
pub fn defs_pointer(name: &str) -> String { format!("{DEFS_POINTER_PREFIX}{name}") }
