//! Tool listing entries as published to clients

use serde::Serialize;
use serde_json::Value;

/// One tool with its generated input and output documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchemas {
    /// Tool name
    pub name:          String,
    /// Tool description, if declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description:   Option<String>,
    /// Object document of the parameters
    pub input_schema:  Value,
    /// Absent for tools returning nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}
