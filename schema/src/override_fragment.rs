//! Literal schema overrides attached to members and types

use crate::error::Result;
use crate::schema_node::SchemaNode;

/// Parsed form of a `schema` marker
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideFragment {
    /// `{ "description": ... }` alone; merges onto the generated node
    Description(String),
    /// Any other literal; replaces the generated node
    Replace(SchemaNode),
}

impl OverrideFragment {
    pub fn parse(text: &str) -> Result<Self> {
        let node = SchemaNode::from_literal(text)?;
        if node.is_description_only() {
            return Ok(Self::Description(node.description.unwrap_or_default()));
        }
        Ok(Self::Replace(node))
    }

    /// Parse an optional marker value
    pub fn from_marker(text: Option<&str>) -> Result<Option<Self>> {
        text.map(Self::parse).transpose()
    }
}
