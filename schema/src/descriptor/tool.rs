//! Descriptors for callable operations exposed as tools

use serde::Deserialize;
use serde::Serialize;

use super::definition::Markers;
use super::definition::TypeParameter;
use super::type_ref::TypeRef;

/// One declared parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Declared name; the property name unless renamed
    pub name:    String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty:      TypeRef,
    /// Markers attached to the parameter
    #[serde(flatten)]
    pub markers: Markers,
}

impl ToolParameter {
    /// An unmarked parameter
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: Markers::default(),
        }
    }

    /// Attach a description marker
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.markers.description = Some(description.into());
        self
    }
}

/// A callable operation: ordered parameters and an optional return type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Name published in the tool listing
    pub name:            String,
    /// Listing description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description:     Option<String>,
    /// Generic parameters declared by the operation itself
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters:      Vec<ToolParameter>,
    /// `None` for operations returning nothing
    #[serde(default)]
    pub returns:         Option<TypeRef>,
    /// Markers attached to the return value
    #[serde(default)]
    pub return_markers:  Markers,
}

impl ToolDescriptor {
    /// A tool taking nothing and returning nothing
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:            name.into(),
            description:     None,
            type_parameters: Vec::new(),
            parameters:      Vec::new(),
            returns:         None,
            return_markers:  Markers::default(),
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Declare a generic parameter of the tool itself
    #[must_use]
    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_tool_with_markers() {
        let tool: ToolDescriptor = serde_json::from_value(json!({
            "name": "combineWidgets",
            "parameters": [
                { "name": "widgetA", "type": "CompositeWidget", "description": "the first widget" }
            ],
            "returns": "CompositeWidget",
            "returnMarkers": { "description": "the combined widget" }
        }))
        .unwrap();

        assert_eq!(tool.parameters[0].markers.description.as_deref(), Some("the first widget"));
        assert_eq!(tool.returns, Some(TypeRef::named("CompositeWidget")));
        assert_eq!(
            tool.return_markers.description.as_deref(),
            Some("the combined widget")
        );
    }
}
