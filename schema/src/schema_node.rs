//! In-memory schema tree
//!
//! `SchemaNode` holds the subset of JSON Schema the generator produces.
//! Literal override text is parsed into the same tree; keywords outside that
//! subset are carried verbatim in `extra`.

use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;
use crate::json_schema::JsonSchemaType;
use crate::json_schema::SchemaField;
use crate::registry::DefinitionId;

/// Target of a `$ref`
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRef {
    /// A registered definition, optionally followed by a pointer path inside it
    Definition {
        id:   DefinitionId,
        path: Option<String>,
    },
    /// Pointer text not (yet) tied to a definition
    Pointer(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub schema_type:           Option<JsonSchemaType>,
    pub description:           Option<String>,
    pub properties:            Option<IndexMap<String, Self>>,
    pub required:              Option<Vec<String>>,
    pub items:                 Option<Box<Self>>,
    pub enum_values:           Option<Vec<Value>>,
    pub additional_properties: Option<Box<Self>>,
    pub property_names:        Option<Box<Self>>,
    pub all_of:                Option<Vec<Self>>,
    pub reference:             Option<SchemaRef>,
    /// Keywords from literal overrides the generator does not interpret
    pub extra:                 Map<String, Value>,
}

impl SchemaNode {
    pub fn of_type(schema_type: JsonSchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// `{ "$ref": ... }` to a registered definition
    pub fn reference(id: DefinitionId) -> Self {
        Self {
            reference: Some(SchemaRef::Definition { id, path: None }),
            ..Self::default()
        }
    }

    pub fn array(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(JsonSchemaType::Array)
        }
    }

    pub fn object(properties: IndexMap<String, Self>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required: Some(required),
            ..Self::of_type(JsonSchemaType::Object)
        }
    }

    /// `{ "type": "string", "enum": [...] }`
    pub fn string_enum(literals: impl IntoIterator<Item = String>) -> Self {
        Self {
            enum_values: Some(literals.into_iter().map(Value::String).collect()),
            ..Self::of_type(JsonSchemaType::String)
        }
    }

    pub fn all_of(parts: Vec<Self>) -> Self {
        Self {
            all_of: Some(parts),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        if description.is_some() {
            self.description = description;
        }
        self
    }

    /// The registered definition this node points at
    pub const fn definition(&self) -> Option<DefinitionId> {
        match &self.reference {
            Some(SchemaRef::Definition { id, path: None }) => Some(*id),
            _ => None,
        }
    }

    /// True when nothing but a description is set
    pub fn is_description_only(&self) -> bool {
        self.description.is_some()
            && Self {
                description: None,
                ..self.clone()
            } == Self::default()
    }

    /// Parse literal override text
    pub fn from_literal(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::invalid("schema override literal", format!("{e}: {text}")))?;
        Self::from_literal_value(&value)
    }

    /// Parse a literal override already in JSON form
    pub fn from_literal_value(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(literal_error("a JSON object", value));
        };
        let mut node = Self::default();
        for (key, value) in object {
            let Ok(field) = SchemaField::from_str(key) else {
                node.extra.insert(key.clone(), value.clone());
                continue;
            };
            match field {
                SchemaField::Type => match value.as_str().map(JsonSchemaType::from_str) {
                    Some(Ok(schema_type)) => node.schema_type = Some(schema_type),
                    _ => {
                        node.extra.insert(key.clone(), value.clone());
                    }
                },
                SchemaField::Description => {
                    node.description = Some(string_value(field, value)?);
                }
                SchemaField::Ref => {
                    node.reference = Some(SchemaRef::Pointer(string_value(field, value)?));
                }
                SchemaField::Required => {
                    let names = value
                        .as_array()
                        .and_then(|names| {
                            names
                                .iter()
                                .map(|name| name.as_str().map(ToString::to_string))
                                .collect::<Option<Vec<_>>>()
                        })
                        .ok_or_else(|| literal_error("'required' as an array of strings", value))?;
                    node.required = Some(names);
                }
                SchemaField::Enum => {
                    let literals = value
                        .as_array()
                        .ok_or_else(|| literal_error("'enum' as an array", value))?;
                    node.enum_values = Some(literals.clone());
                }
                SchemaField::Properties => {
                    let properties = value
                        .as_object()
                        .ok_or_else(|| literal_error("'properties' as an object", value))?;
                    let mut parsed = IndexMap::with_capacity(properties.len());
                    for (name, property) in properties {
                        parsed.insert(name.clone(), Self::from_literal_value(property)?);
                    }
                    node.properties = Some(parsed);
                }
                SchemaField::AllOf => {
                    let parts = value
                        .as_array()
                        .ok_or_else(|| literal_error("'allOf' as an array", value))?;
                    node.all_of = Some(
                        parts
                            .iter()
                            .map(Self::from_literal_value)
                            .collect::<Result<_>>()?,
                    );
                }
                // boolean and tuple forms pass through untouched
                SchemaField::Items
                | SchemaField::AdditionalProperties
                | SchemaField::PropertyNames
                    if !value.is_object() =>
                {
                    node.extra.insert(key.clone(), value.clone());
                }
                SchemaField::Items => node.items = Some(Box::new(Self::from_literal_value(value)?)),
                SchemaField::AdditionalProperties => {
                    node.additional_properties = Some(Box::new(Self::from_literal_value(value)?));
                }
                SchemaField::PropertyNames => {
                    node.property_names = Some(Box::new(Self::from_literal_value(value)?));
                }
                SchemaField::Defs => {
                    return Err(Error::invalid(
                        "schema override literal",
                        "'$defs' is reserved for generated definitions",
                    )
                    .into());
                }
            }
        }
        Ok(node)
    }

    /// Every unresolved pointer in this subtree
    pub fn pointers_mut(&mut self) -> Vec<&mut SchemaRef> {
        let mut found = Vec::new();
        self.collect_pointers(&mut found);
        found
    }

    fn collect_pointers<'a>(&'a mut self, found: &mut Vec<&'a mut SchemaRef>) {
        let Self {
            reference,
            properties,
            items,
            additional_properties,
            property_names,
            all_of,
            ..
        } = self;
        if let Some(pointer @ SchemaRef::Pointer(_)) = reference.as_mut() {
            found.push(pointer);
        }
        if let Some(properties) = properties {
            for child in properties.values_mut() {
                child.collect_pointers(found);
            }
        }
        for child in [items, additional_properties, property_names] {
            if let Some(child) = child {
                child.collect_pointers(found);
            }
        }
        if let Some(parts) = all_of {
            for child in parts {
                child.collect_pointers(found);
            }
        }
    }
}

fn string_value(field: SchemaField, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| literal_error(&format!("'{field}' as a string"), value))
}

fn literal_error(expected: &str, found: &Value) -> error_stack::Report<Error> {
    Error::invalid("schema override literal", format!("expected {expected}, found {found}")).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_known_keywords_into_tree() {
        let node = SchemaNode::from_literal(
            r##"{
                "type": "object",
                "properties": {
                    "friend": { "$ref": "#/$defs/person", "description": "a friend" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["friend"],
                "minProperties": 1
            }"##,
        )
        .unwrap();

        assert_eq!(node.schema_type, Some(JsonSchemaType::Object));
        let properties = node.properties.as_ref().unwrap();
        assert_eq!(
            properties["friend"].reference,
            Some(SchemaRef::Pointer("#/$defs/person".to_string()))
        );
        assert_eq!(
            properties["tags"].items.as_deref(),
            Some(&SchemaNode::of_type(JsonSchemaType::String))
        );
        assert_eq!(node.required, Some(vec!["friend".to_string()]));
        assert_eq!(node.extra.get("minProperties"), Some(&json!(1)));
    }

    #[test]
    fn non_object_subschemas_pass_through() {
        let node = SchemaNode::from_literal_value(&json!({
            "type": ["string", "null"],
            "additionalProperties": false
        }))
        .unwrap();

        assert_eq!(node.schema_type, None);
        assert_eq!(node.extra.get("type"), Some(&json!(["string", "null"])));
        assert_eq!(node.extra.get("additionalProperties"), Some(&json!(false)));
    }

    #[test]
    fn malformed_literals_are_configuration_errors() {
        for text in [
            "{ not json",
            "[1, 2]",
            r#"{ "required": "name" }"#,
            r#"{ "description": 3 }"#,
            r#"{ "properties": [] }"#,
            r#"{ "$defs": {} }"#,
        ] {
            let error = SchemaNode::from_literal(text).unwrap_err();
            assert!(error.current_context().is_configuration(), "{text}");
        }
    }

    #[test]
    fn description_only_detection() {
        let node = SchemaNode::from_literal(r#"{ "description": "just words" }"#).unwrap();
        assert!(node.is_description_only());

        let node = SchemaNode::from_literal(r#"{ "description": "w", "type": "string" }"#).unwrap();
        assert!(!node.is_description_only());
    }

    #[test]
    fn collects_nested_pointers() {
        let mut node = SchemaNode::from_literal_value(&json!({
            "allOf": [{ "$ref": "#/$defs/A" }, { "items": { "$ref": "#/$defs/B" } }]
        }))
        .unwrap();

        let pointers = node.pointers_mut();

        assert_eq!(pointers.len(), 2);
    }
}
