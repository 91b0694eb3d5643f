//! Schema tree to JSON
//!
//! Definitions referenced once are inlined at their only use site; shared
//! ones are emitted once under `$defs` in registration order and referenced
//! by pointer everywhere else.

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;
use crate::json_schema::SchemaField;
use crate::json_schema::defs_pointer;
use crate::registry::DefinitionId;
use crate::registry::DefinitionRegistry;
use crate::schema_node::SchemaNode;
use crate::schema_node::SchemaRef;

pub struct Renderer<'r> {
    registry: &'r DefinitionRegistry,
    names:    HashMap<DefinitionId, String>,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r DefinitionRegistry) -> Self {
        Self {
            registry,
            names: registry.names(),
        }
    }

    /// `root` followed by `$defs` when anything is shared
    pub fn document(&self, root: &SchemaNode) -> Result<Value> {
        let mut document = self.render(root)?;
        let definitions = self.definitions()?;
        if !definitions.is_empty() {
            document.insert(SchemaField::Defs.into(), Value::Object(definitions));
        }
        Ok(Value::Object(document))
    }

    fn definitions(&self) -> Result<Map<String, Value>> {
        let mut definitions = Map::new();
        for id in self.registry.shared() {
            let body = self.render(self.body(id)?)?;
            definitions.insert(self.name(id)?.to_string(), Value::Object(body));
        }
        Ok(definitions)
    }

    fn render(&self, node: &SchemaNode) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        let mut description = node.description.as_ref();

        match &node.reference {
            Some(SchemaRef::Definition { id, path: None }) if !self.registry.is_shared(*id) => {
                let mut inlined = self.render(self.body(*id)?)?;
                if let Some(description) = description {
                    inlined.insert(SchemaField::Description.into(), description.clone().into());
                }
                return Ok(inlined);
            }
            Some(SchemaRef::Definition { id, path }) => {
                let mut pointer = defs_pointer(self.name(*id)?);
                if let Some(path) = path {
                    pointer.push('/');
                    pointer.push_str(path);
                }
                map.insert(SchemaField::Ref.into(), Value::String(pointer));
                // the definition already says it
                if description.is_some() && description == self.body(*id)?.description.as_ref() {
                    description = None;
                }
            }
            Some(SchemaRef::Pointer(pointer)) => {
                map.insert(SchemaField::Ref.into(), Value::String(pointer.clone()));
            }
            None => {}
        }

        if let Some(schema_type) = node.schema_type {
            map.insert(SchemaField::Type.into(), schema_type.into());
        }
        if let Some(description) = description {
            map.insert(SchemaField::Description.into(), description.clone().into());
        }
        if let Some(literals) = &node.enum_values {
            map.insert(SchemaField::Enum.into(), Value::Array(literals.clone()));
        }
        if let Some(items) = &node.items {
            map.insert(SchemaField::Items.into(), Value::Object(self.render(items)?));
        }
        if let Some(properties) = &node.properties {
            let mut rendered = Map::new();
            for (name, property) in properties {
                rendered.insert(name.clone(), Value::Object(self.render(property)?));
            }
            map.insert(SchemaField::Properties.into(), Value::Object(rendered));
        }
        if let Some(required) = node.required.as_ref().filter(|names| !names.is_empty()) {
            map.insert(
                SchemaField::Required.into(),
                Value::Array(required.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(values) = &node.additional_properties {
            map.insert(
                SchemaField::AdditionalProperties.into(),
                Value::Object(self.render(values)?),
            );
        }
        if let Some(keys) = &node.property_names {
            map.insert(SchemaField::PropertyNames.into(), Value::Object(self.render(keys)?));
        }
        if let Some(parts) = &node.all_of {
            let parts = parts
                .iter()
                .map(|part| self.render(part).map(Value::Object))
                .collect::<Result<Vec<_>>>()?;
            map.insert(SchemaField::AllOf.into(), Value::Array(parts));
        }
        for (key, value) in &node.extra {
            map.insert(key.clone(), value.clone());
        }
        Ok(map)
    }

    fn body(&self, id: DefinitionId) -> Result<&'r SchemaNode> {
        self.registry.body(id).ok_or_else(|| {
            Error::InvalidState(format!(
                "definition {} was referenced but never finished",
                self.registry.base_name(id)
            ))
            .into()
        })
    }

    fn name(&self, id: DefinitionId) -> Result<&str> {
        self.names.get(&id).map(String::as_str).ok_or_else(|| {
            Error::InvalidState(format!(
                "definition {} is referenced by pointer but not shared",
                self.registry.base_name(id)
            ))
            .into()
        })
    }
}
