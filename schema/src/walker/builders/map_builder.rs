//! Keyed containers
//!
//! Values become `additionalProperties`. Keys must serialize as object keys:
//! strings and characters need nothing more, enum keys add `propertyNames`
//! listing the literals, and unresolved keys (raw maps, type variables) are
//! left unconstrained.

use super::enum_builder::literal_shape;
use crate::descriptor::DefinitionKind;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::json_schema::JsonSchemaType;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct MapBuilder;

impl SchemaBuilder for MapBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let types = walker.utility().resolve_map_types(ty)?;
        let property_names = key_names(walker, &types.key)?;
        let values = walker.walk(&types.value)?;
        Ok(SchemaNode {
            additional_properties: Some(Box::new(values)),
            property_names: property_names.map(Box::new),
            ..SchemaNode::of_type(JsonSchemaType::Object)
        })
    }
}

fn key_names(walker: &TypeGraphWalker<'_>, key: &TypeRef) -> Result<Option<SchemaNode>> {
    match key {
        TypeRef::Primitive(kind) if kind.is_string_like() => Ok(None),
        TypeRef::Variable { .. } | TypeRef::Wildcard { .. } => Ok(None),
        TypeRef::Named { name, .. } => {
            let definition = walker.catalog().require(name)?;
            if definition.kind == DefinitionKind::Enum {
                Ok(Some(literal_shape(definition)))
            } else {
                Err(unsupported_key(walker, key))
            }
        }
        TypeRef::Primitive(_) | TypeRef::Array(_) => Err(unsupported_key(walker, key)),
    }
}

fn unsupported_key(walker: &TypeGraphWalker<'_>, key: &TypeRef) -> error_stack::Report<Error> {
    Error::unsupported(
        walker.site(),
        format!("map key {key} is neither a string nor an enum"),
    )
    .into()
}
