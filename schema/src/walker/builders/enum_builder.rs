//! Enums become string enums of their visible literal names

use crate::descriptor::TypeDefinition;
use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::override_fragment::OverrideFragment;
use crate::registry::DefinitionKey;
use crate::registry::Visit;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct EnumBuilder;

impl SchemaBuilder for EnumBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let visit = walker
            .registry_mut()
            .visit(DefinitionKey::Type(ty.clone()), ty.definition_name());
        if let Visit::Begin(id) = visit {
            let definition = walker.catalog().require_type(ty)?;
            let fragment = OverrideFragment::from_marker(definition.markers.schema.as_deref())?;
            let body = walker.apply_override(
                fragment,
                definition.markers.description.clone(),
                |_| Ok(literal_shape(definition)),
            )?;
            walker.registry_mut().finish(id, body)?;
        }
        Ok(SchemaNode::reference(visit.id()))
    }
}

/// `{ "type": "string", "enum": [...] }` in declaration order, renames applied
pub fn literal_shape(definition: &TypeDefinition) -> SchemaNode {
    SchemaNode::string_enum(
        definition
            .constants
            .iter()
            .filter(|constant| !constant.markers.exclude)
            .map(|constant| constant.visible_name().to_string()),
    )
}
