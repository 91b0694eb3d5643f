//! Classes, interfaces and records
//!
//! The body lists the member table's properties for the walker's direction,
//! with declared type parameters replaced by the reference's arguments. Raw
//! references keep their variables and resolve them against the declared
//! bounds instead.
//!
//! A reference that grows an enclosing reference to the same declaration,
//! like `Nest<List<T>>` inside `Nest<T>`, is walked raw. Without that a
//! self-expanding generic would never reach an already-open definition.

use indexmap::IndexMap;
use tracing::debug;

use crate::descriptor::TypeDefinition;
use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::override_fragment::OverrideFragment;
use crate::registry::DefinitionKey;
use crate::registry::Visit;
use crate::schema_node::SchemaNode;
use crate::type_utility::type_bindings;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct ObjectBuilder;

impl SchemaBuilder for ObjectBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        if let Some(raw) = expanding_reference(walker, ty) {
            debug!(type_name = %ty, "Reference expands an open definition, walking it raw");
            return self.build(walker, &raw);
        }
        let visit = walker
            .registry_mut()
            .visit(DefinitionKey::Type(ty.clone()), ty.definition_name());
        if let Visit::Begin(id) = visit {
            let definition = walker.catalog().require_type(ty)?;
            let fragment = OverrideFragment::from_marker(definition.markers.schema.as_deref())?;
            let body = walker.apply_override(
                fragment,
                definition.markers.description.clone(),
                |walker| object_body(walker, definition, ty),
            )?;
            walker.registry_mut().finish(id, body)?;
        }
        Ok(SchemaNode::reference(visit.id()))
    }
}

/// Raw form of `ty` when it is larger than the innermost open reference to its declaration
fn expanding_reference(walker: &TypeGraphWalker<'_>, ty: &TypeRef) -> Option<TypeRef> {
    let (name, args) = ty.as_named()?;
    if args.is_empty() {
        return None;
    }
    let enclosing = walker.registry().visiting_type(name)?;
    (ty.size() > enclosing.size()).then(|| TypeRef::named(name.clone()))
}

fn object_body(
    walker: &mut TypeGraphWalker<'_>,
    definition: &TypeDefinition,
    ty: &TypeRef,
) -> Result<SchemaNode> {
    let arguments = ty.as_named().map_or(&[][..], |(_, args)| args);
    if arguments.is_empty() && !definition.type_parameters.is_empty() {
        debug!(type_name = %definition.name, "Raw generic object, variables resolve to declared bounds");
        return walker.with_scope(&definition.type_parameters, |walker| {
            properties(walker, definition, arguments)
        });
    }
    properties(walker, definition, arguments)
}

fn properties(
    walker: &mut TypeGraphWalker<'_>,
    definition: &TypeDefinition,
    arguments: &[TypeRef],
) -> Result<SchemaNode> {
    let bindings = type_bindings(definition, arguments)?;
    let table = walker.member_table(definition)?;

    let mut properties = IndexMap::new();
    let mut required = Vec::new();
    for property in table.properties(walker.direction()) {
        let ty = property.ty.substitute(&bindings);
        let node = walker.walk_member(
            &property.name,
            &ty,
            property.description.clone(),
            property.schema.as_deref(),
        )?;
        if walker.is_required(&ty)? {
            required.push(property.name.clone());
        }
        properties.insert(property.name.clone(), node);
    }
    Ok(SchemaNode::object(properties, required))
}
