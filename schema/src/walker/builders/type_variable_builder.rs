//! Type variables
//!
//! One definition per variable name per request, so every occurrence of `T`
//! points at the same entry. Bounds written on the reference win; a bare `$T`
//! takes the bounds declared by the innermost scope that names it.

use tracing::debug;

use super::wildcard_builder::bounded_shape;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::registry::DefinitionKey;
use crate::registry::Visit;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct TypeVariableBuilder;

impl SchemaBuilder for TypeVariableBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let TypeRef::Variable { name, bounds } = ty else {
            return Err(Error::InvalidState(format!(
                "{ty} at {} dispatched as a type variable",
                walker.site()
            ))
            .into());
        };

        let visit = walker
            .registry_mut()
            .visit(DefinitionKey::Variable(name.clone()), name.clone());
        if let Visit::Begin(id) = visit {
            let bounds = if bounds.is_empty() {
                walker
                    .type_parameter(name)
                    .map(|param| param.bounds.clone())
                    .unwrap_or_default()
            } else {
                bounds.clone()
            };
            debug!(variable = %name, bounds = bounds.len(), "Building type variable definition");
            let body = bounded_shape(walker, &bounds)?;
            walker.registry_mut().finish(id, body)?;
        }
        Ok(SchemaNode::reference(visit.id()))
    }
}
