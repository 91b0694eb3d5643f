//! Scalars map straight to their JSON type

use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct PrimitiveBuilder;

impl SchemaBuilder for PrimitiveBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let TypeRef::Primitive(kind) = ty else {
            return Err(Error::InvalidState(format!(
                "{ty} at {} dispatched as a primitive",
                walker.site()
            ))
            .into());
        };
        Ok(SchemaNode::of_type(kind.json_type()))
    }
}
