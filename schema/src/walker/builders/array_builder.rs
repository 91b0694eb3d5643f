//! Arrays and single-element containers
//!
//! Each array dimension adds one `{ "type": "array" }` layer. Containers are
//! resolved to their element type through their supertypes first, so a
//! `NumberSet extends HashSet<Number>` is an array of numbers.

use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct ArrayBuilder;

impl SchemaBuilder for ArrayBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let element = match ty {
            TypeRef::Array(element) => element.as_ref().clone(),
            _ => walker.utility().resolve_container_element_type(ty)?,
        };
        Ok(SchemaNode::array(walker.walk(&element)?))
    }
}
