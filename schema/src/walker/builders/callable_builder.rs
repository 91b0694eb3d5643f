use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

/// Function-typed members have no wire representation
pub struct CallableBuilder;

impl SchemaBuilder for CallableBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        Err(Error::unsupported(walker.site(), format!("{ty} is a function type")).into())
    }
}
