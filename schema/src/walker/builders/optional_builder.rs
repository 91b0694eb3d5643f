//! Optional wrappers contribute nothing but requiredness

use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct OptionalBuilder;

impl SchemaBuilder for OptionalBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let wrapped = walker.utility().resolve_optional_type(ty)?;
        walker.walk(&wrapped)
    }
}
