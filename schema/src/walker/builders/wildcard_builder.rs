//! Wildcards take the shape of their upper bounds

use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::json_schema::JsonSchemaType;
use crate::schema_node::SchemaNode;
use crate::walker::SchemaBuilder;
use crate::walker::TypeGraphWalker;

pub struct WildcardBuilder;

impl SchemaBuilder for WildcardBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode> {
        let TypeRef::Wildcard { upper, .. } = ty else {
            return Err(Error::InvalidState(format!(
                "{ty} at {} dispatched as a wildcard",
                walker.site()
            ))
            .into());
        };
        // lower bounds say nothing about the value's shape
        bounded_shape(walker, upper)
    }
}

/// `{type: object}` for no bounds, the bound's shape for one, `allOf` beyond
pub fn bounded_shape(walker: &mut TypeGraphWalker<'_>, bounds: &[TypeRef]) -> Result<SchemaNode> {
    match bounds {
        [] => Ok(SchemaNode::of_type(JsonSchemaType::Object)),
        [bound] => walker.walk(bound),
        _ => {
            let parts = bounds
                .iter()
                .map(|bound| walker.walk(bound))
                .collect::<Result<Vec<_>>>()?;
            Ok(SchemaNode::all_of(parts))
        }
    }
}
