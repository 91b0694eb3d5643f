//! Category of a type reference for schema dispatch

use strum::Display;

use super::SchemaBuilder;
use super::builders::ArrayBuilder;
use super::builders::CallableBuilder;
use super::builders::EnumBuilder;
use super::builders::MapBuilder;
use super::builders::ObjectBuilder;
use super::builders::OptionalBuilder;
use super::builders::PrimitiveBuilder;
use super::builders::TypeVariableBuilder;
use super::builders::WildcardBuilder;
use crate::descriptor::ContainerKind;
use crate::descriptor::DefinitionKind;
use crate::descriptor::PrimitiveKind;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::json_schema::JsonSchemaType;
use crate::type_utility::TypeUtility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TypeKind {
    /// `Object` itself
    Any,
    /// Array dimension
    Array,
    Boolean,
    /// Function-like declarations; never mappable
    Callable,
    /// Anything reaching the single-element container
    Collection,
    Enum,
    /// Anything reaching the keyed container
    Map,
    /// Whole and floating numbers
    Numeric,
    /// Classes, interfaces and records
    Object,
    Optional,
    /// Strings and characters
    String,
    TypeVariable,
    Wildcard,
}

impl TypeKind {
    /// Classify `ty`; named types must be in the catalog
    pub fn classify(ty: &TypeRef, catalog: &TypeCatalog) -> Result<Self> {
        let kind = match ty {
            TypeRef::Primitive(PrimitiveKind::Object) => Self::Any,
            TypeRef::Primitive(kind) => match kind.json_type() {
                JsonSchemaType::Boolean => Self::Boolean,
                JsonSchemaType::String => Self::String,
                JsonSchemaType::Integer | JsonSchemaType::Number => Self::Numeric,
                JsonSchemaType::Array | JsonSchemaType::Object | JsonSchemaType::Null => Self::Any,
            },
            TypeRef::Array(_) => Self::Array,
            TypeRef::Variable { .. } => Self::TypeVariable,
            TypeRef::Wildcard { .. } => Self::Wildcard,
            TypeRef::Named { name, .. } => {
                let definition = catalog.require(name)?;
                if definition.kind == DefinitionKind::Callable {
                    return Ok(Self::Callable);
                }
                match TypeUtility::new(catalog).container_kind(ty)? {
                    Some(ContainerKind::Collection) => Self::Collection,
                    Some(ContainerKind::Map) => Self::Map,
                    Some(ContainerKind::Optional) => Self::Optional,
                    None if definition.kind == DefinitionKind::Enum => Self::Enum,
                    None => Self::Object,
                }
            }
        };
        Ok(kind)
    }

    pub fn builder(self) -> Box<dyn SchemaBuilder> {
        match self {
            Self::Any | Self::Boolean | Self::Numeric | Self::String => Box::new(PrimitiveBuilder),
            Self::Array | Self::Collection => Box::new(ArrayBuilder),
            Self::Callable => Box::new(CallableBuilder),
            Self::Enum => Box::new(EnumBuilder),
            Self::Map => Box::new(MapBuilder),
            Self::Object => Box::new(ObjectBuilder),
            Self::Optional => Box::new(OptionalBuilder),
            Self::TypeVariable => Box::new(TypeVariableBuilder),
            Self::Wildcard => Box::new(WildcardBuilder),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_by_declaration_and_container_role() {
        let catalog = TypeCatalog::from_value(json!({
            "types": [
                { "name": "Color", "kind": "enum", "constants": [{ "name": "RED" }] },
                { "name": "Widget", "kind": "record" },
                { "name": "WidgetList", "superclass": "ArrayList<Widget>" }
            ]
        }))
        .unwrap();

        let cases = [
            ("int", TypeKind::Numeric),
            ("BigDecimal", TypeKind::Numeric),
            ("char", TypeKind::String),
            ("Boolean", TypeKind::Boolean),
            ("Object", TypeKind::Any),
            ("Widget[]", TypeKind::Array),
            ("WidgetList", TypeKind::Collection),
            ("Map<String, Widget>", TypeKind::Map),
            ("Optional<Widget>", TypeKind::Optional),
            ("Color", TypeKind::Enum),
            ("Widget", TypeKind::Object),
            ("$T", TypeKind::TypeVariable),
            ("? extends Widget", TypeKind::Wildcard),
            ("Supplier<Widget>", TypeKind::Callable),
        ];
        for (expression, expected) in cases {
            let ty = TypeRef::parse(expression).unwrap();
            assert_eq!(TypeKind::classify(&ty, &catalog).unwrap(), expected, "{expression}");
        }
    }

    #[test]
    fn unknown_named_type_is_not_registered() {
        let catalog = TypeCatalog::new();
        let ty = TypeRef::named("Missing");

        let error = TypeKind::classify(&ty, &catalog).unwrap_err();

        assert!(matches!(
            error.current_context(),
            crate::error::Error::TypeNotRegistered { .. }
        ));
    }
}
