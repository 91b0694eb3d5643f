//! Plain-data type descriptors consumed by the schema engine

mod catalog;
mod definition;
mod tool;
mod type_expr;
mod type_name;
mod type_ref;

pub use catalog::CatalogDocument;
pub use catalog::TypeCatalog;
pub use definition::ContainerKind;
pub use definition::DefinitionKind;
pub use definition::EnumConstant;
pub use definition::FieldDescriptor;
pub use definition::Markers;
pub use definition::MethodDescriptor;
pub use definition::TypeDefinition;
pub use definition::TypeParameter;
pub use definition::Visibility;
pub use tool::ToolDescriptor;
pub use tool::ToolParameter;
pub use type_name::TypeName;
pub use type_ref::PrimitiveKind;
pub use type_ref::TypeRef;
