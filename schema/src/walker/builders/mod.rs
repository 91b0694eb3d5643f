mod array_builder;
mod callable_builder;
mod enum_builder;
mod map_builder;
mod object_builder;
mod optional_builder;
mod primitive_builder;
mod type_variable_builder;
mod wildcard_builder;

pub use array_builder::ArrayBuilder;
pub use callable_builder::CallableBuilder;
pub use enum_builder::EnumBuilder;
pub use map_builder::MapBuilder;
pub use object_builder::ObjectBuilder;
pub use optional_builder::OptionalBuilder;
pub use primitive_builder::PrimitiveBuilder;
pub use type_variable_builder::TypeVariableBuilder;
pub use wildcard_builder::WildcardBuilder;
