//! JSON Schema synthesis for tool parameters and return types
//!
//! Given plain-data descriptions of declared types (fields, accessors,
//! generic parameters, supertypes and per-member markers), this crate
//! produces JSON Schema documents describing how values of those types look
//! on the wire, separately for the INPUT (deserialized) and OUTPUT
//! (serialized) direction. Tool descriptors get an input document built from
//! their parameters and an output document built from their return type.
//!
//! # Usage
//!
//! ```no_run
//! use mcp_tool_schema::Direction;
//! use mcp_tool_schema::SchemaAssembler;
//! use mcp_tool_schema::TypeCatalog;
//!
//! # fn main() -> mcp_tool_schema::Result<()> {
//! let catalog = TypeCatalog::from_path("catalog.json")?;
//! let assembler = SchemaAssembler::new(catalog);
//! let schema = assembler.schema_for("List<Widget>", Direction::Output)?;
//! println!("{schema}");
//! # Ok(())
//! # }
//! ```
//!
//! # Shared definitions
//!
//! Classes, records, interfaces, enums and type variables are tracked per
//! request. One referenced from a single site is inlined there; one
//! referenced from several sites, or from itself, is emitted once under
//! `$defs` and pointed at with `$ref`. Definition names are simple type
//! names, with `2`, `3`, ... appended on collision.
//!
//! # Markers
//!
//! - `rename`: externally visible name of a member or enum constant
//! - `exclude`: drops the member in both directions
//! - `description`: copied onto the generated node
//! - `schema`: literal JSON replacing the generated node, or only its description when the
//!   literal holds nothing else

mod assembler;
mod cache;
mod config;
mod constants;
mod descriptor;
mod error;
mod json_schema;
mod member_selector;
mod override_fragment;
mod registry;
mod schema_node;
mod tool_listing;
mod type_utility;
mod walker;

pub use assembler::SchemaAssembler;
pub use config::DuplicatePropertyPolicy;
pub use config::EngineConfig;
pub use config::LiteralRefPolicy;
pub use descriptor::CatalogDocument;
pub use descriptor::ContainerKind;
pub use descriptor::DefinitionKind;
pub use descriptor::EnumConstant;
pub use descriptor::FieldDescriptor;
pub use descriptor::Markers;
pub use descriptor::MethodDescriptor;
pub use descriptor::PrimitiveKind;
pub use descriptor::ToolDescriptor;
pub use descriptor::ToolParameter;
pub use descriptor::TypeCatalog;
pub use descriptor::TypeDefinition;
pub use descriptor::TypeName;
pub use descriptor::TypeParameter;
pub use descriptor::TypeRef;
pub use descriptor::Visibility;
pub use error::Error;
pub use error::Result;
pub use json_schema::JsonSchemaType;
pub use member_selector::Direction;
pub use member_selector::MemberSelector;
pub use member_selector::MemberTable;
pub use member_selector::PropertyDescriptor;
pub use member_selector::PropertyOrigin;
pub use tool_listing::ToolSchemas;
pub use type_utility::MapTypes;
pub use type_utility::TypeUtility;
