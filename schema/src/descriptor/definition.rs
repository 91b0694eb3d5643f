//! Plain-data declarations produced by the introspection adapter
//!
//! These mirror what reflection would report for a declared type: its
//! generic parameters, supertypes, fields, methods and enum constants, each
//! carrying the metadata markers attached at its declaration.

use serde::Deserialize;
use serde::Serialize;
use strum::Display;

use super::type_name::TypeName;
use super::type_ref::TypeRef;

/// What kind of declaration a type is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefinitionKind {
    /// Concrete or abstract class
    #[default]
    Class,
    /// Contributes default accessor methods only
    Interface,
    /// Components are always public and read-only
    Record,
    /// Closed set of named constants
    Enum,
    /// Functional types (functions, suppliers, runnables) with no JSON form
    Callable,
}

/// Intrinsic container role of a root container definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContainerKind {
    /// Single element type parameter
    Collection,
    /// Key and value type parameters, in that order
    Map,
    /// Single wrapped type parameter
    Optional,
}

impl ContainerKind {
    /// Number of type arguments the root container declares
    pub const fn arity(self) -> usize {
        match self {
            Self::Collection | Self::Optional => 1,
            Self::Map => 2,
        }
    }
}

/// Declared access level of a field or method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// The only level that exposes a member
    #[default]
    Public,
    /// Visible to subclasses
    Protected,
    /// Visible within the declaring package
    Package,
    /// Visible to the declaring type only
    Private,
}

impl Visibility {
    /// Whether a member at this level is serialized
    pub const fn is_public(self) -> bool { matches!(self, Self::Public) }
}

/// Declarative metadata attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Externally visible name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename:      Option<String>,
    /// Removes the member in both directions
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exclude:     bool,
    /// Human readable text copied into the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literal schema text that overrides the generated shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema:      Option<String>,
}

impl Markers {
    /// Markers with only a description
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// A declared generic parameter with its bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Variable name without the `$` sigil
    pub name:   String,
    /// Every bound the argument must satisfy; empty means `Object`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    /// A parameter with no bounds
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            bounds: Vec::new(),
        }
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Declared name, used as the property name unless renamed
    pub name:       String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty:         TypeRef,
    /// Access level
    #[serde(default)]
    pub visibility: Visibility,
    /// Static fields never become properties
    #[serde(default)]
    pub is_static:  bool,
    /// Markers attached to the field
    #[serde(flatten)]
    pub markers:    Markers,
}

/// A declared method; only accessors matter for schemas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    /// Method name, e.g. `getName`
    pub name:       String,
    /// Parameter types in order
    #[serde(default)]
    pub parameters: Vec<TypeRef>,
    /// Return type; `None` for void
    #[serde(default)]
    pub returns:    Option<TypeRef>,
    /// Access level
    #[serde(default)]
    pub visibility: Visibility,
    /// Static methods are never accessors
    #[serde(default)]
    pub is_static:  bool,
    /// Interface method with a body
    #[serde(default)]
    pub is_default: bool,
    /// Markers attached to the method
    #[serde(flatten)]
    pub markers:    Markers,
}

/// One constant of an enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumConstant {
    /// Declared constant name
    pub name:    String,
    /// `rename` changes the literal, `exclude` drops it
    #[serde(flatten)]
    pub markers: Markers,
}

impl EnumConstant {
    /// The literal as it appears on the wire
    pub fn visible_name(&self) -> &str { self.markers.rename.as_deref().unwrap_or(&self.name) }
}

/// Everything known about one declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Full name; the simple name is the part after the last `.`
    pub name:            TypeName,
    /// Declaration kind
    #[serde(default)]
    pub kind:            DefinitionKind,
    /// Set only on the root container declarations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container:       Option<ContainerKind>,
    /// Declared generic parameters, in order
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// Superclass with its arguments as written
    #[serde(default)]
    pub superclass:      Option<TypeRef>,
    /// Implemented or extended interfaces with their arguments
    #[serde(default)]
    pub interfaces:      Vec<TypeRef>,
    /// Fields declared by this type only
    #[serde(default)]
    pub fields:          Vec<FieldDescriptor>,
    /// Methods declared by this type only
    #[serde(default)]
    pub methods:         Vec<MethodDescriptor>,
    /// Enum constants in declaration order
    #[serde(default)]
    pub constants:       Vec<EnumConstant>,
    /// Type-level markers
    #[serde(flatten)]
    pub markers:         Markers,
}

impl TypeDefinition {
    /// An empty definition of the given kind
    pub fn new(name: impl Into<TypeName>, kind: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            container: None,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
            markers: Markers::default(),
        }
    }

    /// Direct supertypes as declared, interfaces first
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeRef> {
        self.interfaces.iter().chain(self.superclass.iter())
    }

    /// Declared parameter named `name`
    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameter> {
        self.type_parameters.iter().find(|param| param.name == name)
    }

    /// This definition referenced with its own type parameters as arguments
    pub fn as_declared_type(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.type_parameters
                .iter()
                .map(|param| TypeRef::variable(param.name.clone()))
                .collect(),
        )
    }
}
