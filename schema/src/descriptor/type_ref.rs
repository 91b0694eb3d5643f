//! Structural type descriptors
//!
//! A `TypeRef` names a type the way a declaration site sees it: a primitive,
//! an array, a (possibly parameterized) named type, a type variable or a
//! wildcard. Whether a named type behaves as a collection, map, optional,
//! enum or plain object is decided later against the catalog.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use strum::AsRefStr;
use strum::Display;
use strum::EnumString;

use super::type_expr;
use super::type_name::TypeName;
use crate::constants::TYPE_VARIABLE_SIGIL;
use crate::error::Error;
use crate::json_schema::JsonSchemaType;

/// Scalar types with a fixed JSON representation
///
/// Both the lowercase keyword and the boxed spelling parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
pub enum PrimitiveKind {
    /// 8-bit integer
    #[strum(to_string = "byte", serialize = "Byte")]
    Byte,
    /// 16-bit integer
    #[strum(to_string = "short", serialize = "Short")]
    Short,
    /// 32-bit integer
    #[strum(to_string = "int", serialize = "Integer")]
    Int,
    /// 64-bit integer
    #[strum(to_string = "long", serialize = "Long")]
    Long,
    /// Arbitrary precision integer
    #[strum(to_string = "BigInteger")]
    BigInteger,
    /// 32-bit float
    #[strum(to_string = "float", serialize = "Float")]
    Float,
    /// 64-bit float
    #[strum(to_string = "double", serialize = "Double")]
    Double,
    /// Arbitrary precision decimal
    #[strum(to_string = "BigDecimal")]
    BigDecimal,
    /// Any numeric value
    #[strum(to_string = "Number")]
    Number,
    /// Single character, serialized as a string
    #[strum(to_string = "char", serialize = "Character")]
    Char,
    /// Text
    #[strum(to_string = "String")]
    String,
    /// `true` or `false`
    #[strum(to_string = "boolean", serialize = "Boolean")]
    Boolean,
    /// Unconstrained value
    #[strum(to_string = "Object")]
    Object,
}

impl PrimitiveKind {
    /// The JSON schema type this primitive maps to
    pub const fn json_type(self) -> JsonSchemaType {
        match self {
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::BigInteger => {
                JsonSchemaType::Integer
            }
            Self::Float | Self::Double | Self::BigDecimal | Self::Number => JsonSchemaType::Number,
            Self::Char | Self::String => JsonSchemaType::String,
            Self::Boolean => JsonSchemaType::Boolean,
            Self::Object => JsonSchemaType::Object,
        }
    }

    /// Valid as a JSON object key
    pub const fn is_string_like(self) -> bool { matches!(self, Self::Char | Self::String) }
}

/// A type as seen from a declaration site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A scalar with a fixed JSON shape
    Primitive(PrimitiveKind),
    /// One array dimension around `element`
    Array(Box<TypeRef>),
    /// A declared type, with generic arguments when parameterized
    Named {
        /// Full or simple declared name
        name: TypeName,
        /// Empty for raw and non-generic references
        args: Vec<TypeRef>,
    },
    /// A type variable; `bounds` may be empty when the declaring scope supplies them
    Variable {
        /// Variable name without the sigil
        name:   String,
        /// Bounds written at the reference
        bounds: Vec<TypeRef>,
    },
    /// `?`, `? extends A & B` or `? super C`
    Wildcard {
        /// `extends` bounds
        upper: Vec<TypeRef>,
        /// `super` bound
        lower: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    /// A primitive reference
    pub const fn primitive(kind: PrimitiveKind) -> Self { Self::Primitive(kind) }

    /// A named type without generic arguments
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A named type with generic arguments
    pub fn generic(name: impl Into<TypeName>, args: Vec<Self>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    /// An unbounded type variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name:   name.into(),
            bounds: Vec::new(),
        }
    }

    /// One array dimension around `element`
    pub fn array(element: Self) -> Self { Self::Array(Box::new(element)) }

    /// `?`
    pub const fn unbounded_wildcard() -> Self {
        Self::Wildcard {
            upper: Vec::new(),
            lower: None,
        }
    }

    /// Parse a type expression such as `Map<String, List<Widget>>`
    pub fn parse(expression: &str) -> crate::error::Result<Self> { type_expr::parse(expression) }

    /// Name and arguments of a named type
    pub fn as_named(&self) -> Option<(&TypeName, &[Self])> {
        match self {
            Self::Named { name, args } => Some((name, args)),
            _ => None,
        }
    }

    /// The primitive boolean, which alone qualifies `is` readers
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Boolean))
    }

    /// Replace type variables found in `bindings`, leaving unknown variables intact
    pub fn substitute(&self, bindings: &HashMap<String, Self>) -> Self {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Primitive(_) => self.clone(),
            Self::Array(element) => Self::array(element.substitute(bindings)),
            Self::Named { name, args } => Self::Named {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            Self::Variable { name, bounds } => bindings.get(name).cloned().unwrap_or_else(|| {
                Self::Variable {
                    name:   name.clone(),
                    bounds: bounds.iter().map(|bound| bound.substitute(bindings)).collect(),
                }
            }),
            Self::Wildcard { upper, lower } => Self::Wildcard {
                upper: upper.iter().map(|bound| bound.substitute(bindings)).collect(),
                lower: lower
                    .as_ref()
                    .map(|bound| Box::new(bound.substitute(bindings))),
            },
        }
    }

    /// Number of type nodes in this expression; `Map<String, List<int>>` has four
    pub fn size(&self) -> usize {
        match self {
            Self::Primitive(_) => 1,
            Self::Array(element) => 1 + element.size(),
            Self::Named { args, .. } => 1 + args.iter().map(Self::size).sum::<usize>(),
            Self::Variable { bounds, .. } => 1 + bounds.iter().map(Self::size).sum::<usize>(),
            Self::Wildcard { upper, lower } => {
                1 + upper.iter().map(Self::size).sum::<usize>()
                    + lower.as_ref().map_or(0, |bound| bound.size())
            }
        }
    }

    /// Name used for a shared definition of this type
    pub fn definition_name(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.to_string(),
            Self::Array(element) => element.definition_name(),
            Self::Named { name, .. } => name.simple_name().to_string(),
            Self::Variable { name, .. } => name.clone(),
            Self::Wildcard { .. } => "Object".to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Named { name, args } if args.is_empty() => write!(f, "{name}"),
            Self::Named { name, args } => write!(f, "{name}<{}>", args.iter().join(", ")),
            Self::Variable { name, bounds } if bounds.is_empty() => {
                write!(f, "{TYPE_VARIABLE_SIGIL}{name}")
            }
            Self::Variable { name, bounds } => write!(
                f,
                "{TYPE_VARIABLE_SIGIL}{name} extends {}",
                bounds.iter().join(" & ")
            ),
            Self::Wildcard { upper, lower } => {
                write!(f, "?")?;
                if !upper.is_empty() {
                    write!(f, " extends {}", upper.iter().join(" & "))?;
                }
                if let Some(lower) = lower {
                    write!(f, " super {lower}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeRef {
    type Err = error_stack::Report<Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for TypeRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map_err(|report| report.current_context().to_string())
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self { value.to_string() }
}

impl From<PrimitiveKind> for TypeRef {
    fn from(kind: PrimitiveKind) -> Self { Self::Primitive(kind) }
}
