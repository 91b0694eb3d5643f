//! Resolved properties of a declared type

use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

use crate::descriptor::TypeRef;

/// Which side of the wire a schema describes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Values deserialized from a request
    Input,
    /// Values serialized into a response
    Output,
}

/// Which declarations a property was assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PropertyOrigin {
    /// A public field alone
    Field,
    /// Accessor methods alone
    Accessor,
    /// A field paired with at least one accessor
    FieldAndAccessor,
}

/// One externally visible property for one direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Name after renames
    pub name:        String,
    /// Reader return type (output), writer parameter type (input) or field type
    pub ty:          TypeRef,
    /// False when the declared type is an optional wrapper
    pub required:    bool,
    /// Description marker of the contributing declaration
    pub description: Option<String>,
    /// Literal schema text replacing the generated shape
    pub schema:      Option<String>,
    /// Declarations the property came from
    pub origin:      PropertyOrigin,
}

/// The canonical property lists of one declared type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberTable {
    /// Properties accepted when deserializing
    pub input:  Vec<PropertyDescriptor>,
    /// Properties written when serializing
    pub output: Vec<PropertyDescriptor>,
}

impl MemberTable {
    /// The list for `direction`
    pub fn properties(&self, direction: Direction) -> &[PropertyDescriptor] {
        match direction {
            Direction::Input => &self.input,
            Direction::Output => &self.output,
        }
    }

    /// Property named `name` in the list for `direction`
    pub fn property(&self, direction: Direction, name: &str) -> Option<&PropertyDescriptor> {
        self.properties(direction)
            .iter()
            .find(|property| property.name == name)
    }
}
