//! A newtype wrapper for declared type names
//!
//! Names may be qualified (`com.acme.model.Widget` or `acme::model::Widget`);
//! definitions in the shared table are keyed by the simple name.

use serde::Deserialize;
use serde::Serialize;

/// A declared (possibly qualified) type name used as a catalog key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str { &self.0 }

    /// The last path segment
    ///
    /// `com.acme.Widget` and `acme::Widget` both return `Widget`.
    pub fn simple_name(&self) -> &str {
        let after_colons = self.0.rsplit("::").next().unwrap_or(&self.0);
        after_colons.rsplit('.').next().unwrap_or(after_colons)
    }

    /// True when `name` equals either the full name or the simple name
    pub fn matches(&self, name: &str) -> bool { self.0 == name || self.simple_name() == name }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}
