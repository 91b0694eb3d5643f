use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `mcp_tool_schema` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Failures raised while synthesizing a schema
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog or tool descriptor document could not be read
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// Malformed override literal, dangling pointer, or a request the catalog cannot satisfy
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Type expression text that does not parse
    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression {
        /// The text as written
        expression: String,
        /// What the parser expected
        reason:     String,
    },

    /// Internal bookkeeping reached a state it should never reach
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A named type absent from the catalog
    #[error("Type not registered: {type_name}")]
    TypeNotRegistered {
        /// Name as referenced
        type_name: String,
    },

    /// A member whose type has no JSON representation
    #[error("Unsupported type at {site}: {reason}")]
    UnsupportedType {
        /// Dotted member path from the root, e.g. `combine.widgetA.callback`
        site:   String,
        /// Why the type cannot be represented
        reason: String,
    },
}

impl Error {
    /// Create a "Failed to X" configuration error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" configuration error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a "Missing X" configuration error
    pub fn missing(what: &str) -> Self {
        Self::Configuration(format!("{MSG_MISSING_PREFIX} {what}"))
    }

    /// Create an unsupported type error for the member at `site`
    pub fn unsupported(site: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedType {
            site:   site.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a name the catalog does not know
    pub fn type_not_registered(type_name: impl Into<String>) -> Self {
        Self::TypeNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// True for the configuration family of failures
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// True for unsupported member types
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}
