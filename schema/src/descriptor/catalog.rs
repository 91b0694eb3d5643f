//! Name-keyed table of type definitions
//!
//! A catalog always starts with the intrinsic container, optional and callable
//! declarations so that user types can extend `Map`, `List` and friends
//! without redeclaring them.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::definition::ContainerKind;
use super::definition::DefinitionKind;
use super::definition::TypeDefinition;
use super::definition::TypeParameter;
use super::tool::ToolDescriptor;
use super::type_name::TypeName;
use super::type_ref::TypeRef;
use crate::constants::ARRAY_LIST;
use crate::constants::COLLECTION;
use crate::constants::CONSUMER;
use crate::constants::FUNCTION;
use crate::constants::HASH_MAP;
use crate::constants::HASH_SET;
use crate::constants::LINKED_LIST;
use crate::constants::LIST;
use crate::constants::MAP;
use crate::constants::OPTIONAL;
use crate::constants::RUNNABLE;
use crate::constants::SET;
use crate::constants::SUPPLIER;
use crate::constants::TREE_MAP;
use crate::error::Error;
use crate::error::Result;

static INTRINSIC_TYPES: Lazy<Vec<TypeDefinition>> = Lazy::new(|| {
    vec![
        container(COLLECTION, ContainerKind::Collection, &["E"]),
        extending(LIST, DefinitionKind::Interface, &["E"], COLLECTION),
        extending(SET, DefinitionKind::Interface, &["E"], COLLECTION),
        extending(ARRAY_LIST, DefinitionKind::Class, &["E"], LIST),
        extending(LINKED_LIST, DefinitionKind::Class, &["E"], LIST),
        extending(HASH_SET, DefinitionKind::Class, &["E"], SET),
        container(MAP, ContainerKind::Map, &["K", "V"]),
        extending(HASH_MAP, DefinitionKind::Class, &["K", "V"], MAP),
        extending(TREE_MAP, DefinitionKind::Class, &["K", "V"], MAP),
        container(OPTIONAL, ContainerKind::Optional, &["T"]),
        callable(FUNCTION, &["T", "R"]),
        callable(SUPPLIER, &["T"]),
        callable(CONSUMER, &["T"]),
        callable(RUNNABLE, &[]),
    ]
});

fn parameterized(name: &str, kind: DefinitionKind, params: &[&str]) -> TypeDefinition {
    let mut definition = TypeDefinition::new(name, kind);
    definition.type_parameters = params.iter().copied().map(TypeParameter::unbounded).collect();
    definition
}

fn container(name: &str, role: ContainerKind, params: &[&str]) -> TypeDefinition {
    let mut definition = parameterized(name, DefinitionKind::Interface, params);
    definition.container = Some(role);
    definition
}

/// A definition passing its own parameters straight through to one interface
fn extending(name: &str, kind: DefinitionKind, params: &[&str], parent: &str) -> TypeDefinition {
    let mut definition = parameterized(name, kind, params);
    definition.interfaces = vec![TypeRef::generic(
        parent,
        params.iter().copied().map(TypeRef::variable).collect(),
    )];
    definition
}

fn callable(name: &str, params: &[&str]) -> TypeDefinition {
    parameterized(name, DefinitionKind::Callable, params)
}

/// Serialized form of a catalog, optionally bundling tool descriptors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Declared types, in any order
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    /// Tools bundled with the catalog
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

/// Definitions reachable by full or simple name
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types:        HashMap<TypeName, TypeDefinition>,
    /// Simple name to every full name sharing it
    simple_names: HashMap<String, Vec<TypeName>>,
}

impl Default for TypeCatalog {
    fn default() -> Self { Self::new() }
}

impl TypeCatalog {
    /// A catalog holding only the intrinsic declarations
    pub fn new() -> Self {
        let mut catalog = Self {
            types:        HashMap::new(),
            simple_names: HashMap::new(),
        };
        for definition in INTRINSIC_TYPES.iter() {
            catalog.insert(definition.clone());
        }
        catalog
    }

    /// Intrinsics plus `definitions`; a user definition replaces an intrinsic of the same name
    pub fn with_definitions(definitions: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Add or replace a definition, keyed by its full name
    pub fn insert(&mut self, definition: TypeDefinition) {
        let name = definition.name.clone();
        if self.types.insert(name.clone(), definition).is_none() {
            self.simple_names
                .entry(name.simple_name().to_string())
                .or_default()
                .push(name);
        }
    }

    /// Build from a parsed JSON document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_value(value)
            .map_err(|e| Error::CatalogLoad(format!("malformed catalog document: {e}")))?;
        Ok(Self::from_document(document))
    }

    /// Parse a catalog document from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document = Self::parse_document(text)?;
        Ok(Self::from_document(document))
    }

    /// Read a catalog document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_document(Self::load_document(path)?))
    }

    /// Read a catalog document, keeping its bundled tools
    pub fn load_document(path: impl AsRef<Path>) -> Result<CatalogDocument> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::CatalogLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "Loaded catalog document");
        Self::parse_document(&text)
    }

    fn parse_document(text: &str) -> Result<CatalogDocument> {
        serde_json::from_str(text)
            .map_err(|e| Error::CatalogLoad(format!("malformed catalog document: {e}")).into())
    }

    /// Intrinsics plus the document's types; bundled tools are ignored
    pub fn from_document(document: CatalogDocument) -> Self {
        Self::with_definitions(document.types)
    }

    /// Look up by full name, falling back to an unambiguous simple name
    pub fn get(&self, name: &TypeName) -> Option<&TypeDefinition> {
        self.types
            .get(name)
            .or_else(|| self.find_by_simple_name(name.simple_name()))
    }

    /// Like [`Self::get`] but failing for unknown names
    pub fn require(&self, name: &TypeName) -> Result<&TypeDefinition> {
        self.get(name)
            .ok_or_else(|| Error::type_not_registered(name.as_str()).into())
    }

    /// Definition behind a named type reference
    pub fn require_type(&self, ty: &TypeRef) -> Result<&TypeDefinition> {
        let Some((name, _)) = ty.as_named() else {
            return Err(Error::invalid("type reference", format!("{ty} is not a declared type")).into());
        };
        self.require(name)
    }

    /// The single definition with this simple name, if exactly one exists
    pub fn find_by_simple_name(&self, simple_name: &str) -> Option<&TypeDefinition> {
        match self.simple_names.get(simple_name).map(Vec::as_slice) {
            Some([only]) => self.types.get(only),
            _ => None,
        }
    }

    /// Find a definition by full or simple name given as text
    pub fn lookup(&self, name: &str) -> Option<&TypeDefinition> { self.get(&TypeName::from(name)) }

    /// Number of definitions, intrinsics included
    pub fn len(&self) -> usize { self.types.len() }

    /// Never true once intrinsics are loaded
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}
