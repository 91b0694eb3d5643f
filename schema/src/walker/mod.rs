//! Type graph walker
//!
//! Converts a `TypeRef` into a `SchemaNode`, dispatching on its [`TypeKind`]
//! to one builder per kind. Objects, enums and type variables go through the
//! request's [`DefinitionRegistry`] and come back as references; everything
//! else is built inline.

mod builders;
mod type_kind;

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

pub use type_kind::TypeKind;

use crate::config::EngineConfig;
use crate::config::LiteralRefPolicy;
use crate::descriptor::ContainerKind;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeDefinition;
use crate::descriptor::TypeParameter;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::json_schema::DEFS_POINTER_PREFIX;
use crate::member_selector::Direction;
use crate::member_selector::MemberSelector;
use crate::member_selector::MemberTable;
use crate::member_selector::MemberTables;
use crate::override_fragment::OverrideFragment;
use crate::registry::DefinitionId;
use crate::registry::DefinitionRegistry;
use crate::schema_node::SchemaNode;
use crate::schema_node::SchemaRef;
use crate::type_utility::TypeUtility;

/// Builds the schema node of one type kind
pub trait SchemaBuilder {
    fn build(&self, walker: &mut TypeGraphWalker<'_>, ty: &TypeRef) -> Result<SchemaNode>;
}

/// Label used in errors when no member is being walked
const ROOT_SITE: &str = "<root>";

/// Request-scoped walker; owns the request's definition registry
pub struct TypeGraphWalker<'a> {
    catalog:   &'a TypeCatalog,
    config:    &'a EngineConfig,
    members:   &'a MemberTables,
    direction: Direction,
    registry:  DefinitionRegistry,
    /// Declared type parameters visible to unbound variables, innermost last
    scopes:    Vec<Vec<TypeParameter>>,
    /// Member labels from the root down to the current site
    sites:     Vec<String>,
}

impl<'a> TypeGraphWalker<'a> {
    pub fn new(
        catalog: &'a TypeCatalog,
        config: &'a EngineConfig,
        members: &'a MemberTables,
        direction: Direction,
    ) -> Self {
        Self {
            catalog,
            config,
            members,
            direction,
            registry: DefinitionRegistry::new(),
            scopes: Vec::new(),
            sites: Vec::new(),
        }
    }

    pub const fn direction(&self) -> Direction { self.direction }

    pub const fn catalog(&self) -> &'a TypeCatalog { self.catalog }

    pub const fn utility(&self) -> TypeUtility<'a> { TypeUtility::new(self.catalog) }

    pub const fn registry(&self) -> &DefinitionRegistry { &self.registry }

    pub const fn registry_mut(&mut self) -> &mut DefinitionRegistry { &mut self.registry }

    pub fn into_registry(self) -> DefinitionRegistry { self.registry }

    /// Label of the member currently being walked
    pub fn site(&self) -> String {
        if self.sites.is_empty() {
            ROOT_SITE.to_string()
        } else {
            self.sites.join(".")
        }
    }

    /// Build the node for `ty`
    pub fn walk(&mut self, ty: &TypeRef) -> Result<SchemaNode> {
        let kind = TypeKind::classify(ty, self.catalog)?;
        debug!(type_name = %ty, kind = %kind, site = %self.site(), "Walking type");
        kind.builder().build(self, ty)
    }

    /// Walk a member, applying its description and override markers
    pub fn walk_member(
        &mut self,
        label: &str,
        ty: &TypeRef,
        description: Option<String>,
        schema: Option<&str>,
    ) -> Result<SchemaNode> {
        self.sites.push(label.to_string());
        let result = OverrideFragment::from_marker(schema)
            .and_then(|fragment| self.apply_override(fragment, description, |walker| walker.walk(ty)));
        self.sites.pop();
        result
    }

    /// Generate a node unless a literal replaces it, then merge descriptions
    ///
    /// A literal's own description wins over `description`; a
    /// description-only fragment wins over both.
    pub fn apply_override(
        &mut self,
        fragment: Option<OverrideFragment>,
        description: Option<String>,
        generate: impl FnOnce(&mut Self) -> Result<SchemaNode>,
    ) -> Result<SchemaNode> {
        match fragment {
            Some(OverrideFragment::Replace(mut literal)) => {
                self.resolve_literal_pointers(&mut literal)?;
                if literal.description.is_none() {
                    literal.description = description;
                }
                Ok(literal)
            }
            Some(OverrideFragment::Description(text)) => {
                Ok(generate(self)?.with_description(Some(text)))
            }
            None => Ok(generate(self)?.with_description(description)),
        }
    }

    /// Run `walk` with `parameters` in scope for unbound type variables
    pub fn with_scope<T>(
        &mut self,
        parameters: &[TypeParameter],
        walk: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.scopes.push(parameters.to_vec());
        let result = walk(self);
        self.scopes.pop();
        result
    }

    /// Innermost declared type parameter named `name`
    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameter> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|param| param.name == name)
    }

    /// Memoized member table of a declared type
    pub fn member_table(&self, definition: &TypeDefinition) -> Result<Arc<MemberTable>> {
        let selector = MemberSelector::new(self.catalog, self.config.duplicate_properties);
        self.members.get_or_build(&selector, definition)
    }

    /// A member of this type is required unless it is an optional wrapper
    pub fn is_required(&self, ty: &TypeRef) -> Result<bool> {
        Ok(self.utility().container_kind(ty)? != Some(ContainerKind::Optional))
    }

    /// Tie `#/$defs/Name` pointers in a literal to this request's definitions
    ///
    /// Other pointers are left as written.
    pub fn resolve_literal_pointers(&mut self, literal: &mut SchemaNode) -> Result<()> {
        for reference in literal.pointers_mut() {
            let SchemaRef::Pointer(text) = &*reference else {
                continue;
            };
            let Some(target) = text.strip_prefix(DEFS_POINTER_PREFIX) else {
                continue;
            };
            let (name, path) = match target.split_once('/') {
                Some((name, path)) => (name.to_string(), Some(path.to_string())),
                None => (target.to_string(), None),
            };
            let text = text.clone();

            match self.resolve_definition_name(&name)? {
                Some(id) => {
                    debug!(pointer = %text, "Resolved override pointer");
                    self.registry.pin(id);
                    *reference = SchemaRef::Definition { id, path };
                }
                None => match self.config.literal_refs {
                    LiteralRefPolicy::RejectUnknown => {
                        return Err(Error::invalid(
                            "schema override literal",
                            format!("{text} at {} names no known type", self.site()),
                        )
                        .into());
                    }
                    LiteralRefPolicy::KeepUnknown => {
                        warn!(pointer = %text, site = %self.site(), "Keeping unresolved override pointer");
                    }
                },
            }
        }
        Ok(())
    }

    /// Definition already in this request, or a catalog type walked on demand
    ///
    /// A name that matches neither may carry a collision suffix (`Widget2`).
    fn resolve_definition_name(&mut self, name: &str) -> Result<Option<DefinitionId>> {
        if let Some(id) = self.registry.find_by_name(name) {
            return Ok(Some(id));
        }
        let Some(definition) = self.catalog.lookup(name) else {
            return Ok(self.registry.find_by_suffixed_name(name));
        };
        let node = self.walk(&TypeRef::named(definition.name.clone()))?;
        Ok(node.definition())
    }
}
