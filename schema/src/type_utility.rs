//! Container argument resolution through generic supertypes
//!
//! A declared type such as `StupidMap<Integer, String>` may reach `Map<K, V>`
//! through several intermediate declarations that rename, permute or fix
//! type parameters. Resolution follows the supertype route, substituting
//! arguments at each hop, until it reaches the root container and reads its
//! arguments in declared order.

use std::collections::HashMap;

use tracing::debug;

use crate::constants::MAX_SUPERTYPE_DEPTH;
use crate::descriptor::ContainerKind;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeDefinition;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;

/// Key and value types of a keyed container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTypes {
    /// First argument of the root keyed container
    pub key:   TypeRef,
    /// Second argument of the root keyed container
    pub value: TypeRef,
}

/// Resolves container arguments against a catalog
#[derive(Debug, Clone, Copy)]
pub struct TypeUtility<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> TypeUtility<'a> {
    /// Utility resolving supertypes through `catalog`
    pub const fn new(catalog: &'a TypeCatalog) -> Self { Self { catalog } }

    /// Element type of a single-element container or anything extending one
    pub fn resolve_container_element_type(&self, ty: &TypeRef) -> Result<TypeRef> {
        let mut arguments = self.resolve_arguments(ty, ContainerKind::Collection)?;
        arguments.pop().ok_or_else(|| Self::arity_error(ty, ContainerKind::Collection))
    }

    /// Key and value types, in the order the root keyed container declares them
    pub fn resolve_map_types(&self, ty: &TypeRef) -> Result<MapTypes> {
        let arguments = self.resolve_arguments(ty, ContainerKind::Map)?;
        match <[TypeRef; 2]>::try_from(arguments) {
            Ok([key, value]) => Ok(MapTypes { key, value }),
            Err(_) => Err(Self::arity_error(ty, ContainerKind::Map)),
        }
    }

    /// Wrapped type of an optional
    pub fn resolve_optional_type(&self, ty: &TypeRef) -> Result<TypeRef> {
        let mut arguments = self.resolve_arguments(ty, ContainerKind::Optional)?;
        arguments.pop().ok_or_else(|| Self::arity_error(ty, ContainerKind::Optional))
    }

    /// Which container role, if any, a type reaches through its supertypes
    pub fn container_kind(&self, ty: &TypeRef) -> Result<Option<ContainerKind>> {
        let Some((name, _)) = ty.as_named() else {
            return Ok(None);
        };
        self.container_kind_of(self.catalog.require(name)?, 0)
    }

    /// True when the type extends `container`
    pub fn extends(&self, ty: &TypeRef, container: ContainerKind) -> Result<bool> {
        Ok(self.find_route(ty, container, 0)?.is_some())
    }

    fn container_kind_of(
        &self,
        definition: &TypeDefinition,
        depth: usize,
    ) -> Result<Option<ContainerKind>> {
        if depth > MAX_SUPERTYPE_DEPTH {
            return Err(Self::depth_error(definition.name.as_str()));
        }
        if definition.container.is_some() {
            return Ok(definition.container);
        }
        for supertype in definition.supertypes() {
            let Some((name, _)) = supertype.as_named() else {
                continue;
            };
            let Some(parent) = self.catalog.get(name) else {
                continue;
            };
            if let Some(kind) = self.container_kind_of(parent, depth + 1)? {
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }

    fn resolve_arguments(&self, ty: &TypeRef, target: ContainerKind) -> Result<Vec<TypeRef>> {
        self.find_route(ty, target, 0)?.ok_or_else(|| {
            Error::failed_to("resolve container type", format!("{ty} does not extend {target}"))
                .into()
        })
    }

    /// Depth-first over interfaces, then the superclass
    fn find_route(
        &self,
        ty: &TypeRef,
        target: ContainerKind,
        depth: usize,
    ) -> Result<Option<Vec<TypeRef>>> {
        if depth > MAX_SUPERTYPE_DEPTH {
            return Err(Self::depth_error(&ty.to_string()));
        }
        let Some((name, arguments)) = ty.as_named() else {
            return Ok(None);
        };
        let definition = self.catalog.require(name)?;
        let bindings = container_bindings(definition, arguments)?;

        if definition.container == Some(target) {
            let resolved = definition
                .type_parameters
                .iter()
                .filter_map(|param| bindings.get(&param.name).cloned())
                .collect();
            return Ok(Some(resolved));
        }

        for supertype in definition.supertypes() {
            let next = supertype.substitute(&bindings);
            if let Some(resolved) = self.find_route(&next, target, depth + 1)? {
                return Ok(Some(resolved));
            }
        }
        Ok(None)
    }

    fn arity_error(ty: &TypeRef, container: ContainerKind) -> error_stack::Report<Error> {
        Error::invalid(
            "container declaration",
            format!("{ty} reaches {container} without {} type arguments", container.arity()),
        )
        .into()
    }

    fn depth_error(name: &str) -> error_stack::Report<Error> {
        Error::failed_to("walk supertypes", format!("{name} has a cyclic or too deep hierarchy"))
            .into()
    }
}

/// Bind declared parameters to arguments
///
/// A raw reference (no arguments) binds each parameter to a wildcard
/// bounded like the parameter itself.
fn container_bindings(
    definition: &TypeDefinition,
    arguments: &[TypeRef],
) -> Result<HashMap<String, TypeRef>> {
    let params = &definition.type_parameters;
    if arguments.is_empty() {
        if !params.is_empty() {
            debug!(type_name = %definition.name, "Raw generic reference, parameters fall back to bounds");
        }
        return Ok(params
            .iter()
            .map(|param| {
                (
                    param.name.clone(),
                    TypeRef::Wildcard {
                        upper: param.bounds.clone(),
                        lower: None,
                    },
                )
            })
            .collect());
    }
    type_bindings(definition, arguments)
}

/// Bind declared parameters to supplied arguments
///
/// A raw reference binds nothing; an argument count that differs from the
/// declaration is a configuration error.
pub fn type_bindings(
    definition: &TypeDefinition,
    arguments: &[TypeRef],
) -> Result<HashMap<String, TypeRef>> {
    let params = &definition.type_parameters;
    if arguments.is_empty() {
        return Ok(HashMap::new());
    }
    if arguments.len() != params.len() {
        return Err(Error::invalid(
            "type arguments",
            format!(
                "{} declares {} type parameters but {} were supplied",
                definition.name,
                params.len(),
                arguments.len()
            ),
        )
        .into());
    }
    Ok(params
        .iter()
        .zip(arguments)
        .map(|(param, argument)| (param.name.clone(), argument.clone()))
        .collect())
}
