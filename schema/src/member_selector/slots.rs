//! Collects the declarations that contribute to each logical property
//!
//! Every field and accessor is filed under a logical name (the field name, or
//! the accessor name without its prefix). A slot holds at most one
//! declaration per role and the most-derived declaration owns each role.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::constants::BOOLEAN_GETTER_PREFIX;
use crate::constants::GETTER_PREFIX;
use crate::constants::SETTER_PREFIX;
use crate::descriptor::DefinitionKind;
use crate::descriptor::FieldDescriptor;
use crate::descriptor::MethodDescriptor;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeDefinition;

/// Role an accessor method plays for its property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AccessorRole {
    Getter,
    BooleanGetter,
    Setter,
}

/// Role and logical property name of an accessor, if the method is one
pub(super) fn classify(method: &MethodDescriptor) -> Option<(AccessorRole, String)> {
    let no_parameters = method.parameters.is_empty();
    if let Some(rest) = method.name.strip_prefix(GETTER_PREFIX)
        && no_parameters
        && method.returns.is_some()
    {
        return property_name(rest).map(|name| (AccessorRole::Getter, name));
    }
    if let Some(rest) = method.name.strip_prefix(BOOLEAN_GETTER_PREFIX)
        && no_parameters
        && method.returns.as_ref().is_some_and(crate::descriptor::TypeRef::is_boolean)
    {
        return property_name(rest).map(|name| (AccessorRole::BooleanGetter, name));
    }
    if let Some(rest) = method.name.strip_prefix(SETTER_PREFIX)
        && method.parameters.len() == 1
        && method.returns.is_none()
    {
        return property_name(rest).map(|name| (AccessorRole::Setter, name));
    }
    None
}

/// `MaxValue` becomes `maxValue`; only the first character changes
///
/// The character after the prefix is lowercased whatever its case, so
/// `getfoo` files under `foo` just like `getFoo`.
fn property_name(rest: &str) -> Option<String> {
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

#[derive(Debug, Default)]
pub(super) struct PropertySlot<'d> {
    pub field:          Option<&'d FieldDescriptor>,
    pub getter:         Option<&'d MethodDescriptor>,
    pub boolean_getter: Option<&'d MethodDescriptor>,
    pub setter:         Option<&'d MethodDescriptor>,
}

impl<'d> PropertySlot<'d> {
    /// `get` wins over `is`
    pub const fn reader(&self) -> Option<&'d MethodDescriptor> {
        match self.getter {
            Some(getter) => Some(getter),
            None => self.boolean_getter,
        }
    }

    fn role_mut(&mut self, role: AccessorRole) -> &mut Option<&'d MethodDescriptor> {
        match role {
            AccessorRole::Getter => &mut self.getter,
            AccessorRole::BooleanGetter => &mut self.boolean_getter,
            AccessorRole::Setter => &mut self.setter,
        }
    }
}

/// Logical name to slot, in first-declaration order
pub(super) type Slots<'d> = IndexMap<String, PropertySlot<'d>>;

/// Gather slots for `root` across its supertypes
pub(super) fn collect<'d>(catalog: &'d TypeCatalog, root: &'d TypeDefinition) -> Slots<'d> {
    let mut slots = Slots::new();
    if root.kind == DefinitionKind::Interface {
        // an interface type exposes its own abstract accessors and its parents'
        let lineage = interface_lineage(catalog, root);
        for definition in lineage.iter().rev() {
            file_declared(&mut slots, definition);
        }
        return slots;
    }

    let chain = class_chain(catalog, root);
    for definition in chain.iter().rev() {
        file_declared(&mut slots, definition);
    }
    // default methods only fill roles no class declared
    let mut seen = HashSet::new();
    for definition in &chain {
        for interface in super_interfaces(catalog, definition, &mut seen) {
            for method in interface.methods.iter().filter(|m| m.is_default && !m.is_static) {
                if let Some((role, name)) = classify(method) {
                    let slot = slots.entry(name).or_default().role_mut(role);
                    if slot.is_none() {
                        *slot = Some(method);
                    }
                }
            }
        }
    }
    slots
}

/// Later calls overwrite earlier ones, so callers go base-first
fn file_declared<'d>(slots: &mut Slots<'d>, definition: &'d TypeDefinition) {
    for field in definition.fields.iter().filter(|f| !f.is_static) {
        slots.entry(field.name.clone()).or_default().field = Some(field);
    }
    for method in definition.methods.iter().filter(|m| !m.is_static) {
        if let Some((role, name)) = classify(method) {
            *slots.entry(name).or_default().role_mut(role) = Some(method);
        }
    }
}

/// `root`, its superclass, and so on, most-derived first
fn class_chain<'d>(catalog: &'d TypeCatalog, root: &'d TypeDefinition) -> Vec<&'d TypeDefinition> {
    let mut chain = vec![root];
    let mut seen = HashSet::from([&root.name]);
    let mut current = root;
    while let Some(parent) = current
        .superclass
        .as_ref()
        .and_then(|superclass| superclass.as_named())
        .and_then(|(name, _)| catalog.get(name))
    {
        if !seen.insert(&parent.name) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// `root` and every interface it extends, breadth-first
fn interface_lineage<'d>(
    catalog: &'d TypeCatalog,
    root: &'d TypeDefinition,
) -> Vec<&'d TypeDefinition> {
    let mut seen = HashSet::from([&root.name]);
    let mut lineage = vec![root];
    lineage.extend(super_interfaces(catalog, root, &mut seen));
    lineage
}

/// Interfaces reachable from `definition` not already in `seen`, breadth-first
fn super_interfaces<'d>(
    catalog: &'d TypeCatalog,
    definition: &'d TypeDefinition,
    seen: &mut HashSet<&'d crate::descriptor::TypeName>,
) -> Vec<&'d TypeDefinition> {
    let mut found = Vec::new();
    let mut queue: Vec<&'d TypeDefinition> = vec![definition];
    while let Some(current) = queue.pop() {
        for interface in &current.interfaces {
            let Some(parent) = interface.as_named().and_then(|(name, _)| catalog.get(name)) else {
                continue;
            };
            if seen.insert(&parent.name) {
                found.push(parent);
                queue.insert(0, parent);
            }
        }
    }
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;

    fn method(value: serde_json::Value) -> MethodDescriptor { serde_json::from_value(value).unwrap() }

    #[test]
    fn classifies_accessors() {
        let getter = method(json!({ "name": "getMaxValue", "returns": "int" }));
        assert_eq!(classify(&getter), Some((AccessorRole::Getter, "maxValue".to_string())));

        let boolean = method(json!({ "name": "isActive", "returns": "boolean" }));
        assert_eq!(
            classify(&boolean),
            Some((AccessorRole::BooleanGetter, "active".to_string()))
        );

        let setter = method(json!({ "name": "setURL", "parameters": ["String"] }));
        assert_eq!(classify(&setter), Some((AccessorRole::Setter, "uRL".to_string())));
    }

    #[test]
    fn lowercase_after_prefix_is_still_an_accessor() {
        let getter = method(json!({ "name": "getfoo", "returns": "int" }));
        assert_eq!(classify(&getter), Some((AccessorRole::Getter, "foo".to_string())));

        let setter = method(json!({ "name": "settle", "parameters": ["int"] }));
        assert_eq!(classify(&setter), Some((AccessorRole::Setter, "tle".to_string())));
    }

    #[test]
    fn rejects_non_accessors() {
        for value in [
            json!({ "name": "isActive", "returns": "String" }),
            json!({ "name": "getName", "parameters": ["int"], "returns": "String" }),
            json!({ "name": "getName" }),
            json!({ "name": "setName", "parameters": ["String"], "returns": "Widget" }),
            json!({ "name": "get", "returns": "int" }),
            json!({ "name": "compute", "returns": "int" }),
        ] {
            assert_eq!(classify(&method(value)), None);
        }
    }

    #[test]
    fn derived_declarations_keep_inherited_position() {
        let catalog = TypeCatalog::from_value(json!({
            "types": [
                { "name": "Base",
                  "fields": [{ "name": "id", "type": "int" }, { "name": "label", "type": "String" }] },
                { "name": "Child", "superclass": "Base",
                  "fields": [{ "name": "label", "type": "int" }, { "name": "extra", "type": "int" }] }
            ]
        }))
        .unwrap();
        let child = catalog.lookup("Child").unwrap();

        let slots = collect(&catalog, child);

        assert_eq!(slots.keys().collect::<Vec<_>>(), ["id", "label", "extra"]);
        let label = slots["label"].field.unwrap();
        assert_eq!(label.ty.to_string(), "int");
    }
}
