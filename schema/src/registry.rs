//! Per-request table of shareable definitions
//!
//! Objects, enums and type variables are registered the first time the
//! walker meets them and referenced by id everywhere, including the first
//! use. A definition met again while still being built is a cycle; it is
//! answered with a reference and the build continues.
//!
//! After the walk, a definition referenced exactly once (and not named by a
//! literal override) is inlined at its single use site; every other one is
//! emitted once under `$defs`.

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::debug;

use crate::constants::FIRST_COLLISION_SUFFIX;
use crate::descriptor::TypeName;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::schema_node::SchemaNode;

/// Index of a definition within one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(usize);

/// Identity of a definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefinitionKey {
    /// A declared type with its (substituted) arguments
    Type(TypeRef),
    /// One definition per type variable name
    Variable(String),
}

/// Outcome of [`DefinitionRegistry::visit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First encounter; the caller builds the body and calls `finish`
    Begin(DefinitionId),
    /// Met again while its body is being built
    Cycle(DefinitionId),
    Finished(DefinitionId),
}

impl Visit {
    pub const fn id(self) -> DefinitionId {
        match self {
            Self::Begin(id) | Self::Cycle(id) | Self::Finished(id) => id,
        }
    }
}

#[derive(Debug)]
struct DefinitionEntry {
    key:        DefinitionKey,
    base_name:  String,
    body:       Option<SchemaNode>,
    references: usize,
    /// Named by a literal override pointer
    pinned:     bool,
}

#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    entries:  Vec<DefinitionEntry>,
    index:    HashMap<DefinitionKey, DefinitionId>,
    visiting: HashSet<DefinitionId>,
    finished: HashSet<DefinitionId>,
}

impl DefinitionRegistry {
    pub fn new() -> Self { Self::default() }

    /// Record one reference to `key`, registering it on first sight
    pub fn visit(&mut self, key: DefinitionKey, base_name: impl Into<String>) -> Visit {
        if let Some(&id) = self.index.get(&key) {
            self.entries[id.0].references += 1;
            if self.finished.contains(&id) {
                return Visit::Finished(id);
            }
            debug!(definition = %self.entries[id.0].base_name, "Cycle detected, emitting reference");
            return Visit::Cycle(id);
        }
        let id = DefinitionId(self.entries.len());
        self.entries.push(DefinitionEntry {
            key: key.clone(),
            base_name: base_name.into(),
            body: None,
            references: 1,
            pinned: false,
        });
        self.index.insert(key, id);
        self.visiting.insert(id);
        Visit::Begin(id)
    }

    /// Store the body of a definition begun with `visit`
    pub fn finish(&mut self, id: DefinitionId, body: SchemaNode) -> Result<()> {
        if !self.visiting.remove(&id) {
            return Err(Error::InvalidState(format!(
                "definition {} finished without being visited",
                self.base_name(id)
            ))
            .into());
        }
        self.entries[id.0].body = Some(body);
        self.finished.insert(id);
        Ok(())
    }

    /// Force a definition into `$defs`
    pub fn pin(&mut self, id: DefinitionId) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.pinned = true;
        }
    }

    pub fn body(&self, id: DefinitionId) -> Option<&SchemaNode> {
        self.entries.get(id.0).and_then(|entry| entry.body.as_ref())
    }

    pub fn key(&self, id: DefinitionId) -> Option<&DefinitionKey> {
        self.entries.get(id.0).map(|entry| &entry.key)
    }

    pub fn base_name(&self, id: DefinitionId) -> &str {
        self.entries.get(id.0).map_or("", |entry| entry.base_name.as_str())
    }

    pub fn references(&self, id: DefinitionId) -> usize {
        self.entries.get(id.0).map_or(0, |entry| entry.references)
    }

    pub fn is_visiting(&self, id: DefinitionId) -> bool { self.visiting.contains(&id) }

    pub fn is_finished(&self, id: DefinitionId) -> bool { self.finished.contains(&id) }

    /// Innermost declared type named `name` whose body is still being built
    pub fn visiting_type(&self, name: &TypeName) -> Option<&TypeRef> {
        self.visiting
            .iter()
            .filter_map(|&id| match &self.entries[id.0].key {
                DefinitionKey::Type(ty) if ty.as_named().is_some_and(|(found, _)| found == name) => {
                    Some((id, ty))
                }
                _ => None,
            })
            .max_by_key(|&(id, _)| id)
            .map(|(_, ty)| ty)
    }

    /// Emitted under `$defs` rather than inlined
    pub fn is_shared(&self, id: DefinitionId) -> bool {
        self.entries
            .get(id.0)
            .is_some_and(|entry| entry.references > 1 || entry.pinned)
    }

    /// First definition registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<DefinitionId> {
        self.entries
            .iter()
            .position(|entry| entry.base_name == name)
            .map(DefinitionId)
    }

    /// Definition behind a collision-suffixed name such as `Widget2`
    ///
    /// `Widget2` is the second definition registered under `Widget`, counting
    /// in the same order [`Self::names`] assigns suffixes.
    pub fn find_by_suffixed_name(&self, name: &str) -> Option<DefinitionId> {
        let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
        let suffix: usize = name.strip_prefix(base)?.parse().ok()?;
        let position = suffix.checked_sub(FIRST_COLLISION_SUFFIX)? + 1;
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.base_name == base)
            .nth(position)
            .map(|(index, _)| DefinitionId(index))
    }

    /// Shared definitions in registration order
    pub fn shared(&self) -> Vec<DefinitionId> {
        (0..self.entries.len())
            .map(DefinitionId)
            .filter(|&id| self.is_shared(id))
            .collect()
    }

    /// Unique `$defs` names for shared definitions
    ///
    /// Collisions get a numeric suffix starting at 2, in registration order.
    pub fn names(&self) -> HashMap<DefinitionId, String> {
        let mut used = HashSet::new();
        let mut names = HashMap::new();
        for id in self.shared() {
            let base = self.base_name(id);
            let mut candidate = base.to_string();
            let mut suffix = FIRST_COLLISION_SUFFIX;
            while !used.insert(candidate.clone()) {
                candidate = format!("{base}{suffix}");
                suffix += 1;
            }
            names.insert(id, candidate);
        }
        names
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::json_schema::JsonSchemaType;

    fn key(name: &str) -> DefinitionKey { DefinitionKey::Type(TypeRef::named(name)) }

    #[test]
    fn second_visit_while_building_is_a_cycle() {
        let mut registry = DefinitionRegistry::new();

        let first = registry.visit(key("Node"), "Node");
        assert!(matches!(first, Visit::Begin(_)));
        assert!(registry.is_visiting(first.id()));

        let again = registry.visit(key("Node"), "Node");
        assert_eq!(again, Visit::Cycle(first.id()));

        registry
            .finish(first.id(), SchemaNode::of_type(JsonSchemaType::Object))
            .unwrap();
        assert!(registry.is_finished(first.id()));
        assert_eq!(registry.visit(key("Node"), "Node"), Visit::Finished(first.id()));
        assert_eq!(registry.references(first.id()), 3);
        assert!(registry.is_shared(first.id()));
    }

    #[test]
    fn single_reference_is_not_shared_unless_pinned() {
        let mut registry = DefinitionRegistry::new();
        let id = registry.visit(key("Leaf"), "Leaf").id();

        assert!(!registry.is_shared(id));
        registry.pin(id);
        assert!(registry.is_shared(id));
    }

    #[test]
    fn colliding_names_get_numeric_suffixes() {
        let mut registry = DefinitionRegistry::new();
        let first = registry.visit(key("a.Widget"), "Widget").id();
        let second = registry.visit(key("b.Widget"), "Widget").id();
        let third = registry.visit(DefinitionKey::Variable("Widget".to_string()), "Widget").id();
        let lonely = registry.visit(key("Lonely"), "Lonely").id();
        for id in [first, second, third] {
            registry.pin(id);
        }

        let names = registry.names();

        assert_eq!(names[&first], "Widget");
        assert_eq!(names[&second], "Widget2");
        assert_eq!(names[&third], "Widget3");
        assert!(!names.contains_key(&lonely));
    }

    #[test]
    fn suffixed_names_find_later_registrations() {
        let mut registry = DefinitionRegistry::new();
        let first = registry.visit(key("a.Widget"), "Widget").id();
        let second = registry.visit(key("b.Widget"), "Widget").id();

        assert_eq!(registry.find_by_name("Widget"), Some(first));
        assert_eq!(registry.find_by_suffixed_name("Widget2"), Some(second));
        assert_eq!(registry.find_by_suffixed_name("Widget3"), None);
        assert_eq!(registry.find_by_suffixed_name("Widget1"), None);
        assert_eq!(registry.find_by_suffixed_name("Widget"), None);
    }

    #[test]
    fn visiting_type_is_the_innermost_open_definition() {
        let mut registry = DefinitionRegistry::new();
        let outer = TypeRef::parse("Nest<String>").unwrap();
        let inner = TypeRef::parse("Nest<List<String>>").unwrap();
        registry.visit(DefinitionKey::Type(outer.clone()), "Nest");
        let id = registry.visit(DefinitionKey::Type(inner.clone()), "Nest").id();

        let name = TypeName::from("Nest");
        assert_eq!(registry.visiting_type(&name), Some(&inner));

        registry
            .finish(id, SchemaNode::of_type(JsonSchemaType::Object))
            .unwrap();
        assert_eq!(registry.visiting_type(&name), Some(&outer));
        assert_eq!(registry.visiting_type(&TypeName::from("Other")), None);
    }

    #[test]
    fn finishing_unvisited_definition_is_invalid_state() {
        let mut registry = DefinitionRegistry::new();
        let id = registry.visit(key("Once"), "Once").id();
        registry
            .finish(id, SchemaNode::of_type(JsonSchemaType::Object))
            .unwrap();

        let error = registry
            .finish(id, SchemaNode::of_type(JsonSchemaType::Object))
            .unwrap_err();
        assert!(matches!(error.current_context(), Error::InvalidState(_)));
    }
}
