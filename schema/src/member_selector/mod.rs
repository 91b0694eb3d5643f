//! Property selection for declared types
//!
//! For each declared type the selector builds one table holding the INPUT and
//! OUTPUT property lists:
//! - a public instance field is a property in both directions
//! - `getX`/`isX` readers decide OUTPUT and `setX` writers decide INPUT, taking precedence
//!   over a field of the same name
//! - a non-public accessor hides its direction even when a public field exists
//! - an exclusion marker on any contributing declaration removes the property entirely
//! - the visible name is the first rename found, accessor of the direction first
//! - record components are properties in both directions

mod property;
mod slots;

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use tracing::warn;

pub use property::Direction;
pub use property::MemberTable;
pub use property::PropertyDescriptor;
pub use property::PropertyOrigin;
use slots::PropertySlot;

use crate::config::DuplicatePropertyPolicy;
use crate::descriptor::ContainerKind;
use crate::descriptor::DefinitionKind;
use crate::descriptor::Markers;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeDefinition;
use crate::descriptor::TypeName;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::type_utility::TypeUtility;

/// Computes the canonical property lists of declared types
#[derive(Debug, Clone, Copy)]
pub struct MemberSelector<'a> {
    catalog:    &'a TypeCatalog,
    duplicates: DuplicatePropertyPolicy,
}

impl<'a> MemberSelector<'a> {
    /// Selector reading declarations from `catalog`
    pub const fn new(catalog: &'a TypeCatalog, duplicates: DuplicatePropertyPolicy) -> Self {
        Self {
            catalog,
            duplicates,
        }
    }

    /// Ordered, de-duplicated properties of `definition` for one direction
    pub fn select(
        &self,
        definition: &TypeDefinition,
        direction: Direction,
    ) -> Result<Vec<PropertyDescriptor>> {
        Ok(self.member_table(definition)?.properties(direction).to_vec())
    }

    /// Both property lists of `definition`
    pub fn member_table(&self, definition: &TypeDefinition) -> Result<MemberTable> {
        let (input, output) = if definition.kind == DefinitionKind::Record {
            self.record_properties(definition)?
        } else {
            self.accessor_properties(definition)?
        };
        debug!(
            type_name = %definition.name,
            input = input.len(),
            output = output.len(),
            "Resolved member table"
        );
        Ok(MemberTable {
            input:  self.dedupe(definition, input)?,
            output: self.dedupe(definition, output)?,
        })
    }

    fn record_properties(
        &self,
        definition: &TypeDefinition,
    ) -> Result<(Vec<PropertyDescriptor>, Vec<PropertyDescriptor>)> {
        let mut properties = Vec::new();
        for component in definition.fields.iter().filter(|f| !f.is_static) {
            if component.markers.exclude {
                continue;
            }
            properties.push(self.property(
                &component.name,
                &component.ty,
                PropertyOrigin::Field,
                [Some(&component.markers)],
            )?);
        }
        Ok((properties.clone(), properties))
    }

    fn accessor_properties(
        &self,
        definition: &TypeDefinition,
    ) -> Result<(Vec<PropertyDescriptor>, Vec<PropertyDescriptor>)> {
        let mut input = Vec::new();
        let mut output = Vec::new();

        for (logical, slot) in &slots::collect(self.catalog, definition) {
            let reader = slot.reader();
            let excluded = [
                slot.field.map(|f| &f.markers),
                reader.map(|m| &m.markers),
                slot.setter.map(|m| &m.markers),
            ]
            .into_iter()
            .flatten()
            .any(|markers| markers.exclude);
            if excluded {
                debug!(type_name = %definition.name, property = %logical, "Excluded property");
                continue;
            }

            if let Some((ty, origin)) = output_source(slot) {
                let markers = [
                    reader.map(|m| &m.markers),
                    slot.field.map(|f| &f.markers),
                    slot.setter.map(|m| &m.markers),
                ];
                output.push(self.property(logical, ty, origin, markers)?);
            }
            if let Some((ty, origin)) = input_source(slot) {
                let markers = [
                    slot.setter.map(|m| &m.markers),
                    slot.field.map(|f| &f.markers),
                    reader.map(|m| &m.markers),
                ];
                input.push(self.property(logical, ty, origin, markers)?);
            }
        }
        Ok((input, output))
    }

    /// Markers are consulted in order; the first one carrying a value wins
    fn property<const N: usize>(
        &self,
        logical: &str,
        ty: &TypeRef,
        origin: PropertyOrigin,
        markers: [Option<&Markers>; N],
    ) -> Result<PropertyDescriptor> {
        let first = |pick: fn(&Markers) -> Option<&String>| {
            markers.iter().flatten().find_map(|m| pick(m)).cloned()
        };
        let optional =
            TypeUtility::new(self.catalog).container_kind(ty)? == Some(ContainerKind::Optional);
        Ok(PropertyDescriptor {
            name: first(|m| m.rename.as_ref()).unwrap_or_else(|| logical.to_string()),
            ty: ty.clone(),
            required: !optional,
            description: first(|m| m.description.as_ref()),
            schema: first(|m| m.schema.as_ref()),
            origin,
        })
    }

    fn dedupe(
        &self,
        definition: &TypeDefinition,
        properties: Vec<PropertyDescriptor>,
    ) -> Result<Vec<PropertyDescriptor>> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(properties.len());
        for property in properties {
            if seen.insert(property.name.clone()) {
                kept.push(property);
                continue;
            }
            match self.duplicates {
                DuplicatePropertyPolicy::KeepFirst => {
                    warn!(
                        type_name = %definition.name,
                        property = %property.name,
                        "Duplicate visible property name, keeping the first declaration"
                    );
                }
                DuplicatePropertyPolicy::Reject => {
                    return Err(Error::invalid(
                        "property name",
                        format!("{} exposes '{}' more than once", definition.name, property.name),
                    )
                    .into());
                }
            }
        }
        Ok(kept)
    }
}

fn output_source<'d>(slot: &PropertySlot<'d>) -> Option<(&'d TypeRef, PropertyOrigin)> {
    match (slot.reader(), slot.field) {
        (Some(reader), field) => reader
            .visibility
            .is_public()
            .then_some(reader.returns.as_ref())
            .flatten()
            .map(|ty| (ty, accessor_origin(field.is_some()))),
        (None, Some(field)) if field.visibility.is_public() => Some((&field.ty, PropertyOrigin::Field)),
        (None, _) => None,
    }
}

fn input_source<'d>(slot: &PropertySlot<'d>) -> Option<(&'d TypeRef, PropertyOrigin)> {
    match (slot.setter, slot.field) {
        (Some(writer), field) => writer
            .visibility
            .is_public()
            .then_some(writer.parameters.first())
            .flatten()
            .map(|ty| (ty, accessor_origin(field.is_some()))),
        (None, Some(field)) if field.visibility.is_public() => Some((&field.ty, PropertyOrigin::Field)),
        (None, _) => None,
    }
}

const fn accessor_origin(has_field: bool) -> PropertyOrigin {
    if has_field {
        PropertyOrigin::FieldAndAccessor
    } else {
        PropertyOrigin::Accessor
    }
}

/// Member tables memoized per declared type
///
/// Insert-only; the first table published for a type wins.
#[derive(Debug, Default)]
pub struct MemberTables {
    tables: DashMap<TypeName, Arc<MemberTable>>,
}

impl MemberTables {
    pub fn new() -> Self { Self::default() }

    /// Return the table for `definition`, building it on first use
    pub fn get_or_build(
        &self,
        selector: &MemberSelector<'_>,
        definition: &TypeDefinition,
    ) -> Result<Arc<MemberTable>> {
        if let Some(table) = self.tables.get(&definition.name) {
            return Ok(Arc::clone(table.value()));
        }
        let table = Arc::new(selector.member_table(definition)?);
        Ok(Arc::clone(
            self.tables
                .entry(definition.name.clone())
                .or_insert(table)
                .value(),
        ))
    }

    pub fn len(&self) -> usize { self.tables.len() }

    pub fn is_empty(&self) -> bool { self.tables.is_empty() }
}
