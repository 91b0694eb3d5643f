//! Request entry points
//!
//! Each request walks with a fresh [`TypeGraphWalker`] and registry, then
//! renders the root plus any shared definitions. Finished documents go to the
//! warm cache when it is enabled.

mod render;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;
use tracing::info;

use self::render::Renderer;
use crate::cache::CacheKey;
use crate::cache::SchemaCache;
use crate::config::EngineConfig;
use crate::descriptor::DefinitionKind;
use crate::descriptor::ToolDescriptor;
use crate::descriptor::TypeCatalog;
use crate::descriptor::TypeRef;
use crate::error::Error;
use crate::error::Result;
use crate::member_selector::Direction;
use crate::member_selector::MemberTables;
use crate::registry::DefinitionKey;
use crate::registry::DefinitionRegistry;
use crate::schema_node::SchemaNode;
use crate::tool_listing::ToolSchemas;
use crate::walker::TypeGraphWalker;

/// Label of a tool's return value in error sites
const RETURN_SITE: &str = "return";

/// Generates type and tool documents against one catalog
///
/// Safe to share between threads; only the caches are shared state.
#[derive(Debug)]
pub struct SchemaAssembler {
    catalog: TypeCatalog,
    config:  EngineConfig,
    members: MemberTables,
    cache:   SchemaCache,
}

impl SchemaAssembler {
    /// Assembler with the default configuration
    pub fn new(catalog: TypeCatalog) -> Self { Self::with_config(catalog, EngineConfig::default()) }

    /// Assembler with an explicit configuration
    pub fn with_config(catalog: TypeCatalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            members: MemberTables::new(),
            cache: SchemaCache::new(),
        }
    }

    /// Catalog every request resolves against
    pub const fn catalog(&self) -> &TypeCatalog { &self.catalog }

    /// Active configuration
    pub const fn config(&self) -> &EngineConfig { &self.config }

    /// Number of documents in the warm cache
    pub fn cached_documents(&self) -> usize { self.cache.len() }

    /// Document describing `ty` in one direction
    ///
    /// Non-object roots are inlined. An object root is inlined when nothing is
    /// shared; otherwise it joins `$defs` and the document is a pointer to it.
    pub fn get_schema(&self, ty: &TypeRef, direction: Direction) -> Result<Value> {
        self.cached(CacheKey::Schema(ty.clone(), direction), || {
            self.build_schema(ty, direction).map(Some)
        })?
        .ok_or_else(|| Error::InvalidState(format!("no document produced for {ty}")).into())
    }

    /// [`Self::get_schema`] for a type expression such as `List<Widget>`
    pub fn schema_for(&self, expression: &str, direction: Direction) -> Result<Value> {
        self.get_schema(&TypeRef::parse(expression)?, direction)
    }

    /// Object document with one required property per parameter
    pub fn get_tool_input_schema(&self, tool: &ToolDescriptor) -> Result<Value> {
        self.cached(CacheKey::ToolInput(Box::new(tool.clone())), || {
            self.build_tool_input(tool).map(Some)
        })?
        .ok_or_else(|| {
            Error::InvalidState(format!("no input document produced for {}", tool.name)).into()
        })
    }

    /// Document of the return type; `None` for tools returning nothing
    pub fn get_tool_output_schema(&self, tool: &ToolDescriptor) -> Result<Option<Value>> {
        self.cached(CacheKey::ToolOutput(Box::new(tool.clone())), || {
            self.build_tool_output(tool)
        })
    }

    /// Listing entries for `tools`, in order
    pub fn list_tools(&self, tools: &[ToolDescriptor]) -> Result<Vec<ToolSchemas>> {
        tools
            .iter()
            .map(|tool| {
                Ok(ToolSchemas {
                    name:          tool.name.clone(),
                    description:   tool.description.clone(),
                    input_schema:  self.get_tool_input_schema(tool)?,
                    output_schema: self.get_tool_output_schema(tool)?,
                })
            })
            .collect()
    }

    fn cached(
        &self,
        key: CacheKey,
        build: impl FnOnce() -> Result<Option<Value>>,
    ) -> Result<Option<Value>> {
        if !self.config.warm_cache {
            return build();
        }
        Ok(self
            .cache
            .get_or_build(key, build)?
            .map(|document| document.as_ref().clone()))
    }

    fn walker(&self, direction: Direction) -> TypeGraphWalker<'_> {
        TypeGraphWalker::new(&self.catalog, &self.config, &self.members, direction)
    }

    fn build_schema(&self, ty: &TypeRef, direction: Direction) -> Result<Value> {
        info!(type_name = %ty, direction = %direction, "Generating schema");
        let mut walker = self.walker(direction);
        let root = walker.walk(ty)?;
        let mut registry = walker.into_registry();
        self.share_object_root(&root, &mut registry)?;
        Renderer::new(&registry).document(&root)
    }

    fn build_tool_input(&self, tool: &ToolDescriptor) -> Result<Value> {
        info!(tool = %tool.name, parameters = tool.parameters.len(), "Generating tool input schema");
        let mut walker = self.walker(Direction::Input);
        let root = walker.with_scope(&tool.type_parameters, |walker| {
            let mut properties = IndexMap::new();
            let mut required = Vec::new();
            for parameter in &tool.parameters {
                let name = parameter
                    .markers
                    .rename
                    .clone()
                    .unwrap_or_else(|| parameter.name.clone());
                if properties.contains_key(&name) {
                    return Err(Error::invalid(
                        "tool parameters",
                        format!("{} declares parameter {name} twice", tool.name),
                    )
                    .into());
                }
                let node = walker.walk_member(
                    &format!("{}.{name}", tool.name),
                    &parameter.ty,
                    parameter.markers.description.clone(),
                    parameter.markers.schema.as_deref(),
                )?;
                required.push(name.clone());
                properties.insert(name, node);
            }
            Ok(SchemaNode::object(properties, required))
        })?;
        let registry = walker.into_registry();
        Renderer::new(&registry).document(&root)
    }

    fn build_tool_output(&self, tool: &ToolDescriptor) -> Result<Option<Value>> {
        let Some(returns) = &tool.returns else {
            debug!(tool = %tool.name, "Tool returns nothing, no output schema");
            return Ok(None);
        };
        info!(tool = %tool.name, returns = %returns, "Generating tool output schema");
        let mut walker = self.walker(Direction::Output);
        let root = walker.with_scope(&tool.type_parameters, |walker| {
            walker.walk_member(
                &format!("{}.{RETURN_SITE}", tool.name),
                returns,
                tool.return_markers.description.clone(),
                tool.return_markers.schema.as_deref(),
            )
        })?;
        let mut registry = walker.into_registry();
        self.share_object_root(&root, &mut registry)?;
        Renderer::new(&registry).document(&root).map(Some)
    }

    /// Move an object root into `$defs` when other definitions are emitted there
    ///
    /// A root that refers to itself is already shared.
    fn share_object_root(&self, root: &SchemaNode, registry: &mut DefinitionRegistry) -> Result<()> {
        let Some(id) = root.definition() else {
            return Ok(());
        };
        let Some(DefinitionKey::Type(ty)) = registry.key(id) else {
            return Ok(());
        };
        if self.catalog.require_type(ty)?.kind == DefinitionKind::Enum {
            return Ok(());
        }
        if !registry.shared().is_empty() {
            debug!(definition = registry.base_name(id), "Object root joins shared definitions");
            registry.pin(id);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable, reason = "test assertions")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::ToolParameter;
    use crate::descriptor::TypeParameter;

    fn assembler(types: Value) -> SchemaAssembler {
        SchemaAssembler::new(TypeCatalog::from_value(json!({ "types": types })).unwrap())
    }

    fn ty(expression: &str) -> TypeRef { TypeRef::parse(expression).unwrap() }

    fn widget_catalog() -> Value {
        json!([
            { "name": "Widget", "kind": "record",
              "fields": [
                  { "name": "name", "type": "String" },
                  { "name": "children", "type": "List<Widget>" }
              ] }
        ])
    }

    fn widget_definition() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "children": { "type": "array", "items": { "$ref": "#/$defs/Widget" } }
            },
            "required": ["name", "children"]
        })
    }

    #[test]
    fn only_public_field_is_exposed() {
        let assembler = assembler(json!([
            { "name": "FieldVisibility",
              "fields": [
                  { "name": "publicField", "type": "String" },
                  { "name": "privateField", "type": "String", "visibility": "private" },
                  { "name": "protectedField", "type": "String", "visibility": "protected" },
                  { "name": "packageField", "type": "String", "visibility": "package",
                    "rename": "renamedPackageField" },
                  { "name": "excludedField", "type": "String", "exclude": true }
              ] }
        ]));
        let expected = json!({
            "type": "object",
            "properties": { "publicField": { "type": "string" } },
            "required": ["publicField"]
        });

        for direction in [Direction::Input, Direction::Output] {
            let schema = assembler.get_schema(&ty("FieldVisibility"), direction).unwrap();
            assert_eq!(schema, expected, "{direction}");
        }
    }

    #[test]
    fn get_reader_names_the_property_over_is_reader() {
        let assembler = assembler(json!([
            { "name": "Switches",
              "fields": [{ "name": "stringBoth", "type": "boolean", "visibility": "private" }],
              "methods": [
                  { "name": "isBool", "returns": "boolean" },
                  { "name": "setBool", "parameters": ["boolean"] },
                  { "name": "isStringBoth", "returns": "boolean", "rename": "renamedStringBoth" },
                  { "name": "getStringBoth", "returns": "boolean" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Switches"), Direction::Output).unwrap();

        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "stringBoth": { "type": "boolean" },
                    "bool": { "type": "boolean" }
                },
                "required": ["stringBoth", "bool"]
            })
        );
    }

    #[test]
    fn recursive_tool_types_share_one_definition() {
        let assembler = assembler(widget_catalog());
        let tool = ToolDescriptor::new("combineWidgets")
            .with_parameter(ToolParameter::new("widgetA", ty("Widget")))
            .with_parameter(ToolParameter::new("widgetB", ty("Widget")))
            .returning(ty("Widget"));

        let input = assembler.get_tool_input_schema(&tool).unwrap();
        let output = assembler.get_tool_output_schema(&tool).unwrap();

        assert_eq!(
            input,
            json!({
                "type": "object",
                "properties": {
                    "widgetA": { "$ref": "#/$defs/Widget" },
                    "widgetB": { "$ref": "#/$defs/Widget" }
                },
                "required": ["widgetA", "widgetB"],
                "$defs": { "Widget": widget_definition() }
            })
        );
        assert_eq!(
            output,
            Some(json!({
                "$ref": "#/$defs/Widget",
                "$defs": { "Widget": widget_definition() }
            }))
        );
    }

    #[test]
    fn self_reference_terminates_with_one_definition() {
        let assembler = assembler(widget_catalog());

        let schema = assembler.get_schema(&ty("Widget"), Direction::Input).unwrap();

        assert_eq!(
            schema,
            json!({
                "$ref": "#/$defs/Widget",
                "$defs": { "Widget": widget_definition() }
            })
        );
    }

    #[test]
    fn private_reader_drops_output_property_only() {
        let assembler = assembler(json!([
            { "name": "Account",
              "fields": [
                  { "name": "id", "type": "long" },
                  { "name": "secret", "type": "String" }
              ],
              "methods": [{ "name": "getSecret", "returns": "String", "visibility": "private" }] }
        ]));

        let input = assembler.get_schema(&ty("Account"), Direction::Input).unwrap();
        let output = assembler.get_schema(&ty("Account"), Direction::Output).unwrap();

        assert_eq!(
            input["properties"],
            json!({ "id": { "type": "integer" }, "secret": { "type": "string" } })
        );
        assert_eq!(output["properties"], json!({ "id": { "type": "integer" } }));
        assert_eq!(output["required"], json!(["id"]));
    }

    #[test]
    fn renamed_field_with_accessor_pair_is_one_property() {
        let assembler = assembler(json!([
            { "name": "Person",
              "fields": [{ "name": "age", "type": "int", "visibility": "private", "rename": "years" }],
              "methods": [
                  { "name": "getAge", "returns": "int" },
                  { "name": "setAge", "parameters": ["int"] }
              ] }
        ]));
        let expected = json!({
            "type": "object",
            "properties": { "years": { "type": "integer" } },
            "required": ["years"]
        });

        assert_eq!(assembler.get_schema(&ty("Person"), Direction::Input).unwrap(), expected);
        assert_eq!(assembler.get_schema(&ty("Person"), Direction::Output).unwrap(), expected);
    }

    #[test]
    fn two_bound_variable_is_all_of_and_shared() {
        let assembler = assembler(json!([
            { "name": "Named", "kind": "interface",
              "methods": [{ "name": "getName", "returns": "String" }] },
            { "name": "Sized", "kind": "interface",
              "methods": [{ "name": "getSize", "returns": "int" }] },
            { "name": "Holder",
              "typeParameters": [{ "name": "T", "bounds": ["Named", "Sized"] }],
              "fields": [
                  { "name": "first", "type": "$T" },
                  { "name": "second", "type": "$T" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Holder"), Direction::Output).unwrap();

        assert_eq!(
            schema,
            json!({
                "$ref": "#/$defs/Holder",
                "$defs": {
                    "Holder": {
                        "type": "object",
                        "properties": {
                            "first": { "$ref": "#/$defs/T" },
                            "second": { "$ref": "#/$defs/T" }
                        },
                        "required": ["first", "second"]
                    },
                    "T": {
                        "allOf": [
                            { "type": "object",
                              "properties": { "name": { "type": "string" } },
                              "required": ["name"] },
                            { "type": "object",
                              "properties": { "size": { "type": "integer" } },
                              "required": ["size"] }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn enum_keyed_map_lists_visible_literals() {
        let assembler = assembler(json!([
            { "name": "Color", "kind": "enum",
              "constants": [
                  { "name": "RED", "rename": "red" },
                  { "name": "GREEN" },
                  { "name": "HIDDEN", "exclude": true }
              ] },
            { "name": "Palette",
              "fields": [{ "name": "shades", "type": "Map<Color, Integer>" }] }
        ]));

        let schema = assembler.get_schema(&ty("Palette"), Direction::Input).unwrap();

        assert_eq!(
            schema["properties"]["shades"],
            json!({
                "type": "object",
                "additionalProperties": { "type": "integer" },
                "propertyNames": { "type": "string", "enum": ["red", "GREEN"] }
            })
        );
    }

    #[test]
    fn enum_root_is_inlined() {
        let assembler = assembler(json!([
            { "name": "Color", "kind": "enum", "description": "paint colors",
              "constants": [{ "name": "RED" }, { "name": "GREEN" }] }
        ]));

        let schema = assembler.get_schema(&ty("Color"), Direction::Output).unwrap();

        assert_eq!(
            schema,
            json!({ "type": "string", "description": "paint colors", "enum": ["RED", "GREEN"] })
        );
    }

    #[test]
    fn permuted_map_supertype_resolves_value_schema() {
        let assembler = assembler(json!([
            { "name": "StupidMap", "kind": "interface",
              "typeParameters": [{ "name": "V" }, { "name": "K" }],
              "interfaces": ["Map<$K, $V>"] }
        ]));

        let schema = assembler
            .schema_for("StupidMap<Integer, String>", Direction::Output)
            .unwrap();

        assert_eq!(
            schema,
            json!({ "type": "object", "additionalProperties": { "type": "integer" } })
        );
    }

    #[test]
    fn optional_members_are_not_required() {
        let assembler = assembler(json!([
            { "name": "Profile", "kind": "record",
              "fields": [
                  { "name": "handle", "type": "String" },
                  { "name": "nickname", "type": "Optional<String>" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Profile"), Direction::Input).unwrap();

        assert_eq!(schema["properties"]["nickname"], json!({ "type": "string" }));
        assert_eq!(schema["required"], json!(["handle"]));
    }

    #[test]
    fn wildcards_take_upper_bound_or_object() {
        let assembler = assembler(json!([
            { "name": "Part", "kind": "record", "fields": [{ "name": "id", "type": "int" }] },
            { "name": "Bag",
              "fields": [
                  { "name": "parts", "type": "List<? extends Part>" },
                  { "name": "anything", "type": "List<?>" },
                  { "name": "sink", "type": "List<? super Part>" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Bag"), Direction::Output).unwrap();

        assert_eq!(
            schema["properties"],
            json!({
                "parts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "id": { "type": "integer" } },
                        "required": ["id"]
                    }
                },
                "anything": { "type": "array", "items": { "type": "object" } },
                "sink": { "type": "array", "items": { "type": "object" } }
            })
        );
    }

    #[test]
    fn nested_arrays_add_one_layer_per_dimension() {
        let assembler = assembler(json!([]));

        let schema = assembler.schema_for("List<String[]>[]", Direction::Input).unwrap();

        assert_eq!(
            schema,
            json!({
                "type": "array",
                "items": {
                    "type": "array",
                    "items": { "type": "array", "items": { "type": "string" } }
                }
            })
        );
    }

    #[test]
    fn literal_pointer_emits_named_definition() {
        let assembler = assembler(json!([
            { "name": "person", "kind": "record",
              "fields": [{ "name": "fullname", "type": "String" }] },
            { "name": "Team",
              "fields": [{
                  "name": "members",
                  "type": "List<Object>",
                  "description": "team members",
                  "schema": "{ \"type\": \"array\", \"items\": { \"$ref\": \"#/$defs/person\" } }"
              }] }
        ]));

        let schema = assembler.get_schema(&ty("Team"), Direction::Output).unwrap();

        assert_eq!(
            schema,
            json!({
                "$ref": "#/$defs/Team",
                "$defs": {
                    "Team": {
                        "type": "object",
                        "properties": {
                            "members": {
                                "type": "array",
                                "description": "team members",
                                "items": { "$ref": "#/$defs/person" }
                            }
                        },
                        "required": ["members"]
                    },
                    "person": {
                        "type": "object",
                        "properties": { "fullname": { "type": "string" } },
                        "required": ["fullname"]
                    }
                }
            })
        );
    }

    #[test]
    fn colliding_simple_names_are_suffixed() {
        let assembler = assembler(json!([
            { "name": "a.Widget", "fields": [{ "name": "id", "type": "int" }] },
            { "name": "b.Widget", "fields": [{ "name": "label", "type": "String" }] },
            { "name": "Pair",
              "fields": [
                  { "name": "left", "type": "a.Widget" },
                  { "name": "right", "type": "a.Widget" },
                  { "name": "other", "type": "b.Widget" },
                  { "name": "another", "type": "b.Widget" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Pair"), Direction::Input).unwrap();

        assert_eq!(
            schema["$defs"]["Pair"]["properties"],
            json!({
                "left": { "$ref": "#/$defs/Widget" },
                "right": { "$ref": "#/$defs/Widget" },
                "other": { "$ref": "#/$defs/Widget2" },
                "another": { "$ref": "#/$defs/Widget2" }
            })
        );
        assert_eq!(
            schema["$defs"]["Widget2"]["properties"],
            json!({ "label": { "type": "string" } })
        );
    }

    #[test]
    fn suffixed_literal_pointer_names_the_later_definition() {
        let assembler = assembler(json!([
            { "name": "a.Widget", "fields": [{ "name": "id", "type": "int" }] },
            { "name": "b.Widget", "fields": [{ "name": "label", "type": "String" }] },
            { "name": "Pair",
              "fields": [
                  { "name": "left", "type": "a.Widget" },
                  { "name": "right", "type": "b.Widget" },
                  { "name": "favourite", "type": "String",
                    "schema": "{ \"$ref\": \"#/$defs/Widget2\" }" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Pair"), Direction::Input).unwrap();

        let properties = &schema["$defs"]["Pair"]["properties"];
        assert_eq!(properties["left"]["properties"], json!({ "id": { "type": "integer" } }));
        assert_eq!(properties["right"], json!({ "$ref": "#/$defs/Widget" }));
        assert_eq!(properties["favourite"], json!({ "$ref": "#/$defs/Widget" }));
        assert_eq!(
            schema["$defs"]["Widget"]["properties"],
            json!({ "label": { "type": "string" } })
        );
    }

    #[test]
    fn self_expanding_generic_terminates() {
        let assembler = assembler(json!([
            { "name": "Nest",
              "typeParameters": [{ "name": "T" }],
              "fields": [
                  { "name": "value", "type": "$T" },
                  { "name": "inner", "type": "Nest<List<$T>>" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Nest<String>"), Direction::Output).unwrap();

        assert_eq!(
            schema,
            json!({
                "$ref": "#/$defs/Nest",
                "$defs": {
                    "Nest": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "string" },
                            "inner": { "$ref": "#/$defs/Nest2" }
                        },
                        "required": ["value", "inner"]
                    },
                    "Nest2": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "object" },
                            "inner": { "$ref": "#/$defs/Nest2" }
                        },
                        "required": ["value", "inner"]
                    }
                }
            })
        );
    }

    #[test]
    fn nested_instantiations_of_one_generic_stay_precise() {
        let assembler = assembler(json!([
            { "name": "Wrapper",
              "typeParameters": [{ "name": "T" }],
              "fields": [{ "name": "value", "type": "$T" }] }
        ]));

        let schema = assembler
            .schema_for("Wrapper<Wrapper<String>>", Direction::Output)
            .unwrap();

        assert_eq!(
            schema["properties"]["value"]["properties"]["value"],
            json!({ "type": "string" })
        );
    }

    #[test]
    fn ref_site_description_differs_from_definition() {
        let assembler = assembler(json!([
            { "name": "Address", "kind": "record", "description": "postal address",
              "fields": [{ "name": "street", "type": "String" }] },
            { "name": "Customer", "kind": "record",
              "fields": [
                  { "name": "home", "type": "Address", "description": "where they live" },
                  { "name": "work", "type": "Address" }
              ] }
        ]));

        let schema = assembler.get_schema(&ty("Customer"), Direction::Output).unwrap();

        assert_eq!(
            schema["$defs"]["Customer"]["properties"],
            json!({
                "home": { "$ref": "#/$defs/Address", "description": "where they live" },
                "work": { "$ref": "#/$defs/Address" }
            })
        );
        assert_eq!(schema["$defs"]["Address"]["description"], json!("postal address"));
    }

    #[test]
    fn repeated_requests_are_identical_and_cached() {
        let assembler = assembler(widget_catalog());

        let first = assembler.get_schema(&ty("Widget"), Direction::Output).unwrap();
        let second = assembler.get_schema(&ty("Widget"), Direction::Output).unwrap();

        assert_eq!(first, second);
        assert_eq!(assembler.cached_documents(), 1);
    }

    #[test]
    fn disabled_cache_still_yields_identical_documents() {
        let catalog = TypeCatalog::from_value(json!({ "types": widget_catalog() })).unwrap();
        let assembler = SchemaAssembler::with_config(catalog, EngineConfig::default().without_cache());

        let first = assembler.get_schema(&ty("Widget"), Direction::Input).unwrap();
        let second = assembler.get_schema(&ty("Widget"), Direction::Input).unwrap();

        assert_eq!(first, second);
        assert_eq!(assembler.cached_documents(), 0);
    }

    #[test]
    fn function_member_is_unsupported() {
        let assembler = assembler(json!([
            { "name": "Task", "fields": [{ "name": "callback", "type": "Function<String, int>" }] }
        ]));

        let error = assembler.get_schema(&ty("Task"), Direction::Input).unwrap_err();

        let Error::UnsupportedType { site, .. } = error.current_context() else {
            unreachable!("expected an unsupported type error");
        };
        assert_eq!(site, "callback");
    }

    #[test]
    fn object_map_key_is_unsupported() {
        let assembler = assembler(json!([
            { "name": "Part", "kind": "record", "fields": [{ "name": "id", "type": "int" }] },
            { "name": "Inventory", "fields": [{ "name": "counts", "type": "Map<Part, Integer>" }] }
        ]));

        let error = assembler.get_schema(&ty("Inventory"), Direction::Output).unwrap_err();

        assert!(error.current_context().is_unsupported());
    }

    #[test]
    fn malformed_override_literal_is_configuration_error() {
        let assembler = assembler(json!([
            { "name": "Broken", "fields": [{ "name": "value", "type": "String", "schema": "{ nope" }] }
        ]));

        let error = assembler.get_schema(&ty("Broken"), Direction::Output).unwrap_err();

        assert!(error.current_context().is_configuration());
        assert_eq!(assembler.cached_documents(), 0);
    }

    #[test]
    fn tool_type_parameters_bound_their_variables() {
        let assembler = assembler(json!([
            { "name": "Part", "kind": "record", "fields": [{ "name": "id", "type": "int" }] }
        ]));
        let tool = ToolDescriptor::new("inspect")
            .with_type_parameter(TypeParameter {
                name:   "P".to_string(),
                bounds: vec![ty("Part")],
            })
            .with_parameter(ToolParameter::new("part", ty("$P")).with_description("part to inspect"));

        let input = assembler.get_tool_input_schema(&tool).unwrap();

        assert_eq!(
            input,
            json!({
                "type": "object",
                "properties": {
                    "part": {
                        "type": "object",
                        "description": "part to inspect",
                        "properties": { "id": { "type": "integer" } },
                        "required": ["id"]
                    }
                },
                "required": ["part"]
            })
        );
    }

    #[test]
    fn same_named_tools_get_their_own_documents() {
        let assembler = assembler(json!([]));
        let by_id = ToolDescriptor::new("lookup")
            .with_parameter(ToolParameter::new("id", ty("int")))
            .returning(ty("String"));
        let by_name = ToolDescriptor::new("lookup")
            .with_parameter(ToolParameter::new("name", ty("String")))
            .returning(ty("int"));

        assert_eq!(
            assembler.get_tool_input_schema(&by_id).unwrap()["required"],
            json!(["id"])
        );
        assert_eq!(
            assembler.get_tool_input_schema(&by_name).unwrap(),
            json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            })
        );
        assert_eq!(
            assembler.get_tool_output_schema(&by_name).unwrap(),
            Some(json!({ "type": "integer" }))
        );
        assert_eq!(
            assembler.get_tool_output_schema(&by_id).unwrap(),
            Some(json!({ "type": "string" }))
        );
        assert_eq!(assembler.cached_documents(), 4);
    }

    #[test]
    fn listing_skips_output_of_void_tools() {
        let assembler = assembler(json!([]));
        let tools = [
            ToolDescriptor::new("reset"),
            ToolDescriptor::new("count")
                .with_parameter(ToolParameter::new("prefix", ty("String")))
                .returning(ty("int")),
        ];

        let listing = assembler.list_tools(&tools).unwrap();

        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!([
                { "name": "reset", "inputSchema": { "type": "object", "properties": {} } },
                { "name": "count",
                  "inputSchema": {
                      "type": "object",
                      "properties": { "prefix": { "type": "string" } },
                      "required": ["prefix"]
                  },
                  "outputSchema": { "type": "integer" } }
            ])
        );
    }
}
