//! Warm cache of finished documents
//!
//! Documents are published once per key and never replaced or removed, so
//! concurrent requests may race to build the same document but always read
//! the first published copy afterwards.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use strum_macros::AsRefStr;
use tracing::trace;

use crate::descriptor::ToolDescriptor;
use crate::descriptor::TypeRef;
use crate::error::Result;
use crate::member_selector::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Hash, AsRefStr)]
pub enum CacheKey {
    /// Whole-type document
    Schema(TypeRef, Direction),
    /// Input document of a tool, keyed by the whole descriptor
    ToolInput(Box<ToolDescriptor>),
    /// Output document of a tool; `None` for void tools
    ToolOutput(Box<ToolDescriptor>),
}

#[derive(Debug, Default)]
pub struct SchemaCache {
    documents: DashMap<CacheKey, Option<Arc<Value>>>,
}

impl SchemaCache {
    pub fn new() -> Self { Self::default() }

    /// Return the published document for `key`, building and publishing it on a miss
    pub fn get_or_build(
        &self,
        key: CacheKey,
        build: impl FnOnce() -> Result<Option<Value>>,
    ) -> Result<Option<Arc<Value>>> {
        if let Some(document) = self.documents.get(&key) {
            trace!(kind = key.as_ref(), key = ?key, "Schema cache hit");
            return Ok(document.value().clone());
        }
        let document = build()?.map(Arc::new);
        Ok(self.documents.entry(key).or_insert(document).value().clone())
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}
