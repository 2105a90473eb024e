//! Memoization of compiled schemas per template.

use crate::CompiledSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Cache of compiled schemas keyed by template id.
///
/// The same template is validated against repeatedly across languages and
/// sites, so compilation happens once per template per process.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    compiled: Arc<RwLock<HashMap<Uuid, Arc<CompiledSchema>>>>,
}

impl SchemaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled schema for a template, compiling on first use.
    pub fn get_or_compile(&self, template_id: Uuid, schema: &Value) -> Arc<CompiledSchema> {
        if let Ok(guard) = self.compiled.read()
            && let Some(compiled) = guard.get(&template_id)
        {
            return Arc::clone(compiled);
        }

        let compiled = Arc::new(CompiledSchema::compile(schema));
        if let Ok(mut guard) = self.compiled.write() {
            guard.insert(template_id, Arc::clone(&compiled));
        }
        compiled
    }

    /// Drops a cached entry, e.g. after a template edit.
    pub fn invalidate(&self, template_id: Uuid) {
        if let Ok(mut guard) = self.compiled.write() {
            guard.remove(&template_id);
        }
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.compiled.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
