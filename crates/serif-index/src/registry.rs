//! IndexRegistry: every loaded index keyed by (kind, scope).
//!
//! Built once at startup and read-only afterwards. Missing directories or
//! files leave the scope absent; a present but malformed artifact fails the
//! load.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serif_core::config::IndexConfig;
use serif_core::errors::SerifResult;
use serif_core::models::{IndexKind, ScopeId};
use serif_observability::events;
use tracing::info;

use crate::scoped::ScopedVectorIndex;

/// Kinds served from the per-scope directories.
const SCOPED_KINDS: [IndexKind; 2] = [IndexKind::Match, IndexKind::Reply];

/// Read-only map from (kind, scope) to index.
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indexes: BTreeMap<(IndexKind, ScopeId), Arc<ScopedVectorIndex>>,
    default_scope: ScopeId,
}

/// Assembles an [`IndexRegistry`].
#[derive(Debug, Default)]
pub struct IndexRegistryBuilder {
    indexes: BTreeMap<(IndexKind, ScopeId), Arc<ScopedVectorIndex>>,
    default_scope: ScopeId,
}

impl IndexRegistryBuilder {
    pub fn default_scope(mut self, scope: ScopeId) -> Self {
        self.default_scope = scope;
        self
    }

    pub fn insert(mut self, scope: ScopeId, index: ScopedVectorIndex) -> Self {
        self.indexes.insert((index.kind(), scope), Arc::new(index));
        self
    }

    pub fn build(self) -> IndexRegistry {
        IndexRegistry {
            indexes: self.indexes,
            default_scope: self.default_scope,
        }
    }
}

impl IndexRegistry {
    pub fn builder() -> IndexRegistryBuilder {
        IndexRegistryBuilder::default()
    }

    /// Load every configured index.
    ///
    /// Match and reply indexes come from each scope directory; the scene
    /// index is registered under `default_scope`.
    pub fn load(config: &IndexConfig, default_scope: ScopeId) -> SerifResult<Self> {
        let mut builder = Self::builder().default_scope(default_scope);

        for scope_dir in &config.scopes {
            let scope = ScopeId(scope_dir.id);
            for kind in SCOPED_KINDS {
                if let Some(index) = open_if_present(kind, scope, &scope_dir.dir)? {
                    builder = builder.insert(scope, index);
                }
            }
        }
        if let Some(index) = open_if_present(IndexKind::Scene, default_scope, &config.scene_dir)? {
            builder = builder.insert(default_scope, index);
        }

        let registry = builder.build();
        info!(
            indexes = registry.len(),
            default_scope = %registry.default_scope,
            "index registry loaded"
        );
        Ok(registry)
    }

    pub fn default_scope(&self) -> ScopeId {
        self.default_scope
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, kind: IndexKind, scope: ScopeId) -> Option<&Arc<ScopedVectorIndex>> {
        self.indexes.get(&(kind, scope))
    }

    /// Index for `(kind, scope)`, falling back to the default scope.
    ///
    /// Returns the scope actually served alongside the index, or `None` when
    /// neither exists.
    pub fn resolve(
        &self,
        kind: IndexKind,
        scope: ScopeId,
    ) -> Option<(ScopeId, &Arc<ScopedVectorIndex>)> {
        if let Some(index) = self.get(kind, scope) {
            return Some((scope, index));
        }
        let index = self.get(kind, self.default_scope)?;
        events::scope_fallback(kind.as_str(), scope.0, self.default_scope.0);
        Some((self.default_scope, index))
    }

    /// (kind, scope, logical size) for every loaded index.
    pub fn summary(&self) -> Vec<(IndexKind, ScopeId, usize)> {
        self.indexes
            .iter()
            .map(|(&(kind, scope), index)| (kind, scope, index.logical_size()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

fn open_if_present(
    kind: IndexKind,
    scope: ScopeId,
    dir: &Path,
) -> SerifResult<Option<ScopedVectorIndex>> {
    let index_path = dir.join(kind.index_file());
    let meta_path = dir.join(kind.meta_file());
    for path in [dir, index_path.as_path(), meta_path.as_path()] {
        if !path.exists() {
            events::scope_missing(kind.as_str(), scope.0, &path.display().to_string());
            return Ok(None);
        }
    }

    let index = ScopedVectorIndex::open(kind, &index_path, &meta_path)?;
    events::index_loaded(
        kind.as_str(),
        scope.0,
        index.vector_count(),
        index.logical_size(),
    );
    Ok(Some(index))
}
