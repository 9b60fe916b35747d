use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// A named content collection (one franchise, one studio catalogue, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// Scope consulted when the requested one has no index.
    pub const DEFAULT: ScopeId = ScopeId(defaults::DEFAULT_SCOPE);
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for ScopeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
