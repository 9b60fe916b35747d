use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Directory holding the match/reply indexes of one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDir {
    pub id: u32,
    pub dir: PathBuf,
}

/// Where the on-disk index artifacts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory of the scene (image) index.
    pub scene_dir: PathBuf,
    /// URL prefix under which image files are served.
    pub image_url_prefix: String,
    pub scopes: Vec<ScopeDir>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            scene_dir: PathBuf::from(defaults::DEFAULT_SCENE_DIR),
            image_url_prefix: defaults::DEFAULT_IMAGE_URL_PREFIX.to_string(),
            scopes: vec![
                ScopeDir {
                    id: 1,
                    dir: PathBuf::from(defaults::DEFAULT_SCOPE_1_DIR),
                },
                ScopeDir {
                    id: 2,
                    dir: PathBuf::from(defaults::DEFAULT_SCOPE_2_DIR),
                },
            ],
        }
    }
}

impl IndexConfig {
    /// Point `scope` at `dir`, adding the scope if it is not configured yet.
    pub fn set_scope_dir(&mut self, scope: u32, dir: PathBuf) {
        match self.scopes.iter_mut().find(|s| s.id == scope) {
            Some(entry) => entry.dir = dir,
            None => self.scopes.push(ScopeDir { id: scope, dir }),
        }
    }
}
