use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Workspace resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Fixed workspace root (None = derive from the focused file's folder).
    #[serde(default)]
    pub root: Option<PathBuf>,
}
