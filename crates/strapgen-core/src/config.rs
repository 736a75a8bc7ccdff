use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-level settings read from `.strapgen.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one folder per API, relative to the project root.
    #[serde(default = "default_api_dir")]
    pub api_dir: String,
    /// Directory holding global policies.
    #[serde(default = "default_policies_dir")]
    pub policies_dir: String,
    /// Role allowed through by freshly generated policies.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

fn default_api_dir() -> String {
    paths::API_DIR.to_string()
}

fn default_policies_dir() -> String {
    paths::GLOBAL_POLICIES_DIR.to_string()
}

fn default_admin_role() -> String {
    "Administrator".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_dir: default_api_dir(),
            policies_dir: default_policies_dir(),
            admin_role: default_admin_role(),
        }
    }
}

impl Config {
    /// Load the config at `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
