use crate::config::Config;
use crate::error::{GenError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const API_DIR: &str = "src/api";
pub const GLOBAL_POLICIES_DIR: &str = "src/policies";
pub const CONFIG_FILE: &str = ".strapgen.yaml";

pub const POLICIES_DIR: &str = "policies";
pub const ROUTES_DIR: &str = "routes";
pub const CONTROLLERS_DIR: &str = "controllers";
pub const CONTENT_TYPES_DIR: &str = "content-types";

pub const LIFECYCLES_FILE: &str = "lifecycles";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn api_root(root: &Path, config: &Config) -> PathBuf {
    root.join(&config.api_dir)
}

pub fn api_dir(root: &Path, config: &Config, api: &str) -> PathBuf {
    api_root(root, config).join(api)
}

pub fn global_policies_dir(root: &Path, config: &Config) -> PathBuf {
    root.join(&config.policies_dir)
}

/// `src/api/<api>/routes/<api>.js`, the file holding `createCoreRouter`.
pub fn core_router_path(root: &Path, config: &Config, api: &str) -> PathBuf {
    api_dir(root, config, api)
        .join(ROUTES_DIR)
        .join(format!("{api}.js"))
}

/// `src/api/<api>/controllers/<api>.js`
pub fn controller_path(root: &Path, config: &Config, api: &str) -> PathBuf {
    api_dir(root, config, api)
        .join(CONTROLLERS_DIR)
        .join(format!("{api}.js"))
}

/// Unique identifier Strapi assigns to the API's content type.
pub fn api_uid(api: &str) -> String {
    format!("api::{api}.{api}")
}

pub fn custom_routes_name(api: &str) -> String {
    format!("custom-{api}")
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static IDENT_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_\-]*$").unwrap())
}

fn ident_re() -> &'static Regex {
    IDENT_RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap())
}

pub fn validate_api_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenError::MissingApiName);
    }
    if name.len() > 128 || !name_re().is_match(name) {
        return Err(GenError::InvalidApiName(name.to_string()));
    }
    Ok(())
}

pub fn validate_policy_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenError::MissingPolicyName);
    }
    if name.len() > 128 || !name_re().is_match(name) {
        return Err(GenError::InvalidPolicyName(name.to_string()));
    }
    Ok(())
}

/// True if `name` can be used as a JavaScript method name without quoting.
pub fn is_identifier(name: &str) -> bool {
    ident_re().is_match(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
