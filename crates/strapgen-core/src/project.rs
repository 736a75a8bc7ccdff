use crate::config::Config;
use crate::error::{GenError, Result};
use crate::paths;
use std::path::Path;

/// Names of the API folders under the project's API root, sorted.
pub fn list_apis(root: &Path, config: &Config) -> Result<Vec<String>> {
    let api_root = paths::api_root(root, config);
    if !api_root.is_dir() {
        return Err(GenError::MissingFile(api_root.display().to_string()));
    }
    let mut apis = Vec::new();
    for entry in std::fs::read_dir(&api_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            apis.push(name.to_string());
        }
    }
    apis.sort();
    Ok(apis)
}

pub fn ensure_api_exists(root: &Path, config: &Config, api: &str) -> Result<()> {
    paths::validate_api_name(api)?;
    if !paths::api_dir(root, config, api).is_dir() {
        return Err(GenError::ApiNotFound(api.to_string()));
    }
    Ok(())
}
