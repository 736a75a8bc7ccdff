//! One generation request and the files it resolves to.
//!
//! Resolution is pure: folder, file name and default body are functions of
//! the mode and API name only. Nothing here touches the filesystem.

use crate::config::Config;
use crate::error::{GenError, Result};
use crate::paths;
use crate::template;
use crate::types::{Mode, CORE_ROUTES, LIFECYCLE_EVENTS};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// A validated request. Fields are private so an instance always satisfies
/// the per-mode rules checked in [`GenerationRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    api_name: String,
    mode: Mode,
    policy_name: Option<String>,
    route: String,
}

impl GenerationRequest {
    pub fn new(
        api_name: impl Into<String>,
        mode: Mode,
        policy_name: Option<String>,
        route: impl Into<String>,
    ) -> Result<Self> {
        let api_name = api_name.into();
        let route = route.into();
        paths::validate_api_name(&api_name)?;

        if route.is_empty() {
            return Err(GenError::MissingRoute);
        }

        let policy_name = match mode {
            Mode::GlobalPolicy | Mode::ApiPolicy => {
                let name = policy_name.unwrap_or_default();
                paths::validate_policy_name(&name)?;
                if !CORE_ROUTES.contains(&route.as_str()) {
                    return Err(GenError::UnknownCoreRoute(route));
                }
                Some(name)
            }
            Mode::Lifecycle => {
                if !LIFECYCLE_EVENTS.contains(&route.as_str()) {
                    return Err(GenError::UnknownLifecycleEvent(route));
                }
                None
            }
            Mode::Route => {
                if !paths::is_identifier(&route) {
                    return Err(GenError::InvalidCustomRoute(route));
                }
                None
            }
        };

        Ok(Self {
            api_name,
            mode,
            policy_name,
            route,
        })
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn policy_name(&self) -> Option<&str> {
        self.policy_name.as_deref()
    }

    /// Core route, lifecycle event, or custom route name depending on mode.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// How the policy is referenced from a route config, e.g. `global::is-admin`.
    pub fn policy_reference(&self) -> Option<String> {
        let name = self.policy_name.as_deref()?;
        Some(match self.mode {
            Mode::GlobalPolicy => format!("global::{name}"),
            _ => name.to_string(),
        })
    }

    /// Folder, file name and default body of the file this request creates.
    pub fn target(&self, root: &Path, config: &Config) -> TargetFile {
        let api = self.api_name.as_str();
        let api_dir = paths::api_dir(root, config, api);
        let policy = self.policy_name.clone().unwrap_or_default();
        match self.mode {
            Mode::GlobalPolicy => TargetFile {
                folder: paths::global_policies_dir(root, config),
                file_name: policy,
                default_content: template::policy(&config.admin_role),
            },
            Mode::ApiPolicy => TargetFile {
                folder: api_dir.join(paths::POLICIES_DIR),
                file_name: policy,
                default_content: template::policy(&config.admin_role),
            },
            Mode::Lifecycle => TargetFile {
                folder: api_dir.join(paths::CONTENT_TYPES_DIR).join(api),
                file_name: paths::LIFECYCLES_FILE.to_string(),
                default_content: template::EMPTY_LIFECYCLES.to_string(),
            },
            Mode::Route => TargetFile {
                folder: api_dir.join(paths::ROUTES_DIR),
                file_name: paths::custom_routes_name(api),
                default_content: template::EMPTY_ROUTES.to_string(),
            },
        }
    }

    /// The file whose text gets patched: the core router for policies, the
    /// target file itself otherwise.
    pub fn patch_path(&self, root: &Path, config: &Config) -> PathBuf {
        if self.mode.is_policy() {
            paths::core_router_path(root, config, &self.api_name)
        } else {
            self.target(root, config).path()
        }
    }
}

// ---------------------------------------------------------------------------
// TargetFile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFile {
    pub folder: PathBuf,
    /// File name without the `.js` extension.
    pub file_name: String,
    pub default_content: String,
}

impl TargetFile {
    pub fn path(&self) -> PathBuf {
        self.folder.join(format!("{}.js", self.file_name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
