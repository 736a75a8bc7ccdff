//! Plan and apply a generation request.
//!
//! [`plan`] reads every file it needs and computes every patch up front, so a
//! missing or malformed file fails before anything is written. [`apply`] then
//! performs the filesystem steps in order.

use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::patch;
use crate::paths;
use crate::project;
use crate::request::GenerationRequest;
use crate::types::Mode;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Create `folder` (one level) and seed `<file_name>.js` if missing.
    EnsureFile {
        folder: PathBuf,
        file_name: String,
        default_content: String,
    },
    /// Replace the file at `path` with `content`.
    Write { path: PathBuf, content: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub request: GenerationRequest,
    pub steps: Vec<Step>,
}

/// What [`apply`] changed, with paths relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub created: Vec<PathBuf>,
    pub patched: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

pub fn plan(root: &Path, config: &Config, request: &GenerationRequest) -> Result<GenerationPlan> {
    project::ensure_api_exists(root, config, request.api_name())?;

    let api = request.api_name();
    let route = request.route();
    let target = request.target(root, config);
    let patch_path = request.patch_path(root, config);
    let label = relative(root, &patch_path).display().to_string();
    tracing::debug!(mode = %request.mode(), file = %label, "planning");

    let current = match request.mode() {
        Mode::GlobalPolicy | Mode::ApiPolicy => io::read_required(&patch_path)?,
        // The target file is seeded with its default body when missing.
        Mode::Lifecycle | Mode::Route if patch_path.is_file() => {
            std::fs::read_to_string(&patch_path)?
        }
        Mode::Lifecycle | Mode::Route => target.default_content.clone(),
    };

    let patched = match request.mode() {
        Mode::GlobalPolicy | Mode::ApiPolicy => {
            let policy = request.policy_reference().unwrap_or_default();
            patch::add_route_policy(&current, &label, api, route, &policy)?
        }
        Mode::Lifecycle => patch::add_lifecycle(&current, &label, route)?,
        Mode::Route => patch::add_custom_route(&current, &label, api, route)?,
    };

    let mut steps = vec![
        Step::EnsureFile {
            folder: target.folder.clone(),
            file_name: target.file_name.clone(),
            default_content: target.default_content.clone(),
        },
        Step::Write {
            path: patch_path,
            content: patched,
        },
    ];

    if request.mode() == Mode::Route {
        let controller = paths::controller_path(root, config, api);
        let controller_label = relative(root, &controller).display().to_string();
        let source = io::read_required(&controller)?;
        let updated = patch::add_controller_action(&source, &controller_label, api, route)?;
        if updated != source {
            steps.push(Step::Write {
                path: controller,
                content: updated,
            });
        }
    }

    Ok(GenerationPlan {
        request: request.clone(),
        steps,
    })
}

// ---------------------------------------------------------------------------
// Applying
// ---------------------------------------------------------------------------

pub fn apply(root: &Path, plan: &GenerationPlan) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();
    for step in &plan.steps {
        match step {
            Step::EnsureFile {
                folder,
                file_name,
                default_content,
            } => {
                if io::ensure_file(folder, file_name, default_content)? {
                    let path = folder.join(format!("{file_name}.js"));
                    report.created.push(relative(root, &path));
                }
            }
            Step::Write { path, content } => {
                io::atomic_write(path, content.as_bytes())?;
                tracing::info!(path = %path.display(), "patched");
                report.patched.push(relative(root, path));
            }
        }
    }
    Ok(report)
}

/// Plan and apply in one go.
pub fn generate(
    root: &Path,
    config: &Config,
    request: &GenerationRequest,
) -> Result<GenerationReport> {
    let plan = plan(root, config, request)?;
    apply(root, &plan)
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
