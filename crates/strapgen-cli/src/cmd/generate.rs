use crate::output::print_json;
use crate::prompt;
use anyhow::Context;
use clap::Args;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use strapgen_core::{
    config::Config,
    generate::{self, GenerationPlan, Step},
    project,
    request::GenerationRequest,
    types::Mode,
    GenError,
};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// API folder under src/api
    #[arg(long)]
    pub api: Option<String>,

    /// What to generate: gp (global policy), p (api policy), l (lifecycle), r (route)
    #[arg(long)]
    pub select: Option<String>,

    /// Policy name (policy modes only)
    #[arg(long)]
    pub name: Option<String>,

    /// Core route, lifecycle event, or custom route name
    #[arg(long)]
    pub route: Option<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub struct RunOptions {
    pub json: bool,
    pub interactive: bool,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, args: GenerateArgs, opts: RunOptions) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let interactive = opts.interactive && std::io::stdin().is_terminal();

    let request = collect_request(
        root,
        &config,
        args.api,
        args.select,
        args.name,
        args.route,
        interactive,
    )?;
    tracing::debug!(?request, "collected request");

    let plan = generate::plan(root, &config, &request)?;

    if args.dry_run {
        return show_plan(root, &plan, opts.json);
    }

    let report = generate::apply(root, &plan)
        .with_context(|| format!("failed to write changes for '{}'", request.api_name()))?;

    if opts.json {
        print_json(&serde_json::json!({
            "api": request.api_name(),
            "mode": request.mode(),
            "route": request.route(),
            "created": report.created,
            "patched": report.patched,
        }))?;
    } else {
        for path in &report.created {
            println!("Created {}", path.display());
        }
        for path in &report.patched {
            println!("Patched {}", path.display());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument collection
// ---------------------------------------------------------------------------

/// Flags win; anything missing is prompted for when `interactive`.
fn collect_request(
    root: &Path,
    config: &Config,
    api: Option<String>,
    select: Option<String>,
    name: Option<String>,
    route: Option<String>,
    interactive: bool,
) -> anyhow::Result<GenerationRequest> {
    let api = match api {
        Some(api) => api,
        None if interactive => prompt::api(&project::list_apis(root, config)?)?,
        None => return Err(GenError::MissingApiName.into()),
    };
    if api.trim().is_empty() {
        return Err(GenError::MissingApiName.into());
    }

    let mode: Mode = match select {
        Some(tag) => tag.parse()?,
        None if interactive => prompt::mode()?,
        None => return Err(GenError::MissingMode.into()),
    };

    project::ensure_api_exists(root, config, &api)?;

    let route = match route {
        Some(route) => route,
        None if interactive => prompt::route(mode)?,
        None => String::new(),
    };

    let name = match name {
        Some(name) => Some(name),
        None if interactive && mode.is_policy() => Some(prompt::policy_name()?),
        None => None,
    };

    Ok(GenerationRequest::new(api, mode, name, route)?)
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

fn show_plan(root: &Path, plan: &GenerationPlan, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(plan);
    }
    for step in &plan.steps {
        match step {
            Step::EnsureFile {
                folder, file_name, ..
            } => {
                let path = folder.join(format!("{file_name}.js"));
                if path.exists() {
                    println!("keep   {}", relative(root, &path).display());
                } else {
                    println!("create {}", relative(root, &path).display());
                }
            }
            Step::Write { path, content } => {
                println!("patch  {}", relative(root, path).display());
                for line in content.lines() {
                    println!("    {line}");
                }
            }
        }
    }
    Ok(())
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
