use crate::output::print_json;
use anyhow::Context;
use strapgen_core::{config::Config, project};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let apis = project::list_apis(root, &config).context("failed to list APIs")?;

    if json {
        return print_json(&apis);
    }

    if apis.is_empty() {
        println!("No APIs under {}.", config.api_dir);
        return Ok(());
    }
    for api in &apis {
        println!("{api}");
    }
    Ok(())
}
