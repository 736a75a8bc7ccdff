use dialoguer::{theme::ColorfulTheme, Input, Select};
use strapgen_core::types::{Mode, CORE_ROUTES, LIFECYCLE_EVENTS};

pub fn api(apis: &[String]) -> anyhow::Result<String> {
    if apis.is_empty() {
        anyhow::bail!("no APIs found under src/api");
    }
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What is the name of API?")
        .items(apis)
        .default(0)
        .interact()?;
    Ok(apis[index].clone())
}

pub fn mode() -> anyhow::Result<Mode> {
    let labels: Vec<&str> = Mode::all().iter().map(|m| m.label()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose the content to generate:")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Mode::all()[index])
}

/// Core route, lifecycle event, or free-form custom route, depending on `mode`.
pub fn route(mode: Mode) -> anyhow::Result<String> {
    let theme = ColorfulTheme::default();
    let choose = |prompt: &str, items: &[&str]| -> anyhow::Result<String> {
        let index = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .max_length(18)
            .interact()?;
        Ok(items[index].to_string())
    };
    match mode {
        Mode::GlobalPolicy | Mode::ApiPolicy => choose("Choose core route:", CORE_ROUTES),
        Mode::Lifecycle => choose("Choose lifecycle events:", LIFECYCLE_EVENTS),
        Mode::Route => Ok(Input::<String>::with_theme(&theme)
            .with_prompt("Please Input Custom Route")
            .interact_text()?),
    }
}

pub fn policy_name() -> anyhow::Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Please Input Policy Name")
        .interact_text()?)
}
