use crate::output::{print_json, print_table};
use strapgen_core::types::{CORE_ROUTES, LIFECYCLE_EVENTS};

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "core_routes": CORE_ROUTES,
            "lifecycle_events": LIFECYCLE_EVENTS,
        }));
    }

    let rows: Vec<Vec<String>> = CORE_ROUTES
        .iter()
        .map(|r| vec!["core-route".to_string(), r.to_string()])
        .chain(
            LIFECYCLE_EVENTS
                .iter()
                .map(|e| vec!["lifecycle".to_string(), e.to_string()]),
        )
        .collect();
    print_table(&["KIND", "NAME"], &rows);
    Ok(())
}
