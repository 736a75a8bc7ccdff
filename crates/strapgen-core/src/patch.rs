//! Text patchers for Strapi route, lifecycle and controller modules.
//!
//! Each patcher takes the current file text and returns the new text. None of
//! them touch the filesystem, so a failure never leaves a file half-patched.

use crate::error::{GenError, Result};
use crate::jsobj;
use crate::paths;
use crate::template;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// Policies (core router)
// ---------------------------------------------------------------------------

/// Add `policy` to `config.<route>.policies` of the `createCoreRouter` call
/// for `api`. A reference that is already listed is not added twice.
pub fn add_route_policy(
    content: &str,
    file: &str,
    api: &str,
    route: &str,
    policy: &str,
) -> Result<String> {
    let uid = paths::api_uid(api);
    let after_uid = find_quoted(content, &uid).ok_or_else(|| GenError::UidNotFound {
        uid: uid.clone(),
        file: file.to_string(),
    })?;

    let next = skip_ws(content, after_uid);
    let (fragment, close) = match content[next..].chars().next() {
        Some(')') => (None, next),
        Some(',') => {
            let close = jsobj::find_call_close(content, next + 1).ok_or_else(|| {
                malformed(file, format!("call with '{uid}' is never closed"))
            })?;
            let fragment = content[next + 1..close]
                .trim()
                .trim_end_matches(',')
                .trim_end();
            ((!fragment.is_empty()).then_some(fragment), close)
        }
        _ => return Err(malformed(file, format!("expected ',' or ')' after '{uid}'"))),
    };

    let mut options = match fragment {
        None => json!({ "config": {} }),
        Some(literal) => {
            let text = jsobj::to_json(literal);
            tracing::debug!(%file, json = %text, "normalized route config");
            serde_json::from_str(&text).map_err(|e| invalid_config(file, e.to_string()))?
        }
    };

    let options_obj = options
        .as_object_mut()
        .ok_or_else(|| invalid_config(file, "options is not an object".to_string()))?;
    let config = object_entry(options_obj, "config")
        .ok_or_else(|| invalid_config(file, "'config' is not an object".to_string()))?;
    let route_cfg = object_entry(config, route)
        .ok_or_else(|| invalid_config(file, format!("'config.{route}' is not an object")))?;
    let policies = route_cfg
        .entry("policies")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| {
            invalid_config(file, format!("'config.{route}.policies' is not an array"))
        })?;

    if policies.iter().any(|p| p.as_str() == Some(policy)) {
        tracing::info!(%file, %route, %policy, "policy already attached");
    } else {
        policies.push(Value::String(policy.to_string()));
    }

    let rendered = serde_json::to_string_pretty(&options)?;
    Ok(format!(
        "{}, {}{}",
        &content[..after_uid],
        rendered,
        &content[close..]
    ))
}

// ---------------------------------------------------------------------------
// Lifecycles
// ---------------------------------------------------------------------------

/// Add an `async <event>(event)` hook to the exported lifecycles object.
pub fn add_lifecycle(content: &str, file: &str, event: &str) -> Result<String> {
    let (open, close) = exported_object(content, b'}')
        .ok_or_else(|| malformed(file, "no exported object found".to_string()))?;
    if jsobj::object_members(content, open).iter().any(|m| m == event) {
        return Err(GenError::LifecycleExists(event.to_string()));
    }
    Ok(splice_before(
        content,
        close,
        &template::lifecycle_method(event),
        '{',
    ))
}

// ---------------------------------------------------------------------------
// Custom routes
// ---------------------------------------------------------------------------

/// Append a POST route for `/<api>/<route>` to the `routes` array.
pub fn add_custom_route(content: &str, file: &str, api: &str, route: &str) -> Result<String> {
    let path = format!("/{api}/{route}");
    if content.contains(&format!("'{path}'")) || content.contains(&format!("\"{path}\"")) {
        return Err(GenError::RouteExists(path));
    }
    let (_, close) = exported_object(content, b']')
        .ok_or_else(|| malformed(file, "no routes array found".to_string()))?;
    Ok(splice_before(
        content,
        close,
        &template::route_descriptor(api, route),
        '[',
    ))
}

// ---------------------------------------------------------------------------
// Controllers
// ---------------------------------------------------------------------------

/// Add an `async <route>(ctx)` action to the `createCoreController` factory.
///
/// A controller created without a factory gets one. If the action already
/// exists the content is returned unchanged.
pub fn add_controller_action(content: &str, file: &str, api: &str, route: &str) -> Result<String> {
    let uid = paths::api_uid(api);
    let after_uid = find_quoted(content, &uid).ok_or_else(|| GenError::UidNotFound {
        uid: uid.clone(),
        file: file.to_string(),
    })?;

    let next = skip_ws(content, after_uid);
    if content[next..].starts_with(')') {
        return Ok(format!(
            "{}{}{}",
            &content[..after_uid],
            template::controller_factory(route),
            &content[next..]
        ));
    }

    let (open, close) = exported_object(content, b'}')
        .ok_or_else(|| malformed(file, "controller factory has no body".to_string()))?;
    if jsobj::object_members(content, open).iter().any(|m| m == route) {
        tracing::info!(%file, %route, "controller action already exists");
        return Ok(content.to_string());
    }
    Ok(splice_before(
        content,
        close,
        &template::controller_method(route),
        '{',
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Byte offset just past the closing quote of the first `'needle'` or
/// `"needle"` in `content`.
fn find_quoted(content: &str, needle: &str) -> Option<usize> {
    ['\'', '"']
        .iter()
        .filter_map(|q| {
            let quoted = format!("{q}{needle}{q}");
            content.find(&quoted).map(|i| i + quoted.len())
        })
        .min()
}

fn skip_ws(content: &str, from: usize) -> usize {
    let rest = &content[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// Insert `item` before the closing delimiter at `close`, adding a `,` after
/// the previous member when it lacks one.
fn splice_before(content: &str, close: usize, item: &str, open: char) -> String {
    let head = content[..close].trim_end();
    let tail = &content[close..];
    let sep = if head.ends_with(open) || head.ends_with(',') {
        ""
    } else {
        ","
    };
    format!("{head}{sep}\n{item}\n{tail}")
}

/// The last `close` bracket outside strings and comments, with its opener.
fn exported_object(content: &str, close: u8) -> Option<(usize, usize)> {
    let close = jsobj::last_code_index(content, close)?;
    let open = jsobj::matching_open(content, close)?;
    Some((open, close))
}

fn object_entry<'a>(obj: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    obj.entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

fn malformed(file: &str, reason: String) -> GenError {
    GenError::Malformed {
        file: file.to_string(),
        reason,
    }
}

fn invalid_config(file: &str, reason: String) -> GenError {
    GenError::InvalidRouteConfig {
        file: file.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CORE_ROUTER: &str = "'use strict';\n\n/**\n * article router\n */\n\nconst { createCoreRouter } = require('@strapi/strapi').factories;\n\nmodule.exports = createCoreRouter('api::article.article');\n";

    const CORE_CONTROLLER: &str = "'use strict';\n\nconst { createCoreController } = require('@strapi/strapi').factories;\n\nmodule.exports = createCoreController('api::article.article');\n";

    /// Pull the options object back out of a patched router.
    fn options_of(patched: &str) -> Value {
        let start = patched.find("'api::article.article', ").unwrap() + 24;
        let close = jsobj::find_call_close(patched, start).unwrap();
        serde_json::from_str(&jsobj::to_json(&patched[start..close])).unwrap()
    }

    #[test]
    fn policy_on_bare_router_creates_config() {
        let out = add_route_policy(CORE_ROUTER, "article.js", "article", "find", "global::is-admin")
            .unwrap();
        assert!(out.starts_with("'use strict';"));
        assert!(out.ends_with(");\n"));
        assert_eq!(
            options_of(&out),
            json!({"config": {"find": {"policies": ["global::is-admin"]}}})
        );
    }

    #[test]
    fn second_policy_appends_and_keeps_first() {
        let once = add_route_policy(CORE_ROUTER, "f", "article", "find", "owner").unwrap();
        let twice = add_route_policy(&once, "f", "article", "find", "global::is-admin").unwrap();
        assert_eq!(
            options_of(&twice)["config"]["find"]["policies"],
            json!(["owner", "global::is-admin"])
        );
    }

    #[test]
    fn same_policy_is_not_duplicated() {
        let once = add_route_policy(CORE_ROUTER, "f", "article", "find", "owner").unwrap();
        let twice = add_route_policy(&once, "f", "article", "find", "owner").unwrap();
        assert_eq!(options_of(&twice)["config"]["find"]["policies"], json!(["owner"]));
    }

    #[test]
    fn hand_written_js_config_is_preserved() {
        let src = "module.exports = createCoreRouter('api::article.article', {\n  prefix: '',\n  config: {\n    find: {\n      policies: ['global::is-admin'],\n    },\n    update: { middlewares: [] },\n  },\n});\n";
        let out = add_route_policy(src, "f", "article", "update", "owner").unwrap();
        let opts = options_of(&out);
        assert_eq!(opts["prefix"], "");
        assert_eq!(opts["config"]["find"]["policies"], json!(["global::is-admin"]));
        assert_eq!(opts["config"]["update"]["middlewares"], json!([]));
        assert_eq!(opts["config"]["update"]["policies"], json!(["owner"]));
        assert!(out.ends_with("});\n"));
    }

    #[test]
    fn router_without_uid_fails() {
        let err = add_route_policy("module.exports = {};", "f", "article", "find", "p").unwrap_err();
        assert!(matches!(err, GenError::UidNotFound { .. }));
    }

    #[test]
    fn unparseable_router_config_fails() {
        let src = "module.exports = createCoreRouter('api::article.article', options);";
        let err = add_route_policy(src, "f", "article", "find", "p").unwrap_err();
        assert!(matches!(err, GenError::InvalidRouteConfig { .. }));
    }

    #[test]
    fn unclosed_router_call_fails() {
        let src = "module.exports = createCoreRouter('api::article.article', { config: {}";
        let err = add_route_policy(src, "f", "article", "find", "p").unwrap_err();
        assert!(matches!(err, GenError::Malformed { .. }));
    }

    #[test]
    fn non_array_policies_fail() {
        let src = "createCoreRouter('api::article.article', { config: { find: { policies: 'x' } } })";
        let err = add_route_policy(src, "f", "article", "find", "p").unwrap_err();
        assert!(matches!(err, GenError::InvalidRouteConfig { .. }));
    }

    #[test]
    fn lifecycle_on_empty_object() {
        let out = add_lifecycle(template::EMPTY_LIFECYCLES, "f", "beforeCreate").unwrap();
        assert!(out.starts_with("module.exports = {\n  async beforeCreate(event) {"));
        assert!(out.ends_with("\n};"));
        assert_eq!(out.matches("async ").count(), 1);
    }

    #[test]
    fn second_lifecycle_is_comma_separated() {
        let src = "module.exports = {\n  afterCreate(event) {\n    log(event);\n  }\n};\n";
        let out = add_lifecycle(src, "f", "beforeDelete").unwrap();
        assert!(out.contains("    log(event);\n  },\n  async beforeDelete(event) {"));
        assert!(out.contains("afterCreate(event)"));
    }

    #[test]
    fn duplicate_lifecycle_fails() {
        let once = add_lifecycle(template::EMPTY_LIFECYCLES, "f", "afterUpdate").unwrap();
        let err = add_lifecycle(&once, "f", "afterUpdate").unwrap_err();
        assert!(matches!(err, GenError::LifecycleExists(_)));
    }

    #[test]
    fn lifecycle_without_object_fails() {
        let err = add_lifecycle("", "f", "afterUpdate").unwrap_err();
        assert!(matches!(err, GenError::Malformed { .. }));
    }

    #[test]
    fn custom_route_on_empty_routes() {
        let out = add_custom_route(template::EMPTY_ROUTES, "f", "article", "publish").unwrap();
        assert!(out.starts_with("module.exports = {routes: [\n  {\n    method: 'POST',"));
        assert!(out.contains("path: '/article/publish'"));
        assert!(out.ends_with("]};"));
    }

    #[test]
    fn custom_routes_keep_existing_entries() {
        let once = add_custom_route(template::EMPTY_ROUTES, "f", "article", "publish").unwrap();
        let twice = add_custom_route(&once, "f", "article", "archive").unwrap();
        assert!(twice.contains("path: '/article/publish'"));
        assert!(twice.contains("path: '/article/archive'"));
        assert_eq!(twice.matches("method: 'POST'").count(), 2);
        assert!(!twice.contains(",,"));
    }

    #[test]
    fn custom_route_after_entry_without_comma() {
        let src = "module.exports = {\n  routes: [\n    { method: 'GET', path: '/article/count', handler: 'article.count' }\n  ],\n};\n";
        let out = add_custom_route(src, "f", "article", "publish").unwrap();
        assert!(out.contains("handler: 'article.count' },\n  {"));
        assert!(out.ends_with("],\n};\n"));
    }

    #[test]
    fn duplicate_custom_route_fails() {
        let once = add_custom_route(template::EMPTY_ROUTES, "f", "article", "publish").unwrap();
        let err = add_custom_route(&once, "f", "article", "publish").unwrap_err();
        assert!(matches!(err, GenError::RouteExists(_)));
    }

    #[test]
    fn controller_without_factory_gets_one() {
        let out = add_controller_action(CORE_CONTROLLER, "f", "article", "publish").unwrap();
        assert!(out.contains(
            "createCoreController('api::article.article', ({ strapi }) => ({\n  async publish(ctx) {},\n}));\n"
        ));
    }

    #[test]
    fn controller_with_factory_gets_method() {
        let once = add_controller_action(CORE_CONTROLLER, "f", "article", "publish").unwrap();
        let twice = add_controller_action(&once, "f", "article", "archive").unwrap();
        assert!(twice.contains("  async publish(ctx) {},\n  async archive(ctx) {},\n}));"));
    }

    #[test]
    fn controller_existing_action_is_untouched() {
        let once = add_controller_action(CORE_CONTROLLER, "f", "article", "publish").unwrap();
        let again = add_controller_action(&once, "f", "article", "publish").unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn controller_without_uid_fails() {
        let err = add_controller_action("module.exports = {};", "f", "article", "publish").unwrap_err();
        assert!(matches!(err, GenError::UidNotFound { .. }));
    }

    #[test]
    fn lifecycle_ignores_commented_out_hook() {
        let src = "module.exports = {\n  // beforeCreate: validate slug\n  afterCreate(event) {},\n};\n";
        let out = add_lifecycle(src, "f", "beforeCreate").unwrap();
        assert!(out.contains("  afterCreate(event) {},\n  async beforeCreate(event) {"));
    }

    #[test]
    fn lifecycle_ignores_trailing_comment_brace() {
        let src = "module.exports = {};\n// }\n";
        let out = add_lifecycle(src, "f", "afterCreate").unwrap();
        assert!(out.starts_with("module.exports = {\n  async afterCreate(event) {"));
        assert!(out.ends_with("\n};\n// }\n"));
    }

    #[test]
    fn controller_action_named_like_nested_key_is_added() {
        let src = "module.exports = createCoreController('api::article.article', ({ strapi }) => ({\n  async count(ctx) {\n    return { data: 1 };\n  },\n}));\n";
        let out = add_controller_action(src, "f", "article", "data").unwrap();
        assert!(out.contains("  },\n  async data(ctx) {},\n}));"));
        assert!(out.contains("return { data: 1 };"));
    }

    #[test]
    fn controller_property_action_is_detected() {
        let src = "module.exports = createCoreController('api::article.article', ({ strapi }) => ({\n  publish: async (ctx) => ctx.send({}),\n}));\n";
        let out = add_controller_action(src, "f", "article", "publish").unwrap();
        assert_eq!(out, src);
    }
}
