//! JavaScript snippets written into the project.

pub const EMPTY_LIFECYCLES: &str = "module.exports = {};";
pub const EMPTY_ROUTES: &str = "module.exports = {routes: []};";

/// Default policy body: let users with `admin_role` through, deny the rest.
pub fn policy(admin_role: &str) -> String {
    format!(
        r#"module.exports = async (policyContext, config, {{ strapi }}) => {{
  if (policyContext.state.user.role.name === '{role}') {{
    return true;
  }}
  return false;
}};
"#,
        role = js_single_quoted(admin_role)
    )
}

pub fn lifecycle_method(event: &str) -> String {
    format!(
        r#"  async {event}(event) {{
    const {{ data, where, select, populate }} = event.params;
    // const {{ result, params }} = event;
  }},"#
    )
}

pub fn route_descriptor(api: &str, route: &str) -> String {
    format!(
        r#"  {{
    method: 'POST',
    path: '/{api}/{route}',
    handler: '{api}.{route}',
    config: {{ policies: [] }},
  }},"#
    )
}

pub fn controller_method(route: &str) -> String {
    format!("  async {route}(ctx) {{}},")
}

/// Factory argument for a controller created without one.
pub fn controller_factory(route: &str) -> String {
    format!(
        ", ({{ strapi }}) => ({{\n{}\n}})",
        controller_method(route)
    )
}

fn js_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_escapes_role() {
        let body = policy("O'Brien");
        assert!(body.contains(r"=== 'O\'Brien'"));
        assert!(body.starts_with("module.exports = async (policyContext, config, { strapi }) => {"));
    }

    #[test]
    fn route_descriptor_shape() {
        let d = route_descriptor("article", "publish");
        assert!(d.contains("method: 'POST'"));
        assert!(d.contains("path: '/article/publish'"));
        assert!(d.contains("handler: 'article.publish'"));
        assert!(d.trim_end().ends_with("},"));
    }

    #[test]
    fn controller_factory_wraps_method() {
        assert_eq!(
            controller_factory("publish"),
            ", ({ strapi }) => ({\n  async publish(ctx) {},\n})"
        );
    }
}
