//! Heuristics for reading JavaScript object literals as JSON.
//!
//! This is not a JavaScript parser. [`to_json`] handles the shapes Strapi
//! route files use in practice: bare or single-quoted keys, single-quoted
//! strings, trailing commas, and namespaced policy references such as
//! `global::is-admin`. String values that themselves look like `key:` are
//! not supported.

use regex::Regex;
use std::sync::OnceLock;

/// Namespaces whose `::` separator must survive key quoting.
const NAMESPACES: &[&str] = &["global", "api", "plugin", "admin"];

static KEY_RE: OnceLock<Regex> = OnceLock::new();
static TRAILING_COMMA_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r#"(['"])?([A-Za-z0-9_$]+)(['"])?\s*:"#).unwrap())
}

fn trailing_comma_re() -> &'static Regex {
    TRAILING_COMMA_RE.get_or_init(|| Regex::new(r",(\s*[}\]])").unwrap())
}

fn placeholder(ns: &str) -> String {
    format!("__strapgen_ns_{ns}__")
}

/// Rewrite a JavaScript object literal into text `serde_json` can parse.
pub fn to_json(literal: &str) -> String {
    let mut text = literal.to_string();
    for ns in NAMESPACES {
        text = text.replace(&format!("{ns}::"), &placeholder(ns));
    }
    text = key_re().replace_all(&text, "\"$2\":").into_owned();
    for ns in NAMESPACES {
        text = text.replace(&placeholder(ns), &format!("{ns}::"));
    }
    text = text.replace('\'', "\"");
    trailing_comma_re().replace_all(&text, "$1").into_owned()
}

/// Find the `)` closing a call whose arguments start at byte `from`.
///
/// Brackets are balanced across `()`, `[]` and `{}`; quoted strings, template
/// literals and comments are skipped. Returns `None` when the call never
/// closes.
pub fn find_call_close(content: &str, from: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth: usize = 0;
    let mut i = from;
    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => return Some(i),
            b')' | b']' | b'}' => depth = depth.checked_sub(1)?,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the last `byte` outside strings and comments.
pub fn last_code_index(content: &str, byte: u8) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut last = None;
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i] == byte {
            last = Some(i);
        }
        i += 1;
    }
    last
}

/// Index of the bracket opening the one that closes at `close`.
pub fn matching_open(content: &str, close: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut stack = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => stack.push(i),
            b')' | b']' | b'}' => {
                let open = stack.pop();
                if i == close {
                    return open;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Names of the members declared directly in the object literal whose `{`
/// sits at `open`: `name(...) {}`, `async name(...) {}`, `name: ...` and
/// quoted keys. Keys of nested objects, strings and comments are ignored.
pub fn object_members(content: &str, open: usize) -> Vec<String> {
    let bytes = content.as_bytes();
    let mut members = Vec::new();
    let mut depth: usize = 0;
    let mut expect_key = true;
    let mut i = open + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if depth == 0 && expect_key && matches!(b, b'\'' | b'"') {
            let Some(end) = skip_string(bytes, i) else {
                break;
            };
            members.push(content[i + 1..end].to_string());
            expect_key = false;
            i = end + 1;
            continue;
        }
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match b {
            b'(' | b'[' | b'{' => {
                depth += 1;
                expect_key = false;
            }
            b')' | b']' | b'}' if depth == 0 => break,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth == 0 => expect_key = true,
            b'*' if depth == 0 => {}
            _ if depth == 0 && expect_key && is_ident_byte(b) => {
                let start = i;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                let word = &content[start..i];
                if !is_modifier(word, &content[i..]) {
                    members.push(word.to_string());
                    expect_key = false;
                }
                continue;
            }
            _ if b.is_ascii_whitespace() => {}
            _ if depth == 0 => expect_key = false,
            _ => {}
        }
        i += 1;
    }
    members
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// `async`, `get`, `set` and `static` prefix a member name rather than
/// being one when another name (or `*`) follows.
fn is_modifier(word: &str, rest: &str) -> bool {
    matches!(word, "async" | "get" | "set" | "static")
        && rest
            .trim_start()
            .bytes()
            .next()
            .is_some_and(|b| b == b'*' || is_ident_byte(b))
}

/// If a string literal or comment starts at `i`, the index just past it.
fn skip_non_code(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        b'\'' | b'"' | b'`' => Some(skip_string(bytes, i).map_or(bytes.len(), |end| end + 1)),
        b'/' if bytes.get(i + 1) == Some(&b'/') => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| i + p),
        ),
        b'/' if bytes.get(i + 1) == Some(&b'*') => Some(
            bytes[i + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |p| i + 2 + p + 2),
        ),
        _ => None,
    }
}

/// Returns the index of the closing quote of the string opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(literal: &str) -> Value {
        serde_json::from_str(&to_json(literal)).unwrap()
    }

    #[test]
    fn quotes_bare_keys_and_single_quoted_strings() {
        let v = parse("{ config: { find: { policies: ['is-owner'] } } }");
        assert_eq!(v, json!({"config": {"find": {"policies": ["is-owner"]}}}));
    }

    #[test]
    fn keeps_namespaced_references() {
        let v = parse("{ config: { update: { policies: ['global::is-admin', 'api::article.owner'] } } }");
        assert_eq!(
            v["config"]["update"]["policies"],
            json!(["global::is-admin", "api::article.owner"])
        );
    }

    #[test]
    fn drops_trailing_commas() {
        let v = parse("{\n  config: {\n    find: { policies: ['a',], },\n  },\n}");
        assert_eq!(v, json!({"config": {"find": {"policies": ["a"]}}}));
    }

    #[test]
    fn accepts_json_input() {
        let v = parse(r#"{"config": {"find": {"policies": ["global::x"]}}}"#);
        assert_eq!(v["config"]["find"]["policies"][0], "global::x");
    }

    #[test]
    fn call_close_skips_nested_and_strings() {
        let src = "createCoreRouter('api::a.a', { x: ')', y: [ (1) ] }); // )";
        let start = src.find(',').unwrap();
        let close = find_call_close(src, start).unwrap();
        assert_eq!(&src[close..], "); // )");
    }

    #[test]
    fn call_close_skips_comments() {
        let src = "f(a /* ) */, // )\n b)";
        let close = find_call_close(src, 2).unwrap();
        assert_eq!(close, src.len() - 1);
    }

    #[test]
    fn last_code_index_skips_comments_and_strings() {
        let src = "module.exports = { a: '}' };\n// trailing }\n";
        assert_eq!(last_code_index(src, b'}'), src.find(" };").map(|i| i + 1));
        assert_eq!(last_code_index("no braces", b'}'), None);
    }

    #[test]
    fn matching_open_pairs_brackets() {
        let src = "f({ a: [1, { b: 2 }] })";
        let close = src.rfind('}').unwrap();
        assert_eq!(matching_open(src, close), Some(2));
    }

    #[test]
    fn object_members_only_reads_top_level() {
        let src = "({\n  // beforeCreate: validate slug\n  async count(ctx) {\n    return { data: 1 };\n  },\n  find: async (ctx) => super.find(ctx),\n  'quoted-key': 1,\n  get total() { return 0; },\n  *walk() {},\n})";
        assert_eq!(
            object_members(src, 1),
            vec!["count", "find", "quoted-key", "total", "walk"]
        );
    }

    #[test]
    fn object_members_accepts_modifier_names() {
        let src = "{ async(ctx) {}, get: 1 }";
        assert_eq!(object_members(src, 0), vec!["async", "get"]);
    }

    #[test]
    fn unclosed_call_is_none() {
        assert_eq!(find_call_close("f({ a: 1 }", 2), None);
        assert_eq!(find_call_close("f('open", 2), None);
    }
}
