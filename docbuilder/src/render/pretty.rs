//! Line-broken JSON for example blocks.

use serde_json::Value;

/// Serializes `value` compactly and breaks it into lines.
///
/// A newline goes after every `{`, before every `}` and after every `,`
/// of the compact form. Characters inside string literals are left alone,
/// except that `/` is escaped as `\/` so a value such as `*/*` cannot close
/// the surrounding comment. An empty object stays `{}`. No indentation is
/// added, so deleting the inserted newlines gives back JSON that parses to
/// `value`.
///
/// ## Examples
///
/// ```rust
/// use docbuilder::render::pretty_json;
/// use serde_json::json;
///
/// let text = pretty_json(&json!({"a": 1, "b": "x,y"})).unwrap();
/// assert_eq!(text, "{\n\"a\":1,\n\"b\":\"x,y\"\n}");
/// ```
pub fn pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    let compact = serde_json::to_string(value)?;
    Ok(break_lines(&compact))
}

fn break_lines(compact: &str) -> String {
    let mut out = String::with_capacity(compact.len() + compact.len() / 4);
    let mut chars = compact.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '/' {
                out.push_str("\\/");
            } else if c == '\\' {
                out.push(c);
                escaped = true;
            } else {
                out.push(c);
                in_string = c != '"';
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push_str("{}");
            }
            '{' => out.push_str("{\n"),
            '}' => out.push_str("\n}"),
            ',' => out.push_str(",\n"),
            _ => out.push(c),
        }
    }

    out
}
