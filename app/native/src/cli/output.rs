//! CLI output formatting.

use colored::Colorize;
use serde_json::Value;

/// Prints a JSON value, pretty-printed and colored.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &Value) {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    println!("{out}");
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) => {
            write_container(out, '[', ']', depth, items.iter().map(|item| (None, item)));
        }
        Value::Object(map) => {
            write_container(out, '{', '}', depth, map.iter().map(|(k, v)| (Some(k.as_str()), v)));
        }
    }
}

fn write_container<'a>(
    out: &mut String,
    open: char,
    close: char,
    depth: usize,
    entries: impl ExactSizeIterator<Item = (Option<&'a str>, &'a Value)>,
) {
    let count = entries.len();
    if count == 0 {
        out.push(open);
        out.push(close);
        return;
    }

    let indent = "  ".repeat(depth + 1);
    out.push(open);
    out.push('\n');
    for (i, (key, value)) in entries.enumerate() {
        out.push_str(&indent);
        if let Some(key) = key {
            out.push_str(&quoted(key).cyan().to_string());
            out.push_str(": ");
        }
        write_value(out, value, depth + 1);
        if i + 1 < count {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push(close);
}

fn quoted(s: &str) -> String { Value::String(s.to_string()).to_string() }

/// Formats a boolean as a colored check mark or cross.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &Value) -> String {
        colored::control::set_override(false);
        let mut out = String::new();
        write_value(&mut out, value, 0);
        out
    }

    #[test]
    fn test_render_matches_pretty_json() {
        let value = serde_json::json!({
            "display": 1,
            "alwaysOnTop": false,
            "background": "#000000",
            "headless": { "displays": [ { "width": 1920 } ], "empty": [] }
        });
        let rendered = render(&value);
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn test_strings_are_escaped() {
        let rendered = render(&serde_json::json!("a \"quoted\" word"));
        assert_eq!(rendered, r#""a \"quoted\" word""#);
    }

    #[test]
    fn test_format_bool() {
        assert!(format_bool(true).contains('✓'));
        assert!(format_bool(false).contains('✗'));
    }
}
