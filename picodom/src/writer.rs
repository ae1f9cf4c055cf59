// SPDX-License-Identifier: Apache-2.0

//! JSON serializer: compact and tab-indented pretty output.
//!
//! Pretty mode indents with tabs and puts every container child on its own
//! line; an empty container still breaks the line before its closing
//! bracket. Output is pure ASCII (see [`crate::escape`]).

use crate::escape;
use crate::number;
use crate::value::{JsonType, JsonValue};

pub(crate) fn write_document(value: &JsonValue, compact: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, compact);
    out
}

fn write_value(out: &mut String, value: &JsonValue, depth: usize, compact: bool) {
    match value.json_type() {
        JsonType::Object => write_container(out, value, depth, compact, b"{}", true),
        JsonType::Array => write_container(out, value, depth, compact, b"[]", false),
        JsonType::String => {
            out.push('"');
            escape::write_escaped(out, value.to_str());
            out.push('"');
        }
        JsonType::Boolean => out.push_str(if value.to_boolean() { "true" } else { "false" }),
        JsonType::Integer => out.push_str(&value.to_integer().to_string()),
        JsonType::Float => out.push_str(&number::format_float(value.to_float())),
        JsonType::Null => out.push_str("null"),
    }
}

fn write_container(
    out: &mut String,
    value: &JsonValue,
    depth: usize,
    compact: bool,
    brackets: &[u8; 2],
    named: bool,
) {
    out.push(brackets[0] as char);
    let mut first = true;
    for child in value.members() {
        if !first {
            out.push(',');
        }
        first = false;
        if !compact {
            out.push('\n');
            push_indent(out, depth + 1);
        }
        if named {
            out.push('"');
            escape::write_escaped(out, child.name().unwrap_or(""));
            out.push('"');
            out.push(':');
            if !compact {
                out.push(' ');
            }
        }
        write_value(out, child, depth + 1, compact);
    }
    if !compact {
        out.push('\n');
        push_indent(out, depth);
    }
    out.push(brackets[1] as char);
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

#[cfg(test)]
mod tests {
    use crate::value::JsonValue;

    #[test]
    fn compact_object_layout() {
        let mut doc = JsonValue::new();
        doc.set("a", 1_i64);
        if let Some(list) = doc.entry("b") {
            list.append(1_i64).append(2_i64).append(3_i64);
        }
        assert_eq!(doc.to_json(true), r#"{"a":1,"b":[1,2,3]}"#);
    }

    #[test]
    fn pretty_object_layout() {
        let mut doc = JsonValue::new();
        doc.set("a", 1_i64);
        if let Some(list) = doc.entry("b") {
            list.append(2_i64);
        }
        assert_eq!(
            doc.to_json(false),
            "{\n\t\"a\": 1,\n\t\"b\": [\n\t\t2\n\t]\n}"
        );
    }

    #[test]
    fn empty_containers_keep_the_closing_break_in_pretty_mode() {
        assert_eq!(JsonValue::new_object().to_json(true), "{}");
        assert_eq!(JsonValue::new_object().to_json(false), "{\n}");
        assert_eq!(JsonValue::new_array().to_json(false), "[\n]");
    }

    #[test]
    fn scalars_render_as_literals() {
        assert_eq!(JsonValue::from(true).to_json(true), "true");
        assert_eq!(JsonValue::from(false).to_json(true), "false");
        assert_eq!(JsonValue::new().to_json(true), "null");
        assert_eq!(JsonValue::invalid().to_json(true), "null");
        assert_eq!(JsonValue::from(-42_i64).to_json(true), "-42");
        assert_eq!(JsonValue::from(1.5).to_json(true), "1.5");
        assert_eq!(JsonValue::from(150.0).to_json(true), "150.0");
    }

    #[test]
    fn non_finite_floats_render_as_bare_keywords() {
        assert_eq!(JsonValue::from(f64::NAN).to_json(true), "NaN");
        assert_eq!(JsonValue::from(f64::INFINITY).to_json(true), "Infinity");
        assert_eq!(
            JsonValue::from(f64::NEG_INFINITY).to_json(true),
            "-Infinity"
        );
    }

    #[test]
    fn strings_and_names_are_escaped() {
        let mut doc = JsonValue::new();
        doc.set("a\"b", "line1\nline2");
        assert_eq!(doc.to_json(true), r#"{"a\"b":"line1\nline2"}"#);
    }

    #[test]
    fn display_renders_compact() {
        let mut doc = JsonValue::new();
        doc.set("x", 1_i64);
        assert_eq!(doc.to_string(), r#"{"x":1}"#);
    }
}
