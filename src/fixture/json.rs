use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used when writing JSON files.
///
/// Mirrors the usual `stringify` conventions: a number of spaces (capped at
/// ten) or a literal indent string (truncated to ten characters). Zero
/// spaces or an empty string produce compact output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonIndent {
    Spaces(usize),
    Literal(String),
}

const MAX_INDENT: usize = 10;

impl Default for JsonIndent {
    fn default() -> Self {
        JsonIndent::Spaces(2)
    }
}

impl From<usize> for JsonIndent {
    fn from(n: usize) -> Self {
        JsonIndent::Spaces(n)
    }
}

impl From<&str> for JsonIndent {
    fn from(s: &str) -> Self {
        JsonIndent::Literal(s.to_string())
    }
}

impl JsonIndent {
    fn unit(&self) -> String {
        match self {
            JsonIndent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            JsonIndent::Literal(s) => s.chars().take(MAX_INDENT).collect(),
        }
    }
}

/// Serialize `value` with the given indentation.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T, indent: &JsonIndent) -> serde_json::Result<Vec<u8>> {
    let unit = indent.unit();
    if unit.is_empty() {
        return serde_json::to_vec(value);
    }
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(unit.as_bytes());
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(indent: impl Into<JsonIndent>) -> String {
        let bytes = to_json_bytes(&json!({ "a": [1] }), &indent.into()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn default_is_two_spaces() {
        let bytes = to_json_bytes(&json!({ "a": 1 }), &JsonIndent::default()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn zero_is_compact() {
        assert_eq!(render(0usize), "{\"a\":[1]}");
        assert_eq!(render(""), "{\"a\":[1]}");
    }

    #[test]
    fn tab_literal() {
        assert_eq!(render("\t"), "{\n\t\"a\": [\n\t\t1\n\t]\n}");
    }

    #[test]
    fn width_is_capped() {
        let wide = render(40usize);
        let first_key_line = wide.lines().nth(1).unwrap();
        assert_eq!(first_key_line, format!("{}\"a\": [", " ".repeat(10)));
    }
}
