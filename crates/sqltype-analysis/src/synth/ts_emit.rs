//! Small TypeScript lexical helpers.

/// A double-quoted string literal (also a valid singleton string type).
pub fn string_literal(value: &str) -> String {
    // JSON string syntax is a subset of JS string literal syntax.
    serde_json::Value::String(value.to_string()).to_string()
}

/// Object type key: bare when it is an ASCII identifier, quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_quotes_and_newlines() {
        assert_eq!(string_literal("SELECT 1"), "\"SELECT 1\"");
        assert_eq!(
            string_literal("SELECT \"a\"\nFROM t"),
            "\"SELECT \\\"a\\\"\\nFROM t\""
        );
    }

    #[test]
    fn keys_are_quoted_when_needed() {
        assert_eq!(property_key("city"), "city");
        assert_eq!(property_key("$count"), "$count");
        assert_eq!(property_key("?column?"), "\"?column?\"");
        assert_eq!(property_key("first name"), "\"first name\"");
        assert_eq!(property_key("1st"), "\"1st\"");
    }
}
