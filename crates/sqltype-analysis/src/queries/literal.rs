//! Literal folding: string and template literal nodes to SQL text.

use tree_sitter::Node;

/// Text recovered from a literal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralText {
    /// `'...'`, `"..."` or a template without substitutions: the cooked value.
    Cooked(String),
    /// A template with `${...}` substitutions: the verbatim source of the
    /// whole expression, backticks and placeholders included.
    Verbatim(String),
}

impl LiteralText {
    pub fn into_string(self) -> String {
        match self {
            LiteralText::Cooked(s) | LiteralText::Verbatim(s) => s,
        }
    }
}

/// Fold `node` if it is a string or template literal. Wrapping parentheses and
/// `as`/`satisfies` assertions are looked through.
pub fn literal_text(node: Node, source: &[u8]) -> Option<LiteralText> {
    let node = peel(node);
    match node.kind() {
        "string" => {
            let raw = inner_text(node, source)?;
            Some(LiteralText::Cooked(decode_escapes(raw)))
        }
        "template_string" => {
            let mut cursor = node.walk();
            let has_substitution = node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution");
            if has_substitution {
                let text = node.utf8_text(source).ok()?;
                Some(LiteralText::Verbatim(text.to_string()))
            } else {
                let raw = inner_text(node, source)?;
                Some(LiteralText::Cooked(decode_escapes(&raw.replace("\r\n", "\n"))))
            }
        }
        _ => None,
    }
}

/// Strip expression wrappers that do not change the value.
pub fn peel(mut node: Node) -> Node {
    loop {
        let inner = match node.kind() {
            "parenthesized_expression" => node.named_child(0),
            "as_expression" | "satisfies_expression" | "non_null_expression" => {
                node.named_child(0)
            }
            // `<T>expr`: the type arguments come first.
            "type_assertion" => {
                let mut cursor = node.walk();
                let last = node.named_children(&mut cursor).last();
                last
            }
            _ => None,
        };
        match inner {
            Some(inner) => node = inner,
            None => return node,
        }
    }
}

/// The source text between the opening and closing delimiter.
fn inner_text<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    let text = node.utf8_text(source).ok()?;
    if text.len() < 2 {
        return None;
    }
    text.get(1..text.len() - 1)
}

/// Decode JavaScript escape sequences. Malformed escapes keep their characters.
pub fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) if hex.len() == 2 => out.push(ch),
                    _ => {
                        out.push('x');
                        out.push_str(&hex);
                    }
                }
            }
            'u' => {
                let decoded = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() == 4 {
                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                    } else {
                        None
                    }
                };
                out.push(decoded.unwrap_or('\u{fffd}'));
            }
            other => out.push(other),
        }
    }
    out
}
