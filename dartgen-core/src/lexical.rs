//! Dart lexical rules used when validating and rendering nodes.

/// Words that can never be used as a Dart identifier.
///
/// Built-in identifiers (`abstract`, `get`, `factory`, ...) and contextual
/// keywords (`async`, `on`, `show`, ...) are legal names and not listed.
pub const RESERVED_WORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

/// Check whether `name` is a reserved word.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Check whether `name` is lexically a Dart identifier.
///
/// Identifiers start with a letter, `_` or `$` and continue with letters,
/// digits, `_` or `$`. Reserved words pass this check; use
/// [`is_reserved_word`] for those.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Strip type arguments and nullability from a type reference.
///
/// `Comparable<Foo>?` becomes `Comparable`, which is what supertype clauses
/// are compared by.
pub fn base_type_name(ty: &str) -> &str {
    let ty = ty.trim();
    let end = ty.find(['<', '?']).unwrap_or(ty.len());
    ty[..end].trim_end()
}

/// Quote `value` as a single-quoted Dart string literal.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
