//! Identifier helpers for emitted code.
//!
//! Casing and plural handling are deliberately naive English rules: table and
//! column names come from schema authors, and the schema source parser is
//! expected to hand over well-formed snake_case identifiers.

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Escape an emitted field name that collides with a Rust keyword.
pub fn escape_keyword(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Strip the raw-identifier prefix for use inside composed names
/// (`r#type` -> `set_type`, not `set_r#type`).
pub fn strip_raw_prefix(field: &str) -> &str {
    field.strip_prefix("r#").unwrap_or(field)
}

/// `snake_case` -> `PascalCase`.
pub fn pascal_case(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Pluralize a snake_case word. Words already ending in `s` are assumed
/// plural and returned unchanged, which keeps the function idempotent for
/// conventional plural table names.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix('y') {
        if !stem.is_empty() && !ends_with_vowel(stem) {
            return format!("{stem}ies");
        }
    }
    if name.ends_with('x') || name.ends_with('z') || name.ends_with("ch") || name.ends_with("sh") {
        return format!("{name}es");
    }
    format!("{name}s")
}

/// Best-effort inverse of `pluralize`.
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["ses", "xes", "zes", "ches", "shes"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..suffix.len() - 2]);
        }
    }
    if name.ends_with('s') && !name.ends_with("ss") {
        return name[..name.len() - 1].to_string();
    }
    name.to_string()
}

/// Drop a trailing `_id` from a column name, for relation-name
/// disambiguation (`inviter_id` -> `inviter`).
pub fn strip_id_suffix(column: &str) -> &str {
    column.strip_suffix("_id").unwrap_or(column)
}

/// Generated entity type name for a table: `posts` -> `Post`.
pub fn entity_name(table: &str) -> String {
    pascal_case(&singularize(table))
}

/// Generated identifier newtype name for a table: `posts` -> `PostId`.
pub fn id_type_name(table: &str) -> String {
    format!("{}Id", entity_name(table))
}

/// Generated type-parameter name for a field: `user_id` -> `UserIdT`.
pub fn type_param_name(field: &str) -> String {
    format!("{}T", pascal_case(field))
}

fn ends_with_vowel(word: &str) -> bool {
    matches!(word.chars().last(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}
