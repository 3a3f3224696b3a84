//! Identifier and documentation helpers for Julia output.

/// Julia reserved words that cannot be used as identifiers.
pub const JULIA_KEYWORDS: &[&str] = &[
    "baremodule", "begin", "break", "catch", "const", "continue", "do", "else", "elseif", "end",
    "export", "false", "finally", "for", "function", "global", "if", "import", "let", "local",
    "macro", "module", "quote", "return", "struct", "true", "try", "using", "while",
];

pub fn is_julia_keyword(name: &str) -> bool {
    JULIA_KEYWORDS.contains(&name)
}

/// Prefix reserved words with an underscore.
pub fn escape_julia_keyword(name: &str) -> String {
    if is_julia_keyword(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Julia name of a global enum.
///
/// The two cross-cutting `Variant` enums are flattened so they do not collide
/// with identically named class enums.
pub fn global_enum_target_name(name: &str) -> String {
    match name {
        "Variant.Type" => "VariantType".to_string(),
        "Variant.Operator" => "VariantOperator".to_string(),
        _ => name.to_string(),
    }
}

/// Clean host documentation text for a raw Julia docstring.
///
/// Removes common indentation, tabs and carriage returns, renames the two
/// global enums that are renamed in the output, escapes triple quotes and
/// trims the result.
pub fn fix_doc_description(text: &str) -> String {
    dedent(text)
        .replace('\t', "")
        .replace('\r', "")
        .replace("Variant.Type", "VariantType")
        .replace("Variant.Operator", "VariantOperator")
        .replace("\"\"\"", "\\\"\\\"\\\"")
        .trim()
        .to_string()
}

fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
