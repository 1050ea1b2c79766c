//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

static WORD_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());

static LOWER_UPPER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Converts a CamelCase identifier to snake_case.
///
/// Acronym runs stay together: `GKLCeiling` becomes `gkl_ceiling`.
///
/// # Examples
///
/// ```
/// use calcmig::utils::camel_to_snake;
///
/// assert_eq!(camel_to_snake("CalculateStripFoundation"), "calculate_strip_foundation");
/// assert_eq!(camel_to_snake("CalculateGKLCeiling"), "calculate_gkl_ceiling");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let first = WORD_START_REGEX.replace_all(name, "${1}_${2}");
    LOWER_UPPER_REGEX
        .replace_all(&first, "${1}_${2}")
        .to_lowercase()
}

/// Turns a camelCase short key into a readable sentence-case label.
///
/// A space goes before every capital that follows a lowercase letter, then the
/// first character is uppercased and the rest lowercased.
///
/// # Examples
///
/// ```
/// use calcmig::utils::humanize_key;
///
/// assert_eq!(humanize_key("wallArea"), "Wall area");
/// assert_eq!(humanize_key("gluePerSquareMeter"), "Glue per square meter");
/// assert_eq!(humanize_key("total"), "Total");
/// ```
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if prev_lower && c.is_uppercase() {
            spaced.push(' ');
        }
        prev_lower = c.is_lowercase();
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Picks the singular or plural form of a noun for report output.
pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
