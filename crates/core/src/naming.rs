//! Key and slug rules shared by topics, products, themes and categories.
//!
//! Keys are caller-chosen primary keys and never change after creation.
//! Slugs are derived from keys and are what clients put in URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum key length accepted on create.
pub const MAX_KEY_LEN: usize = 64;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _\-]*$").expect("valid regex"));

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Whether `key` is an acceptable primary key.
///
/// Must start with an ASCII letter or digit, contain only letters, digits,
/// spaces, `_` or `-`, and be at most [`MAX_KEY_LEN`] characters.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_LEN && KEY_RE.is_match(key)
}

/// Derive a URL slug from a key: lowercase, runs of anything that is not a
/// letter or digit collapsed to a single `-`, no leading or trailing `-`.
///
/// # Examples
///
/// ```
/// use catalog_core::naming::slugify;
///
/// assert_eq!(slugify("Sports News"), "sports-news");
/// assert_eq!(slugify("lego_city--2024"), "lego-city-2024");
/// ```
pub fn slugify(key: &str) -> String {
    let lowered = key.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Parse a comma-separated key list (`?keys=a,b`).
///
/// Blank entries are dropped and duplicates removed, first occurrence wins.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}
