//! Update naming: timestamp prefixes and slug normalisation

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// strftime pattern for the name prefix, e.g. `2025_03_01_100000`
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Extension of update scripts
pub const EXTENSION: &str = "sql";

// Lowercase letters, digits and combining marks, plus `_`
const SLUG_CHARS: &str = r"[\p{Alphabetic}\p{M}\p{N}_&&[^\p{Lu}\p{Lt}]]+";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[0-9]{{4}}_[0-9]{{2}}_[0-9]{{2}}_[0-9]{{6}}_{SLUG_CHARS}$"))
        .expect("static regex is valid")
});

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{SLUG_CHARS}$")).expect("static regex is valid"));

// lowercase/digit followed by uppercase, or an acronym followed by a capitalised word
static CASE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{Ll}\p{N}])(\p{Lu})|(\p{Lu})(\p{Lu}\p{Ll})").expect("static regex is valid")
});

/// Normalise free text into a lowercase, underscore-separated slug.
///
/// `"Add Users Table"`, `"addUsersTable"` and `"add-users table"` all become
/// `add_users_table`. Letters outside ASCII are kept and lowercased, so
/// `"Café menu"` becomes `café_menu`.
pub fn slug(input: &str) -> Result<String> {
    let spaced = CASE_BOUNDARY.replace_all(input.trim(), "${1}${3} ${2}${4}");

    let words: Vec<String> = spaced
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let slug = words.join("_");
    // Uppercase letters without a lowercase form would never be discovered
    if !SLUG_PATTERN.is_match(&slug) {
        return Err(Error::InvalidName(input.to_string()));
    }

    Ok(slug)
}

/// Build the full update name for a slug created at `at`
pub fn timestamped(at: NaiveDateTime, slug: &str) -> String {
    format!("{}_{}", at.format(TIMESTAMP_FORMAT), slug)
}

/// Whether a file stem looks like a generated update name
pub fn is_update_name(stem: &str) -> bool {
    NAME_PATTERN.is_match(stem)
}
