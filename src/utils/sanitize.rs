// src/utils/sanitize.rs

use ammonia;

/// Clean user-authored text before it is written to a shared collection.
///
/// Whitelist-based sanitization: safe tags survive, script-bearing tags
/// and attributes are stripped, and surrounding whitespace is trimmed.
/// Serves as a fail-safe against stored XSS reaching the other clients of
/// the shared collections.
pub fn clean_text(input: &str) -> String {
    ammonia::clean(input).trim().to_string()
}
