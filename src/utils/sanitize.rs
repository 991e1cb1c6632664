//! Escaping and filename cleanup for manifest field values.

/// Entities produced by [`sanitize_text`].
const ESCAPED_ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

/// Escape HTML special characters so a manifest value is safe to render.
///
/// Idempotent: an `&` that already starts one of the entities this function
/// emits is left alone, so escaped values survive a second pass unchanged.
pub fn sanitize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' if ESCAPED_ENTITIES.iter().any(|e| s[i..].starts_with(e)) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate and clean a manifest filename.
///
/// Names containing a parent-directory sequence (`../` or `..\`) are rejected
/// and an empty string is returned. Otherwise control characters (CR/LF and
/// friends) are stripped and every other character, including non-Latin
/// scripts, is kept as written.
pub fn sanitize_filename(name: &str) -> String {
    if name.contains("../") || name.contains("..\\") {
        tracing::warn!("Rejected filename with path traversal: {:?}", name);
        return String::new();
    }

    name.chars().filter(|c| !c.is_control()).collect()
}
