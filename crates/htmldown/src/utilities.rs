//! Text normalization helpers for the emitter.

/// Collapse whitespace runs (including newlines) into single spaces.
///
/// Collapsing is scoped to one text node; element boundaries never
/// contribute whitespace of their own.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Escape Markdown-significant characters with a preceding backslash.
///
/// A character already preceded by a backslash is left alone, so the
/// function is idempotent: feeding its output back in changes nothing.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut escaped = false;

    for c in text.chars() {
        if !escaped && matches!(c, '*' | '_' | '`' | '[' | ']') {
            result.push('\\');
        }
        escaped = c == '\\' && !escaped;
        result.push(c);
    }

    result
}

/// Split a string into (leading whitespace, core, trailing whitespace).
///
/// Lets inline markers hug the text they wrap: `"A *B* C"` instead of
/// `"A* B *C"`.
pub fn chomp(s: &str) -> (&str, &str, &str) {
    let stripped = s.trim_start();
    let lead = &s[..s.len() - stripped.len()];
    let core = stripped.trim_end();
    let trail = &stripped[core.len()..];
    (lead, core, trail)
}
