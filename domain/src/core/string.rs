//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe).
///
/// Used to keep evidence snippets bounded before they are rendered into
/// oracle prompts or console output.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Normalize an entity label for table lookup: trimmed and lowercased.
///
/// CJK labels pass through unchanged apart from trimming.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
