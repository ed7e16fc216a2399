// src/utils/text.rs

/// Shortens `content` to at most `max_len` characters, trimmed, followed by `...`.
/// Content that already fits is returned unchanged.
pub fn excerpt(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        return content.to_string();
    }

    let cut: String = content.chars().take(max_len).collect();
    format!("{}...", cut.trim())
}
