//! Markup sanitization for user-supplied text.

/// Strip executable markup (script and style elements with their content,
/// event handler attributes, `javascript:` links) and keep harmless
/// formatting tags.
pub fn clean(html: &str) -> String {
    ammonia::clean(html)
}

/// Remove every tag and keep only the text content.
pub fn strip_tags(html: &str) -> String {
    ammonia::Builder::empty().clean(html).to_string()
}

/// Markup-free preview of `html`, cut after `max_chars` characters of the
/// escaped text.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let text = strip_tags(html);
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };

    // The text is HTML-escaped; never end inside an entity.
    let mut head = &text[..cut];
    if let Some(amp) = head.rfind('&') {
        if !head[amp..].contains(';') {
            head = &head[..amp];
        }
    }
    format!("{}...", head.trim_end())
}
