use url::Url;

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve an href against the page it was found on
///
/// Returns an empty string for a blank href or one that cannot be joined.
pub fn resolve_link(base: &Url, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            ::log::debug!("Could not resolve href {:?} against {}: {}", href, base, e);
            String::new()
        }
    }
}
