use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Collapses interior whitespace runs to single spaces and trims the ends.
/// Scraped text nodes tend to carry the page's indentation with them.
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ")
}
