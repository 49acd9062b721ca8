/// Rebuilds a `Cookie` header value from a raw `k=v; k2=v2` string as
/// exported from a browser session. Fragments without a `=` are ignored;
/// the credential file is pasted by hand and often ends with stray
/// separators or a trailing newline.
pub fn cookie_header(raw: &str) -> String {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_normalizes_pairs() {
        let raw = "_session=abc123; locale=en;  remember_token=xyz \n";
        assert_eq!(
            cookie_header(raw),
            "_session=abc123; locale=en; remember_token=xyz"
        );
    }

    #[test]
    fn test_fragments_without_equals_are_dropped() {
        assert_eq!(cookie_header("_session=abc; garbage; ;"), "_session=abc");
        assert_eq!(cookie_header(""), "");
    }
}
