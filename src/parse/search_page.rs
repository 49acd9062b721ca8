use std::sync::OnceLock;

use scraper::Selector;
use url::Url;

use super::normalize_whitespace;
use super::Error;

/// A search hit resolved to the restaurant's detail page. The slug (the
/// last path segment of the detail URL) keys every availability API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantMatch {
    pub slug: String,
    pub detail_url: Url,
}

/// Scans reservation-platform search results for the item whose header
/// matches `name` exactly, ignoring case and excess whitespace. Search is
/// fuzzy on the platform side, so a near-miss item frequently ranks first;
/// only an exact name match counts.
pub fn find_restaurant(
    html: &scraper::Html,
    name: &str,
) -> Result<Option<RestaurantMatch>, Error> {
    static ITEM_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static HEADER_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static LINK_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let item_selector = ITEM_SELECTOR
        .get_or_init(|| Selector::parse("div.c-restaurant_item").expect("selector should be valid"));
    let header_selector = HEADER_SELECTOR
        .get_or_init(|| Selector::parse("h3.ui.header").expect("selector should be valid"));
    let link_selector =
        LINK_SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("selector should be valid"));

    let wanted = normalize_whitespace(name).to_lowercase();
    for item in html.select(item_selector) {
        let Some(header) = item.select(header_selector).next() else {
            continue;
        };
        let header_text = normalize_whitespace(&header.text().collect::<String>()).to_lowercase();
        if header_text != wanted {
            continue;
        }

        let link = item.select(link_selector).next().ok_or_else(|| {
            Error::html_parse_error("Matching restaurant item has no detail link")
        })?;
        let href = link
            .attr("href")
            .ok_or_else(|| Error::html_parse_error("Detail link lost its href attribute"))?;
        let base = Url::parse("https://omakase.in").expect("base url should be valid");
        let detail_url = base
            .join(href)
            .map_err(|_| Error::html_parse_error("Detail link href is not a valid url"))?;
        let slug = detail_url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(|| Error::html_parse_error("Detail url has no slug path segment"))?
            .to_string();

        return Ok(Some(RestaurantMatch { slug, detail_url }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn results_document() -> scraper::Html {
        let html =
            fs::read_to_string("./src/parse/html_examples/search_page/results.html").unwrap();
        scraper::Html::parse_document(&html)
    }

    #[test]
    fn test_exact_match_wins_over_near_miss() {
        let document = results_document();
        // "Sushi Saito Annex" ranks first in the fixture; the exact name
        // must still resolve to the plain "Sushi Saito" item
        let found = find_restaurant(&document, "sushi saito")
            .expect("The example html should be valid")
            .expect("the restaurant should be found");
        assert_eq!(found.slug, "sushi-saito");
        assert_eq!(
            found.detail_url.as_str(),
            "https://omakase.in/en/restaurants/sushi-saito"
        );
    }

    #[test]
    fn test_unknown_restaurant_resolves_to_none() {
        let document = results_document();
        let found = find_restaurant(&document, "Totally Unknown Diner")
            .expect("The example html should be valid");
        assert!(found.is_none());
    }
}
