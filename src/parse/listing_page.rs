use std::sync::OnceLock;

use scraper::Selector;

use super::normalize_whitespace;
use super::Error;

/// One row of the listing site's ranked results: a restaurant and the
/// rating shown next to it. Items without a numeric rating keep `None`;
/// the ratings-mode threshold drops them later.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantListing {
    pub name: String,
    pub rating: Option<f64>,
}

impl RestaurantListing {
    fn from_html_element(element: scraper::ElementRef) -> Option<Self> {
        static NAME_SELECTOR: OnceLock<Selector> = OnceLock::new();
        static RATING_SELECTOR: OnceLock<Selector> = OnceLock::new();
        let name_selector = NAME_SELECTOR.get_or_init(|| {
            Selector::parse("a.list-rst__rst-name-target").expect("selector should be valid")
        });
        let rating_selector = RATING_SELECTOR.get_or_init(|| {
            Selector::parse("span.c-rating__val").expect("selector should be valid")
        });

        // cards mid-redesign sometimes ship without a name anchor; those
        // carry nothing worth keeping
        let name_element = element.select(name_selector).next()?;
        let name = normalize_whitespace(&name_element.text().collect::<String>()).into_owned();
        if name.is_empty() {
            return None;
        }

        let rating = element
            .select(rating_selector)
            .next()
            .and_then(|rating_element| {
                normalize_whitespace(&rating_element.text().collect::<String>())
                    .parse::<f64>()
                    .ok()
            });

        Some(Self { name, rating })
    }
}

/// Extracts every restaurant card from a listing page, in page order.
pub fn restaurants_from_listing(html: &scraper::Html) -> Result<Vec<RestaurantListing>, Error> {
    static CARD_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let card_selector = CARD_SELECTOR
        .get_or_init(|| Selector::parse("div.list-rst").expect("selector should be valid"));

    let mut cards = html.select(card_selector).peekable();
    if cards.peek().is_none() {
        return Err(Error::html_parse_error(
            "Listing page has no restaurant cards; the page layout may have changed",
        ));
    }
    Ok(cards
        .filter_map(RestaurantListing::from_html_element)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_restaurants_from_listing() {
        let html =
            fs::read_to_string("./src/parse/html_examples/listing_page/listing.html").unwrap();
        let document = scraper::Html::parse_document(&html);
        let listings =
            restaurants_from_listing(&document).expect("The example html should be valid");
        assert_eq!(
            listings,
            vec![
                RestaurantListing {
                    name: "Sushi Saito".to_string(),
                    rating: Some(4.52),
                },
                RestaurantListing {
                    name: "Den".to_string(),
                    rating: Some(4.21),
                },
                RestaurantListing {
                    name: "Shibuya Ramen Stand".to_string(),
                    rating: None,
                },
            ]
        );
    }

    #[test]
    fn test_empty_listing_is_an_error() {
        let document = scraper::Html::parse_document("<html><body></body></html>");
        assert!(restaurants_from_listing(&document).is_err());
    }
}
