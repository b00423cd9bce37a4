use crate::domain::RawListing;
use crate::scraper::SourceError;
use scraper::{ElementRef, Html, Selector};

// results page
//  └── listing card (repeated)
//       ├── mls number
//       ├── price
//       ├── address
//       ├── beds / baths / sqft
//       ├── year built
//       ├── lot size
//       ├── garage
//       └── agent (often "Contact Agent <name> <phone>")

/// CSS selectors for one listing card and its fields.
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub card: String,
    pub mls_number: String,
    pub price: String,
    pub address: String,
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub year_built: String,
    pub lot_size: String,
    pub garage: String,
    pub agent: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            card: ".listing-card".to_string(),
            mls_number: "[data-field=\"mls\"]".to_string(),
            price: "[data-field=\"price\"]".to_string(),
            address: "[data-field=\"address\"]".to_string(),
            beds: "[data-field=\"beds\"]".to_string(),
            baths: "[data-field=\"baths\"]".to_string(),
            sqft: "[data-field=\"sqft\"]".to_string(),
            year_built: "[data-field=\"year-built\"]".to_string(),
            lot_size: "[data-field=\"lot-size\"]".to_string(),
            garage: "[data-field=\"garage\"]".to_string(),
            agent: "[data-field=\"agent\"]".to_string(),
        }
    }
}

struct CompiledSelectors {
    card: Selector,
    mls_number: Selector,
    price: Selector,
    address: Selector,
    beds: Selector,
    baths: Selector,
    sqft: Selector,
    year_built: Selector,
    lot_size: Selector,
    garage: Selector,
    agent: Selector,
}

fn compile(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector)
        .map_err(|e| SourceError::HtmlParse(format!("bad selector '{selector}': {e}")))
}

impl CompiledSelectors {
    fn new(s: &SiteSelectors) -> Result<Self, SourceError> {
        Ok(Self {
            card: compile(&s.card)?,
            mls_number: compile(&s.mls_number)?,
            price: compile(&s.price)?,
            address: compile(&s.address)?,
            beds: compile(&s.beds)?,
            baths: compile(&s.baths)?,
            sqft: compile(&s.sqft)?,
            year_built: compile(&s.year_built)?,
            lot_size: compile(&s.lot_size)?,
            garage: compile(&s.garage)?,
            agent: compile(&s.agent)?,
        })
    }
}

/// Text of the first match inside `card`, whitespace-joined. Absent or blank
/// fields stay `None`; cleaning happens later.
fn field_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = card.select(selector).next()?;
    let text = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Extracts up to `limit` raw listings from a results page.
pub fn parse_listing_cards(
    html: &str,
    selectors: &SiteSelectors,
    limit: usize,
) -> Result<Vec<RawListing>, SourceError> {
    let compiled = CompiledSelectors::new(selectors)?;
    let document = Html::parse_document(html);

    let listings = document
        .select(&compiled.card)
        .take(limit)
        .map(|card| RawListing {
            mls_number: field_text(&card, &compiled.mls_number),
            price: field_text(&card, &compiled.price),
            address: field_text(&card, &compiled.address),
            beds: field_text(&card, &compiled.beds),
            baths: field_text(&card, &compiled.baths),
            sqft: field_text(&card, &compiled.sqft),
            year_built: field_text(&card, &compiled.year_built),
            lot_size: field_text(&card, &compiled.lot_size),
            garage: field_text(&card, &compiled.garage),
            agent: field_text(&card, &compiled.agent),
            city: None,
        })
        .collect();

    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="listing-card">
            <span data-field="mls">2124187</span>
            <span data-field="price">$481,999</span>
            <span data-field="address">123 Main St, Provo, UT 84601</span>
            <span data-field="beds">3</span>
            <span data-field="baths">2</span>
            <span data-field="sqft">1,500</span>
            <span data-field="lot-size">0.10 Ac</span>
            <span data-field="garage">2 Car</span>
            <div data-field="agent">Contact Agent <b>John Doe</b> 801-555-1234</div>
          </div>
          <div class="listing-card">
            <span data-field="price">Call for price</span>
            <span data-field="address">  </span>
          </div>
          <div class="listing-card"><span data-field="price">$1</span></div>
        </body></html>
    "#;

    #[test]
    fn test_parse_listing_cards() {
        let listings = parse_listing_cards(PAGE, &SiteSelectors::default(), 10).unwrap();

        assert_eq!(listings.len(), 3);
        let first = &listings[0];
        assert_eq!(first.mls_number.as_deref(), Some("2124187"));
        assert_eq!(first.price.as_deref(), Some("$481,999"));
        assert_eq!(first.sqft.as_deref(), Some("1,500"));
        assert_eq!(first.year_built, None);
        assert_eq!(
            first.agent.as_deref(),
            Some("Contact Agent John Doe 801-555-1234")
        );
        assert_eq!(listings[1].price.as_deref(), Some("Call for price"));
        assert_eq!(listings[1].address, None);
    }

    #[test]
    fn test_parse_listing_cards_respects_limit() {
        let listings = parse_listing_cards(PAGE, &SiteSelectors::default(), 2).unwrap();
        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn test_bad_selector_is_an_error() {
        let selectors = SiteSelectors {
            card: "div[".to_string(),
            ..Default::default()
        };
        let err = parse_listing_cards(PAGE, &selectors, 1).unwrap_err();
        assert!(matches!(err, SourceError::HtmlParse(_)));
    }
}
