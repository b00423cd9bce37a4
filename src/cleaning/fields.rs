// src/cleaning/fields.rs
//
// One normalizer per listing field. Each takes the raw text (possibly absent)
// and returns the typed value or `None`; none of them can fail or panic.
// Every normalizer is idempotent on its own output.

use crate::cities::SUPPORTED_CITIES;
use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

pub const SQFT_PER_ACRE: f64 = 43_560.0;
pub const EARLIEST_YEAR_BUILT: i32 = 1800;

static NUMBER_WITH_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)[a-z.]*$").expect("numeric field regex")
});
static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").expect("first number regex"));
static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("leading integer regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static COMMA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,(?:\s*,)*\s*").expect("comma run regex"));
static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("slug separator regex"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)\s?|\d{3}[-.])\d{3}[-.]\d{4}").expect("phone regex")
});
static ACRE_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\d|\b)ac(?:res?)?\b").expect("acre unit regex"));
static SQFT_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d|\b)(?:sq\.?\s*f(?:ee)?t|sq|f(?:ee)?t|sf)\b").expect("square foot unit regex")
});
static AGENT_BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)contact\s+agent|listing\s+agent:?|listed\s+by:?|courtesy\s+of:?|presented\s+by:?|\bagent:|\bphone:|\boffice:|\bcell:",
    )
    .expect("agent boilerplate regex")
});

/// True when a raw value counts as missing: absent, empty, or only whitespace.
pub fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !is_missing(Some(*s)))
}

fn non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// "$481,999" -> 481999.0. Anything that is not a plain amount once the
/// currency symbol, separators and spaces are gone yields `None`.
pub fn clean_price(value: Option<&str>) -> Option<f64> {
    let raw = present(value)?;
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if !cleaned.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    cleaned.parse::<f64>().ok().and_then(non_negative)
}

/// Beds, baths and square footage. Thousands separators and a trailing unit
/// word are tolerated ("1,500 sqft", "3 bd").
pub fn clean_numeric_field(value: Option<&str>) -> Option<f64> {
    let raw = present(value)?;
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let caps = NUMBER_WITH_UNIT_RE.captures(&cleaned)?;
    caps[1].parse::<f64>().ok().and_then(non_negative)
}

/// Year built, bounded to 1800 ..= next year.
pub fn clean_year_built(value: Option<&str>) -> Option<i32> {
    clean_year_built_as_of(value, chrono::Local::now().year())
}

pub fn clean_year_built_as_of(value: Option<&str>, current_year: i32) -> Option<i32> {
    let raw = present(value)?.trim();
    // Spreadsheet exports store whole years as "1995.0".
    let digits = raw.strip_suffix(".0").unwrap_or(raw);
    let year = digits.parse::<i32>().ok()?;
    (EARLIEST_YEAR_BUILT..=current_year + 1)
        .contains(&year)
        .then_some(year)
}

/// Lot size in acres. "0.10 Ac" -> 0.10, "4356 Sq Ft" -> 0.10, a bare
/// number is taken as acres.
pub fn clean_lot_size(value: Option<&str>) -> Option<f64> {
    let raw = present(value)?.trim().to_lowercase().replace(',', "");
    let number = FIRST_NUMBER_RE.find(&raw)?;
    let amount = number.as_str().parse::<f64>().ok()?;

    let acres = if ACRE_UNIT_RE.is_match(&raw) {
        amount
    } else if SQFT_UNIT_RE.is_match(&raw) {
        amount / SQFT_PER_ACRE
    } else {
        amount
    };
    non_negative(acres)
}

/// Leading space count: "2 Car" -> 2. No leading digit -> `None`.
pub fn clean_garage(value: Option<&str>) -> Option<u32> {
    let raw = present(value)?.trim();
    LEADING_INT_RE.find(raw)?.as_str().parse().ok()
}

/// Collapses whitespace and comma runs, trims trailing punctuation.
pub fn clean_address(value: Option<&str>) -> Option<String> {
    let raw = present(value)?;
    let collapsed = WHITESPACE_RE.replace_all(raw, " ");
    let commas = COMMA_RUN_RE.replace_all(&collapsed, ", ");
    let trimmed = commas
        .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':') || c.is_whitespace());
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Canonical slug: lowercase, trimmed, word separators as '-'.
pub fn clean_city(value: Option<&str>) -> Option<String> {
    let raw = present(value)?.trim().to_lowercase();
    let slug = SLUG_SEPARATOR_RE.replace_all(&raw, "-");
    Some(slug.into_owned())
}

/// Human-readable city name. Known slugs use the lookup table, anything else
/// is title-cased word by word.
pub fn display_city(value: Option<&str>) -> Option<String> {
    let slug = clean_city(value)?;
    let known = SUPPORTED_CITIES.iter().find(|c| {
        c.slug == slug || clean_city(Some(c.display_name)).as_deref() == Some(slug.as_str())
    });
    if let Some(city) = known {
        return Some(city.display_name.to_string());
    }

    let words: Vec<String> = slug
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            // Only the first char of a multi-char uppercase form stays capital ("ß" -> "Ss").
            let mut upper = first.to_uppercase();
            upper
                .next()
                .into_iter()
                .chain(upper.flat_map(char::to_lowercase))
                .chain(chars)
                .collect()
        })
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// Strips "Contact Agent", phone numbers and stray labels, leaving the name.
pub fn clean_agent(value: Option<&str>) -> Option<String> {
    let mut current = present(value)?.to_string();
    // Strip until nothing else matches.
    loop {
        let without_phones = PHONE_RE.replace_all(&current, " ");
        let stripped = AGENT_BOILERPLATE_RE.replace_all(&without_phones, " ");
        let next = WHITESPACE_RE.replace_all(&stripped, " ").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    let name = current.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '|' | ',' | '-' | ':' | '/' | '.' | '•')
    });
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(is_missing(Some("   \t")));
        assert!(!is_missing(Some("0")));
    }

    #[test]
    fn test_clean_price() {
        assert_eq!(clean_price(Some("$481,999")), Some(481999.0));
        assert_eq!(clean_price(Some("$1,234,567")), Some(1234567.0));
        assert_eq!(clean_price(Some(" 300000 ")), Some(300000.0));
        assert_eq!(clean_price(Some("Call for price")), None);
        assert_eq!(clean_price(Some("-5")), None);
        assert_eq!(clean_price(Some("inf")), None);
        assert_eq!(clean_price(Some("")), None);
        assert_eq!(clean_price(None), None);
    }

    #[test]
    fn test_clean_numeric_field() {
        assert_eq!(clean_numeric_field(Some("1,252")), Some(1252.0));
        assert_eq!(clean_numeric_field(Some("3")), Some(3.0));
        assert_eq!(clean_numeric_field(Some("2.5 ba")), Some(2.5));
        assert_eq!(clean_numeric_field(Some("1,500 Sq. Ft.")), Some(1500.0));
        assert_eq!(clean_numeric_field(Some("-1")), None);
        assert_eq!(clean_numeric_field(Some("N/A")), None);
        assert_eq!(clean_numeric_field(Some("")), None);
    }

    #[test]
    fn test_clean_year_built() {
        assert_eq!(clean_year_built_as_of(Some("1919"), 2025), Some(1919));
        assert_eq!(clean_year_built_as_of(Some("2024"), 2025), Some(2024));
        assert_eq!(clean_year_built_as_of(Some("2026"), 2025), Some(2026));
        assert_eq!(clean_year_built_as_of(Some("2027"), 2025), None);
        assert_eq!(clean_year_built_as_of(Some("1995.0"), 2025), Some(1995));
        assert_eq!(clean_year_built_as_of(Some("1799"), 2025), None);
        assert_eq!(clean_year_built_as_of(Some("new"), 2025), None);
        assert_eq!(clean_year_built(Some("")), None);
        assert_eq!(clean_year_built(Some("1919")), Some(1919));
    }

    #[test]
    fn test_clean_lot_size() {
        assert_eq!(clean_lot_size(Some("0.10 Ac")), Some(0.10));
        assert_eq!(clean_lot_size(Some("4356 Sq Ft")), Some(0.10));
        assert_eq!(clean_lot_size(Some("43,560 sq ft")), Some(1.0));
        assert_eq!(clean_lot_size(Some("1.5 Acres")), Some(1.5));
        assert_eq!(clean_lot_size(Some("0.25")), Some(0.25));
        assert_eq!(clean_lot_size(Some("1.5acres")), Some(1.5));
        assert_eq!(clean_lot_size(Some("8,712 sq. ft.")), Some(0.2));
        assert_eq!(clean_lot_size(Some("5,000 sq ft backyard")), Some(5000.0 / SQFT_PER_ACRE));
        assert_eq!(clean_lot_size(Some("none")), None);
        assert_eq!(clean_lot_size(Some("")), None);
    }

    #[test]
    fn test_clean_garage() {
        assert_eq!(clean_garage(Some("2 Car")), Some(2));
        assert_eq!(clean_garage(Some("2")), Some(2));
        assert_eq!(clean_garage(Some(" 3 ")), Some(3));
        assert_eq!(clean_garage(Some("Garage: 2")), None);
        assert_eq!(clean_garage(Some("")), None);
        assert_eq!(clean_garage(None), None);
    }

    #[test]
    fn test_clean_address() {
        assert_eq!(
            clean_address(Some("  123  Main St ,, Provo,  UT 84601, ")).as_deref(),
            Some("123 Main St, Provo, UT 84601")
        );
        assert_eq!(
            clean_address(Some("456 N 100 W, , , Orem.")).as_deref(),
            Some("456 N 100 W, Orem")
        );
        assert_eq!(clean_address(Some(" , ,")), None);
        assert_eq!(clean_address(Some("")), None);
    }

    #[test]
    fn test_clean_city_and_display() {
        assert_eq!(clean_city(Some("salt-lake-city")).as_deref(), Some("salt-lake-city"));
        assert_eq!(clean_city(Some("  Provo ")).as_deref(), Some("provo"));
        assert_eq!(clean_city(Some("Salt Lake City")).as_deref(), Some("salt-lake-city"));
        assert_eq!(display_city(Some("salt-lake-city")).as_deref(), Some("Salt Lake City"));
        assert_eq!(display_city(Some("west-valley")).as_deref(), Some("West Valley City"));
        assert_eq!(display_city(Some("park-city")).as_deref(), Some("Park City"));
        assert_eq!(display_city(Some("straße")).as_deref(), Some("Straße"));
        assert_eq!(display_city(Some(" -ß")).as_deref(), Some("Ss"));
        assert_eq!(display_city(Some(" ")), None);
    }

    #[test]
    fn test_clean_agent() {
        assert_eq!(
            clean_agent(Some("Contact Agent John Doe 801-555-1234")).as_deref(),
            Some("John Doe")
        );
        assert_eq!(
            clean_agent(Some("Listing Agent: Jane Smith | (385) 555-0199")).as_deref(),
            Some("Jane Smith")
        );
        assert_eq!(clean_agent(Some("Courtesy of Amy Lee")).as_deref(), Some("Amy Lee"));
        assert_eq!(clean_agent(Some("Contact Agent 801-555-1234")), None);
        assert_eq!(clean_agent(Some("   ")), None);
        assert_eq!(clean_agent(None), None);
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        let prices = ["$481,999", "Call", "", "12.5"];
        for raw in prices {
            let once = clean_price(Some(raw));
            let twice = clean_price(once.map(|v| v.to_string()).as_deref());
            assert_eq!(once, twice, "price {raw:?}");
        }

        let counts = ["1,500 sqft", "3", "2.5 ba", "x"];
        for raw in counts {
            let once = clean_numeric_field(Some(raw));
            let twice = clean_numeric_field(once.map(|v| v.to_string()).as_deref());
            assert_eq!(once, twice, "numeric {raw:?}");
        }

        let years = ["1919", "1799", "1995.0"];
        for raw in years {
            let once = clean_year_built(Some(raw));
            let twice = clean_year_built(once.map(|v| v.to_string()).as_deref());
            assert_eq!(once, twice, "year {raw:?}");
        }

        let lots = ["0.10 Ac", "4356 Sq Ft", "2", "none", "5,000 sq ft backyard"];
        for raw in lots {
            let once = clean_lot_size(Some(raw));
            let twice = clean_lot_size(once.map(|v| v.to_string()).as_deref());
            assert_eq!(once, twice, "lot {raw:?}");
        }

        let garages = ["2 Car", "", "Garage"];
        for raw in garages {
            let once = clean_garage(Some(raw));
            let twice = clean_garage(once.map(|v| v.to_string()).as_deref());
            assert_eq!(once, twice, "garage {raw:?}");
        }

        let addresses = ["a, , , b", " 12 Elm ,, Lehi. ", ",,"];
        for raw in addresses {
            let once = clean_address(Some(raw));
            assert_eq!(clean_address(once.as_deref()), once, "address {raw:?}");
        }

        let cities = ["Salt Lake City", " provo ", "west_jordan", " -ß", "ßandy"];
        for raw in cities {
            let slug = clean_city(Some(raw));
            assert_eq!(clean_city(slug.as_deref()), slug, "city {raw:?}");
            let shown = display_city(Some(raw));
            assert_eq!(display_city(shown.as_deref()), shown, "display {raw:?}");
        }

        let agents = [
            "Contact Agent John Doe 801-555-1234",
            "Listed by: Amy | 801.555.0000",
            "Contact Agent",
        ];
        for raw in agents {
            let once = clean_agent(Some(raw));
            assert_eq!(clean_agent(once.as_deref()), once, "agent {raw:?}");
        }
    }
}
