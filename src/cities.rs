// cities.rs
//
// Supported search areas. Slugs are the validated input domain for fetches.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum County {
    Utah,
    SaltLake,
}

impl County {
    pub fn name(&self) -> &'static str {
        match self {
            County::Utah => "Utah County",
            County::SaltLake => "Salt Lake County",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub slug: &'static str,
    pub display_name: &'static str,
    pub county: County,
}

const fn utah(slug: &'static str, display_name: &'static str) -> City {
    City {
        slug,
        display_name,
        county: County::Utah,
    }
}

const fn salt_lake(slug: &'static str, display_name: &'static str) -> City {
    City {
        slug,
        display_name,
        county: County::SaltLake,
    }
}

pub const SUPPORTED_CITIES: &[City] = &[
    // Utah County
    utah("alpine", "Alpine"),
    utah("american-fork", "American Fork"),
    utah("eagle-mountain", "Eagle Mountain"),
    utah("highland", "Highland"),
    utah("lindon", "Lindon"),
    utah("lehi", "Lehi"),
    utah("orem", "Orem"),
    utah("provo", "Provo"),
    utah("saratoga-springs", "Saratoga Springs"),
    utah("spanish-fork", "Spanish Fork"),
    // Salt Lake County
    salt_lake("draper", "Draper"),
    salt_lake("holladay", "Holladay"),
    salt_lake("midvale", "Midvale"),
    salt_lake("millcreek", "Millcreek"),
    salt_lake("cottonwood-heights", "Cottonwood Heights"),
    salt_lake("murray", "Murray"),
    salt_lake("salt-lake-city", "Salt Lake City"),
    salt_lake("sandy", "Sandy"),
    salt_lake("south-jordan", "South Jordan"),
    salt_lake("south-salt-lake", "South Salt Lake"),
    salt_lake("sugarhouse", "Sugar House"),
    salt_lake("west-jordan", "West Jordan"),
    salt_lake("west-valley", "West Valley City"),
];

/// Looks up a supported city by its canonical slug.
pub fn find_city(slug: &str) -> Option<&'static City> {
    SUPPORTED_CITIES.iter().find(|c| c.slug == slug)
}

pub fn all_slugs() -> Vec<String> {
    SUPPORTED_CITIES.iter().map(|c| c.slug.to_string()).collect()
}
