use hostel_catalog::Gender;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fee ceiling for the budget tier (inclusive)
pub const CHEAP_MAX_PRICE: u64 = 15_000;
/// Fee floor for the premium tier (inclusive)
pub const PREMIUM_MIN_PRICE: u64 = 25_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    AirConditioning,
    AttachedWashroom,
    CommonWashroom,
    SingleOccupancy,
    DoubleOccupancy,
    TripleOccupancy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTier {
    Budget,
    Premium,
}

/// Whole-term synonyms that select a gender family.
pub static GENDER_SYNONYMS: &[(&str, Gender)] = &[
    ("girl", Gender::Female),
    ("girls", Gender::Female),
    ("women", Gender::Female),
    ("female", Gender::Female),
    ("boy", Gender::Male),
    ("boys", Gender::Male),
    ("men", Gender::Male),
    ("male", Gender::Male),
];

/// Keywords matched anywhere inside the term.
pub static AMENITY_KEYWORDS: &[(&str, Amenity)] = &[
    ("ac", Amenity::AirConditioning),
    ("air condition", Amenity::AirConditioning),
    ("attached", Amenity::AttachedWashroom),
    ("private", Amenity::AttachedWashroom),
    ("common", Amenity::CommonWashroom),
    ("shared", Amenity::CommonWashroom),
    ("single", Amenity::SingleOccupancy),
    ("double", Amenity::DoubleOccupancy),
    ("triple", Amenity::TripleOccupancy),
];

/// Keywords matched anywhere inside the term.
pub static PRICE_TIER_KEYWORDS: &[(&str, PriceTier)] = &[
    ("cheap", PriceTier::Budget),
    ("budget", PriceTier::Budget),
    ("low", PriceTier::Budget),
    ("expensive", PriceTier::Premium),
    ("premium", PriceTier::Premium),
    ("high", PriceTier::Premium),
];

// "2nd year", "year 2", "2 yr" style phrases, or a lone digit / ordinal.
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)(?:st|nd|rd|th)?[\s_-]*(?:year|yr)|(?:year|yr)[\s_-]*(\d)|^(\d)(?:st|nd|rd|th)?$")
        .expect("year pattern is valid")
});

/// Trim and lower-case raw user input.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A normalized, non-empty search term with its keyword interpretations
/// resolved up front so evaluators stay declarative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    term: String,
    year_digit: Option<char>,
    gender_family: Option<Gender>,
    amenities: Vec<Amenity>,
    price_tiers: Vec<PriceTier>,
}

impl Query {
    /// Returns `None` when the input is blank; callers must short-circuit
    /// rather than match everything.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let term = normalize(raw);
        if term.is_empty() {
            return None;
        }

        let year_digit = YEAR_PATTERN.captures(&term).and_then(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .next()
                .and_then(|m| m.as_str().chars().next())
        });

        let gender_family = GENDER_SYNONYMS
            .iter()
            .find(|(word, _)| *word == term)
            .map(|(_, gender)| *gender);

        let mut amenities = Vec::new();
        for (keyword, amenity) in AMENITY_KEYWORDS {
            if term.contains(keyword) && !amenities.contains(amenity) {
                amenities.push(*amenity);
            }
        }

        let mut price_tiers = Vec::new();
        for (keyword, tier) in PRICE_TIER_KEYWORDS {
            if term.contains(keyword) && !price_tiers.contains(tier) {
                price_tiers.push(*tier);
            }
        }

        Some(Self {
            term,
            year_digit,
            gender_family,
            amenities,
            price_tiers,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Digit captured by the year pattern, if the term names a year of study
    #[must_use]
    pub const fn year_digit(&self) -> Option<char> {
        self.year_digit
    }

    #[must_use]
    pub const fn gender_family(&self) -> Option<Gender> {
        self.gender_family
    }

    #[must_use]
    pub fn wants(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    #[must_use]
    pub fn wants_tier(&self, tier: PriceTier) -> bool {
        self.price_tiers.contains(&tier)
    }
}
