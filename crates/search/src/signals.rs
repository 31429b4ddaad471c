use crate::query::{Amenity, PriceTier, Query, CHEAP_MAX_PRICE, PREMIUM_MIN_PRICE};
use hostel_catalog::{CatalogRecord, Gender, WashroomType};

/// One independent relevance heuristic. Weights are additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    ExactName,
    PartialName,
    GenderLabel,
    FemaleSynonym,
    MaleSynonym,
    Branch,
    Description,
    WardenName,
    YearPattern,
    AirConditioning,
    AttachedWashroom,
    CommonWashroom,
    SingleOccupancy,
    DoubleOccupancy,
    TripleOccupancy,
    BudgetPrice,
    PremiumPrice,
}

impl Signal {
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::ExactName => 100,
            Self::PartialName => 80,
            Self::GenderLabel => 70,
            Self::FemaleSynonym | Self::MaleSynonym => 60,
            Self::Branch => 50,
            Self::AirConditioning => 45,
            Self::YearPattern | Self::AttachedWashroom | Self::CommonWashroom => 40,
            Self::SingleOccupancy | Self::DoubleOccupancy | Self::TripleOccupancy => 35,
            Self::Description => 30,
            Self::BudgetPrice | Self::PremiumPrice => 25,
            Self::WardenName => 20,
        }
    }
}

/// Which record field a text signal matched, reported back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFlag {
    Name,
    Description,
    Gender,
    Branch,
    Warden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchContext {
    pub name: bool,
    pub description: bool,
    pub gender: bool,
    pub branch: bool,
    pub warden: bool,
}

impl MatchContext {
    pub fn mark(&mut self, flag: MatchFlag) {
        match flag {
            MatchFlag::Name => self.name = true,
            MatchFlag::Description => self.description = true,
            MatchFlag::Gender => self.gender = true,
            MatchFlag::Branch => self.branch = true,
            MatchFlag::Warden => self.warden = true,
        }
    }
}

/// Lower-cased view of the searchable text of one record, built once per
/// record per search.
pub struct Haystack<'a> {
    pub record: &'a CatalogRecord,
    pub name: String,
    pub description: String,
    pub gender: &'static str,
    pub branch: String,
    pub year_of_study: String,
    pub warden_name: String,
}

impl<'a> Haystack<'a> {
    #[must_use]
    pub fn new(record: &'a CatalogRecord) -> Self {
        Self {
            record,
            name: record.name.trim().to_lowercase(),
            description: record.description.to_lowercase(),
            gender: record.gender_label(),
            branch: record.branch.to_lowercase(),
            year_of_study: record.year_of_study.to_lowercase(),
            warden_name: record.warden.name.to_lowercase(),
        }
    }

    /// True when the term occurs in any searchable text field.
    #[must_use]
    pub fn text_contains(&self, term: &str) -> bool {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.gender,
            self.branch.as_str(),
            self.year_of_study.as_str(),
            self.warden_name.as_str(),
        ]
        .join(" ")
        .contains(term)
    }
}

pub type Evaluator = fn(&Query, &Haystack<'_>) -> bool;

pub struct SignalRule {
    pub signal: Signal,
    pub flag: Option<MatchFlag>,
    evaluate: Evaluator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalHit {
    pub signal: Signal,
    pub weight: u32,
    pub flag: Option<MatchFlag>,
}

impl SignalRule {
    const fn new(signal: Signal, flag: Option<MatchFlag>, evaluate: Evaluator) -> Self {
        Self {
            signal,
            flag,
            evaluate,
        }
    }

    #[must_use]
    pub fn evaluate(&self, query: &Query, haystack: &Haystack<'_>) -> Option<SignalHit> {
        (self.evaluate)(query, haystack).then_some(SignalHit {
            signal: self.signal,
            weight: self.signal.weight(),
            flag: self.flag,
        })
    }
}

pub static SIGNAL_RULES: &[SignalRule] = &[
    SignalRule::new(Signal::ExactName, Some(MatchFlag::Name), |q, h| {
        h.name == q.term()
    }),
    SignalRule::new(Signal::PartialName, Some(MatchFlag::Name), |q, h| {
        h.name != q.term() && h.name.contains(q.term())
    }),
    SignalRule::new(Signal::GenderLabel, Some(MatchFlag::Gender), |q, h| {
        !h.gender.is_empty() && h.gender.contains(q.term())
    }),
    SignalRule::new(Signal::FemaleSynonym, Some(MatchFlag::Gender), |q, h| {
        q.gender_family() == Some(Gender::Female) && h.record.gender == Some(Gender::Female)
    }),
    SignalRule::new(Signal::MaleSynonym, Some(MatchFlag::Gender), |q, h| {
        q.gender_family() == Some(Gender::Male) && h.record.gender == Some(Gender::Male)
    }),
    SignalRule::new(Signal::Branch, Some(MatchFlag::Branch), |q, h| {
        h.branch.contains(q.term())
    }),
    SignalRule::new(Signal::Description, Some(MatchFlag::Description), |q, h| {
        h.description.contains(q.term())
    }),
    SignalRule::new(Signal::WardenName, Some(MatchFlag::Warden), |q, h| {
        h.warden_name.contains(q.term())
    }),
    SignalRule::new(Signal::YearPattern, None, |q, h| {
        q.year_digit()
            .is_some_and(|digit| h.year_of_study.contains(digit))
    }),
    SignalRule::new(Signal::AirConditioning, None, |q, h| {
        q.wants(Amenity::AirConditioning) && h.record.has_ac_room()
    }),
    SignalRule::new(Signal::AttachedWashroom, None, |q, h| {
        q.wants(Amenity::AttachedWashroom) && h.record.has_washroom(WashroomType::Attached)
    }),
    SignalRule::new(Signal::CommonWashroom, None, |q, h| {
        q.wants(Amenity::CommonWashroom) && h.record.has_washroom(WashroomType::Common)
    }),
    SignalRule::new(Signal::SingleOccupancy, None, |q, h| {
        q.wants(Amenity::SingleOccupancy) && h.record.has_occupancy(1)
    }),
    SignalRule::new(Signal::DoubleOccupancy, None, |q, h| {
        q.wants(Amenity::DoubleOccupancy) && h.record.has_occupancy(2)
    }),
    SignalRule::new(Signal::TripleOccupancy, None, |q, h| {
        q.wants(Amenity::TripleOccupancy) && h.record.has_occupancy(3)
    }),
    SignalRule::new(Signal::BudgetPrice, None, |q, h| {
        q.wants_tier(PriceTier::Budget) && h.record.pricing.min_price <= CHEAP_MAX_PRICE
    }),
    SignalRule::new(Signal::PremiumPrice, None, |q, h| {
        q.wants_tier(PriceTier::Premium) && h.record.pricing.min_price >= PREMIUM_MIN_PRICE
    }),
];

/// All rules that fire for this record, in table order.
#[must_use]
pub fn evaluate_all(query: &Query, haystack: &Haystack<'_>) -> Vec<SignalHit> {
    SIGNAL_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(query, haystack))
        .collect()
}

/// True when at least one rule fires.
#[must_use]
pub fn any_fires(query: &Query, haystack: &Haystack<'_>) -> bool {
    SIGNAL_RULES
        .iter()
        .any(|rule| rule.evaluate(query, haystack).is_some())
}
