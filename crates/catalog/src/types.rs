use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque record identifier. Hosted tables hand out either integer keys or
/// uuid strings, so both are accepted and kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Missing(()),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Int(n) => Self(n.to_string()),
            RawId::Missing(()) => Self::default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Lenient parse of a stored gender column; unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WashroomType {
    Attached,
    Common,
}

impl WashroomType {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "attached" => Some(Self::Attached),
            "common" => Some(Self::Common),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attached => "attached",
            Self::Common => "common",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcType {
    Ac,
    NonAc,
}

impl AcType {
    /// Accepts the spellings seen in hand-entered catalogs ("non-ac", "Non AC", ...).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match compact.as_str() {
            "ac" => Some(Self::Ac),
            "nonac" => Some(Self::NonAc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ac => "ac",
            Self::NonAc => "non_ac",
        }
    }
}

/// Warden contact block, free text as entered by the hostel office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warden {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Annual fees. `min_price <= max_price` is expected but not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub min_price: u64,
    pub max_price: u64,
    pub mess_fees: u64,
    pub laundry_fees: u64,
}

/// One priced room configuration, owned by its hostel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOffering {
    pub washroom: Option<WashroomType>,
    pub occupancy: u32,
    pub ac_type: Option<AcType>,
    pub price: u64,
    pub notes: String,
}

impl RoomOffering {
    #[must_use]
    pub fn new(washroom: WashroomType, occupancy: u32, ac_type: AcType, price: u64) -> Self {
        Self {
            washroom: Some(washroom),
            occupancy,
            ac_type: Some(ac_type),
            price,
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn is_ac(&self) -> bool {
        self.ac_type == Some(AcType::Ac)
    }
}

/// A hostel listing as fetched from the store. Text fields missing upstream
/// are empty strings and a missing room list is an empty `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub gender: Option<Gender>,
    pub branch: String,
    pub year_of_study: String,
    pub warden: Warden,
    pub pricing: Pricing,
    pub geocode: Option<String>,
    pub rooms: Vec<RoomOffering>,
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set gender
    #[must_use]
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Builder: set branch
    #[must_use]
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Builder: set year-of-study label
    #[must_use]
    pub fn year_of_study(mut self, year: impl Into<String>) -> Self {
        self.year_of_study = year.into();
        self
    }

    /// Builder: set warden name
    #[must_use]
    pub fn warden_name(mut self, name: impl Into<String>) -> Self {
        self.warden.name = name.into();
        self
    }

    /// Builder: set fee range
    #[must_use]
    pub fn price_range(mut self, min_price: u64, max_price: u64) -> Self {
        self.pricing.min_price = min_price;
        self.pricing.max_price = max_price;
        self
    }

    /// Builder: add a room
    #[must_use]
    pub fn room(mut self, room: RoomOffering) -> Self {
        self.rooms.push(room);
        self
    }

    /// Gender label used for text matching; empty when the column was absent.
    #[must_use]
    pub fn gender_label(&self) -> &'static str {
        self.gender.map_or("", Gender::label)
    }

    #[must_use]
    pub fn has_ac_room(&self) -> bool {
        self.rooms.iter().any(RoomOffering::is_ac)
    }

    #[must_use]
    pub fn has_washroom(&self, washroom: WashroomType) -> bool {
        self.rooms.iter().any(|room| room.washroom == Some(washroom))
    }

    #[must_use]
    pub fn has_occupancy(&self, occupancy: u32) -> bool {
        self.rooms.iter().any(|room| room.occupancy == occupancy)
    }
}
