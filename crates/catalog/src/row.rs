use crate::types::{
    AcType, CatalogRecord, Gender, Pricing, RecordId, RoomOffering, Warden, WashroomType,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Flat row shape returned by the hosted `hostels` table with its `rooms`
/// relation embedded. Every column is optional so one incomplete listing
/// never fails a whole fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostelRow {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub branch: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub year_of_study: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub warden_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub warden_contact: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub warden_email: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub min_price: u64,
    #[serde(deserialize_with = "lenient_amount")]
    pub max_price: u64,
    #[serde(deserialize_with = "lenient_amount")]
    pub mess_fees: u64,
    #[serde(deserialize_with = "lenient_amount")]
    pub laundry_fees: u64,
    #[serde(deserialize_with = "lenient_text")]
    pub geocode: Option<String>,
    pub rooms: Option<Vec<RoomRow>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRow {
    #[serde(deserialize_with = "lenient_text")]
    pub washroom_type: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub occupancy: u64,
    #[serde(deserialize_with = "lenient_text")]
    pub ac_type: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub price: u64,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: Option<String>,
}

impl From<RoomRow> for RoomOffering {
    fn from(row: RoomRow) -> Self {
        Self {
            washroom: row.washroom_type.as_deref().and_then(WashroomType::parse),
            occupancy: u32::try_from(row.occupancy).unwrap_or(u32::MAX),
            ac_type: row.ac_type.as_deref().and_then(AcType::parse),
            price: row.price,
            notes: row.notes.unwrap_or_default(),
        }
    }
}

impl From<HostelRow> for CatalogRecord {
    fn from(row: HostelRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            gender: row.gender.as_deref().and_then(Gender::parse),
            branch: row.branch.unwrap_or_default(),
            year_of_study: row.year_of_study.unwrap_or_default(),
            warden: Warden {
                name: row.warden_name.unwrap_or_default(),
                phone: row.warden_contact.unwrap_or_default(),
                email: row.warden_email.unwrap_or_default(),
            },
            pricing: Pricing {
                min_price: row.min_price,
                max_price: row.max_price,
                mess_fees: row.mess_fees,
                laundry_fees: row.laundry_fees,
            },
            geocode: row.geocode.filter(|token| !token.trim().is_empty()),
            rooms: row
                .rooms
                .unwrap_or_default()
                .into_iter()
                .map(RoomOffering::from)
                .collect(),
        }
    }
}

/// Decodes a store body that must be a JSON array of rows. A row that does
/// not decode is logged and skipped; only a non-array body is an error.
pub fn decode_rows(bytes: &[u8]) -> serde_json::Result<Vec<HostelRow>> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let total = values.len();
    let rows: Vec<HostelRow> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(row) => Some(row),
            Err(err) => {
                log::warn!("Skipping malformed catalog row {idx}: {err}");
                None
            }
        })
        .collect();
    if rows.len() < total {
        log::warn!("Decoded {} of {total} catalog rows", rows.len());
    }
    Ok(rows)
}

/// Text columns keep strings and stringify numbers; any other JSON type is
/// treated as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Fee columns arrive as integers, floats, numeric strings or null depending
/// on how the row was entered. Negative and unparseable values become 0.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().map_or(0, |f| {
            if f > 0.0 {
                f as u64
            } else {
                0
            }
        }),
        _ => 0,
    })
}
