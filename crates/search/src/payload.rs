use crate::engine::SearchOutcome;
use crate::rank::ScoredResult;
use crate::signals::MatchContext;
use hostel_catalog::{RoomOffering, WashroomType};
use hostel_protocol::{
    AmenitiesSummary, HostelHit, MatchContextPayload, PricingPayload, SearchMetadata,
    SearchResponse, WardenPayload,
};
use std::time::{SystemTime, UNIX_EPOCH};

#[must_use]
pub fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Wire reply for a completed search.
#[must_use]
pub fn build_response(outcome: &SearchOutcome, timestamp: u64) -> SearchResponse {
    match outcome {
        SearchOutcome::EmptyQuery { suggestions } => {
            SearchResponse::empty_query(suggestions.clone())
        }
        SearchOutcome::Ranked(results) => {
            let hostels: Vec<HostelHit> = results.results.iter().map(HostelHit::from).collect();
            let metadata = SearchMetadata {
                total_matches: results.total_matches,
                returned_results: hostels.len(),
                search_term: results.search_term.clone(),
                timestamp,
            };
            SearchResponse::results(hostels, metadata)
        }
    }
}

impl From<&ScoredResult> for HostelHit {
    fn from(scored: &ScoredResult) -> Self {
        let record = &scored.record;
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            description: record.description.clone(),
            gender: record.gender_label().to_string(),
            branch: record.branch.clone(),
            year_of_study: record.year_of_study.clone(),
            warden: WardenPayload {
                name: record.warden.name.clone(),
                contact: record.warden.phone.clone(),
                email: record.warden.email.clone(),
            },
            pricing: PricingPayload {
                min_price: record.pricing.min_price,
                max_price: record.pricing.max_price,
                mess_fees: record.pricing.mess_fees,
                laundry_fees: record.pricing.laundry_fees,
            },
            geocode: record.geocode.clone(),
            amenities: summarize_rooms(&record.rooms),
            relevance_score: scored.score,
            match_context: MatchContextPayload::from(scored.context),
        }
    }
}

impl From<MatchContext> for MatchContextPayload {
    fn from(ctx: MatchContext) -> Self {
        Self {
            name_match: ctx.name,
            description_match: ctx.description,
            gender_match: ctx.gender,
            branch_match: ctx.branch,
            warden_match: ctx.warden,
        }
    }
}

#[must_use]
pub fn summarize_rooms(rooms: &[RoomOffering]) -> AmenitiesSummary {
    let washroom_types = [WashroomType::Attached, WashroomType::Common]
        .into_iter()
        .filter(|kind| rooms.iter().any(|room| room.washroom == Some(*kind)))
        .map(|kind| kind.label().to_string())
        .collect();

    let mut occupancies: Vec<u32> = rooms
        .iter()
        .map(|room| room.occupancy)
        .filter(|n| *n > 0)
        .collect();
    occupancies.sort_unstable();
    occupancies.dedup();

    AmenitiesSummary {
        ac_available: rooms.iter().any(RoomOffering::is_ac),
        washroom_types,
        occupancies,
        room_count: rooms.len(),
        room_price_min: rooms.iter().map(|room| room.price).min(),
        room_price_max: rooms.iter().map(|room| room.price).max(),
    }
}
