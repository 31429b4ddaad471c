use crate::query::Query;
use crate::signals::{any_fires, Haystack};
use hostel_catalog::CatalogRecord;

/// A record is a candidate when the term appears in its searchable text or
/// any signal rule fires. Rules are OR-ed; there is no conjunction.
#[must_use]
pub fn is_candidate(query: &Query, record: &CatalogRecord) -> bool {
    let haystack = Haystack::new(record);
    haystack.text_contains(query.term()) || any_fires(query, &haystack)
}

/// Keeps candidates in their input order.
#[must_use]
pub fn filter_candidates(query: &Query, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let scanned = records.len();
    let candidates: Vec<CatalogRecord> = records
        .into_iter()
        .filter(|record| is_candidate(query, record))
        .collect();
    log::debug!(
        "Filter '{}': {} of {} records are candidates",
        query.term(),
        candidates.len(),
        scanned
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_catalog::{AcType, Gender, RoomOffering, WashroomType};

    fn ids(records: &[CatalogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn query(raw: &str) -> Query {
        Query::parse(raw).unwrap()
    }

    #[test]
    fn ac_query_keeps_only_records_with_an_ac_room() {
        let records = vec![
            CatalogRecord::new("cool", "Birch House")
                .room(RoomOffering::new(WashroomType::Common, 3, AcType::NonAc, 9000))
                .room(RoomOffering::new(WashroomType::Attached, 1, AcType::Ac, 20000)),
            CatalogRecord::new("warm", "Cedar House")
                .room(RoomOffering::new(WashroomType::Common, 3, AcType::NonAc, 9000)),
        ];
        assert_eq!(ids(&filter_candidates(&query("ac"), records)), vec!["cool"]);
    }

    #[test]
    fn year_pattern_matches_label_digit() {
        let records = vec![
            CatalogRecord::new("y2", "Birch House").year_of_study("2nd_year"),
            CatalogRecord::new("y3", "Cedar House").year_of_study("3rd_year"),
        ];
        assert_eq!(ids(&filter_candidates(&query("2nd year"), records)), vec!["y2"]);
    }

    #[test]
    fn cheap_query_uses_budget_ceiling() {
        let records = vec![
            CatalogRecord::new("low", "Birch House").price_range(12000, 14000),
            CatalogRecord::new("edge", "Cedar House").price_range(15000, 16000),
            CatalogRecord::new("high", "Elm House").price_range(30000, 36000),
        ];
        assert_eq!(
            ids(&filter_candidates(&query("cheap"), records)),
            vec!["low", "edge"]
        );
    }

    #[test]
    fn synonyms_select_gender_family() {
        let records = vec![
            CatalogRecord::new("f", "Birch House").gender(Gender::Female),
            CatalogRecord::new("m", "Cedar House").gender(Gender::Male),
        ];
        assert_eq!(ids(&filter_candidates(&query("girls"), records.clone())), vec!["f"]);
        assert_eq!(ids(&filter_candidates(&query("female"), records.clone())), vec!["f"]);
        assert_eq!(ids(&filter_candidates(&query("boys"), records)), vec!["m"]);
    }

    #[test]
    fn year_label_text_alone_makes_a_candidate() {
        let record = CatalogRecord::new("1", "Birch House").year_of_study("final_year");
        assert!(is_candidate(&query("final"), &record));
    }

    #[test]
    fn rules_are_or_ed_not_and_ed() {
        let records = vec![
            CatalogRecord::new("cheap-only", "Birch House").price_range(10000, 11000),
            CatalogRecord::new("ac-only", "Cedar House")
                .price_range(30000, 32000)
                .room(RoomOffering::new(WashroomType::Attached, 1, AcType::Ac, 32000)),
            CatalogRecord::new("neither", "Elm House").price_range(20000, 21000),
        ];
        assert_eq!(
            ids(&filter_candidates(&query("cheap ac rooms"), records)),
            vec!["cheap-only", "ac-only"]
        );
    }

    #[test]
    fn sparse_records_are_tolerated() {
        let bare = CatalogRecord::default();
        assert!(!is_candidate(&query("birch"), &bare));
        assert!(!is_candidate(&query("single"), &bare));
        assert!(!is_candidate(&query("girls"), &bare));
    }
}
