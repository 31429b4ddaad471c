use crate::query::Query;
use crate::signals::{evaluate_all, Haystack, MatchContext};
use hostel_catalog::CatalogRecord;

/// A candidate with its relevance score. Holds its own copy of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub record: CatalogRecord,
    pub score: u32,
    pub context: MatchContext,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResults {
    pub results: Vec<ScoredResult>,
    /// Candidates scored, before truncation
    pub total_matches: usize,
}

/// Sum of every firing signal's weight, plus the fields that matched.
#[must_use]
pub fn score_record(query: &Query, record: &CatalogRecord) -> (u32, MatchContext) {
    let haystack = Haystack::new(record);
    let mut context = MatchContext::default();
    let mut score = 0u32;
    for hit in evaluate_all(query, &haystack) {
        score = score.saturating_add(hit.weight);
        if let Some(flag) = hit.flag {
            context.mark(flag);
        }
    }
    (score, context)
}

/// Scores candidates, orders them by descending score and keeps the first
/// `limit`. Equal scores keep their input order.
#[must_use]
pub fn rank(query: &Query, candidates: Vec<CatalogRecord>, limit: usize) -> RankedResults {
    let mut results: Vec<ScoredResult> = candidates
        .into_iter()
        .map(|record| {
            let (score, context) = score_record(query, &record);
            ScoredResult {
                record,
                score,
                context,
            }
        })
        .collect();

    let total_matches = results.len();
    // `sort_by` is stable, which is what keeps ties in input order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);

    RankedResults {
        results,
        total_matches,
    }
}
