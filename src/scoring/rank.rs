use crate::document::{ResortResult, ResultsDocument};
use crate::scoring::aggregate::resort_averages;
use crate::scoring::types::{CompositePolicy, RankedDocument, RankedResort};
use chrono::Utc;
use std::cmp::Ordering;

/// Orders resorts by composite score, best first, and numbers them from 1.
///
/// The sort is stable and has no secondary key: resorts with equal
/// composites keep their input order and still get distinct ranks.
pub fn rank_resorts<'a>(
    resorts: &'a [ResortResult],
    policy: &CompositePolicy,
) -> Vec<RankedResort<'a>> {
    let mut scored: Vec<_> = resorts
        .iter()
        .map(|resort| (resort, resort_averages(resort, policy)))
        .collect();

    scored.sort_by(|(_, a), (_, b)| {
        b.composite()
            .partial_cmp(&a.composite())
            .unwrap_or(Ordering::Equal)
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (resort, averages))| RankedResort {
            rank: idx + 1,
            averages,
            rated_cameras: resort.rated_cameras(),
            resort,
        })
        .collect()
}

/// Ranks every resort of a results document.
pub fn rank_document<'a>(
    document: &'a ResultsDocument,
    policy: &CompositePolicy,
) -> RankedDocument<'a> {
    RankedDocument {
        updated_at: &document.updated_at,
        generated_at: Utc::now(),
        resorts: rank_resorts(&document.resorts, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A resort whose single camera scores `composite` on one category.
    fn resort(key: &str, composite: f64) -> ResortResult {
        serde_json::from_value(json!({
            "resort_name": key.to_uppercase(),
            "resort_key": key,
            "cameras": [{
                "camera_name": "Base",
                "rating": { "confidence": null, "notes": "", "categories": { "snow_quality": composite } }
            }]
        }))
        .unwrap()
    }

    fn unrated(key: &str) -> ResortResult {
        serde_json::from_value(json!({
            "resort_name": key,
            "resort_key": key,
            "cameras": [{ "camera_name": "Base", "error": "no image" }]
        }))
        .unwrap()
    }

    fn order<'a>(ranked: &'a [RankedResort<'_>]) -> Vec<(&'a str, usize, f64)> {
        ranked
            .iter()
            .map(|r| (r.resort.resort_key.as_str(), r.rank, r.averages.composite()))
            .collect()
    }

    #[test]
    fn test_ranks_descending_with_stable_ties() {
        let resorts = vec![resort("r1", 7.0), resort("r2", 9.0), resort("r3", 7.0)];
        let ranked = rank_resorts(&resorts, &CompositePolicy::default());

        assert_eq!(
            order(&ranked),
            vec![("r2", 1, 9.0), ("r1", 2, 7.0), ("r3", 3, 7.0)]
        );
    }

    #[test]
    fn test_tie_order_follows_input_order() {
        let resorts = vec![resort("r3", 7.0), resort("r1", 7.0)];
        let ranked = rank_resorts(&resorts, &CompositePolicy::default());

        assert_eq!(order(&ranked), vec![("r3", 1, 7.0), ("r1", 2, 7.0)]);
    }

    #[test]
    fn test_unrated_resort_ranks_last_with_zero() {
        let resorts = vec![unrated("closed"), resort("open", 3.0)];
        let ranked = rank_resorts(&resorts, &CompositePolicy::default());

        assert_eq!(order(&ranked), vec![("open", 1, 3.0), ("closed", 2, 0.0)]);
        assert!(ranked[1].averages.is_empty());
        assert_eq!(ranked[1].rated_cameras, 0);
    }

    #[test]
    fn test_empty_input_ranks_nothing() {
        assert!(rank_resorts(&[], &CompositePolicy::default()).is_empty());
    }

    #[test]
    fn test_rank_document_is_repeatable_and_does_not_mutate() {
        let document = ResultsDocument {
            updated_at: "2026-01-10T14:00:00+00:00".to_string(),
            resorts: vec![resort("a", 4.0), unrated("b"), resort("c", 8.5)],
        };
        let snapshot = document.clone();
        let policy = CompositePolicy::default();

        let first = rank_document(&document, &policy);
        let second = rank_document(&document, &policy);

        assert_eq!(order(&first.resorts), order(&second.resorts));
        assert_eq!(
            serde_json::to_value(&first.resorts).unwrap(),
            serde_json::to_value(&second.resorts).unwrap()
        );
        assert_eq!(document, snapshot);
        assert_eq!(first.updated_at, "2026-01-10T14:00:00+00:00");
        assert_eq!(first.top().map(|r| r.resort.resort_key.as_str()), Some("c"));
        assert_eq!(first.find("b").map(|r| r.rank), Some(3));
    }
}
