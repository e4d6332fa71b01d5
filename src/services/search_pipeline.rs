// src/services/search_pipeline.rs
// DOCUMENTATION: Search result filter and sort pipeline
// PURPOSE: Apply optional cuisine/favorites filters and a sort order to a
// list of restaurant records, preserving input order where no order applies

use crate::models::{PriceTier, Restaurant, SortBy};
use std::cmp::Reverse;
use std::collections::HashSet;
use uuid::Uuid;

/// Resolved pipeline parameters for one search request
#[derive(Debug, Default)]
pub struct SearchFilters {
    /// Case-insensitive cuisine substring filter
    pub cuisine: Option<String>,
    /// Keep only records in the caller's favorite-id set
    pub show_favorites: bool,
    /// Absent means input order is preserved
    pub sort_by: Option<SortBy>,
}

/// Apply the filter/sort pipeline.
///
/// Filtering order: cuisine first (records without a cuisine are dropped
/// while the filter is active), then favorites against the caller-resolved
/// id set. All sorts are stable with respect to input order for equal keys.
pub fn apply(
    restaurants: Vec<Restaurant>,
    filters: &SearchFilters,
    favorite_ids: &HashSet<Uuid>,
) -> Vec<Restaurant> {
    let mut results = restaurants;

    if let Some(query) = filters
        .cuisine
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        let needle = query.to_lowercase();
        results.retain(|restaurant| {
            restaurant
                .cuisine
                .as_deref()
                .map(|cuisine| cuisine.to_lowercase().contains(&needle))
                .unwrap_or(false)
        });
    }

    if filters.show_favorites {
        results.retain(|restaurant| favorite_ids.contains(&restaurant.id));
    }

    match filters.sort_by {
        Some(SortBy::Rating) => {
            results.sort_by(|a, b| {
                b.ratings
                    .unwrap_or(0.0)
                    .total_cmp(&a.ratings.unwrap_or(0.0))
            });
        }
        Some(SortBy::Reviews) => {
            results.sort_by_key(|restaurant| Reverse(restaurant.reviews_count.unwrap_or(0)));
        }
        Some(SortBy::PriceAsc) => {
            results.sort_by_key(|restaurant| price_ordinal(restaurant.price_level));
        }
        Some(SortBy::PriceDesc) => {
            results.sort_by_key(|restaurant| Reverse(price_ordinal(restaurant.price_level)));
        }
        None => {}
    }

    results
}

/// Ordinal in the fixed price table; a record without a tier sorts as -1,
/// first ascending and last descending
fn price_ordinal(tier: Option<PriceTier>) -> i32 {
    tier.map(|t| t.ordinal()).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn restaurant(
        name: &str,
        cuisine: Option<&str>,
        price_level: Option<PriceTier>,
        ratings: Option<f64>,
        reviews_count: Option<i32>,
    ) -> Restaurant {
        let now = Utc::now();
        Restaurant {
            id: Uuid::new_v4(),
            place_id: format!("place-{}", name),
            name: name.to_string(),
            address: None,
            latitude: 14.5995,
            longitude: 120.9842,
            price_level,
            cuisine: cuisine.map(|c| c.to_string()),
            photo_url: None,
            ratings,
            reviews_count,
            created_at: now,
            updated_at: now,
        }
    }

    fn names(results: &[Restaurant]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_no_sort_preserves_input_order() {
        let input = vec![
            restaurant("b", None, None, Some(2.0), Some(1)),
            restaurant("a", None, None, Some(5.0), Some(9)),
        ];
        let output = apply(input, &SearchFilters::default(), &HashSet::new());
        assert_eq!(names(&output), vec!["b", "a"]);
    }

    #[test]
    fn test_unrecognized_sort_is_a_noop() {
        // SortBy::parse maps unknown values to None before the pipeline runs
        assert_eq!(SortBy::parse("alphabetical"), None);

        let input = vec![
            restaurant("b", None, None, Some(2.0), Some(1)),
            restaurant("a", None, None, Some(5.0), Some(9)),
        ];
        let filters = SearchFilters {
            sort_by: SortBy::parse("alphabetical"),
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &HashSet::new());
        assert_eq!(names(&output), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let filters = SearchFilters {
            sort_by: Some(SortBy::Rating),
            ..SearchFilters::default()
        };
        assert!(apply(Vec::new(), &filters, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_sort_output_is_a_permutation_of_input() {
        let input = vec![
            restaurant("a", Some("italian"), Some(PriceTier::Moderate), Some(3.5), Some(4)),
            restaurant("b", Some("sushi"), None, Some(4.5), Some(2)),
            restaurant("c", None, Some(PriceTier::Free), None, None),
        ];
        let input_ids: HashSet<Uuid> = input.iter().map(|r| r.id).collect();

        for sort_by in [
            SortBy::Rating,
            SortBy::Reviews,
            SortBy::PriceAsc,
            SortBy::PriceDesc,
        ] {
            let filters = SearchFilters {
                sort_by: Some(sort_by),
                ..SearchFilters::default()
            };
            let output = apply(input.clone(), &filters, &HashSet::new());
            assert_eq!(output.len(), input.len());
            let output_ids: HashSet<Uuid> = output.iter().map(|r| r.id).collect();
            assert_eq!(output_ids, input_ids);
        }
    }

    #[test]
    fn test_sort_by_rating_descends() {
        let input = vec![
            restaurant("low", None, None, Some(2.1), None),
            restaurant("high", None, None, Some(4.8), None),
            restaurant("unrated", None, None, None, None),
            restaurant("mid", None, None, Some(3.0), None),
        ];
        let filters = SearchFilters {
            sort_by: Some(SortBy::Rating),
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &HashSet::new());
        assert_eq!(names(&output), vec!["high", "mid", "low", "unrated"]);
    }

    #[test]
    fn test_sort_by_reviews_descends() {
        let input = vec![
            restaurant("few", None, None, None, Some(3)),
            restaurant("many", None, None, None, Some(40)),
            restaurant("none", None, None, None, None),
        ];
        let filters = SearchFilters {
            sort_by: Some(SortBy::Reviews),
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &HashSet::new());
        assert_eq!(names(&output), vec!["many", "few", "none"]);
    }

    #[test]
    fn test_price_ascending_uses_ordinal_table() {
        let input = vec![
            restaurant("expensive", None, Some(PriceTier::Expensive), None, None),
            restaurant("free", None, Some(PriceTier::Free), None, None),
            restaurant("unknown", None, Some(PriceTier::Unknown), None, None),
            restaurant("moderate", None, Some(PriceTier::Moderate), None, None),
        ];
        let filters = SearchFilters {
            sort_by: Some(SortBy::PriceAsc),
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &HashSet::new());
        assert_eq!(
            names(&output),
            vec!["free", "moderate", "expensive", "unknown"]
        );
    }

    #[test]
    fn test_absent_tier_sorts_first_ascending_last_descending() {
        let input = vec![
            restaurant("moderate", None, Some(PriceTier::Moderate), None, None),
            restaurant("untiered", None, None, None, None),
            restaurant("free", None, Some(PriceTier::Free), None, None),
        ];

        let ascending = SearchFilters {
            sort_by: Some(SortBy::PriceAsc),
            ..SearchFilters::default()
        };
        let output = apply(input.clone(), &ascending, &HashSet::new());
        assert_eq!(names(&output), vec!["untiered", "free", "moderate"]);

        let descending = SearchFilters {
            sort_by: Some(SortBy::PriceDesc),
            ..SearchFilters::default()
        };
        let output = apply(input, &descending, &HashSet::new());
        assert_eq!(names(&output), vec!["moderate", "free", "untiered"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let input = vec![
            restaurant("first", None, Some(PriceTier::Moderate), Some(4.0), Some(7)),
            restaurant("second", None, Some(PriceTier::Moderate), Some(4.0), Some(7)),
            restaurant("third", None, Some(PriceTier::Moderate), Some(4.0), Some(7)),
        ];

        for sort_by in [
            SortBy::Rating,
            SortBy::Reviews,
            SortBy::PriceAsc,
            SortBy::PriceDesc,
        ] {
            let filters = SearchFilters {
                sort_by: Some(sort_by),
                ..SearchFilters::default()
            };
            let output = apply(input.clone(), &filters, &HashSet::new());
            assert_eq!(names(&output), vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_cuisine_filter_is_case_insensitive_substring() {
        let input = vec![
            restaurant("match", Some("italian, pizza"), None, None, None),
            restaurant("other", Some("sushi"), None, None, None),
            restaurant("bare", None, None, None, None),
        ];
        let filters = SearchFilters {
            cuisine: Some("ITALIAN".to_string()),
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &HashSet::new());
        // Records without a cuisine are dropped while the filter is active
        assert_eq!(names(&output), vec!["match"]);
    }

    #[test]
    fn test_favorites_filter_keeps_only_resolved_ids() {
        let favorited = restaurant("kept", None, None, None, None);
        let favorite_ids: HashSet<Uuid> = [favorited.id].into_iter().collect();
        let input = vec![
            restaurant("dropped", None, None, None, None),
            favorited,
        ];
        let filters = SearchFilters {
            show_favorites: true,
            ..SearchFilters::default()
        };
        let output = apply(input, &filters, &favorite_ids);
        assert_eq!(names(&output), vec!["kept"]);
    }

    #[test]
    fn test_favorites_filter_with_empty_set_yields_nothing() {
        // An unauthenticated caller resolves to an empty favorite set
        let input = vec![restaurant("anything", None, None, None, None)];
        let filters = SearchFilters {
            show_favorites: true,
            ..SearchFilters::default()
        };
        assert!(apply(input, &filters, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_cuisine_filter_runs_before_favorites_filter() {
        let favorited = restaurant("sushi-favorite", Some("sushi"), None, None, None);
        let favorite_ids: HashSet<Uuid> = [favorited.id].into_iter().collect();
        let input = vec![
            restaurant("italian-unfavorited", Some("italian"), None, None, None),
            favorited,
        ];
        let filters = SearchFilters {
            cuisine: Some("italian".to_string()),
            show_favorites: true,
            ..SearchFilters::default()
        };
        assert!(apply(input, &filters, &favorite_ids).is_empty());
    }
}
