use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::VehicleModel;
use crate::listing::reveal::RevealState;
use crate::prelude::PriceRange;
use crate::util::currency::parse_price;

/// Mutable listing-page state for a single browsing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresentationState {
    pub search_query: String,
    /// Empty means every powertrain matches.
    pub selected_powertrains: BTreeSet<String>,
    /// Empty means every vehicle type matches.
    pub selected_vehicle_types: BTreeSet<String>,
    /// `None` until the catalog has been seeded.
    pub price_range: Option<PriceRange>,
    /// Raw text of the min/max price inputs, kept in sync with the sliders.
    pub min_input: String,
    pub max_input: String,
    pub visible_sections: RevealState,
}

/// Result of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport<'a> {
    pub results: Vec<&'a VehicleModel>,
    /// Candidates dropped only because their price could not be read.
    pub unpriced: usize,
}

fn matches_search(model: &VehicleModel, query: &str) -> bool {
    query.is_empty() || model.name.to_lowercase().contains(query)
}

fn matches_facet(selection: &BTreeSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Stable filter over `models`; relative order is preserved.
pub fn filter_report<'a>(models: &'a [VehicleModel], state: &PresentationState) -> FilterReport<'a> {
    let query = state.search_query.trim().to_lowercase();
    let mut unpriced = 0;

    let results = models
        .iter()
        .filter(|model| {
            let categorical = matches_search(model, &query)
                && matches_facet(&state.selected_powertrains, model.powertrain_technology())
                && matches_facet(&state.selected_vehicle_types, &model.vehicle_type);
            if !categorical {
                return false;
            }
            match parse_price(&model.price) {
                Ok(price) => state.price_range.map_or(true, |range| range.contains(price)),
                Err(_) => {
                    unpriced += 1;
                    false
                }
            }
        })
        .collect();

    FilterReport { results, unpriced }
}

pub fn filter_models<'a>(models: &'a [VehicleModel], state: &PresentationState) -> Vec<&'a VehicleModel> {
    filter_report(models, state).results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::vehicle::fixtures::{lineup, model};

    fn ids(results: &[&VehicleModel]) -> Vec<String> {
        results.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn empty_state_keeps_everything_in_order() {
        let models = lineup();
        let results = filter_models(&models, &PresentationState::default());
        assert_eq!(ids(&results), models.iter().map(|m| m.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let models = lineup();
        let state = PresentationState {
            search_query: "  SEA ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_models(&models, &state)), vec!["seagull", "seal", "sealion"]);
    }

    #[test]
    fn search_includes_model_iff_query_is_substring() {
        let single = vec![model("han", "BYD Han", "₱3,298,000", "Executive Sedan", "Full Electric")];
        for (query, expected) in [("", true), ("han", true), ("BYD H", true), ("tang", false), ("hanx", false)] {
            let state = PresentationState {
                search_query: query.into(),
                ..Default::default()
            };
            assert_eq!(filter_models(&single, &state).len() == 1, expected, "query {query:?}");
        }
    }

    #[test]
    fn facets_combine_with_and_across_dimensions() {
        let models = lineup();
        let mut state = PresentationState::default();
        state.selected_powertrains.insert("DM-i".into());
        assert_eq!(ids(&filter_models(&models, &state)), vec!["emax", "sealion"]);

        state.selected_vehicle_types.insert("MPV".into());
        assert_eq!(ids(&filter_models(&models, &state)), vec!["emax"]);

        state.selected_powertrains.insert("DMO".into());
        assert_eq!(ids(&filter_models(&models, &state)), vec!["emax", "captain"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let models = lineup();
        let state = PresentationState {
            price_range: Some(PriceRange::new(1_398_000, 1_798_000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_models(&models, &state)), vec!["atto-3", "dolphin", "seal"]);
    }

    #[test]
    fn unparseable_price_excludes_only_that_model() {
        let mut models = lineup();
        models[1].price = "Call for price".into();
        let state = PresentationState {
            search_query: "byd".into(),
            price_range: Some(PriceRange::new(0, u64::MAX)),
            ..Default::default()
        };
        let report = filter_report(&models, &state);
        assert_eq!(report.unpriced, 1);
        assert_eq!(report.results.len(), models.len() - 1);
        assert!(report.results.iter().all(|m| m.id != "dolphin"));
    }

    #[test]
    fn unpriced_count_ignores_models_already_filtered_out() {
        let mut models = lineup();
        models[1].price = "TBA".into();
        let state = PresentationState {
            search_query: "han".into(),
            ..Default::default()
        };
        assert_eq!(filter_report(&models, &state).unpriced, 0);
    }
}
