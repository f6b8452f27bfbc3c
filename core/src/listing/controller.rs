use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{dataset_price_range, VehicleModel};
use crate::listing::filter::{filter_report, FilterReport, PresentationState};
use crate::listing::reveal::{apply_visibility_event, VisibilityEvent};
use crate::prelude::{PriceParseError, PriceRange};
use crate::telemetry::log::LogManager;
use crate::util::currency::parse_price;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Powertrain,
    VehicleType,
}

/// Lower bound for a new minimum: at least `dataset.min`, at most one below
/// the current maximum.
pub fn clamp_min(candidate: u64, dataset: PriceRange, current_max: u64) -> u64 {
    let ceiling = current_max.saturating_sub(1).max(dataset.min);
    candidate.max(dataset.min).min(ceiling)
}

/// Numeric value of price input text. A digit run too long for `u64`
/// saturates instead of falling back, so a larger entry never lowers a bound.
fn input_value(raw: &str, fallback: u64) -> u64 {
    match parse_price(raw) {
        Ok(value) => value,
        Err(PriceParseError::Overflow(_)) => u64::MAX,
        Err(PriceParseError::NoDigits(_)) => fallback,
    }
}

pub fn clamp_max(candidate: u64, dataset: PriceRange, current_min: u64) -> u64 {
    let floor = current_min.saturating_add(1).min(dataset.max);
    candidate.min(dataset.max).max(floor)
}

/// Owns the listing page's [`PresentationState`] and applies user input to it.
///
/// After seeding, `price_range.min < price_range.max` holds and both ends stay
/// inside the dataset range, unless the whole dataset shares a single price.
#[derive(Debug, Clone)]
pub struct ListingController {
    /// Shared so that clones of a seeded controller do not copy the catalog.
    models: Arc<[VehicleModel]>,
    dataset: Option<PriceRange>,
    seeded: bool,
    state: PresentationState,
    logger: LogManager,
}

impl Default for ListingController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingController {
    pub fn new() -> Self {
        Self {
            models: Arc::from(Vec::new()),
            dataset: None,
            seeded: false,
            state: PresentationState::default(),
            logger: LogManager::for_component("listing"),
        }
    }

    /// Takes the loaded catalog and seeds the price range from it.
    ///
    /// Only the first call has any effect; returns whether it seeded.
    pub fn seed(&mut self, models: &[VehicleModel]) -> bool {
        if self.seeded {
            return false;
        }
        self.seeded = true;
        self.models = Arc::from(models);
        self.dataset = dataset_price_range(&self.models);
        self.state.price_range = self.dataset;
        match self.dataset {
            Some(range) => self.logger.record(&format!(
                "seeded listing with {} models, price {}..={}",
                self.models.len(),
                range.min,
                range.max
            )),
            None => self
                .logger
                .anomaly("seeded listing without any parseable price"),
        }
        true
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn dataset_range(&self) -> Option<PriceRange> {
        self.dataset
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str) {
        let selection = self.selection_mut(facet);
        if !selection.remove(value) {
            selection.insert(value.to_string());
        }
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        self.selection_mut(facet).clear();
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        match facet {
            Facet::Powertrain => self.state.selected_powertrains.contains(value),
            Facet::VehicleType => self.state.selected_vehicle_types.contains(value),
        }
    }

    fn selection_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Powertrain => &mut self.state.selected_powertrains,
            Facet::VehicleType => &mut self.state.selected_vehicle_types,
        }
    }

    /// Typing into the minimum field: the text is kept verbatim and the
    /// clamped value applied. Text without digits falls back to the dataset
    /// minimum.
    pub fn set_min_input(&mut self, raw: &str) {
        self.state.min_input = raw.to_string();
        self.apply_min_text();
    }

    pub fn set_max_input(&mut self, raw: &str) {
        self.state.max_input = raw.to_string();
        self.apply_max_text();
    }

    /// Leaving the minimum field re-applies the clamp to whatever text it holds.
    pub fn commit_min_input(&mut self) {
        self.apply_min_text();
    }

    pub fn commit_max_input(&mut self) {
        self.apply_max_text();
    }

    fn apply_min_text(&mut self) {
        let (Some(dataset), Some(range)) = (self.dataset, self.state.price_range) else {
            return;
        };
        let candidate = input_value(&self.state.min_input, dataset.min);
        self.state.price_range = Some(PriceRange::new(
            clamp_min(candidate, dataset, range.max),
            range.max,
        ));
    }

    fn apply_max_text(&mut self) {
        let (Some(dataset), Some(range)) = (self.dataset, self.state.price_range) else {
            return;
        };
        let candidate = input_value(&self.state.max_input, dataset.max);
        self.state.price_range = Some(PriceRange::new(
            range.min,
            clamp_max(candidate, dataset, range.min),
        ));
    }

    /// Dragging the minimum slider; the paired text field follows.
    pub fn set_min_slider(&mut self, value: u64) {
        let (Some(dataset), Some(range)) = (self.dataset, self.state.price_range) else {
            return;
        };
        let next = clamp_min(value, dataset, range.max);
        self.state.price_range = Some(PriceRange::new(next, range.max));
        self.state.min_input = next.to_string();
    }

    pub fn set_max_slider(&mut self, value: u64) {
        let (Some(dataset), Some(range)) = (self.dataset, self.state.price_range) else {
            return;
        };
        let next = clamp_max(value, dataset, range.min);
        self.state.price_range = Some(PriceRange::new(range.min, next));
        self.state.max_input = next.to_string();
    }

    pub fn clear_price(&mut self) {
        self.state.price_range = self.dataset;
        self.state.min_input.clear();
        self.state.max_input.clear();
    }

    /// Clears search, facets and price. Revealed sections stay revealed.
    pub fn reset_all(&mut self) {
        self.state.search_query.clear();
        self.clear_facet(Facet::Powertrain);
        self.clear_facet(Facet::VehicleType);
        self.clear_price();
    }

    pub fn register_section(&mut self, section: &str) {
        self.apply_visibility(VisibilityEvent::Register(section.to_string()));
    }

    pub fn section_entered_viewport(&mut self, section: &str) {
        self.apply_visibility(VisibilityEvent::EnteredViewport(section.to_string()));
    }

    fn apply_visibility(&mut self, event: VisibilityEvent) {
        let current = std::mem::take(&mut self.state.visible_sections);
        self.state.visible_sections = apply_visibility_event(current, &event);
    }

    pub fn is_section_visible(&self, section: &str) -> bool {
        self.state.visible_sections.is_visible(section)
    }

    pub fn models(&self) -> &[VehicleModel] {
        &self.models
    }

    pub fn filter_report(&self) -> FilterReport<'_> {
        let report = filter_report(&self.models, &self.state);
        self.logger.detail(&format!(
            "filter pass kept {} of {} ({} unpriced)",
            report.results.len(),
            self.models.len(),
            report.unpriced
        ));
        report
    }

    pub fn filtered_results(&self) -> Vec<&VehicleModel> {
        self.filter_report().results
    }

    pub fn result_count(&self) -> usize {
        self.filtered_results().len()
    }

    pub fn total_count(&self) -> usize {
        self.models.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::vehicle::fixtures::{lineup, model};

    fn seeded() -> ListingController {
        let mut controller = ListingController::new();
        assert!(controller.seed(&lineup()));
        controller
    }

    fn range(controller: &ListingController) -> PriceRange {
        controller.state().price_range.unwrap()
    }

    #[test]
    fn seeding_sets_dataset_range_once() {
        let mut controller = seeded();
        assert_eq!(range(&controller), PriceRange::new(998_000, 3_598_000));

        controller.set_min_input("2,000,000");
        let cheaper = vec![model("x", "X", "₱10", "MPV", "DMO")];
        assert!(!controller.seed(&cheaper));
        assert_eq!(range(&controller).min, 2_000_000);
        assert_eq!(controller.total_count(), 9);
    }

    #[test]
    fn unseeded_controller_has_nothing_to_show() {
        let mut controller = ListingController::new();
        controller.set_min_input("5");
        controller.set_max_slider(10);
        assert_eq!(controller.state().price_range, None);
        assert_eq!(controller.state().min_input, "5");
        assert_eq!(controller.result_count(), 0);
        assert_eq!(controller.total_count(), 0);
    }

    #[test]
    fn toggling_a_facet_twice_restores_it() {
        let mut controller = seeded();
        controller.toggle_facet(Facet::Powertrain, "DM-i");
        assert!(controller.is_selected(Facet::Powertrain, "DM-i"));
        assert_eq!(controller.result_count(), 2);
        controller.toggle_facet(Facet::Powertrain, "DM-i");
        assert!(controller.state().selected_powertrains.is_empty());
        assert_eq!(controller.result_count(), 9);
    }

    #[test]
    fn clear_facet_empties_only_that_dimension() {
        let mut controller = seeded();
        controller.toggle_facet(Facet::Powertrain, "DMO");
        controller.toggle_facet(Facet::VehicleType, "MPV");
        controller.clear_facet(Facet::VehicleType);
        assert!(controller.state().selected_vehicle_types.is_empty());
        assert!(controller.is_selected(Facet::Powertrain, "DMO"));
    }

    #[test]
    fn min_input_scenario_excludes_cheaper_models() {
        let mut controller = seeded();
        controller.set_min_input("1,500,000");
        assert_eq!(range(&controller), PriceRange::new(1_500_000, 3_598_000));

        let ids: Vec<_> = controller
            .filtered_results()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert!(!ids.contains(&"seagull"));
        assert!(!ids.contains(&"dolphin"));
        assert!(ids.contains(&"atto-3"));
        assert_eq!(controller.result_count(), 6);
        assert_eq!(controller.total_count(), 9);
    }

    #[test]
    fn invalid_input_falls_back_to_dataset_bounds() {
        let mut controller = seeded();
        controller.set_min_input("2,000,000");
        controller.set_max_input("3,000,000");
        controller.set_min_input("abc");
        controller.set_max_input("");
        assert_eq!(range(&controller), PriceRange::new(998_000, 3_598_000));
        assert_eq!(controller.state().min_input, "abc");
    }

    #[test]
    fn inputs_are_clamped_against_each_other() {
        let mut controller = seeded();
        controller.set_max_input("1,200,000");
        controller.set_min_input("9,999,999");
        assert_eq!(range(&controller), PriceRange::new(1_199_999, 1_200_000));

        controller.set_max_input("1");
        assert_eq!(range(&controller), PriceRange::new(1_199_999, 1_200_000));

        controller.set_min_input("5");
        assert_eq!(range(&controller).min, 998_000);
    }

    #[test]
    fn oversized_input_saturates_instead_of_resetting() {
        let mut controller = seeded();
        controller.set_min_input("1,900,000");
        controller.set_max_input("2,000,000");

        controller.set_min_input("99,999,999,999,999,999,999");
        assert_eq!(range(&controller), PriceRange::new(1_999_999, 2_000_000));

        controller.set_min_input("1,900,000");
        controller.set_max_input("99,999,999,999,999,999,999");
        assert_eq!(range(&controller), PriceRange::new(1_900_000, 3_598_000));

        // no digits at all still falls back to the dataset bound
        controller.set_min_input("abc");
        assert_eq!(range(&controller).min, 998_000);
    }

    #[test]
    fn clones_share_the_seeded_catalog() {
        let template = seeded();
        let mut copy = template.clone();
        assert!(copy.is_seeded());
        assert!(std::ptr::eq(template.models().as_ptr(), copy.models().as_ptr()));

        copy.set_search("han");
        assert_eq!(copy.result_count(), 1);
        assert_eq!(template.result_count(), 9);
    }

    #[test]
    fn commit_reapplies_clamp_to_stale_text() {
        let mut controller = seeded();
        controller.set_min_input("3,000,000");
        controller.set_max_input("3,100,000");
        controller.set_min_input("3,050,000");
        controller.set_max_slider(2_000_000);
        // max is floored at min + 1
        assert_eq!(range(&controller), PriceRange::new(3_050_000, 3_050_001));
        controller.commit_min_input();
        assert_eq!(range(&controller).min, 3_050_000);
    }

    #[test]
    fn sliders_sync_their_text_fields() {
        let mut controller = seeded();
        controller.set_min_slider(1_000_000);
        controller.set_max_slider(5_000_000);
        assert_eq!(range(&controller), PriceRange::new(1_000_000, 3_598_000));
        assert_eq!(controller.state().min_input, "1000000");
        assert_eq!(controller.state().max_input, "3598000");

        controller.set_min_slider(3_598_000);
        assert_eq!(range(&controller).min, 3_597_999);
        assert_eq!(controller.state().min_input, "3597999");
    }

    #[test]
    fn range_invariant_survives_arbitrary_updates() {
        let mut controller = seeded();
        let dataset = controller.dataset_range().unwrap();
        let inputs = ["0", "4,000,000", "1,598,000", "", "x", "3,598,000", "998,000", "2,500,000"];
        for (step, raw) in inputs.iter().cycle().take(64).enumerate() {
            match step % 4 {
                0 => controller.set_min_input(raw),
                1 => controller.set_max_input(raw),
                2 => controller.set_min_slider(parse_price(raw).unwrap_or(0)),
                _ => controller.set_max_slider(parse_price(raw).unwrap_or(u64::MAX)),
            }
            let current = range(&controller);
            assert!(current.min < current.max, "step {step}: {current:?}");
            assert!(current.min >= dataset.min && current.max <= dataset.max);
        }
    }

    #[test]
    fn reset_all_is_idempotent_and_keeps_revealed_sections() {
        let mut controller = seeded();
        controller.register_section("atto-3");
        controller.section_entered_viewport("atto-3");
        controller.set_search("tang");
        controller.toggle_facet(Facet::VehicleType, "MPV");
        controller.set_min_slider(2_000_000);

        controller.reset_all();
        let once = controller.state().clone();
        controller.reset_all();
        assert_eq!(controller.state(), &once);

        assert!(once.search_query.is_empty());
        assert!(once.selected_vehicle_types.is_empty());
        assert_eq!(once.price_range, Some(PriceRange::new(998_000, 3_598_000)));
        assert!(once.min_input.is_empty() && once.max_input.is_empty());
        assert!(controller.is_section_visible("atto-3"));
    }

    #[test]
    fn clear_price_leaves_other_filters() {
        let mut controller = seeded();
        controller.set_search("byd");
        controller.set_max_input("1,000,000");
        assert_eq!(controller.result_count(), 1);
        controller.clear_price();
        assert_eq!(controller.state().search_query, "byd");
        assert_eq!(controller.result_count(), 9);
    }

    #[test]
    fn single_price_dataset_pins_both_bounds() {
        let mut controller = ListingController::new();
        controller.seed(&[model("solo", "Solo", "₱1,000", "MPV", "DMO")]);
        controller.set_min_input("5,000");
        controller.set_max_input("1");
        assert_eq!(range(&controller), PriceRange::new(1_000, 1_000));
        assert_eq!(controller.result_count(), 1);
    }
}
