pub mod controller;
pub mod customize;
pub mod filter;
pub mod reveal;

pub use controller::{clamp_max, clamp_min, Facet, ListingController};
pub use customize::ColorCustomizer;
pub use filter::{filter_models, filter_report, FilterReport, PresentationState};
pub use reveal::{
    apply_visibility_event, RevealCoordinator, RevealState, SectionState, VisibilityEvent,
    DETAIL_SECTIONS, PRIMARY_SECTION,
};
