use crate::catalog::VehicleModel;
use crate::util::color::{color_image, color_name, is_light_color};

/// Paint selection on a model's detail page.
#[derive(Debug, Clone)]
pub struct ColorCustomizer {
    model: Option<VehicleModel>,
    selected: String,
}

impl ColorCustomizer {
    /// Starts on the model's default paint.
    pub fn new(model: Option<VehicleModel>) -> Self {
        let selected = model
            .as_ref()
            .and_then(VehicleModel::default_color)
            .map(|color| color.hex.clone())
            .unwrap_or_default();
        Self { model, selected }
    }

    pub fn model(&self) -> Option<&VehicleModel> {
        self.model.as_ref()
    }

    pub fn select(&mut self, hex: impl Into<String>) {
        self.selected = hex.into();
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn current_name(&self) -> &str {
        color_name(self.model.as_ref(), &self.selected)
    }

    pub fn current_image(&self) -> &str {
        color_image(self.model.as_ref(), &self.selected)
    }

    /// Whether the badge over the swatch needs dark text.
    pub fn badge_is_light(&self) -> bool {
        is_light_color(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::vehicle::fixtures::model;
    use crate::catalog::VehicleColor;

    fn dolphin() -> VehicleModel {
        let mut dolphin = model("dolphin", "BYD Dolphin", "₱1,398,000", "Hatchback", "Full Electric");
        dolphin.colors.insert(
            0,
            VehicleColor {
                hex: "#f3f3f3".into(),
                name: "Cream White".into(),
                image: "/images/dolphin-cream.webp".into(),
            },
        );
        dolphin
    }

    #[test]
    fn starts_on_default_color() {
        let customizer = ColorCustomizer::new(Some(dolphin()));
        assert_eq!(customizer.selected(), "#f3f3f3");
        assert_eq!(customizer.current_name(), "Cream White");
        assert!(customizer.badge_is_light());
    }

    #[test]
    fn selection_resolves_through_color_lookups() {
        let mut customizer = ColorCustomizer::new(Some(dolphin()));
        customizer.select("#1a1a1a");
        assert_eq!(customizer.current_name(), "Cosmic Black");
        assert_eq!(customizer.current_image(), "/images/dolphin-black.webp");
        assert!(!customizer.badge_is_light());

        customizer.select("#abcdef");
        assert_eq!(customizer.current_name(), "Custom Color");
        assert_eq!(customizer.current_image(), "/images/dolphin-cream.webp");
    }

    #[test]
    fn without_model_everything_falls_back() {
        let customizer = ColorCustomizer::new(None);
        assert_eq!(customizer.selected(), "");
        assert_eq!(customizer.current_name(), "Custom Color");
        assert_eq!(customizer.current_image(), "");
        assert!(!customizer.badge_is_light());
    }
}
