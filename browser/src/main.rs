use iced::{
    mouse,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, container, row, scrollable, slider, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Task, Theme,
};
use serde::Deserialize;
use showroomcore::catalog::{VehicleModel, POWERTRAIN_OPTIONS, VEHICLE_TYPE_OPTIONS};
use showroomcore::listing::{ColorCustomizer, Facet, ListingController, RevealCoordinator, DETAIL_SECTIONS};
use showroomcore::util::color::{is_light_color, Rgb};
use showroomcore::util::currency::format_price;
use std::ops::Range;

/// Fixed card height so scroll offsets map onto card indices.
const CARD_HEIGHT: f32 = 190.0;
const SECTION_HEIGHT: f32 = 420.0;
/// Content this far below the fold already counts as entering the viewport.
const REVEAL_MARGIN: f32 = 100.0;
const INITIAL_VIEWPORT: f32 = 800.0;

fn main() -> iced::Result {
    iced::application(Showroom::boot, Showroom::update, Showroom::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(state: &Showroom) -> String {
    match &state.detail {
        Some(detail) => detail
            .customizer
            .model()
            .map(|model| format!("{} | EV Showroom", model.name))
            .unwrap_or_else(|| "EV Showroom".into()),
        None => "EV Showroom".into(),
    }
}

fn application_theme(_: &Showroom) -> Theme {
    Theme::Dark
}

fn base_url() -> String {
    std::env::var("SHOWROOM_URL").unwrap_or_else(|_| "http://127.0.0.1:9000".into())
}

/// Indices of fixed-height rows that overlap the visible window plus margin.
fn rows_in_view(count: usize, row_height: f32, offset: f32, viewport: f32) -> Range<usize> {
    if count == 0 || row_height <= 0.0 {
        return 0..0;
    }
    let top = offset.max(0.0);
    let bottom = top + viewport.max(0.0) + REVEAL_MARGIN;
    let first = ((top / row_height).floor() as usize).min(count);
    let last = ((bottom / row_height).ceil() as usize).min(count);
    first..last
}

fn to_color(hex: &str) -> Color {
    Rgb::from_hex(hex)
        .map(|rgb| Color::from_rgb8(rgb.r, rgb.g, rgb.b))
        .unwrap_or(Color::from_rgb(0.5, 0.5, 0.5))
}

#[derive(Debug)]
struct Showroom {
    listing: ListingController,
    detail: Option<DetailPage>,
    status: String,
    listing_viewport: (f32, f32),
}

#[derive(Debug)]
struct DetailPage {
    customizer: ColorCustomizer,
    sections: RevealCoordinator,
}

#[derive(Debug, Clone)]
enum Message {
    CatalogFetched(Result<Vec<VehicleModel>, String>),
    SearchChanged(String),
    FacetToggled(Facet, String),
    FacetCleared(Facet),
    MinInputChanged(String),
    MaxInputChanged(String),
    MinInputCommitted,
    MaxInputCommitted,
    MinSliderMoved(f64),
    MaxSliderMoved(f64),
    ClearPrice,
    ResetAll,
    ListingScrolled(scrollable::Viewport),
    OpenModel(String),
    CloseDetail,
    ColorSelected(String),
    DetailScrolled(scrollable::Viewport),
}

impl Showroom {
    fn boot() -> (Self, Task<Message>) {
        (
            Showroom {
                listing: ListingController::new(),
                detail: None,
                status: "Loading catalog...".into(),
                listing_viewport: (0.0, INITIAL_VIEWPORT),
            },
            Task::perform(fetch_models(base_url()), Message::CatalogFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogFetched(Ok(models)) => {
                state.listing.seed(&models);
                state.status = format!("Catalog loaded: {} models", models.len());
            }
            Message::CatalogFetched(Err(err)) => {
                state.status = format!("Catalog error: {err}");
            }
            Message::SearchChanged(query) => state.listing.set_search(query),
            Message::FacetToggled(facet, value) => state.listing.toggle_facet(facet, &value),
            Message::FacetCleared(facet) => state.listing.clear_facet(facet),
            Message::MinInputChanged(raw) => state.listing.set_min_input(&raw),
            Message::MaxInputChanged(raw) => state.listing.set_max_input(&raw),
            Message::MinInputCommitted => state.listing.commit_min_input(),
            Message::MaxInputCommitted => state.listing.commit_max_input(),
            Message::MinSliderMoved(value) => state.listing.set_min_slider(value.round() as u64),
            Message::MaxSliderMoved(value) => state.listing.set_max_slider(value.round() as u64),
            Message::ClearPrice => state.listing.clear_price(),
            Message::ResetAll => state.listing.reset_all(),
            Message::ListingScrolled(viewport) => {
                state.listing_viewport = (viewport.absolute_offset().y, viewport.bounds().height);
            }
            Message::OpenModel(id) => {
                let model = state.listing.models().iter().find(|m| m.id == id).cloned();
                state.detail = Some(DetailPage {
                    customizer: ColorCustomizer::new(model),
                    sections: RevealCoordinator::for_detail_page(),
                });
                state.reveal_detail_sections(0.0, INITIAL_VIEWPORT);
            }
            Message::CloseDetail => state.detail = None,
            Message::ColorSelected(hex) => {
                if let Some(detail) = state.detail.as_mut() {
                    detail.customizer.select(hex);
                }
            }
            Message::DetailScrolled(viewport) => {
                state.reveal_detail_sections(viewport.absolute_offset().y, viewport.bounds().height);
            }
        }
        state.reveal_listing_cards();
        Task::none()
    }

    /// Registers the cards currently in the result set and reveals those in view.
    fn reveal_listing_cards(&mut self) {
        let ids: Vec<String> = self
            .listing
            .filtered_results()
            .iter()
            .map(|model| model.id.clone())
            .collect();
        let (offset, height) = self.listing_viewport;
        let in_view = rows_in_view(ids.len(), CARD_HEIGHT, offset, height);
        for (idx, id) in ids.iter().enumerate() {
            self.listing.register_section(id);
            if in_view.contains(&idx) {
                self.listing.section_entered_viewport(id);
            }
        }
    }

    fn reveal_detail_sections(&mut self, offset: f32, height: f32) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        for idx in rows_in_view(DETAIL_SECTIONS.len(), SECTION_HEIGHT, offset, height) {
            detail.sections.entered_viewport(DETAIL_SECTIONS[idx]);
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let body = match &state.detail {
            Some(detail) => detail_view(detail),
            None => row![filter_panel(&state.listing), results_view(&state.listing)]
                .spacing(20)
                .align_y(Alignment::Start)
                .into(),
        };

        Container::new(column![body, text(&state.status).size(12)].spacing(8).padding(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn facet_buttons<'a>(
    controller: &ListingController,
    facet: Facet,
    title: &'a str,
    options: &[&'static str],
) -> Column<'a, Message> {
    let header = row![
        text(title).size(16),
        button(text("Clear").size(12))
            .on_press(Message::FacetCleared(facet))
            .padding(4),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    options.iter().fold(Column::new().spacing(4).push(header), |col, option| {
        let mark = if controller.is_selected(facet, option) {
            "[x]"
        } else {
            "[ ]"
        };
        col.push(
            button(text(format!("{mark} {option}")).size(13))
                .on_press(Message::FacetToggled(facet, option.to_string()))
                .padding(4),
        )
    })
}

fn filter_panel(controller: &ListingController) -> Element<'_, Message> {
    let state = controller.state();

    let mut price = Column::new().spacing(6).push(
        row![
            text("Price").size(16),
            button(text("Reset").size(12)).on_press(Message::ClearPrice).padding(4),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    );
    price = price.push(
        row![
            text_input("Min", &state.min_input)
                .on_input(Message::MinInputChanged)
                .on_submit(Message::MinInputCommitted)
                .padding(6),
            text_input("Max", &state.max_input)
                .on_input(Message::MaxInputChanged)
                .on_submit(Message::MaxInputCommitted)
                .padding(6),
        ]
        .spacing(8),
    );
    if let (Some(dataset), Some(range)) = (controller.dataset_range(), state.price_range) {
        let bounds = dataset.min as f64..=dataset.max as f64;
        price = price
            .push(slider(bounds.clone(), range.min as f64, Message::MinSliderMoved).step(1000.0))
            .push(slider(bounds, range.max as f64, Message::MaxSliderMoved).step(1000.0))
            .push(
                text(format!(
                    "{} - {}",
                    format_price(range.min),
                    format_price(range.max)
                ))
                .size(12),
            );
    }

    column![
        row![
            text("Filters").size(26),
            button(text("Clear all").size(12)).on_press(Message::ResetAll).padding(6),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        text_input("Search models", &state.search_query)
            .on_input(Message::SearchChanged)
            .padding(6),
        facet_buttons(controller, Facet::Powertrain, "Powertrain", &POWERTRAIN_OPTIONS),
        facet_buttons(controller, Facet::VehicleType, "Vehicle type", &VEHICLE_TYPE_OPTIONS),
        price,
    ]
    .spacing(14)
    .width(Length::Fixed(320.0))
    .into()
}

fn results_view(controller: &ListingController) -> Element<'_, Message> {
    let results = controller.filtered_results();
    let header = text(format!(
        "Showing {} of {}",
        results.len(),
        controller.total_count()
    ))
    .size(18);

    let cards = if results.is_empty() {
        Column::new().push(
            column![
                text("No models match these filters").size(16),
                button(text("Clear all filters")).on_press(Message::ResetAll),
            ]
            .spacing(8),
        )
    } else {
        results.into_iter().fold(Column::new().spacing(0), |col, model| {
            let card: Element<'_, Message> = if controller.is_section_visible(&model.id) {
                model_card(model)
            } else {
                text("...").size(12).into()
            };
            col.push(
                Container::new(card)
                    .height(Length::Fixed(CARD_HEIGHT))
                    .width(Length::Fill)
                    .padding(8),
            )
        })
    };

    column![
        header,
        scrollable(cards)
            .on_scroll(Message::ListingScrolled)
            .height(Length::Fill),
    ]
    .spacing(10)
    .width(Length::Fill)
    .into()
}

fn model_card(model: &VehicleModel) -> Element<'_, Message> {
    let swatches = Canvas::new(Swatches::new(model, None))
        .width(Length::Fixed(160.0))
        .height(Length::Fixed(28.0));

    column![
        text(&model.name).size(20),
        text(format!(
            "{} | {} | {}",
            model.price,
            model.vehicle_type,
            model.powertrain_technology()
        ))
        .size(13),
        row![swatches, default_badge(model)]
            .spacing(10)
            .align_y(Alignment::Center),
        button(text("Explore this model"))
            .on_press(Message::OpenModel(model.id.clone()))
            .padding(8),
    ]
    .spacing(8)
    .into()
}

fn default_badge(model: &VehicleModel) -> Element<'_, Message> {
    match model.default_color() {
        Some(color) => color_badge(&color.hex, &color.name),
        None => text("").into(),
    }
}

/// Label on a swatch-colored background, with text contrast picked per color.
fn color_badge<'a>(hex: &str, label: &str) -> Element<'a, Message> {
    let background = to_color(hex);
    let foreground = if is_light_color(hex) {
        Color::BLACK
    } else {
        Color::WHITE
    };
    container(text(label.to_string()).size(14).color(foreground))
        .padding(8)
        .style(move |_theme: &Theme| container::Style {
            background: Some(background.into()),
            ..Default::default()
        })
        .into()
}

fn lazy_section<'a>(
    detail: &DetailPage,
    id: &str,
    content: impl FnOnce() -> Element<'a, Message>,
) -> Element<'a, Message> {
    let inner = if detail.sections.is_visible(id) {
        content()
    } else {
        text("Loading...").size(12).into()
    };
    Container::new(inner)
        .height(Length::Fixed(SECTION_HEIGHT))
        .width(Length::Fill)
        .padding(12)
        .into()
}

fn spec_rows<'a>(title: &'a str, rows: Vec<(&'a str, &'a str)>) -> Column<'a, Message> {
    rows.into_iter().fold(
        Column::new().spacing(2).push(text(title).size(16)),
        |col, (label, value)| col.push(text(format!("{label}: {value}")).size(12)),
    )
}

fn detail_view(detail: &DetailPage) -> Element<'_, Message> {
    let Some(model) = detail.customizer.model() else {
        return column![
            text("Model not found").size(26),
            button(text("Back to models")).on_press(Message::CloseDetail),
        ]
        .spacing(10)
        .into();
    };
    let customizer = &detail.customizer;

    let overview = lazy_section(detail, "overview", || {
        column![
            text(&model.name).size(30),
            text(&model.price).size(20),
            text(&model.description).size(14),
            color_badge(customizer.selected(), customizer.current_name()),
        ]
        .spacing(10)
        .into()
    });

    let customize = lazy_section(detail, "customize", || {
        let choices = model.colors.iter().fold(Column::new().spacing(4), |col, color| {
            col.push(
                button(text(color.name.clone()).size(13))
                    .on_press(Message::ColorSelected(color.hex.clone()))
                    .padding(4),
            )
        });
        column![
            text("Customize").size(22),
            Canvas::new(Swatches::new(model, Some(customizer.selected())))
                .width(Length::Fill)
                .height(Length::Fixed(40.0)),
            choices,
            color_badge(customizer.selected(), customizer.current_name()),
            text(format!("Image: {}", customizer.current_image())).size(12),
        ]
        .spacing(10)
        .into()
    });

    let specs = lazy_section(detail, "specs", || {
        let d = &model.dimensions;
        let p = &model.performance;
        let c = &model.chassis;
        column![
            text("Specifications").size(22),
            row![
                spec_rows(
                    "Dimensions",
                    vec![
                        ("Length", d.overall_length.as_str()),
                        ("Width", d.overall_width.as_str()),
                        ("Height", d.overall_height.as_str()),
                        ("Wheelbase", d.wheelbase.as_str()),
                        ("Ground clearance", d.unladen_ground_clearance.as_str()),
                        ("Luggage", d.luggage_capacity.as_str()),
                        ("Turning radius", d.turning_radius.as_str()),
                        ("Curb weight", d.curb_weight.as_str()),
                        ("Seats", d.seating_capacity.as_str()),
                    ],
                ),
                spec_rows(
                    "Performance",
                    vec![
                        ("0-100 km/h", p.acceleration.as_str()),
                        ("EV range", p.ev_driving_range.as_str()),
                        ("Battery", p.battery_type.as_str()),
                        ("Capacity", p.battery_capacity.as_str()),
                    ],
                ),
                spec_rows(
                    "Chassis",
                    vec![
                        ("Front suspension", c.front_suspension.as_str()),
                        ("Rear suspension", c.rear_suspension.as_str()),
                        ("Front brake", c.front_brake.as_str()),
                        ("Rear brake", c.rear_brake.as_str()),
                        ("Wheels", c.wheel_type.as_str()),
                        ("Tires", c.tire_size.as_str()),
                    ],
                ),
            ]
            .spacing(24),
        ]
        .spacing(10)
        .into()
    });

    let features = lazy_section(detail, "features", || {
        let pt = &model.powertrain;
        column![
            text("Powertrain").size(22),
            spec_rows(
                "Drive",
                vec![
                    ("Technology", pt.technology.as_str()),
                    ("Drivetrain", pt.drivetrain.as_str()),
                    ("Front motor", pt.front_motor_type.as_str()),
                    ("Power", pt.front_motor_power.as_str()),
                    ("Torque", pt.front_motor_torque.as_str()),
                ],
            ),
        ]
        .spacing(10)
        .into()
    });

    column![
        button(text("Back to models")).on_press(Message::CloseDetail),
        scrollable(column![overview, customize, specs, features])
            .on_scroll(Message::DetailScrolled)
            .height(Length::Fill),
    ]
    .spacing(10)
    .into()
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn fetch_models(base: String) -> Result<Vec<VehicleModel>, String> {
    let response = reqwest::get(format!("{base}/models"))
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    let body = response.text().await.map_err(|e| e.to_string())?;
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|err| err.error)
            .unwrap_or(body);
        return Err(format!("{status}: {message}"));
    }
    serde_json::from_str(&body).map_err(|e| e.to_string())
}

/// Row of paint swatches; the selected one gets a ring.
#[derive(Clone)]
struct Swatches {
    colors: Vec<(Color, bool)>,
}

impl Swatches {
    fn new(model: &VehicleModel, selected: Option<&str>) -> Self {
        Self {
            colors: model
                .colors
                .iter()
                .map(|color| (to_color(&color.hex), selected == Some(color.hex.as_str())))
                .collect(),
        }
    }
}

impl canvas::Program<Message> for Swatches {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let radius = (bounds.height / 2.0 - 3.0).max(2.0);
        let spacing = radius * 2.0 + 8.0;

        for (idx, (color, selected)) in self.colors.iter().enumerate() {
            let center = Point::new(radius + 3.0 + idx as f32 * spacing, bounds.height / 2.0);
            frame.fill(&Path::circle(center, radius), *color);
            let ring = if *selected {
                Stroke::default()
                    .with_width(2.5)
                    .with_color(Color::from_rgb(0.18, 0.72, 0.89))
            } else {
                Stroke::default()
                    .with_width(1.0)
                    .with_color(Color::from_rgb(0.35, 0.35, 0.45))
            };
            frame.stroke(&Path::circle(center, radius), ring);
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_in_view_covers_window_plus_margin() {
        assert_eq!(rows_in_view(9, 190.0, 0.0, 800.0), 0..5);
        assert_eq!(rows_in_view(9, 190.0, 950.0, 400.0), 5..8);
        assert_eq!(rows_in_view(3, 190.0, 0.0, 800.0), 0..3);
        assert_eq!(rows_in_view(0, 190.0, 0.0, 800.0), 0..0);
    }

    #[test]
    fn unreadable_hex_renders_grey() {
        assert_eq!(to_color("#ffffff"), Color::from_rgb8(255, 255, 255));
        assert_eq!(to_color("oops"), Color::from_rgb(0.5, 0.5, 0.5));
    }
}
