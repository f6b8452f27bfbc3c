pub mod color;
pub mod currency;

pub use color::{color_image, color_name, is_light_color, Rgb};
pub use currency::{format_price, parse_price};
