use crate::catalog::VehicleModel;
use crate::prelude::ColorError;

/// Label shown when no model is loaded or the identifier is unknown.
pub const CUSTOM_COLOR_NAME: &str = "Custom Color";

/// Brightness above which a color counts as light (YIQ scale, 0..=255).
pub const LIGHT_THRESHOLD: u32 = 186;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Decodes `#rgb`, `#rrggbb`, or the same without the leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let packed = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        })
    }

    /// `299*R + 587*G + 114*B`, i.e. the YIQ luma scaled by 1000.
    ///
    /// Kept in integers so the threshold comparison is exact.
    pub fn brightness_milli(&self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    pub fn is_light(&self) -> bool {
        self.brightness_milli() > LIGHT_THRESHOLD * 1000
    }
}

/// True when dark text reads better than light text on `hex`.
///
/// Undecodable input is treated as dark.
pub fn is_light_color(hex: &str) -> bool {
    Rgb::from_hex(hex).map(|rgb| rgb.is_light()).unwrap_or(false)
}

pub fn color_name<'a>(model: Option<&'a VehicleModel>, hex: &str) -> &'a str {
    model
        .and_then(|model| model.find_color(hex))
        .map(|color| color.name.as_str())
        .unwrap_or(CUSTOM_COLOR_NAME)
}

/// Image for `hex`, the model's default image on a miss, empty without a model.
pub fn color_image<'a>(model: Option<&'a VehicleModel>, hex: &str) -> &'a str {
    let Some(model) = model else {
        return "";
    };
    model
        .find_color(hex)
        .or_else(|| model.default_color())
        .map(|color| color.image.as_str())
        .unwrap_or("")
}
