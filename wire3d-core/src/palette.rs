/// Named colors used by the renderer and the command line
use std::str::FromStr;

use crate::image::PixelColor;

pub const BLACK: PixelColor = PixelColor::new(0, 0, 0);
pub const WHITE: PixelColor = PixelColor::new(255, 255, 255);
pub const RED: PixelColor = PixelColor::new(255, 0, 0);
pub const GREEN: PixelColor = PixelColor::new(0, 255, 0);
pub const BLUE: PixelColor = PixelColor::new(0, 0, 255);

const NAMED: &[(&str, PixelColor)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
];

/// Look up a palette color by name, ignoring case
pub fn by_name(name: &str) -> Option<PixelColor> {
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Names accepted by [`by_name`]
pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(n, _)| *n)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color `{0}`")]
pub struct UnknownColor(pub String);

impl FromStr for PixelColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        by_name(s.trim()).ok_or_else(|| UnknownColor(s.to_string()))
    }
}
