//! Colours and dimensions shared by every chart.

use plotters::style::RGBColor;
use shopdash_config::GraphsConfig;

/// Font family used for captions and axis labels.
pub const FONT_FAMILY: &str = "sans-serif";

/// Parse a `#RRGGBB` colour, falling back to black.
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Resolved chart styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Leading bar, lines and map points
    pub highlight: RGBColor,
    /// Non-leading bars
    pub muted: RGBColor,
    /// Order status bars
    pub status: RGBColor,
    /// Image background
    pub background: RGBColor,
    /// Caption font size
    pub title_size: u32,
    /// Axis label font size
    pub label_size: u32,
}

impl ChartTheme {
    /// Build from the graphs section of the configuration.
    pub fn from_config(config: &GraphsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            highlight: parse_color(&config.colors.highlight),
            muted: parse_color(&config.colors.muted),
            status: parse_color(&config.colors.status),
            background: parse_color(&config.colors.background),
            title_size: 28,
            label_size: 16,
        }
    }

    /// Same palette at another size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Bytes needed for an RGB pixel buffer of this size.
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::from_config(&GraphsConfig::default())
    }
}
