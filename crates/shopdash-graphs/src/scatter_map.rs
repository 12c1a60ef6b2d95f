//! Customer locations scattered over an optional map backdrop.

use crate::renderer::GraphRenderer;
use crate::theme::ChartTheme;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use plotters::element::BitMapElement;
use plotters::prelude::*;
use shopdash_analytics::GeoPoint;
use shopdash_common::Result;
use shopdash_config::MapExtent;
use tracing::debug;

/// Scatter map of geolocation points.
///
/// The backdrop is stretched over the configured extent, so it must show
/// exactly that region.
#[derive(Debug, Clone)]
pub struct ScatterMap {
    extent: MapExtent,
    backdrop: Option<RgbImage>,
    point_alpha: f64,
    point_radius: u32,
}

impl ScatterMap {
    /// Map over `extent` without a backdrop.
    pub const fn new(extent: MapExtent) -> Self {
        Self {
            extent,
            backdrop: None,
            point_alpha: 0.3,
            point_radius: 1,
        }
    }

    /// Draw `image` under the points.
    #[must_use]
    pub fn with_backdrop(mut self, image: &DynamicImage) -> Self {
        self.backdrop = Some(image.to_rgb8());
        self
    }

    /// Point opacity, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_point_alpha(mut self, alpha: f64) -> Self {
        self.point_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Point radius in pixels.
    #[must_use]
    pub fn with_point_radius(mut self, radius: u32) -> Self {
        self.point_radius = radius;
        self
    }

    /// Whether a backdrop is set.
    pub const fn has_backdrop(&self) -> bool {
        self.backdrop.is_some()
    }

    /// Whether `point` lies inside the extent.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.extent.min_lng..=self.extent.max_lng).contains(&point.lng)
            && (self.extent.min_lat..=self.extent.max_lat).contains(&point.lat)
    }
}

impl GraphRenderer for ScatterMap {
    type Data = [GeoPoint];

    fn name(&self) -> &'static str {
        "geolocation"
    }

    fn draw(&self, data: &[GeoPoint], theme: &ChartTheme, buffer: &mut [u8]) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (theme.width, theme.height)).into_drawing_area();
        root.fill(&theme.background)?;

        let extent = self.extent;
        let mut chart = ChartBuilder::on(&root).margin(10).build_cartesian_2d(
            extent.min_lng..extent.max_lng,
            extent.min_lat..extent.max_lat,
        )?;

        if let Some(backdrop) = &self.backdrop {
            let (width, height) = chart.plotting_area().dim_in_pixel();
            let scaled = imageops::resize(backdrop, width, height, FilterType::Triangle);
            if let Some(element) = BitMapElement::with_owned_buffer(
                (extent.min_lng, extent.max_lat),
                (width, height),
                scaled.into_raw(),
            ) {
                chart.draw_series(std::iter::once(element))?;
            }
        }

        let style = theme.highlight.mix(self.point_alpha).filled();
        let visible: Vec<&GeoPoint> = data.iter().filter(|p| self.contains(p)).collect();
        chart.draw_series(
            visible
                .iter()
                .map(|p| Circle::new((p.lng, p.lat), self.point_radius, style)),
        )?;
        debug!(
            drawn = visible.len(),
            outside = data.len() - visible.len(),
            "Drew geolocation points"
        );

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn extent() -> MapExtent {
        MapExtent {
            min_lng: -10.0,
            max_lng: 10.0,
            min_lat: -10.0,
            max_lat: 10.0,
        }
    }

    fn render(map: &ScatterMap, points: &[GeoPoint]) -> RgbImage {
        let theme = ChartTheme::default().with_size(60, 60);
        let mut buffer = vec![0; theme.buffer_len()];
        map.draw(points, &theme, &mut buffer).unwrap();
        RgbImage::from_raw(60, 60, buffer).unwrap()
    }

    #[test]
    fn test_contains() {
        let map = ScatterMap::new(MapExtent::default());
        assert!(map.contains(&GeoPoint {
            lat: -23.5,
            lng: -46.6
        }));
        assert!(!map.contains(&GeoPoint { lat: 40.7, lng: -74.0 }));
    }

    #[test]
    fn test_draws_opaque_point_at_center() {
        let map = ScatterMap::new(extent())
            .with_point_alpha(1.0)
            .with_point_radius(4);
        let image = render(&map, &[GeoPoint { lat: 0.0, lng: 0.0 }]);

        let theme = ChartTheme::default();
        assert_eq!(image.get_pixel(30, 30).0, [theme.highlight.0, theme.highlight.1, theme.highlight.2]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_backdrop_fills_plotting_area() {
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 0, 0])));
        let map = ScatterMap::new(extent()).with_backdrop(&red);
        assert!(map.has_backdrop());

        let image = render(&map, &[]);
        assert_eq!(image.get_pixel(30, 30).0, [200, 0, 0]);
        // Margin stays background.
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255]);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let map = ScatterMap::new(extent()).with_point_alpha(4.0);
        assert_eq!(map.point_alpha, 1.0);
    }
}
