//! Chart rendering trait and PNG output.

use crate::theme::ChartTheme;
use async_trait::async_trait;
use image::{ImageOutputFormat, RgbImage};
use shopdash_common::{Result, ShopDashError};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// A chart that draws one kind of dashboard view.
///
/// Implementors only provide [`GraphRenderer::draw`], which paints into a
/// raw RGB buffer; encoding and file output are shared.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// View this chart draws
    type Data: ?Sized + Sync;

    /// Short name, also used as the output file stem.
    fn name(&self) -> &'static str;

    /// Paint `data` into an RGB buffer of `theme.width` x `theme.height`.
    fn draw(&self, data: &Self::Data, theme: &ChartTheme, buffer: &mut [u8]) -> Result<()>;

    /// Render to PNG bytes.
    async fn render_to_bytes(&self, data: &Self::Data, theme: &ChartTheme) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; theme.buffer_len()];
        self.draw(data, theme, &mut buffer)?;
        let png = encode_png(buffer, theme.width, theme.height)?;
        debug!(chart = self.name(), bytes = png.len(), "Encoded chart");
        Ok(png)
    }

    /// Render to a PNG file at `path`.
    async fn render_to_file(&self, data: &Self::Data, theme: &ChartTheme, path: &Path) -> Result<()> {
        let png = self.render_to_bytes(data, theme).await?;
        tokio::fs::write(path, png).await?;
        info!("Successfully rendered {} chart to {}", self.name(), path.display());
        Ok(())
    }
}

/// Encode a raw RGB buffer as PNG.
pub fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        ShopDashError::graph(format!("pixel buffer does not match {width}x{height}"))
    })?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(|e| ShopDashError::graph_with_source("PNG encoding failed", e))?;
    Ok(out.into_inner())
}
