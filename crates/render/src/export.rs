//! Offscreen rendering of a gauge to PNG

use anyhow::{Context as _, Result};
use std::fs::File;
use std::path::Path;

use flow_gauge_core::{GaugeFrame, GaugeRenderer};
use flow_gauge_types::Rect;

use crate::cairo_surface::CairoSurface;

/// Render `frame` into a `width` x `height` image surface.
///
/// The frame is re-laid out for the image bounds. The background stays
/// transparent.
pub fn render_image<R: GaugeRenderer>(
    frame: &mut GaugeFrame<R>,
    width: i32,
    height: i32,
) -> Result<cairo::ImageSurface> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .with_context(|| format!("Failed to create {}x{} image surface", width, height))?;

    frame.on_bounds_changed(Rect::from_size(width as f64, height as f64));
    {
        let cr = cairo::Context::new(&surface).context("Failed to create cairo context")?;
        let mut target = CairoSurface::new(&cr);
        frame.try_draw(&mut target)?;
    }
    surface.flush();
    Ok(surface)
}

/// Render `frame` and write it to `path` as PNG.
pub fn render_png<R: GaugeRenderer>(
    frame: &mut GaugeFrame<R>,
    width: i32,
    height: i32,
    path: &Path,
) -> Result<()> {
    let surface = render_image(frame, width, height)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    log::info!("Wrote {}x{} gauge snapshot to {}", width, height, path.display());
    Ok(())
}
