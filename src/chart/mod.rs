//! Shot chart rendering: court diagram, made/missed overlay and PNG export.

pub mod color;
pub mod court;
pub mod overlay;
pub mod raster;

use thiserror::Error;

use self::color::{ColorParseError, ColorSpec, Rgb, lighten};
use self::overlay::{MARKER_AREA, Marker, MarkerStyle};
use self::raster::{Surface, ViewWindow};
use crate::models::ShotRecord;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate a {0}x{1} drawing surface")]
    Surface(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("SVG parsing failed: {0}")]
    Svg(String),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Colors and line widths for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub court_color: Rgb,
    /// Court line width in points
    pub court_line_width: f32,
    pub made: MarkerStyle,
    pub missed: MarkerStyle,
}

impl ChartStyle {
    /// White court lines, light red crosses for misses and light green rings for makes.
    ///
    /// Computed on every call so palette changes always apply.
    pub fn standard() -> Result<Self, ColorParseError> {
        Ok(Self {
            court_color: lighten(&ColorSpec::named("White"), 0.0)?,
            court_line_width: 3.0,
            made: MarkerStyle {
                marker: Marker::Circle,
                color: lighten(&ColorSpec::named("Green"), 0.3)?,
                line_width: 2.5,
                area: MARKER_AREA,
            },
            missed: MarkerStyle {
                marker: Marker::Cross,
                color: lighten(&ColorSpec::named("Red"), 0.2)?,
                line_width: 3.0,
                area: MARKER_AREA,
            },
        })
    }
}

/// Draw court and shots onto a fresh surface without encoding it.
pub fn compose(shots: &[ShotRecord], style: &ChartStyle) -> Result<Surface, RenderError> {
    let mut surface = Surface::new(ViewWindow::default())?;

    for element in court::court_elements(style.court_color, style.court_line_width) {
        surface.draw_element(&element);
    }

    let split = overlay::partition(shots);
    for shot in &split.missed {
        surface.draw_marker(shot.loc_x as f64, shot.loc_y as f64, &style.missed);
    }
    for shot in &split.made {
        surface.draw_marker(shot.loc_x as f64, shot.loc_y as f64, &style.made);
    }

    tracing::debug!(
        "Composed shot chart: {} made, {} missed, {} skipped",
        split.made.len(),
        split.missed.len(),
        shots.len() - split.made.len() - split.missed.len()
    );

    Ok(surface)
}

/// Render a shot chart as a transparent, content-trimmed PNG.
pub fn render(shots: &[ShotRecord], style: &ChartStyle) -> Result<Vec<u8>, RenderError> {
    compose(shots, style)?.into_png()
}
