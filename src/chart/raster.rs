use resvg::tiny_skia::{
    FillRule, IntRect, Mask, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Rect,
    Stroke, StrokeDash, Transform,
};
use resvg::usvg;

use crate::chart::RenderError;
use crate::chart::color::Rgb;
use crate::chart::court::CourtElement;
use crate::chart::overlay::{Marker, MarkerStyle};

pub const DPI: f32 = 100.0;
pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 1000;

// Subplot box as fractions of the figure (left, right, bottom, top).
const PLOT_LEFT: f32 = 0.125;
const PLOT_RIGHT: f32 = 0.9;
const PLOT_BOTTOM: f32 = 0.11;
const PLOT_TOP: f32 = 0.88;

// Court extent is -47.5..422.5; 5% of the span is added on each side.
const COURT_Y_MIN: f64 = -47.5;
const COURT_Y_MAX: f64 = 422.5;
const Y_MARGIN: f64 = 0.05;

// "--" on/off lengths in multiples of the line width
const DASH_PATTERN: [f32; 2] = [3.7, 1.6];

pub fn points_to_px(points: f32) -> f32 {
    points * DPI / 72.0
}

/// Plot box in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Maps court coordinates onto canvas pixels.
///
/// `x_left`/`x_right` are the data values at the left/right edges of the plot
/// area, `y_top`/`y_bottom` at the top/bottom edges. Larger X sits further
/// left and larger Y further down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub plot: PlotArea,
}

impl Default for ViewWindow {
    fn default() -> Self {
        let margin = (COURT_Y_MAX - COURT_Y_MIN) * Y_MARGIN;
        let w = CANVAS_WIDTH as f32;
        let h = CANVAS_HEIGHT as f32;

        Self {
            x_left: 300.0,
            x_right: -300.0,
            y_top: COURT_Y_MIN - margin,
            y_bottom: COURT_Y_MAX + margin,
            plot: PlotArea {
                left: w * PLOT_LEFT,
                top: h * (1.0 - PLOT_TOP),
                right: w * PLOT_RIGHT,
                bottom: h * (1.0 - PLOT_BOTTOM),
            },
        }
    }
}

impl ViewWindow {
    fn scale(&self) -> (f64, f64) {
        (
            self.plot.width() as f64 / (self.x_right - self.x_left),
            self.plot.height() as f64 / (self.y_bottom - self.y_top),
        )
    }

    pub fn project(&self, x: f64, y: f64) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (
            (self.plot.left as f64 + (x - self.x_left) * sx) as f32,
            (self.plot.top as f64 + (y - self.y_top) * sy) as f32,
        )
    }

    pub fn transform(&self) -> Transform {
        let (sx, sy) = self.scale();
        let tx = self.plot.left as f64 - self.x_left * sx;
        let ty = self.plot.top as f64 - self.y_top * sy;
        Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, tx as f32, ty as f32)
    }
}

/// A drawing context owned by a single render call.
///
/// Everything is clipped to the plot area; the background stays transparent.
pub struct Surface {
    pixmap: Pixmap,
    clip: Mask,
    view: ViewWindow,
}

impl Surface {
    pub fn new(view: ViewWindow) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT)
            .ok_or(RenderError::Surface(CANVAS_WIDTH, CANVAS_HEIGHT))?;
        let mut clip = Mask::new(CANVAS_WIDTH, CANVAS_HEIGHT)
            .ok_or(RenderError::Surface(CANVAS_WIDTH, CANVAS_HEIGHT))?;
        let plot = Rect::from_ltrb(view.plot.left, view.plot.top, view.plot.right, view.plot.bottom)
            .ok_or(RenderError::Surface(CANVAS_WIDTH, CANVAS_HEIGHT))?;
        clip.fill_path(
            &PathBuilder::from_rect(plot),
            FillRule::Winding,
            false,
            Transform::identity(),
        );

        Ok(Self { pixmap, clip, view })
    }

    pub fn view(&self) -> &ViewWindow {
        &self.view
    }

    fn paint(color: Rgb) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = true;
        paint
    }

    fn stroke_px(&mut self, path: &Path, color: Rgb, width_px: f32, dash: Option<StrokeDash>) {
        let stroke = Stroke {
            width: width_px,
            dash,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            path,
            &Self::paint(color),
            &stroke,
            Transform::identity(),
            Some(&self.clip),
        );
    }

    pub fn draw_element(&mut self, element: &CourtElement) {
        let Some(path) = element
            .shape
            .to_path()
            .and_then(|p| p.transform(self.view.transform()))
        else {
            tracing::debug!("Court element {} produced no path", element.name);
            return;
        };

        let style = element.style;
        let width = points_to_px(style.line_width);

        if style.filled {
            self.pixmap.fill_path(
                &path,
                &Self::paint(style.color),
                FillRule::Winding,
                Transform::identity(),
                Some(&self.clip),
            );
        }

        let dash = if style.dashed {
            StrokeDash::new(DASH_PATTERN.iter().map(|d| d * width).collect(), 0.0)
        } else {
            None
        };

        self.stroke_px(&path, style.color, width, dash);
    }

    pub fn draw_marker(&mut self, x: f64, y: f64, style: &MarkerStyle) {
        let (cx, cy) = self.view.project(x, y);
        let half = points_to_px(style.size()) / 2.0;

        let path = match style.marker {
            Marker::Cross => {
                let mut pb = PathBuilder::new();
                pb.move_to(cx - half, cy - half);
                pb.line_to(cx + half, cy + half);
                pb.move_to(cx - half, cy + half);
                pb.line_to(cx + half, cy - half);
                pb.finish()
            }
            Marker::Circle => PathBuilder::from_circle(cx, cy, half),
        };

        if let Some(path) = path {
            self.stroke_px(&path, style.color, points_to_px(style.line_width), None);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.pixmap.pixel(x, y)
    }

    /// Crop to drawn content and encode as PNG.
    pub fn into_png(self) -> Result<Vec<u8>, RenderError> {
        let pixmap = trim(self.pixmap);
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

/// Smallest sub-image holding every non-transparent pixel. Blank images are
/// returned unchanged.
pub fn trim(pixmap: Pixmap) -> Pixmap {
    let width = pixmap.width();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (i, px) in pixmap.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    let Some((left, top, right, bottom)) = bounds else {
        return pixmap;
    };

    IntRect::from_xywh(
        left as i32,
        top as i32,
        right - left + 1,
        bottom - top + 1,
    )
    .and_then(|rect| pixmap.clone_rect(rect))
    .unwrap_or(pixmap)
}

/// Rasterize an SVG document so that its longer side is `max_side` pixels.
pub fn svg_to_png(data: &[u8], max_side: u32) -> Result<Vec<u8>, RenderError> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size();
    let scale = max_side as f32 / size.width().max(size.height());
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface(width, height))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_window_is_mirrored_and_inverted() {
        let view = ViewWindow::default();

        let (left_x, _) = view.project(300.0, 0.0);
        let (right_x, _) = view.project(-300.0, 0.0);
        assert!((left_x - view.plot.left).abs() < 1e-3);
        assert!((right_x - view.plot.right).abs() < 1e-3);
        assert!(view.project(100.0, 0.0).0 < view.project(-100.0, 0.0).0);

        let (_, hoop_y) = view.project(0.0, 0.0);
        let (_, half_court_y) = view.project(0.0, 422.5);
        assert!(hoop_y < half_court_y);
    }

    #[test]
    fn transform_agrees_with_project() {
        let view = ViewWindow::default();
        let ts = view.transform();
        for (x, y) in [(0.0, 0.0), (-220.0, 50.0), (250.0, 422.5)] {
            let mut p = [resvg::tiny_skia::Point::from_xy(x as f32, y as f32)];
            ts.map_points(&mut p);
            let (px, py) = view.project(x, y);
            assert!((p[0].x - px).abs() < 1e-2);
            assert!((p[0].y - py).abs() < 1e-2);
        }
    }

    #[test]
    fn trim_crops_to_content() {
        let mut pixmap = Pixmap::new(50, 40).unwrap();
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);
        let rect = Rect::from_xywh(10.0, 5.0, 20.0, 8.0).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);

        let trimmed = trim(pixmap);
        assert_eq!((trimmed.width(), trimmed.height()), (20, 8));
    }

    #[test]
    fn trim_keeps_blank_images() {
        let trimmed = trim(Pixmap::new(7, 3).unwrap());
        assert_eq!((trimmed.width(), trimmed.height()), (7, 3));
    }

    #[test]
    fn svg_is_scaled_to_max_side() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20">
            <rect width="10" height="20" fill="#552583"/></svg>"##;
        let png = svg_to_png(svg, 512).unwrap();
        let decoded = Pixmap::decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 512));
        assert_eq!(decoded.pixel(128, 256).unwrap().alpha(), 255);
    }

    #[test]
    fn broken_svg_is_an_error() {
        assert!(matches!(
            svg_to_png(b"<not svg", 512),
            Err(RenderError::Svg(_))
        ));
    }
}
