use resvg::tiny_skia::{Path, PathBuilder};

use crate::chart::color::Rgb;

// Arcs are flattened to polylines at this many segments per degree.
const ARC_SEGMENTS_PER_DEGREE: f64 = 2.0;

/// Court geometry in 1/10 ft units with the hoop at the origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Anchored at `corner`; width or height may be zero or negative.
    Rectangle {
        corner: (f64, f64),
        width: f64,
        height: f64,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
    },
    /// Elliptical arc swept counter-clockwise from `theta1` to `theta2` degrees.
    /// `width` and `height` are diameters.
    Arc {
        center: (f64, f64),
        width: f64,
        height: f64,
        theta1: f64,
        theta2: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    /// Stroke width in points
    pub line_width: f32,
    pub filled: bool,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourtElement {
    pub name: &'static str,
    pub shape: Shape,
    pub style: LineStyle,
}

fn rect(corner: (f64, f64), width: f64, height: f64) -> Shape {
    Shape::Rectangle {
        corner,
        width,
        height,
    }
}

fn arc(center: (f64, f64), diameter: f64, theta1: f64, theta2: f64) -> Shape {
    Shape::Arc {
        center,
        width: diameter,
        height: diameter,
        theta1,
        theta2,
    }
}

/// The fixed court markings, in drawing order.
///
/// Only the first element (the black outer boundary) ignores `color`.
pub fn court_elements(color: Rgb, line_width: f32) -> Vec<CourtElement> {
    let line = LineStyle {
        color,
        line_width,
        filled: false,
        dashed: false,
    };
    let black = LineStyle {
        color: Rgb::new(0.0, 0.0, 0.0),
        ..line
    };
    let filled = LineStyle {
        filled: true,
        ..line
    };
    let dashed = LineStyle {
        dashed: true,
        ..line
    };

    let element = |name, shape, style| CourtElement { name, shape, style };

    vec![
        element("outer_lines", rect((-250.0, -47.5), 500.0, 470.0), black),
        element("outer_lines_colored", rect((-250.0, -47.5), 500.0, 470.0), line),
        element(
            "hoop",
            Shape::Circle {
                center: (0.0, 0.0),
                radius: 7.5,
            },
            line,
        ),
        element("backboard", rect((-30.0, -7.5), 60.0, -1.0), filled),
        element("outer_box", rect((-80.0, -47.5), 160.0, 190.0), line),
        element("inner_box", rect((-60.0, -47.5), 120.0, 190.0), line),
        element("top_free_throw", arc((0.0, 142.5), 120.0, 0.0, 180.0), line),
        element("bottom_free_throw", arc((0.0, 142.5), 120.0, 180.0, 0.0), dashed),
        element("restricted", arc((0.0, 0.0), 80.0, 0.0, 180.0), line),
        element("corner_three_a", rect((-220.0, -47.5), 0.0, 140.0), line),
        element("corner_three_b", rect((220.0, -47.5), 0.0, 140.0), line),
        element("three_arc", arc((0.0, 0.0), 475.0, 22.0, 158.0), line),
        element("center_outer_arc", arc((0.0, 422.5), 120.0, 180.0, 0.0), line),
        element("center_inner_arc", arc((0.0, 422.5), 40.0, 180.0, 0.0), line),
    ]
}

impl Shape {
    /// Outline in court coordinates
    pub fn to_path(&self) -> Option<Path> {
        match *self {
            Shape::Rectangle {
                corner: (x, y),
                width,
                height,
            } => {
                let mut pb = PathBuilder::new();
                pb.move_to(x as f32, y as f32);
                pb.line_to((x + width) as f32, y as f32);
                pb.line_to((x + width) as f32, (y + height) as f32);
                pb.line_to(x as f32, (y + height) as f32);
                pb.close();
                pb.finish()
            }
            Shape::Circle {
                center: (cx, cy),
                radius,
            } => PathBuilder::from_circle(cx as f32, cy as f32, radius as f32),
            Shape::Arc {
                center: (cx, cy),
                width,
                height,
                theta1,
                theta2,
            } => {
                let sweep = arc_sweep(theta1, theta2);
                let segments = (sweep * ARC_SEGMENTS_PER_DEGREE).ceil().max(1.0) as usize;

                let mut pb = PathBuilder::new();
                for i in 0..=segments {
                    let theta = (theta1 + sweep * i as f64 / segments as f64).to_radians();
                    let x = cx + width / 2.0 * theta.cos();
                    let y = cy + height / 2.0 * theta.sin();
                    if i == 0 {
                        pb.move_to(x as f32, y as f32);
                    } else {
                        pb.line_to(x as f32, y as f32);
                    }
                }
                pb.finish()
            }
        }
    }
}

/// Counter-clockwise sweep in degrees; an end at or before the start wraps.
fn arc_sweep(theta1: f64, theta2: f64) -> f64 {
    let mut sweep = theta2 - theta1;
    while sweep <= 0.0 {
        sweep += 360.0;
    }
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Rgb {
        Rgb::new(1.0, 1.0, 1.0)
    }

    #[test]
    fn fourteen_elements() {
        assert_eq!(court_elements(white(), 3.0).len(), 14);
    }

    #[test]
    fn geometry_does_not_depend_on_style() {
        let a = court_elements(white(), 3.0);
        let b = court_elements(Rgb::new(0.2, 0.3, 0.9), 11.0);
        let shapes_a: Vec<_> = a.iter().map(|e| &e.shape).collect();
        let shapes_b: Vec<_> = b.iter().map(|e| &e.shape).collect();
        assert_eq!(shapes_a, shapes_b);
    }

    #[test]
    fn only_the_first_boundary_is_black() {
        let color = Rgb::new(0.9, 0.5, 0.1);
        let elements = court_elements(color, 4.0);

        assert_eq!(elements[0].style.color, Rgb::new(0.0, 0.0, 0.0));
        for element in &elements[1..] {
            assert_eq!(element.style.color, color, "{}", element.name);
        }
        assert!(elements.iter().all(|e| e.style.line_width == 4.0));
    }

    #[test]
    fn literal_parameters() {
        let rectangle = |x, y, width, height| Shape::Rectangle {
            corner: (x, y),
            width,
            height,
        };
        let ellipse = |x, y, diameter, theta1, theta2| Shape::Arc {
            center: (x, y),
            width: diameter,
            height: diameter,
            theta1,
            theta2,
        };

        let expected = vec![
            ("outer_lines", rectangle(-250.0, -47.5, 500.0, 470.0)),
            ("outer_lines_colored", rectangle(-250.0, -47.5, 500.0, 470.0)),
            ("hoop", Shape::Circle { center: (0.0, 0.0), radius: 7.5 }),
            ("backboard", rectangle(-30.0, -7.5, 60.0, -1.0)),
            ("outer_box", rectangle(-80.0, -47.5, 160.0, 190.0)),
            ("inner_box", rectangle(-60.0, -47.5, 120.0, 190.0)),
            ("top_free_throw", ellipse(0.0, 142.5, 120.0, 0.0, 180.0)),
            ("bottom_free_throw", ellipse(0.0, 142.5, 120.0, 180.0, 0.0)),
            ("restricted", ellipse(0.0, 0.0, 80.0, 0.0, 180.0)),
            ("corner_three_a", rectangle(-220.0, -47.5, 0.0, 140.0)),
            ("corner_three_b", rectangle(220.0, -47.5, 0.0, 140.0)),
            ("three_arc", ellipse(0.0, 0.0, 475.0, 22.0, 158.0)),
            ("center_outer_arc", ellipse(0.0, 422.5, 120.0, 180.0, 0.0)),
            ("center_inner_arc", ellipse(0.0, 422.5, 40.0, 180.0, 0.0)),
        ];

        let actual: Vec<(&str, Shape)> = court_elements(white(), 3.0)
            .into_iter()
            .map(|e| (e.name, e.shape))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn style_flags_sit_on_the_right_elements() {
        let color = Rgb::new(0.9, 0.5, 0.1);
        let elements = court_elements(color, 3.0);

        assert_eq!(elements[0].name, "outer_lines");
        assert_eq!(elements[0].style.color, Rgb::new(0.0, 0.0, 0.0));

        let filled: Vec<_> = elements.iter().filter(|e| e.style.filled).map(|e| e.name).collect();
        let dashed: Vec<_> = elements.iter().filter(|e| e.style.dashed).map(|e| e.name).collect();
        assert_eq!(filled, ["backboard"]);
        assert_eq!(dashed, ["bottom_free_throw"]);
    }

    #[test]
    fn reversed_arcs_sweep_the_lower_half() {
        assert_eq!(arc_sweep(0.0, 180.0), 180.0);
        assert_eq!(arc_sweep(180.0, 0.0), 180.0);
        assert_eq!(arc_sweep(22.0, 158.0), 136.0);

        let path = arc((0.0, 422.5), 120.0, 180.0, 0.0).to_path().unwrap();
        let bounds = path.bounds();
        assert!(bounds.bottom() <= 422.5 + 1e-3);
        assert!((bounds.top() - 362.5).abs() < 1e-3);
    }

    #[test]
    fn every_shape_has_a_path() {
        for element in court_elements(white(), 3.0) {
            assert!(element.shape.to_path().is_some(), "{}", element.name);
        }
    }
}
