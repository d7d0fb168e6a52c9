use crate::chart::color::Rgb;
use crate::models::ShotRecord;

pub const MADE_FLAG: i64 = 1;
pub const MISSED_FLAG: i64 = 0;

/// Scatter marker area in points squared
pub const MARKER_AREA: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    /// "x"
    Cross,
    /// hollow "o"
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub marker: Marker,
    pub color: Rgb,
    /// Stroke width in points
    pub line_width: f32,
    pub area: f32,
}

impl MarkerStyle {
    /// Marker extent in points (matches the scatter `s` convention)
    pub fn size(&self) -> f32 {
        self.area.sqrt()
    }
}

#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub made: Vec<&'a ShotRecord>,
    pub missed: Vec<&'a ShotRecord>,
}

/// Split shots by outcome. Records with a flag other than 0 or 1 end up in neither set.
pub fn partition(shots: &[ShotRecord]) -> Partition<'_> {
    let mut out = Partition::default();
    for shot in shots {
        match shot.shot_made_flag {
            MADE_FLAG => out.made.push(shot),
            MISSED_FLAG => out.missed.push(shot),
            other => tracing::debug!("Skipping shot with made flag {}", other),
        }
    }
    out
}
