//! Geometry and styling configuration for a progress circle.
//!
//! [`GeometryConfig`] is plain data: every arc in a frame is derived from it plus
//! the current progress value. It is usually assembled through
//! [`ProgressCircleBuilder`](crate::ProgressCircleBuilder), which validates it, but
//! the geometry functions accept any value and never fail.

use std::fmt;

use compact_str::CompactString;

use crate::angle;

/// Sweep direction of the arcs.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    /// Angles grow clockwise.
    #[default]
    Clockwise,
    /// Angles grow counter-clockwise.
    CounterClockwise,
}

/// Shape applied to the open ends of a stroked arc.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrokeCap {
    /// Flat end exactly at the arc endpoint.
    #[default]
    Butt,
    /// Flat end extended by half the stroke width.
    Square,
    /// Rounded end.
    Round,
}

/// A color in whatever textual form the drawing backend understands
/// (`"red"`, `"#ff884c"`, `"rgba(0, 122, 255, 1)"`, ...).
///
/// The crate never parses colors; it only forwards them.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(CompactString);

impl Color {
    /// Creates a color from its textual representation.
    #[must_use]
    pub fn new(value: impl Into<CompactString>) -> Self {
        Self(value.into())
    }

    /// Returns the textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default stroke color of the main arc.
pub const DEFAULT_COLOR: &str = "rgba(0, 122, 255, 1)";

/// Everything the arc geometry depends on besides the progress value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GeometryConfig {
    /// Width and height of the square surface.
    pub size: f64,
    /// Stroke width of the progress arcs.
    pub thickness: f64,
    /// Width of the outer border ring. Zero means "no border" unless indeterminate.
    pub border_width: f64,
    /// Sweep direction.
    pub direction: Direction,
    /// Spinner mode: no main arc, partial border ring.
    pub indeterminate: bool,
    /// Enables the countdown marker arcs.
    pub countdown_timer: bool,
    /// Countdown runs downwards; enables the end-cap and pointer markers.
    pub down_timer: bool,
    /// Countdown position in `[0, 1]`.
    pub start: f64,
    /// Progress at which the countdown began. Enables the origin arc when positive.
    pub origin_progress: f64,
    /// Fraction of the ring covered by the border while indeterminate.
    pub end_angle: f64,
    /// Stroke color of the main arc, and of the border when none is set.
    pub color: Color,
    /// Stroke color of the unfilled track. No track is drawn when unset.
    pub unfilled_color: Option<Color>,
    /// Stroke color of the border ring.
    pub border_color: Option<Color>,
    /// Fill forwarded to the drawing backend.
    pub fill: Option<Color>,
    /// Cap of the main arc and the border.
    pub stroke_cap: StrokeCap,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            size: 40.0,
            thickness: 3.0,
            border_width: 1.0,
            direction: Direction::Clockwise,
            indeterminate: false,
            countdown_timer: false,
            down_timer: false,
            start: 0.0,
            origin_progress: 0.0,
            end_angle: 0.9,
            color: Color::new(DEFAULT_COLOR),
            unfilled_color: None,
            border_color: None,
            fill: None,
            stroke_cap: StrokeCap::Butt,
        }
    }
}

impl GeometryConfig {
    /// Border width actually drawn, see [`angle::effective_border`].
    #[must_use]
    pub fn effective_border(&self) -> f64 {
        angle::effective_border(self.border_width, self.indeterminate)
    }

    /// Radius of every arc except the border ring.
    #[must_use]
    pub fn radius(&self) -> f64 {
        angle::inner_radius(self.size, self.effective_border())
    }

    /// Whether the countdown end-cap and pointer markers are drawn.
    #[must_use]
    pub fn shows_countdown_markers(&self) -> bool {
        self.countdown_timer && self.down_timer && self.start > 0.0
    }
}
