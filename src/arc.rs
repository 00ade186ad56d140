//! Arc geometry: turns a progress value and a [`GeometryConfig`] into the ordered
//! list of arcs that make up one frame.
//!
//! # Layering
//!
//! Arcs are produced back to front. A frame holds at most one of each [`ArcRole`],
//! always in this order:
//!
//! 1. [`ArcRole::UnfilledTrack`]
//! 2. [`ArcRole::CountdownOrigin`]
//! 3. [`ArcRole::CountdownEndCap`]
//! 4. [`ArcRole::CountdownPointer`]
//! 5. [`ArcRole::CountdownHighlight`]
//! 6. [`ArcRole::Progress`]
//! 7. [`ArcRole::Border`]
//!
//! Nothing here has side effects, so [`compute_arcs`] can be called from any number
//! of render passes at once and always returns the same arcs for the same inputs.

use crate::{
    angle::{self, CIRCLE, END_CAP_OFFSET, HIGHLIGHT_LEAD},
    config::{Color, Direction, GeometryConfig, StrokeCap},
};

/// Stroke of the countdown origin arc.
pub const COUNTDOWN_ORIGIN_COLOR: &str = "#ff884c";
/// Fill of the countdown end-cap marker.
pub const END_CAP_FILL: &str = "#000000";
/// Stroke of the countdown end-cap marker and highlight arc.
pub const HIGHLIGHT_COLOR: &str = "white";
/// Stroke of the countdown pointer marker.
pub const POINTER_COLOR: &str = "red";

/// Translation of an arc relative to the surface origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Vertical shift.
    pub top: f64,
    /// Horizontal shift.
    pub left: f64,
}

impl Offset {
    /// The same shift on both axes.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
        }
    }
}

/// What a given arc represents in the indicator.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArcRole {
    /// Full ring behind everything, in the unfilled color.
    UnfilledTrack,
    /// Span from zero to the countdown position.
    CountdownOrigin,
    /// Point marker outlining the countdown position.
    CountdownEndCap,
    /// Point marker drawn over the end cap.
    CountdownPointer,
    /// White arc slightly ahead of the main progress arc.
    CountdownHighlight,
    /// The main progress arc.
    Progress,
    /// Outer ring (partial while indeterminate).
    Border,
}

/// Fully resolved parameters of a single arc.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcSpec {
    /// Which layer this arc is.
    pub role: ArcRole,
    /// Radius of the arc's center line.
    pub radius: f64,
    /// Translation applied before drawing.
    pub offset: Offset,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians. Equal to `start_angle` for point markers.
    pub end_angle: f64,
    /// Sweep direction.
    pub direction: Direction,
    /// Stroke color.
    pub stroke: Color,
    /// Cap of the stroke ends.
    pub stroke_cap: StrokeCap,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill, if any.
    pub fill: Option<Color>,
}

impl ArcSpec {
    /// Angular extent of the arc, `end_angle - start_angle`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the arc degenerates to a single point.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start_angle == self.end_angle
    }
}

/// Backend that paints a single resolved arc.
///
/// Implement this for whatever vector surface the host renders to.
pub trait ArcPainter {
    /// Handle produced for each painted arc.
    type Drawable;

    /// Paints one arc.
    fn draw(&mut self, arc: &ArcSpec) -> Self::Drawable;
}

impl<P: ArcPainter + ?Sized> ArcPainter for &mut P {
    type Drawable = P::Drawable;

    fn draw(&mut self, arc: &ArcSpec) -> Self::Drawable {
        (**self).draw(arc)
    }
}

/// Computes the arcs of one frame, back to front.
///
/// * `progress_value`: the value the caller last observed; drives the unfilled
///   track and the countdown highlight.
/// * `raw_value`: the live value of the progress input; drives the main arc and
///   the highlight sweep. For static input both values are the same.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn compute_arcs(progress_value: f64, raw_value: f64, config: &GeometryConfig) -> Vec<ArcSpec> {
    let border = config.effective_border();
    let radius = config.radius();
    let offset = Offset::uniform(border);
    let start_angle = config.start * CIRCLE;

    let inner = |role, end_angle, stroke: Color, stroke_cap, stroke_width| ArcSpec {
        role,
        radius,
        offset,
        start_angle: 0.0,
        end_angle,
        direction: config.direction,
        stroke,
        stroke_cap,
        stroke_width,
        fill: config.fill.clone(),
    };

    let mut arcs = Vec::with_capacity(7);

    if let Some(unfilled) = config
        .unfilled_color
        .as_ref()
        .filter(|_| progress_value != 1.0)
    {
        arcs.push(inner(
            ArcRole::UnfilledTrack,
            CIRCLE,
            unfilled.clone(),
            StrokeCap::Butt,
            config.thickness,
        ));
    }

    if config.countdown_timer && config.origin_progress > 0.0 {
        arcs.push(inner(
            ArcRole::CountdownOrigin,
            start_angle,
            Color::new(COUNTDOWN_ORIGIN_COLOR),
            StrokeCap::Round,
            config.thickness,
        ));
    }

    if config.shows_countdown_markers() {
        arcs.push(ArcSpec {
            offset: END_CAP_OFFSET,
            start_angle,
            fill: Some(Color::new(END_CAP_FILL)),
            ..inner(
                ArcRole::CountdownEndCap,
                start_angle,
                Color::new(HIGHLIGHT_COLOR),
                StrokeCap::Round,
                config.thickness - 0.5,
            )
        });
        arcs.push(ArcSpec {
            offset: angle::pointer_marker_offset(config.start),
            start_angle,
            ..inner(
                ArcRole::CountdownPointer,
                start_angle,
                Color::new(POINTER_COLOR),
                StrokeCap::Round,
                config.thickness - 3.0,
            )
        });
    }

    if config.countdown_timer && progress_value > 0.0 {
        arcs.push(inner(
            ArcRole::CountdownHighlight,
            (raw_value + HIGHLIGHT_LEAD) * CIRCLE,
            Color::new(HIGHLIGHT_COLOR),
            StrokeCap::Round,
            config.thickness,
        ));
    }

    if !config.indeterminate && raw_value > 0.0 {
        arcs.push(inner(
            ArcRole::Progress,
            angle::compute_angle(raw_value),
            config.color.clone(),
            config.stroke_cap,
            config.thickness,
        ));
    }

    if border > 0.0 {
        let turns = if config.indeterminate {
            config.end_angle * 2.0
        } else {
            2.0
        };
        arcs.push(ArcSpec {
            role: ArcRole::Border,
            radius: config.size / 2.0,
            offset: Offset::default(),
            start_angle: 0.0,
            end_angle: turns * std::f64::consts::PI,
            direction: Direction::Clockwise,
            stroke: config
                .border_color
                .clone()
                .unwrap_or_else(|| config.color.clone()),
            stroke_cap: config.stroke_cap,
            stroke_width: border,
            fill: None,
        });
    }

    arcs
}
