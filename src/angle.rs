//! Angle and offset math shared by every arc in the indicator.
//!
//! All angles are in radians and measured from the same origin. [`CIRCLE`] is the
//! one full-turn constant; no arc computes its sweep any other way.

use std::f64::consts::PI;

use crate::arc::Offset;

/// One full turn, in radians.
pub const CIRCLE: f64 = PI * 2.0;

/// Fixed nudge applied to the countdown end-cap marker so it sits centered on the ring.
pub const END_CAP_OFFSET: Offset = Offset {
    top: -0.55,
    left: -0.55,
};

/// Forward bias added to the countdown highlight so it leads the main arc.
pub const HIGHLIGHT_LEAD: f64 = 0.01;

/// Converts a progress fraction into a sweep angle.
///
/// Returns `0.0` for `progress <= 0`. Values above `1.0` are not clamped and produce
/// sweeps beyond a full turn.
#[must_use]
pub fn compute_angle(progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    progress * CIRCLE
}

/// Border width actually drawn.
///
/// An unset (zero) border falls back to a hairline when the spinner is indeterminate.
#[must_use]
pub fn effective_border(border_width: f64, indeterminate: bool) -> f64 {
    if border_width > 0.0 {
        border_width
    } else if indeterminate {
        1.0
    } else {
        0.0
    }
}

/// Radius of the inner arcs for a surface of `size`.
#[must_use]
pub fn inner_radius(size: f64, border: f64) -> f64 {
    size / 2.0 - border
}

/// Visual compensation for the countdown pointer marker at position `start`.
///
/// The four regions are split at 0.25, 0.5 and 0.75. The values are hand tuned and
/// intentionally discontinuous at the region boundaries.
#[must_use]
pub fn pointer_marker_offset(start: f64) -> Offset {
    let top = if start <= 0.5 {
        if start >= 0.25 { -start * 3.0 } else { start * 3.0 }
    } else if start >= 0.75 {
        start / 12.0
    } else {
        -start / 0.4
    };

    let left = if start <= 0.5 {
        if start > 0.25 { start } else { start * 4.0 }
    } else if start > 0.75 {
        -start * 1.5
    } else {
        -start / 0.4
    };

    Offset { top, left }
}

/// Linearly maps `value` from `input` onto `output`, extrapolating past either end.
///
/// A degenerate input range maps everything onto `output.0`.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.0;
    }
    let t = (value - input.0) / span;
    output.0 + t * (output.1 - output.0)
}
