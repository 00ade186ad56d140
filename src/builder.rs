//! Fluent interface for constructing [`ProgressCircle`] instances.
//!
//! The builder collects geometry, styling and progress settings, then validates
//! them once in [`build`](ProgressCircleBuilder::build). Problems that would make
//! the indicator impossible to draw (animated mode without a source, a zero-sized
//! surface, ...) surface there as a [`ConfigError`] instead of at render time.
//!
//! # Example
//!
//! ```
//! use progress_circle::{ArcRole, ProgressCircleBuilder};
//!
//! let circle = ProgressCircleBuilder::new()
//!     .with_size(64.0)
//!     .with_thickness(4.0)
//!     .with_unfilled_color("#e0e0e0")
//!     .with_progress(0.25)
//!     .build()
//!     .unwrap();
//!
//! let roles: Vec<_> = circle.render().arcs.iter().map(|arc| arc.role).collect();
//! assert_eq!(roles, [ArcRole::UnfilledTrack, ArcRole::Progress, ArcRole::Border]);
//! ```

use std::sync::Arc;

use compact_str::CompactString;

use crate::{
    circle::{ProgressCircle, ProgressInput, TextFormatter, format_percent},
    config::{Color, Direction, GeometryConfig, StrokeCap},
    error::ConfigError,
    source::ProgressSource,
    sync::{ProgressSyncController, RedrawPolicy},
};

/// A builder pattern for constructing [`ProgressCircle`] instances.
#[derive(Default)]
pub struct ProgressCircleBuilder {
    config: GeometryConfig,
    animated: bool,
    progress: f64,
    source: Option<Arc<dyn ProgressSource>>,
    rotation: Option<Arc<dyn ProgressSource>>,
    shows_text: bool,
    format_text: Option<TextFormatter>,
    policy: Option<Arc<dyn RedrawPolicy>>,
}

impl ProgressCircleBuilder {
    /// Starts from the default geometry: a 40 unit determinate ring at zero progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole geometry configuration.
    #[must_use]
    pub fn with_config(mut self, config: GeometryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the width and height of the surface.
    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.config.size = size;
        self
    }

    /// Sets the stroke width of the progress arcs.
    #[must_use]
    pub const fn with_thickness(mut self, thickness: f64) -> Self {
        self.config.thickness = thickness;
        self
    }

    /// Sets the border ring width. Zero disables the border (except while indeterminate).
    #[must_use]
    pub const fn with_border_width(mut self, border_width: f64) -> Self {
        self.config.border_width = border_width;
        self
    }

    /// Sets the sweep direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Switches spinner mode on or off.
    #[must_use]
    pub const fn with_indeterminate(mut self, indeterminate: bool) -> Self {
        self.config.indeterminate = indeterminate;
        self
    }

    /// Enables the countdown timer decorations.
    #[must_use]
    pub const fn with_countdown_timer(mut self, countdown_timer: bool) -> Self {
        self.config.countdown_timer = countdown_timer;
        self
    }

    /// Marks the countdown as running downwards, enabling the position markers.
    #[must_use]
    pub const fn with_down_timer(mut self, down_timer: bool) -> Self {
        self.config.down_timer = down_timer;
        self
    }

    /// Sets the countdown position in `[0, 1]`.
    #[must_use]
    pub const fn with_start(mut self, start: f64) -> Self {
        self.config.start = start;
        self
    }

    /// Sets the progress at which the countdown began.
    #[must_use]
    pub const fn with_origin_progress(mut self, origin_progress: f64) -> Self {
        self.config.origin_progress = origin_progress;
        self
    }

    /// Sets the fraction of the ring the border covers while indeterminate.
    #[must_use]
    pub const fn with_end_angle(mut self, end_angle: f64) -> Self {
        self.config.end_angle = end_angle;
        self
    }

    /// Sets the main stroke color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.config.color = color.into();
        self
    }

    /// Sets the unfilled track color, enabling the track.
    #[must_use]
    pub fn with_unfilled_color(mut self, color: impl Into<Color>) -> Self {
        self.config.unfilled_color = Some(color.into());
        self
    }

    /// Sets the border color. Defaults to the main color.
    #[must_use]
    pub fn with_border_color(mut self, color: impl Into<Color>) -> Self {
        self.config.border_color = Some(color.into());
        self
    }

    /// Sets the fill forwarded to the drawing backend.
    #[must_use]
    pub fn with_fill(mut self, color: impl Into<Color>) -> Self {
        self.config.fill = Some(color.into());
        self
    }

    /// Sets the cap of the main arc and border.
    #[must_use]
    pub const fn with_stroke_cap(mut self, stroke_cap: StrokeCap) -> Self {
        self.config.stroke_cap = stroke_cap;
        self
    }

    /// Declares whether progress comes from an animated source.
    #[must_use]
    pub const fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Sets a plain progress value (static mode).
    #[must_use]
    pub const fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the animated progress source (animated mode).
    #[must_use]
    pub fn with_progress_source(mut self, source: Arc<dyn ProgressSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the source that rotates the surface while indeterminate.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Arc<dyn ProgressSource>) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Shows the progress label in the middle of the ring.
    #[must_use]
    pub const fn with_shows_text(mut self, shows_text: bool) -> Self {
        self.shows_text = shows_text;
        self
    }

    /// Sets the label formatter. Defaults to [`format_percent`].
    #[must_use]
    pub fn with_format_text<F>(mut self, format_text: F) -> Self
    where
        F: Fn(f64) -> CompactString + Send + Sync + 'static,
    {
        self.format_text = Some(Arc::new(format_text));
        self
    }

    /// Replaces the policy deciding which animated values trigger a redraw.
    #[must_use]
    pub fn with_redraw_policy(mut self, policy: impl RedrawPolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Validates the settings and returns the constructed [`ProgressCircle`].
    pub fn build(self) -> Result<ProgressCircle, ConfigError> {
        self.validate().inspect_err(|error| {
            tracing::warn!(%error, "rejected progress circle configuration");
        })?;

        let input = match self.source {
            Some(source) => ProgressInput::Animated(source),
            None => ProgressInput::Static(self.progress),
        };
        let sync = self
            .policy
            .map_or_else(ProgressSyncController::new, ProgressSyncController::with_policy);

        Ok(ProgressCircle {
            config: self.config,
            input,
            rotation: self.rotation,
            shows_text: self.shows_text,
            format_text: self
                .format_text
                .unwrap_or_else(|| Arc::new(format_percent)),
            sync,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match (self.animated, self.source.is_some()) {
            (true, false) => return Err(ConfigError::MissingProgressSource),
            (false, true) => return Err(ConfigError::UnexpectedProgressSource),
            _ => {}
        }

        let GeometryConfig {
            size,
            thickness,
            border_width,
            ..
        } = self.config;
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::InvalidSize(size));
        }
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(ConfigError::InvalidThickness(thickness));
        }
        if !border_width.is_finite() || border_width < 0.0 {
            return Err(ConfigError::InvalidBorderWidth(border_width));
        }
        Ok(())
    }
}
