//! The assembled indicator.
//!
//! [`ProgressCircle`] ties the pieces together: it owns the [`GeometryConfig`], the
//! [`ProgressInput`] and the [`ProgressSyncController`], and turns them into a
//! [`Frame`] on demand. Hosts typically:
//!
//! 1. build the circle with [`ProgressCircleBuilder`](crate::ProgressCircleBuilder),
//! 2. [`mount`](ProgressCircle::mount) it with a callback that schedules a re-render,
//! 3. call [`render`](ProgressCircle::render) (or [`paint`](ProgressCircle::paint))
//!    whenever they draw,
//! 4. [`unmount`](ProgressCircle::unmount) it (or drop it) when it goes away.

use std::{fmt, sync::Arc};

use compact_str::{CompactString, format_compact};

use crate::{
    angle,
    arc::{self, ArcPainter, ArcSpec},
    config::GeometryConfig,
    source::ProgressSource,
    sync::{ProgressSyncController, RedrawRequest},
};

/// Formats the progress value shown in the label.
pub type TextFormatter = Arc<dyn Fn(f64) -> CompactString + Send + Sync>;

/// The default label: the progress as a rounded percentage, e.g. `"42%"`.
///
/// Halves round up, towards positive infinity, so small negative values read
/// `"0%"` rather than `"-0%"`. Out-of-range progress is formatted as is.
#[must_use]
pub fn format_percent(progress: f64) -> CompactString {
    format_compact!("{:.0}%", (progress * 100.0 + 0.5).floor())
}

/// Where the progress value comes from.
#[derive(Clone)]
pub enum ProgressInput {
    /// A plain value, read directly by every render.
    Static(f64),
    /// A value driven by the host's animation runtime.
    Animated(Arc<dyn ProgressSource>),
}

impl ProgressInput {
    /// The value right now: the plain number, or the source's live value.
    #[must_use]
    pub fn raw_value(&self) -> f64 {
        match self {
            Self::Static(value) => *value,
            Self::Animated(source) => source.current_value(),
        }
    }

    /// Sweep of the main arc for the current value.
    #[must_use]
    pub fn angle(&self) -> f64 {
        angle::compute_angle(self.raw_value())
    }

    /// Whether the input is an animated source.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

impl Default for ProgressInput {
    fn default() -> Self {
        Self::Static(0.0)
    }
}

impl fmt::Debug for ProgressInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Animated(source) => f
                .debug_tuple("Animated")
                .field(&source.current_value())
                .finish(),
        }
    }
}

/// Text box centered inside the ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Formatted progress.
    pub text: CompactString,
    /// Inset from the top-left corner of the surface, on both axes.
    pub offset: f64,
    /// Width and height of the box.
    pub size: f64,
    /// Corner radius that makes the box a circle.
    pub corner_radius: f64,
}

/// Everything needed to draw the indicator once.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Width and height of the square surface.
    pub size: f64,
    /// Rotation of the whole surface, in degrees.
    pub rotation_degrees: f64,
    /// Arcs, back to front.
    pub arcs: Vec<ArcSpec>,
    /// The label, when one is shown.
    pub label: Option<Label>,
}

impl Frame {
    /// Hands every arc to `painter`, back to front.
    pub fn paint<P: ArcPainter>(&self, mut painter: P) -> Vec<P::Drawable> {
        self.arcs.iter().map(|arc| painter.draw(arc)).collect()
    }
}

/// A circular progress indicator.
pub struct ProgressCircle {
    pub(crate) config: GeometryConfig,
    pub(crate) input: ProgressInput,
    pub(crate) rotation: Option<Arc<dyn ProgressSource>>,
    pub(crate) shows_text: bool,
    pub(crate) format_text: TextFormatter,
    pub(crate) sync: ProgressSyncController,
}

impl ProgressCircle {
    /// The geometry and styling configuration.
    #[must_use]
    pub const fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// The progress input.
    #[must_use]
    pub const fn input(&self) -> &ProgressInput {
        &self.input
    }

    /// Whether the label is enabled.
    #[must_use]
    pub const fn shows_text(&self) -> bool {
        self.shows_text
    }

    /// Whether a listener is registered on an animated source.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.sync.is_animated()
    }

    /// Starts listening to an animated input.
    ///
    /// `redraw` is invoked whenever an emitted value warrants a new frame. Static
    /// inputs need no listener and ignore the call. Mounting again replaces the
    /// previous listener.
    pub fn mount(&mut self, redraw: RedrawRequest) {
        if let ProgressInput::Animated(source) = &self.input {
            tracing::debug!(shows_text = self.shows_text, "mounting animated progress circle");
            self.sync.activate(source.clone(), self.shows_text, redraw);
        }
    }

    /// Stops listening. Dropping the circle does the same.
    pub fn unmount(&mut self) {
        self.sync.deactivate();
    }

    /// Replaces the input with a plain value, releasing any listener.
    pub fn set_progress(&mut self, progress: f64) {
        self.sync.deactivate();
        self.input = ProgressInput::Static(progress);
    }

    /// The progress value this frame is based on.
    ///
    /// For a mounted animated input this is the last value the listener observed;
    /// otherwise it is the input's current value.
    #[must_use]
    pub fn progress_value(&self) -> f64 {
        self.sync.progress_value(self.input.raw_value())
    }

    /// Rotation of the surface: the rotation source mapped onto a full turn while
    /// indeterminate, otherwise zero.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        match &self.rotation {
            Some(rotation) if self.config.indeterminate => {
                rotation.interpolate((0.0, 1.0), (0.0, 360.0))
            }
            _ => 0.0,
        }
    }

    /// Computes the current frame.
    #[must_use]
    pub fn render(&self) -> Frame {
        let progress_value = self.progress_value();
        let raw_value = self.input.raw_value();

        Frame {
            size: self.config.size,
            rotation_degrees: self.rotation_degrees(),
            arcs: arc::compute_arcs(progress_value, raw_value, &self.config),
            label: self.label(progress_value),
        }
    }

    /// Renders the current frame and hands its arcs to `painter`.
    pub fn paint<P: ArcPainter>(&self, painter: P) -> Vec<P::Drawable> {
        self.render().paint(painter)
    }

    fn label(&self, progress_value: f64) -> Option<Label> {
        if self.config.indeterminate || !self.shows_text {
            return None;
        }

        let offset = self.config.effective_border() + self.config.thickness;
        let size = self.config.size - offset * 2.0;
        Some(Label {
            text: (self.format_text)(progress_value),
            offset,
            size,
            corner_radius: size / 2.0,
        })
    }
}

impl fmt::Debug for ProgressCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressCircle")
            .field("config", &self.config)
            .field("input", &self.input)
            .field("shows_text", &self.shows_text)
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        f64::consts::PI,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use crate::{
        ArcPainter, ArcRole, ArcSpec, ProgressCircleBuilder,
        source::{AnimatedValue, ProgressSource},
    };

    use super::format_percent;

    /// Collects the role and sweep of every painted arc.
    struct Recorder(Vec<(ArcRole, f64)>);

    impl ArcPainter for Recorder {
        type Drawable = usize;

        fn draw(&mut self, arc: &ArcSpec) -> usize {
            self.0.push((arc.role, arc.sweep()));
            self.0.len() - 1
        }
    }

    fn redraw_counter() -> (Arc<AtomicUsize>, Arc<dyn Fn() + Send + Sync>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (
            count,
            Arc::new(move || {
                handle.fetch_add(1, Ordering::Relaxed);
            }),
        )
    }

    /// Percent Label
    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.424), "42%");
        assert_eq!(format_percent(1.0), "100%");
    }

    /// Percent Label Below Zero
    /// Tiny negative values do not print a signed zero.
    #[test]
    fn test_format_percent_negative() {
        assert_eq!(format_percent(-0.001), "0%");
        assert_eq!(format_percent(-0.004), "0%");
        assert_eq!(format_percent(-0.02), "-2%");
        assert_eq!(format_percent(1.5), "150%");
    }

    /// Static Render
    /// Static input draws straight from the plain value.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_static_render() {
        let circle = ProgressCircleBuilder::new()
            .with_progress(0.5)
            .with_unfilled_color("#ddd")
            .build()
            .unwrap();

        let frame = circle.render();
        assert_eq!(frame.size, 40.0);
        assert_eq!(frame.rotation_degrees, 0.0);
        assert!(frame.label.is_none());

        let roles: Vec<_> = frame.arcs.iter().map(|arc| arc.role).collect();
        assert_eq!(
            roles,
            vec![ArcRole::UnfilledTrack, ArcRole::Progress, ArcRole::Border]
        );
        assert_eq!(frame.arcs[1].end_angle, PI);
        assert_eq!(circle.input().angle(), PI);
    }

    /// Painting
    /// Arcs reach the painter in layer order.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_paint_order() {
        let circle = ProgressCircleBuilder::new()
            .with_progress(0.25)
            .build()
            .unwrap();

        let mut recorder = Recorder(Vec::new());
        let drawables = circle.paint(&mut recorder);

        assert_eq!(drawables, vec![0, 1]);
        assert_eq!(recorder.0[0], (ArcRole::Progress, PI / 2.0));
        assert_eq!(recorder.0[1].0, ArcRole::Border);
    }

    /// Label Layout
    /// The label box is inset by border and thickness.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_label_layout() {
        let circle = ProgressCircleBuilder::new()
            .with_progress(0.3)
            .with_shows_text(true)
            .build()
            .unwrap();

        let label = circle.render().label.unwrap();
        assert_eq!(label.text, "30%");
        assert_eq!(label.offset, 4.0);
        assert_eq!(label.size, 32.0);
        assert_eq!(label.corner_radius, 16.0);
    }

    /// Custom Label Formatter
    #[test]
    fn test_custom_formatter() {
        let circle = ProgressCircleBuilder::new()
            .with_progress(0.5)
            .with_shows_text(true)
            .with_format_text(|p| compact_str::format_compact!("{p:.2}"))
            .build()
            .unwrap();
        assert_eq!(circle.render().label.unwrap().text, "0.50");
    }

    /// Indeterminate Spinner
    /// Rotation follows the rotation source; no label, no main arc.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_indeterminate_rotation() {
        let rotation = AnimatedValue::new(0.5);
        let circle = ProgressCircleBuilder::new()
            .with_indeterminate(true)
            .with_shows_text(true)
            .with_progress(0.4)
            .with_rotation(Arc::new(rotation.clone()))
            .build()
            .unwrap();

        let frame = circle.render();
        assert_eq!(frame.rotation_degrees, 180.0);
        assert!(frame.label.is_none());
        assert_eq!(frame.arcs.len(), 1);
        assert_eq!(frame.arcs[0].role, ArcRole::Border);

        rotation.set(0.25);
        assert_eq!(circle.render().rotation_degrees, 90.0);
    }

    /// Rotation Ignored When Determinate
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_rotation_requires_indeterminate() {
        let circle = ProgressCircleBuilder::new()
            .with_rotation(Arc::new(AnimatedValue::new(0.5)))
            .build()
            .unwrap();
        assert_eq!(circle.render().rotation_degrees, 0.0);
    }

    /// Animated Lifecycle
    /// The cached value drives the track; the live value drives the main arc.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_animated_lifecycle() {
        let source = AnimatedValue::new(0.0);
        let (redraws, redraw) = redraw_counter();

        let mut circle = ProgressCircleBuilder::new()
            .with_animated(true)
            .with_progress_source(Arc::new(source.clone()))
            .with_unfilled_color("#ddd")
            .build()
            .unwrap();
        circle.mount(redraw);
        assert!(circle.is_mounted());

        source.set(0.5);
        assert_eq!(redraws.load(Ordering::Relaxed), 0);
        assert_eq!(circle.progress_value(), 0.5);
        let frame = circle.render();
        assert_eq!(frame.arcs[0].role, ArcRole::UnfilledTrack);
        assert_eq!(frame.arcs[1].end_angle, PI);

        source.set(1.0);
        assert_eq!(redraws.load(Ordering::Relaxed), 1);
        let roles: Vec<_> = circle.render().arcs.iter().map(|arc| arc.role).collect();
        assert_eq!(roles, vec![ArcRole::Progress, ArcRole::Border]);

        circle.unmount();
        assert_eq!(source.listener_count(), 0);
    }

    /// Label Forces Redraws
    #[test]
    fn test_animated_with_label_redraws_each_value() {
        let source = AnimatedValue::new(0.0);
        let (redraws, redraw) = redraw_counter();

        let mut circle = ProgressCircleBuilder::new()
            .with_animated(true)
            .with_progress_source(Arc::new(source.clone()))
            .with_shows_text(true)
            .build()
            .unwrap();
        circle.mount(redraw);

        source.set(0.1);
        source.set(0.2);
        assert_eq!(redraws.load(Ordering::Relaxed), 2);
        assert_eq!(circle.render().label.unwrap().text, "20%");
    }

    /// Reentrant Redraw
    /// A redraw callback that renders immediately sees the value that triggered it.
    #[test]
    fn test_redraw_can_render() {
        let source = AnimatedValue::new(0.0);
        let observed = Arc::new(parking_lot::Mutex::new(None));

        let mut circle = ProgressCircleBuilder::new()
            .with_animated(true)
            .with_progress_source(Arc::new(source.clone()))
            .build()
            .unwrap();

        let sink = observed.clone();
        let live = source.clone();
        circle.mount(Arc::new(move || {
            *sink.lock() = Some(live.current_value());
        }));

        source.set(1.0);
        assert_eq!(*observed.lock(), Some(1.0));
    }

    /// Drop Releases Listener
    #[test]
    fn test_drop_releases_listener() {
        let source = AnimatedValue::new(0.0);
        let (_, redraw) = redraw_counter();

        let mut circle = ProgressCircleBuilder::new()
            .with_animated(true)
            .with_progress_source(Arc::new(source.clone()))
            .build()
            .unwrap();
        circle.mount(redraw.clone());
        circle.mount(redraw);
        assert_eq!(source.listener_count(), 1);

        drop(circle);
        assert_eq!(source.listener_count(), 0);
    }

    /// Switching To Static
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_set_progress_switches_to_static() {
        let source = AnimatedValue::new(0.3);
        let (_, redraw) = redraw_counter();

        let mut circle = ProgressCircleBuilder::new()
            .with_animated(true)
            .with_progress_source(Arc::new(source.clone()))
            .build()
            .unwrap();
        circle.mount(redraw);

        circle.set_progress(0.75);
        assert!(!circle.is_mounted());
        assert!(!circle.input().is_animated());
        assert_eq!(circle.progress_value(), 0.75);
        assert_eq!(source.listener_count(), 0);
    }
}
