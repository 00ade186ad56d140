//! # `progress_circle`
//!
//! A headless circular progress indicator.
//!
//! `progress_circle` turns a progress value into the stack of vector arcs that draw
//! a ring-shaped progress indicator, and keeps that value in step with an animated
//! source owned by the host. It is designed to be:
//!
//! * **Headless**: It computes arcs (radius, angles, offset, stroke) but never paints
//!   them; an [`ArcPainter`] supplied by the host does.
//! * **Deterministic**: Geometry is a pure function of the progress value and a
//!   [`GeometryConfig`], safe to call from any number of render passes.
//! * **Frugal**: Animated sources only trigger redraws when the [`RedrawPolicy`]
//!   says the frame is worth drawing.
//!
//! ## Modules
//!
//! * [`angle`]: Angle and offset helpers shared by every arc.
//! * [`arc`]: [`ArcSpec`] and the ordered arc computation.
//! * [`builder`]: Fluent, validating construction of a [`ProgressCircle`].
//! * [`circle`]: The assembled indicator and its [`Frame`] output.
//! * [`config`]: Geometry and styling configuration.
//! * [`error`]: Configuration errors.
//! * [`source`]: The [`ProgressSource`] abstraction and [`AnimatedValue`].
//! * [`sync`]: The [`ProgressSyncController`] and redraw policies.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod angle;
pub mod arc;
pub mod builder;
pub mod circle;
pub mod config;
pub mod error;
pub mod source;
pub mod sync;

pub use arc::{ArcPainter, ArcRole, ArcSpec, Offset, compute_arcs};
pub use builder::ProgressCircleBuilder;
pub use circle::{Frame, Label, ProgressCircle, ProgressInput};
pub use config::{Color, Direction, GeometryConfig, StrokeCap};
pub use error::ConfigError;
pub use source::{AnimatedValue, ListenerId, ProgressSource, Subscription};
pub use sync::{LabelOrTerminal, ProgressSyncController, RedrawContext, RedrawPolicy};
