//! Keeps the indicator in step with an animated progress source.
//!
//! The [`ProgressSyncController`] has two states:
//!
//! * **Static**: progress is a plain number. Nothing is subscribed; every render
//!   reads the number directly.
//! * **Animated**: progress lives in a [`ProgressSource`]. A listener mirrors every
//!   emitted value into a cached scalar, and asks the host for a redraw only when
//!   the [`RedrawPolicy`] approves.
//!
//! The default policy, [`LabelOrTerminal`], redraws on every value while a text
//! label is visible (the number changes on screen) and otherwise only on the
//! terminal value `1.0`, so the completed frame is never dropped.
//!
//! The listener is held by a [`Subscription`], so leaving the animated state, or
//! dropping the controller, unregisters it.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use crate::source::{ProgressSource, Subscription};

/// Everything a [`RedrawPolicy`] gets to look at for one emitted value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RedrawContext {
    /// The value the source just emitted.
    pub value: f64,
    /// Whether a text label showing the value is visible.
    pub shows_text: bool,
}

impl RedrawContext {
    /// Whether the emitted value is the terminal value `1.0`.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.value == 1.0
    }
}

/// Decides whether an emitted value warrants a redraw.
pub trait RedrawPolicy: Send + Sync {
    /// Returns `true` to request a redraw.
    fn should_redraw(&self, context: &RedrawContext) -> bool;
}

impl<F> RedrawPolicy for F
where
    F: Fn(&RedrawContext) -> bool + Send + Sync,
{
    fn should_redraw(&self, context: &RedrawContext) -> bool {
        self(context)
    }
}

/// Redraw while a label is visible, or when the value reaches `1.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelOrTerminal;

impl RedrawPolicy for LabelOrTerminal {
    fn should_redraw(&self, context: &RedrawContext) -> bool {
        context.shows_text || context.is_terminal()
    }
}

/// Redraw on every emitted value.
#[derive(Clone, Copy, Debug, Default)]
pub struct EveryFrame;

impl RedrawPolicy for EveryFrame {
    fn should_redraw(&self, _context: &RedrawContext) -> bool {
        true
    }
}

/// Host callback that schedules a re-render.
pub type RedrawRequest = Arc<dyn Fn() + Send + Sync>;

enum SyncState {
    Static,
    Animated {
        subscription: Subscription,
        /// Cleared on deactivation. A source may still run a listener it snapshotted
        /// before the removal; the listener checks this first.
        live: Arc<AtomicBool>,
    },
}

/// Bridges an animated progress source into per-frame progress snapshots.
pub struct ProgressSyncController {
    state: SyncState,
    /// Last observed value, as `f64` bits. Written only by the current listener;
    /// every activation gets a fresh one.
    cached: Arc<AtomicU64>,
    policy: Arc<dyn RedrawPolicy>,
}

impl ProgressSyncController {
    /// A controller in the static state using the default redraw policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(Arc::new(LabelOrTerminal))
    }

    /// A controller in the static state using `policy` once animated.
    #[must_use]
    pub fn with_policy(policy: Arc<dyn RedrawPolicy>) -> Self {
        Self {
            state: SyncState::Static,
            cached: Arc::new(AtomicU64::new(0.0_f64.to_bits())),
            policy,
        }
    }

    /// Enters the animated state, subscribing to `source`.
    ///
    /// Any previous subscription is released first and the cached value restarts
    /// at `0.0` until the source emits.
    pub fn activate(
        &mut self,
        source: Arc<dyn ProgressSource>,
        shows_text: bool,
        redraw: RedrawRequest,
    ) {
        self.deactivate();
        self.cached = Arc::new(AtomicU64::new(0.0_f64.to_bits()));

        let live = Arc::new(AtomicBool::new(true));
        let alive = live.clone();
        let cached = self.cached.clone();
        let policy = self.policy.clone();
        let listener = Arc::new(move |value: f64| {
            if !alive.load(Ordering::Acquire) {
                tracing::trace!(value, "ignoring value for released listener");
                return;
            }
            cached.store(value.to_bits(), Ordering::Release);

            let context = RedrawContext { value, shows_text };
            let redraw_now = policy.should_redraw(&context);
            tracing::trace!(value, redraw_now, "progress value observed");
            if redraw_now {
                redraw();
            }
        });

        self.state = SyncState::Animated {
            subscription: Subscription::new(source, listener),
            live,
        };
    }

    /// Returns to the static state, releasing the subscription if there is one.
    pub fn deactivate(&mut self) {
        if let SyncState::Animated { subscription, live } =
            std::mem::replace(&mut self.state, SyncState::Static)
        {
            live.store(false, Ordering::Release);
            tracing::debug!(listener = subscription.id().get(), "leaving animated state");
            drop(subscription);
        }
    }

    /// Whether a subscription is active.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self.state, SyncState::Animated { .. })
    }

    /// The last value observed from the source (`0.0` before the first emission).
    #[must_use]
    pub fn cached_value(&self) -> f64 {
        f64::from_bits(self.cached.load(Ordering::Acquire))
    }

    /// The progress value a render should use.
    ///
    /// Static controllers pass `static_value` through; animated ones return the
    /// cached value.
    #[must_use]
    pub fn progress_value(&self, static_value: f64) -> f64 {
        match self.state {
            SyncState::Static => static_value,
            SyncState::Animated { .. } => self.cached_value(),
        }
    }
}

impl Default for ProgressSyncController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProgressSyncController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSyncController")
            .field("animated", &self.is_animated())
            .field("cached", &self.cached_value())
            .finish_non_exhaustive()
    }
}
