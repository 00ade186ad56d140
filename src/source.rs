//! Externally driven progress values.
//!
//! A [`ProgressSource`] is anything that holds a numeric value, can report it on
//! demand, and notifies listeners when it changes: typically the host's animation
//! runtime. The indicator only ever talks to it through this trait, so the geometry
//! and the redraw logic can be exercised without a live animation loop.
//!
//! [`AnimatedValue`] is the in-process implementation shipped with the crate. It is
//! a cheap-to-clone handle (`Arc`-based) around a value and a listener table.
//!
//! # Reentrancy
//!
//! Listeners run *after* the source has released its internal lock, so a listener
//! is free to read the value again, set it, or (un)register listeners.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;

use crate::angle;

/// Callback invoked with every new value a source emits.
pub type Listener = Arc<dyn Fn(f64) + Send + Sync>;

/// Identifies a registered listener so it can be removed again.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw identifier. Sources choose their own numbering.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// An animated numeric value owned by the host.
pub trait ProgressSource: Send + Sync {
    /// The value right now.
    fn current_value(&self) -> f64;

    /// Registers `listener`, to be called with every subsequent value.
    fn add_listener(&self, listener: Listener) -> ListenerId;

    /// Unregisters a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);

    /// Maps the current value from `input` onto `output`.
    fn interpolate(&self, input: (f64, f64), output: (f64, f64)) -> f64 {
        angle::interpolate(self.current_value(), input, output)
    }
}

impl<S: ProgressSource + ?Sized> ProgressSource for Arc<S> {
    fn current_value(&self) -> f64 {
        (**self).current_value()
    }

    fn add_listener(&self, listener: Listener) -> ListenerId {
        (**self).add_listener(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id);
    }

    fn interpolate(&self, input: (f64, f64), output: (f64, f64)) -> f64 {
        (**self).interpolate(input, output)
    }
}

/// A registered listener that is removed from its source when dropped.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    source: Arc<dyn ProgressSource>,
    id: ListenerId,
}

impl Subscription {
    /// Registers `listener` on `source` for as long as the returned guard lives.
    pub fn new(source: Arc<dyn ProgressSource>, listener: Listener) -> Self {
        let id = source.add_listener(listener);
        tracing::debug!(listener = id.get(), "progress listener registered");
        Self { source, id }
    }

    /// The id the source assigned to this listener.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.source.remove_listener(self.id);
        tracing::debug!(listener = self.id.get(), "progress listener released");
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// A thread-safe, cloneable animated value.
///
/// Clones share the same value and listener table. The value itself lives in an
/// atomic (stored as `f64` bits) so reads never contend with listener bookkeeping.
#[derive(Clone, Default)]
pub struct AnimatedValue {
    bits: Arc<AtomicU64>,
    listeners: Arc<RwLock<Listeners>>,
}

impl AnimatedValue {
    /// Creates a value with no listeners.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
            listeners: Arc::default(),
        }
    }

    /// Gets the current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Stores `value` and notifies every listener registered at this moment.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);

        // Snapshot the table so listeners run without the lock held.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(value);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().entries.len()
    }

    /// Removes every listener.
    pub fn remove_all_listeners(&self) {
        self.listeners.write().entries.clear();
    }
}

impl ProgressSource for AnimatedValue {
    fn current_value(&self) -> f64 {
        self.get()
    }

    fn add_listener(&self, listener: Listener) -> ListenerId {
        let mut table = self.listeners.write();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.entries.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .write()
            .entries
            .retain(|(existing, _)| *existing != id);
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
