//! Single-subscriber signal wires and the named signal registry.
//!
//! A [`Signal`] models a control line: it remembers the last level it was driven to and
//! has at most one downstream consumer. Subscribers are plain function pointers taking
//! a caller-supplied context (the component that owns the handler, typically the
//! motherboard) plus the whole [`Wires`](super::wires::Wires) backplane, so a handler
//! can read and write buses, or pulse further signals, before the outer call returns.

use std::collections::BTreeMap;
use std::fmt;

use super::error::WiringError;
use super::wires::Wires;

/// A handler bound to a signal.
///
/// Receives the owner context, the backplane, and the level the signal was driven to.
pub type Subscriber<C> = fn(&mut C, &mut Wires<C>, bool) -> Result<(), WiringError>;

/// A named boolean wire with at most one subscriber.
pub struct Signal<C> {
    level: bool,
    subscriber: Option<Subscriber<C>>,
}

impl<C> Default for Signal<C> {
    fn default() -> Self {
        Self {
            level: false,
            subscriber: None,
        }
    }
}

impl<C> fmt::Debug for Signal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("level", &self.level)
            .field("attached", &self.subscriber.is_some())
            .finish()
    }
}

impl<C> Signal<C> {
    /// Creates an unsubscribed signal at level `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last level the signal was driven to.
    pub const fn level(&self) -> bool {
        self.level
    }

    /// Returns `true` if a subscriber is attached.
    pub const fn is_attached(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Binds `subscriber`, replacing any previous one.
    pub fn attach(&mut self, subscriber: Subscriber<C>) {
        self.subscriber = Some(subscriber);
    }

    /// Clears the subscriber. The signal keeps recording its level.
    pub fn detach(&mut self) {
        self.subscriber = None;
    }

    /// Records `level` and hands back the subscriber to invoke, if any.
    ///
    /// Split from the invocation so the caller can lend the whole backplane to the
    /// handler without this signal still being borrowed.
    pub(crate) fn latch(&mut self, level: bool) -> Option<Subscriber<C>> {
        self.level = level;
        self.subscriber
    }
}

/// Read-only view of signal levels, handed to peripherals.
pub trait SignalLevels {
    /// Returns the last level of the named signal.
    fn level(&self, name: &str) -> Result<bool, WiringError>;
}

/// Named collection of signals.
pub struct SignalMap<C> {
    signals: BTreeMap<String, Signal<C>>,
}

impl<C> Default for SignalMap<C> {
    fn default() -> Self {
        Self {
            signals: BTreeMap::new(),
        }
    }
}

impl<C> fmt::Debug for SignalMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.signals.iter()).finish()
    }
}

impl<C> SignalMap<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new unsubscribed signal under `name`.
    pub fn declare(&mut self, name: &str) -> Result<(), WiringError> {
        if self.signals.contains_key(name) {
            return Err(WiringError::DuplicateSignal(name.to_owned()));
        }
        let _ = self.signals.insert(name.to_owned(), Signal::new());
        Ok(())
    }

    /// Returns `true` if a signal is declared under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    /// Number of declared signals.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns `true` if no signal is declared.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Looks up a signal by name.
    pub fn signal(&self, name: &str) -> Result<&Signal<C>, WiringError> {
        self.signals
            .get(name)
            .ok_or_else(|| WiringError::UnknownSignal(name.to_owned()))
    }

    /// Looks up a signal by name for rebinding or driving.
    pub fn signal_mut(&mut self, name: &str) -> Result<&mut Signal<C>, WiringError> {
        self.signals
            .get_mut(name)
            .ok_or_else(|| WiringError::UnknownSignal(name.to_owned()))
    }

    /// Binds `subscriber` to the named signal, replacing any previous one.
    pub fn attach(&mut self, name: &str, subscriber: Subscriber<C>) -> Result<(), WiringError> {
        self.signal_mut(name)?.attach(subscriber);
        Ok(())
    }

    /// Clears the subscriber of the named signal.
    pub fn detach(&mut self, name: &str) -> Result<(), WiringError> {
        self.signal_mut(name)?.detach();
        Ok(())
    }

    /// Iterates over `(name, signal)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Signal<C>)> {
        self.signals.iter().map(|(name, signal)| (name.as_str(), signal))
    }
}

impl<C> SignalLevels for SignalMap<C> {
    fn level(&self, name: &str) -> Result<bool, WiringError> {
        Ok(self.signal(name)?.level())
    }
}
