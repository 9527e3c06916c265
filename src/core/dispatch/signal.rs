//=========================================================================
// Signal Channels
//=========================================================================
//
// Per-category notification channels with an explicit observer registry.
//
// Architecture:
//   subscribe() → Rc<callback> ──owned by──> Subscription (caller side)
//                     │
//                 Weak<callback> ──stored in──> SignalChannel
//                     │
//   emit() ── upgrade each entry in order ──> invoke, prune the dead
//
// Two listener lifecycles are supported:
// - Explicit: `unsubscribe(handle)` removes exactly one listener.
// - Ownership-based: dropping the `Subscription` drops the only strong
//   reference, so the listener silently stops receiving and its entry is
//   pruned during the next emission. A consumer destroyed without
//   unsubscribing is therefore a no-op, never a dangling call.
//
// Delivery is synchronous and in subscription order; emission completes
// before the dispatching `observe` call returns.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::rc::{Rc, Weak};

//=== SignalHandle ========================================================

/// Opaque identity of one subscription on one channel.
///
/// Handles are unique per channel and never reused. Passing a handle to
/// [`SignalChannel::unsubscribe`] that is not currently subscribed is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalHandle(u64);

//=== Subscription ========================================================

/// Owner of a subscribed callback.
///
/// Holds the only strong reference to the callback: the listener receives
/// notifications for exactly as long as this value is alive. Keep it next
/// to the state the callback reads, so both expire together.
#[must_use = "dropping a Subscription immediately stops delivery"]
pub struct Subscription<C: ?Sized> {
    handle: SignalHandle,
    _callback: Rc<C>,
}

impl<C: ?Sized> Subscription<C> {
    /// Returns the handle identifying this subscription on its channel.
    pub fn handle(&self) -> SignalHandle {
        self.handle
    }
}

//=== SignalChannel =======================================================

/// Ordered observer registry for one notification category.
///
/// Generic over the callback shape; the two instantiations used by the
/// dispatcher are [`KeySignal`] (identifier-carrying) and [`PulseSignal`]
/// (payload-free).
pub struct SignalChannel<C: ?Sized> {
    subscribers: Vec<(SignalHandle, Weak<C>)>,
    next_handle: u64,
}

/// Channel whose notifications carry the triggering identifier.
pub type KeySignal = SignalChannel<dyn Fn(&str)>;

/// Channel whose notifications carry no payload.
pub type PulseSignal = SignalChannel<dyn Fn()>;

impl<C: ?Sized> SignalChannel<C> {
    /// Creates a channel with no subscribers.
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_handle: 0,
        }
    }

    //--- Registry Operations ----------------------------------------------

    /// Stores a weak entry for `callback` and hands ownership back.
    fn attach(&mut self, callback: Rc<C>) -> Subscription<C> {
        let handle = SignalHandle(self.next_handle);
        self.next_handle += 1;

        self.subscribers.push((handle, Rc::downgrade(&callback)));

        Subscription {
            handle,
            _callback: callback,
        }
    }

    /// Removes the subscription identified by `handle`.
    ///
    /// Unknown or already-removed handles are ignored.
    pub fn unsubscribe(&mut self, handle: SignalHandle) {
        self.subscribers.retain(|(h, _)| *h != handle);
    }

    /// Returns the number of registry entries, including entries whose
    /// subscription has been dropped but not yet pruned.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

//--- Identifier-carrying channel -----------------------------------------

impl SignalChannel<dyn Fn(&str)> {
    /// Registers a listener invoked with the triggering identifier.
    pub fn subscribe(&mut self, callback: impl Fn(&str) + 'static) -> Subscription<dyn Fn(&str)> {
        self.attach(Rc::new(callback))
    }

    /// Invokes every live listener with `identifier`, pruning dead entries.
    pub(crate) fn emit(&mut self, identifier: &str) {
        self.subscribers.retain(|(_, weak)| match weak.upgrade() {
            Some(callback) => {
                callback(identifier);
                true
            }
            None => false,
        });
    }
}

//--- Payload-free channel -------------------------------------------------

impl SignalChannel<dyn Fn()> {
    /// Registers a parameterless listener.
    pub fn subscribe(&mut self, callback: impl Fn() + 'static) -> Subscription<dyn Fn()> {
        self.attach(Rc::new(callback))
    }

    /// Invokes every live listener, pruning dead entries.
    pub(crate) fn emit(&mut self) {
        self.subscribers.retain(|(_, weak)| match weak.upgrade() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        });
    }
}

impl<C: ?Sized> Default for SignalChannel<C> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //--- Test Helpers -----------------------------------------------------

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |id: &str| sink.borrow_mut().push(id.to_string()))
    }

    //=====================================================================
    // Keyed Channel Tests
    //=====================================================================

    #[test]
    fn emit_reaches_subscriber_with_identifier() {
        let mut channel = KeySignal::new();
        let (log, callback) = recorder();

        let _sub = channel.subscribe(callback);
        channel.emit("KeyQ");

        assert_eq!(*log.borrow(), vec!["KeyQ".to_string()]);
    }

    #[test]
    fn emit_without_subscribers_is_noop() {
        let mut channel = KeySignal::new();
        channel.emit("KeyQ");
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn delivery_follows_subscription_order() {
        let mut channel = KeySignal::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        let _a = channel.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        let _b = channel.subscribe(move |_| second.borrow_mut().push("second"));

        channel.emit("KeyQ");

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery_for_that_listener_only() {
        let mut channel = KeySignal::new();
        let (log_a, callback_a) = recorder();
        let (log_b, callback_b) = recorder();

        let sub_a = channel.subscribe(callback_a);
        let _sub_b = channel.subscribe(callback_b);

        channel.emit("KeyQ");
        channel.unsubscribe(sub_a.handle());
        channel.emit("KeyW");

        assert_eq!(*log_a.borrow(), vec!["KeyQ".to_string()]);
        assert_eq!(
            *log_b.borrow(),
            vec!["KeyQ".to_string(), "KeyW".to_string()]
        );
    }

    #[test]
    fn unsubscribe_unknown_handle_is_noop() {
        let mut channel = KeySignal::new();
        let (_log, callback) = recorder();

        let sub = channel.subscribe(callback);
        channel.unsubscribe(sub.handle());
        channel.unsubscribe(sub.handle()); // second removal of same handle

        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn dropped_subscription_is_pruned_on_next_emit() {
        let mut channel = KeySignal::new();
        let (log, callback) = recorder();

        let sub = channel.subscribe(callback);
        drop(sub);

        assert_eq!(channel.subscriber_count(), 1, "entry lingers until emit");
        channel.emit("KeyQ");

        assert_eq!(channel.subscriber_count(), 0);
        assert!(log.borrow().is_empty(), "dead listener must not be invoked");
    }

    #[test]
    fn dropped_subscription_does_not_affect_others() {
        let mut channel = KeySignal::new();
        let (log_a, callback_a) = recorder();
        let (log_b, callback_b) = recorder();

        let sub_a = channel.subscribe(callback_a);
        let _sub_b = channel.subscribe(callback_b);
        drop(sub_a);

        channel.emit("KeyQ");

        assert!(log_a.borrow().is_empty());
        assert_eq!(*log_b.borrow(), vec!["KeyQ".to_string()]);
    }

    #[test]
    fn handles_are_unique_and_never_reused() {
        let mut channel = KeySignal::new();
        let (_log_a, callback_a) = recorder();
        let (_log_b, callback_b) = recorder();

        let sub_a = channel.subscribe(callback_a);
        let handle_a = sub_a.handle();
        channel.unsubscribe(handle_a);

        let sub_b = channel.subscribe(callback_b);

        assert_ne!(handle_a, sub_b.handle());
    }

    //=====================================================================
    // Pulse Channel Tests
    //=====================================================================

    #[test]
    fn pulse_emit_carries_no_payload() {
        let mut channel = PulseSignal::new();
        let count = Rc::new(RefCell::new(0u32));

        let sink = Rc::clone(&count);
        let _sub = channel.subscribe(move || *sink.borrow_mut() += 1);

        channel.emit();
        channel.emit();

        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn pulse_unsubscribe_by_handle() {
        let mut channel = PulseSignal::new();
        let count = Rc::new(RefCell::new(0u32));

        let sink = Rc::clone(&count);
        let sub = channel.subscribe(move || *sink.borrow_mut() += 1);

        channel.emit();
        channel.unsubscribe(sub.handle());
        channel.emit();

        assert_eq!(*count.borrow(), 1);
    }
}
