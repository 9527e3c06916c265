//=========================================================================
// Input-State Dispatcher
//
// Classifies raw per-sample key/button signals into discrete, named
// events and delivers them through subscription channels.
//
// Responsibilities:
// - Hold three pre-registered latch tables, one per dispatch category
// - Fold each observed sample into exactly one table (fixed priority)
// - Emit at most one notification per sample, synchronously
//
// Categories:
// - Single-fire: edge-triggered, one notification per discrete press,
//   re-armed by the matching release
// - Held: level-triggered, one notification per pressed sample
// - Global: edge-triggered like single-fire, payload-free notification
//
// Notes:
// The dispatcher is single-threaded by design. A multi-threaded host must
// confine it to one thread and serialize every `observe` call and every
// subscribe/unsubscribe against it (the bundled `Runtime` does exactly
// that by owning the dispatcher on the sample-loop thread).
//
//=========================================================================

//=== Submodules ==========================================================

mod latch;
mod signal;

//=== Public API ==========================================================

pub use signal::{KeySignal, PulseSignal, SignalHandle, Subscription};

//=== Internal Imports ====================================================

use latch::{LatchTable, Transition};

//=== External Crates =====================================================

use log::{debug, trace, warn};

//=== InputStateDispatcher ================================================

/// Converts raw `(identifier, is_pressed)` samples into targeted
/// notifications.
///
/// Identifiers are opaque string tokens chosen by the host (the bundled
/// platform layer uses names like `"KeyQ"` or `"MouseLeft"`); the
/// dispatcher never validates their format. Each identifier is expected to
/// be registered in at most one category. An identifier registered in
/// several tables only receives the first-matching category's treatment,
/// in the fixed order single-fire → held → global; the builder warns about
/// such collisions but does not correct them.
///
/// # Example
///
/// ```
/// use keypulse::prelude::*;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut dispatcher = InputStateDispatcher::builder()
///     .single_fire("KeyQ")
///     .held("MouseLeft")
///     .global("Escape")
///     .build();
///
/// let jumps = Rc::new(Cell::new(0u32));
/// let sink = Rc::clone(&jumps);
/// let _sub = dispatcher.on_single_fire(move |_| sink.set(sink.get() + 1));
///
/// dispatcher.observe("KeyQ", true);  // fires
/// dispatcher.observe("KeyQ", true);  // still down, silent
/// dispatcher.observe("KeyQ", false); // re-arm, silent
/// dispatcher.observe("KeyQ", true);  // fires again
/// assert_eq!(jumps.get(), 2);
/// ```
pub struct InputStateDispatcher {
    //--- Category Tables --------------------------------------------------
    single_fire: LatchTable,
    held: LatchTable,
    global: LatchTable,

    //--- Notification Channels --------------------------------------------
    single_fire_signal: KeySignal,
    held_signal: KeySignal,
    global_signal: PulseSignal,
}

impl InputStateDispatcher {
    //--- Construction -----------------------------------------------------

    /// Starts building a dispatcher; tables are populated exactly once.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    //--- observe() --------------------------------------------------------
    //
    // The single entry point for raw samples. Looks the identifier up in
    // each category table in priority order, folds the sample into the
    // first table that contains it, and emits zero or one notification
    // before returning. Unregistered identifiers are ignored.
    //
    /// Classifies one raw sample and synchronously notifies listeners.
    ///
    /// `is_pressed` is `true` when the key or button is down in this
    /// sample. Listener callbacks run to completion within this call;
    /// there is no queuing or deferred delivery.
    pub fn observe(&mut self, identifier: &str, is_pressed: bool) {
        //--- Category A: single-fire (edge-triggered) --------------------
        if let Some(transition) = self.single_fire.apply(identifier, is_pressed) {
            if transition == Transition::Rising {
                debug!(target: "keypulse::dispatch", "single-fire: {}", identifier);
                self.single_fire_signal.emit(identifier);
            }
            return;
        }

        //--- Category B: held (level-triggered) --------------------------
        if self.held.apply(identifier, is_pressed).is_some() {
            if is_pressed {
                trace!(target: "keypulse::dispatch", "held: {}", identifier);
                self.held_signal.emit(identifier);
            }
            return;
        }

        //--- Category C: global (edge-triggered, payload-free) -----------
        if let Some(transition) = self.global.apply(identifier, is_pressed) {
            if transition == Transition::Rising {
                debug!(target: "keypulse::dispatch", "global trigger via {}", identifier);
                self.global_signal.emit();
            }
            return;
        }

        trace!(target: "keypulse::dispatch", "unregistered identifier ignored: {}", identifier);
    }

    //--- Subscription API -------------------------------------------------

    /// Subscribes to single-fire notifications (one per discrete press).
    ///
    /// The callback receives the triggering identifier. Keep the returned
    /// [`Subscription`] alive for as long as the listener should receive
    /// notifications.
    pub fn on_single_fire(
        &mut self,
        callback: impl Fn(&str) + 'static,
    ) -> Subscription<dyn Fn(&str)> {
        self.single_fire_signal.subscribe(callback)
    }

    /// Subscribes to held notifications (one per pressed sample).
    pub fn on_held(&mut self, callback: impl Fn(&str) + 'static) -> Subscription<dyn Fn(&str)> {
        self.held_signal.subscribe(callback)
    }

    /// Subscribes to global notifications (payload-free press edges).
    pub fn on_global(&mut self, callback: impl Fn() + 'static) -> Subscription<dyn Fn()> {
        self.global_signal.subscribe(callback)
    }

    /// Removes a single-fire listener by handle; unknown handles are a no-op.
    pub fn unsubscribe_single_fire(&mut self, handle: SignalHandle) {
        self.single_fire_signal.unsubscribe(handle);
    }

    /// Removes a held listener by handle; unknown handles are a no-op.
    pub fn unsubscribe_held(&mut self, handle: SignalHandle) {
        self.held_signal.unsubscribe(handle);
    }

    /// Removes a global listener by handle; unknown handles are a no-op.
    pub fn unsubscribe_global(&mut self, handle: SignalHandle) {
        self.global_signal.unsubscribe(handle);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if the identifier is registered in any category.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.single_fire.contains(identifier)
            || self.held.contains(identifier)
            || self.global.contains(identifier)
    }

    /// Returns the latched state of an identifier in its owning category.
    ///
    /// For single-fire and global identifiers this means "the last sample
    /// was a press"; for held identifiers it means "currently down".
    /// Unregistered identifiers read as `false`.
    pub fn is_latched(&self, identifier: &str) -> bool {
        if self.single_fire.contains(identifier) {
            self.single_fire.is_latched(identifier)
        } else if self.held.contains(identifier) {
            self.held.is_latched(identifier)
        } else {
            self.global.is_latched(identifier)
        }
    }
}

impl std::fmt::Debug for InputStateDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputStateDispatcher")
            .field("single_fire", &self.single_fire.len())
            .field("held", &self.held.len())
            .field("global", &self.global.len())
            .finish()
    }
}

//=== DispatcherBuilder ===================================================

/// Static table configuration for an [`InputStateDispatcher`].
///
/// Registration is a one-time act: once `build` runs, the tables live
/// unchanged for the dispatcher's whole life. De-duplication across
/// categories is the caller's discipline; the builder surfaces violations
/// with a warning and leaves the documented first-match order in charge.
pub struct DispatcherBuilder {
    single_fire: Vec<String>,
    held: Vec<String>,
    global: Vec<String>,
}

impl DispatcherBuilder {
    /// Creates a builder with empty category tables.
    pub fn new() -> Self {
        Self {
            single_fire: Vec::new(),
            held: Vec::new(),
            global: Vec::new(),
        }
    }

    /// Registers an identifier in the single-fire (edge-triggered) category.
    pub fn single_fire(mut self, identifier: impl Into<String>) -> Self {
        self.single_fire.push(identifier.into());
        self
    }

    /// Registers an identifier in the held (level-triggered) category.
    pub fn held(mut self, identifier: impl Into<String>) -> Self {
        self.held.push(identifier.into());
        self
    }

    /// Registers an identifier in the global (payload-free edge) category.
    pub fn global(mut self, identifier: impl Into<String>) -> Self {
        self.global.push(identifier.into());
        self
    }

    /// Builds the dispatcher, warning about cross-category collisions.
    pub fn build(self) -> InputStateDispatcher {
        let mut single_fire = LatchTable::new();
        let mut held = LatchTable::new();
        let mut global = LatchTable::new();

        for identifier in &self.single_fire {
            single_fire.register(identifier.clone());
        }

        for identifier in &self.held {
            if single_fire.contains(identifier) {
                warn!(
                    target: "keypulse::dispatch",
                    "identifier {:?} registered in both single-fire and held; \
                     single-fire wins by priority order",
                    identifier
                );
            }
            held.register(identifier.clone());
        }

        for identifier in &self.global {
            if single_fire.contains(identifier) || held.contains(identifier) {
                warn!(
                    target: "keypulse::dispatch",
                    "identifier {:?} registered in global and an earlier category; \
                     the earlier category wins by priority order",
                    identifier
                );
            }
            global.register(identifier.clone());
        }

        debug!(
            target: "keypulse::dispatch",
            "dispatcher built ({} single-fire, {} held, {} global)",
            single_fire.len(),
            held.len(),
            global.len()
        );

        InputStateDispatcher {
            single_fire,
            held,
            global,
            single_fire_signal: KeySignal::new(),
            held_signal: KeySignal::new(),
            global_signal: PulseSignal::new(),
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
