//=========================================================================
// Latch Table
//=========================================================================
//
// Per-category latched-state storage for the dispatcher.
//
// Each table maps an opaque identifier token to a boolean latch recording
// whether the last observed sample for that identifier was a press. Tables
// are populated once at dispatcher construction and never grow afterwards:
// a sample for an unregistered identifier simply does not match.
//
// Architecture:
//   (identifier, is_pressed) → apply() → Option<Transition>
//
// `None` means "not registered here, try the next table".
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== Transition ==========================================================

/// Outcome of folding one raw sample into a latch entry.
///
/// The dispatcher decides per category which outcomes produce a
/// notification; the table itself only reports what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Latch went released → pressed on this sample.
    Rising,

    /// Latch went pressed → released on this sample (the re-arm).
    Falling,

    /// The sample repeated the already-latched state.
    Repeat,
}

//=== LatchTable ==========================================================

/// Identifier → latched-flag mapping for one dispatch category.
///
/// Entries start unlatched (not pressed). Registration happens only through
/// [`DispatcherBuilder`](super::DispatcherBuilder); there is no
/// deregistration and no dynamic growth on first observation.
pub(crate) struct LatchTable {
    entries: HashMap<String, bool>,
}

impl LatchTable {
    /// Creates an empty table.
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an identifier with an unlatched initial state.
    ///
    /// Re-registering an identifier resets its latch.
    pub(crate) fn register(&mut self, identifier: impl Into<String>) {
        self.entries.insert(identifier.into(), false);
    }

    //--- Sample Folding ---------------------------------------------------

    /// Folds a raw sample into the latch for `identifier`.
    ///
    /// Returns `None` if the identifier is not registered in this table,
    /// otherwise updates the latch and reports the transition:
    ///
    /// - unlatched + pressed  → latch, [`Transition::Rising`]
    /// - latched + released   → unlatch, [`Transition::Falling`]
    /// - anything else        → [`Transition::Repeat`] (latch unchanged)
    pub(crate) fn apply(&mut self, identifier: &str, is_pressed: bool) -> Option<Transition> {
        let latched = self.entries.get_mut(identifier)?;

        let transition = match (*latched, is_pressed) {
            (false, true) => Transition::Rising,
            (true, false) => Transition::Falling,
            _ => Transition::Repeat,
        };

        *latched = is_pressed;
        Some(transition)
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if the identifier is registered in this table.
    pub(crate) fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Returns the latched state, or `false` for unregistered identifiers.
    pub(crate) fn is_latched(&self, identifier: &str) -> bool {
        self.entries.get(identifier).copied().unwrap_or(false)
    }

    /// Returns the number of registered identifiers.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no identifiers are registered.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LatchTable {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
