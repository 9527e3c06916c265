//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use keypulse::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime facade
pub use crate::runtime::{Runtime, RuntimeBuilder};

// Dispatcher core
pub use crate::core::dispatch::{
    DispatcherBuilder, InputStateDispatcher, KeySignal, PulseSignal, SignalHandle, Subscription,
};

// Host boundary
pub use crate::core::sample::InputSample;
