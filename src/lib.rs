//=========================================================================
// keypulse — Library Root
//
// Minimal input-state dispatcher for real-time interactive applications.
//
// Raw per-sample key/button signals become discrete, named events —
// single-fire ("just pressed"), held, and global triggers — delivered
// synchronously through subscription channels. The point is to replace
// per-frame conditional chains scattered across many consumers with one
// component that fires targeted notifications only when state actually
// changes.
//
// Responsibilities:
// - Expose the dispatcher core (`core::dispatch`) for embedding into an
//   existing host loop
// - Provide an optional batteries-included runtime (`Runtime`) that wires
//   a Winit window to the dispatcher over an MPSC channel
// - Keep OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use keypulse::prelude::*;
//
// RuntimeBuilder::new().build().run(|| {
//     let mut dispatcher = InputStateDispatcher::builder()
//         .single_fire("Space")
//         .build();
//     let sub = dispatcher.on_single_fire(|id| println!("pressed {id}"));
//     (dispatcher, sub)
// });
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the dispatcher, its latch tables and signal channels.
// Hosts that already own an input loop can use it directly and skip the
// runtime entirely.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration, event
// loop) and is kept private; `runtime` is the composition-root facade.
//
mod platform;
mod runtime;

//--- Public Exports ------------------------------------------------------

pub use runtime::{Runtime, RuntimeBuilder};
