//=========================================================================
// Sample Loop
//
// Consumer thread that owns the dispatcher and feeds it raw samples.
//
// Responsibilities:
// - Run the caller's setup on the loop thread, producing the dispatcher
//   and whatever listener state must stay alive with it
// - Block on the platform channel and call `observe` once per sample
// - Exit cleanly on window close or channel disconnect
//
// Notes:
// The dispatcher and its subscriptions are intentionally not `Send`
// (callbacks are `Rc`-owned). Building them *inside* the spawned thread
// keeps every `observe`, subscribe and unsubscribe call serialized on one
// thread without any locking.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod dispatch;
pub mod sample;

//=== Standard Library Imports ============================================

use std::thread;

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Imports ====================================================

use dispatch::InputStateDispatcher;
use sample::HostEvent;

//=== SampleLoop ==========================================================

/// Spawns and runs the thread that consumes host events.
pub(crate) struct SampleLoop;

impl SampleLoop {
    //--- spawn() ----------------------------------------------------------
    //
    // `setup` runs first, on the new thread. It returns the fully wired
    // dispatcher together with the listener state (subscriptions and the
    // objects their callbacks borrow into) that must outlive the loop.
    //
    pub(crate) fn spawn<F, T>(receiver: Receiver<HostEvent>, setup: F) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> (InputStateDispatcher, T) + Send + 'static,
    {
        thread::spawn(move || {
            let (mut dispatcher, listeners) = setup();
            info!(target: "keypulse::core", "sample loop started: {:?}", dispatcher);

            Self::drive(&mut dispatcher, &receiver);

            // Listener state dies with the loop.
            drop(listeners);
            info!(target: "keypulse::core", "sample loop exiting");
        })
    }

    //--- drive() ----------------------------------------------------------
    //
    // Blocks on the channel until the window closes or the platform side
    // disconnects. Each received sample becomes exactly one `observe`
    // call; there is no pacing because delivery is per-transition.
    //
    fn drive(dispatcher: &mut InputStateDispatcher, receiver: &Receiver<HostEvent>) {
        loop {
            match receiver.recv() {
                Ok(HostEvent::Sample(sample)) => {
                    dispatcher.observe(&sample.identifier, sample.pressed);
                }
                Ok(HostEvent::WindowClosed) => {
                    info!(target: "keypulse::core", "window closed");
                    break;
                }
                Err(_) => {
                    info!(target: "keypulse::core", "platform channel disconnected");
                    break;
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
