//=========================================================================
// Runtime
//
// Composition root and main entry point for hosted applications.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(setup)──>  [blocks]
//         │                           │
//         ├─ with_window_title()      ├─ spawns sample loop
//         └─ with_channel_capacity()  └─ runs platform loop
// ```
//
// Exactly one dispatcher exists per runtime, explicitly constructed by
// the caller's setup closure on the sample-loop thread. There is no
// global state; everything that needs to subscribe receives the
// dispatcher by reference inside `setup`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::dispatch::InputStateDispatcher;
use crate::core::sample::HostEvent;
use crate::core::SampleLoop;
use crate::platform::Platform;

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **Window title**: `"keypulse"`
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use keypulse::prelude::*;
///
/// RuntimeBuilder::new()
///     .with_window_title("my game")
///     .with_channel_capacity(256)
///     .build()
///     .run(|| {
///         let mut dispatcher = InputStateDispatcher::builder()
///             .single_fire("Space")
///             .held("MouseLeft")
///             .global("Escape")
///             .build();
///
///         let jump = dispatcher.on_single_fire(|id| println!("pressed {id}"));
///         let fire = dispatcher.on_held(|_| println!("pew"));
///         let menu = dispatcher.on_global(|| println!("menu"));
///
///         (dispatcher, (jump, fire, menu))
///     });
/// ```
pub struct RuntimeBuilder {
    window_title: String,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            window_title: "keypulse".to_string(),
            channel_capacity: 128,
        }
    }

    /// Sets the title of the window the platform layer creates.
    ///
    /// # Panics
    ///
    /// Panics if `title` is empty.
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.is_empty(), "Window title must not be empty");
        self.window_title = title;
        self
    }

    /// Sets the capacity of the platform → sample-loop channel.
    ///
    /// Larger values buffer more transitions during consumer hiccups;
    /// smaller values bound memory. Default: 128.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the runtime instance.
    pub fn build(self) -> Runtime {
        info!(
            target: "keypulse::runtime",
            "building runtime (title: {:?}, channel: {})",
            self.window_title,
            self.channel_capacity
        );

        Runtime {
            window_title: self.window_title,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Hosted runtime: window, sample loop, and exactly one dispatcher.
///
/// Create via [`RuntimeBuilder`]. Calling [`run`](Runtime::run) blocks the
/// calling thread (which must be the main thread) until the window is
/// closed, then joins the sample-loop thread.
pub struct Runtime {
    window_title: String,
    channel_capacity: usize,
}

impl Runtime {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the application exits.
    ///
    /// `setup` runs on the sample-loop thread before any sample is
    /// delivered. It must return the fully wired dispatcher together with
    /// the listener state (subscriptions plus whatever they capture) that
    /// should live for the whole run.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → core channel
    /// 2. Spawns the sample-loop thread and runs `setup` on it
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: loop exits → sample thread terminates → join
    pub fn run<F, T>(self, setup: F)
    where
        F: FnOnce() -> (InputStateDispatcher, T) + Send + 'static,
    {
        info!(target: "keypulse::runtime", "starting runtime");

        //--- 1. Create the communication channel -------------------------
        let (tx, rx): (Sender<HostEvent>, Receiver<HostEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the sample-loop thread ------------------------------
        let loop_handle = SampleLoop::spawn(rx, setup);
        info!(target: "keypulse::runtime", "sample-loop thread spawned");

        //--- 3. Run the platform loop -------------------------------------
        let platform = Platform::new(tx, self.window_title);
        if let Err(e) = platform.run() {
            error!(target: "keypulse::runtime", "platform error: {}", e);
        }

        info!(target: "keypulse::runtime", "platform event loop exited");

        //--- 4. Cleanup: wait for the sample loop to terminate ------------
        match loop_handle.join() {
            Ok(()) => info!(target: "keypulse::runtime", "sample loop terminated cleanly"),
            Err(e) => error!(target: "keypulse::runtime", "sample loop panicked: {:?}", e),
        }

        info!(target: "keypulse::runtime", "runtime shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
