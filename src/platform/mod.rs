//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the sample-loop thread via MPSC.
//
// Architecture:
// ```text
//  Main Thread:                     Sample-Loop Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  InputStateDispatcher │
//  │   ↓                      │    │   ↓                   │
//  │  sample_mapper           │    │  observe() per sample │
//  │   ↓ (per transition)     │    │   ↓                   │
//  │  MPSC Channel ───────────┼───>│  Signal channels      │
//  └──────────────────────────┘    └──────────────────────┘
// ```
//
// Key Design Decisions:
// - **No frame batching**: the dispatcher contract is one `observe` call
//   per reported hardware transition, so every sample crosses the channel
//   the moment Winit reports it
// - **Graceful channel disconnect**: if the sample loop dies, the platform
//   logs a warning but keeps running so the user can close the window
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Runtime::run()`
//
// Responsibilities:
// - Create and manage the OS window
// - Convert Winit input transitions into `InputSample`s
// - Forward samples and the close signal to the sample loop
//
//=========================================================================

//=== Submodules ==========================================================

mod sample_mapper;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::sample::HostEvent;
use sample_mapper::map_window_event;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal; if the event loop cannot be created, the
/// runtime cannot deliver samples at all.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create the event loop (rare, indicates an OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window manager and sample source.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends one
/// [`HostEvent`] per reported input transition to the sample-loop thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, title)`
/// 2. **Execution**: `platform.run()` starts the event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window close → `HostEvent::WindowClosed` → loop exits
///
/// This type is not `Send`/`Sync`; communication with the sample loop
/// happens exclusively through the channel sender.
pub(crate) struct Platform {
    /// OS window handle (`None` until `resumed()` is called).
    window: Option<Window>,

    /// Channel to the sample-loop thread.
    event_sender: Sender<HostEvent>,

    /// Title for the window created in `resumed()`.
    window_title: String,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform instance; the window itself is created lazily
    /// in `resumed()` (mobile compatibility).
    pub(crate) fn new(event_sender: Sender<HostEvent>, window_title: impl Into<String>) -> Self {
        info!(target: "keypulse::platform", "platform subsystem initialized");
        Self {
            window: None,
            event_sender,
            window_title: window_title.into(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the Winit event loop and blocks until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while executing.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "keypulse::platform", "starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends one host event, tolerating a disconnected sample loop.
    ///
    /// A disconnect means the consumer thread exited early (panic or
    /// premature shutdown); the platform logs and keeps running so the
    /// user can still close the window normally.
    fn forward(&self, event: HostEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(
                target: "keypulse::platform",
                "sample channel disconnected, dropping event"
            );
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when the app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "keypulse::platform", "window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "keypulse::platform",
                    "window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height,
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "keypulse::platform", "window creation failed: {}", e);
                self.forward(HostEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            info!(target: "keypulse::platform", "window close requested");
            self.forward(HostEvent::WindowClosed);
            event_loop.exit();
            return;
        }

        match map_window_event(&event) {
            Some(sample) => {
                trace!(
                    target: "keypulse::platform",
                    "sample: {} {}",
                    sample.identifier,
                    if sample.pressed { "down" } else { "up" }
                );
                self.forward(HostEvent::Sample(sample));
            }
            None => {
                // Resized, Focused, CursorMoved, etc. — host-side filtering
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
