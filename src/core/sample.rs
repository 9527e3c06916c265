//=========================================================================
// Sample Types
//
// Defines the inbound contract between a host input layer and the
// dispatcher, plus the message type crossing the platform → core channel.
//
// A sample is one raw hardware transition (key up/down, button up/down)
// already filtered by the host: motion, focus and analog events never
// become samples. Identifiers are opaque tokens; the dispatcher attaches
// no meaning to their format.
//
//=========================================================================

//=== InputSample =========================================================

/// One raw input transition as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSample {
    /// Opaque token naming the physical input source.
    pub identifier: String,

    /// `true` if the source is down in this sample.
    pub pressed: bool,
}

impl InputSample {
    /// Convenience constructor.
    pub fn new(identifier: impl Into<String>, pressed: bool) -> Self {
        Self {
            identifier: identifier.into(),
            pressed,
        }
    }
}

//=== HostEvent ===========================================================

/// Messages sent from the platform layer to the sample-loop thread.
///
/// These are the only values that cross the thread boundary. Samples are
/// sent individually, one per reported hardware transition; there is no
/// frame batching because the dispatcher contract is per-transition
/// delivery.
#[derive(Debug, Clone)]
pub(crate) enum HostEvent {
    /// One raw input transition.
    Sample(InputSample),

    /// Window close requested by the user or OS. The sample loop should
    /// terminate cleanly upon receiving this.
    WindowClosed,
}

//=========================================================================
// Unit Tests
//=========================================================================
