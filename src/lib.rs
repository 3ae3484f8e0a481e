pub mod amplitude;
pub mod bounds;
pub mod channel;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod frame;
pub mod frame_scheduler;
pub mod math8;
pub mod pattern;
pub mod renderer;
pub mod transition;

pub use amplitude::{AmplitudeInput, AmplitudeSample, AmplitudeTracker, AudioSource};
pub use bounds::{StripId, StripLengths};
pub use config::{
    AmplitudeConfig, ConfigSource, ConfigStore, EngineOptions, LightConfig, Mode, SharedConfig,
    TransitionTimings,
};
pub use engine::{EngineState, LightEngine};
pub use error::{AudioError, ColorError, EngineError, SinkError, TickError};
pub use filter::Dimmed;
pub use frame::Frame;
pub use frame_scheduler::FrameScheduler;
pub use pattern::{AudioPattern, PatternId, PatternSlot, StaticPattern};
pub use renderer::{IntentChannel, LoopIntent, Renderer, Tick, TickOutput};

pub use color::{ColorSpec, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware. The engine hands
/// every frame to the sink by value and never keeps it.
pub trait StripSink: Send {
    /// Number of addressable pixels on a strip
    fn pixel_count(&self, strip: StripId) -> usize;

    /// Transmit a full frame to both strips
    fn show(&mut self, frame: Frame) -> Result<(), SinkError>;

    /// Set the global brightness (0-255)
    ///
    /// Sinks with hardware brightness apply it here; see [`Dimmed`] for the
    /// software fallback.
    fn set_brightness(&mut self, _brightness: u8) {}

    /// Turn every pixel off
    fn blank(&mut self, lengths: StripLengths) -> Result<(), SinkError> {
        self.show(Frame::blank(lengths))
    }
}
