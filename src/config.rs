//! Engine configuration and the per-tick configuration snapshot.
//!
//! The render loop never holds on to configuration: it asks its
//! [`ConfigSource`] for a fresh [`LightConfig`] at the top of every tick.

use core::{cell::RefCell, fmt, str::FromStr};

use critical_section::Mutex;
use embassy_time::Duration;

use crate::{bounds::StripLengths, color::ColorSpec};

const MODE_NAME_AUDIO: &str = "audio";
const MODE_NAME_STATIC: &str = "static";
const MODE_NAME_OFF: &str = "off";

/// Default bounded wait for a render thread to exit
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Poll interval of a loop whose mode is `off`
pub const DEFAULT_OFF_INTERVAL: Duration = Duration::from_millis(100);

/// Visualization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Audio,
    Static,
    #[default]
    Off,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => MODE_NAME_AUDIO,
            Self::Static => MODE_NAME_STATIC,
            Self::Off => MODE_NAME_OFF,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_AUDIO => Some(Self::Audio),
            MODE_NAME_STATIC => Some(Self::Static),
            MODE_NAME_OFF => Some(Self::Off),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_from_str(s).ok_or(())
    }
}

/// Snapshot of the externally persisted light configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightConfig {
    pub mode: Mode,
    /// Pattern name in the audio namespace
    pub audio_pattern: String,
    /// Pattern name in the static namespace
    pub static_pattern: String,
    pub color: ColorSpec,
    /// Applied by the sink, never by generators
    pub brightness: u8,
    pub lengths: StripLengths,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Off,
            audio_pattern: String::new(),
            static_pattern: String::new(),
            color: ColorSpec::Rainbow,
            brightness: 255,
            lengths: StripLengths::default(),
        }
    }
}

impl LightConfig {
    /// Selected pattern name for a mode (empty for `off`)
    pub fn pattern_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Audio => &self.audio_pattern,
            Mode::Static => &self.static_pattern,
            Mode::Off => "",
        }
    }

    pub fn set_pattern(&mut self, mode: Mode, pattern: &str) {
        match mode {
            Mode::Audio => pattern.clone_into(&mut self.audio_pattern),
            Mode::Static => pattern.clone_into(&mut self.static_pattern),
            Mode::Off => {}
        }
    }
}

/// Read-only view of the configuration
pub trait ConfigSource: Send + Sync {
    /// Take a consistent copy of the current configuration
    fn snapshot(&self) -> LightConfig;
}

/// Configuration that the command surface may also write
pub trait ConfigStore: ConfigSource {
    fn update(&self, apply: &mut dyn FnMut(&mut LightConfig));
}

/// In-memory configuration shared between the controller and the render thread
#[derive(Debug)]
pub struct SharedConfig {
    inner: Mutex<RefCell<LightConfig>>,
}

impl SharedConfig {
    pub const fn new(config: LightConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(config)),
        }
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(LightConfig::default())
    }
}

impl ConfigSource for SharedConfig {
    fn snapshot(&self) -> LightConfig {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().clone())
    }
}

impl ConfigStore for SharedConfig {
    fn update(&self, apply: &mut dyn FnMut(&mut LightConfig)) {
        critical_section::with(|cs| apply(&mut self.inner.borrow(cs).borrow_mut()));
    }
}

/// Timings of the flash played on a configuration change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Number of rainbow flash frames
    pub flash_frames: u8,
    /// How long each flash frame is shown
    pub flash_frame: Duration,
    /// Dark pause after the flash
    pub blackout: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            flash_frames: 5,
            flash_frame: Duration::from_millis(50),
            blackout: Duration::from_millis(500),
        }
    }
}

/// Audio analysis parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeConfig {
    /// Weight of the newest reading, in `(0, 1)`
    pub smoothing: f32,
    /// Gain applied before normalizing to `[0, 100]`
    pub gain: f32,
    /// Frames per analysis block
    pub block_frames: usize,
    pub sample_rate: u32,
    /// Upper bound on requested input channels
    pub max_channels: u16,
    /// Longest a block read may wait before failing
    pub read_timeout: Duration,
}

impl Default for AmplitudeConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.3,
            gain: 5.0,
            block_frames: 1024,
            sample_rate: 44_100,
            max_channels: 2,
            read_timeout: Duration::from_millis(250),
        }
    }
}

/// Configuration for the light engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub join_timeout: Duration,
    pub off_interval: Duration,
    pub transition: TransitionTimings,
    pub amplitude: AmplitudeConfig,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            join_timeout: DEFAULT_JOIN_TIMEOUT,
            off_interval: DEFAULT_OFF_INTERVAL,
            transition: TransitionTimings::default(),
            amplitude: AmplitudeConfig::default(),
        }
    }
}
