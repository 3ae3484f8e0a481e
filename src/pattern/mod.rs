//! Pattern system with compile-time known generator variants
//!
//! Every generator implements [`Pattern`] and lives in a [`PatternSlot`].
//! Audio and static generators use disjoint name namespaces, resolved by
//! [`PatternId::resolve`].

mod audio;
mod fire;
mod rain;
mod rainbow;
mod scoped;
mod solid;
mod sweep;
mod theater;

use embassy_time::{Duration, Instant};

pub use audio::{
    CenterBloom, LevelMeter, Pulse, ReactiveSolid, Voices, bloom_intensity, lit_count,
};
pub use fire::Fire;
pub use rain::MatrixRain;
pub use rainbow::RainbowCycle;
pub use scoped::LengthScoped;
pub use solid::Solid;
pub use sweep::{Chase, DualPulse, DualPulseCursor, PULSE_WIDTH, PingPong, PingPongCursor};
pub use theater::{CHASE_BLOCK, ChasePass, RandomChase, THEATER_SPACING, TheaterChase};

use crate::{amplitude::AmplitudeSample, color::ColorSpec, config::Mode, frame::Frame};

const AUDIO_NAME_REACTIVE_SOLID: &str = "reactive_solid";
const AUDIO_NAME_LEVEL_METER: &str = "level_meter";
const AUDIO_NAME_PULSE: &str = "pulse";
const AUDIO_NAME_CENTER_BLOOM: &str = "center_bloom";
const AUDIO_NAME_STEREO_LEVEL_METER: &str = "stereo_level_meter";
const AUDIO_NAME_STEREO_PULSE: &str = "stereo_pulse";
const AUDIO_NAME_STEREO_CENTER_BLOOM: &str = "stereo_center_bloom";

const AUDIO_ID_REACTIVE_SOLID: u8 = 0;
const AUDIO_ID_LEVEL_METER: u8 = 1;
const AUDIO_ID_PULSE: u8 = 2;
const AUDIO_ID_CENTER_BLOOM: u8 = 3;
const AUDIO_ID_STEREO_LEVEL_METER: u8 = 4;
const AUDIO_ID_STEREO_PULSE: u8 = 5;
const AUDIO_ID_STEREO_CENTER_BLOOM: u8 = 6;

const STATIC_NAME_SOLID: &str = "solid";
const STATIC_NAME_RAINBOW_CYCLE: &str = "rainbow_cycle";
const STATIC_NAME_PING_PONG: &str = "ping_pong";
const STATIC_NAME_DUAL_PULSE: &str = "dual_pulse";
const STATIC_NAME_MATRIX_RAIN: &str = "matrix_rain";
const STATIC_NAME_FIRE: &str = "fire";
const STATIC_NAME_CHASE: &str = "chase";
const STATIC_NAME_THEATER_CHASE: &str = "theater_chase";
const STATIC_NAME_RANDOM_CHASE: &str = "random_chase";

const STATIC_ID_SOLID: u8 = 0;
const STATIC_ID_RAINBOW_CYCLE: u8 = 1;
const STATIC_ID_PING_PONG: u8 = 2;
const STATIC_ID_DUAL_PULSE: u8 = 3;
const STATIC_ID_MATRIX_RAIN: u8 = 4;
const STATIC_ID_FIRE: u8 = 5;
const STATIC_ID_CHASE: u8 = 6;
const STATIC_ID_THEATER_CHASE: u8 = 7;
const STATIC_ID_RANDOM_CHASE: u8 = 8;

/// Per-tick input of a generator
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: Instant,
    pub color: ColorSpec,
    /// Latest amplitude; `None` outside audio mode
    pub amplitude: Option<AmplitudeSample>,
}

impl RenderContext {
    pub const fn new(now: Instant, color: ColorSpec) -> Self {
        Self {
            now,
            color,
            amplitude: None,
        }
    }

    #[must_use]
    pub const fn with_amplitude(mut self, amplitude: AmplitudeSample) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    /// Amplitude, or silence when none was sampled
    pub fn amplitude_or_silent(&self) -> AmplitudeSample {
        self.amplitude.unwrap_or(AmplitudeSample::SILENT)
    }
}

pub trait Pattern {
    /// Preferred delay between two ticks
    ///
    /// Animation speed is part of a generator's identity, so each one
    /// declares its own pacing.
    const TICK_INTERVAL: Duration;

    /// Render one frame
    ///
    /// `frame` arrives black and sized to the configured strip lengths.
    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame);

    /// Reset animation state
    fn reset(&mut self) {}
}

/// Known audio-reactive generators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AudioPattern {
    #[default]
    ReactiveSolid = AUDIO_ID_REACTIVE_SOLID,
    LevelMeter = AUDIO_ID_LEVEL_METER,
    Pulse = AUDIO_ID_PULSE,
    CenterBloom = AUDIO_ID_CENTER_BLOOM,
    StereoLevelMeter = AUDIO_ID_STEREO_LEVEL_METER,
    StereoPulse = AUDIO_ID_STEREO_PULSE,
    StereoCenterBloom = AUDIO_ID_STEREO_CENTER_BLOOM,
}

impl AudioPattern {
    pub const ALL: [Self; 7] = [
        Self::ReactiveSolid,
        Self::LevelMeter,
        Self::Pulse,
        Self::CenterBloom,
        Self::StereoLevelMeter,
        Self::StereoPulse,
        Self::StereoCenterBloom,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            AUDIO_ID_REACTIVE_SOLID => Self::ReactiveSolid,
            AUDIO_ID_LEVEL_METER => Self::LevelMeter,
            AUDIO_ID_PULSE => Self::Pulse,
            AUDIO_ID_CENTER_BLOOM => Self::CenterBloom,
            AUDIO_ID_STEREO_LEVEL_METER => Self::StereoLevelMeter,
            AUDIO_ID_STEREO_PULSE => Self::StereoPulse,
            AUDIO_ID_STEREO_CENTER_BLOOM => Self::StereoCenterBloom,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReactiveSolid => AUDIO_NAME_REACTIVE_SOLID,
            Self::LevelMeter => AUDIO_NAME_LEVEL_METER,
            Self::Pulse => AUDIO_NAME_PULSE,
            Self::CenterBloom => AUDIO_NAME_CENTER_BLOOM,
            Self::StereoLevelMeter => AUDIO_NAME_STEREO_LEVEL_METER,
            Self::StereoPulse => AUDIO_NAME_STEREO_PULSE,
            Self::StereoCenterBloom => AUDIO_NAME_STEREO_CENTER_BLOOM,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            AUDIO_NAME_REACTIVE_SOLID => Some(Self::ReactiveSolid),
            AUDIO_NAME_LEVEL_METER => Some(Self::LevelMeter),
            AUDIO_NAME_PULSE => Some(Self::Pulse),
            AUDIO_NAME_CENTER_BLOOM => Some(Self::CenterBloom),
            AUDIO_NAME_STEREO_LEVEL_METER => Some(Self::StereoLevelMeter),
            AUDIO_NAME_STEREO_PULSE => Some(Self::StereoPulse),
            AUDIO_NAME_STEREO_CENTER_BLOOM => Some(Self::StereoCenterBloom),
            _ => None,
        }
    }

    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::ReactiveSolid => PatternSlot::ReactiveSolid(ReactiveSolid),
            Self::LevelMeter => PatternSlot::LevelMeter(LevelMeter::new(Voices::Mono)),
            Self::Pulse => PatternSlot::Pulse(Pulse::new(Voices::Mono)),
            Self::CenterBloom => PatternSlot::CenterBloom(CenterBloom::new(Voices::Mono)),
            Self::StereoLevelMeter => {
                PatternSlot::LevelMeter(LevelMeter::new(Voices::Stereo))
            }
            Self::StereoPulse => PatternSlot::Pulse(Pulse::new(Voices::Stereo)),
            Self::StereoCenterBloom => {
                PatternSlot::CenterBloom(CenterBloom::new(Voices::Stereo))
            }
        }
    }
}

/// Known generative generators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum StaticPattern {
    #[default]
    Solid = STATIC_ID_SOLID,
    RainbowCycle = STATIC_ID_RAINBOW_CYCLE,
    PingPong = STATIC_ID_PING_PONG,
    DualPulse = STATIC_ID_DUAL_PULSE,
    MatrixRain = STATIC_ID_MATRIX_RAIN,
    Fire = STATIC_ID_FIRE,
    Chase = STATIC_ID_CHASE,
    TheaterChase = STATIC_ID_THEATER_CHASE,
    RandomChase = STATIC_ID_RANDOM_CHASE,
}

impl StaticPattern {
    pub const ALL: [Self; 9] = [
        Self::Solid,
        Self::RainbowCycle,
        Self::PingPong,
        Self::DualPulse,
        Self::MatrixRain,
        Self::Fire,
        Self::Chase,
        Self::TheaterChase,
        Self::RandomChase,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            STATIC_ID_SOLID => Self::Solid,
            STATIC_ID_RAINBOW_CYCLE => Self::RainbowCycle,
            STATIC_ID_PING_PONG => Self::PingPong,
            STATIC_ID_DUAL_PULSE => Self::DualPulse,
            STATIC_ID_MATRIX_RAIN => Self::MatrixRain,
            STATIC_ID_FIRE => Self::Fire,
            STATIC_ID_CHASE => Self::Chase,
            STATIC_ID_THEATER_CHASE => Self::TheaterChase,
            STATIC_ID_RANDOM_CHASE => Self::RandomChase,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => STATIC_NAME_SOLID,
            Self::RainbowCycle => STATIC_NAME_RAINBOW_CYCLE,
            Self::PingPong => STATIC_NAME_PING_PONG,
            Self::DualPulse => STATIC_NAME_DUAL_PULSE,
            Self::MatrixRain => STATIC_NAME_MATRIX_RAIN,
            Self::Fire => STATIC_NAME_FIRE,
            Self::Chase => STATIC_NAME_CHASE,
            Self::TheaterChase => STATIC_NAME_THEATER_CHASE,
            Self::RandomChase => STATIC_NAME_RANDOM_CHASE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            STATIC_NAME_SOLID => Some(Self::Solid),
            STATIC_NAME_RAINBOW_CYCLE => Some(Self::RainbowCycle),
            STATIC_NAME_PING_PONG => Some(Self::PingPong),
            STATIC_NAME_DUAL_PULSE => Some(Self::DualPulse),
            STATIC_NAME_MATRIX_RAIN => Some(Self::MatrixRain),
            STATIC_NAME_FIRE => Some(Self::Fire),
            STATIC_NAME_CHASE => Some(Self::Chase),
            STATIC_NAME_THEATER_CHASE => Some(Self::TheaterChase),
            STATIC_NAME_RANDOM_CHASE => Some(Self::RandomChase),
            _ => None,
        }
    }

    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::Solid => PatternSlot::Solid(Solid),
            Self::RainbowCycle => PatternSlot::RainbowCycle(RainbowCycle::default()),
            Self::PingPong => PatternSlot::PingPong(PingPong::default()),
            Self::DualPulse => PatternSlot::DualPulse(DualPulse::default()),
            Self::MatrixRain => PatternSlot::MatrixRain(MatrixRain::default()),
            Self::Fire => PatternSlot::Fire(Fire::default()),
            Self::Chase => PatternSlot::Chase(Chase::default()),
            Self::TheaterChase => PatternSlot::TheaterChase(TheaterChase::default()),
            Self::RandomChase => PatternSlot::RandomChase(RandomChase::default()),
        }
    }
}

/// A generator identity: mode namespace plus name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternId {
    Audio(AudioPattern),
    Static(StaticPattern),
}

impl PatternId {
    /// Look up the generator for `(mode, name)`
    ///
    /// An empty name selects the namespace default. Returns `None` for an
    /// unknown name and for [`Mode::Off`], which runs no generator.
    pub fn resolve(mode: Mode, name: &str) -> Option<Self> {
        let name = name.trim();
        match mode {
            Mode::Audio if name.is_empty() => Some(Self::Audio(AudioPattern::default())),
            Mode::Audio => AudioPattern::parse_from_str(name).map(Self::Audio),
            Mode::Static if name.is_empty() => Some(Self::Static(StaticPattern::default())),
            Mode::Static => StaticPattern::parse_from_str(name).map(Self::Static),
            Mode::Off => None,
        }
    }

    pub const fn mode(self) -> Mode {
        match self {
            Self::Audio(_) => Mode::Audio,
            Self::Static(_) => Mode::Static,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio(pattern) => pattern.as_str(),
            Self::Static(pattern) => pattern.as_str(),
        }
    }

    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::Audio(pattern) => pattern.to_slot(),
            Self::Static(pattern) => pattern.to_slot(),
        }
    }
}

/// Pattern slot - enum containing all possible generators
#[derive(Debug, Clone)]
pub enum PatternSlot {
    ReactiveSolid(ReactiveSolid),
    LevelMeter(LevelMeter),
    Pulse(Pulse),
    CenterBloom(CenterBloom),
    Solid(Solid),
    RainbowCycle(RainbowCycle),
    PingPong(PingPong),
    DualPulse(DualPulse),
    MatrixRain(MatrixRain),
    Fire(Fire),
    Chase(Chase),
    TheaterChase(TheaterChase),
    RandomChase(RandomChase),
}

impl PatternSlot {
    /// Render the current generator
    pub fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        match self {
            Self::ReactiveSolid(pattern) => pattern.render(ctx, frame),
            Self::LevelMeter(pattern) => pattern.render(ctx, frame),
            Self::Pulse(pattern) => pattern.render(ctx, frame),
            Self::CenterBloom(pattern) => pattern.render(ctx, frame),
            Self::Solid(pattern) => pattern.render(ctx, frame),
            Self::RainbowCycle(pattern) => pattern.render(ctx, frame),
            Self::PingPong(pattern) => pattern.render(ctx, frame),
            Self::DualPulse(pattern) => pattern.render(ctx, frame),
            Self::MatrixRain(pattern) => pattern.render(ctx, frame),
            Self::Fire(pattern) => pattern.render(ctx, frame),
            Self::Chase(pattern) => pattern.render(ctx, frame),
            Self::TheaterChase(pattern) => pattern.render(ctx, frame),
            Self::RandomChase(pattern) => pattern.render(ctx, frame),
        }
    }

    /// Reset the generator state
    pub fn reset(&mut self) {
        match self {
            Self::ReactiveSolid(pattern) => Pattern::reset(pattern),
            Self::LevelMeter(pattern) => Pattern::reset(pattern),
            Self::Pulse(pattern) => Pattern::reset(pattern),
            Self::CenterBloom(pattern) => Pattern::reset(pattern),
            Self::Solid(pattern) => Pattern::reset(pattern),
            Self::RainbowCycle(pattern) => Pattern::reset(pattern),
            Self::PingPong(pattern) => Pattern::reset(pattern),
            Self::DualPulse(pattern) => Pattern::reset(pattern),
            Self::MatrixRain(pattern) => Pattern::reset(pattern),
            Self::Fire(pattern) => Pattern::reset(pattern),
            Self::Chase(pattern) => Pattern::reset(pattern),
            Self::TheaterChase(pattern) => Pattern::reset(pattern),
            Self::RandomChase(pattern) => Pattern::reset(pattern),
        }
    }

    /// Delay the scheduler should wait after this generator's frame
    ///
    /// Derived from each generator's `Pattern::TICK_INTERVAL` constant.
    pub const fn tick_interval(&self) -> Duration {
        match self {
            Self::ReactiveSolid(_) => ReactiveSolid::TICK_INTERVAL,
            Self::LevelMeter(_) => LevelMeter::TICK_INTERVAL,
            Self::Pulse(_) => Pulse::TICK_INTERVAL,
            Self::CenterBloom(_) => CenterBloom::TICK_INTERVAL,
            Self::Solid(_) => Solid::TICK_INTERVAL,
            Self::RainbowCycle(_) => RainbowCycle::TICK_INTERVAL,
            Self::PingPong(_) => PingPong::TICK_INTERVAL,
            Self::DualPulse(_) => DualPulse::TICK_INTERVAL,
            Self::MatrixRain(_) => MatrixRain::TICK_INTERVAL,
            Self::Fire(_) => Fire::TICK_INTERVAL,
            Self::Chase(_) => Chase::TICK_INTERVAL,
            Self::TheaterChase(_) => TheaterChase::TICK_INTERVAL,
            Self::RandomChase(_) => RandomChase::TICK_INTERVAL,
        }
    }
}
