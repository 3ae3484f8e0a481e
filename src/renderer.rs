use std::sync::Arc;

use embassy_time::{Duration, Instant};

use crate::{
    amplitude::{AmplitudeInput, AmplitudeSample},
    bounds::StripLengths,
    channel::Channel,
    config::{DEFAULT_OFF_INTERVAL, LightConfig, Mode, TransitionTimings},
    error::TickError,
    frame::Frame,
    pattern::{PatternId, PatternSlot, RenderContext},
    transition::TransitionFlash,
};

/// Capacity of the intent channel
pub const INTENT_CHANNEL_SIZE: usize = 8;

/// Request from the controller to a running render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopIntent {
    /// Play the transition flash before the next generator frame
    Flash,
    /// Drop the generator's animation state
    ResetPattern,
}

/// Type alias for the intent channel
pub type IntentChannel = Channel<LoopIntent, INTENT_CHANNEL_SIZE>;

/// What a tick asks of the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutput {
    Frame(Frame),
    /// Turn every LED of both strips off
    Blank(StripLengths),
    /// Leave the strips as they are
    Idle,
}

/// Result of one render tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub output: TickOutput,
    /// Delay before the next tick
    pub interval: Duration,
    pub brightness: u8,
}

/// The per-run render state
///
/// Owns the active generator, the amplitude input of an audio run and any
/// flash in progress. All of it is dropped when the run ends.
pub struct Renderer {
    mode: Mode,
    intents: Arc<IntentChannel>,
    amplitude: Option<Box<dyn AmplitudeInput>>,
    timings: TransitionTimings,
    off_interval: Duration,

    active: Option<(PatternId, PatternSlot)>,
    flash: Option<TransitionFlash>,
    blanked: Option<StripLengths>,
}

impl Renderer {
    pub fn new(mode: Mode, intents: Arc<IntentChannel>) -> Self {
        Self {
            mode,
            intents,
            amplitude: None,
            timings: TransitionTimings::default(),
            off_interval: DEFAULT_OFF_INTERVAL,
            active: None,
            flash: None,
            blanked: None,
        }
    }

    #[must_use]
    pub fn with_amplitude(mut self, amplitude: Box<dyn AmplitudeInput>) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn with_off_interval(mut self, interval: Duration) -> Self {
        self.off_interval = interval;
        self
    }

    /// Mode this run was started in
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Generator currently in use
    pub fn active_pattern(&self) -> Option<PatternId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub const fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Interval to wait after a failed tick
    pub const fn retry_interval(&self) -> Duration {
        self.off_interval
    }

    /// Produce the output of one tick
    ///
    /// An `off` snapshot blanks the strips once (again whenever the lengths
    /// change) and then idles. Otherwise the generator for the run's mode
    /// and the configured pattern renders a fresh frame.
    pub fn tick(&mut self, config: &LightConfig, now: Instant) -> Result<Tick, TickError> {
        self.process_intents(config.lengths);

        if let Some(step) = self.flash.as_mut().and_then(Iterator::next) {
            self.blanked = None;
            return Ok(Tick {
                output: TickOutput::Frame(step.frame),
                interval: step.hold,
                brightness: config.brightness,
            });
        }
        self.flash = None;

        if self.mode == Mode::Off || config.mode == Mode::Off {
            return Ok(self.idle_off(config));
        }
        self.blanked = None;

        let pattern = config.pattern_for(self.mode);
        let id = PatternId::resolve(self.mode, pattern).ok_or_else(|| TickError::UnmappedPattern {
            mode: self.mode,
            pattern: pattern.to_string(),
        })?;

        let mut ctx = RenderContext::new(now, config.color);
        if id.mode() == Mode::Audio {
            let amplitude = self
                .amplitude
                .as_mut()
                .map_or(AmplitudeSample::SILENT, |input| input.sample(now));
            ctx = ctx.with_amplitude(amplitude);
        }

        let slot = self.activate(id);
        let mut frame = Frame::blank(config.lengths);
        slot.render(&ctx, &mut frame);

        Ok(Tick {
            output: TickOutput::Frame(frame),
            interval: slot.tick_interval(),
            brightness: config.brightness,
        })
    }

    /// Drain pending intents (non-blocking)
    fn process_intents(&mut self, lengths: StripLengths) {
        while let Some(intent) = self.intents.try_receive() {
            match intent {
                LoopIntent::Flash => {
                    self.flash = Some(TransitionFlash::new(self.timings, lengths));
                }
                LoopIntent::ResetPattern => {
                    if let Some((id, slot)) = self.active.as_mut() {
                        log::debug!("Resetting pattern {}", id.as_str());
                        slot.reset();
                    }
                }
            }
        }
    }

    fn idle_off(&mut self, config: &LightConfig) -> Tick {
        let output = if self.blanked == Some(config.lengths) {
            TickOutput::Idle
        } else {
            self.blanked = Some(config.lengths);
            TickOutput::Blank(config.lengths)
        };
        Tick {
            output,
            interval: self.off_interval,
            brightness: config.brightness,
        }
    }

    /// Slot for `id`, replacing the active generator when the identity changed
    fn activate(&mut self, id: PatternId) -> &mut PatternSlot {
        if self.active.as_ref().map(|(active, _)| *active) != Some(id) {
            log::debug!("Switching to pattern {} ({} mode)", id.as_str(), id.mode());
            self.active = None;
        }
        let (_, slot) = self.active.get_or_insert_with(|| (id, id.to_slot()));
        slot
    }
}
