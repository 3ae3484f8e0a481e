//! Light engine - the state machine behind the command surface
//!
//! Owns the single render thread. Starting a mode always stops and joins the
//! previous run first, so the sink never sees frames from two generators.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration as StdDuration, Instant as StdInstant},
};

use embassy_time::{Duration, Instant};

use crate::{
    StripSink,
    amplitude::{self, AmplitudeInput},
    bounds::{StripId, StripLengths},
    color::ColorSpec,
    config::{AmplitudeConfig, ConfigStore, EngineOptions, LightConfig, Mode},
    error::EngineError,
    frame_scheduler::{FrameScheduler, lock_sink},
    pattern::PatternId,
    renderer::{IntentChannel, LoopIntent, Renderer},
    transition::TransitionFlash,
};

const RENDER_THREAD_NAME: &str = "led-render";
/// Longest uninterrupted sleep of the render thread and of a bounded join
const POLL_SLICE: StdDuration = StdDuration::from_millis(5);

/// Builds the amplitude input of an audio run, on the render thread
pub type AmplitudeFactory = Arc<dyn Fn(AmplitudeConfig) -> Box<dyn AmplitudeInput> + Send + Sync>;

/// Observable engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running(Mode),
    /// A stopped run overran its join timeout and has not exited yet
    Stopping,
}

struct Run {
    mode: Mode,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Light Engine - the main orchestrator
pub struct LightEngine<S: StripSink + 'static, C: ConfigStore + 'static> {
    sink: Arc<Mutex<S>>,
    config: Arc<C>,
    options: EngineOptions,
    amplitude: AmplitudeFactory,
    intents: Arc<IntentChannel>,
    run: Option<Run>,
    lingering: Option<JoinHandle<()>>,
    /// Origin of the render clock, shared by every run
    epoch: StdInstant,
}

impl<S: StripSink + 'static, C: ConfigStore + 'static> LightEngine<S, C> {
    pub fn new(sink: S, config: Arc<C>) -> Self {
        Self::with_options(sink, config, EngineOptions::default())
    }

    pub fn with_options(sink: S, config: Arc<C>, options: EngineOptions) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            config,
            options,
            amplitude: Arc::new(|config: AmplitudeConfig| -> Box<dyn AmplitudeInput> {
                Box::new(amplitude::open_default(config))
            }),
            intents: Arc::new(IntentChannel::new()),
            run: None,
            lingering: None,
            epoch: StdInstant::now(),
        }
    }

    /// Replace how audio runs obtain their amplitude input
    #[must_use]
    pub fn with_amplitude_source<F>(mut self, factory: F) -> Self
    where
        F: Fn(AmplitudeConfig) -> Box<dyn AmplitudeInput> + Send + Sync + 'static,
    {
        self.amplitude = Arc::new(factory);
        self
    }

    /// Shared handle to the sink
    pub fn sink(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.sink)
    }

    pub fn config(&self) -> &Arc<C> {
        &self.config
    }

    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Current render clock reading
    ///
    /// Counts from engine creation, so time-driven animation continues
    /// across restarts instead of replaying from zero.
    pub fn now(&self) -> Instant {
        elapsed_since(self.epoch)
    }

    pub fn state(&self) -> EngineState {
        if let Some(run) = &self.run {
            return EngineState::Running(run.mode);
        }
        match &self.lingering {
            Some(handle) if !handle.is_finished() => EngineState::Stopping,
            _ => EngineState::Idle,
        }
    }

    /// Start visualizing `mode`, replacing any running visualization
    ///
    /// Blocks until the previous render thread has exited (or its join timed
    /// out) before the new one is spawned. An audio run also waits for a
    /// detached thread of an earlier run, which may still hold the input
    /// device. The mode is written to the configuration so the new run's
    /// snapshots agree with it.
    pub fn start(&mut self, mode: Mode) -> Result<(), EngineError> {
        self.stop();
        self.reap_lingering(mode);

        self.config.update(&mut |config: &mut LightConfig| config.mode = mode);
        self.intents.clear();
        self.check_lengths();

        let stop = Arc::new(AtomicBool::new(false));
        let handle = self.spawn(mode, Arc::clone(&stop))?;
        self.run = Some(Run { mode, stop, handle });
        log::info!("Started {mode} visualization");
        Ok(())
    }

    /// Stop the running visualization, if any
    ///
    /// Cooperative: the render thread notices within one tick. Waits at most
    /// `join_timeout`; after this returns the old run never writes again.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        run.stop.store(true, Ordering::Release);
        // Any write in progress finishes here; later ones see the flag
        drop(lock_sink(&self.sink));

        if self.wait_for(&run.handle) {
            if run.handle.join().is_err() {
                log::warn!("Render thread panicked while stopping");
            }
        } else {
            log::warn!(
                "Render thread did not exit within {} ms, detaching it",
                self.options.join_timeout.as_millis()
            );
            if self.lingering.replace(run.handle).is_some() {
                log::warn!("Lost track of an older detached render thread");
            }
        }
        log::info!("Stopped {} visualization", run.mode);
    }

    /// Join a detached render thread if it has exited
    ///
    /// Before an audio run the thread gets one more `join_timeout` to
    /// release the input device.
    fn reap_lingering(&mut self, mode: Mode) {
        let Some(handle) = self.lingering.take() else {
            return;
        };
        if mode == Mode::Audio && !handle.is_finished() {
            log::warn!("Previous render thread still running, waiting before opening audio input");
            self.wait_for(&handle);
        }

        if handle.is_finished() {
            if handle.join().is_err() {
                log::warn!("Detached render thread panicked");
            }
            return;
        }
        if mode == Mode::Audio {
            log::warn!("Previous render thread may still hold the audio input");
        }
        self.lingering = Some(handle);
    }

    /// Wait at most `join_timeout` for `handle` to finish
    fn wait_for(&self, handle: &JoinHandle<()>) -> bool {
        let timeout = StdDuration::from_millis(self.options.join_timeout.as_millis());
        let deadline = StdInstant::now() + timeout;
        while !handle.is_finished() && StdInstant::now() < deadline {
            thread::sleep(POLL_SLICE);
        }
        handle.is_finished()
    }

    /// Select the pattern used by `mode`
    ///
    /// An empty name selects the mode's default pattern. The running loop
    /// picks the change up on its next tick.
    pub fn set_pattern(&self, mode: Mode, name: &str) -> Result<PatternId, EngineError> {
        let id = PatternId::resolve(mode, name).ok_or_else(|| EngineError::UnmappedPattern {
            mode,
            pattern: name.to_string(),
        })?;
        self.config
            .update(&mut |config: &mut LightConfig| {
                config.set_pattern(mode, id.as_str());
            });
        log::debug!("Pattern for {mode} mode set to {}", id.as_str());
        Ok(id)
    }

    /// Set the base color from `"rainbow"` or a hex string
    pub fn set_color(&self, value: &str) -> Result<ColorSpec, EngineError> {
        let color = ColorSpec::parse(value)?;
        self.config.update(&mut |config: &mut LightConfig| config.color = color);
        log::debug!("Color set to {color}");
        Ok(color)
    }

    /// React to an external configuration change
    ///
    /// Plays the transition flash. When the configured mode differs from the
    /// running one the visualization is restarted; otherwise the running loop
    /// plays the flash itself and restarts its pattern.
    pub fn handle_config_change(&mut self) -> Result<(), EngineError> {
        let config = self.config.snapshot();
        let running = self.run.as_ref().map(|run| run.mode);

        if running == Some(config.mode) {
            for intent in [LoopIntent::Flash, LoopIntent::ResetPattern] {
                if self.intents.try_send(intent).is_err() {
                    log::warn!("Intent channel full, dropping {intent:?}");
                }
            }
            return Ok(());
        }

        self.stop();
        self.play_flash(config.lengths, config.brightness);
        self.start(config.mode)
    }

    fn spawn(&self, mode: Mode, stop: Arc<AtomicBool>) -> Result<JoinHandle<()>, EngineError> {
        let sink = Arc::clone(&self.sink);
        let config = Arc::clone(&self.config);
        let intents = Arc::clone(&self.intents);
        let factory = Arc::clone(&self.amplitude);
        let options = self.options;
        let epoch = self.epoch;

        let handle = thread::Builder::new()
            .name(RENDER_THREAD_NAME.into())
            .spawn(move || {
                let mut renderer = Renderer::new(mode, intents)
                    .with_timings(options.transition)
                    .with_off_interval(options.off_interval);
                if mode == Mode::Audio {
                    renderer = renderer.with_amplitude(factory(options.amplitude));
                }

                let mut scheduler = FrameScheduler::new(renderer, sink, config, Arc::clone(&stop));
                while !stop.load(Ordering::Acquire) {
                    let result = scheduler.tick(elapsed_since(epoch));
                    sleep_unless_stopped(&stop, result.sleep_duration);
                }
                log::debug!("Render loop for {mode} mode exited");
            })?;
        Ok(handle)
    }

    /// Play the transition flash straight to the sink
    ///
    /// Only called while no render thread is running.
    fn play_flash(&self, lengths: StripLengths, brightness: u8) {
        for step in TransitionFlash::new(self.options.transition, lengths) {
            {
                let mut sink = lock_sink(&self.sink);
                sink.set_brightness(brightness);
                if let Err(err) = sink.show(step.frame) {
                    log::warn!("Transition flash failed: {err}");
                    return;
                }
            }
            thread::sleep(StdDuration::from_micros(step.hold.as_micros()));
        }
    }

    fn check_lengths(&self) {
        let lengths = self.config.snapshot().lengths;
        let sink = lock_sink(&self.sink);
        for strip in StripId::ALL {
            let available = sink.pixel_count(strip);
            let configured = lengths.get(strip);
            if configured > available {
                log::warn!(
                    "Configured {configured} LEDs on the {strip} strip but the sink has {available}"
                );
            }
        }
    }
}

impl<S: StripSink + 'static, C: ConfigStore + 'static> Drop for LightEngine<S, C> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Time since `origin`, as the renderer's clock
fn elapsed_since(origin: StdInstant) -> Instant {
    Instant::from_micros(u64::try_from(origin.elapsed().as_micros()).unwrap_or(u64::MAX))
}

/// Sleep in short slices so a stop request is honored promptly
fn sleep_unless_stopped(stop: &AtomicBool, duration: Duration) {
    let deadline = StdInstant::now() + StdDuration::from_micros(duration.as_micros());
    while !stop.load(Ordering::Acquire) {
        let now = StdInstant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(POLL_SLICE));
    }
}
