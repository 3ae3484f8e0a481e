//! Frame scheduling and timing utilities.
//!
//! Ticks the renderer, hands the output to the sink and tracks the next
//! deadline. The caller is responsible for sleeping between frames.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use embassy_time::{Duration, Instant};

use crate::{
    StripSink,
    config::{ConfigSource, LightConfig},
    error::TickError,
    renderer::{Renderer, TickOutput},
};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Lock a sink, recovering it if a previous holder panicked
pub(crate) fn lock_sink<S>(sink: &Mutex<S>) -> MutexGuard<'_, S> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Frame scheduler for one render run
///
/// Each tick:
/// - Reads a fresh configuration snapshot
/// - Renders it, catching panics so a bad tick never ends the run
/// - Writes to the sink unless the run was stopped
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, sink, config, stop);
///
/// while !stop.load(Ordering::Acquire) {
///     let result = scheduler.tick(Instant::now());
///     std::thread::sleep(result.sleep_duration.into());
/// }
/// ```
pub struct FrameScheduler<S: StripSink, C: ConfigSource + ?Sized> {
    renderer: Renderer,
    sink: Arc<Mutex<S>>,
    config: Arc<C>,
    stop: Arc<AtomicBool>,
    next_frame: Instant,
}

impl<S: StripSink, C: ConfigSource + ?Sized> FrameScheduler<S, C> {
    pub fn new(
        renderer: Renderer,
        sink: Arc<Mutex<S>>,
        config: Arc<C>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            renderer,
            sink,
            config,
            stop,
            next_frame: Instant::from_millis(0),
        }
    }

    /// Process one frame and return timing information.
    ///
    /// A failed tick is logged and skipped; the next one is scheduled after
    /// the renderer's retry interval.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let config = self.config.snapshot();
        let frame_duration = match self.render(&config, now) {
            Ok(interval) => interval,
            Err(err) => {
                log::error!("Render tick failed: {err}");
                self.renderer.retry_interval()
            }
        };

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.next_frame += frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    fn render(&mut self, config: &LightConfig, now: Instant) -> Result<Duration, TickError> {
        let renderer = &mut self.renderer;
        let sink = &self.sink;
        let stop = &self.stop;
        panic::catch_unwind(AssertUnwindSafe(|| {
            let tick = renderer.tick(config, now)?;
            output(sink, stop, tick.output, tick.brightness)?;
            Ok(tick.interval)
        }))
        .map_err(|payload| TickError::Panic(panic_message(payload.as_ref())))?
    }
}

/// Write one tick's output, unless the run has been stopped
///
/// The stop flag is checked while holding the sink, so nothing is written
/// once `stop` has been observed by the engine.
fn output<S: StripSink>(
    sink: &Mutex<S>,
    stop: &AtomicBool,
    output: TickOutput,
    brightness: u8,
) -> Result<(), TickError> {
    if output == TickOutput::Idle {
        return Ok(());
    }
    let mut sink = lock_sink(sink);
    if stop.load(Ordering::Acquire) {
        return Ok(());
    }
    sink.set_brightness(brightness);
    match output {
        TickOutput::Frame(frame) => sink.show(frame)?,
        TickOutput::Blank(lengths) => sink.blank(lengths)?,
        TickOutput::Idle => {}
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
