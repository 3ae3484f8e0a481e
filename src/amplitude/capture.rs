use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use cpal::{
    FromSample, Sample, SampleFormat, SizedSample,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use ringbuf::{
    HeapCons, HeapProd, HeapRb,
    traits::{Consumer as _, Observer as _, Producer as _, Split as _},
};

use super::AudioSource;
use crate::{config::AmplitudeConfig, error::AudioError};

const POLL_INTERVAL: Duration = Duration::from_millis(2);
/// Seconds of audio the ring buffer can hold
const BUFFER_SECONDS: usize = 2;

/// Live input from the default audio device
///
/// The stream pushes samples into a ring buffer from the audio callback; a
/// block read waits at most `read_timeout` for enough samples. Dropping the
/// source stops and closes the stream.
pub struct CaptureSource {
    stream: cpal::Stream,
    consumer: HeapCons<i16>,
    channels: u16,
    read_timeout: Duration,
    failed: Arc<AtomicBool>,
}

impl CaptureSource {
    pub fn open_default(config: &AmplitudeConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoInputDevice)?;
        let supported = device
            .default_input_config()
            .map_err(|err| AudioError::Stream(err.to_string()))?;

        let device_channels = supported.channels().max(1);
        let channels = device_channels.min(config.max_channels.max(1));
        let sample_rate = supported.sample_rate().0;
        if sample_rate != config.sample_rate {
            log::debug!(
                "Input runs at {sample_rate} Hz instead of the preferred {} Hz",
                config.sample_rate
            );
        }
        let stream_config: cpal::StreamConfig = supported.clone().into();

        let capacity = (sample_rate as usize)
            .saturating_mul(usize::from(channels))
            .saturating_mul(BUFFER_SECONDS)
            .max(config.block_frames * usize::from(channels) * 2);
        let (producer, consumer) = HeapRb::<i16>::new(capacity).split();

        let failed = Arc::new(AtomicBool::new(false));
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(
                &device,
                &stream_config,
                producer,
                device_channels,
                channels,
                Arc::clone(&failed),
            ),
            SampleFormat::I16 => build_stream::<i16>(
                &device,
                &stream_config,
                producer,
                device_channels,
                channels,
                Arc::clone(&failed),
            ),
            SampleFormat::U16 => build_stream::<u16>(
                &device,
                &stream_config,
                producer,
                device_channels,
                channels,
                Arc::clone(&failed),
            ),
            _ => return Err(AudioError::UnsupportedFormat),
        }?;

        stream
            .play()
            .map_err(|err| AudioError::Stream(err.to_string()))?;

        Ok(Self {
            stream,
            consumer,
            channels,
            read_timeout: Duration::from_millis(config.read_timeout.as_millis()),
            failed,
        })
    }
}

impl AudioSource for CaptureSource {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn read_block(&mut self, frames: usize, out: &mut Vec<i16>) -> Result<(), AudioError> {
        if self.failed.swap(false, Ordering::Relaxed) {
            return Err(AudioError::Stream("input stream reported an error".into()));
        }

        let needed = frames * usize::from(self.channels);
        let deadline = Instant::now() + self.read_timeout;
        while self.consumer.occupied_len() < needed {
            if Instant::now() >= deadline {
                return Err(AudioError::Timeout);
            }
            thread::sleep(POLL_INTERVAL);
        }

        // Keep only the newest block, whole frames at a time
        let stale = self.consumer.occupied_len() - needed;
        self.consumer.skip(stale - stale % usize::from(self.channels));

        out.clear();
        out.resize(needed, 0);
        let read = self.consumer.pop_slice(out);
        out.truncate(read);
        Ok(())
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        if let Err(err) = self.stream.pause() {
            log::debug!("Failed to pause audio stream: {err}");
        }
        log::info!("Audio input closed");
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut producer: HeapProd<i16>,
    device_channels: u16,
    channels: u16,
    failed: Arc<AtomicBool>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    i16: FromSample<T>,
{
    let device_channels = usize::from(device_channels);
    let channels = usize::from(channels);
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                for frame in data.chunks(device_channels) {
                    // Drop whole frames when the reader falls behind
                    if producer.vacant_len() < channels {
                        break;
                    }
                    for sample in frame.iter().take(channels) {
                        let _ = producer.try_push(i16::from_sample(*sample));
                    }
                }
            },
            move |err| {
                log::warn!("Audio stream error: {err}");
                failed.store(true, Ordering::Relaxed);
            },
            None,
        )
        .map_err(|err| AudioError::Stream(err.to_string()))
}
