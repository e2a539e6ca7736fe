use std::error::Error;
use std::time::Duration;

use engine::tone::{Ping, Sweep, Voice, Waveform};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Shared SFX volume constants (0.0..=1.0).
pub const TILE_TONE_VOLUME: f32 = 0.35;
pub const FAILURE_CUE_VOLUME: f32 = 0.4;

/// Tile cues end just before the next blink phase so they never stack.
pub const TILE_TONE_MS: u64 = 260;
pub const FAILURE_CUE_MS: u64 = 700;

const SAMPLE_RATE: u32 = 48_000;

/// Adapts a finite `Voice` to a mono rodio source.
struct VoiceSource<V: Voice> {
    voice: V,
    frame: u64,
}

impl<V: Voice> VoiceSource<V> {
    fn new(voice: V) -> Self {
        Self { voice, frame: 0 }
    }
}

impl<V: Voice> Iterator for VoiceSource<V> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.frame >= self.voice.len_frames() {
            return None;
        }
        let sample = self.voice.sample(self.frame);
        self.frame += 1;
        Some(sample)
    }
}

impl<V: Voice> rodio::Source for VoiceSource<V> {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.voice.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_micros(
            self.voice.len_frames() * 1_000_000 / self.voice.sample_rate().max(1) as u64,
        ))
    }
}

/// Fire-and-forget audio output. Every cue gets a detached sink; a missing
/// or failing audio device silently drops cues rather than stopping play.
pub struct Sfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    gain: f32,
}

impl Sfx {
    pub fn new(gain: f32) -> Result<Self, Box<dyn Error>> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            gain: gain.clamp(0.0, 1.0),
        })
    }

    pub fn play_tile_tone(&self, freq_hz: f32) {
        self.play(
            VoiceSource::new(
                Ping::new(freq_hz, SAMPLE_RATE, TILE_TONE_MS).with_waveform(Waveform::Sine),
            ),
            TILE_TONE_VOLUME,
        );
    }

    pub fn play_failure_cue(&self) {
        self.play(
            VoiceSource::new(Sweep::new(392.0, 98.0, SAMPLE_RATE, FAILURE_CUE_MS)),
            FAILURE_CUE_VOLUME,
        );
    }

    fn play<S>(&self, source: S, volume: f32)
    where
        S: rodio::Source<Item = f32> + Send + 'static,
    {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(volume * self.gain);
        sink.append(source);
        sink.detach();
    }
}
