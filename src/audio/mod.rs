use anyhow::{Context, Result};
use rodio::Source;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
#[cfg(unix)]
use std::ffi::CString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::time::Instant;

pub trait AudioEngine {
    fn load(&mut self, path: Option<&Path>) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn is_paused(&self) -> bool;
    fn is_ready(&self) -> bool;
    fn is_finished(&self) -> bool;
    fn position(&self) -> Option<Duration>;
    fn duration(&self) -> Option<Duration>;
    fn seek_to(&mut self, position: Duration) -> Result<()>;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
}

pub struct RodioAudioEngine {
    stream: OutputStream,
    sink: Sink,
    current: Option<PathBuf>,
    track_duration: Option<Duration>,
    volume: f32,
}

impl RodioAudioEngine {
    pub fn new() -> Result<Self> {
        let (stream, sink) = Self::open_output_stream()?;
        sink.pause();

        Ok(Self {
            stream,
            sink,
            current: None,
            track_duration: None,
            volume: 1.0,
        })
    }

    fn open_output_stream() -> Result<(OutputStream, Sink)> {
        let mut stream = with_silenced_stderr(|| {
            OutputStreamBuilder::from_default_device()
                .context("failed to open default system output stream")
                .and_then(|builder| {
                    builder
                        .with_error_callback(|_| {})
                        .open_stream_or_fallback()
                        .context("failed to start default output stream")
                })
        })?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        Ok((stream, sink))
    }
}

impl AudioEngine for RodioAudioEngine {
    fn load(&mut self, path: Option<&Path>) -> Result<()> {
        self.sink.stop();
        self.sink = Sink::connect_new(self.stream.mixer());
        self.sink.pause();
        self.sink.set_volume(self.volume);
        self.current = None;
        self.track_duration = None;

        let Some(path) = path else {
            return Ok(());
        };

        let file =
            File::open(path).with_context(|| format!("failed to open track {}", path.display()))?;
        let source = Decoder::try_from(file)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        self.track_duration = source.total_duration().filter(|d| !d.is_zero());
        self.sink.append(source);
        self.current = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) {
        if self.current.is_some() {
            self.sink.play();
        }
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
        self.current = None;
        self.track_duration = None;
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    fn is_finished(&self) -> bool {
        self.current.is_some() && self.sink.empty()
    }

    fn position(&self) -> Option<Duration> {
        self.current.as_ref()?;
        Some(self.sink.get_pos())
    }

    fn duration(&self) -> Option<Duration> {
        self.track_duration
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.current.is_none() {
            return Err(anyhow::anyhow!("no active track"));
        }

        self.sink
            .try_seek(position)
            .map_err(|err| anyhow::anyhow!("failed to seek current track: {err:?}"))
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }
}

#[cfg(unix)]
fn with_silenced_stderr<T>(operation: impl FnOnce() -> T) -> T {
    let saved = unsafe { libc::dup(libc::STDERR_FILENO) };
    if saved < 0 {
        return operation();
    }

    let devnull = CString::new("/dev/null")
        .ok()
        .map(|path| unsafe { libc::open(path.as_ptr(), libc::O_WRONLY) })
        .unwrap_or(-1);

    if devnull >= 0 {
        unsafe {
            libc::dup2(devnull, libc::STDERR_FILENO);
            libc::close(devnull);
        }
    }

    let result = operation();

    unsafe {
        libc::dup2(saved, libc::STDERR_FILENO);
        libc::close(saved);
    }

    result
}

#[cfg(not(unix))]
fn with_silenced_stderr<T>(operation: impl FnOnce() -> T) -> T {
    operation()
}

pub struct NullAudioEngine {
    paused: bool,
    current: Option<PathBuf>,
    volume: f32,
    started_at: Option<Instant>,
    position_offset: Duration,
    track_duration: Option<Duration>,
}

impl NullAudioEngine {
    pub fn new() -> Self {
        Self {
            paused: true,
            current: None,
            volume: 1.0,
            started_at: None,
            position_offset: Duration::ZERO,
            track_duration: None,
        }
    }

    pub fn with_fixed_duration(duration: Duration) -> FixedDurationEngine {
        FixedDurationEngine {
            inner: Self::new(),
            duration,
        }
    }

    fn estimate_duration(path: &Path) -> Option<Duration> {
        let file = File::open(path).ok()?;
        let source = Decoder::try_from(file).ok()?;
        source
            .total_duration()
            .filter(|duration| !duration.is_zero())
    }

    fn current_position(&self) -> Duration {
        let mut position = self.position_offset;
        if !self.paused
            && self.current.is_some()
            && let Some(started_at) = self.started_at
        {
            position = position.saturating_add(started_at.elapsed());
        }
        if let Some(duration) = self.track_duration {
            return position.min(duration);
        }
        position
    }
}

impl Default for NullAudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for NullAudioEngine {
    fn load(&mut self, path: Option<&Path>) -> Result<()> {
        self.stop();
        if let Some(path) = path {
            self.current = Some(path.to_path_buf());
            self.track_duration = Self::estimate_duration(path);
        }
        Ok(())
    }

    fn play(&mut self) {
        if self.current.is_none() || !self.paused {
            return;
        }
        self.started_at = Some(Instant::now());
        self.paused = false;
    }

    fn pause(&mut self) {
        self.position_offset = self.current_position();
        self.started_at = None;
        self.paused = true;
    }

    fn stop(&mut self) {
        self.current = None;
        self.paused = true;
        self.started_at = None;
        self.position_offset = Duration::ZERO;
        self.track_duration = None;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    fn is_finished(&self) -> bool {
        let Some(duration) = self.track_duration else {
            return false;
        };
        self.current.is_some() && self.current_position() >= duration
    }

    fn position(&self) -> Option<Duration> {
        self.current.as_ref()?;
        Some(self.current_position())
    }

    fn duration(&self) -> Option<Duration> {
        self.track_duration
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        if self.current.is_none() {
            return Err(anyhow::anyhow!("no active track"));
        }

        self.position_offset = self
            .track_duration
            .map_or(position, |duration| position.min(duration));
        self.started_at = if self.paused {
            None
        } else {
            Some(Instant::now())
        };
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

pub struct FixedDurationEngine {
    inner: NullAudioEngine,
    duration: Duration,
}

impl AudioEngine for FixedDurationEngine {
    fn load(&mut self, path: Option<&Path>) -> Result<()> {
        self.inner.load(path)?;
        if self.inner.current.is_some() {
            self.inner.track_duration = Some(self.duration);
        }
        Ok(())
    }

    fn play(&mut self) {
        self.inner.play();
    }

    fn pause(&mut self) {
        self.inner.pause();
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    fn is_paused(&self) -> bool {
        self.inner.is_paused()
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn position(&self) -> Option<Duration> {
        self.inner.position()
    }

    fn duration(&self) -> Option<Duration> {
        self.inner.duration()
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.inner.seek_to(position)
    }

    fn volume(&self) -> f32 {
        self.inner.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.inner.set_volume(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioEngine, NullAudioEngine};
    use std::fs;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    fn write_test_wav(path: &Path, duration_ms: u32) {
        let sample_rate: u32 = 44_100;
        let channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let bytes_per_sample = u32::from(bits_per_sample / 8);
        let total_samples = (u64::from(sample_rate) * u64::from(duration_ms) / 1_000) as u32;
        let data_size = total_samples * u32::from(channels) * bytes_per_sample;
        let byte_rate = sample_rate * u32::from(channels) * bytes_per_sample;
        let block_align = channels * (bits_per_sample / 8);
        let riff_chunk_size = 36_u32.saturating_add(data_size);

        let mut bytes = Vec::with_capacity((44_u32 + data_size) as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&riff_chunk_size.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16_u32.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&bits_per_sample.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_size.to_le_bytes());
        bytes.resize((44_u32 + data_size) as usize, 0_u8);

        fs::write(path, bytes).expect("wav fixture should be written");
    }

    #[test]
    fn loaded_source_starts_paused() {
        let mut engine = NullAudioEngine::new();
        engine
            .load(Some(Path::new("nonexistent-track.mp3")))
            .expect("load should work in null mode");
        assert!(engine.is_ready());
        assert!(engine.is_paused());

        thread::sleep(Duration::from_millis(20));
        assert_eq!(engine.position(), Some(Duration::ZERO));
    }

    #[test]
    fn loading_nothing_leaves_handle_unready() {
        let mut engine = NullAudioEngine::new();
        engine.load(None).expect("load none");
        assert!(!engine.is_ready());

        engine.play();
        assert!(engine.is_paused(), "play without a source is ignored");
        assert!(engine.seek_to(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn pause_and_play_control_position_progression() {
        let mut engine = NullAudioEngine::new();
        engine
            .load(Some(Path::new("nonexistent-track.flac")))
            .expect("load");
        engine.play();
        thread::sleep(Duration::from_millis(20));

        engine.pause();
        let paused = engine.position().expect("position should be present");
        thread::sleep(Duration::from_millis(20));
        assert_eq!(engine.position(), Some(paused), "position freezes while paused");

        engine.play();
        thread::sleep(Duration::from_millis(20));
        let resumed = engine.position().expect("position should be present");
        assert!(resumed > paused, "position should continue after play");
    }

    #[test]
    fn seek_updates_position() {
        let mut engine = NullAudioEngine::new();
        engine.load(Some(Path::new("nonexistent-track.flac"))).expect("load");

        let target = Duration::from_secs(12);
        engine.seek_to(target).expect("seek should succeed");
        assert_eq!(engine.position(), Some(target));
    }

    #[test]
    fn wav_duration_is_probed_and_finishes() {
        let dir = tempdir().expect("tempdir");
        let track = dir.path().join("fixture.wav");
        write_test_wav(&track, 80);

        let mut engine = NullAudioEngine::new();
        engine.load(Some(&track)).expect("load wav fixture");
        let duration = engine.duration().expect("duration should be detected");
        assert!(duration >= Duration::from_millis(70));

        engine.play();
        thread::sleep(Duration::from_millis(120));
        assert!(engine.is_finished(), "known-duration playback should finish");
    }

    #[test]
    fn fixed_duration_engine_reports_duration_for_any_source() {
        let mut engine = NullAudioEngine::with_fixed_duration(Duration::from_secs(200));
        engine.load(Some(Path::new("missing.mp3"))).expect("load");
        assert_eq!(engine.duration(), Some(Duration::from_secs(200)));

        engine.load(None).expect("load none");
        assert_eq!(engine.duration(), None);
    }
}
