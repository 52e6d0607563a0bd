use crate::audio::AudioEngine;
use crate::catalog::Catalog;
use crate::config;
use crate::drag::{DragGesture, DragTarget};
use crate::history::History;
use crate::model::{PersistedState, PlaybackState, Track, VolumeTier};
use crate::store::StateStore;
use crate::volume::VolumeControl;
use std::time::Duration;

pub struct PlayerController {
    catalog: Catalog,
    audio: Box<dyn AudioEngine>,
    store: Box<dyn StateStore>,
    history: History,
    volume: VolumeControl,
    state: PlaybackState,
    current: Option<Track>,
    drag: Option<DragGesture>,
    media_pending: bool,
    total: Option<Duration>,
    progress: f64,
    pub selected_card: usize,
    pub dirty: bool,
    pub status: String,
}

impl PlayerController {
    pub fn new(catalog: Catalog, audio: Box<dyn AudioEngine>, store: Box<dyn StateStore>) -> Self {
        let state = config::load_state(store.as_ref());
        let history = History::from_parts(state.song_history, state.current_song_index);
        let current = history.current().cloned().or(state.current_song);
        let volume = VolumeControl::new(state.volume, state.previous_volume);

        let mut controller = Self {
            catalog,
            audio,
            store,
            history,
            volume,
            state: PlaybackState::Stopped,
            current: None,
            drag: None,
            media_pending: false,
            total: None,
            progress: 0.0,
            selected_card: 0,
            dirty: true,
            status: String::from("Ready"),
        };
        controller.audio.set_volume(controller.volume.level());

        if let Some(track) = current {
            tracing::info!(title = %track.title, "restored last song");
            controller.load_source(&track);
            controller.set_status(&format!("Restored {}", track.title));
            controller.current = Some(track);
        }
        controller
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            current_song: self.current.clone(),
            song_history: self.history.entries().to_vec(),
            current_song_index: self.history.cursor_index(),
            volume: self.volume.level(),
            previous_volume: self.volume.last_nonzero(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    pub fn audio(&self) -> &dyn AudioEngine {
        self.audio.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn total(&self) -> Option<Duration> {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        match self.total {
            Some(total) => total.mul_f64(self.progress),
            None => Duration::ZERO,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.history.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.history.has_next()
    }

    pub fn volume_level(&self) -> f32 {
        self.volume.level()
    }

    pub fn volume_tier(&self) -> VolumeTier {
        self.volume.tier()
    }

    pub fn select_card(&mut self, index: usize) {
        let Some(card) = self.catalog.cards.get(index) else {
            self.set_status("No such song");
            return;
        };
        let track = card.to_track(&self.catalog);
        self.selected_card = index;
        self.select_track(track);
    }

    pub fn select_track(&mut self, track: Track) {
        tracing::debug!(title = %track.title, path = ?track.song_path, "selecting track");
        self.history.push(track.clone());
        self.start_track(track);
    }

    pub fn play_previous(&mut self) -> bool {
        if self.seek_drag_active() {
            return false;
        }
        let Some(track) = self.history.step_back().cloned() else {
            return false;
        };
        self.start_track(track);
        true
    }

    pub fn play_next(&mut self) -> bool {
        if self.seek_drag_active() {
            return false;
        }
        let Some(track) = self.history.step_forward().cloned() else {
            return false;
        };
        self.start_track(track);
        true
    }

    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() || self.seek_drag_active() {
            return;
        }

        self.state = self.state.toggled();
        if self.state.is_playing() {
            if self.audio.is_finished() {
                self.seek(0.0);
            }
            self.audio.play();
            self.set_status("Playing");
        } else {
            self.audio.pause();
            self.set_status("Paused");
        }
        tracing::debug!(state = ?self.state, "toggled playback");
    }

    pub fn seek(&mut self, fraction: f64) -> Option<Duration> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.progress = fraction;
        self.dirty = true;

        let total = self.audio.duration()?;
        let target = total.mul_f64(fraction);
        if let Err(err) = self.audio.seek_to(target) {
            tracing::warn!("{err:#}");
            return None;
        }
        Some(target)
    }

    pub fn seek_by(&mut self, seconds: f64) -> Option<Duration> {
        let total = self.audio.duration()?;
        if total.is_zero() {
            return None;
        }
        let now = self.audio.position().unwrap_or_default().as_secs_f64();
        self.seek((now + seconds) / total.as_secs_f64())
    }

    pub fn begin_drag(&mut self, target: DragTarget, fraction: f64) {
        if self.drag.is_some() {
            self.end_drag();
        }

        let was_playing = self.state.is_playing();
        let gesture = DragGesture::begin(target, fraction, was_playing);
        match target {
            DragTarget::Progress => {
                if was_playing {
                    self.audio.pause();
                }
                self.progress = gesture.fraction();
            }
            DragTarget::Volume => self.apply_volume(gesture.fraction() as f32),
        }
        self.drag = Some(gesture);
        self.dirty = true;
    }

    pub fn update_drag(&mut self, fraction: f64) {
        let Some(gesture) = self.drag.as_mut() else {
            return;
        };
        let fraction = gesture.update(fraction);
        match gesture.target() {
            DragTarget::Progress => {
                self.progress = fraction;
                self.dirty = true;
            }
            DragTarget::Volume => self.apply_volume(fraction as f32),
        }
    }

    pub fn end_drag(&mut self) -> Option<DragTarget> {
        let gesture = self.drag.take()?;
        if gesture.target() == DragTarget::Progress {
            self.seek(gesture.fraction());
            if gesture.was_playing() {
                self.audio.play();
            }
        }
        self.dirty = true;
        Some(gesture.target())
    }

    pub fn set_volume(&mut self, fraction: f32) {
        self.apply_volume(fraction);
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.volume_changed();
    }

    pub fn tick(&mut self) -> bool {
        if self.media_pending && self.audio.is_ready() {
            self.media_ready();
        }

        if !self.state.is_playing() || self.seek_drag_active() {
            return self.state.is_playing();
        }

        if let (Some(position), Some(total)) = (self.audio.position(), self.total)
            && !total.is_zero()
        {
            let progress = (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0);
            if (progress - self.progress).abs() > f64::EPSILON {
                self.progress = progress;
                self.dirty = true;
            }
        }
        true
    }

    fn media_ready(&mut self) {
        self.media_pending = false;
        self.total = self.audio.duration();
        self.dirty = true;
        tracing::debug!(duration = ?self.total, "media ready");
        // an active seek drag owns the position and resumes on release
        if self.seek_drag_active() {
            return;
        }
        self.progress = 0.0;
        if self.state.is_playing() {
            self.audio.play();
        }
    }

    fn start_track(&mut self, track: Track) {
        self.audio.stop();
        self.load_source(&track);
        self.set_status(&format!("Now playing {}", track.title));
        self.current = Some(track);
        self.state = PlaybackState::Playing;
        self.persist();
    }

    fn load_source(&mut self, track: &Track) {
        if track.song_path.is_none() {
            tracing::warn!(title = %track.title, "no media file for title");
        }
        if let Err(err) = self.audio.load(track.song_path.as_deref()) {
            tracing::warn!("{err:#}");
        }
        self.media_pending = true;
        self.total = None;
        self.progress = 0.0;
        self.dirty = true;
    }

    fn apply_volume(&mut self, fraction: f32) {
        self.volume.set(fraction);
        self.volume_changed();
    }

    fn volume_changed(&mut self) {
        self.audio.set_volume(self.volume.level());
        self.dirty = true;
        self.persist();
    }

    fn seek_drag_active(&self) -> bool {
        self.drag
            .as_ref()
            .is_some_and(|gesture| gesture.target() == DragTarget::Progress)
    }

    fn persist(&mut self) {
        let state = self.persisted_state();
        if let Err(err) = config::save_state(self.store.as_mut(), &state) {
            tracing::warn!("{err:#}");
            self.set_status(&format!("save error: {err:#}"));
        }
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.dirty = true;
    }
}
