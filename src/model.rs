use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Stopped | Self::Paused => Self::Playing,
            Self::Playing => Self::Paused,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTier {
    Muted,
    Low,
    Mid,
    High,
}

impl VolumeTier {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Muted => "🔇",
            Self::Low => "🔈",
            Self::Mid => "🔉",
            Self::High => "🔊",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Muted => "Muted",
            Self::Low => "Low Volume",
            Self::Mid => "Medium Volume",
            Self::High => "High Volume",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_src: String,
    #[serde(default)]
    pub song_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongCard {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_src: String,
}

impl SongCard {
    pub fn new(title: &str, artist: &str, cover_src: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            cover_src: cover_src.to_string(),
        }
    }

    pub fn to_track(&self, catalog: &Catalog) -> Track {
        Track {
            title: self.title.clone(),
            artist: self.artist.clone(),
            cover_src: self.cover_src.clone(),
            song_path: catalog.resolve_media_path(&self.title),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub current_song: Option<Track>,
    #[serde(default)]
    pub song_history: Vec<Track>,
    #[serde(default = "default_song_index")]
    pub current_song_index: i64,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_volume: Option<f32>,
}

fn default_song_index() -> i64 {
    -1
}

fn default_volume() -> f32 {
    1.0
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            current_song: None,
            song_history: Vec::new(),
            current_song_index: default_song_index(),
            volume: default_volume(),
            previous_volume: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_cycles_between_playing_and_paused() {
        assert_eq!(PlaybackState::Stopped.toggled(), PlaybackState::Playing);
        assert_eq!(PlaybackState::Playing.toggled(), PlaybackState::Paused);
        assert_eq!(PlaybackState::Paused.toggled(), PlaybackState::Playing);
    }

    #[test]
    fn state_uses_widget_storage_field_names() {
        let state = PersistedState {
            current_song: Some(Track {
                title: String::from("Stay"),
                artist: String::from("The Kid LAROI"),
                cover_src: String::from("Img/stay.jpg"),
                song_path: Some(PathBuf::from("songs/Stay.mp3")),
            }),
            current_song_index: 0,
            ..PersistedState::default()
        };

        let json = serde_json::to_value(&state).expect("serialize");
        assert!(json.get("currentSong").is_some());
        assert!(json.get("songHistory").is_some());
        assert_eq!(json["currentSongIndex"], 0);
        assert_eq!(json["currentSong"]["coverSrc"], "Img/stay.jpg");
        assert_eq!(json["currentSong"]["songPath"], "songs/Stay.mp3");
        assert!(json.get("previousVolume").is_none());
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let state: PersistedState = serde_json::from_str(r#"{"volume":0.4}"#).expect("parse");
        assert_eq!(state.volume, 0.4);
        assert_eq!(state.current_song_index, -1);
        assert!(state.song_history.is_empty());
        assert!(state.current_song.is_none());
    }

    #[test]
    fn unplayable_track_round_trips_with_null_path() {
        let raw = r#"{"title":"Mystery","artist":"Nobody","coverSrc":"","songPath":null}"#;
        let track: Track = serde_json::from_str(raw).expect("parse");
        assert_eq!(track.song_path, None);
    }
}
