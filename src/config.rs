use crate::model::PersistedState;
use crate::store::{PLAYER_STATE_KEY, StateStore};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "songdeck";
pub const CONFIG_DIR_ENV: &str = "SONGDECK_CONFIG_DIR";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn ensure_config_dir(root: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

pub fn load_state(store: &dyn StateStore) -> PersistedState {
    let raw = match store.get(PLAYER_STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PersistedState::default(),
        Err(err) => {
            tracing::warn!("{err:#}; starting with default player state");
            return PersistedState::default();
        }
    };

    match serde_json::from_str::<PersistedState>(&raw) {
        Ok(state) => sanitize(state),
        Err(err) => {
            tracing::warn!("failed to parse player state: {err}; starting with defaults");
            PersistedState::default()
        }
    }
}

pub fn save_state(store: &mut dyn StateStore, state: &PersistedState) -> Result<()> {
    let json = serde_json::to_string(state).context("failed to serialize player state")?;
    store.set(PLAYER_STATE_KEY, &json)
}

fn sanitize(mut state: PersistedState) -> PersistedState {
    if !state.volume.is_finite() {
        state.volume = PersistedState::default().volume;
    }
    state.volume = state.volume.clamp(0.0, 1.0);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        unsafe {
            env::set_var(CONFIG_DIR_ENV, dir.path().to_string_lossy().as_ref());
        }

        let root = ensure_config_dir(config_root().expect("root")).expect("dir");
        let mut store = FileStore::new(&root);
        let state = PersistedState {
            volume: 0.35,
            ..PersistedState::default()
        };
        save_state(&mut store, &state).expect("save");
        let loaded = load_state(&store);
        assert_eq!(loaded.volume, 0.35);
        assert_eq!(loaded.current_song_index, -1);
    }

    #[test]
    fn malformed_state_gives_defaults() {
        let store = MemoryStore::with_entry(PLAYER_STATE_KEY, "{\"songHistory\": 12");
        assert_eq!(load_state(&store), PersistedState::default());
    }

    #[test]
    fn wrong_shape_gives_defaults() {
        let store = MemoryStore::with_entry(PLAYER_STATE_KEY, "[1,2,3]");
        assert_eq!(load_state(&store), PersistedState::default());
    }

    #[test]
    fn out_of_range_volume_is_clamped() {
        let store = MemoryStore::with_entry(PLAYER_STATE_KEY, "{\"volume\": 3.5}");
        assert_eq!(load_state(&store).volume, 1.0);
    }
}
