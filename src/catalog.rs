use crate::model::SongCard;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

// first matching key wins
const MEDIA_TABLE: &[(&str, &str)] = &[
    ("tum se", "songs/tumse.mp3"),
    ("duniyaa", "songs/duniya.mp3"),
    ("zaalima", "songs/zaalima.mp3"),
    ("tere pyaar mein", "songs/terepyaarmein.mp3"),
    ("hawayein", "songs/Hawae.mp3"),
    ("finding her", "songs/FindingHer.mp3"),
    ("afsos", "songs/Afsos.mp3"),
    ("blank", "songs/blank.mp3"),
    ("blinding lights", "songs/blinding.mp3"),
    ("heat waves", "songs/HeatWaves.mp3"),
    ("stay", "songs/Stay.mp3"),
    ("believer", "songs/Imagine.mp3"),
    ("starboy", "songs/Starboy.mp3"),
    ("mortals", "songs/Warrio.mp3"),
    ("cradles", "songs/Craddles.mp3"),
];

const BUILTIN_DECK: &[(&str, &str, &str)] = &[
    ("Tum Se", "Sachin-Jigar", "Img/tumse.jpg"),
    ("Duniyaa", "Akhil", "Img/duniya.jpg"),
    ("Zaalima", "Arijit Singh", "Img/zaalima.jpg"),
    ("Tere Pyaar Mein", "Arijit Singh", "Img/terepyaarmein.jpg"),
    ("Hawayein", "Arijit Singh", "Img/hawayein.jpg"),
    ("Finding Her", "Kushagra", "Img/findingher.jpg"),
    ("Afsos", "Anuv Jain, AP Dhillon", "Img/afsos.jpg"),
    ("Blank", "Disfigure", "Img/blank.jpg"),
    ("Blinding Lights", "The Weeknd", "Img/blinding.jpg"),
    ("Heat Waves", "Glass Animals", "Img/heatwaves.jpg"),
    ("Stay", "The Kid LAROI, Justin Bieber", "Img/stay.jpg"),
    ("Believer", "Imagine Dragons", "Img/believer.jpg"),
    ("Starboy", "The Weeknd", "Img/starboy.jpg"),
    ("Mortals", "Warriyo", "Img/mortals.jpg"),
    ("Cradles", "Sub Urban", "Img/cradles.jpg"),
];

pub const CARDS_FILE: &str = "cards.json";

#[derive(Debug, Clone)]
pub struct Catalog {
    pub cards: Vec<SongCard>,
    media_root: PathBuf,
}

impl Catalog {
    pub fn builtin(media_root: &Path) -> Self {
        Self {
            cards: BUILTIN_DECK
                .iter()
                .map(|(title, artist, cover)| SongCard::new(title, artist, cover))
                .collect(),
            media_root: media_root.to_path_buf(),
        }
    }

    pub fn load(config_dir: &Path, media_root: &Path) -> Self {
        let path = config_dir.join(CARDS_FILE);
        if !path.exists() {
            return Self::builtin(media_root);
        }

        match read_cards(&path) {
            Ok(cards) if !cards.is_empty() => {
                tracing::info!(count = cards.len(), path = %path.display(), "loaded card deck");
                Self {
                    cards,
                    media_root: media_root.to_path_buf(),
                }
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "card deck is empty, using built-in deck");
                Self::builtin(media_root)
            }
            Err(err) => {
                tracing::warn!("{err:#}; using built-in deck");
                Self::builtin(media_root)
            }
        }
    }

    pub fn resolve_media_path(&self, title: &str) -> Option<PathBuf> {
        let relative = media_path_for_title(title)?;
        Some(self.media_root.join(relative))
    }
}

fn read_cards(path: &Path) -> Result<Vec<SongCard>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read card deck {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse card deck {}", path.display()))
}

pub fn simplify_title(title: &str) -> String {
    title
        .nfkd()
        .filter(|ch| !unicode_normalization::char::is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect()
}

pub fn media_path_for_title(title: &str) -> Option<&'static str> {
    let simplified = simplify_title(title);
    if simplified.trim().is_empty() {
        return None;
    }

    MEDIA_TABLE
        .iter()
        .find(|(key, _)| simplified.contains(key) || key.contains(simplified.as_str()))
        .map(|(_, path)| *path)
}
