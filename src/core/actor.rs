//! Actor presets: display names and emotion portraits for speakers.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::schema::dialogue::ActorEmotion;

/// Portrait shown for one emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionPortrait {
    pub emotion: ActorEmotion,
    pub portrait: String,
}

/// A speaker that dialogue lines can name through their `Speaker` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPreset {
    /// Name used in script tags.
    pub internal_name: String,
    pub display_name: String,
    #[serde(default)]
    pub default_portrait: Option<String>,
    #[serde(default)]
    pub emotions: Vec<EmotionPortrait>,
}

impl ActorPreset {
    /// Portrait for an emotion, falling back to the default portrait.
    ///
    /// If an emotion is listed more than once, the first entry wins.
    pub fn portrait_for(&self, emotion: ActorEmotion) -> Option<&str> {
        self.emotions
            .iter()
            .find(|e| e.emotion == emotion)
            .map(|e| e.portrait.as_str())
            .or(self.default_portrait.as_deref())
    }
}

/// Registry of actor presets, looked up by internal name.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    actors: Vec<ActorPreset>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    pub fn register(&mut self, actor: ActorPreset) {
        self.actors.push(actor);
    }

    /// Case-insensitive lookup. Blank names never match.
    pub fn get(&self, internal_name: &str) -> Option<&ActorPreset> {
        let name = internal_name.trim();
        if name.is_empty() {
            return None;
        }
        self.actors
            .iter()
            .find(|a| a.internal_name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Load actors from a RON file containing a list of presets.
    pub fn load_from_ron(&mut self, path: &Path) -> Result<(), ActorError> {
        let contents = std::fs::read_to_string(path)?;
        self.parse_ron(&contents)
    }

    pub fn parse_ron(&mut self, input: &str) -> Result<(), ActorError> {
        let actors: Vec<ActorPreset> = ron::from_str(input)?;
        for actor in actors {
            self.register(actor);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}
