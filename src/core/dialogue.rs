//! Dialogue playback: per-language line sequences behind one cursor.
//!
//! Wires together resource lookup, script reading, line parsing and the
//! actor registry, and notifies observers as lines are handed out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::actor::{ActorError, ActorPreset, ActorRegistry};
use crate::core::line::DialogueLine;
use crate::core::resources::ResourceLoader;
use crate::core::script::Script;
use crate::schema::dialogue::DialogueLanguage;

/// Resource directory dialogue scripts live under.
pub const DEFAULT_DIRECTORY: &str = "Dialogues";

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("actor error: {0}")]
    Actor(#[from] ActorError),
}

/// Authoring settings for one dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSettings {
    pub file_name: String,
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default)]
    pub language: DialogueLanguage,
    #[serde(default)]
    pub start_line_index: usize,
    #[serde(default = "default_skippable")]
    pub skippable: bool,
    /// Debug switch: jump to the end as soon as the dialogue starts.
    #[serde(default)]
    pub skip_on_start: bool,
}

fn default_directory() -> String {
    DEFAULT_DIRECTORY.to_string()
}

fn default_skippable() -> bool {
    true
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            directory: default_directory(),
            language: DialogueLanguage::default(),
            start_line_index: 0,
            skippable: default_skippable(),
            skip_on_start: false,
        }
    }
}

impl DialogueSettings {
    pub fn load_from_ron(path: &Path) -> Result<DialogueSettings, DialogueError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<DialogueSettings, DialogueError> {
        Ok(ron::from_str(input)?)
    }
}

/// Receives playback notifications. Every method defaults to a no-op.
pub trait DialogueObserver {
    fn on_start(&mut self) {}
    /// A line was handed out.
    fn on_advance(&mut self) {}
    /// The line at `index` was handed out; fires right after `on_advance`.
    fn on_line(&mut self, _index: usize) {}
    fn on_end(&mut self) {}
}

/// A dialogue loaded in every available language, played through a
/// single cursor.
pub struct Dialogue {
    name: String,
    language: DialogueLanguage,
    lines: BTreeMap<DialogueLanguage, Vec<DialogueLine>>,
    total_lines: usize,
    cursor: usize,
    skippable: bool,
    skip_on_start: bool,
    actors: ActorRegistry,
    observers: Vec<Box<dyn DialogueObserver>>,
}

/// Builder for constructing a `Dialogue`.
pub struct DialogueBuilder {
    settings: DialogueSettings,
    loader: Option<Box<dyn ResourceLoader>>,
    actors_path: Option<String>,
    /// Directly provided lines (for testing without resources).
    lines: BTreeMap<DialogueLanguage, Vec<DialogueLine>>,
    /// Directly provided actors (for testing without files).
    actors: Option<ActorRegistry>,
}

impl Dialogue {
    pub fn builder() -> DialogueBuilder {
        DialogueBuilder {
            settings: DialogueSettings::default(),
            loader: None,
            actors_path: None,
            lines: BTreeMap::new(),
            actors: None,
        }
    }

    /// Hand out the line at the cursor in the active language and advance.
    ///
    /// Returns `None` without moving the cursor or notifying observers
    /// when the cursor is past the end or the language has no lines.
    pub fn next_line(&mut self) -> Option<&DialogueLine> {
        let index = self.cursor;
        if line_at(&self.lines, self.language, index).is_none() {
            return None;
        }

        for observer in self.observers.iter_mut() {
            observer.on_advance();
        }
        for observer in self.observers.iter_mut() {
            observer.on_line(index);
        }
        self.cursor += 1;

        line_at(&self.lines, self.language, index)
    }

    /// The line at the cursor, without advancing.
    pub fn current_line(&self) -> Option<&DialogueLine> {
        line_at(&self.lines, self.language, self.cursor)
    }

    pub fn current_line_index(&self) -> usize {
        self.cursor
    }

    /// Line count fixed at load time from the first loaded language.
    pub fn line_count(&self) -> usize {
        self.total_lines
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total_lines
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the end of the dialogue. Refused when the dialogue is not
    /// skippable; returns whether the skip happened.
    pub fn skip(&mut self) -> bool {
        if !self.skippable {
            warn!(dialogue = %self.name, "dialogue cannot be skipped");
            return false;
        }
        warn!(dialogue = %self.name, "skipping dialogue");
        self.cursor = self.total_lines;
        true
    }

    pub fn is_skippable(&self) -> bool {
        self.skippable
    }

    pub fn start(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_start();
        }
        if self.skip_on_start && self.skippable {
            self.skip();
        }
    }

    pub fn end(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_end();
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn DialogueObserver>) {
        self.observers.push(observer);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> DialogueLanguage {
        self.language
    }

    /// Switch the active language. The cursor is kept.
    pub fn set_language(&mut self, language: DialogueLanguage) {
        self.language = language;
    }

    /// Languages with loaded lines, in load order.
    pub fn languages(&self) -> Vec<DialogueLanguage> {
        self.lines.keys().copied().collect()
    }

    pub fn lines(&self, language: DialogueLanguage) -> Option<&[DialogueLine]> {
        self.lines.get(&language).map(Vec::as_slice)
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    /// The preset for a line's speaker, if one is registered.
    pub fn actor_for(&self, line: &DialogueLine) -> Option<&ActorPreset> {
        self.actors.get(line.speaker())
    }

    /// Languages whose line count differs from the dialogue's line count.
    pub fn language_mismatches(&self) -> Vec<(DialogueLanguage, usize)> {
        self.lines
            .iter()
            .filter(|(_, lines)| lines.len() != self.total_lines)
            .map(|(language, lines)| (*language, lines.len()))
            .collect()
    }

    /// Warn about missing or inconsistent language variants. Never fails.
    #[cfg_attr(not(feature = "language-validation"), allow(dead_code))]
    fn validate_languages(&self) {
        if self.lines.is_empty() {
            warn!(dialogue = %self.name, "dialogue has no lines in any language");
            return;
        }
        let mismatches = self.language_mismatches();
        if mismatches.is_empty() {
            return;
        }
        warn!(
            dialogue = %self.name,
            expected = self.total_lines,
            "dialogue has different number of lines across languages"
        );
        for (language, lines) in &self.lines {
            warn!(dialogue = %self.name, "--> {:?}: {}", language, lines.len());
        }
    }
}

fn line_at(
    lines: &BTreeMap<DialogueLanguage, Vec<DialogueLine>>,
    language: DialogueLanguage,
    index: usize,
) -> Option<&DialogueLine> {
    lines.get(&language)?.get(index)
}

impl DialogueBuilder {
    pub fn settings(mut self, settings: DialogueSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn file_name(mut self, file_name: &str) -> Self {
        self.settings.file_name = file_name.to_string();
        self
    }

    pub fn directory(mut self, directory: &str) -> Self {
        self.settings.directory = directory.to_string();
        self
    }

    pub fn language(mut self, language: DialogueLanguage) -> Self {
        self.settings.language = language;
        self
    }

    pub fn start_line_index(mut self, index: usize) -> Self {
        self.settings.start_line_index = index;
        self
    }

    pub fn skippable(mut self, skippable: bool) -> Self {
        self.settings.skippable = skippable;
        self
    }

    pub fn skip_on_start(mut self, skip: bool) -> Self {
        self.settings.skip_on_start = skip;
        self
    }

    pub fn resources(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn actors_file(mut self, path: &str) -> Self {
        self.actors_path = Some(path.to_string());
        self
    }

    /// Provide lines for a language directly (for testing without resources).
    /// Replaces anything the resource loader finds for that language.
    pub fn with_lines(mut self, language: DialogueLanguage, lines: Vec<DialogueLine>) -> Self {
        self.lines.insert(language, lines);
        self
    }

    /// Provide actors directly (for testing without files).
    pub fn with_actors(mut self, actors: ActorRegistry) -> Self {
        self.actors = Some(actors);
        self
    }

    pub fn build(self) -> Result<Dialogue, DialogueError> {
        let settings = self.settings;
        let mut lines = BTreeMap::new();

        if let Some(ref loader) = self.loader {
            lines = read_languages(loader.as_ref(), &settings.directory, &settings.file_name);
        }
        for (language, provided) in self.lines {
            lines.insert(language, provided);
        }

        let mut actors = self.actors.unwrap_or_default();
        if let Some(ref path) = self.actors_path {
            actors.load_from_ron(Path::new(path))?;
        }

        // The first language in load order fixes the line count.
        let total_lines = lines.values().next().map(Vec::len).unwrap_or(0);

        let dialogue = Dialogue {
            name: settings.file_name,
            language: settings.language,
            lines,
            total_lines,
            cursor: settings.start_line_index,
            skippable: settings.skippable,
            skip_on_start: settings.skip_on_start,
            actors,
            observers: Vec::new(),
        };

        #[cfg(feature = "language-validation")]
        dialogue.validate_languages();

        Ok(dialogue)
    }
}

/// Read and parse every available language variant of a dialogue file.
fn read_languages(
    loader: &dyn ResourceLoader,
    directory: &str,
    file_name: &str,
) -> BTreeMap<DialogueLanguage, Vec<DialogueLine>> {
    let mut lines = BTreeMap::new();
    if file_name.trim().is_empty() {
        return lines;
    }

    for language in DialogueLanguage::ALL {
        match loader.load(directory, language.code(), file_name) {
            Some(text) => {
                let parsed: Vec<DialogueLine> = Script::parse(&text)
                    .into_iter()
                    .map(DialogueLine::from)
                    .collect();
                debug!(file = file_name, ?language, lines = parsed.len(), "loaded dialogue");
                lines.insert(language, parsed);
            }
            None => {
                debug!(file = file_name, ?language, "no dialogue for language");
            }
        }
    }
    lines
}
