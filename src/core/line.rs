//! Dialogue lines: raw script text projected through `key:value` tags.

use rustc_hash::FxHashMap;

use crate::core::script::ScriptLine;
use crate::schema::dialogue::{ActorEmotion, ActorPosition, DialogueAttribute, DialogueLineType};
use crate::schema::tag::StringTag;

/// Shortest tag (after trimming) that can carry an attribute.
const MIN_TAG_LEN: usize = 3;

/// One line of narrative text with its presentation metadata.
///
/// Malformed tags never fail construction: the affected fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    text: String,
    line_type: DialogueLineType,
    speaker: String,
    emotion: ActorEmotion,
    position: ActorPosition,
    feels_like: String,
    attributes: FxHashMap<DialogueAttribute, String>,
}

impl DialogueLine {
    pub fn new<S: AsRef<str>>(text: &str, tags: &[S]) -> Self {
        let attributes = read_attributes(tags);

        let value_of = |attribute: DialogueAttribute| {
            attributes
                .get(&attribute)
                .map(String::as_str)
                .unwrap_or_default()
        };
        let line_type = DialogueLineType::from_tag_or_default(value_of(DialogueAttribute::LineType));
        let emotion = ActorEmotion::from_tag_or_default(value_of(DialogueAttribute::Emotion));
        let position = ActorPosition::from_tag_or_default(value_of(DialogueAttribute::Position));
        let speaker = value_of(DialogueAttribute::Speaker).to_string();
        let feels_like = value_of(DialogueAttribute::FeelsLike).to_string();

        Self {
            text: text.trim().to_string(),
            line_type,
            speaker,
            emotion,
            position,
            feels_like,
            attributes,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_type(&self) -> DialogueLineType {
        self.line_type
    }

    /// Internal name of the speaking actor; empty when untagged.
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn emotion(&self) -> ActorEmotion {
        self.emotion
    }

    pub fn position(&self) -> ActorPosition {
        self.position
    }

    pub fn feels_like(&self) -> &str {
        &self.feels_like
    }

    /// Raw tag value for an attribute, as written by the author.
    pub fn attribute(&self, attribute: DialogueAttribute) -> Option<&str> {
        self.attributes.get(&attribute).map(String::as_str)
    }
}

impl From<ScriptLine> for DialogueLine {
    fn from(line: ScriptLine) -> Self {
        DialogueLine::new(&line.text, &line.tags)
    }
}

/// Split a tag into trimmed key and value, or `None` if the tag is discarded.
fn split_tag(tag: &str) -> Option<(&str, &str)> {
    let trimmed = tag.trim();
    if trimmed.len() < MIN_TAG_LEN {
        return None;
    }
    let (key, value) = trimmed.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn read_attributes<S: AsRef<str>>(tags: &[S]) -> FxHashMap<DialogueAttribute, String> {
    let mut attributes = FxHashMap::default();
    for tag in tags {
        let Some((key, value)) = split_tag(tag.as_ref()) else {
            continue;
        };
        if let Some(attribute) = DialogueAttribute::from_key(key) {
            // Later tags overwrite earlier ones.
            attributes.insert(attribute, value.to_string());
        }
    }
    attributes
}

/// A problem found in a line's tags. Reported for authoring, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagIssue {
    /// Too short or missing the `:` separator; the tag is ignored.
    Malformed(String),
    /// The key names no attribute; the tag is ignored.
    UnknownKey(String),
    /// The value is not a variant of the attribute's enumeration; the
    /// field falls back to its default.
    InvalidValue {
        attribute: DialogueAttribute,
        value: String,
    },
}

impl std::fmt::Display for TagIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(tag) => write!(f, "malformed tag '{}'", tag),
            Self::UnknownKey(key) => write!(f, "unknown tag key '{}'", key),
            Self::InvalidValue { attribute, value } => {
                write!(f, "invalid {} value '{}'", attribute.key(), value)
            }
        }
    }
}

/// Inspect a tag list the way `DialogueLine::new` reads it.
pub fn inspect_tags<S: AsRef<str>>(tags: &[S]) -> Vec<TagIssue> {
    let mut issues = Vec::new();
    for tag in tags {
        let tag = tag.as_ref();
        if tag.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = split_tag(tag) else {
            issues.push(TagIssue::Malformed(tag.trim().to_string()));
            continue;
        };
        let Some(attribute) = DialogueAttribute::from_key(key) else {
            issues.push(TagIssue::UnknownKey(key.to_string()));
            continue;
        };
        let known = match attribute {
            DialogueAttribute::LineType => DialogueLineType::from_tag(value).is_some(),
            DialogueAttribute::Emotion => ActorEmotion::from_tag(value).is_some(),
            DialogueAttribute::Position => ActorPosition::from_tag(value).is_some(),
            DialogueAttribute::Speaker | DialogueAttribute::FeelsLike => true,
        };
        if !known {
            issues.push(TagIssue::InvalidValue {
                attribute,
                value: value.to_string(),
            });
        }
    }
    issues
}
