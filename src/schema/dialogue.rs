use serde::{Deserialize, Serialize};

use super::tag::StringTag;

/// How a dialogue line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialogueLineType {
    #[default]
    None,
    Thought,
    Dialogue,
    Broadcast,
    Machine,
    Monologue,
    Hint,
}

impl StringTag for DialogueLineType {
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::None, "None"),
        (Self::Thought, "Thought"),
        (Self::Dialogue, "Dialogue"),
        (Self::Broadcast, "Broadcast"),
        (Self::Machine, "MachineType"),
        (Self::Machine, "Machine"),
        (Self::Monologue, "Monologue"),
        (Self::Hint, "Hint"),
    ];
}

/// The attribute a `key:value` line tag sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogueAttribute {
    LineType,
    Speaker,
    Emotion,
    FeelsLike,
    Position,
}

impl DialogueAttribute {
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::LineType, "LineType"),
        (Self::Speaker, "Speaker"),
        (Self::Emotion, "Emotion"),
        (Self::FeelsLike, "FeelsLike"),
        (Self::Position, "Position"),
    ];

    /// Map a tag key to its attribute. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::TABLE
            .iter()
            .find(|(_, text)| text.eq_ignore_ascii_case(key))
            .map(|(attribute, _)| *attribute)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::LineType => "LineType",
            Self::Speaker => "Speaker",
            Self::Emotion => "Emotion",
            Self::FeelsLike => "FeelsLike",
            Self::Position => "Position",
        }
    }

    /// Returns true if the value must name a variant of a closed enumeration.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Self::LineType | Self::Emotion | Self::Position)
    }
}

/// Facial expression requested for the speaking actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorEmotion {
    #[default]
    None,
    Neutral,
    Happy,
    Sad,
    Angry,
    Scared,
    Surprised,
    Thoughtful,
}

impl StringTag for ActorEmotion {
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::None, "None"),
        (Self::Neutral, "Neutral"),
        (Self::Happy, "Happy"),
        (Self::Sad, "Sad"),
        (Self::Angry, "Angry"),
        (Self::Scared, "Scared"),
        (Self::Surprised, "Surprised"),
        (Self::Thoughtful, "Thoughtful"),
    ];
}

/// Where the speaking actor stands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorPosition {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl StringTag for ActorPosition {
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::None, "None"),
        (Self::Left, "Left"),
        (Self::Center, "Center"),
        (Self::Right, "Right"),
    ];
}

/// A language a dialogue can be authored in.
///
/// Variants are declared in load order: the first language found on disk
/// fixes the dialogue's line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DialogueLanguage {
    English,
    #[default]
    Russian,
}

impl DialogueLanguage {
    pub const ALL: [DialogueLanguage; 2] = [Self::English, Self::Russian];

    /// Resource directory code, e.g. "en".
    pub fn code(&self) -> &'static str {
        self.as_tag()
    }
}

impl StringTag for DialogueLanguage {
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::English, "en"),
        (Self::Russian, "ru"),
        (Self::English, "English"),
        (Self::Russian, "Russian"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_type_tags() {
        assert_eq!(DialogueLineType::from_tag("thought"), Some(DialogueLineType::Thought));
        assert_eq!(DialogueLineType::from_tag("MachineType"), Some(DialogueLineType::Machine));
        assert_eq!(DialogueLineType::from_tag("machine"), Some(DialogueLineType::Machine));
        assert_eq!(DialogueLineType::from_tag_or_default("shout"), DialogueLineType::None);
        assert_eq!(DialogueLineType::Machine.as_tag(), "MachineType");
    }

    #[test]
    fn attribute_keys() {
        assert_eq!(DialogueAttribute::from_key("speaker"), Some(DialogueAttribute::Speaker));
        assert_eq!(DialogueAttribute::from_key(" FEELSLIKE "), Some(DialogueAttribute::FeelsLike));
        assert_eq!(DialogueAttribute::from_key("mood"), None);
        assert_eq!(DialogueAttribute::from_key("None"), None);
        assert_eq!(DialogueAttribute::Position.key(), "Position");
    }

    #[test]
    fn enumerated_attributes() {
        assert!(DialogueAttribute::Emotion.is_enumerated());
        assert!(!DialogueAttribute::Speaker.is_enumerated());
        assert!(!DialogueAttribute::FeelsLike.is_enumerated());
    }

    #[test]
    fn language_codes() {
        assert_eq!(DialogueLanguage::English.code(), "en");
        assert_eq!(DialogueLanguage::Russian.code(), "ru");
        assert_eq!(DialogueLanguage::from_tag("RU"), Some(DialogueLanguage::Russian));
        assert_eq!(DialogueLanguage::from_tag("english"), Some(DialogueLanguage::English));
        assert!(DialogueLanguage::English < DialogueLanguage::Russian);
    }

    #[test]
    fn emotion_and_position_defaults() {
        assert_eq!(ActorEmotion::default(), ActorEmotion::None);
        assert_eq!(ActorPosition::from_tag_or_default("behind"), ActorPosition::None);
        assert_eq!(ActorPosition::from_tag("right"), Some(ActorPosition::Right));
    }
}
