//! Static string tables for enumerations read from authoring text.

/// An enumeration with a fixed table of authoring tags.
///
/// A variant may appear in the table more than once; the first entry is
/// its canonical tag and later entries are accepted aliases.
pub trait StringTag: Copy + PartialEq + Default + 'static {
    const TABLE: &'static [(Self, &'static str)];

    /// Look up a variant by tag, ignoring case and surrounding whitespace.
    fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        Self::TABLE
            .iter()
            .find(|(_, text)| text.eq_ignore_ascii_case(tag))
            .map(|(variant, _)| *variant)
    }

    fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    /// Canonical tag text for this variant.
    fn as_tag(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _)| variant == self)
            .map(|(_, text)| *text)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    enum Weather {
        #[default]
        Clear,
        Rain,
        Fog,
    }

    impl StringTag for Weather {
        const TABLE: &'static [(Self, &'static str)] = &[
            (Self::Clear, "clear"),
            (Self::Rain, "rain"),
            (Self::Rain, "drizzle"),
            (Self::Fog, "fog"),
        ];
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Weather::from_tag("RAIN"), Some(Weather::Rain));
        assert_eq!(Weather::from_tag("  Fog "), Some(Weather::Fog));
    }

    #[test]
    fn aliases_resolve_to_same_variant() {
        assert_eq!(Weather::from_tag("drizzle"), Some(Weather::Rain));
        assert_eq!(Weather::Rain.as_tag(), "rain");
    }

    #[test]
    fn unknown_and_blank_tags() {
        assert_eq!(Weather::from_tag("snow"), None);
        assert_eq!(Weather::from_tag("   "), None);
        assert_eq!(Weather::from_tag_or_default("snow"), Weather::Clear);
    }
}
