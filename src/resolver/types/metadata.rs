use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language code of the translation used as display fallback
pub const ACTIVE_TRANSLATION_LANGUAGE: &str = "en";

/// Localized variant of a title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Translation {
    /// ISO 639-1 language code
    pub language: String,
    /// ISO 3166-1 region code
    pub region: Option<String>,
    /// Native language name (e.g., "Français")
    pub name: Option<String>,
    /// English language name (e.g., "French")
    pub english_name: Option<String>,
    /// Localized title (movie title or tv name)
    pub title: Option<String>,
    /// Localized overview
    pub overview: Option<String>,
}

impl Translation {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set localized title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// First translation whose language code equals `language`
pub fn find_translation<'a>(translations: &'a [Translation], language: &str) -> Option<&'a Translation> {
    translations.iter().find(|t| t.language == language)
}

/// The active (English) translation, if any
pub fn active_translation(translations: &[Translation]) -> Option<&Translation> {
    find_translation(translations, ACTIVE_TRANSLATION_LANGUAGE)
}

/// Aggregate rating from the rating service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Number of votes
    pub count: u64,
    /// Score (0-10 scale)
    pub score: f64,
}

/// Fixed set of video categories the catalog uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VideoCategory {
    Trailer,
    Teaser,
    Clip,
    #[serde(rename = "Behind the Scenes")]
    BehindTheScenes,
    Bloopers,
    Featurette,
    #[serde(rename = "Opening Credits")]
    OpeningCredits,
}

impl VideoCategory {
    /// All categories, in display order
    pub const ALL: [Self; 7] = [
        Self::Trailer,
        Self::Teaser,
        Self::Clip,
        Self::BehindTheScenes,
        Self::Bloopers,
        Self::Featurette,
        Self::OpeningCredits,
    ];

    /// Label used by the catalog's `type` field
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trailer => "Trailer",
            Self::Teaser => "Teaser",
            Self::Clip => "Clip",
            Self::BehindTheScenes => "Behind the Scenes",
            Self::Bloopers => "Bloopers",
            Self::Featurette => "Featurette",
            Self::OpeningCredits => "Opening Credits",
        }
    }

    /// Exact, case-sensitive match against the category labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Category at a display index (as used by tabbed category pickers)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Video entry as listed by the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVideo {
    /// Platform video ID
    pub key: String,
    pub name: Option<String>,
    /// Hosting site (e.g., "YouTube")
    pub site: Option<String>,
    /// Free-text category label from the catalog
    #[serde(rename = "type")]
    pub kind: String,
    pub official: bool,
    pub published_at: Option<String>,
}

impl RawVideo {
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Category of this entry, `None` for labels outside the fixed set
    pub fn category(&self) -> Option<VideoCategory> {
        VideoCategory::from_label(&self.kind)
    }
}

/// Thumbnail URLs in the sizes the platform provides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Option<String>,
    pub medium: Option<String>,
    pub high: Option<String>,
}

/// Video metadata enriched from the video platform
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDetails {
    /// Platform video ID (same as `RawVideo::key`)
    pub id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnails: Thumbnails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in VideoCategory::ALL {
            assert_eq!(VideoCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        assert_eq!(VideoCategory::from_label("trailer"), None);
        assert_eq!(VideoCategory::from_label("Behind The Scenes"), None);
        assert_eq!(VideoCategory::from_label("Recap"), None);
    }

    #[test]
    fn test_category_from_index() {
        assert_eq!(VideoCategory::from_index(0), Some(VideoCategory::Trailer));
        assert_eq!(VideoCategory::from_index(6), Some(VideoCategory::OpeningCredits));
        assert_eq!(VideoCategory::from_index(7), None);
    }

    #[test]
    fn test_active_translation_takes_first_english() {
        let translations = vec![
            Translation::new("fr").with_title("Le Titre"),
            Translation::new("en").with_title("First"),
            Translation::new("en").with_title("Second"),
        ];

        let active = active_translation(&translations).unwrap();
        assert_eq!(active.title.as_deref(), Some("First"));
        assert!(active_translation(&translations[..1]).is_none());
    }
}
