use crate::{Entry, EntryId, UNCATEGORIZED};

/// How the category of a draft was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    /// One of the categories offered by the picker.
    Known(String),
    /// A category typed in by the user. Blank resolves to [`UNCATEGORIZED`].
    Custom(String),
}
impl CategoryChoice {
    /// The category name that will be stored on the entry.
    pub fn resolve(&self) -> String {
        let name = match self {
            CategoryChoice::Known(name) | CategoryChoice::Custom(name) => name.trim(),
        };
        if name.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            name.to_string()
        }
    }
}

/// The user-supplied fields of an entry, before it has an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// The display title. Required.
    pub title: String,
    /// The URL the video is played from. Required.
    pub playback_url: String,
    /// The poster image URL. A placeholder is derived from the title if blank.
    pub poster_url: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// The category
    pub category: CategoryChoice,
    /// The release year
    pub year: Option<String>,
    /// The rating
    pub rating: Option<String>,
}

/// A required field was missing from a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The title was empty.
    MissingTitle,
    /// The playback URL was empty.
    MissingPlaybackUrl,
}
impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingTitle => write!(f, "A title is required"),
            ValidationError::MissingPlaybackUrl => write!(f, "A playback URL is required"),
        }
    }
}
impl std::error::Error for ValidationError {}

impl EntryDraft {
    /// Checks that the required fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.playback_url.trim().is_empty() {
            return Err(ValidationError::MissingPlaybackUrl);
        }
        Ok(())
    }

    /// Builds the entry this draft describes under the given ID.
    ///
    /// Does not validate; callers are expected to have called [`Self::validate`].
    pub fn into_entry(self, id: EntryId) -> Entry {
        let title = self.title.trim().to_string();
        let poster_url = match self.poster_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => placeholder_poster_url(&title),
        };
        Entry {
            id,
            playback_url: self.playback_url.trim().to_string(),
            poster_url,
            description: self.description,
            category: self.category.resolve(),
            year: self.year,
            rating: self.rating,
            title,
        }
    }
}

/// The poster used for entries that don't specify one. Deterministic in the title.
pub fn placeholder_poster_url(title: &str) -> String {
    let seed: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
    format!("https://picsum.photos/seed/{seed}/1280/720")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, playback_url: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            playback_url: playback_url.to_string(),
            poster_url: None,
            description: None,
            category: CategoryChoice::Known("Drama".to_string()),
            year: None,
            rating: None,
        }
    }

    #[test]
    fn validation_requires_title_and_url() {
        assert_eq!(
            draft("", "https://youtu.be/x").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            draft("X", "   ").validate(),
            Err(ValidationError::MissingPlaybackUrl)
        );
        assert_eq!(draft("X", "https://youtu.be/x").validate(), Ok(()));
    }

    #[test]
    fn blank_custom_category_falls_back_to_uncategorized() {
        assert_eq!(CategoryChoice::Custom("  ".to_string()).resolve(), UNCATEGORIZED);
        assert_eq!(CategoryChoice::Custom(" Anime ".to_string()).resolve(), "Anime");
        assert_eq!(CategoryChoice::Known("Drama".to_string()).resolve(), "Drama");
    }

    #[test]
    fn blank_poster_gets_placeholder() {
        let mut d = draft("Blade Runner", "https://youtu.be/x");
        d.poster_url = Some(" ".to_string());
        let entry = d.into_entry(EntryId::from("7"));
        assert_eq!(
            entry.poster_url,
            "https://picsum.photos/seed/Blade+Runner/1280/720"
        );
        assert_eq!(entry.poster_url, placeholder_poster_url("Blade Runner"));
    }

    #[test]
    fn explicit_poster_is_kept() {
        let mut d = draft("X", "https://youtu.be/x");
        d.poster_url = Some("https://img.example/x.png".to_string());
        assert_eq!(
            d.into_entry(EntryId::from("1")).poster_url,
            "https://img.example/x.png"
        );
    }
}
