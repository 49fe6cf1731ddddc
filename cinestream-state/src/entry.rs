use serde::{Deserialize, Serialize};

/// An entry ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);
impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

/// A catalogued video, as `cinestream` cares about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The entry ID; assigned at creation and never changed afterwards
    pub id: EntryId,
    /// The display title
    pub title: String,
    /// The URL the video is played from
    pub playback_url: String,
    /// The poster image URL
    pub poster_url: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The category the entry is filed under
    pub category: String,
    /// The release year, for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// The rating, for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}
impl Entry {
    /// The description, or an empty string if there isn't one.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: Option<&str>) -> Entry {
        Entry {
            id: EntryId::from("1"),
            title: "Inception".to_string(),
            playback_url: "https://www.youtube.com/watch?v=8hP9D6kZseM".to_string(),
            poster_url: "https://example.com/poster.jpg".to_string(),
            description: description.map(str::to_string),
            category: "Sci-Fi".to_string(),
            year: Some("2010".to_string()),
            rating: None,
        }
    }

    #[test]
    fn absent_and_empty_fields_survive_serialization() {
        let absent = entry(None);
        let json = serde_json::to_string(&absent).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("rating"));
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), absent);

        let empty = entry(Some(""));
        let json = serde_json::to_string(&empty).unwrap();
        assert!(json.contains("\"description\":\"\""));
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), empty);
    }

    #[test]
    fn fields_use_camel_case() {
        let json = serde_json::to_string(&entry(None)).unwrap();
        assert!(json.contains("\"playbackUrl\""));
        assert!(json.contains("\"posterUrl\""));
        assert!(json.contains("\"id\":\"1\""));
    }
}
