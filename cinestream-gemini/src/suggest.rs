use serde_json::{Value, json};

use crate::{Client, ClientResult};

/// Metadata suggested for a title. Every field is advisory and may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    /// A short description of the title.
    pub description: Option<String>,
    /// A suggested category.
    pub category: Option<String>,
    /// A suggested rating.
    pub rating: Option<String>,
    /// The release year.
    pub year: Option<String>,
}
impl Suggestion {
    /// Extracts a suggestion from the model's JSON output.
    ///
    /// Missing or blank fields become `None`; numbers are rendered as strings.
    /// Text that isn't a JSON object yields an empty suggestion.
    pub fn from_model_output(text: &str) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(text.trim()) else {
            return Self::default();
        };
        let field = |name: &str| -> Option<String> {
            let value = match fields.get(name)? {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            (!value.is_empty()).then_some(value)
        };
        Self {
            description: field("description"),
            category: field("category"),
            rating: field("rating"),
            year: field("year"),
        }
    }

    /// Whether the suggestion carries nothing usable.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.rating.is_none()
            && self.year.is_none()
    }
}

/// Metadata suggestions.
impl Client {
    /// Suggest a description and category (and, if known, rating and year) for
    /// the given title. `categories` is offered to the model as the preferred
    /// set of categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports an error.
    pub async fn suggest(&self, title: &str, categories: &[String]) -> ClientResult<Suggestion> {
        let text = self
            .generate_json(&suggestion_prompt(title, categories), suggestion_schema())
            .await?;
        Ok(Suggestion::from_model_output(&text))
    }
}

fn suggestion_prompt(title: &str, categories: &[String]) -> String {
    let mut prompt = format!(
        "Provide a brief movie description and suggest a category for the movie titled: \"{title}\"."
    );
    if !categories.is_empty() {
        prompt.push_str(&format!(
            " Choose the category from this list: {}.",
            categories.join(", ")
        ));
    }
    prompt
}

fn suggestion_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "category": { "type": "STRING" },
            "rating": { "type": "STRING" },
            "year": { "type": "STRING" }
        },
        "required": ["description", "category"]
    })
}
