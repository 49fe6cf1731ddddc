use serde::{Deserialize, Serialize};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the Gemini API.
impl Client {
    /// Ask the model for JSON output matching `response_schema`, returning the
    /// raw generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports an error, or the
    /// response contains no text.
    pub async fn generate_json(
        &self,
        prompt: &str,
        response_schema: serde_json::Value,
    ) -> ClientResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            }),
        };

        let bytes = self.request_raw(&body).await?;
        Self::parse_response(&bytes)
    }

    async fn request_raw(&self, body: &GenerateContentRequest) -> ClientResult<Vec<u8>> {
        let request = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .body(serde_json::to_vec(body)?);

        Ok(request.send().await?.bytes().await?.into())
    }

    pub(crate) fn parse_response(bytes: &[u8]) -> ClientResult<String> {
        let response: Response = serde_json::from_slice(bytes)?;

        if let Some(error) = response.error {
            return Err(ClientError::ApiError {
                code: error.code,
                message: error.message,
            });
        }

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ResponseError>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
/// An error that occurred when making a request.
struct ResponseError {
    /// The error code.
    code: i32,
    /// The error message.
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candidate_text() {
        let body = br#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"description\":"}, {"text": "\"A heist.\"}"}]
                }
            }]
        }"#;
        assert_eq!(
            Client::parse_response(body).unwrap(),
            r#"{"description":"A heist."}"#
        );
    }

    #[test]
    fn surfaces_api_errors() {
        let body = br#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        match Client::parse_response(body) {
            Err(ClientError::ApiError { code, message }) => {
                assert_eq!(code, 403);
                assert_eq!(message.as_deref(), Some("API key not valid"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(matches!(
            Client::parse_response(br#"{"candidates": []}"#),
            Err(ClientError::EmptyResponse)
        ));
        assert!(matches!(
            Client::parse_response(b"not json"),
            Err(ClientError::DeserializationError(_))
        ));
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("hi".to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
