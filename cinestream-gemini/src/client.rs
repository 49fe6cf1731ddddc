#[derive(Debug)]
/// An error that can occur when interacting with the client.
pub enum ClientError {
    /// An error that occurred when making a request.
    ReqwestError(reqwest::Error),
    /// An error that occurred when deserializing a response.
    DeserializationError(serde_json::Error),
    /// The API returned an error.
    ApiError {
        /// The HTTP-style error code.
        code: i32,
        /// The error message.
        message: Option<String>,
    },
    /// The API answered, but without any generated text.
    EmptyResponse,
}
impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ReqwestError(e) => write!(f, "Reqwest error: {e}"),
            ClientError::DeserializationError(e) => write!(f, "Deserialization error: {e}"),
            ClientError::ApiError { code, message } => {
                write!(f, "Gemini error: {code}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            ClientError::EmptyResponse => write!(f, "Gemini returned no content"),
        }
    }
}
impl std::error::Error for ClientError {}
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::ReqwestError(e)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DeserializationError(e)
    }
}
/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// A client for the Gemini API.
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) client: reqwest::Client,
}
impl Client {
    /// The default API endpoint.
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    /// The default model.
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    /// Create a new client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The model requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }
}
