use reqwest::blocking::Client;

use crate::config::DashboardConfig;

use super::error::IntelError;
use super::request::GenerateContentRequest;
use super::response::GenerateContentResponse;
use super::GenerativeModel;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Thin blocking HTTP client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &DashboardConfig, api_key: Option<String>) -> Result<Self, IntelError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Client using the credential from `GEMINI_API_KEY` / `API_KEY`.
    pub fn from_env(config: &DashboardConfig) -> Result<Self, IntelError> {
        Self::new(config, DashboardConfig::api_key_from_env())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, IntelError> {
        let api_key = self.api_key.as_deref().ok_or(IntelError::MissingCredential)?;

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(IntelError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let config = DashboardConfig {
            api_base_url: "https://example.test/".to_string(),
            ..DashboardConfig::default()
        };
        let client = GeminiClient::new(&config, Some("key".to_string())).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn missing_credential_fails_before_any_request() {
        let client = GeminiClient::new(&DashboardConfig::default(), Some("  ".to_string())).unwrap();
        assert!(!client.has_credential());
        let request = GenerateContentRequest::structured("hi".to_string(), serde_json::json!({}));
        let result = client.generate_content("gemini-2.5-flash", &request);
        assert!(matches!(result, Err(IntelError::MissingCredential)));
    }
}
