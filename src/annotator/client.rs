use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::AnnotationService;
use crate::models::NlpToken;

/// Model the annotation service is asked to load by default
pub const DEFAULT_MODEL: &str = "de_core_news_md";

/// Configuration for the NLP annotation service
#[derive(Debug, Clone)]
pub struct NlpConfig {
    /// Annotation endpoint (from NLP_ENDPOINT env var)
    pub endpoint: String,
    /// Language model to annotate with (from NLP_MODEL, optional)
    pub model: String,
}

impl NlpConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("NLP_ENDPOINT")
            .context("NLP_ENDPOINT environment variable not set")?;
        let model = std::env::var("NLP_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self { endpoint, model })
    }

    pub fn new(endpoint: String, model: String) -> Self {
        Self { endpoint, model }
    }
}

/// HTTP client for a service wrapping the NLP pipeline
///
/// The service receives `{"model": ..., "text": ...}` and answers with
/// `{"tokens": [...]}`, one entry per token including punctuation.
pub struct NlpClient {
    client: Client,
    config: NlpConfig,
}

impl NlpClient {
    pub fn new(config: NlpConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Annotate one sentence
    pub async fn annotate(&self, text: &str) -> Result<Vec<NlpToken>> {
        let request = AnnotateRequest {
            model: &self.config.model,
            text,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to annotation service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Annotation service error: {} - {}", status, body);
        }

        let response: AnnotateResponse = response
            .json()
            .await
            .context("Failed to parse annotation service response")?;

        Ok(response.tokens)
    }
}

impl AnnotationService for NlpClient {
    fn model(&self) -> &str {
        NlpClient::model(self)
    }

    fn fetch(&self, text: &str) -> impl Future<Output = Result<Vec<NlpToken>>> {
        self.annotate(text)
    }
}

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    tokens: Vec<NlpToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let request = AnnotateRequest {
            model: DEFAULT_MODEL,
            text: "Lauf, Forrest!",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "de_core_news_md", "text": "Lauf, Forrest!"})
        );
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "tokens": [
                {"text": "Lauf", "pos": "VERB", "tag": "VVIMP", "dep": "ROOT", "head": "Lauf",
                 "children": [",", "Forrest", "!"], "lemma": "laufen", "is_stop": false,
                 "vector": [0.1, 0.2]},
                {"text": ",", "pos": "PUNCT", "tag": "$,", "dep": "punct", "head": "Lauf",
                 "lemma": ",", "is_stop": false, "vector": [0.0, 0.0]}
            ]
        }"#;

        let response: AnnotateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tokens.len(), 2);
        assert_eq!(response.tokens[0].dependency_descriptor(), "ROOT;LAUF;Forrest");
        assert!(response.tokens[1].is_punct());
    }

    #[test]
    fn test_client_keeps_model() {
        let client = NlpClient::new(NlpConfig::new(
            "http://127.0.0.1:8080/annotate".to_string(),
            "de_core_news_sm".to_string(),
        ));
        assert_eq!(client.model(), "de_core_news_sm");
    }
}
