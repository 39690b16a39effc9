//! Downstream answer generation
//!
//! Turns retrieved catalog passages into a prose answer via an
//! Ollama-compatible generation API. Only the HTTP layer calls this,
//! and only on `Retrieved` results; no answer is ever produced without
//! retrieved context behind it.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use catalog_agent_config::GenerationConfig;
use catalog_agent_core::ScoredDocument;

use crate::ServerError;

/// Request to the generation API
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from the generation API
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for the external text-generation service
pub struct AnswerGenerator {
    client: Client,
    config: GenerationConfig,
}

impl AnswerGenerator {
    /// Create a generator from settings
    pub fn new(config: GenerationConfig) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServerError::Generation(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Generate a prose answer grounded in the retrieved passages
    pub async fn generate(
        &self,
        query: &str,
        documents: &[ScoredDocument],
    ) -> Result<String, ServerError> {
        let mut context = String::new();
        for (i, scored) in documents.iter().enumerate() {
            context.push_str(&format!("[{}] {}\n", i + 1, scored.document.content));
        }

        let prompt = format!(
            "You are a telecom customer-care assistant. Answer the question using \
             only the catalog passages below. Reply in the language of the question. \
             If the passages do not answer it, say you cannot help.\n\n\
             Passages:\n{}\nQuestion: {}\nAnswer:",
            context, query
        );

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.config.endpoint);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServerError::Generation(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Generation(format!(
                "Generation API failed: {} - {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            ServerError::Generation(format!("Failed to parse generation response: {}", e))
        })?;

        Ok(generate_response.response.trim().to_string())
    }
}
