use serde::Deserialize;
use serde_json::json;

use docqa_core::error::ProviderError;

use super::EmbeddingProvider;
use crate::provider::ProviderClient;

/// `POST /embeddings` against an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiEmbeddings {
    client: ProviderClient,
}

impl OpenAiEmbeddings {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

impl EmbeddingProvider for OpenAiEmbeddings {
    fn embed_batch(&self, model: &str, input: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let body = json!({ "model": model, "input": input });
        let value = self.client.post_json("/embeddings", body)?;

        let resp: EmbeddingsResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::MalformedResponse(format!("unexpected embeddings shape: {e}"))
        })?;

        // Rows are positional; the caller checks the count against its input.
        Ok(resp.data.into_iter().map(|row| row.embedding).collect())
    }
}
