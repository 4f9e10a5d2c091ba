pub mod openai;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use sha2::{Digest, Sha256};

use docqa_core::config::EngineConfig;
use docqa_core::error::ProviderError;

use crate::similarity::l2_normalize;

/// Batch embedding backend. Implementations return one row per input, in
/// input order.
pub trait EmbeddingProvider {
    fn embed_batch(&self, model: &str, input: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}

/// Deterministic pseudo-embedding for offline runs.
///
/// The text's SHA-256 digest seeds the generator, so equal text always maps
/// to the same unit vector and any drift in the text moves it. Useless for
/// semantics, ideal for exercising the pipeline without credentials.
pub fn hash_vec(text: &str, dim: usize) -> Vec<f32> {
    let seed: [u8; 32] = Sha256::digest(text.as_bytes()).into();
    let mut rng = StdRng::from_seed(seed);
    let mut v: Vec<f32> = (0..dim).map(|_| rng.random::<f32>()).collect();
    l2_normalize(&mut v);
    v
}

/// Produces embeddings, never errors.
///
/// When a provider is configured it is tried first; any failure or
/// malformed batch is logged and the hash fallback takes over for the
/// whole batch. Callers can rely on getting exactly one row per input.
pub struct Embedder {
    dim: usize,
    model: String,
    force_fallback: bool,
    provider: Option<Box<dyn EmbeddingProvider>>,
}

impl Embedder {
    pub fn new(config: &EngineConfig, provider: Option<Box<dyn EmbeddingProvider>>) -> Self {
        Self {
            dim: config.embedding_dim,
            model: config.embed_model.clone(),
            force_fallback: config.force_fallback,
            provider,
        }
    }

    /// An embedder that only ever uses the hash fallback.
    pub fn offline(dim: usize) -> Self {
        Self {
            dim,
            model: String::new(),
            force_fallback: true,
            provider: None,
        }
    }

    /// Fallback dimension. Provider rows keep their native width, which may
    /// differ from this.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
        if texts.is_empty() {
            return Vec::new();
        }

        if !self.force_fallback {
            if let Some(provider) = &self.provider {
                match provider.embed_batch(&self.model, texts) {
                    Ok(rows) => match prepare_rows(rows, texts.len()) {
                        Ok(rows) => return rows,
                        Err(reason) => {
                            tracing::warn!(reason, "provider batch unusable; using hash fallback");
                        }
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "provider embed failed; using hash fallback");
                    }
                }
            }
        }

        texts.iter().map(|t| hash_vec(t, self.dim)).collect()
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let input = [text.to_string()];
        self.embed(&input)
            .pop()
            .unwrap_or_else(|| hash_vec(text, self.dim))
    }
}

/// Validate a provider batch and normalize every row. All-or-nothing: one
/// bad row discards the batch.
fn prepare_rows(mut rows: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>, &'static str> {
    if rows.len() != expected {
        return Err("row count does not match input count");
    }
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    if width == 0 {
        return Err("provider returned empty rows");
    }
    if rows.iter().any(|r| r.len() != width) {
        return Err("provider returned ragged rows");
    }
    for row in rows.iter_mut() {
        l2_normalize(row);
    }
    Ok(rows)
}
