use std::time::Duration;

/// Width of fallback embeddings; a store built offline always has this many
/// dimensions.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Words per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 900;

/// Words shared between consecutive chunks.
pub const DEFAULT_OVERLAP: usize = 150;

/// Sources retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;

pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_GEN_MODEL: &str = "gpt-4o-mini";

/// Upper bound on any single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Engine-wide knobs, passed explicitly into constructors.
///
/// Core logic never reads ambient process state; `from_env` exists for the
/// outermost entry point only.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub embedding_dim: usize,
    pub embed_model: String,
    pub gen_model: String,
    pub provider_timeout: Duration,
    /// Skip the external provider even when one is configured. Keeps runs
    /// deterministic and network-free.
    pub force_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            force_fallback: false,
        }
    }
}

impl EngineConfig {
    /// Resolve overrides from the process environment.
    ///
    /// Recognized variables: `EMBED_MODEL`, `GEN_MODEL`, `EMBED_DIM`,
    /// `PROVIDER_TIMEOUT_SECS`, `FORCE_FALLBACK` (`1` or `true`). Call this
    /// at the outermost entry point; everything below takes the struct.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_nonempty("EMBED_MODEL") {
            cfg.embed_model = v;
        }
        if let Some(v) = env_nonempty("GEN_MODEL") {
            cfg.gen_model = v;
        }
        if let Some(dim) = env_nonempty("EMBED_DIM").and_then(|v| v.parse::<usize>().ok()) {
            if dim > 0 {
                cfg.embedding_dim = dim;
            }
        }
        if let Some(secs) =
            env_nonempty("PROVIDER_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            if secs > 0 {
                cfg.provider_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(v) = env_nonempty("FORCE_FALLBACK") {
            cfg.force_fallback = v == "1" || v.eq_ignore_ascii_case("true");
        }
        cfg
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.embedding_dim, DEFAULT_EMBEDDING_DIM);
        assert_eq!(cfg.embed_model, DEFAULT_EMBED_MODEL);
        assert_eq!(cfg.gen_model, DEFAULT_GEN_MODEL);
        assert_eq!(cfg.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
        assert!(!cfg.force_fallback);
    }
}
