use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Persisted per-chunk record. Row `i` of the vector artifact pairs with
/// metadata entry `i`; the store checks that pairing at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub id: String,
    /// Path relative to the ingestion root, so stores move across machines.
    pub source: String,
    pub chunk: String,
    pub begin: usize,
    pub end: usize,
}

/// One ranked source in a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub rank: usize,
    pub score: f32,
    pub source: String,
    pub begin: usize,
    pub end: usize,
}

/// The structured answer handed to front ends. Ranks are contiguous from 1
/// in descending score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

const CHUNK_ID_LEN: usize = 16;

/// Deterministic chunk id derived from the source path and begin offset, so
/// re-ingesting unchanged input reproduces identical ids.
pub fn chunk_id(source: &str, begin: usize) -> String {
    let digest = sha256_hex(&format!("v1|{source}|{begin}"));
    digest[..CHUNK_ID_LEN].to_string()
}

pub fn sha256_hex(input: &str) -> String {
    sha256_hex_bytes(input.as_bytes())
}

pub fn sha256_hex_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}
