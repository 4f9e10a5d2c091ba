use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use docqa_core::config::DEFAULT_EMBEDDING_DIM;
use docqa_core::error::StoreError;
use docqa_core::model::{sha256_hex_bytes, ChunkMeta};

use crate::similarity::dot;

pub const STORE_VERSION: u32 = 1;

const VECTORS_FILE: &str = "vectors.json";
const META_FILE: &str = "meta.json";
const MANIFEST_FILE: &str = "manifest.json";

/// Commit marker for a store directory. Written after the data artifacts
/// and carrying their checksums, so its presence means the set on disk is
/// complete and every artifact belongs to the same save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    pub version: u32,
    pub dim: usize,
    pub chunk_count: usize,
    pub vectors_sha256: String,
    pub meta_sha256: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub score: f32,
    pub meta: ChunkMeta,
}

/// In-memory vector index with JSON persistence.
///
/// `vectors[i]` embeds the chunk described by `meta[i]`; the two arrays are
/// kept index-aligned at all times. Search is a linear scan, which is the
/// right trade at the corpus sizes this serves.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    dim: usize,
    vectors: Vec<Vec<f32>>,
    meta: Vec<ChunkMeta>,
}

impl VectorStore {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
            meta: Vec::new(),
        }
    }

    /// Assemble a store from aligned rows. Callers keep one vector per meta
    /// entry; ingestion builds rows that way by construction, and debug
    /// builds assert it rather than letting a misaligned pair surface as an
    /// index panic deep inside `search`.
    pub fn from_rows(dim: usize, vectors: Vec<Vec<f32>>, meta: Vec<ChunkMeta>) -> Self {
        debug_assert_eq!(vectors.len(), meta.len(), "one vector row per meta entry");
        Self { dim, vectors, meta }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    pub fn meta(&self) -> &[ChunkMeta] {
        &self.meta
    }

    fn vectors_path(dir: &Path) -> PathBuf {
        dir.join(VECTORS_FILE)
    }

    fn meta_path(dir: &Path) -> PathBuf {
        dir.join(META_FILE)
    }

    fn manifest_path(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Load a persisted store.
    ///
    /// A directory with none of the artifacts is a valid empty store, not
    /// an error; that is the normal state before the first ingest. Anything
    /// between "all present and consistent" and "all absent" is corruption.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let vectors_path = Self::vectors_path(dir);
        let meta_path = Self::meta_path(dir);
        let manifest_path = Self::manifest_path(dir);

        let present = [&vectors_path, &meta_path, &manifest_path]
            .into_iter()
            .filter(|p| p.exists())
            .count();
        if present == 0 {
            return Ok(Self::new(DEFAULT_EMBEDDING_DIM));
        }
        if present < 3 {
            return Err(StoreError::corrupt(
                dir,
                "partial artifact set; expected vectors.json, meta.json and manifest.json",
            ));
        }

        let manifest: StoreManifest = read_json(&manifest_path)?;
        if manifest.version != STORE_VERSION {
            return Err(StoreError::corrupt(
                &manifest_path,
                format!("unsupported store version {}", manifest.version),
            ));
        }

        let vectors_bytes = fs::read(&vectors_path).map_err(|e| StoreError::io(&vectors_path, e))?;
        let meta_bytes = fs::read(&meta_path).map_err(|e| StoreError::io(&meta_path, e))?;

        // Checksums bind the data artifacts to the manifest they were
        // committed with. An artifact left behind by a different save fails
        // here even when its row count happens to line up.
        if sha256_hex_bytes(&vectors_bytes) != manifest.vectors_sha256 {
            return Err(StoreError::corrupt(
                &vectors_path,
                "checksum does not match manifest",
            ));
        }
        if sha256_hex_bytes(&meta_bytes) != manifest.meta_sha256 {
            return Err(StoreError::corrupt(
                &meta_path,
                "checksum does not match manifest",
            ));
        }

        let vectors: Vec<Vec<f32>> = parse_json(&vectors_path, &vectors_bytes)?;
        let meta: Vec<ChunkMeta> = parse_json(&meta_path, &meta_bytes)?;

        if vectors.len() != meta.len() {
            return Err(StoreError::corrupt(
                dir,
                format!(
                    "vector rows ({}) do not match meta rows ({})",
                    vectors.len(),
                    meta.len()
                ),
            ));
        }
        if manifest.chunk_count != meta.len() {
            return Err(StoreError::corrupt(
                &manifest_path,
                format!(
                    "manifest chunk_count {} does not match stored rows {}",
                    manifest.chunk_count,
                    meta.len()
                ),
            ));
        }

        let dim = if vectors.is_empty() {
            manifest.dim
        } else {
            vectors[0].len()
        };
        if vectors.iter().any(|v| v.len() != dim) {
            return Err(StoreError::corrupt(
                &vectors_path,
                "vector rows have inconsistent widths",
            ));
        }
        if !vectors.is_empty() && manifest.dim != dim {
            return Err(StoreError::corrupt(
                &manifest_path,
                format!("manifest dim {} does not match vector width {dim}", manifest.dim),
            ));
        }

        tracing::debug!(chunks = meta.len(), dim, "store loaded");
        Ok(Self { dim, vectors, meta })
    }

    /// Persist all three artifacts, manifest last.
    ///
    /// Each file lands via tmp-then-rename, so readers of any single
    /// artifact never observe a torn write, and the manifest records the
    /// checksums of the exact bodies it commits.
    pub fn save(&self, dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let vectors_path = Self::vectors_path(dir);
        let meta_path = Self::meta_path(dir);
        let manifest_path = Self::manifest_path(dir);

        let vectors_body = encode_json(&vectors_path, &self.vectors, false)?;
        let meta_body = encode_json(&meta_path, &self.meta, true)?;
        write_atomic(&vectors_path, &vectors_body)?;
        write_atomic(&meta_path, &meta_body)?;

        let manifest = StoreManifest {
            version: STORE_VERSION,
            dim: self.dim,
            chunk_count: self.meta.len(),
            vectors_sha256: sha256_hex_bytes(vectors_body.as_bytes()),
            meta_sha256: sha256_hex_bytes(meta_body.as_bytes()),
            updated_at: now_rfc3339(),
        };
        let manifest_body = encode_json(&manifest_path, &manifest, true)?;
        write_atomic(&manifest_path, &manifest_body)?;

        tracing::debug!(chunks = self.meta.len(), dir = %dir.display(), "store artifacts written");
        Ok(())
    }

    /// Top-`k` rows by dot product against `query`.
    ///
    /// Rows are unit vectors, so the dot product is cosine similarity.
    /// Ties keep the earlier insertion index first, which makes results
    /// reproducible across runs.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        if k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .map(|v| dot(query, v))
            .enumerate()
            .collect();
        // Stable ordering: score desc, then insertion index asc.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| SearchHit {
                score,
                meta: self.meta[i].clone(),
            })
            .collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    parse_json(path, &bytes)
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::corrupt(path, format!("invalid json: {e}")))
}

fn encode_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<String, StoreError> {
    let body = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    body.map_err(|e| StoreError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn write_atomic(path: &Path, body: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, begin: usize) -> ChunkMeta {
        ChunkMeta {
            id: id.to_string(),
            source: "docs/a.txt".to_string(),
            chunk: format!("chunk {id}"),
            begin,
            end: begin + 7,
        }
    }

    #[test]
    fn search_orders_by_score_then_insertion_index() {
        let store = VectorStore::from_rows(
            2,
            vec![
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![1.0, 0.0],
            ],
            vec![meta("a", 0), meta("b", 10), meta("c", 20)],
        );

        let hits = store.search(&[1.0, 0.0], 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].meta.id, "b");
        assert_eq!(hits[1].meta.id, "c");
        assert_eq!(hits[2].meta.id, "a");
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn k_zero_and_empty_store_return_nothing() {
        let empty = VectorStore::new(4);
        assert!(empty.search(&[1.0, 0.0, 0.0, 0.0], 5).is_empty());

        let store = VectorStore::from_rows(2, vec![vec![1.0, 0.0]], vec![meta("a", 0)]);
        assert!(store.search(&[1.0, 0.0], 0).is_empty());
    }

    #[test]
    fn k_larger_than_store_returns_all_rows() {
        let store = VectorStore::from_rows(
            2,
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![meta("a", 0), meta("b", 10)],
        );
        assert_eq!(store.search(&[1.0, 0.0], 50).len(), 2);
    }

    #[test]
    #[should_panic(expected = "one vector row per meta entry")]
    fn from_rows_rejects_misaligned_inputs() {
        VectorStore::from_rows(2, vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![meta("a", 0)]);
    }

    #[test]
    fn now_rfc3339_has_date_and_time_separator() {
        let stamp = now_rfc3339();
        assert!(stamp.contains('T'), "got {stamp}");
    }
}
