use std::path::Path;

use walkdir::WalkDir;

use docqa_core::chunk::{split_chunks, ChunkParams};
use docqa_core::error::StoreError;
use docqa_core::extract::{extract_text, is_supported};
use docqa_core::model::{chunk_id, ChunkMeta};
use docqa_core::normalize::normalize_ws;

use crate::embed::Embedder;
use crate::store::VectorStore;

struct Document {
    source: String,
    text: String,
}

/// Collect extractable documents under `data_root` in path order.
///
/// Traversal is sorted so repeated ingests of the same tree produce the
/// same chunk order. Documents that cannot be read are skipped with a
/// warning; one bad file never aborts an ingest.
fn load_documents(data_root: &Path) -> Vec<Document> {
    let mut docs = Vec::new();
    for entry in WalkDir::new(data_root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_supported(entry.path()) {
            continue;
        }
        let text = match extract_text(entry.path()) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "skipping document");
                continue;
            }
        };
        let source = entry
            .path()
            .strip_prefix(data_root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        docs.push(Document { source, text });
    }
    docs
}

/// Rebuild the store from every supported document under `data_root` and
/// persist it at `store_path`.
///
/// Full replace: whatever was at `store_path` before is superseded by this
/// corpus. An empty corpus produces a valid empty store.
pub fn build_store(
    data_root: &Path,
    store_path: &Path,
    embedder: &Embedder,
    params: ChunkParams,
) -> Result<VectorStore, StoreError> {
    let mut meta: Vec<ChunkMeta> = Vec::new();
    let mut texts: Vec<String> = Vec::new();

    for doc in load_documents(data_root) {
        let normalized = normalize_ws(&doc.text);
        if normalized.is_empty() {
            continue;
        }
        for span in split_chunks(&normalized, params) {
            meta.push(ChunkMeta {
                id: chunk_id(&doc.source, span.begin),
                source: doc.source.clone(),
                chunk: span.text.clone(),
                begin: span.begin,
                end: span.end,
            });
            texts.push(span.text);
        }
    }

    let store = if texts.is_empty() {
        VectorStore::new(embedder.dim())
    } else {
        // One batched call for the whole corpus.
        let vectors = embedder.embed(&texts);
        let dim = vectors
            .first()
            .map(|v| v.len())
            .unwrap_or_else(|| embedder.dim());
        VectorStore::from_rows(dim, vectors, meta)
    };

    store.save(store_path)?;
    tracing::info!(chunks = store.len(), store = %store_path.display(), "store rebuilt");
    Ok(store)
}
