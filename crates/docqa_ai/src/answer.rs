use docqa_core::model::{QueryResult, SourceRef};

use crate::embed::Embedder;
use crate::store::VectorStore;
use crate::synth::{extractive_answer, Synthesizer, INSUFFICIENT_CONTEXT};

/// Answer `question` from the store. Total: every failure mode downgrades
/// to the extractive answer or the insufficient-context sentinel, never an
/// error.
pub fn answer(
    store: &VectorStore,
    embedder: &Embedder,
    synth: &dyn Synthesizer,
    question: &str,
    k: usize,
) -> QueryResult {
    let query = embedder.embed_one(question);
    let hits = store.search(&query, k);

    if hits.is_empty() {
        return QueryResult {
            question: question.to_string(),
            answer: INSUFFICIENT_CONTEXT.to_string(),
            sources: Vec::new(),
        };
    }

    let contexts: Vec<String> = hits.iter().map(|h| h.meta.chunk.clone()).collect();

    let answer_text = match synth.synthesize(question, &contexts) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => extractive_answer(&contexts),
        Err(err) => {
            tracing::warn!(error = %err, "synthesis failed; using extractive answer");
            extractive_answer(&contexts)
        }
    };

    let sources = hits
        .iter()
        .enumerate()
        .map(|(i, h)| SourceRef {
            rank: i + 1,
            score: h.score,
            source: h.meta.source.clone(),
            begin: h.meta.begin,
            end: h.meta.end,
        })
        .collect();

    QueryResult {
        question: question.to_string(),
        answer: answer_text,
        sources,
    }
}
