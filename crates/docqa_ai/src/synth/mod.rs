pub mod openai;
pub mod prompts;

use docqa_core::error::ProviderError;

/// Fixed reply when no context supports an answer.
pub const INSUFFICIENT_CONTEXT: &str = "I don't know.";

/// How many top contexts the extractive fallback stitches together.
pub const EXTRACTIVE_CONTEXT_COUNT: usize = 2;

/// Character cap on the extractive fallback answer.
pub const EXTRACTIVE_MAX_CHARS: usize = 1200;

/// Turns a question plus retrieved context into an answer.
pub trait Synthesizer {
    fn synthesize(&self, question: &str, contexts: &[String]) -> Result<String, ProviderError>;
}

/// Non-generative synthesizer: always answers by excerpting the context.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveSynthesizer;

impl Synthesizer for ExtractiveSynthesizer {
    fn synthesize(&self, _question: &str, contexts: &[String]) -> Result<String, ProviderError> {
        Ok(extractive_answer(contexts))
    }
}

/// Stitch the best contexts into a literal answer.
///
/// Takes the first `EXTRACTIVE_CONTEXT_COUNT` contexts in rank order,
/// joins them with a space and clips to `EXTRACTIVE_MAX_CHARS` characters.
/// Produces the insufficient-context sentinel when nothing usable remains.
pub fn extractive_answer(contexts: &[String]) -> String {
    let joined = contexts
        .iter()
        .take(EXTRACTIVE_CONTEXT_COUNT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let clipped = clip_chars(&joined, EXTRACTIVE_MAX_CHARS);
    if clipped.trim().is_empty() {
        INSUFFICIENT_CONTEXT.to_string()
    } else {
        clipped.to_string()
    }
}

// Counts characters, not bytes, so the cut never splits a code point.
fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
