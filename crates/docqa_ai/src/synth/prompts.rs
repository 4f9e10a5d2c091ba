/// System prompt for grounded answering. The citation contract ([n],
/// 1-based) must line up with how `build_user_prompt` numbers the chunks.
pub const SYSTEM_PROMPT: &str = r#"You are a concise assistant answering questions from retrieved document chunks.

Rules (non-negotiable):
1) Answer USING ONLY the context chunks provided below. Do not invent facts.
2) Cite sources inline as [n], where n is the 1-based index of the chunk.
3) If the context does not contain the answer, say you don't know.
"#;

/// Lay out the question and the numbered context blocks.
pub fn build_user_prompt(question: &str, contexts: &[String]) -> String {
    let blocks = contexts
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}] {c}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Question: {question}\n\nContext:\n{blocks}")
}
