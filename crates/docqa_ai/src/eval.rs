use crate::answer::answer;
use crate::embed::Embedder;
use crate::store::VectorStore;
use crate::synth::Synthesizer;

/// One graded question: the answer must contain every listed needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalCase {
    pub question: String,
    pub must_include: Vec<String>,
}

impl EvalCase {
    pub fn new(question: &str, must_include: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            must_include: must_include.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalOutcome {
    pub question: String,
    pub answer: String,
    pub passed: bool,
    pub source_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvalReport {
    pub outcomes: Vec<EvalOutcome>,
    pub passed: usize,
    pub failed: usize,
}

impl EvalReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Run every case through the full answer path and grade by containment.
///
/// A case passes when each of its non-empty needles appears in the answer,
/// case-insensitively. Grades retrieval wiring, not answer quality.
pub fn run_eval(
    store: &VectorStore,
    embedder: &Embedder,
    synth: &dyn Synthesizer,
    cases: &[EvalCase],
    k: usize,
) -> EvalReport {
    let mut report = EvalReport::default();
    for case in cases {
        let result = answer(store, embedder, synth, &case.question, k);
        let haystack = result.answer.to_lowercase();
        let passed = case
            .must_include
            .iter()
            .filter(|needle| !needle.is_empty())
            .all(|needle| haystack.contains(&needle.to_lowercase()));

        if passed {
            report.passed += 1;
        } else {
            report.failed += 1;
        }
        report.outcomes.push(EvalOutcome {
            question: case.question.clone(),
            answer: result.answer,
            passed,
            source_count: result.sources.len(),
        });
    }
    report
}
