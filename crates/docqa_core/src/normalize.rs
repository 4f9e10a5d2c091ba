/// Collapse every whitespace run to a single space and trim the ends.
///
/// This is the canonical text form for chunking; chunk offsets are byte
/// positions inside this normalized form.
pub fn normalize_ws(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
