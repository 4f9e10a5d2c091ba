use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};

/// One chunk of text plus its byte span in the input.
///
/// `text == &input[begin..end]`, so `end - begin == text.len()` always
/// holds and spans of overlapping chunks overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSpan {
    pub text: String,
    pub begin: usize,
    pub end: usize,
}

/// Word-window chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkParams {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Words advanced between consecutive chunk starts. The floor of 1
    /// guarantees forward progress even when `overlap >= chunk_size`.
    pub fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap).max(1)
    }
}

/// Split text into overlapping word windows.
///
/// Chunk `i` covers words `[i*step, i*step + chunk_size)`. Offsets are byte
/// positions in `text`; callers pass whitespace-normalized text so chunk
/// texts come out single-space joined. Empty input yields no chunks, and a
/// zero `chunk_size` yields none either.
pub fn split_chunks(text: &str, params: ChunkParams) -> Vec<ChunkSpan> {
    let words = word_offsets(text);
    if words.is_empty() || params.chunk_size == 0 {
        return Vec::new();
    }

    let step = params.step();
    let mut spans = Vec::new();
    let mut i = 0usize;
    while i < words.len() {
        let last = i.saturating_add(params.chunk_size).min(words.len()) - 1;
        let begin = words[i].0;
        let (last_begin, last_word) = words[last];
        let end = last_begin + last_word.len();
        spans.push(ChunkSpan {
            text: text[begin..end].to_string(),
            begin,
            end,
        });
        i += step;
    }
    spans
}

/// Each whitespace-delimited word with its byte offset in `text`.
fn word_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_chunks("", ChunkParams::new(10, 2)).is_empty());
        assert!(split_chunks("   ", ChunkParams::new(10, 2)).is_empty());
    }

    #[test]
    fn short_text_yields_single_full_span() {
        let text = "one two three";
        let spans = split_chunks(text, ChunkParams::new(10, 2));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, text);
        assert_eq!(spans[0].begin, 0);
        assert_eq!(spans[0].end, text.len());
    }

    #[test]
    fn windows_and_offsets_are_exact() {
        // Words at bytes 0, 2, 4, 6, 8, 10, 12.
        let text = "a b c d e f g";
        let spans = split_chunks(text, ChunkParams::new(3, 1));
        let got: Vec<(&str, usize, usize)> = spans
            .iter()
            .map(|s| (s.text.as_str(), s.begin, s.end))
            .collect();
        assert_eq!(
            got,
            vec![
                ("a b c", 0, 5),
                ("c d e", 4, 9),
                ("e f g", 8, 13),
                ("g", 12, 13),
            ]
        );
    }

    #[test]
    fn spans_slice_back_to_their_text() {
        let text = "alpha beta gamma delta epsilon zeta";
        for span in split_chunks(text, ChunkParams::new(2, 1)) {
            assert_eq!(span.text, &text[span.begin..span.end]);
            assert_eq!(span.end - span.begin, span.text.len());
        }
    }

    #[test]
    fn overlap_at_least_chunk_size_still_terminates_and_covers() {
        let text = "a b c";
        let spans = split_chunks(text, ChunkParams::new(2, 5));
        // Step floors at 1: one chunk per word position.
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "a b");
        assert_eq!(spans[1].text, "b c");
        assert_eq!(spans[2].text, "c");
        assert_eq!(spans.last().map(|s| s.end), Some(text.len()));
    }

    #[test]
    fn chunk_size_at_usize_max_does_not_overflow() {
        let text = "a b c";

        let spans = split_chunks(text, ChunkParams::new(usize::MAX, 0));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, text);

        // Step floors at 1, so window starts past zero hit the saturating
        // end-of-window arithmetic.
        let spans = split_chunks(text, ChunkParams::new(usize::MAX, usize::MAX));
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "a b c");
        assert_eq!(spans[2].text, "c");
    }

    #[test]
    fn begins_are_strictly_increasing() {
        let text = "w1 w2 w3 w4 w5 w6 w7 w8 w9";
        let spans = split_chunks(text, ChunkParams::new(4, 2));
        for pair in spans.windows(2) {
            assert!(pair[0].begin < pair[1].begin);
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog";
        let params = ChunkParams::new(4, 1);
        assert_eq!(split_chunks(text, params), split_chunks(text, params));
    }

    #[test]
    fn zero_chunk_size_yields_no_chunks() {
        assert!(split_chunks("a b c", ChunkParams::new(0, 0)).is_empty());
    }
}
