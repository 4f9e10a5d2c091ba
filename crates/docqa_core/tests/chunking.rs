use pretty_assertions::assert_eq;

use docqa_core::chunk::{split_chunks, ChunkParams};
use docqa_core::model::chunk_id;
use docqa_core::normalize::normalize_ws;

#[test]
fn normalized_single_chunk_covers_whole_text() {
    let raw = "Contoso builds secure solutions.   External\tsharing is restricted.";
    let text = normalize_ws(raw);
    let spans = split_chunks(&text, ChunkParams::new(20, 5));

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].begin, 0);
    assert_eq!(spans[0].end, text.len());
    assert_eq!(spans[0].text, text);
}

#[test]
fn offsets_survive_whitespace_collapsing() {
    // Messy source whitespace disappears in the normalized form; offsets
    // must point into that form, not the raw input.
    let raw = "alpha   beta\n\ngamma\tdelta  epsilon";
    let text = normalize_ws(raw);
    assert_eq!(text, "alpha beta gamma delta epsilon");

    for span in split_chunks(&text, ChunkParams::new(2, 1)) {
        assert_eq!(span.text, &text[span.begin..span.end]);
    }
}

#[test]
fn every_word_lands_in_at_least_one_chunk() {
    let words: Vec<String> = (0..57).map(|i| format!("w{i}")).collect();
    let text = words.join(" ");

    for params in [
        ChunkParams::new(10, 3),
        ChunkParams::new(10, 0),
        ChunkParams::new(3, 3),
        ChunkParams::new(2, 9),
    ] {
        let spans = split_chunks(&text, params);
        assert!(!spans.is_empty());
        assert_eq!(spans[0].begin, 0);
        assert_eq!(spans.last().map(|s| s.end), Some(text.len()));

        // Concatenating deduplicated coverage reconstructs every word.
        for w in &words {
            assert!(
                spans.iter().any(|s| s.text.split(' ').any(|t| t == w)),
                "word {w} missing for params {params:?}"
            );
        }
    }
}

#[test]
fn rechunking_reproduces_identical_spans_and_ids() {
    let text = normalize_ws("one two three four five six seven eight nine ten");
    let params = ChunkParams::new(4, 2);

    let first = split_chunks(&text, params);
    let second = split_chunks(&text, params);
    assert_eq!(first, second);

    let ids_a: Vec<String> = first
        .iter()
        .map(|s| chunk_id("docs/sample.txt", s.begin))
        .collect();
    let ids_b: Vec<String> = second
        .iter()
        .map(|s| chunk_id("docs/sample.txt", s.begin))
        .collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn large_overlap_makes_one_window_per_word() {
    let text = "a b c d e f";
    let spans = split_chunks(&text, ChunkParams::new(3, 100));
    assert_eq!(spans.len(), 6);
    for pair in spans.windows(2) {
        assert!(pair[0].begin < pair[1].begin);
    }
}
