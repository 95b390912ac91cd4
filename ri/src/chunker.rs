//! Paragraph-based text chunking
//!
//! Documents are split on blank lines and paragraphs are packed into chunks
//! up to a character budget. Consecutive chunks repeat the tail of their
//! predecessor so retrieval keeps context across chunk boundaries.

/// Default maximum characters per chunk
pub const DEFAULT_MAX_CHARS: usize = 3000;

/// Default overlap characters between consecutive chunks
pub const DEFAULT_OVERLAP_CHARS: usize = 200;

/// Chunking parameters, both counted in characters
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Character budget per chunk
    pub max_chars: usize,
    /// Characters of the previous chunk repeated at the start of the next
    pub overlap_chars: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            overlap_chars: DEFAULT_OVERLAP_CHARS,
        }
    }
}

/// Split text into an ordered sequence of overlapping chunks.
///
/// Empty or whitespace-only input yields no chunks. A single paragraph
/// larger than the budget becomes a chunk of its own, exceeding the nominal
/// budget rather than being truncated. Deterministic for identical input
/// and options.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Vec<String> {
    let assembled = assemble(text, options.max_chars);
    apply_overlap(assembled, options.overlap_chars)
}

/// Pack paragraphs into chunks without overlap.
///
/// Joining the result with "\n\n" reconstructs the normalized paragraph
/// join of the input, which is what the round-trip tests below assert.
fn assemble(text: &str, max_chars: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut chunks: Vec<String> = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut buf_len = 0usize;

    for para in normalized.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let para_len = para.chars().count();

        // Oversized paragraph: flush and emit it whole, over budget.
        if para_len > max_chars {
            flush(&mut chunks, &mut buf, &mut buf_len);
            chunks.push(para.to_string());
            continue;
        }

        // +2 accounts for the "\n\n" separator inside the chunk.
        let extra = if buf.is_empty() { para_len } else { para_len + 2 };
        if buf_len + extra <= max_chars {
            buf.push(para);
            buf_len += extra;
        } else {
            flush(&mut chunks, &mut buf, &mut buf_len);
            buf.push(para);
            buf_len = para_len;
        }
    }
    flush(&mut chunks, &mut buf, &mut buf_len);

    chunks
}

fn flush(chunks: &mut Vec<String>, buf: &mut Vec<&str>, buf_len: &mut usize) {
    if !buf.is_empty() {
        chunks.push(buf.join("\n\n"));
        buf.clear();
        *buf_len = 0;
    }
}

/// Prefix each chunk after the first with the tail of its predecessor.
fn apply_overlap(chunks: Vec<String>, overlap_chars: usize) -> Vec<String> {
    if overlap_chars == 0 || chunks.len() < 2 {
        return chunks;
    }

    let mut overlapped = Vec::with_capacity(chunks.len());
    let mut prev_tail = "";

    for chunk in &chunks {
        if prev_tail.is_empty() {
            overlapped.push(chunk.clone());
        } else {
            overlapped.push(format!("{}\n\n{}", prev_tail, chunk));
        }
        prev_tail = tail_chars(chunk, overlap_chars);
    }

    overlapped
}

/// Last `n` characters of `s`, always on a char boundary
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn options(max_chars: usize, overlap_chars: usize) -> ChunkOptions {
        ChunkOptions {
            max_chars,
            overlap_chars,
        }
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_text("", &ChunkOptions::default()).is_empty());
    }

    #[test]
    fn test_whitespace_only_input_yields_no_chunks() {
        assert!(chunk_text("  \n\n \t \n\n", &ChunkOptions::default()).is_empty());
    }

    #[test]
    fn test_single_paragraph_within_budget() {
        let chunks = chunk_text("hello world", &ChunkOptions::default());
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn test_paragraphs_packed_up_to_budget() {
        // "aaaa\n\nbbbb" is exactly 10 chars, "cccc" starts a new chunk.
        let chunks = chunk_text("aaaa\n\nbbbb\n\ncccc", &options(10, 0));
        assert_eq!(chunks, vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn test_overlap_repeats_previous_tail() {
        let chunks = chunk_text("aaaa\n\nbbbb\n\ncccc", &options(10, 4));
        assert_eq!(chunks, vec!["aaaa\n\nbbbb", "bbbb\n\ncccc"]);
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let long = "x".repeat(50);
        let text = format!("intro\n\n{}\n\noutro", long);
        let chunks = chunk_text(&text, &options(10, 0));

        assert_eq!(chunks, vec!["intro".to_string(), long, "outro".to_string()]);
    }

    #[test]
    fn test_crlf_normalized() {
        let chunks = chunk_text("one\r\n\r\ntwo\r\rthree", &options(100, 0));
        assert_eq!(chunks, vec!["one\n\ntwo\n\nthree"]);
    }

    #[test]
    fn test_no_chunk_is_empty() {
        let text = "a\n\n\n\n\n\nb\n\n   \n\nc";
        for chunk in chunk_text(text, &options(1, 0)) {
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "alpha\n\nbeta\n\ngamma\n\ndelta";
        let opts = options(12, 3);
        assert_eq!(chunk_text(text, &opts), chunk_text(text, &opts));
    }

    #[test]
    fn test_overlap_tail_is_char_boundary_safe() {
        let text = "ééééé\n\nααααα\n\n你好你好你";
        let chunks = chunk_text(text, &options(5, 2));
        assert_eq!(chunks.len(), 3);
        assert!(chunks[1].starts_with("éé\n\n"));
        assert!(chunks[2].starts_with("αα\n\n"));
    }

    #[test]
    fn test_tail_chars() {
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(tail_chars("ab", 5), "ab");
        assert_eq!(tail_chars("abc", 0), "");
        assert_eq!(tail_chars("héllo", 4), "éllo");
    }

    proptest! {
        /// Joining the assembled chunks reconstructs the paragraph join of
        /// the input: nothing is lost or duplicated before overlap applies.
        #[test]
        fn prop_assemble_round_trips(paras in proptest::collection::vec("[a-z]{1,30}", 1..8)) {
            let text = paras.join("\n\n");
            let assembled = assemble(&text, 40);
            prop_assert_eq!(assembled.join("\n\n"), text);
        }

        /// Each overlapped chunk is the previous assembled chunk's character
        /// tail, a separator, then the assembled chunk itself.
        #[test]
        fn prop_overlap_is_previous_tail(
            paras in proptest::collection::vec("[a-z]{1,30}", 2..8),
            overlap in 1usize..10,
        ) {
            let text = paras.join("\n\n");
            let assembled = assemble(&text, 40);
            let overlapped = apply_overlap(assembled.clone(), overlap);

            prop_assert_eq!(overlapped.len(), assembled.len());
            prop_assert_eq!(&overlapped[0], &assembled[0]);
            for i in 1..assembled.len() {
                let expected = format!("{}\n\n{}", tail_chars(&assembled[i - 1], overlap), assembled[i]);
                prop_assert_eq!(&overlapped[i], &expected);
            }
        }

        /// Chunks are never empty, whatever the input.
        #[test]
        fn prop_no_empty_chunks(text in "[a-z \n]{0,200}", max in 1usize..50, overlap in 0usize..10) {
            for chunk in chunk_text(&text, &options(max, overlap)) {
                prop_assert!(!chunk.is_empty());
            }
        }
    }
}
