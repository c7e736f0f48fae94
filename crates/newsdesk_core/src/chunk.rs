//! crates/newsdesk_core/src/chunk.rs
//!
//! Splits long text into bounded-size pieces so provider input limits
//! are respected. Boundaries are character counts, not bytes, so chunking
//! never splits a multi-byte character; it may still split mid-word,
//! which the translation prompt compensates for with "part i of n"
//! framing.

/// The fixed chunk size used for translation requests.
pub const TRANSLATION_CHUNK_SIZE: usize = 2000;

/// Splits `text` into chunks of at most `chunk_size` characters, in
/// order. Empty input yields no chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_count_is_ceiling_of_length_over_size() {
        for len in [0usize, 1, 1999, 2000, 2001, 4000, 4001, 5500] {
            let text = "a".repeat(len);
            let chunks = chunk_text(&text, TRANSLATION_CHUNK_SIZE);
            let expected = len.div_ceil(TRANSLATION_CHUNK_SIZE);
            assert_eq!(chunks.len(), expected, "len={len}");
        }
    }

    #[test]
    fn concatenation_reproduces_the_original() {
        let text: String = ("lorem ipsum dolor sit amet ").repeat(300);
        let chunks = chunk_text(&text, TRANSLATION_CHUNK_SIZE);
        assert_eq!(chunks.concat(), text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), TRANSLATION_CHUNK_SIZE);
        }
    }

    #[test]
    fn chunking_respects_char_boundaries() {
        let text = "é".repeat(2500);
        let chunks = chunk_text(&text, TRANSLATION_CHUNK_SIZE);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 2000);
        assert_eq!(chunks[1].chars().count(), 500);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", TRANSLATION_CHUNK_SIZE).is_empty());
    }
}
