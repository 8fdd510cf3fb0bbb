//! Unknown-character reconciliation helpers.
//!
//! These run as a pre-pass before the chunk cipher sees any text (and, for
//! SKIP, as a post-pass on the cipher output). All indices are character
//! indices, never byte offsets, so multi-byte UTF-8 input behaves the same
//! as ASCII.

use crate::alphabet::Alphabet;

/// First character of `text` that is not in the alphabet, if any.
pub(crate) fn find_unknown_char(text: &str, alphabet: &Alphabet) -> Option<char> {
    text.chars().find(|&c| !alphabet.contains(c))
}

/// `text` with every non-alphabet character removed.
pub(crate) fn remove_unknown_chars(text: &str, alphabet: &Alphabet) -> String {
    text.chars().filter(|&c| alphabet.contains(c)).collect()
}

/// `text` with every non-alphabet character replaced by `redaction_char`.
pub(crate) fn redact_unknown_chars(text: &str, alphabet: &Alphabet, redaction_char: char) -> String {
    text.chars()
        .map(|c| if alphabet.contains(c) { c } else { redaction_char })
        .collect()
}

/// Removes non-alphabet characters from a string while recording where they
/// were, so they can be reinjected at the same positions after ciphering.
///
/// The record is transient: one skipper serves exactly one encrypt or decrypt
/// call and is discarded afterwards.
pub(crate) struct CharacterSkipper {
    skipped: Vec<(usize, char)>,
    processed: String,
}

impl CharacterSkipper {
    pub(crate) fn new(text: &str, alphabet: &Alphabet) -> Self {
        let mut skipped = Vec::new();
        let mut processed = String::with_capacity(text.len());
        for (index, c) in text.chars().enumerate() {
            if alphabet.contains(c) {
                processed.push(c);
            } else {
                skipped.push((index, c));
            }
        }
        Self { skipped, processed }
    }

    /// The text with non-alphabet characters removed.
    pub(crate) fn processed_text(&self) -> &str {
        &self.processed
    }

    pub(crate) fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Reinject the skipped characters into `text` at their recorded indices.
    ///
    /// Insertions are applied left to right in ascending index order; each
    /// insertion shifts everything after it, which is exactly what makes the
    /// recorded original-string indices land correctly.
    pub(crate) fn inject_into(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        for &(index, c) in &self.skipped {
            let at = index.min(chars.len());
            chars.insert(at, c);
        }
        chars.into_iter().collect()
    }
}
