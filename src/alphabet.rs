//! FPE alphabets: ordered character sets that bound plaintext and ciphertext.
//!
//! An [`Alphabet`] defines the symbol domain of a format-preserving cipher:
//! every character of the text handed to the chunk cipher, and every character
//! it emits, is drawn from this set. Alphabets are immutable after
//! construction and safe for concurrent reads.

use thiserror::Error;

/// Candidate substitution characters, probed in order when deriving the
/// default redaction character for an alphabet.
const REDACTION_CANDIDATES: [char; 7] = ['*', '?', '_', '-', 'X', 'x', '0'];

/// Errors that can occur when constructing or querying an alphabet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("alphabet must contain at least one character")]
    Empty,

    #[error("unable to deduce redaction character for alphabet '{0}'")]
    NoRedactionChar(String),
}

/// An ordered, deduplicated set of characters.
///
/// Symbol order is significant: the position of a character doubles as its
/// numeral value inside the chunk cipher, so two alphabets with the same
/// characters in different orders are different ciphers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Digits, uppercase and lowercase ASCII letters (radix 62).
    pub const ALPHANUMERIC: &'static str =
        "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

    /// Decimal digits (radix 10).
    pub const DIGITS: &'static str = "0123456789";

    /// Build an alphabet from a symbol string, deduplicating while preserving
    /// first-occurrence order.
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let mut chars: Vec<char> = Vec::new();
        for c in symbols.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self { chars })
    }

    /// The standard alphanumeric alphabet (`0-9A-Za-z`).
    pub fn alphanumeric() -> Self {
        Self {
            chars: Self::ALPHANUMERIC.chars().collect(),
        }
    }

    /// The decimal digit alphabet (`0-9`).
    pub fn digits() -> Self {
        Self {
            chars: Self::DIGITS.chars().collect(),
        }
    }

    /// Number of symbols in the alphabet.
    pub fn radix(&self) -> usize {
        self.chars.len()
    }

    /// Whether `c` is a member of the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Numeral value of `c`, or `None` if it is not a member.
    pub fn position(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&s| s == c)
    }

    /// The ordered symbols of the alphabet.
    pub fn symbols(&self) -> &[char] {
        &self.chars
    }

    /// Deduce a substitution character usable by the REDACT strategy.
    ///
    /// Probes a fixed candidate list (`* ? _ - X x 0`) and returns the first
    /// member of the alphabet. Fails if none of the candidates is a member;
    /// callers can always supply an explicit redaction character instead.
    pub fn redaction_char(&self) -> Result<char, AlphabetError> {
        REDACTION_CANDIDATES
            .iter()
            .copied()
            .find(|&c| self.contains(c))
            .ok_or_else(|| AlphabetError::NoRedactionChar(self.chars.iter().collect()))
    }
}
