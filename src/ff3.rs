//! FF3-1 chunk cipher (NIST SP 800-38G rev. 1)
//!
//! An eight-round Feistel network over numeral strings in the bound
//! alphabet's radix, with AES as the round function. This is the built-in
//! [`ChunkCipher`] behind [`FfxMode::Ff31`](crate::FfxMode::Ff31); the
//! chunked whole-text layer sits on top and never calls AES directly.
//!
//! # Length limits
//!
//! Per-radix bounds follow the standard: a chunk must encode a domain of at
//! least one million values (`radix^len >= 1_000_000`), and each Feistel
//! half must fit in 96 bits (`radix^(len/2) <= 2^96`). The 96-bit bound is
//! what lets the numeral arithmetic live entirely in `u128`, with no bignum
//! dependency. Radix is capped at 64.
//!
//! # Tweaks
//!
//! FF3-1 takes a 56-bit (7-byte) tweak, internally expanded to the two
//! 32-bit half-tweaks of original FF3. Legacy 64-bit (8-byte) tweaks are
//! accepted as-is. Anything else is rejected.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use zeroize::Zeroize;

use crate::alphabet::Alphabet;
use crate::fpe::cipher::{ChunkCipher, CipherError};

const ROUNDS: u32 = 8;

/// Smallest permitted chunk domain (`radix^min_len`), per SP 800-38G.
const DOMAIN_FLOOR: u128 = 1_000_000;

/// Each Feistel half must encode below `2^96` so it fits a 12-byte block
/// field (and comfortably inside `u128`).
const HALF_NUMERAL_BITS: u32 = 96;

/// AES key schedule for any of the three FF3-1 key sizes.
enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, CipherError> {
        let cipher = match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128),
            24 => Aes192::new_from_slice(key).map(Self::Aes192),
            32 => Aes256::new_from_slice(key).map(Self::Aes256),
            n => return Err(CipherError::InvalidKeyLength(n)),
        };
        cipher.map_err(|_| CipherError::InvalidKeyLength(key.len()))
    }

    fn encrypt_block(&self, block: &mut aes::Block) {
        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(block),
            Self::Aes192(cipher) => cipher.encrypt_block(block),
            Self::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }
}

/// FF3-1 cipher bound to one key and one alphabet.
///
/// Deterministic for a given key and tweak; immutable after construction and
/// safe for concurrent use. Raw key bytes are zeroized once the AES key
/// schedule has been built.
pub struct Ff3Cipher {
    alphabet: Alphabet,
    cipher: BlockCipher,
    min_len: usize,
    max_len: usize,
}

impl Ff3Cipher {
    /// Create an FF3-1 cipher from raw key bytes (16, 24 or 32) and an
    /// alphabet of radix 2..=64.
    pub fn new(key: &[u8], alphabet: Alphabet) -> Result<Self, CipherError> {
        let radix = alphabet.radix();
        if !(2..=64).contains(&radix) {
            return Err(CipherError::UnsupportedRadix(radix));
        }
        // FF3 schedules AES with the byte-reversed key
        let mut reversed: Vec<u8> = key.iter().rev().copied().collect();
        let cipher = BlockCipher::new(&reversed);
        reversed.zeroize();
        let cipher = cipher?;
        let (min_len, max_len) = length_bounds(radix);
        Ok(Self {
            alphabet,
            cipher,
            min_len,
            max_len,
        })
    }

    /// Shortest chunk this cipher accepts for its radix.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Longest chunk this cipher accepts for its radix.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn numerals(&self, text: &str) -> Result<Vec<u128>, CipherError> {
        text.chars()
            .map(|c| {
                self.alphabet
                    .position(c)
                    .map(|p| p as u128)
                    .ok_or(CipherError::UnknownSymbol(c))
            })
            .collect()
    }

    fn text_of(&self, numerals: &[u128]) -> String {
        numerals
            .iter()
            .map(|&d| self.alphabet.symbols()[d as usize])
            .collect()
    }

    /// `REVB(CIPH(REVB(P)))`, the FF3 round function.
    fn prf(&self, p: [u8; 16]) -> [u8; 16] {
        let mut block = aes::Block::default();
        for (dst, src) in block.iter_mut().zip(p.iter().rev()) {
            *dst = *src;
        }
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        for (dst, src) in out.iter_mut().zip(block.iter().rev()) {
            *dst = *src;
        }
        out
    }

    fn run(&self, text: &str, tweak: &[u8], decrypt: bool) -> Result<String, CipherError> {
        let numerals = self.numerals(text)?;
        let n = numerals.len();
        if n < self.min_len || n > self.max_len {
            return Err(CipherError::LengthOutOfRange {
                len: n,
                min: self.min_len,
                max: self.max_len,
            });
        }

        let radix = self.alphabet.radix() as u128;
        let (tl, tr) = split_tweak(tweak)?;
        let u = n.div_ceil(2);
        let mut a: Vec<u128> = numerals[..u].to_vec();
        let mut b: Vec<u128> = numerals[u..].to_vec();

        let order: Vec<u32> = if decrypt {
            (0..ROUNDS).rev().collect()
        } else {
            (0..ROUNDS).collect()
        };
        for i in order {
            let (m, w) = if i % 2 == 0 { (u, tr) } else { (n - u, tl) };
            let modulus = radix.pow(m as u32);
            if decrypt {
                let p = round_block(w, i, &a, radix);
                let y = u128::from_be_bytes(self.prf(p)) % modulus;
                let c = (num_radix_rev(&b, radix) + modulus - y) % modulus;
                b = a;
                a = numerals_rev(c, radix, m);
            } else {
                let p = round_block(w, i, &b, radix);
                let y = u128::from_be_bytes(self.prf(p)) % modulus;
                let c = (num_radix_rev(&a, radix) + y) % modulus;
                a = b;
                b = numerals_rev(c, radix, m);
            }
        }

        let mut out = a;
        out.extend(b);
        Ok(self.text_of(&out))
    }
}

impl ChunkCipher for Ff3Cipher {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn encrypt_chunk(&self, text: &str, tweak: &[u8]) -> Result<String, CipherError> {
        self.run(text, tweak, false)
    }

    fn decrypt_chunk(&self, text: &str, tweak: &[u8]) -> Result<String, CipherError> {
        self.run(text, tweak, true)
    }
}

/// `(min_len, max_len)` for a radix, per the SP 800-38G domain bounds.
fn length_bounds(radix: usize) -> (usize, usize) {
    let r = radix as u128;

    let mut min_len = 1usize;
    let mut pow = r;
    while pow < DOMAIN_FLOOR {
        pow *= r;
        min_len += 1;
    }
    let min_len = min_len.max(2);

    let limit = 1u128 << HALF_NUMERAL_BITS;
    let mut half_len = 0usize;
    let mut pow = 1u128;
    while pow <= limit / r {
        pow *= r;
        half_len += 1;
    }
    (min_len, 2 * half_len)
}

/// Split a tweak into the two 32-bit half-tweaks.
///
/// 8 bytes is original FF3; 7 bytes is FF3-1, expanded by stealing the
/// nibbles of byte 3 for the two halves.
fn split_tweak(tweak: &[u8]) -> Result<([u8; 4], [u8; 4]), CipherError> {
    match tweak.len() {
        8 => Ok((
            [tweak[0], tweak[1], tweak[2], tweak[3]],
            [tweak[4], tweak[5], tweak[6], tweak[7]],
        )),
        7 => Ok((
            [tweak[0], tweak[1], tweak[2], tweak[3] & 0xF0],
            [tweak[4], tweak[5], tweak[6], (tweak[3] & 0x0F) << 4],
        )),
        n => Err(CipherError::InvalidTweakLength(n)),
    }
}

/// `NUM_radix(REV(X))`: the numeral string read least-significant-first.
fn num_radix_rev(numerals: &[u128], radix: u128) -> u128 {
    numerals.iter().rev().fold(0u128, |acc, &d| acc * radix + d)
}

/// `REV(STR_m_radix(value))`: `m` numerals, least significant first.
fn numerals_rev(mut value: u128, radix: u128, m: usize) -> Vec<u128> {
    let mut out = Vec::with_capacity(m);
    for _ in 0..m {
        out.push(value % radix);
        value /= radix;
    }
    out
}

/// `P = (W xor [i]^4) || [NUM_radix(REV(half))]^12`
fn round_block(w: [u8; 4], round: u32, half: &[u128], radix: u128) -> [u8; 16] {
    let mut p = [0u8; 16];
    let round_bytes = round.to_be_bytes();
    for k in 0..4 {
        p[k] = w[k] ^ round_bytes[k];
    }
    let num = num_radix_rev(half, radix);
    p[4..].copy_from_slice(&num.to_be_bytes()[4..]);
    p
}
