use crate::shortcode::{ShortCode, ALPHABET, CODE_LENGTH};

const HASH_BASE: u64 = 31;
const HASH_MODULUS: u64 = 1 << 31;

/// Derives the short code for `url`.
///
/// The code is a pure function of the input: a polynomial rolling hash over
/// the Unicode scalar values of `url` (base 31, modulo 2^31), written out as
/// [`CODE_LENGTH`] base-62 digits, least significant digit first.
///
/// Distinct URLs may collide on the same code. The latest write for a code
/// wins in the store.
pub fn generate(url: &str) -> ShortCode {
    let mut hash = rolling_hash(url);
    let radix = ALPHABET.len() as u64;

    let mut code = String::with_capacity(CODE_LENGTH);
    for _ in 0..CODE_LENGTH {
        code.push(ALPHABET[(hash % radix) as usize] as char);
        hash /= radix;
    }

    ShortCode::new_unchecked(code)
}

fn rolling_hash(s: &str) -> u64 {
    // h < 2^31 and a scalar value < 2^21, so h * 31 + c fits in a u64
    s.chars()
        .fold(0, |h, c| (h * HASH_BASE + u64::from(c)) % HASH_MODULUS)
}
