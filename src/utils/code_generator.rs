//! Deterministic short code derivation.
//!
//! A short code is the first [`CODE_LENGTH`] lowercase hex characters of the
//! SHA-256 digest of the exact URL bytes. The same URL always maps to the same
//! code, which is what makes shortening idempotent.
//!
//! Truncation to 32 bits means unrelated URLs can collide (about a 50% chance
//! after ~2^16 distinct URLs). Collisions are detected by the link service,
//! not here.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const CODE_LENGTH: usize = 8;

/// Derives the short code for a URL.
///
/// No normalization is applied: `http://example.com` and
/// `http://example.com/` produce different codes.
///
/// # Examples
///
/// ```
/// use shortlink::utils::code_generator::short_code;
///
/// let code = short_code("http://example.com");
/// assert_eq!(code.len(), 8);
/// assert_eq!(code, short_code("http://example.com"));
/// ```
pub fn short_code(original_url: &str) -> String {
    let digest = Sha256::digest(original_url.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(CODE_LENGTH);
    code
}

/// Returns true if `code` has the shape produced by [`short_code`].
///
/// Used to reject obviously bogus codes before touching storage.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
