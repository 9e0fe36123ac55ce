//! Short code generation.
//!
//! Codes are drawn from an alphabet without visually ambiguous characters
//! (`0`, `O`, `1`, `l`, `I`) using the thread-local CSPRNG.

use rand::Rng;

/// Characters a generated code may contain.
pub const ALPHABET: &[u8] = b"23456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Code length used when the caller passes `0`.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates a random short code of `length` characters.
///
/// A `length` of `0` falls back to [`DEFAULT_CODE_LENGTH`]. Every character is
/// drawn uniformly from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code(length: usize) -> String {
    let length = if length == 0 {
        DEFAULT_CODE_LENGTH
    } else {
        length
    };

    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
