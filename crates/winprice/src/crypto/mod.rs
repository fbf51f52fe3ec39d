//! Cipher primitives: the HMAC-SHA1 keyed hash and the IV counter.
//!
//! # Ciphertext format
//!
//! ```text
//! initialization_vector (16 bytes) || payload (N bytes) || signature (4 bytes)
//! ```
//!
//! The IV starts with the encoding time (big-endian seconds, then micros).
//! The payload is XORed with a keystream of 20-byte HMAC-SHA1 blocks keyed by
//! the encryption key; the signature is the first 4 bytes of HMAC-SHA1 over
//! `plaintext || iv` keyed by the integrity key.

pub mod counter;
pub mod mac;

pub use counter::IvCounter;
pub use mac::MAC_LEN;

/// Byte length of the initialization vector at the start of every ciphertext.
pub const IV_LEN: usize = 16;

/// Byte length of the truncated signature at the end of every ciphertext.
pub const SIGNATURE_LEN: usize = 4;

/// Keystream block size; one HMAC-SHA1 output.
pub const BLOCK_LEN: usize = MAC_LEN;

/// Smallest well-formed ciphertext: IV and signature around an empty payload.
pub const MIN_CIPHERTEXT_LEN: usize = IV_LEN + SIGNATURE_LEN;
