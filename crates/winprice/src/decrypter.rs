//! Decryption and verification of a single ciphertext, plus IV timestamps.
//!
//! Both operations are pure functions of their arguments. A fresh HMAC context
//! is built for every keystream block and for the signature, so any number of
//! threads may decrypt with the same keys at once.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::crypto::{
    mac::{hmac_sha1, verify_truncated},
    IvCounter, BLOCK_LEN, IV_LEN, MIN_CIPHERTEXT_LEN, SIGNATURE_LEN,
};
use crate::error::DecryptError;
use crate::keys::{KeyPair, SecretKey};
use crate::price::{decode_ciphertext, decode_price};

/// Bytes of the IV that carry the encoding timestamp.
pub const TIMESTAMP_LEN: usize = 8;

/// Decrypt `ciphertext` and verify its signature.
///
/// # Errors
///
/// - [`DecryptError::InvalidInputLength`] if `ciphertext` is shorter than
///   [`MIN_CIPHERTEXT_LEN`]; no cryptographic work is done.
/// - [`DecryptError::IntegrityFailure`] if the signature does not match.
/// - [`DecryptError::Configuration`] if a key is rejected by HMAC-SHA1.
pub fn decrypt(
    ciphertext: &[u8],
    encryption_key: &SecretKey,
    integrity_key: &SecretKey,
) -> Result<Vec<u8>, DecryptError> {
    if ciphertext.len() < MIN_CIPHERTEXT_LEN {
        return Err(DecryptError::InvalidInputLength {
            min: MIN_CIPHERTEXT_LEN,
            actual: ciphertext.len(),
        });
    }

    let (iv, rest) = ciphertext.split_at(IV_LEN);
    let (payload, signature) = rest.split_at(rest.len() - SIGNATURE_LEN);
    let mut base_iv = [0u8; IV_LEN];
    base_iv.copy_from_slice(iv);

    let plaintext = apply_keystream(payload, &base_iv, encryption_key)?;

    let signed = [plaintext.as_slice(), base_iv.as_slice()];
    if let Err(e) = verify_truncated(integrity_key.expose(), &signed, signature) {
        if e == DecryptError::IntegrityFailure {
            warn!(payload_len = payload.len(), "ciphertext signature mismatch");
        }
        return Err(e);
    }

    debug!(payload_len = payload.len(), "ciphertext decrypted and verified");
    Ok(plaintext)
}

/// XOR `payload` with the keystream seeded by `base_iv`.
fn apply_keystream(
    payload: &[u8],
    base_iv: &[u8; IV_LEN],
    encryption_key: &SecretKey,
) -> Result<Vec<u8>, DecryptError> {
    let mut out = Vec::with_capacity(payload.len());
    let mut counter = IvCounter::new(base_iv);
    for block in payload.chunks(BLOCK_LEN) {
        let pad = hmac_sha1(encryption_key.expose(), &[counter.as_bytes()])?;
        out.extend(block.iter().zip(pad.iter()).map(|(c, p)| c ^ p));
        counter.advance();
    }
    Ok(out)
}

/// Milliseconds since the Unix epoch encoded in the first 8 bytes of `iv`.
///
/// Bytes `0..4` are big-endian signed seconds and `4..8` big-endian signed
/// microseconds; the sub-millisecond part is floored away.
///
/// # Errors
///
/// Returns [`DecryptError::InvalidInputLength`] if `iv` is shorter than
/// [`TIMESTAMP_LEN`].
pub fn timestamp_millis_from_iv(iv: &[u8]) -> Result<i64, DecryptError> {
    let prefix: &[u8; TIMESTAMP_LEN] = iv
        .get(..TIMESTAMP_LEN)
        .and_then(|p| p.try_into().ok())
        .ok_or(DecryptError::InvalidInputLength {
            min: TIMESTAMP_LEN,
            actual: iv.len(),
        })?;
    let seconds = i32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
    let micros = i32::from_be_bytes([prefix[4], prefix[5], prefix[6], prefix[7]]);
    Ok(i64::from(seconds) * 1000 + i64::from(micros).div_euclid(1000))
}

/// The instant at which the ciphertext carrying `iv` was produced.
///
/// Microsecond precision in the IV is truncated to milliseconds.
///
/// # Errors
///
/// See [`timestamp_millis_from_iv`].
pub fn timestamp_from_iv(iv: &[u8]) -> Result<DateTime<Utc>, DecryptError> {
    let millis = timestamp_millis_from_iv(iv)?;
    DateTime::from_timestamp_millis(millis).ok_or(DecryptError::TimestampOutOfRange(millis))
}

/// An authenticated 64-bit price together with the time it was encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptedPrice {
    /// Price in micros of the account currency.
    pub micros: u64,
    /// Encoding time taken from the IV.
    pub timestamp: DateTime<Utc>,
}

/// Decrypts values for one account's [`KeyPair`].
///
/// Holds only the keys; cheap to clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Decrypter {
    keys: KeyPair,
}

impl Decrypter {
    pub fn new(keys: KeyPair) -> Self {
        Self { keys }
    }

    /// Decrypt and verify raw ciphertext bytes. See [`decrypt`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        decrypt(ciphertext, &self.keys.encryption, &self.keys.integrity)
    }

    /// Decode a web-safe base64 ciphertext, then decrypt and verify it.
    pub fn decrypt_base64(&self, encoded: &str) -> Result<Vec<u8>, DecryptError> {
        self.decrypt(&decode_ciphertext(encoded)?)
    }

    /// Recover a winning price from its web-safe base64 ciphertext.
    ///
    /// # Errors
    ///
    /// Any error from decoding or [`decrypt`], or
    /// [`DecryptError::UnexpectedPlaintextLength`] if the authenticated
    /// plaintext is not a 64-bit value.
    pub fn decrypt_price(&self, encoded: &str) -> Result<DecryptedPrice, DecryptError> {
        let ciphertext = decode_ciphertext(encoded)?;
        let plaintext = self.decrypt(&ciphertext)?;
        Ok(DecryptedPrice {
            micros: decode_price(&plaintext)?,
            timestamp: timestamp_from_iv(&ciphertext)?,
        })
    }
}
