//! [`SecretKey`] and [`KeyPair`]: the encryption and integrity keys.
//!
//! Keys are handed out by the exchange as web-safe base64 strings. This module
//! only decodes and holds them; generation, storage, and rotation belong to
//! whoever provisions them.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::error::DecryptError;

/// Web-safe base64 that accepts input with or without `=` padding.
pub(crate) const WEB_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Raw key material used as an HMAC-SHA1 key.
///
/// The bytes are overwritten with zeroes on drop and never printed.
#[derive(Clone)]
pub struct SecretKey(Box<[u8]>);

impl SecretKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::Configuration`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, DecryptError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DecryptError::Configuration("key material is empty".into()));
        }
        Ok(Self(bytes.into_boxed_slice()))
    }

    /// Decode a key from its web-safe base64 text form.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::InvalidEncoding`] if `encoded` is not valid
    /// base64, or [`DecryptError::Configuration`] if it decodes to nothing.
    pub fn from_base64(encoded: &str) -> Result<Self, DecryptError> {
        let bytes = WEB_SAFE
            .decode(encoded.trim())
            .map_err(|e| DecryptError::InvalidEncoding(format!("key: {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; empty keys are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// The encryption and integrity keys issued together for one account.
#[derive(Clone, Debug)]
pub struct KeyPair {
    /// Keys the keystream.
    pub encryption: SecretKey,
    /// Keys the truncated signature.
    pub integrity: SecretKey,
}

impl KeyPair {
    pub fn new(encryption: SecretKey, integrity: SecretKey) -> Self {
        Self {
            encryption,
            integrity,
        }
    }

    /// Decode both keys from their web-safe base64 text form.
    ///
    /// # Errors
    ///
    /// See [`SecretKey::from_base64`].
    pub fn from_base64(encryption: &str, integrity: &str) -> Result<Self, DecryptError> {
        Ok(Self::new(
            SecretKey::from_base64(encryption)?,
            SecretKey::from_base64(integrity)?,
        ))
    }
}
