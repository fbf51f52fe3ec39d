//! Text and value encodings around the ciphertext.
//!
//! Bid-protocol macros carry the ciphertext as web-safe base64 (usually
//! without padding), and a winning price decrypts to a big-endian 64-bit
//! count of micros.

use base64::Engine as _;

use crate::error::DecryptError;
use crate::keys::WEB_SAFE;

/// Byte length of a decrypted price.
pub const PRICE_LEN: usize = 8;

/// Decode a web-safe base64 ciphertext, with or without padding.
///
/// # Errors
///
/// Returns [`DecryptError::InvalidEncoding`] if `encoded` is not valid
/// web-safe base64.
pub fn decode_ciphertext(encoded: &str) -> Result<Vec<u8>, DecryptError> {
    WEB_SAFE
        .decode(encoded.trim())
        .map_err(|e| DecryptError::InvalidEncoding(format!("ciphertext: {e}")))
}

/// Read a price (micros) from an authenticated plaintext.
///
/// # Errors
///
/// Returns [`DecryptError::UnexpectedPlaintextLength`] unless `plaintext` is
/// exactly [`PRICE_LEN`] bytes.
pub fn decode_price(plaintext: &[u8]) -> Result<u64, DecryptError> {
    let bytes: [u8; PRICE_LEN] =
        plaintext
            .try_into()
            .map_err(|_| DecryptError::UnexpectedPlaintextLength {
                expected: PRICE_LEN,
                actual: plaintext.len(),
            })?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn price_is_big_endian() {
        let plaintext = [0, 0, 0, 0, 0, 0, 0x07, 0x6C];
        assert_eq!(decode_price(&plaintext).unwrap(), 1_900);
    }

    #[test]
    fn price_requires_eight_bytes() {
        assert_eq!(
            decode_price(&[0u8; 7]),
            Err(DecryptError::UnexpectedPlaintextLength {
                expected: 8,
                actual: 7
            })
        );
        assert!(decode_price(&[0u8; 9]).is_err());
    }

    #[test]
    fn decodes_unpadded_and_padded() {
        // 28 bytes: a price ciphertext.
        let bytes: Vec<u8> = (0u8..28).collect();
        let unpadded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes);
        let padded = base64::engine::general_purpose::URL_SAFE.encode(&bytes);
        assert_eq!(unpadded.len(), 38);
        assert_eq!(decode_ciphertext(&unpadded).unwrap(), bytes);
        assert_eq!(decode_ciphertext(&padded).unwrap(), bytes);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let bytes = vec![0xFBu8; 20];
        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes);
        assert_eq!(decode_ciphertext(&format!(" {encoded}\n")).unwrap(), bytes);
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = decode_ciphertext("not base64!").unwrap_err();
        assert_eq!(err.code(), "invalid_encoding");
    }
}
