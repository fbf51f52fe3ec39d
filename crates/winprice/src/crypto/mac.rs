//! HMAC-SHA1, the keyed hash behind both the keystream and the signature.
//!
//! Every call builds a fresh MAC context from the key, so no hashing state is
//! ever shared between blocks, calls, or threads.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::DecryptError;

type HmacSha1 = Hmac<Sha1>;

/// Byte length of an HMAC-SHA1 output (and of one keystream block).
pub const MAC_LEN: usize = 20;

/// Compute `HMAC-SHA1(key, parts[0] || parts[1] || ...)`.
///
/// # Errors
///
/// Returns [`DecryptError::Configuration`] if the primitive rejects the key.
pub fn hmac_sha1(key: &[u8], parts: &[&[u8]]) -> Result<[u8; MAC_LEN], DecryptError> {
    let mac = keyed(key, parts)?;
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; MAC_LEN];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Check `expected` against the leftmost bytes of `HMAC-SHA1(key, parts...)`
/// in constant time. Every byte of `expected` takes part in the comparison.
///
/// # Errors
///
/// Returns [`DecryptError::IntegrityFailure`] on mismatch and
/// [`DecryptError::Configuration`] if the primitive rejects the key.
pub fn verify_truncated(
    key: &[u8],
    parts: &[&[u8]],
    expected: &[u8],
) -> Result<(), DecryptError> {
    keyed(key, parts)?
        .verify_truncated_left(expected)
        .map_err(|_| DecryptError::IntegrityFailure)
}

fn keyed(key: &[u8], parts: &[&[u8]]) -> Result<HmacSha1, DecryptError> {
    let mut mac = HmacSha1::new_from_slice(key)
        .map_err(|_| DecryptError::Configuration("key rejected by HMAC-SHA1".into()))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2202, test case 1.
    #[test]
    fn rfc2202_case_1() {
        let key = [0x0bu8; 20];
        let tag = hmac_sha1(&key, &[&b"Hi There"[..]]).unwrap();
        assert_eq!(hex::encode(tag), "b617318655057264e28bc0b6fb378c8ef146be00");
    }

    // RFC 2202, test case 2.
    #[test]
    fn rfc2202_case_2() {
        let tag = hmac_sha1(b"Jefe", &[&b"what do ya want for nothing?"[..]]).unwrap();
        assert_eq!(hex::encode(tag), "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn parts_are_concatenated() {
        let whole = hmac_sha1(b"Jefe", &[&b"what do ya want for nothing?"[..]]).unwrap();
        let parts: [&[u8]; 3] = [b"what do ya ", b"", b"want for nothing?"];
        let split = hmac_sha1(b"Jefe", &parts).unwrap();
        assert_eq!(whole, split);
    }

    #[test]
    fn verify_truncated_accepts_prefix() {
        let tag = hmac_sha1(b"Jefe", &[&b"payload"[..]]).unwrap();
        assert!(verify_truncated(b"Jefe", &[&b"payload"[..]], &tag[..4]).is_ok());
    }

    #[test]
    fn verify_truncated_rejects_mismatch() {
        let mut tag = hmac_sha1(b"Jefe", &[&b"payload"[..]]).unwrap();
        tag[3] ^= 0x01;
        assert_eq!(
            verify_truncated(b"Jefe", &[&b"payload"[..]], &tag[..4]),
            Err(DecryptError::IntegrityFailure)
        );
    }
}
