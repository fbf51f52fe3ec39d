//! JSON reports written to stdout, one per ciphertext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use winprice::{price::decode_ciphertext, timestamp_from_iv, DecryptError, Decrypter};

/// Outcome of decrypting one ciphertext.
///
/// Exactly one of the value fields or `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The ciphertext as given (trimmed).
    pub ciphertext: String,
    /// Decrypted price in micros (price mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_micros: Option<u64>,
    /// Decrypted plaintext as lowercase hex (`--raw` mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plaintext_hex: Option<String>,
    /// Encoding time from the IV, only reported once the signature checked out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Machine-readable failure description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error code (e.g. `"integrity_failure"`).
    pub code: String,
    pub message: String,
}

impl Report {
    fn failed(ciphertext: &str, err: &DecryptError) -> Self {
        Self {
            ciphertext: ciphertext.to_owned(),
            price_micros: None,
            plaintext_hex: None,
            timestamp: None,
            error: Some(ErrorBody {
                code: err.code().to_owned(),
                message: err.to_string(),
            }),
        }
    }

    /// `true` if this ciphertext could not be decrypted.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Decrypt `ciphertext` and describe the outcome.
///
/// Per-ciphertext failures (bad encoding, short input, signature mismatch)
/// are folded into the report.
///
/// # Errors
///
/// Returns [`DecryptError::Configuration`] unchanged: a key problem affects
/// every ciphertext and must abort the run.
pub fn decrypt_one(
    decrypter: &Decrypter,
    ciphertext: &str,
    raw: bool,
) -> Result<Report, DecryptError> {
    let ciphertext = ciphertext.trim();
    let outcome = if raw {
        decrypt_raw(decrypter, ciphertext)
    } else {
        decrypt_price(decrypter, ciphertext)
    };
    match outcome {
        Ok(report) => Ok(report),
        Err(e @ DecryptError::Configuration(_)) => Err(e),
        Err(e) => {
            warn!(code = e.code(), recoverable = e.is_recoverable(), "ciphertext rejected");
            Ok(Report::failed(ciphertext, &e))
        }
    }
}

fn decrypt_price(decrypter: &Decrypter, ciphertext: &str) -> Result<Report, DecryptError> {
    let price = decrypter.decrypt_price(ciphertext)?;
    Ok(Report {
        ciphertext: ciphertext.to_owned(),
        price_micros: Some(price.micros),
        plaintext_hex: None,
        timestamp: Some(price.timestamp),
        error: None,
    })
}

fn decrypt_raw(decrypter: &Decrypter, ciphertext: &str) -> Result<Report, DecryptError> {
    let bytes = decode_ciphertext(ciphertext)?;
    let plaintext = decrypter.decrypt(&bytes)?;
    Ok(Report {
        ciphertext: ciphertext.to_owned(),
        price_micros: None,
        plaintext_hex: Some(hex::encode(plaintext)),
        timestamp: Some(timestamp_from_iv(&bytes)?),
        error: None,
    })
}
