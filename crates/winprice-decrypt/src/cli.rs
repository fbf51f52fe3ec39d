//! Command-line arguments.

use clap::Parser;

/// Decrypt and verify winning-price ciphertexts.
///
/// Keys are read from WINPRICE_ENCRYPTION_KEY and WINPRICE_INTEGRITY_KEY
/// (web-safe base64). Prints one JSON report per ciphertext to stdout.
#[derive(Debug, Parser)]
#[command(name = "winprice-decrypt", version)]
pub struct Args {
    /// Web-safe base64 ciphertexts. Read from stdin, one per line, when omitted.
    pub ciphertexts: Vec<String>,

    /// Report the plaintext as hex instead of decoding a 64-bit price.
    #[arg(long)]
    pub raw: bool,
}
