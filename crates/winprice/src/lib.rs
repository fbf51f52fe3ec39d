//! Decryption and authentication of real-time-bidding winning-price ciphertexts.
//!
//! The exchange encrypts values it hands to bidders (winning prices and other
//! 64-bit identifiers) with an HMAC-SHA1 keystream and signs them with a
//! truncated HMAC. [`decrypt`] recovers and verifies the plaintext;
//! [`timestamp_from_iv`] reads the encoding time out of the IV.
//!
//! Nothing here encrypts, stores keys, or talks to the network.

pub mod crypto;
pub mod decrypter;
pub mod error;
pub mod keys;
pub mod price;

pub use decrypter::{decrypt, timestamp_from_iv, DecryptedPrice, Decrypter};
pub use error::DecryptError;
pub use keys::{KeyPair, SecretKey};
