//! Hashing and signatures over multi-part byte payloads.
//!
//! Every operation treats its parts as one concatenated message, so empty
//! parts never change the result.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, Signature, Signer, Verifier};
use num_bigint::{BigInt, Sign};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::PackError;

pub use ed25519_dalek::{SigningKey, VerifyingKey};

/// SHA-256 over the concatenation of `parts`.
pub fn hash(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Generates a fresh Ed25519 key pair from the OS random source.
pub fn generate_keypair() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

/// Signs the concatenation of `parts`.
pub fn sign(parts: &[&[u8]], key: &SigningKey) -> Vec<u8> {
    key.sign(&parts.concat()).to_bytes().to_vec()
}

/// Checks `signature` against the concatenation of `parts`.
///
/// A signature of the wrong length or shape simply fails to verify.
pub fn verify(signature: &[u8], parts: &[&[u8]], key: &VerifyingKey) -> bool {
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    key.verify(&parts.concat(), &signature).is_ok()
}

/// Encodes a public key as a non-negative big integer.
pub fn public_key_to_bigint(key: &VerifyingKey) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, key.as_bytes())
}

/// Inverse of [`public_key_to_bigint`].
pub fn bigint_to_public_key(value: &BigInt) -> Result<VerifyingKey, PackError> {
    let (sign, magnitude) = value.to_bytes_be();
    if sign == Sign::Minus {
        return Err(PackError::Crypto("public key integer is negative".into()));
    }
    if magnitude.len() > PUBLIC_KEY_LENGTH {
        return Err(PackError::Crypto(format!(
            "public key integer is {} bytes, expected at most {PUBLIC_KEY_LENGTH}",
            magnitude.len()
        )));
    }
    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    bytes[PUBLIC_KEY_LENGTH - magnitude.len()..].copy_from_slice(&magnitude);
    VerifyingKey::from_bytes(&bytes).map_err(PackError::crypto)
}
