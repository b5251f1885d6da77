//! One-way password digests.
//!
//! Only the digest is ever stored; plaintext is dropped as soon as the
//! digest is computed and never appears in logs or Debug output.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn from_password(password: &str) -> Self {
        Self(hex::encode(Sha256::digest(password.as_bytes())))
    }

    /// Login equality: recompute the candidate's digest and compare.
    pub fn verify(&self, password: &str) -> bool {
        Self::from_password(password) == *self
    }
}

// Redacted: digests identify passwords with low entropy, so they stay out
// of Debug output too.
impl core::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
