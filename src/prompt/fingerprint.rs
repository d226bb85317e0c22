//! Random default offered in place of the insecure secret placeholder.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hashes the current time together with random bytes into a hex string.
///
/// The result is only a convenience default the user may override.
pub fn generate() -> String {
    let mut salt = [0u8; 16];
    OsRng.fill_bytes(&mut salt);

    let now = chrono::Utc::now();
    let timestamp = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp());

    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_le_bytes());
    hasher.update(salt);
    hex::encode(hasher.finalize())
}
