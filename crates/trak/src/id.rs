//! Hash-based ID generation.
//!
//! IDs are short, collision-resistant hashes derived from SHA256 and encoded
//! as base36, formatted `{prefix}-{hash}` (e.g. "trak-a3f8", "sprint-x1q9").
//! Tickets use the workspace's configured prefix; sprints and users use fixed
//! kind prefixes.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{Error, Result};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HASH_LENGTH: usize = 4;
const MAX_NONCE: u32 = 100;

/// Fixed prefix for sprint ids
pub const SPRINT_PREFIX: &str = "sprint";

/// Fixed prefix for user ids
pub const USER_PREFIX: &str = "user";

/// Hash-based ID generator with collision detection.
///
/// Tracks every id it has seen (generated or registered) so that loading an
/// existing workspace and then creating records cannot produce a duplicate.
#[derive(Debug, Default)]
pub struct IdGenerator {
    existing_ids: HashSet<String>,
}

impl IdGenerator {
    /// Create an empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing ID to prevent collisions.
    pub fn register_id(&mut self, id: impl Into<String>) {
        self.existing_ids.insert(id.into());
    }

    /// Generate a new unique ID with the given prefix, seeded from the
    /// record's content so ids are stable-ish but never predictable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if every nonce collides, which for a 4-char
    /// base36 space only happens with collections far beyond this tool's
    /// intended scale.
    pub fn generate(&mut self, prefix: &str, seed: &str) -> Result<String> {
        for nonce in 0..MAX_NONCE {
            let id = hash_id(prefix, seed, nonce);
            if !self.existing_ids.contains(&id) {
                if nonce > 0 {
                    debug!(nonce, "generated unique id after {} collision retries", nonce);
                }
                self.existing_ids.insert(id.clone());
                return Ok(id);
            }
        }

        Err(Error::Storage(format!(
            "unable to generate a unique id with prefix '{}' after {} attempts",
            prefix, MAX_NONCE
        )))
    }
}

fn hash_id(prefix: &str, seed: &str, nonce: u32) -> String {
    let timestamp = Utc::now().timestamp_micros();
    let content = format!("{}|{}|{}", seed, timestamp, nonce);

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let hash_bytes = hasher.finalize();

    format!(
        "{}-{}",
        prefix,
        encode_base36(&hash_bytes[..8], HASH_LENGTH)
    )
}

/// Encode the first bytes of a hash as a fixed-length base36 string.
///
/// The caller passes at most 8 bytes; wrapping arithmetic keeps the
/// conversion deterministic either way.
fn encode_base36(bytes: &[u8], length: usize) -> String {
    let mut num: u64 = 0;
    for &byte in bytes {
        num = num.wrapping_shl(8).wrapping_add(u64::from(byte));
    }

    let mut result = Vec::with_capacity(length);
    let mut n = num;
    while result.len() < length {
        result.push(BASE36_CHARS[(n % 36) as usize]);
        n /= 36;
    }
    result.reverse();

    // Only base36 alphabet bytes were pushed, so this cannot fail
    String::from_utf8(result).unwrap_or_default()
}

/// Check that an id looks like `{prefix}-{hash}`.
pub fn validate_id(id: &str, prefix: &str) -> bool {
    let Some(hash) = id.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')) else {
        return false;
    };
    hash.len() == HASH_LENGTH && hash.chars().all(|c| c.is_ascii_alphanumeric())
}
