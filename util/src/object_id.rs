//! Record identifiers.
//!
//! Every entity is keyed by a 24 character hexadecimal string: a 4-byte
//! big-endian seconds timestamp, 5 random bytes fixed per process, and a
//! 3-byte counter seeded randomly. Ids generated by one process therefore sort
//! roughly by creation time and never collide within the same second.

use rand::Rng;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

pub const ID_LEN: usize = 24;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Generates a fresh identifier.
pub fn new_id() -> String {
    let seconds = chrono::Utc::now().timestamp().max(0) as u32;
    let unique = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().r#gen());
    let counter = COUNTER
        .get_or_init(|| AtomicU32::new(rand::thread_rng().r#gen::<u32>() & 0x00ff_ffff))
        .fetch_add(1, Ordering::Relaxed)
        & 0x00ff_ffff;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..9].copy_from_slice(unique);
    bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
    hex::encode(bytes)
}

/// Returns true only for a well-formed identifier: exactly 24 ASCII hex digits.
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == ID_LEN && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}
