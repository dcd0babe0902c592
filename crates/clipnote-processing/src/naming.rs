//! Storage key generation.
//!
//! Keys have the form `{unix_millis}-{suffix}{extension}`, where `suffix` is
//! a random integer in `[0, 1e9)` and `extension` is the original filename's
//! extension (from its last `.`, inclusive). Extensions longer than
//! `MAX_EXTENSION_BYTES` are dropped so keys stay well under filesystem
//! name limits.

use chrono::Utc;
use clipnote_core::constants::{KEY_SUFFIX_BOUND, MAX_EXTENSION_BYTES};
use rand::Rng;
use std::sync::Arc;

/// Source of the millisecond timestamp embedded in keys.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Source of the random key suffix.
///
/// `attempt` counts re-rolls after a collision. Implementations must return a
/// fresh draw for every call rather than deriving the suffix from `attempt`.
pub trait SuffixSource: Send + Sync {
    fn next_suffix(&self, attempt: u32) -> u32;
}

/// Draws from the calling thread's RNG, so concurrent uploads never share a lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSuffix;

impl SuffixSource for ThreadRngSuffix {
    fn next_suffix(&self, _attempt: u32) -> u32 {
        rand::rng().random_range(0..KEY_SUFFIX_BOUND)
    }
}

/// Mints storage keys from a clock and a suffix source.
#[derive(Clone)]
pub struct NameGenerator {
    clock: Arc<dyn Clock>,
    suffixes: Arc<dyn SuffixSource>,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::with_sources(Arc::new(SystemClock), Arc::new(ThreadRngSuffix))
    }

    pub fn with_sources(clock: Arc<dyn Clock>, suffixes: Arc<dyn SuffixSource>) -> Self {
        Self { clock, suffixes }
    }

    /// Generate a storage key for `original_name`.
    pub fn generate(&self, original_name: &str, attempt: u32) -> String {
        let millis = self.clock.now_millis();
        let suffix = self.suffixes.next_suffix(attempt) % KEY_SUFFIX_BOUND;
        format!("{}-{}{}", millis, suffix, extension_of(original_name))
    }
}

/// Extension of `original_name`, from its last `.` inclusive, or `""`.
///
/// Only the final path component is considered, so a client-supplied name
/// can never smuggle a separator into the key. An extension longer than
/// `MAX_EXTENSION_BYTES` (dot included) is dropped entirely.
pub fn extension_of(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    match base.rfind('.') {
        Some(idx) if base.len() - idx <= MAX_EXTENSION_BYTES => &base[idx..],
        _ => "",
    }
}
