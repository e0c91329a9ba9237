//! Session-wide id source for modules and lessons.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out `m<n>` / `l<n>` ids from one strictly increasing counter seeded
/// with the wall clock in milliseconds, so ids never repeat within a session
/// even when several are created in the same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis().max(0) as u64)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    pub fn module_id(&self) -> String {
        format!("m{}", self.bump())
    }

    pub fn lesson_id(&self) -> String {
        format!("l{}", self.bump())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
