//! Application identifier generation.
//!
//! The registry asks an [`IdGenerator`] for each new id, so tests and demos
//! can swap the time+random default for a deterministic sequence.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::ApplicationId;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 5;

/// Source of fresh application identifiers.
pub trait IdGenerator {
    /// Produce the next identifier. `now` is the creation timestamp of the
    /// application being registered.
    fn next_id(&mut self, now: DateTime<Utc>) -> ApplicationId;
}

/// Default generator: `APP-<millis in base36>-<5 random base36 chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self, now: DateTime<Utc>) -> ApplicationId {
        let millis = u128::try_from(now.timestamp_millis()).unwrap_or_default();
        let mut random = Uuid::new_v4().as_u128();
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        for _ in 0..SUFFIX_LEN {
            suffix.push(BASE36[(random % 36) as usize] as char);
            random /= 36;
        }
        ApplicationId(format!("APP-{}-{suffix}", to_base36(millis)))
    }
}

/// Deterministic generator yielding `APP-0001`, `APP-0002`, …
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    next: u32,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, _now: DateTime<Utc>) -> ApplicationId {
        self.next += 1;
        ApplicationId(format!("APP-{:04}", self.next))
    }
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
