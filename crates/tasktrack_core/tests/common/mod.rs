#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::cell::Cell;
use std::sync::atomic::{AtomicI64, Ordering};
use tasktrack_core::{KeyValueStorage, StorageError, StorageResult};

/// Clock that starts at a fixed instant and moves forward one second per read.
pub struct StepClock {
    next_secs: AtomicI64,
}

impl StepClock {
    pub fn starting_at(secs: i64) -> Self {
        Self {
            next_secs: AtomicI64::new(secs),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::starting_at(1_700_000_000)
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let secs = self.next_secs.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).unwrap()
    }
}

/// Clock frozen at one instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn later(base: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    base + Duration::seconds(secs)
}

/// Storage whose reads or writes can be switched off to simulate a locked
/// or full backend.
#[derive(Default)]
pub struct FlakyStorage {
    inner: tasktrack_core::InMemoryStorage,
    reject_reads: Cell<bool>,
    reject_writes: Cell<bool>,
}

impl FlakyStorage {
    pub fn reject_reads(&self, reject: bool) {
        self.reject_reads.set(reject);
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.reject_reads.get() {
            return Err(StorageError::Unavailable("database is locked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.reject_writes.get() {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}
