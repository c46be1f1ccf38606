//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// A `{ content: [...] }` lookup envelope with one bilingual entry per
/// `(id, code, name_en, name_fr)` row.
pub fn lookup_envelope(rows: &[(i64, &str, &str, &str)]) -> serde_json::Value {
    let content: Vec<_> = rows
        .iter()
        .map(|(id, code, name_en, name_fr)| {
            serde_json::json!({ "id": id, "code": code, "nameEn": name_en, "nameFr": name_fr })
        })
        .collect();
    serde_json::json!({ "content": content })
}
