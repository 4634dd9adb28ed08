//! Synthetic fixture loader for demos and tests.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime, Utc};

use crate::core::Record;
use crate::error::LoadError;
use crate::loader::RecordsLoader;

/// Produces a fixed set of inspection records without touching the network.
///
/// Optionally fails on a deterministic schedule so the failure path can be
/// exercised reproducibly: `flaky(n)` makes every n-th `fetch` call return an
/// error instead of records.
pub struct FakeLoader {
    fail_every: Option<NonZeroU32>,
    calls: AtomicU32,
}

impl FakeLoader {
    /// A loader that always succeeds.
    pub fn new() -> Self {
        Self {
            fail_every: None,
            calls: AtomicU32::new(0),
        }
    }

    /// A loader whose every `fail_every`-th fetch fails.
    pub fn flaky(fail_every: NonZeroU32) -> Self {
        Self {
            fail_every: Some(fail_every),
            calls: AtomicU32::new(0),
        }
    }

    fn fixture_records() -> Vec<Record> {
        let today = Utc::now().date_naive();
        let day = |days_ago: u64| -> NaiveDate {
            today.checked_sub_days(Days::new(days_ago)).unwrap_or(today)
        };
        let record = |title: &str, address: &str, date: NaiveDate| Record {
            title: title.to_string(),
            address: address.to_string(),
            inspection_date: Some(date.and_time(NaiveTime::MIN)),
        };
        vec![
            record("Inspection 1", "1 N State St", day(0)),
            record("Inspection 2", "200 S Michigan Ave", day(20)),
            record("Inspection 3", "800 W North Ave", day(20)),
            record("Inspection 4", "800 W North Ave", day(40)),
        ]
    }
}

impl Default for FakeLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordsLoader for FakeLoader {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(n) = self.fail_every {
            if call % n.get() == 0 {
                return Err(LoadError::loader("synthetic fetch failure"));
            }
        }
        Ok(Self::fixture_records())
    }
}
