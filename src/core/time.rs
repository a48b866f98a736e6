use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::transaction::TransactionId;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis.store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Hands out transaction ids derived from creation timestamps.
///
/// Ids are the epoch milliseconds of `now`, bumped to `last + 1` whenever the
/// clock has not moved past the previous id, so they strictly increase.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts after `floor` so fresh ids never collide with loaded ones.
    pub fn seeded(floor: Option<TransactionId>) -> Self {
        Self {
            last: floor.map(TransactionId::value),
        }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> TransactionId {
        let candidate = now.timestamp_millis();
        let id = match self.last {
            Some(last) if candidate <= last => last.saturating_add(1),
            _ => candidate,
        };
        self.last = Some(id);
        TransactionId(id)
    }
}
