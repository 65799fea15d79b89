//! The single shared display slot.
//!
//! Requests take a [`Ticket`] when they are issued. A completed request is applied
//! only if its ticket is newer than every ticket applied before it, so a slow
//! early response can never overwrite the result of a later request.

use parking_lot::Mutex;

use crate::model::WeatherRecord;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    NoData,
    Loaded(WeatherRecord),
}

impl DisplayState {
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            DisplayState::NoData => None,
            DisplayState::Loaded(record) => Some(record),
        }
    }
}

/// Sequence number handed out at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// A newer request already landed; the record was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct Inner {
    display: DisplayState,
    next_ticket: u64,
    last_applied: Option<Ticket>,
}

#[derive(Debug, Default)]
pub struct WeatherStore {
    inner: Mutex<Inner>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let mut inner = self.inner.lock();
        inner.next_ticket += 1;
        Ticket(inner.next_ticket)
    }

    pub fn apply(&self, ticket: Ticket, record: WeatherRecord) -> ApplyResult {
        let mut inner = self.inner.lock();

        if inner.last_applied.is_some_and(|last| ticket <= last) {
            return ApplyResult::Stale;
        }

        inner.last_applied = Some(ticket);
        inner.display = DisplayState::Loaded(record);
        ApplyResult::Applied
    }

    pub fn snapshot(&self) -> DisplayState {
        self.inner.lock().display.clone()
    }
}
