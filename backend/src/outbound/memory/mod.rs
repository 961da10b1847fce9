//! In-memory stores.
//!
//! Each store keeps its rows in insertion order behind a mutex together with a
//! monotonic id counter, so ids are never reused after a deletion. A poisoned
//! lock surfaces as a query error rather than a panic.

mod seed;
mod support_requests;
mod workers;

use std::sync::{Mutex, MutexGuard};

pub use seed::{seed_support_requests, seed_workers};
pub use support_requests::InMemorySupportRequestRepository;
pub use workers::InMemoryWorkerRepository;

/// Rows plus the next sequence number to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_sequence: u64,
}

impl<T> Table<T> {
    /// Hold `rows`; the sequence resumes after the highest numeric id among
    /// them. Non-numeric ids never collide with generated ones.
    fn with_rows(rows: Vec<T>, id_of: impl Fn(&T) -> &str) -> Self {
        let next_sequence = rows
            .iter()
            .filter_map(|row| id_of(row).parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            rows,
            next_sequence,
        }
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>, String> {
    table
        .lock()
        .map_err(|_| "in-memory store lock poisoned".to_owned())
}
