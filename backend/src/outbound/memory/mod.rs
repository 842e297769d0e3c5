//! In-memory repository adapters.
//!
//! Used when no database URL is configured and by HTTP and behaviour tests.
//! Records are kept in insertion order behind a mutex; listings sort newest
//! first with later inserts winning ties, matching the PostgreSQL adapters'
//! `created_at DESC` ordering.

mod nomination_repository;
mod organization_repository;
mod position_repository;
mod user_repository;

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use pagination::PageRequest;

pub use nomination_repository::InMemoryNominationRepository;
pub use organization_repository::InMemoryOrganizationRepository;
pub use position_repository::InMemoryPositionRepository;
pub use user_repository::InMemoryUserRepository;

/// Fields the table needs to identify and order a record.
trait Record: Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! impl_record {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Record for $entity {
                fn id(&self) -> &str {
                    &self.id
                }

                fn created_at(&self) -> DateTime<Utc> {
                    self.created_at
                }
            }
        )+
    };
}

impl_record!(
    crate::domain::User,
    crate::domain::Organization,
    crate::domain::Position,
    crate::domain::Nomination,
);

struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record> Table<T> {
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        match self.rows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn get(&self, id: &str) -> Option<T> {
        self.lock().iter().find(|row| row.id() == id).cloned()
    }

    /// Replace the row with the same id. Returns `false` when absent.
    fn replace(&self, record: &T) -> bool {
        let mut rows = self.lock();
        match rows.iter_mut().find(|row| row.id() == record.id()) {
            Some(row) => {
                *row = record.clone();
                true
            }
            None => false,
        }
    }

    /// Remove the row with `id`. Returns `false` when absent.
    fn remove(&self, id: &str) -> bool {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        rows.len() != before
    }

    /// Matching rows, newest first.
    fn select(&self, matches: impl Fn(&T) -> bool) -> Vec<T> {
        let mut selected: Vec<T> = self
            .lock()
            .iter()
            .rev()
            .filter(|row| matches(row))
            .cloned()
            .collect();
        selected.sort_by_key(|row| std::cmp::Reverse(row.created_at()));
        selected
    }

    fn count(&self, matches: impl Fn(&T) -> bool) -> i64 {
        let total = self.lock().iter().filter(|row| matches(row)).count();
        i64::try_from(total).unwrap_or(i64::MAX)
    }
}

/// Slice a newest-first listing to the requested page.
fn page_of<T>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    let (offset, limit) = page.as_bounds();
    rows.into_iter().skip(offset).take(limit).collect()
}

fn matches_key(filter: Option<&str>, value: &str) -> bool {
    filter.is_none_or(|key| key == value)
}
