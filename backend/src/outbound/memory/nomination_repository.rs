//! In-memory `NominationRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::{Table, matches_key, page_of};
use crate::domain::ports::{NominationFilter, NominationRepository, NominationRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Nomination, NominationDraft, NominationStatus};

/// Nomination store backed by process memory.
pub struct InMemoryNominationRepository {
    table: Table<Nomination>,
    clock: Arc<dyn Clock>,
}

impl InMemoryNominationRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Table::default(),
            clock,
        }
    }
}

#[async_trait]
impl NominationRepository for InMemoryNominationRepository {
    async fn create(
        &self,
        draft: &NominationDraft,
    ) -> Result<Nomination, NominationRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let nomination = draft
            .clone()
            .into_nomination(Uuid::new_v4().to_string(), now, now);
        self.table.lock().push(nomination.clone());
        Ok(nomination)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Nomination>, NominationRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_by_position(
        &self,
        position_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        Ok(self
            .table
            .select(|nomination| nomination.position_id == position_id))
    }

    async fn find_by_nominee(
        &self,
        nominee_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        Ok(self
            .table
            .select(|nomination| nomination.nominee_id == nominee_id))
    }

    async fn find_by_nominator(
        &self,
        nominator_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        Ok(self
            .table
            .select(|nomination| nomination.nominator_id == nominator_id))
    }

    async fn update(
        &self,
        nomination: &Nomination,
    ) -> Result<Nomination, NominationRepositoryError> {
        if self.table.replace(nomination) {
            Ok(nomination.clone())
        } else {
            Err(NominationRepositoryError::not_found(nomination.id.clone()))
        }
    }

    async fn update_status(
        &self,
        id: &str,
        status: NominationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), NominationRepositoryError> {
        let mut rows = self.table.lock();
        let row = rows
            .iter_mut()
            .find(|nomination| nomination.id == id)
            .ok_or_else(|| NominationRepositoryError::not_found(id))?;
        row.status = status;
        row.updated_at = to_storage_precision(updated_at);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), NominationRepositoryError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(NominationRepositoryError::not_found(id))
        }
    }

    async fn list(
        &self,
        filter: &NominationFilter,
        page: PageRequest,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        let position = filter.position_id.as_deref();
        let rows = self
            .table
            .select(|nomination| matches_key(position, &nomination.position_id));
        Ok(page_of(rows, page))
    }

    async fn count(&self, filter: &NominationFilter) -> Result<i64, NominationRepositoryError> {
        let position = filter.position_id.as_deref();
        Ok(self
            .table
            .count(|nomination| matches_key(position, &nomination.position_id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::FixtureClock;

    #[fixture]
    fn repo() -> InMemoryNominationRepository {
        InMemoryNominationRepository::new(Arc::new(FixtureClock::default()))
    }

    fn draft(nominee: &str, nominator: &str) -> NominationDraft {
        NominationDraft {
            position_id: "pos-1".to_owned(),
            nominee_id: nominee.to_owned(),
            nominator_id: nominator.to_owned(),
            status: NominationStatus::Pending,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_leaves_other_fields_alone(repo: InMemoryNominationRepository) {
        let created = repo.create(&draft("u1", "u2")).await.expect("create");
        let later = created.updated_at + TimeDelta::seconds(5);

        repo.update_status(&created.id, NominationStatus::Accepted, later)
            .await
            .expect("status");
        let stored = repo
            .find_by_id(&created.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.status, NominationStatus::Accepted);
        assert_eq!(stored.updated_at, later);
        assert_eq!(stored.created_at, created.created_at);
        assert_eq!(stored.nominee_id, created.nominee_id);
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_on_missing_row_is_not_found(repo: InMemoryNominationRepository) {
        let err = repo
            .update_status("ghost", NominationStatus::Declined, Utc::now())
            .await
            .expect_err("missing");
        assert_eq!(err, NominationRepositoryError::not_found("ghost"));
    }

    #[rstest]
    #[tokio::test]
    async fn relation_lookups_match_their_column(repo: InMemoryNominationRepository) {
        repo.create(&draft("u1", "u2")).await.expect("first");
        repo.create(&draft("u2", "u1")).await.expect("second");
        repo.create(&draft("u1", "u3")).await.expect("third");

        assert_eq!(repo.find_by_nominee("u1").await.expect("nominee").len(), 2);
        assert_eq!(repo.find_by_nominator("u1").await.expect("nominator").len(), 1);
        assert_eq!(repo.find_by_position("pos-1").await.expect("position").len(), 3);
        assert!(repo.find_by_position("pos-2").await.expect("position").is_empty());
    }
}
