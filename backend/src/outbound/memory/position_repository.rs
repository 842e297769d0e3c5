//! In-memory `PositionRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::{Table, matches_key, page_of};
use crate::domain::ports::{PositionFilter, PositionRepository, PositionRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Position, PositionDraft};

/// Position store backed by process memory.
pub struct InMemoryPositionRepository {
    table: Table<Position>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPositionRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Table::default(),
            clock,
        }
    }
}

#[async_trait]
impl PositionRepository for InMemoryPositionRepository {
    async fn create(&self, draft: &PositionDraft) -> Result<Position, PositionRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let position = draft
            .clone()
            .into_position(Uuid::new_v4().to_string(), now, now);
        self.table.lock().push(position.clone());
        Ok(position)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Position>, PositionRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Position>, PositionRepositoryError> {
        Ok(self
            .table
            .select(|position| position.organization_id == organization_id))
    }

    async fn update(&self, position: &Position) -> Result<Position, PositionRepositoryError> {
        if self.table.replace(position) {
            Ok(position.clone())
        } else {
            Err(PositionRepositoryError::not_found(position.id.clone()))
        }
    }

    async fn delete(&self, id: &str) -> Result<(), PositionRepositoryError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(PositionRepositoryError::not_found(id))
        }
    }

    async fn list(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> Result<Vec<Position>, PositionRepositoryError> {
        let org = filter.organization_id.as_deref();
        let rows = self
            .table
            .select(|position| matches_key(org, &position.organization_id));
        Ok(page_of(rows, page))
    }

    async fn count(&self, filter: &PositionFilter) -> Result<i64, PositionRepositoryError> {
        let org = filter.organization_id.as_deref();
        Ok(self
            .table
            .count(|position| matches_key(org, &position.organization_id)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_support::FixtureClock;

    fn draft(organization_id: &str, title: &str) -> PositionDraft {
        PositionDraft {
            organization_id: organization_id.to_owned(),
            title: title.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn organization_filter_applies_to_list_and_count() {
        let repo = InMemoryPositionRepository::new(Arc::new(FixtureClock::default()));
        repo.create(&draft("org-1", "Chair")).await.expect("chair");
        repo.create(&draft("org-1", "Treasurer")).await.expect("treasurer");
        repo.create(&draft("org-2", "Secretary")).await.expect("secretary");

        let filter = PositionFilter::by_organization("org-1");
        let titles: Vec<_> = repo
            .list(&filter, PageRequest::default())
            .await
            .expect("list")
            .into_iter()
            .map(|position| position.title)
            .collect();
        assert_eq!(titles, ["Treasurer", "Chair"]);
        assert_eq!(repo.count(&filter).await.expect("count"), 2);
        assert_eq!(
            repo.count(&PositionFilter::default()).await.expect("count"),
            3
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_the_stored_row() {
        let repo = InMemoryPositionRepository::new(Arc::new(FixtureClock::default()));
        let mut position = repo.create(&draft("org-1", "Chair")).await.expect("create");
        position.title = "President".to_owned();

        repo.update(&position).await.expect("update");
        let stored = repo.find_by_id(&position.id).await.expect("find");
        assert_eq!(stored.map(|found| found.title).as_deref(), Some("President"));
    }
}
