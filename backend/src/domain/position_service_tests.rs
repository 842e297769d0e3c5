//! Tests for the position service.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockPositionRepository;
use crate::test_support::{CapturedLogs, FixtureClock};

#[fixture]
fn clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::default())
}

fn service(
    repo: MockPositionRepository,
    clock: Arc<FixtureClock>,
) -> PositionService<MockPositionRepository> {
    PositionService::new(Arc::new(repo), clock)
}

fn draft(title: &str) -> PositionDraft {
    PositionDraft {
        organization_id: "org-1".to_owned(),
        title: title.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_title(clock: Arc<FixtureClock>) {
    let mut repo = MockPositionRepository::new();
    repo.expect_create().times(0);

    let err = service(repo, clock)
        .create(draft(""))
        .await
        .expect_err("title missing");
    assert_eq!(err.message(), "validation failed: title is required");
}

#[rstest]
#[tokio::test]
async fn get_by_organization_rejects_blank_key(clock: Arc<FixtureClock>) {
    let mut repo = MockPositionRepository::new();
    repo.expect_find_by_organization().times(0);

    let err = service(repo, clock)
        .get_by_organization("  ")
        .await
        .expect_err("blank key");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "organization ID cannot be empty");
}

#[rstest]
#[tokio::test]
async fn get_by_id_rejects_blank_key(clock: Arc<FixtureClock>) {
    let mut repo = MockPositionRepository::new();
    repo.expect_find_by_id().times(0);

    let err = service(repo, clock)
        .get_by_id("")
        .await
        .expect_err("blank key");
    assert_eq!(err.message(), "position ID cannot be empty");
}

#[rstest]
#[tokio::test]
async fn update_advances_updated_at_on_a_stalled_clock(clock: Arc<FixtureClock>) {
    let stamp = clock.utc();
    let existing = draft("Chair").into_position("pos-1".to_owned(), stamp, stamp);

    let mut repo = MockPositionRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .withf(move |position: &Position| {
            position.created_at == stamp
                && position.updated_at == stamp + TimeDelta::microseconds(1)
                && position.title == "Treasurer"
        })
        .times(1)
        .return_once(|position| Ok(position.clone()));

    let updated = service(repo, clock)
        .update("pos-1", draft("Treasurer"))
        .await
        .expect("position updated");
    assert_eq!(updated.title, "Treasurer");
}

#[rstest]
#[tokio::test]
async fn update_logs_the_stored_position(clock: Arc<FixtureClock>) {
    let stamp = clock.utc();
    let existing = draft("Chair").into_position("pos-1".to_owned(), stamp, stamp);

    let mut repo = MockPositionRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .return_once(|position| Ok(position.clone()));

    let (logs, _guard) = CapturedLogs::install();
    service(repo, clock)
        .update("pos-1", draft("Treasurer"))
        .await
        .expect("position updated");

    let output = logs.contents();
    assert!(output.contains("position updated"), "{output}");
    assert!(output.contains("position_id=pos-1"), "{output}");
}

#[rstest]
#[tokio::test]
async fn list_passes_organization_filter(clock: Arc<FixtureClock>) {
    let mut repo = MockPositionRepository::new();
    repo.expect_list()
        .withf(|filter, page| {
            filter.organization_id.as_deref() == Some("org-1") && page.limit() == 10
        })
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let positions = service(repo, clock)
        .list("org-1", 0, 0)
        .await
        .expect("list succeeds");
    assert!(positions.is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_missing_position_is_not_found(clock: Arc<FixtureClock>) {
    let mut repo = MockPositionRepository::new();
    repo.expect_delete()
        .return_once(|id| Err(PositionRepositoryError::not_found(id)));

    let err = service(repo, clock)
        .delete("pos-404")
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "position not found");
}
