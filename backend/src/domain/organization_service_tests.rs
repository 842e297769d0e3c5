//! Tests for the organization service.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockOrganizationRepository;
use crate::test_support::FixtureClock;

#[fixture]
fn clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::default())
}

fn draft(name: &str, owner: &str) -> OrganizationDraft {
    OrganizationDraft {
        name: name.to_owned(),
        logo: "https://img.example/logo.png".to_owned(),
        owner_user_id: owner.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn create_validates_before_storage(clock: Arc<FixtureClock>) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_create().times(0);

    let err = OrganizationService::new(Arc::new(repo), clock)
        .create(draft("Guild", ""))
        .await
        .expect_err("owner missing");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "validation failed: owner user ID is required");
}

#[rstest]
#[tokio::test]
async fn create_returns_the_stored_record(clock: Arc<FixtureClock>) {
    let now = clock.utc();
    let mut repo = MockOrganizationRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(move |draft| {
            Ok(draft
                .clone()
                .into_organization("org-1".to_owned(), now, now))
        });

    let organization = OrganizationService::new(Arc::new(repo), clock)
        .create(draft("Guild", "user-1"))
        .await
        .expect("organization created");
    assert_eq!(organization.id, "org-1");
    assert_eq!(organization.created_at, organization.updated_at);
}

#[rstest]
#[case("")]
#[case(" \t")]
#[tokio::test]
async fn get_by_owner_rejects_blank_owner(clock: Arc<FixtureClock>, #[case] owner: &str) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_owner().times(0);

    let err = OrganizationService::new(Arc::new(repo), clock)
        .get_by_owner(owner)
        .await
        .expect_err("blank owner");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "owner user ID cannot be empty");
}

#[rstest]
#[tokio::test]
async fn get_by_owner_may_be_empty(clock: Arc<FixtureClock>) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_owner()
        .withf(|owner: &str| owner == "user-9")
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let organizations = OrganizationService::new(Arc::new(repo), clock)
        .get_by_owner("user-9")
        .await
        .expect("lookup succeeds");
    assert!(organizations.is_empty());
}

#[rstest]
#[tokio::test]
async fn update_carries_created_at_over(clock: Arc<FixtureClock>) {
    let created_at = clock.utc() - TimeDelta::days(2);
    let existing = draft("Guild", "user-1").into_organization(
        "org-1".to_owned(),
        created_at,
        created_at,
    );

    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .withf(move |organization: &Organization| {
            organization.created_at == created_at
                && organization.updated_at > created_at
                && organization.name == "Renamed"
        })
        .times(1)
        .return_once(|organization| Ok(organization.clone()));

    let updated = OrganizationService::new(Arc::new(repo), clock)
        .update("org-1", draft("Renamed", "user-1"))
        .await
        .expect("organization updated");
    assert_eq!(updated.created_at, created_at);
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_organization(clock: Arc<FixtureClock>) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let err = OrganizationService::new(Arc::new(repo), clock)
        .update("org-404", draft("Guild", "user-1"))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "organization not found");
}

#[rstest]
#[tokio::test]
async fn list_is_unfiltered_and_clamped(clock: Arc<FixtureClock>) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_list()
        .withf(|page| page.limit() == 100 && page.offset() == 0)
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    repo.expect_count().times(1).return_once(|| Ok(0));

    let service = OrganizationService::new(Arc::new(repo), clock);
    assert!(service.list(1_000, -4).await.expect("list").is_empty());
    assert_eq!(service.count().await.expect("count"), 0);
}

#[rstest]
#[tokio::test]
async fn delete_reports_timeout(clock: Arc<FixtureClock>) {
    let mut repo = MockOrganizationRepository::new();
    repo.expect_delete()
        .return_once(|_| Err(OrganizationRepositoryError::timeout("delete")));

    let err = OrganizationService::new(Arc::new(repo), clock)
        .delete("org-1")
        .await
        .expect_err("timeout");
    assert_eq!(err.code(), ErrorCode::Timeout);
}
