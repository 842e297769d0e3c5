//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test provisions its own database from the migrated template and
//! drives the adapter through a dedicated Tokio runtime.

use std::future::Future;
use std::sync::Arc;

use ballot_backend::domain::ports::{UserFilter, UserRepository, UserRepositoryError};
use ballot_backend::domain::{User, UserDraft};
use ballot_backend::outbound::persistence::DieselUserRepository;
use ballot_backend::test_support::FixtureClock;
use chrono::TimeDelta;
use mockable::Clock;
use pagination::PageRequest;
use rstest::{fixture, rstest};

mod support;

use support::{PooledDatabase, drop_table, handle_cluster_setup_failure};

struct TestContext {
    repository: DieselUserRepository,
    clock: Arc<FixtureClock>,
    db: PooledDatabase,
}

impl TestContext {
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.db.runtime.block_on(future)
    }

    fn create(&self, email: &str, organization_id: &str) -> User {
        self.block_on(self.repository.create(&draft(email, organization_id)))
            .expect("create user")
    }
}

fn draft(email: &str, organization_id: &str) -> UserDraft {
    UserDraft {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: email.to_owned(),
        password: "engine1".to_owned(),
        organization_id: organization_id.to_owned(),
        ..UserDraft::default()
    }
}

fn setup_context() -> Result<TestContext, String> {
    let db = PooledDatabase::provision()?;
    let clock = Arc::new(FixtureClock::default());
    let repository = DieselUserRepository::new(db.pool.clone(), clock.clone());
    Ok(TestContext {
        repository,
        clock,
        db,
    })
}

#[fixture]
fn diesel_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn create_round_trips_through_both_lookups(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_round_trips_through_both_lookups skipped");
        return;
    };

    let user = ctx.create("ada@example.com", "org-1");
    assert_eq!(user.created_at, ctx.clock.utc());
    assert_eq!(user.created_at, user.updated_at);

    let by_id = ctx
        .block_on(ctx.repository.find_by_id(&user.id))
        .expect("find by id");
    let by_email = ctx
        .block_on(ctx.repository.find_by_email("ada@example.com"))
        .expect("find by email");
    assert_eq!(by_id.as_ref(), Some(&user));
    assert_eq!(by_email, Some(user));
}

#[rstest]
fn create_rejects_taken_email(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_rejects_taken_email skipped");
        return;
    };

    ctx.create("ada@example.com", "org-1");
    let err = ctx
        .block_on(ctx.repository.create(&draft("ada@example.com", "org-2")))
        .expect_err("duplicate email");

    assert_eq!(err, UserRepositoryError::duplicate_email("ada@example.com"));
}

#[rstest]
fn update_rejects_email_held_by_another_user(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_rejects_email_held_by_another_user skipped");
        return;
    };

    ctx.create("ada@example.com", "org-1");
    let grace = ctx.create("grace@example.com", "org-1");

    let mut renamed = grace.clone();
    renamed.email = "ada@example.com".to_owned();
    let err = ctx
        .block_on(ctx.repository.update(&renamed))
        .expect_err("duplicate email");
    assert_eq!(err, UserRepositoryError::duplicate_email("ada@example.com"));

    let stored = ctx
        .block_on(ctx.repository.find_by_id(&grace.id))
        .expect("find");
    assert_eq!(stored, Some(grace));
}

#[rstest]
fn update_replaces_every_column(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_every_column skipped");
        return;
    };

    let user = ctx.create("ada@example.com", "org-1");
    let mut changed = user.clone();
    changed.first_name = "Augusta".to_owned();
    changed.role = "admin".to_owned();
    changed.organization_id = "org-2".to_owned();
    changed.updated_at = user.updated_at + TimeDelta::seconds(30);

    let updated = ctx
        .block_on(ctx.repository.update(&changed))
        .expect("update");
    assert_eq!(updated, changed);
    assert_eq!(updated.created_at, user.created_at);
}

#[rstest]
fn update_and_delete_report_missing_rows(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_and_delete_report_missing_rows skipped");
        return;
    };

    let now = ctx.clock.utc();
    let ghost = draft("ghost@example.com", "org-1").into_user("ghost".to_owned(), now, now);

    assert_eq!(
        ctx.block_on(ctx.repository.update(&ghost)),
        Err(UserRepositoryError::not_found("ghost"))
    );
    assert_eq!(
        ctx.block_on(ctx.repository.delete("ghost")),
        Err(UserRepositoryError::not_found("ghost"))
    );
}

#[rstest]
fn delete_removes_the_row(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_row skipped");
        return;
    };

    let user = ctx.create("ada@example.com", "org-1");
    ctx.block_on(ctx.repository.delete(&user.id))
        .expect("delete");

    let found = ctx
        .block_on(ctx.repository.find_by_id(&user.id))
        .expect("find");
    assert!(found.is_none());
}

#[rstest]
fn list_filters_orders_newest_first_and_clamps(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: list_filters_orders_newest_first_and_clamps skipped");
        return;
    };

    let first = ctx.create("1@example.com", "org-1");
    ctx.clock.advance(TimeDelta::seconds(1));
    let second = ctx.create("2@example.com", "org-2");
    ctx.clock.advance(TimeDelta::seconds(1));
    let third = ctx.create("3@example.com", "org-1");

    let org_one = ctx
        .block_on(
            ctx.repository
                .list(&UserFilter::by_organization("org-1"), PageRequest::default()),
        )
        .expect("filtered list");
    let ids: Vec<_> = org_one.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, [third.id.as_str(), first.id.as_str()]);

    let clamped = ctx
        .block_on(
            ctx.repository
                .list(&UserFilter::default(), PageRequest::new(500, -3)),
        )
        .expect("clamped list");
    let ids: Vec<_> = clamped.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(
        ids,
        [third.id.as_str(), second.id.as_str(), first.id.as_str()]
    );

    let last_page = ctx
        .block_on(
            ctx.repository
                .list(&UserFilter::default(), PageRequest::new(2, 2)),
        )
        .expect("last page");
    assert_eq!(last_page, [first]);

    let count = ctx
        .block_on(ctx.repository.count(&UserFilter::by_organization("org-1")))
        .expect("count");
    assert_eq!(count, 2);
}

#[rstest]
fn reports_query_error_when_schema_missing(diesel_context: Option<TestContext>) {
    let Some(ctx) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: reports_query_error_when_schema_missing skipped");
        return;
    };

    drop_table(&ctx.db.url, "users").expect("drop users");
    let err = ctx
        .block_on(ctx.repository.create(&draft("ada@example.com", "org-1")))
        .expect_err("missing table");

    assert!(
        matches!(err, UserRepositoryError::Query { .. }),
        "expected query error, got {err:?}"
    );
}
