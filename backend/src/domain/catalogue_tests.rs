//! Tests for the class catalogue service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockClassRepository;

fn clock_at(now: DateTime<Utc>) -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

#[fixture]
fn creation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn violin_draft() -> ClassDraft {
    ClassDraft {
        name: "Violin for Beginners".to_owned(),
        instructor_email: EmailAddress::new("marta@example.com").expect("valid email"),
        instructor_name: "Marta Kowalska".to_owned(),
        image_url: None,
        available_seats: 5,
        price_cents: 69_900,
    }
}

#[rstest]
#[tokio::test]
async fn created_class_starts_pending_with_clock_timestamp(
    violin_draft: ClassDraft,
    creation_time: DateTime<Utc>,
) {
    let mut repo = MockClassRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(move |class| class.status == ClassStatus::Pending && class.created_at == creation_time)
        .return_once(|_| Ok(()));

    let service = ClassCatalogueService::new(Arc::new(repo), clock_at(creation_time));
    let class = service
        .create_class(violin_draft)
        .await
        .expect("creation succeeds");

    assert_eq!(class.status, ClassStatus::Pending);
    assert_eq!(class.students, 0);
    assert_eq!(class.created_at, creation_time);
}

#[rstest]
#[case::negative_seats(-1, 69_900)]
#[case::negative_price(5, -1)]
#[tokio::test]
async fn invalid_drafts_never_reach_the_repository(
    violin_draft: ClassDraft,
    creation_time: DateTime<Utc>,
    #[case] available_seats: i32,
    #[case] price_cents: i64,
) {
    let mut repo = MockClassRepository::new();
    repo.expect_insert().times(0);

    let draft = ClassDraft {
        available_seats,
        price_cents,
        ..violin_draft
    };

    let service = ClassCatalogueService::new(Arc::new(repo), clock_at(creation_time));
    let error = service
        .create_class(draft)
        .await
        .expect_err("invalid draft is rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn approval_reports_updated_count(creation_time: DateTime<Utc>) {
    let mut repo = MockClassRepository::new();
    repo.expect_set_status()
        .times(1)
        .withf(|_, status| *status == ClassStatus::Approved)
        .return_once(|_, _| Ok(1));

    let service = ClassCatalogueService::new(Arc::new(repo), clock_at(creation_time));
    let response = service
        .approve_class(uuid::Uuid::new_v4())
        .await
        .expect("approval succeeds");

    assert_eq!(response.updated, 1);
}

#[rstest]
#[tokio::test]
async fn public_listing_maps_connection_error(creation_time: DateTime<Utc>) {
    let mut repo = MockClassRepository::new();
    repo.expect_list_approved()
        .times(1)
        .return_once(|| Err(ClassRepositoryError::connection("pool unavailable")));

    let service = ClassCatalogueService::new(Arc::new(repo), clock_at(creation_time));
    let error = service
        .list_public()
        .await
        .expect_err("outage surfaces as unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn instructor_listing_passes_through(creation_time: DateTime<Utc>) {
    let mut repo = MockClassRepository::new();
    repo.expect_list_by_instructor()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = ClassCatalogueService::new(Arc::new(repo), clock_at(creation_time));
    let email = EmailAddress::new("marta@example.com").expect("valid email");
    let classes = service
        .list_for_instructor(&email)
        .await
        .expect("listing succeeds");

    assert!(classes.is_empty());
}
