//! Tests for the booking admission checks.

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::booking::{Booking, BookingDraft, BookingId, BookingStatus, TimeSlot};
use crate::domain::ports::{
    MockBookingRepository, MockResourceRepository, ResourceRepositoryError,
};
use crate::domain::resource::{
    Capacity, Category, Resource, ResourceDraft, ResourceId, ResourceName,
};
use crate::domain::user::UserId;

fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0)
        .single()
        .expect("valid time")
}

fn slot(start: u32, end: u32) -> TimeSlot {
    TimeSlot::new(hour(start), hour(end)).expect("valid slot")
}

fn full_draft(resource_id: ResourceId, user_id: UserId) -> BookingDraft {
    BookingDraft {
        resource_id: Some(resource_id),
        user_id: Some(user_id),
        start_time: Some(hour(10)),
        end_time: Some(hour(12)),
        status: Some(BookingStatus::Confirmed),
    }
}

fn resource_with_activity(id: ResourceId, active: bool) -> Resource {
    Resource::new(
        id,
        ResourceDraft {
            name: ResourceName::new("Lecture Hall A").expect("valid name"),
            category: Category::new("room").expect("valid category"),
            capacity: Capacity::new(80).expect("valid capacity"),
            active,
        },
        hour(0),
    )
}

fn confirmed_booking(resource_id: ResourceId, start: u32, end: u32) -> Booking {
    Booking::new(
        BookingId::random(),
        resource_id,
        UserId::random(),
        slot(start, end),
        BookingStatus::Confirmed,
        hour(0),
    )
}

fn active_resource_repo(id: ResourceId) -> MockResourceRepository {
    let mut resources = MockResourceRepository::new();
    resources
        .expect_find()
        .returning(move |_| Ok(Some(resource_with_activity(id, true))));
    resources
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let bookings = MockBookingRepository::new();
    let resources = MockResourceRepository::new();
    let validator = BookingValidator::new(&bookings, &resources);

    let error = validator
        .validate_create(&BookingDraft::default())
        .await
        .expect_err("empty draft is rejected");

    assert_eq!(
        error,
        SchedulingError::MissingFields {
            fields: vec!["resourceId", "userId", "startTime", "endTime", "status"],
        }
    );
}

#[tokio::test]
async fn missing_fields_take_precedence_over_date_range() {
    let bookings = MockBookingRepository::new();
    let resources = MockResourceRepository::new();
    let validator = BookingValidator::new(&bookings, &resources);

    // Inverted range AND a missing status: the shape error must win.
    let draft = BookingDraft {
        resource_id: Some(ResourceId::random()),
        user_id: Some(UserId::random()),
        start_time: Some(hour(12)),
        end_time: Some(hour(10)),
        status: None,
    };
    let error = validator
        .validate_create(&draft)
        .await
        .expect_err("draft is rejected");

    assert_eq!(
        error,
        SchedulingError::MissingFields {
            fields: vec!["status"],
        }
    );
}

#[rstest]
#[case::inverted(12, 10)]
#[case::zero_length(10, 10)]
#[tokio::test]
async fn create_rejects_degenerate_ranges(#[case] start: u32, #[case] end: u32) {
    // No expectations: the stores must not be consulted for shape errors.
    let bookings = MockBookingRepository::new();
    let resources = MockResourceRepository::new();
    let validator = BookingValidator::new(&bookings, &resources);

    let draft = BookingDraft {
        start_time: Some(hour(start)),
        end_time: Some(hour(end)),
        ..full_draft(ResourceId::random(), UserId::random())
    };
    let error = validator
        .validate_create(&draft)
        .await
        .expect_err("degenerate range is rejected");

    assert_eq!(error, SchedulingError::InvalidDateRange);
}

#[tokio::test]
async fn create_rejects_unknown_resource_before_scanning() {
    let resource_id = ResourceId::random();
    // The booking store has no expectations, proving the conflict scan is
    // not reached once the resource lookup fails.
    let bookings = MockBookingRepository::new();
    let mut resources = MockResourceRepository::new();
    resources.expect_find().times(1).returning(|_| Ok(None));

    let validator = BookingValidator::new(&bookings, &resources);
    let error = validator
        .validate_create(&full_draft(resource_id, UserId::random()))
        .await
        .expect_err("unknown resource is rejected");

    assert_eq!(error, SchedulingError::ResourceNotFound { resource_id });
}

#[tokio::test]
async fn create_rejects_inactive_resource() {
    let resource_id = ResourceId::random();
    let bookings = MockBookingRepository::new();
    let mut resources = MockResourceRepository::new();
    resources
        .expect_find()
        .returning(move |_| Ok(Some(resource_with_activity(resource_id, false))));

    let validator = BookingValidator::new(&bookings, &resources);
    let error = validator
        .validate_create(&full_draft(resource_id, UserId::random()))
        .await
        .expect_err("inactive resource is rejected");

    assert_eq!(error, SchedulingError::ResourceInactive { resource_id });
}

#[tokio::test]
async fn create_detects_overlap_with_confirmed_booking() {
    let resource_id = ResourceId::random();
    let blocker = confirmed_booking(resource_id, 11, 13);
    let blocker_id = *blocker.id();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_confirmed_for_resource()
        .withf(move |id, exclude| *id == resource_id && exclude.is_none())
        .returning(move |_, _| Ok(vec![blocker.clone()]));
    let resources = active_resource_repo(resource_id);

    let validator = BookingValidator::new(&bookings, &resources);
    // Draft slot is 10:00-12:00; the blocker holds 11:00-13:00.
    let error = validator
        .validate_create(&full_draft(resource_id, UserId::random()))
        .await
        .expect_err("overlap is rejected");

    assert_eq!(
        error,
        SchedulingError::Conflict {
            conflicting_booking_id: blocker_id,
        }
    );
}

#[tokio::test]
async fn create_accepts_adjacent_booking() {
    let resource_id = ResourceId::random();
    // Existing booking ends exactly when the draft starts.
    let neighbour = confirmed_booking(resource_id, 8, 10);

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_confirmed_for_resource()
        .returning(move |_, _| Ok(vec![neighbour.clone()]));
    let resources = active_resource_repo(resource_id);

    let validator = BookingValidator::new(&bookings, &resources);
    let user_id = UserId::random();
    let validated = validator
        .validate_create(&full_draft(resource_id, user_id))
        .await
        .expect("adjacent slot is accepted");

    assert_eq!(validated.resource_id, resource_id);
    assert_eq!(validated.user_id, user_id);
    assert_eq!(validated.slot, slot(10, 12));
    assert_eq!(validated.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn create_accepts_clear_slot() {
    let resource_id = ResourceId::random();
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_confirmed_for_resource()
        .returning(|_, _| Ok(Vec::new()));
    let resources = active_resource_repo(resource_id);

    let validator = BookingValidator::new(&bookings, &resources);
    validator
        .validate_create(&full_draft(resource_id, UserId::random()))
        .await
        .expect("clear slot is accepted");
}

#[tokio::test]
async fn update_rejects_unknown_booking_before_resource_checks() {
    let booking_id = BookingId::random();
    let mut bookings = MockBookingRepository::new();
    bookings.expect_find().times(1).returning(|_| Ok(None));
    // No resource expectations: existence is checked first.
    let resources = MockResourceRepository::new();

    let validator = BookingValidator::new(&bookings, &resources);
    let error = validator
        .validate_update(
            &booking_id,
            &full_draft(ResourceId::random(), UserId::random()),
        )
        .await
        .expect_err("unknown booking is rejected");

    assert_eq!(error, SchedulingError::BookingNotFound { booking_id });
}

#[tokio::test]
async fn update_excludes_itself_from_the_scan() {
    let resource_id = ResourceId::random();
    let existing = confirmed_booking(resource_id, 10, 12);
    let existing_id = *existing.id();

    let mut bookings = MockBookingRepository::new();
    let found = existing.clone();
    bookings
        .expect_find()
        .returning(move |_| Ok(Some(found.clone())));
    bookings
        .expect_confirmed_for_resource()
        .withf(move |id, exclude| *id == resource_id && *exclude == Some(existing_id))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let resources = active_resource_repo(resource_id);

    let validator = BookingValidator::new(&bookings, &resources);
    let (stored, validated) = validator
        .validate_update(&existing_id, &full_draft(resource_id, UserId::random()))
        .await
        .expect("unchanged booking re-validates");

    assert_eq!(stored.id(), &existing_id);
    assert_eq!(validated.slot, slot(10, 12));
}

#[tokio::test]
async fn update_rechecks_the_target_resource() {
    let resource_id = ResourceId::random();
    let existing = confirmed_booking(resource_id, 10, 12);
    let existing_id = *existing.id();

    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find()
        .returning(move |_| Ok(Some(existing.clone())));
    let mut resources = MockResourceRepository::new();
    resources.expect_find().times(1).returning(|_| Ok(None));

    let validator = BookingValidator::new(&bookings, &resources);
    let error = validator
        .validate_update(&existing_id, &full_draft(resource_id, UserId::random()))
        .await
        .expect_err("vanished resource is rejected");

    assert_eq!(error, SchedulingError::ResourceNotFound { resource_id });
}

#[tokio::test]
async fn store_failures_surface_as_store_errors() {
    let resource_id = ResourceId::random();
    let bookings = MockBookingRepository::new();
    let mut resources = MockResourceRepository::new();
    resources
        .expect_find()
        .returning(|_| Err(ResourceRepositoryError::connection("pool exhausted")));

    let validator = BookingValidator::new(&bookings, &resources);
    let error = validator
        .validate_create(&full_draft(resource_id, UserId::random()))
        .await
        .expect_err("store failure propagates");

    assert_eq!(
        error,
        SchedulingError::ResourceStore(ResourceRepositoryError::connection("pool exhausted"))
    );
}
