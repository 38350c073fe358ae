//! Integration tests for the event store:
//! validation on create/update, live participant counts, ordering, and the
//! application-level cascade on delete.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use eventra_core::error::CoreError;
use eventra_core::photos::PhotoInput;
use eventra_core::roles::{ROLE_ORGANIZER, ROLE_PARTICIPANT};
use eventra_db::models::event::{CreateEvent, UpdateEvent};
use eventra_db::models::user::{CreateUser, User};
use eventra_db::registration::RegistrationService;
use eventra_db::repositories::{EventRepo, PaymentRepo, RegistrationRepo, UserRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn make_user(pool: &PgPool, name: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "$argon2id$fake-hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
}

fn base_event(days_ahead: i64) -> CreateEvent {
    CreateEvent {
        title: "Rust Meetup".to_string(),
        description: Some("Talks and pizza".to_string()),
        location: Some("Paris".to_string()),
        date: (Utc::now() + Duration::days(days_ahead)).to_rfc3339(),
        capacity: 50,
        price: None,
        photos: None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_event_defaults_and_photo_normalization(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;

    let mut input = base_event(7);
    input.photos = Some(PhotoInput::One("/uploads/cover.jpg".to_string()));

    let event = EventRepo::create(&pool, organizer.id, &input)
        .await
        .expect("create should succeed");

    assert_eq!(event.capacity, 50);
    assert_eq!(event.price, Decimal::ZERO, "price defaults to zero");
    assert_eq!(event.photos, vec!["/uploads/cover.jpg".to_string()]);
    assert_eq!(event.organizer_id, organizer.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_event_rejects_bad_input(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;

    let mut bad_date = base_event(7);
    bad_date.date = "not-a-date".to_string();
    assert_matches!(
        EventRepo::create(&pool, organizer.id, &bad_date).await,
        Err(CoreError::Validation(_))
    );

    let mut zero_capacity = base_event(7);
    zero_capacity.capacity = 0;
    assert_matches!(
        EventRepo::create(&pool, organizer.id, &zero_capacity).await,
        Err(CoreError::Validation(_))
    );

    let mut negative_price = base_event(7);
    negative_price.price = Some(Decimal::new(-100, 2));
    assert_matches!(
        EventRepo::create(&pool, organizer.id, &negative_price).await,
        Err(CoreError::Validation(_))
    );

    let mut blank_title = base_event(7);
    blank_title.title = "   ".to_string();
    assert_matches!(
        EventRepo::create(&pool, organizer.id, &blank_title).await,
        Err(CoreError::Validation(_))
    );

    // Nothing was persisted by the rejected attempts.
    assert!(EventRepo::list_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_event_with_unknown_organizer_fails_validation(pool: PgPool) {
    let result = EventRepo::create(&pool, 999_999, &base_event(7)).await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_merges_and_revalidates(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    let event = EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .expect("create should succeed");

    let patch = UpdateEvent {
        title: Some("Renamed Meetup".to_string()),
        ..Default::default()
    };
    let updated = EventRepo::update(&pool, event.id, &patch)
        .await
        .expect("update should succeed")
        .expect("event exists");
    assert_eq!(updated.title, "Renamed Meetup");
    assert_eq!(
        updated.description, event.description,
        "absent fields are untouched"
    );

    let bad_patch = UpdateEvent {
        capacity: Some(-1),
        ..Default::default()
    };
    assert_matches!(
        EventRepo::update(&pool, event.id, &bad_patch).await,
        Err(CoreError::Validation(_))
    );

    let missing = EventRepo::update(&pool, 424242, &patch).await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Listing and counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_listings_order_by_date_and_carry_live_counts(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    let later = EventRepo::create(&pool, organizer.id, &base_event(14))
        .await
        .unwrap();
    let sooner = EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .unwrap();
    let past = EventRepo::create(&pool, organizer.id, &base_event(-7))
        .await
        .unwrap();

    let user = make_user(&pool, "guest", ROLE_PARTICIPANT).await;
    RegistrationService::register(&pool, user.id, sooner.id)
        .await
        .expect("registration should succeed");

    let all = EventRepo::list_all(&pool).await.unwrap();
    assert_eq!(
        all.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![past.id, sooner.id, later.id],
        "date ascending"
    );
    let counted = all.iter().find(|e| e.id == sooner.id).unwrap();
    assert_eq!(counted.participants_count, 1);

    let upcoming = EventRepo::list_upcoming(&pool).await.unwrap();
    assert_eq!(
        upcoming.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![sooner.id, later.id],
        "past events are filtered out"
    );

    let mine = EventRepo::list_by_organizer(&pool, organizer.id).await.unwrap();
    assert_eq!(mine.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_summary_joins_organizer(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .unwrap();

    let summary = EventRepo::list_summary(&pool).await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].organizer_name.as_deref(), Some("organizer"));
    assert_eq!(
        summary[0].organizer_email.as_deref(),
        Some("organizer@example.com")
    );
    assert_eq!(summary[0].participants_count, 0);
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_event_cascades_registrations_and_payments(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    let event = EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .unwrap();

    let a = make_user(&pool, "attendee-a", ROLE_PARTICIPANT).await;
    let b = make_user(&pool, "attendee-b", ROLE_PARTICIPANT).await;
    RegistrationService::register(&pool, a.id, event.id).await.unwrap();
    RegistrationService::register(&pool, b.id, event.id).await.unwrap();
    PaymentRepo::create(&pool, a.id, event.id, Decimal::new(1500, 2))
        .await
        .unwrap();

    let deleted = EventRepo::delete(&pool, event.id).await.unwrap();
    assert!(deleted);

    assert!(EventRepo::find_by_id(&pool, event.id).await.unwrap().is_none());
    assert_eq!(
        RegistrationRepo::count_confirmed(&pool, event.id).await.unwrap(),
        0,
        "no orphan registrations survive"
    );
    let orphan_payments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE event_id = $1")
            .bind(event.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphan_payments, 0);

    // Deleting again reports not-found.
    assert!(!EventRepo::delete(&pool, event.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_expired_purges_only_past_events(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    let stale = EventRepo::create(&pool, organizer.id, &base_event(-10))
        .await
        .unwrap();
    let fresh = EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .unwrap();

    let attendee = make_user(&pool, "attendee", ROLE_PARTICIPANT).await;
    RegistrationRepo::insert_confirmed(&pool, attendee.id, stale.id)
        .await
        .unwrap();

    let cutoff = Utc::now() - Duration::days(1);
    let purged = EventRepo::delete_expired(&pool, cutoff).await.unwrap();
    assert_eq!(purged, 1);

    assert!(EventRepo::find_by_id(&pool, stale.id).await.unwrap().is_none());
    assert!(EventRepo::find_by_id(&pool, fresh.id).await.unwrap().is_some());
    assert_eq!(
        RegistrationRepo::count_confirmed(&pool, stale.id).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_cascades_their_world(pool: PgPool) {
    let organizer = make_user(&pool, "organizer", ROLE_ORGANIZER).await;
    let event = EventRepo::create(&pool, organizer.id, &base_event(7))
        .await
        .unwrap();
    let attendee = make_user(&pool, "attendee", ROLE_PARTICIPANT).await;
    RegistrationService::register(&pool, attendee.id, event.id)
        .await
        .unwrap();

    let deleted = UserRepo::delete_cascade(&pool, organizer.id).await.unwrap();
    assert!(deleted);

    assert!(UserRepo::find_by_id(&pool, organizer.id).await.unwrap().is_none());
    assert!(
        EventRepo::find_by_id(&pool, event.id).await.unwrap().is_none(),
        "organized events are removed"
    );
    assert_eq!(
        RegistrationRepo::count_confirmed(&pool, event.id).await.unwrap(),
        0,
        "other users' registrations on those events are removed too"
    );
}
