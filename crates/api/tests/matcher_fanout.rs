//! Integration tests for the request fan-out: the matcher writes one
//! notification per eligible donor and publishes each write on the bus.

use std::sync::Arc;

use assert_matches::assert_matches;
use sqlx::PgPool;

use rokto_api::notifications::{DonorMatcher, NotificationService};
use rokto_core::blood::BloodGroup;
use rokto_core::types::DbId;
use rokto_db::models::profile::CreateProfile;
use rokto_db::repositories::{NotificationRepo, ProfileRepo};
use rokto_events::{FeedUpdate, NotificationBus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn donor(name: &str, email: &str, group: &str, district: &str) -> CreateProfile {
    CreateProfile {
        name: name.into(),
        email: email.into(),
        phone: "01700000000".into(),
        blood_group: group.into(),
        division: "Dhaka".into(),
        district: district.into(),
        upazila: "Dhanmondi".into(),
        role: "donor".into(),
    }
}

async fn seed(pool: &PgPool, input: CreateProfile) -> DbId {
    ProfileRepo::create(pool, &input).await.unwrap().id
}

fn matcher_over(pool: &PgPool) -> (DonorMatcher, Arc<NotificationBus>) {
    let bus = Arc::new(NotificationBus::default());
    let notifier = NotificationService::new(pool.clone(), Arc::clone(&bus));
    (DonorMatcher::new(pool.clone(), notifier), bus)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Only the available, same-group, same-district donor gets a notification.
#[sqlx::test(migrations = "../db/migrations")]
async fn fanout_mints_one_notification_per_matching_donor(pool: PgPool) {
    let d1 = seed(&pool, donor("D1", "d1@example.com", "B+", "Dhaka")).await;
    let d2 = seed(&pool, donor("D2", "d2@example.com", "B+", "Chattogram")).await;
    let d3 = seed(&pool, donor("D3", "d3@example.com", "B+", "Dhaka")).await;
    ProfileRepo::set_availability(&pool, d3, false).await.unwrap();

    let (matcher, _bus) = matcher_over(&pool);
    matcher
        .notify_matching_donors(BloodGroup::BPos, "Dhaka", 1)
        .await;

    let for_d1 = NotificationRepo::list_for_user(&pool, d1, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(for_d1.len(), 1);
    assert_eq!(for_d1[0].kind, "request");
    assert_eq!(for_d1[0].title, "Emergency Blood Request");
    assert_eq!(for_d1[0].link.as_deref(), Some("/requests"));
    assert!(!for_d1[0].is_read);
    assert!(for_d1[0].body.contains("B+"));
    assert!(for_d1[0].body.contains("Dhaka"));

    for excluded in [d2, d3] {
        let rows = NotificationRepo::list_for_user(&pool, excluded, false, 10, 0)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}

/// No deduplication: running the fan-out twice for the same request mints
/// two notifications per donor.
#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_fanout_mints_duplicates(pool: PgPool) {
    let d = seed(&pool, donor("D", "d@example.com", "O+", "Khulna")).await;

    let (matcher, _bus) = matcher_over(&pool);
    matcher
        .notify_matching_donors(BloodGroup::OPos, "Khulna", 7)
        .await;
    matcher
        .notify_matching_donors(BloodGroup::OPos, "Khulna", 7)
        .await;

    let rows = NotificationRepo::list_for_user(&pool, d, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
}

/// Every fan-out write is published on the bus as a Created update
/// addressed to the matched donor.
#[sqlx::test(migrations = "../db/migrations")]
async fn fanout_publishes_created_updates(pool: PgPool) {
    let d = seed(&pool, donor("D", "d@example.com", "A-", "Sylhet")).await;

    let (matcher, bus) = matcher_over(&pool);
    let mut rx = bus.subscribe();

    matcher
        .notify_matching_donors(BloodGroup::ANeg, "Sylhet", 3)
        .await;

    assert_matches!(rx.try_recv().unwrap(), FeedUpdate::Created(notification) => {
        assert_eq!(notification.user_id, d);
        assert_eq!(notification.kind, "request");
    });
}

/// Zero matches is a quiet no-op: no notifications, no error.
#[sqlx::test(migrations = "../db/migrations")]
async fn empty_match_set_is_a_noop(pool: PgPool) {
    let d = seed(&pool, donor("D", "d@example.com", "B+", "Dhaka")).await;

    let (matcher, _bus) = matcher_over(&pool);
    matcher
        .notify_matching_donors(BloodGroup::AbPos, "Dhaka", 9)
        .await;

    let rows = NotificationRepo::list_for_user(&pool, d, false, 10, 0)
        .await
        .unwrap();
    assert!(rows.is_empty());
}
