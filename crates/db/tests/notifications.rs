//! Integration tests for the notification repository: append-only
//! semantics, the idempotent read-flag flip, and unread counting.

use sqlx::PgPool;

use rokto_core::kinds::{KIND_REQUEST, KIND_SOCIAL};
use rokto_core::types::DbId;
use rokto_db::models::profile::CreateProfile;
use rokto_db::repositories::{NotificationRepo, ProfileRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_profile(pool: &PgPool, email: &str) -> DbId {
    let input = CreateProfile {
        name: "Test User".into(),
        email: email.into(),
        phone: "01700000000".into(),
        blood_group: "B+".into(),
        division: "Dhaka".into(),
        district: "Dhaka".into(),
        upazila: "Dhanmondi".into(),
        role: "donor".into(),
    };
    ProfileRepo::create(pool, &input).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn creation_always_starts_unread(pool: PgPool) {
    let user = seed_profile(&pool, "a@example.com").await;

    let n = NotificationRepo::create(&pool, user, "Hello", "body", KIND_SOCIAL, None)
        .await
        .unwrap();

    assert!(!n.is_read);
    assert!(n.read_at.is_none());
    assert!(n.link.is_none());
    assert_eq!(n.user_id, user);
}

#[sqlx::test(migrations = "./migrations")]
async fn identical_payloads_stay_distinct_records(pool: PgPool) {
    let user = seed_profile(&pool, "a@example.com").await;

    // Same (user, title, body) twice: count goes +2, never merged.
    for _ in 0..2 {
        NotificationRepo::create(&pool, user, "Liked your post", "body", KIND_SOCIAL, None)
            .await
            .unwrap();
    }

    let all = NotificationRepo::list_for_user(&pool, user, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_ne!(all[0].id, all[1].id);
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_read_is_one_way_and_idempotent(pool: PgPool) {
    let user = seed_profile(&pool, "a@example.com").await;
    let n = NotificationRepo::create(&pool, user, "T", "B", KIND_REQUEST, Some("/requests"))
        .await
        .unwrap();

    // First flip succeeds and stamps read_at.
    assert!(NotificationRepo::mark_read(&pool, n.id, user).await.unwrap());
    let read = NotificationRepo::list_for_user(&pool, user, false, 50, 0)
        .await
        .unwrap()
        .remove(0);
    assert!(read.is_read);
    let first_read_at = read.read_at.unwrap();

    // Re-marking is a no-op success, not an error, and read_at stays put.
    assert!(NotificationRepo::mark_read(&pool, n.id, user).await.unwrap());
    let again = NotificationRepo::list_for_user(&pool, user, false, 50, 0)
        .await
        .unwrap()
        .remove(0);
    assert!(again.is_read);
    assert_eq!(again.read_at.unwrap(), first_read_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_read_rejects_foreign_owner(pool: PgPool) {
    let owner = seed_profile(&pool, "owner@example.com").await;
    let other = seed_profile(&pool, "other@example.com").await;
    let n = NotificationRepo::create(&pool, owner, "T", "B", KIND_REQUEST, None)
        .await
        .unwrap();

    // A different user cannot flip someone else's read flag.
    assert!(!NotificationRepo::mark_read(&pool, n.id, other).await.unwrap());
    let unread = NotificationRepo::unread_count(&pool, owner).await.unwrap();
    assert_eq!(unread, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn unread_count_reaches_exactly_zero(pool: PgPool) {
    let user = seed_profile(&pool, "a@example.com").await;
    for i in 0..3 {
        NotificationRepo::create(&pool, user, &format!("T{i}"), "B", KIND_SOCIAL, None)
            .await
            .unwrap();
    }
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 3);

    let marked = NotificationRepo::mark_all_read(&pool, user).await.unwrap();
    assert_eq!(marked, 3);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);

    // Nothing left to mark.
    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn unread_only_listing_filters_read_rows(pool: PgPool) {
    let user = seed_profile(&pool, "a@example.com").await;
    let first = NotificationRepo::create(&pool, user, "T1", "B", KIND_SOCIAL, None)
        .await
        .unwrap();
    NotificationRepo::create(&pool, user, "T2", "B", KIND_SOCIAL, None)
        .await
        .unwrap();

    NotificationRepo::mark_read(&pool, first.id, user).await.unwrap();

    let unread = NotificationRepo::list_for_user(&pool, user, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].title, "T2");
}
