//! Integration tests for the donor lookup the matcher fans out from:
//! exact-equality predicates on role, availability, blood group, and
//! district.

use sqlx::PgPool;

use rokto_core::blood::BloodGroup;
use rokto_core::types::DbId;
use rokto_db::models::profile::{CreateProfile, UpdateProfile};
use rokto_db::repositories::ProfileRepo;

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

fn no_change() -> UpdateProfile {
    UpdateProfile {
        name: None,
        phone: None,
        blood_group: None,
        division: None,
        district: None,
        upazila: None,
        is_available: None,
        last_donation_date: None,
        donation_count: None,
        photo_url: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Scenario from the matching contract: B+/Dhaka request while
/// D1(B+, Dhaka, available), D2(B+, Chattogram, available), and
/// D3(B+, Dhaka, unavailable) exist. Only D1 is eligible.
#[sqlx::test(migrations = "./migrations")]
async fn only_available_same_group_same_district_matches(pool: PgPool) {
    let d1 = seed(&pool, donor("D1", "d1@example.com", "B+", "Dhaka")).await;
    let _d2 = seed(&pool, donor("D2", "d2@example.com", "B+", "Chattogram")).await;
    let d3 = seed(&pool, donor("D3", "d3@example.com", "B+", "Dhaka")).await;
    ProfileRepo::set_availability(&pool, d3, false).await.unwrap();

    let matches = ProfileRepo::find_available_donors(&pool, BloodGroup::BPos, "Dhaka")
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, d1);
}

/// Compatible-but-not-identical groups are excluded: an O- donor is not
/// matched to an A+ request even though clinically compatible.
#[sqlx::test(migrations = "./migrations")]
async fn compatible_but_not_identical_group_is_excluded(pool: PgPool) {
    seed(&pool, donor("Universal", "o@example.com", "O-", "Dhaka")).await;
    let exact = seed(&pool, donor("Exact", "a@example.com", "A+", "Dhaka")).await;

    let matches = ProfileRepo::find_available_donors(&pool, BloodGroup::APos, "Dhaka")
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, exact);
}

/// Receivers and admins never match, whatever their group and district.
#[sqlx::test(migrations = "./migrations")]
async fn non_donor_roles_never_match(pool: PgPool) {
    let mut receiver = donor("R", "r@example.com", "B+", "Dhaka");
    receiver.role = "receiver".into();
    seed(&pool, receiver).await;

    let matches = ProfileRepo::find_available_donors(&pool, BloodGroup::BPos, "Dhaka")
        .await
        .unwrap();
    assert!(matches.is_empty());
}

/// Eligibility is evaluated at call time: a donor who becomes available
/// later is picked up by later calls only.
#[sqlx::test(migrations = "./migrations")]
async fn eligibility_is_evaluated_at_call_time(pool: PgPool) {
    let d = seed(&pool, donor("D", "d@example.com", "O+", "Khulna")).await;
    ProfileRepo::set_availability(&pool, d, false).await.unwrap();

    let before = ProfileRepo::find_available_donors(&pool, BloodGroup::OPos, "Khulna")
        .await
        .unwrap();
    assert!(before.is_empty());

    ProfileRepo::set_availability(&pool, d, true).await.unwrap();
    let after = ProfileRepo::find_available_donors(&pool, BloodGroup::OPos, "Khulna")
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
}

/// Availability and the last donation date are independent: a donor who
/// donated yesterday still matches while their switch is on.
#[sqlx::test(migrations = "./migrations")]
async fn recent_donation_does_not_affect_matching(pool: PgPool) {
    let d = seed(&pool, donor("Fresh", "f@example.com", "AB-", "Sylhet")).await;
    let mut patch = no_change();
    patch.last_donation_date = Some(chrono::Utc::now().date_naive());
    ProfileRepo::update(&pool, d, &patch).await.unwrap().unwrap();

    let matches = ProfileRepo::find_available_donors(&pool, BloodGroup::AbNeg, "Sylhet")
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
}
