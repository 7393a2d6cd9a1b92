use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    rokto_db::health_check(&pool).await.unwrap();

    // Verify all application tables exist and are queryable.
    let tables = [
        "profiles",
        "blood_requests",
        "notifications",
        "posts",
        "post_likes",
        "post_comments",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The blood_group CHECK constraint rejects symbols outside the eight
/// ABO/Rh values.
#[sqlx::test(migrations = "./migrations")]
async fn test_blood_group_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO profiles (name, email, phone, blood_group, division, district, upazila) \
         VALUES ('X', 'x@example.com', '017', 'C+', 'Dhaka', 'Dhaka', 'Dhanmondi')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "unknown blood group should be rejected");
}
