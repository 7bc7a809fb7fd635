use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    fixtrack_db::health_check(&pool).await.unwrap();

    let tables = [
        "plants",
        "users",
        "fixtures",
        "probes",
        "fixture_resets",
        "notification_log",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The threshold-order check constraint rejects inverted pairs.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_threshold_order_constraint(pool: PgPool) {
    let plant_id: i64 = sqlx::query_scalar("INSERT INTO plants (name) VALUES ('Arad') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO fixtures \
            (plant_id, adapter_code, fixture_type, project_name, warning_at, contacts_limit) \
         VALUES ($1, 'A1', 'ICT', 'P', 200, 100)",
    )
    .bind(plant_id)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "warning_at above contacts_limit must be rejected");
}
