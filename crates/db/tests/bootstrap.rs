use sqlx::PgPool;

/// Connect, migrate and verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vitrine_db::health_check(&pool).await.unwrap();

    let roles: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<&str> = roles.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(names, ["admin", "editor"]);

    let public_settings: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM settings WHERE is_public = true")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(public_settings.0 >= 3, "expected seeded public settings");
}

/// Every content table starts empty so the site renders nothing until an
/// editor publishes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_tables_start_empty(pool: PgPool) {
    for table in vitrine_db::ContentTable::ALL {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table.table()))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{} query failed: {e}", table.table()));
        assert_eq!(count.0, 0, "{} should be empty", table.table());
    }
}
