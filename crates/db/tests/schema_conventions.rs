use sqlx::PgPool;

async fn base_tables(pool: &PgPool) -> Vec<String> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name::TEXT
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await
    .unwrap();
    rows.into_iter().map(|(t,)| t).collect()
}

async fn column_type(pool: &PgPool, table: &str, column: &str) -> Option<String> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT data_type::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
    )
    .bind(table)
    .bind(column)
    .fetch_optional(pool)
    .await
    .unwrap();
    row.map(|(t,)| t)
}

/// All primary keys are BIGSERIAL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    for table in base_tables(&pool).await {
        let data_type = column_type(&pool, &table, "id")
            .await
            .unwrap_or_else(|| panic!("Table {table} has no id column"));
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table has timestamptz `created_at`; all but the append-only audit
/// log also have `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in base_tables(&pool).await {
        let mut cols = vec!["created_at"];
        if table != "audit_logs" {
            cols.push("updated_at");
        }
        for col in cols {
            let data_type = column_type(&pool, &table, col)
                .await
                .unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Content tables carry the ordering, publishing and soft-delete columns.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_tables_are_sortable(pool: PgPool) {
    for table in vitrine_db::ContentTable::ALL {
        let name = table.table();
        assert_eq!(column_type(&pool, name, "sort_order").await.as_deref(), Some("integer"));
        assert_eq!(column_type(&pool, name, "is_active").await.as_deref(), Some("boolean"));
        assert_eq!(
            column_type(&pool, name, "deleted_at").await.as_deref(),
            Some("timestamp with time zone"),
            "{name}.deleted_at"
        );
    }
}

/// Updating a row bumps `updated_at` via the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO faqs (question, answer, created_at, updated_at)
         VALUES ('Q', 'A', NOW() - INTERVAL '1 hour', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE faqs SET answer = 'B' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before);
}
