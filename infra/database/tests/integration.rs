use atlas_database::{Database, DatabaseError};
use surrealdb::types::SurrealValue;

#[derive(Debug, SurrealValue)]
struct MigrationRow {
    slice_key: String,
    version: String,
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn id_allocation_is_sequential_per_table() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    let first = db.next_id("application").await.expect("allocate id");
    let second = db.next_id("application").await.expect("allocate id");
    let other = db.next_id("org_unit").await.expect("allocate id");

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(other, 1, "counters are independent per table");
}

#[tokio::test]
async fn migrations_are_recorded_once_per_script() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    let mut response = db
        .query("SELECT slice AS slice_key, version FROM migration")
        .await
        .expect("query migrations");
    let rows = response.take::<Vec<MigrationRow>>(0).expect("parse rows");
    assert!(!rows.is_empty(), "migrations should have been recorded");
    assert!(
        rows.iter().any(|row| row.slice_key == "application" && row.version == "0001"),
        "application schema should have been applied"
    );
}
