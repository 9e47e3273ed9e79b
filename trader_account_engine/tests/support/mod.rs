use trader_account_engine::SqliteDatabase;

/// Spins up a fresh in-memory store with the schema applied. Each call gets its own database, so tests can run in
/// parallel without seeing each other's accounts.
pub async fn memory_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let db = SqliteDatabase::new_with_url("sqlite::memory:", 1).await.expect("Error creating database");
    db.migrate().await.expect("Error running DB migrations");
    db
}
