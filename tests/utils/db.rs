/// PostgreSQL test utilities
///
/// Tests using these are `#[ignore]`d and need TEST_DATABASE_URL.
use diesel::prelude::*;
use listo_lib::shared::Database;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static DATABASE: OnceLock<Arc<Database>> = OnceLock::new();
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Shared database with migrations applied
pub fn get_test_database() -> Arc<Database> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must be set in .env for tests");

            let database = Database::connect(&url).expect("Failed to connect to test database");
            database
                .run_migrations()
                .expect("Failed to run migrations on test database");
            Arc::new(database)
        })
        .clone()
}

/// Empty both tables
pub fn clean_test_db() {
    let database = get_test_database();
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE entries, lists")
        .execute(&mut conn)
        .expect("Failed to clean tables");
}

/// Serialize tests sharing the database
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
