//! SQLite connection management and schema setup.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:finance.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create contacts table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                email TEXT,
                recurring_active INTEGER NOT NULL DEFAULT 0,
                recurring_amount REAL,
                recurring_launch_day INTEGER,
                recurring_due_day INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_contacts_user
            ON contacts(user_id, created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // Create transactions table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                contact_id TEXT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                launch_date TEXT NOT NULL,
                due_date TEXT NOT NULL,
                kind TEXT NOT NULL,
                is_paid INTEGER NOT NULL DEFAULT 0,
                paid_date TEXT,
                is_recurring INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_user_due
            ON transactions(user_id, due_date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // At most one generated transaction per contact and calendar month.
        // launch_date is stored as YYYY-MM-DD, so the first 7 characters are
        // the year-month. Concurrent generator runs that both pass the
        // in-memory duplicate check collide here instead of double-charging.
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_transactions_recurring_month
            ON transactions(contact_id, substr(launch_date, 1, 7))
            WHERE is_recurring = 1;
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_test_creates_schema() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");

        // Both tables should exist and be queryable
        sqlx::query("SELECT COUNT(*) FROM contacts")
            .fetch_one(db.pool())
            .await
            .expect("contacts table missing");
        sqlx::query("SELECT COUNT(*) FROM transactions")
            .fetch_one(db.pool())
            .await
            .expect("transactions table missing");
    }

    #[tokio::test]
    async fn test_recurring_unique_index_exists() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");

        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_transactions_recurring_month'",
        )
        .fetch_one(db.pool())
        .await
        .expect("Failed to query sqlite_master");

        assert_eq!(row.0, 1);
    }
}
