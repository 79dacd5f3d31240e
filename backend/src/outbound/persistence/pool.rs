//! Async connection pool for Diesel SQLite connections.
//!
//! SQLite connections are synchronous; `diesel-async` wraps them in
//! [`SyncConnectionWrapper`] so repositories share one async API and `bb8`
//! pooling. Every new connection switches the database to WAL mode and sets a
//! busy timeout. Repositories open their transactions with
//! [`immediate_transaction`], so concurrent Actix workers queue for the write
//! lock instead of failing with `database is locked`.

use std::time::Duration;

use diesel::ConnectionError;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{
    AnsiTransactionManager, AsyncConnection, SimpleAsyncConnection, TransactionManager,
};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Async wrapper around a synchronous SQLite connection.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Pragmas applied to every pooled connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;";

/// Run `callback` inside a transaction opened with `BEGIN IMMEDIATE`.
///
/// The write lock is taken before the first statement. A deferred transaction
/// that reads and then writes fails with `SQLITE_BUSY` straight away when
/// another connection commits in between; an immediate one waits on the busy
/// timeout instead. Commits on success and rolls back on any error.
pub(crate) async fn immediate_transaction<'a, R, E, F>(
    conn: &mut SqliteConn,
    callback: F,
) -> Result<R, E>
where
    F: for<'r> FnOnce(&'r mut SqliteConn) -> ScopedBoxFuture<'a, 'r, Result<R, E>> + Send + 'a,
    E: From<diesel::result::Error> + Send + 'a,
    R: Send + 'a,
{
    AnsiTransactionManager::begin_transaction_sql(&mut *conn, "BEGIN IMMEDIATE").await?;
    match callback(&mut *conn).await {
        Ok(value) => {
            AnsiTransactionManager::commit_transaction(&mut *conn).await?;
            Ok(value)
        }
        Err(user_error) => match AnsiTransactionManager::rollback_transaction(&mut *conn).await {
            Ok(()) | Err(diesel::result::Error::BrokenTransactionManager) => Err(user_error),
            Err(rollback_error) => Err(rollback_error.into()),
        },
    }
}

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the SQLite connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hotel_ops::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("hotel_system.db")
///     .with_max_size(8)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_path(), "hotel_system.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: 4 connections, 30 second checkout timeout.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 4,
            connection_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

fn establish(path: &str) -> BoxFuture<'_, diesel::ConnectionResult<SqliteConn>> {
    async move {
        let mut conn = SqliteConn::establish(path).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

/// Pool of SQLite connections shared by every repository.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteConn>,
}

impl DbPool {
    /// Build the pool. The database file is created on first connection.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if no connection can be established.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish);
        let manager = AsyncDieselConnectionManager::<SqliteConn>::new_with_config(
            config.database_path,
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteConn>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use diesel::sql_types::Text;
    use diesel_async::RunQueryDsl;
    use diesel_async::scoped_futures::ScopedFutureExt;
    use rstest::rstest;

    use super::*;

    #[derive(diesel::QueryableByName)]
    struct JournalMode {
        #[diesel(sql_type = Text)]
        journal_mode: String,
    }

    #[rstest]
    fn config_defaults() {
        let config = PoolConfig::new("hotel.db");
        assert_eq!(config.database_path(), "hotel.db");
        assert_eq!(config.max_size, 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn pool_error_display() {
        assert!(
            PoolError::checkout("timed out")
                .to_string()
                .contains("timed out")
        );
        assert!(PoolError::build("bad path").to_string().contains("bad path"));
    }

    const COUNTER_SCHEMA: &str =
        "CREATE TABLE counters (n BIGINT NOT NULL); INSERT INTO counters VALUES (0);";

    #[derive(diesel::QueryableByName)]
    struct Count {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        n: i64,
    }

    #[tokio::test]
    async fn immediate_transactions_hold_the_write_lock_from_the_first_read() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("lock.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(2))
            .await
            .expect("pool builds");
        let mut conn = pool.get().await.expect("checkout");
        conn.batch_execute(COUNTER_SCHEMA).await.expect("schema");

        let other_pool = pool.clone();
        let other_blocked = immediate_transaction::<_, diesel::result::Error, _>(
            &mut conn,
            |conn| {
                async move {
                    let before: Count = diesel::sql_query("SELECT n FROM counters")
                        .get_result(conn)
                        .await?;
                    let mut other = other_pool.get().await.expect("second checkout");
                    let blocked = other
                        .batch_execute("PRAGMA busy_timeout = 0; BEGIN IMMEDIATE;")
                        .await
                        .is_err();
                    diesel::sql_query("UPDATE counters SET n = n + 1")
                        .execute(conn)
                        .await?;
                    assert_eq!(before.n, 0);
                    Ok(blocked)
                }
                .scope_boxed()
            },
        )
        .await
        .expect("transaction commits");

        assert!(other_blocked, "a second writer must wait for the open transaction");
        let after: Count = diesel::sql_query("SELECT n FROM counters")
            .get_result(&mut conn)
            .await
            .expect("count");
        assert_eq!(after.n, 1);
    }

    #[tokio::test]
    async fn failed_immediate_transactions_roll_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rollback.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(1))
            .await
            .expect("pool builds");
        let mut conn = pool.get().await.expect("checkout");
        conn.batch_execute(COUNTER_SCHEMA).await.expect("schema");

        let result = immediate_transaction::<(), diesel::result::Error, _>(&mut conn, |conn| {
            async move {
                diesel::sql_query("UPDATE counters SET n = 5")
                    .execute(conn)
                    .await?;
                Err(diesel::result::Error::RollbackTransaction)
            }
            .scope_boxed()
        })
        .await;

        assert!(result.is_err());
        let after: Count = diesel::sql_query("SELECT n FROM counters")
            .get_result(&mut conn)
            .await
            .expect("count");
        assert_eq!(after.n, 0);
    }

    #[tokio::test]
    async fn connections_use_wal_journal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pool.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(1))
            .await
            .expect("pool builds");
        let mut conn = pool.get().await.expect("checkout");
        let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
            .get_result(&mut conn)
            .await
            .expect("pragma query");
        assert_eq!(mode.journal_mode, "wal");
    }
}
