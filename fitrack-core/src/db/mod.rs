pub mod models;
pub mod operations;
pub mod relationships;
pub mod schema;
pub mod types;

use std::env;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::error::{Error, Result};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    /// Reads `DATABASE_URL`, then applies [`Self::with_env_overrides`].
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| Error::Config("DATABASE_URL must be set".to_string()))?;
        Self::new(url).with_env_overrides()
    }

    /// Applies `FITRACK_POOL_SIZE` and `FITRACK_BUSY_TIMEOUT_MS` when set,
    /// whatever the URL came from.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.overridden(
            env::var("FITRACK_POOL_SIZE").ok(),
            env::var("FITRACK_BUSY_TIMEOUT_MS").ok(),
        )
    }

    fn overridden(
        mut self,
        pool_size: Option<String>,
        busy_timeout_ms: Option<String>,
    ) -> Result<Self> {
        if let Some(size) = pool_size {
            self.pool_size = size
                .parse()
                .map_err(|_| Error::Config(format!("FITRACK_POOL_SIZE is not a number: {size}")))?;
        }
        if let Some(ms) = busy_timeout_ms {
            let ms: u64 = ms.parse().map_err(|_| {
                Error::Config(format!("FITRACK_BUSY_TIMEOUT_MS is not a number: {ms}"))
            })?;
            self.busy_timeout = Duration::from_millis(ms);
        }
        Ok(self)
    }

    pub fn is_in_memory(&self) -> bool {
        self.url == ":memory:" || self.url.contains("mode=memory")
    }
}

/// Pragmas applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
    file_backed: bool,
}

impl ConnectionOptions {
    fn apply(&self, conn: &mut SqliteConnection) -> QueryResult<()> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))?;
        if self.file_backed {
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        }
        conn.batch_execute("PRAGMA foreign_keys = ON;")
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        self.apply(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Connection pool over the fitrack store.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = ConnectionOptions {
            busy_timeout: config.busy_timeout,
            file_backed: !config.is_in_memory(),
        };
        let manager = ConnectionManager::<SqliteConnection>::new(&config.url);
        let mut builder = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(options));
        if config.is_in_memory() {
            // Every in-memory connection is its own database, so keep exactly one alive.
            builder = builder.max_size(1).max_lifetime(None).idle_timeout(None);
        }
        let pool = builder.build(manager)?;
        debug!("Opened pool on {}", config.url);
        Ok(Self { pool })
    }

    /// Connects to `url` and applies pending migrations.
    pub fn open(url: &str) -> Result<Self> {
        let db = Self::connect(&DatabaseConfig::new(url))?;
        db.migrate()?;
        Ok(db)
    }

    /// A fresh migrated in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Self::connect(&DatabaseConfig::in_memory())?;
        db.migrate()?;
        Ok(db)
    }

    pub fn conn(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Applies pending migrations and returns the versions that ran.
    pub fn migrate(&self) -> Result<Vec<String>> {
        let mut conn = self.conn()?;
        run_migrations(&mut conn)
    }
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    for version in &applied {
        info!("Applied migration {version}");
    }
    Ok(applied)
}

/// A single unpooled connection with foreign keys on and the schema applied.
pub fn establish(url: &str) -> Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(url)?;
    ConnectionOptions {
        busy_timeout: DEFAULT_BUSY_TIMEOUT,
        file_backed: false,
    }
    .apply(&mut conn)?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

pub fn establish_in_memory() -> Result<SqliteConnection> {
    establish(":memory:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewUser;
    use crate::db::operations::{create_user, get_user};

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = establish_in_memory().unwrap();
        assert!(run_migrations(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn in_memory_pool_shares_one_database() {
        let db = Database::in_memory().unwrap();
        create_user(&mut db.conn().unwrap(), &NewUser::new("u1")).unwrap();
        assert_eq!(get_user(&mut db.conn().unwrap(), "u1").unwrap().id, "u1");
    }

    #[test]
    fn file_pool_enforces_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("fitrack.db").to_string_lossy().into_owned();
        let db = Database::open(&url).unwrap();

        let mut conn = db.conn().unwrap();
        let enabled: Vec<ForeignKeysPragma> = diesel::sql_query("PRAGMA foreign_keys")
            .load(&mut conn)
            .unwrap();
        assert_eq!(enabled[0].foreign_keys, 1);

        drop(conn);
        assert!(db.migrate().unwrap().is_empty());
    }

    #[derive(QueryableByName)]
    struct ForeignKeysPragma {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn config_defaults() {
        let config = DatabaseConfig::new("fitrack.db");
        assert_eq!(config.pool_size, 8);
        assert!(!config.is_in_memory());
        assert!(DatabaseConfig::in_memory().is_in_memory());
    }

    #[test]
    fn overrides_apply_to_any_url() {
        let config = DatabaseConfig::new("cli.db")
            .overridden(Some("2".into()), Some("250".into()))
            .unwrap();
        assert_eq!(config.url, "cli.db");
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));

        let untouched = DatabaseConfig::new("cli.db").overridden(None, None).unwrap();
        assert_eq!(untouched, DatabaseConfig::new("cli.db"));

        for (size, ms) in [(Some("many"), None), (None, Some("-1"))] {
            let err = DatabaseConfig::new("cli.db")
                .overridden(size.map(Into::into), ms.map(Into::into))
                .unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{err:?}");
        }
    }

    #[test]
    fn migrate_reports_nothing_once_applied() {
        let db = Database::in_memory().unwrap();
        assert!(db.migrate().unwrap().is_empty());
    }
}
