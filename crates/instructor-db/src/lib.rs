//! # Instructor DB
//!
//! Storage for the instructor-led API.
//!
//! Services talk to storage through the repository traits in [`repository`]. Two backends
//! implement them:
//!
//! - [`postgres`]: the production backend on a [`PgPool`]
//! - `memory`: an in-process backend for tests, behind the `test-utils` feature
//!
//! [`Store`] bundles one implementation of each trait and is what the application state
//! holds.
//!
//! Every table is soft-deleted: deleting sets `deleted_at`, and every read filters on
//! `deleted_at IS NULL`. Lists are ordered by `created_at DESC`.
//!
//! # Example
//!
//! ```ignore
//! use instructor_config::DatabaseConfig;
//! use instructor_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//! ```

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use instructor_config::DatabaseConfig;

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StorageError;
pub use repository::{
    AttendanceRepository, QuestionRepository, ScheduleRepository, UserRepository,
};
pub use sqlx::PgPool;

/// Opens the connection pool. Connections are established lazily up to
/// `max_connections`; the first one is opened eagerly so a bad URL fails at startup.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// One repository per resource, shared by every request.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            schedules: Arc::new(postgres::PgScheduleRepository::new(pool.clone())),
            questions: Arc::new(postgres::PgQuestionRepository::new(pool.clone())),
            attendance: Arc::new(postgres::PgAttendanceRepository::new(pool)),
        }
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Self {
        let memory = Arc::new(memory::MemoryStore::default());
        Self {
            users: memory.clone(),
            schedules: memory.clone(),
            questions: memory.clone(),
            attendance: memory,
        }
    }
}
