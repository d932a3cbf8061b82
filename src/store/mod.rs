//! `PostgreSQL` storage layer.
//!
//! `CampusStore` wraps a connection pool and exposes one method per
//! domain operation. Every method acquires its connection (or
//! transaction) from the pool for the duration of the call only, so
//! resources are released on every exit path.
//!
//! Concurrency contracts live here, not in the handlers:
//! - registration serializes per event with a row lock
//!   ([`registrations`]);
//! - identity and feedback use atomic `ON CONFLICT` upserts
//!   ([`students`], [`feedback`]).

pub mod attendance;
pub mod events;
pub mod feedback;
pub mod registrations;
pub mod reports;
pub mod students;

pub use attendance::CheckinOutcome;
pub use feedback::FeedbackOutcome;
pub use registrations::RegisterOutcome;

use crate::config::{AttendancePolicy, PostgresConfig};
use crate::error::Result;
use crate::types::CollegeId;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Shared persistent store for all campus entities.
#[derive(Clone)]
pub struct CampusStore {
    pool: PgPool,
    attendance_policy: AttendancePolicy,
}

impl CampusStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool, attendance_policy: AttendancePolicy) -> Self {
        Self {
            pool,
            attendance_policy,
        }
    }

    /// Connect to `PostgreSQL` and build the pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the database is unreachable.
    pub async fn connect(
        config: &PostgresConfig,
        attendance_policy: AttendancePolicy,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool, attendance_policy))
    }

    /// Access the underlying connection pool.
    ///
    /// Useful for health checks or manual queries.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The configured attendance dedupe policy.
    #[must_use]
    pub const fn attendance_policy(&self) -> AttendancePolicy {
        self.attendance_policy
    }

    /// Create the schema if it does not exist.
    ///
    /// Idempotent; safe to run on every startup. The uniqueness
    /// constraints declared here are what the upsert paths rely on.
    ///
    /// # Errors
    ///
    /// Returns error if any DDL statement fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS colleges (
                college_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                timezone TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS students (
                student_uuid UUID PRIMARY KEY,
                college_id TEXT NOT NULL,
                student_local_id UUID NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                UNIQUE (college_id, student_local_id),
                UNIQUE (college_id, email)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS events (
                event_id UUID PRIMARY KEY,
                college_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                event_type TEXT NOT NULL,
                start_ts TIMESTAMPTZ NOT NULL,
                end_ts TIMESTAMPTZ NOT NULL,
                location TEXT NOT NULL,
                capacity INT NOT NULL CHECK (capacity > 0),
                status TEXT NOT NULL DEFAULT 'published',
                CHECK (end_ts > start_ts)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS registrations (
                registration_id UUID PRIMARY KEY,
                event_id UUID NOT NULL REFERENCES events(event_id),
                student_uuid UUID NOT NULL REFERENCES students(student_uuid),
                registered_at TIMESTAMPTZ NOT NULL,
                status TEXT NOT NULL DEFAULT 'registered',
                UNIQUE (event_id, student_uuid)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS attendance (
                attendance_id UUID PRIMARY KEY,
                event_id UUID NOT NULL,
                student_uuid UUID NOT NULL,
                checkin_at TIMESTAMPTZ NOT NULL,
                method TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        if self.attendance_policy == AttendancePolicy::Single {
            sqlx::query(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_once
                 ON attendance (event_id, student_uuid)",
            )
            .execute(&self.pool)
            .await?;
        }

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS feedback (
                feedback_id UUID PRIMARY KEY,
                event_id UUID NOT NULL,
                student_uuid UUID NOT NULL,
                rating INT,
                comments TEXT,
                submitted_at TIMESTAMPTZ NOT NULL,
                UNIQUE (event_id, student_uuid)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_registrations_event ON registrations (event_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_event ON attendance (event_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance (student_uuid)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Seed a college row if it is not already present.
    ///
    /// Colleges are immutable reference data; an existing row is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    pub async fn seed_college(&self, college_id: &CollegeId, name: &str, timezone: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO colleges (college_id, name, timezone)
             VALUES ($1, $2, $3)
             ON CONFLICT (college_id) DO NOTHING",
        )
        .bind(college_id)
        .bind(name)
        .bind(timezone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
