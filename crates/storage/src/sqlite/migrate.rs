use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the course content tables (courses, units, lessons, challenges,
/// options) and the learner tables that reference them (progress and
/// subscriptions). Foreign keys do not cascade, so a reset must delete
/// children first.
#[allow(clippy::too_many_lines)]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS courses (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    image_src TEXT NOT NULL,
                    description TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS units (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL REFERENCES courses(id),
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    "order" INTEGER NOT NULL CHECK ("order" > 0),
                    UNIQUE (course_id, "order")
                );
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS lessons (
                    id INTEGER PRIMARY KEY,
                    unit_id INTEGER NOT NULL REFERENCES units(id),
                    title TEXT NOT NULL,
                    "order" INTEGER NOT NULL CHECK ("order" > 0),
                    UNIQUE (unit_id, "order")
                );
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS challenges (
                    id INTEGER PRIMARY KEY,
                    lesson_id INTEGER NOT NULL REFERENCES lessons(id),
                    type TEXT NOT NULL CHECK (type IN ('SELECT', 'ASSIST')),
                    question TEXT NOT NULL,
                    "order" INTEGER NOT NULL CHECK ("order" > 0),
                    UNIQUE (lesson_id, "order")
                );
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS challenge_options (
                    id INTEGER PRIMARY KEY,
                    challenge_id INTEGER NOT NULL REFERENCES challenges(id),
                    text TEXT NOT NULL,
                    correct INTEGER NOT NULL CHECK (correct IN (0, 1)),
                    image_src TEXT,
                    audio_src TEXT
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS challenge_progress (
                    id INTEGER PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    challenge_id INTEGER NOT NULL REFERENCES challenges(id),
                    completed INTEGER NOT NULL DEFAULT 0
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_progress (
                    user_id TEXT PRIMARY KEY,
                    active_course_id INTEGER REFERENCES courses(id),
                    hearts INTEGER NOT NULL DEFAULT 5,
                    points INTEGER NOT NULL DEFAULT 0
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_subscription (
                    id INTEGER PRIMARY KEY,
                    user_id TEXT NOT NULL UNIQUE,
                    current_period_end TEXT
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_challenge_options_challenge
                    ON challenge_options (challenge_id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_challenge_progress_challenge
                    ON challenge_progress (challenge_id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied schema migration");
    }

    Ok(())
}
