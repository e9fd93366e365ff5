use course_core::model::{ChallengeId, CourseId, LessonId, UnitId};
use sqlx::{Row, Sqlite, Transaction};

use super::SqliteRepository;
use super::mapping::{db_err, id_to_i64, inserted_id};
use crate::repository::{
    ContentStore, ContentTable, ContentTransaction, NewChallengeOptionRecord, NewChallengeRecord,
    NewCourseRecord, NewLessonRecord, NewUnitRecord, StorageError, TableCounts,
};

/// A reseed running inside one `SQLite` transaction.
///
/// Dropping it without `commit` rolls the transaction back.
pub struct SqliteTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait::async_trait]
impl ContentStore for SqliteRepository {
    async fn begin(&self) -> Result<Box<dyn ContentTransaction>, StorageError> {
        let tx = self.pool.begin().await.map_err(db_err)?;
        Ok(Box::new(SqliteTransaction { tx }))
    }

    async fn table_counts(&self) -> Result<TableCounts, StorageError> {
        let mut counts = TableCounts::default();
        for table in ContentTable::RESET_ORDER {
            let sql = format!("SELECT COUNT(*) AS n FROM {}", table.table_name());
            let row = sqlx::query(&sql)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
            let n: i64 = row
                .try_get("n")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            counts.set(
                table,
                u64::try_from(n)
                    .map_err(|_| StorageError::Serialization(format!("negative count in {table}")))?,
            );
        }
        Ok(counts)
    }
}

#[async_trait::async_trait]
impl ContentTransaction for SqliteTransaction {
    async fn clear_table(&mut self, table: ContentTable) -> Result<(), StorageError> {
        let sql = format!("DELETE FROM {}", table.table_name());
        let res = sqlx::query(&sql)
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
        tracing::debug!(%table, deleted = res.rows_affected(), "cleared table");
        Ok(())
    }

    async fn insert_course(&mut self, course: &NewCourseRecord) -> Result<CourseId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO courses (title, image_src, description)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(&course.title)
        .bind(&course.image_src)
        .bind(&course.description)
        .execute(&mut *self.tx)
        .await
        .map_err(db_err)?;

        Ok(CourseId::new(inserted_id("course_id", &res)?))
    }

    async fn insert_units(&mut self, units: &[NewUnitRecord]) -> Result<Vec<UnitId>, StorageError> {
        let mut ids = Vec::with_capacity(units.len());
        for unit in units {
            let res = sqlx::query(
                r#"
                INSERT INTO units (course_id, title, description, "order")
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(id_to_i64("course_id", unit.course_id.value())?)
            .bind(&unit.title)
            .bind(&unit.description)
            .bind(i64::from(unit.order))
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
            ids.push(UnitId::new(inserted_id("unit_id", &res)?));
        }
        Ok(ids)
    }

    async fn insert_lessons(
        &mut self,
        lessons: &[NewLessonRecord],
    ) -> Result<Vec<LessonId>, StorageError> {
        let mut ids = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            let res = sqlx::query(
                r#"
                INSERT INTO lessons (unit_id, title, "order")
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(id_to_i64("unit_id", lesson.unit_id.value())?)
            .bind(&lesson.title)
            .bind(i64::from(lesson.order))
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
            ids.push(LessonId::new(inserted_id("lesson_id", &res)?));
        }
        Ok(ids)
    }

    async fn insert_challenges(
        &mut self,
        challenges: &[NewChallengeRecord],
    ) -> Result<Vec<ChallengeId>, StorageError> {
        let mut ids = Vec::with_capacity(challenges.len());
        for challenge in challenges {
            let res = sqlx::query(
                r#"
                INSERT INTO challenges (lesson_id, type, question, "order")
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(id_to_i64("lesson_id", challenge.lesson_id.value())?)
            .bind(challenge.kind.as_str())
            .bind(&challenge.question)
            .bind(i64::from(challenge.order))
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
            ids.push(ChallengeId::new(inserted_id("challenge_id", &res)?));
        }
        Ok(ids)
    }

    async fn insert_options(
        &mut self,
        options: &[NewChallengeOptionRecord],
    ) -> Result<(), StorageError> {
        for option in options {
            sqlx::query(
                r"
                INSERT INTO challenge_options (challenge_id, text, correct, image_src, audio_src)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )
            .bind(id_to_i64("challenge_id", option.challenge_id.value())?)
            .bind(&option.text)
            .bind(option.correct)
            .bind(option.image_src.as_deref())
            .bind(option.audio_src.as_deref())
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let Self { tx } = *self;
        tx.commit().await.map_err(db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        let Self { tx } = *self;
        tx.rollback().await.map_err(db_err)
    }
}
