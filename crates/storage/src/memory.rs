//! In-memory content store for tests and dry runs.
//!
//! Transactions work on a staged copy of the tables and swap it in on commit,
//! so a failed reseed leaves the committed state untouched. Foreign keys and
//! per-parent `order` uniqueness are checked the way the SQL schema does.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use course_core::model::{ChallengeId, ChallengeOptionId, CourseId, LessonId, UnitId};

use crate::repository::{
    ContentStore, ContentTable, ContentTransaction, NewChallengeOptionRecord, NewChallengeRecord,
    NewCourseRecord, NewLessonRecord, NewUnitRecord, StorageError, TableCounts,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgressRow {
    pub user_id: String,
    pub active_course_id: CourseId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeProgressRow {
    pub user_id: String,
    pub challenge_id: ChallengeId,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSubscriptionRow {
    pub user_id: String,
}

/// Committed rows, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub courses: Vec<(CourseId, NewCourseRecord)>,
    pub units: Vec<(UnitId, NewUnitRecord)>,
    pub lessons: Vec<(LessonId, NewLessonRecord)>,
    pub challenges: Vec<(ChallengeId, NewChallengeRecord)>,
    pub challenge_options: Vec<(ChallengeOptionId, NewChallengeOptionRecord)>,
    pub challenge_progress: Vec<ChallengeProgressRow>,
    pub user_progress: Vec<UserProgressRow>,
    pub user_subscription: Vec<UserSubscriptionRow>,
}

impl ContentSnapshot {
    #[must_use]
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            courses: self.courses.len() as u64,
            units: self.units.len() as u64,
            lessons: self.lessons.len() as u64,
            challenges: self.challenges.len() as u64,
            challenge_options: self.challenge_options.len() as u64,
            challenge_progress: self.challenge_progress.len() as u64,
            user_progress: self.user_progress.len() as u64,
            user_subscription: self.user_subscription.len() as u64,
        }
    }

    /// Options belonging to `challenge_id`, in insertion order.
    #[must_use]
    pub fn options_for(&self, challenge_id: ChallengeId) -> Vec<&NewChallengeOptionRecord> {
        self.challenge_options
            .iter()
            .filter(|(_, o)| o.challenge_id == challenge_id)
            .map(|(_, o)| o)
            .collect()
    }

    /// Challenges belonging to `lesson_id`, in insertion order.
    #[must_use]
    pub fn challenges_for(&self, lesson_id: LessonId) -> Vec<(ChallengeId, &NewChallengeRecord)> {
        self.challenges
            .iter()
            .filter(|(_, c)| c.lesson_id == lesson_id)
            .map(|(id, c)| (*id, c))
            .collect()
    }

    fn is_referenced(&self, table: ContentTable) -> bool {
        match table {
            ContentTable::Courses => !self.units.is_empty() || !self.user_progress.is_empty(),
            ContentTable::Units => !self.lessons.is_empty(),
            ContentTable::Lessons => !self.challenges.is_empty(),
            ContentTable::Challenges => {
                !self.challenge_options.is_empty() || !self.challenge_progress.is_empty()
            }
            ContentTable::ChallengeOptions
            | ContentTable::ChallengeProgress
            | ContentTable::UserProgress
            | ContentTable::UserSubscription => false,
        }
    }

    fn clear(&mut self, table: ContentTable) {
        match table {
            ContentTable::ChallengeProgress => self.challenge_progress.clear(),
            ContentTable::ChallengeOptions => self.challenge_options.clear(),
            ContentTable::Challenges => self.challenges.clear(),
            ContentTable::Lessons => self.lessons.clear(),
            ContentTable::Units => self.units.clear(),
            ContentTable::UserProgress => self.user_progress.clear(),
            ContentTable::UserSubscription => self.user_subscription.clear(),
            ContentTable::Courses => self.courses.clear(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    tables: ContentSnapshot,
    next_id: u64,
}

impl MemoryState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory content store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<Mutex<MemoryState>>,
    fail_on: Arc<Mutex<Option<ContentTable>>>,
}

impl InMemoryContentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later insert into `table` fail with a connection error.
    #[must_use]
    pub fn failing_on(self, table: ContentTable) -> Self {
        if let Ok(mut guard) = self.fail_on.lock() {
            *guard = Some(table);
        }
        self
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        if let Ok(mut guard) = self.fail_on.lock() {
            *guard = None;
        }
    }

    /// Copy of the committed rows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn snapshot(&self) -> Result<ContentSnapshot, StorageError> {
        Ok(self.lock()?.tables.clone())
    }

    /// Record a learner who subscribed, enrolled in the course owning
    /// `challenge_id`, and completed that challenge.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the challenge does not exist.
    pub fn record_learner_activity(
        &self,
        user_id: &str,
        challenge_id: ChallengeId,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let tables = &mut guard.tables;
        let course_id = course_of_challenge(tables, challenge_id).ok_or(StorageError::NotFound)?;
        tables.user_progress.push(UserProgressRow {
            user_id: user_id.to_owned(),
            active_course_id: course_id,
        });
        tables.challenge_progress.push(ChallengeProgressRow {
            user_id: user_id.to_owned(),
            challenge_id,
            completed: true,
        });
        tables.user_subscription.push(UserSubscriptionRow {
            user_id: user_id.to_owned(),
        });
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn course_of_challenge(tables: &ContentSnapshot, challenge_id: ChallengeId) -> Option<CourseId> {
    let (_, challenge) = tables.challenges.iter().find(|(id, _)| *id == challenge_id)?;
    let (_, lesson) = tables
        .lessons
        .iter()
        .find(|(id, _)| *id == challenge.lesson_id)?;
    let (_, unit) = tables.units.iter().find(|(id, _)| *id == lesson.unit_id)?;
    Some(unit.course_id)
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn begin(&self) -> Result<Box<dyn ContentTransaction>, StorageError> {
        let staged = self.lock()?.clone();
        let fail_on = *self
            .fail_on
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Box::new(InMemoryTransaction {
            shared: Arc::clone(&self.state),
            staged,
            fail_on,
        }))
    }

    async fn table_counts(&self) -> Result<TableCounts, StorageError> {
        Ok(self.lock()?.tables.counts())
    }
}

struct InMemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    staged: MemoryState,
    fail_on: Option<ContentTable>,
}

impl InMemoryTransaction {
    fn check_injected(&self, table: ContentTable) -> Result<(), StorageError> {
        if self.fail_on == Some(table) {
            return Err(StorageError::Connection(format!(
                "injected failure writing {table}"
            )));
        }
        Ok(())
    }
}

/// Fails when two rows share a parent and an order, or an order collides
/// with a row already stored under the same parent.
fn check_unique_order<P: Copy + Eq + std::hash::Hash>(
    table: ContentTable,
    existing: impl Iterator<Item = (P, u32)>,
    incoming: impl Iterator<Item = (P, u32)>,
) -> Result<(), StorageError> {
    let mut seen: HashSet<(P, u32)> = existing.collect();
    for key in incoming {
        if !seen.insert(key) {
            return Err(StorageError::Conflict(format!(
                "duplicate order {} in {table}",
                key.1
            )));
        }
    }
    Ok(())
}

fn missing_parent(table: ContentTable, parent: impl std::fmt::Display) -> StorageError {
    StorageError::Conflict(format!("{table} row references missing parent {parent}"))
}

#[async_trait]
impl ContentTransaction for InMemoryTransaction {
    async fn clear_table(&mut self, table: ContentTable) -> Result<(), StorageError> {
        if self.staged.tables.is_referenced(table) {
            return Err(StorageError::Conflict(format!(
                "{table} is still referenced by dependent rows"
            )));
        }
        self.staged.tables.clear(table);
        Ok(())
    }

    async fn insert_course(&mut self, course: &NewCourseRecord) -> Result<CourseId, StorageError> {
        self.check_injected(ContentTable::Courses)?;
        let id = CourseId::new(self.staged.allocate());
        self.staged.tables.courses.push((id, course.clone()));
        Ok(id)
    }

    async fn insert_units(&mut self, units: &[NewUnitRecord]) -> Result<Vec<UnitId>, StorageError> {
        let table = ContentTable::Units;
        self.check_injected(table)?;
        let tables = &self.staged.tables;
        for unit in units {
            if !tables.courses.iter().any(|(id, _)| *id == unit.course_id) {
                return Err(missing_parent(table, unit.course_id));
            }
        }
        check_unique_order(
            table,
            tables.units.iter().map(|(_, u)| (u.course_id, u.order)),
            units.iter().map(|u| (u.course_id, u.order)),
        )?;

        let mut ids = Vec::with_capacity(units.len());
        for unit in units {
            let id = UnitId::new(self.staged.allocate());
            self.staged.tables.units.push((id, unit.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_lessons(
        &mut self,
        lessons: &[NewLessonRecord],
    ) -> Result<Vec<LessonId>, StorageError> {
        let table = ContentTable::Lessons;
        self.check_injected(table)?;
        let tables = &self.staged.tables;
        for lesson in lessons {
            if !tables.units.iter().any(|(id, _)| *id == lesson.unit_id) {
                return Err(missing_parent(table, lesson.unit_id));
            }
        }
        check_unique_order(
            table,
            tables.lessons.iter().map(|(_, l)| (l.unit_id, l.order)),
            lessons.iter().map(|l| (l.unit_id, l.order)),
        )?;

        let mut ids = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            let id = LessonId::new(self.staged.allocate());
            self.staged.tables.lessons.push((id, lesson.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_challenges(
        &mut self,
        challenges: &[NewChallengeRecord],
    ) -> Result<Vec<ChallengeId>, StorageError> {
        let table = ContentTable::Challenges;
        self.check_injected(table)?;
        let tables = &self.staged.tables;
        for challenge in challenges {
            if !tables.lessons.iter().any(|(id, _)| *id == challenge.lesson_id) {
                return Err(missing_parent(table, challenge.lesson_id));
            }
        }
        check_unique_order(
            table,
            tables.challenges.iter().map(|(_, c)| (c.lesson_id, c.order)),
            challenges.iter().map(|c| (c.lesson_id, c.order)),
        )?;

        let mut ids = Vec::with_capacity(challenges.len());
        for challenge in challenges {
            let id = ChallengeId::new(self.staged.allocate());
            self.staged.tables.challenges.push((id, challenge.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_options(
        &mut self,
        options: &[NewChallengeOptionRecord],
    ) -> Result<(), StorageError> {
        let table = ContentTable::ChallengeOptions;
        self.check_injected(table)?;
        for option in options {
            if !self
                .staged
                .tables
                .challenges
                .iter()
                .any(|(id, _)| *id == option.challenge_id)
            {
                return Err(missing_parent(table, option.challenge_id));
            }
        }
        for option in options {
            let id = ChallengeOptionId::new(self.staged.allocate());
            self.staged
                .tables
                .challenge_options
                .push((id, option.clone()));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let Self { shared, staged, .. } = *self;
        let mut guard = shared
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        Ok(())
    }
}
