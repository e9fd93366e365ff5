use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use course_core::model::{
    Catalog, ChallengeId, ChallengeKind, CourseId, LessonId, UnitDef, UnitId, VocabItem,
};
use thiserror::Error;

use crate::memory::InMemoryContentStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    /// A foreign-key or uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── TABLES ────────────────────────────────────────────────────────────────────
//

/// The tables a reseed touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTable {
    ChallengeProgress,
    ChallengeOptions,
    Challenges,
    Lessons,
    Units,
    UserProgress,
    UserSubscription,
    Courses,
}

impl ContentTable {
    /// Delete order that satisfies every foreign key: children before parents.
    pub const RESET_ORDER: [ContentTable; 8] = [
        ContentTable::ChallengeProgress,
        ContentTable::ChallengeOptions,
        ContentTable::Challenges,
        ContentTable::Lessons,
        ContentTable::Units,
        ContentTable::UserProgress,
        ContentTable::UserSubscription,
        ContentTable::Courses,
    ];

    #[must_use]
    pub fn table_name(self) -> &'static str {
        match self {
            ContentTable::ChallengeProgress => "challenge_progress",
            ContentTable::ChallengeOptions => "challenge_options",
            ContentTable::Challenges => "challenges",
            ContentTable::Lessons => "lessons",
            ContentTable::Units => "units",
            ContentTable::UserProgress => "user_progress",
            ContentTable::UserSubscription => "user_subscription",
            ContentTable::Courses => "courses",
        }
    }
}

impl fmt::Display for ContentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Persisted shape for a course row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseRecord {
    pub title: String,
    pub image_src: String,
    pub description: String,
}

impl NewCourseRecord {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            title: catalog.title().to_owned(),
            image_src: catalog.image_src().to_owned(),
            description: catalog.description().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnitRecord {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub order: u32,
}

impl NewUnitRecord {
    /// Unit rows keep the order declared in the catalog.
    #[must_use]
    pub fn from_def(course_id: CourseId, unit: &UnitDef) -> Self {
        Self {
            course_id,
            title: unit.title().to_owned(),
            description: unit.description().to_owned(),
            order: unit.order(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLessonRecord {
    pub unit_id: UnitId,
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChallengeRecord {
    pub lesson_id: LessonId,
    pub kind: ChallengeKind,
    pub question: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChallengeOptionRecord {
    pub challenge_id: ChallengeId,
    pub text: String,
    pub correct: bool,
    pub image_src: Option<String>,
    pub audio_src: Option<String>,
}

impl NewChallengeOptionRecord {
    /// Option row showing `item`'s target term and media.
    #[must_use]
    pub fn from_vocab(challenge_id: ChallengeId, item: &VocabItem, correct: bool) -> Self {
        Self {
            challenge_id,
            text: item.target().to_owned(),
            correct,
            image_src: item.image_src().map(str::to_owned),
            audio_src: item.audio_src().map(str::to_owned),
        }
    }
}

/// Row count per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub courses: u64,
    pub units: u64,
    pub lessons: u64,
    pub challenges: u64,
    pub challenge_options: u64,
    pub challenge_progress: u64,
    pub user_progress: u64,
    pub user_subscription: u64,
}

impl TableCounts {
    #[must_use]
    pub fn get(&self, table: ContentTable) -> u64 {
        match table {
            ContentTable::ChallengeProgress => self.challenge_progress,
            ContentTable::ChallengeOptions => self.challenge_options,
            ContentTable::Challenges => self.challenges,
            ContentTable::Lessons => self.lessons,
            ContentTable::Units => self.units,
            ContentTable::UserProgress => self.user_progress,
            ContentTable::UserSubscription => self.user_subscription,
            ContentTable::Courses => self.courses,
        }
    }

    pub(crate) fn set(&mut self, table: ContentTable, count: u64) {
        let slot = match table {
            ContentTable::ChallengeProgress => &mut self.challenge_progress,
            ContentTable::ChallengeOptions => &mut self.challenge_options,
            ContentTable::Challenges => &mut self.challenges,
            ContentTable::Lessons => &mut self.lessons,
            ContentTable::Units => &mut self.units,
            ContentTable::UserProgress => &mut self.user_progress,
            ContentTable::UserSubscription => &mut self.user_subscription,
            ContentTable::Courses => &mut self.courses,
        };
        *slot = count;
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Entry point to a course content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Open a transaction. Nothing written through it is visible until
    /// `commit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot start a transaction.
    async fn begin(&self) -> Result<Box<dyn ContentTransaction>, StorageError>;

    /// Count committed rows in every content table.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any count query fails.
    async fn table_counts(&self) -> Result<TableCounts, StorageError>;
}

/// Writes performed inside one store transaction.
///
/// Batch inserts return generated ids in input order. Dropping the
/// transaction without `commit` discards every write.
#[async_trait]
pub trait ContentTransaction: Send {
    /// Delete every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if rows in another table still
    /// reference it.
    async fn clear_table(&mut self, table: ContentTable) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_course(&mut self, course: &NewCourseRecord) -> Result<CourseId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a missing course or a repeated order.
    async fn insert_units(&mut self, units: &[NewUnitRecord]) -> Result<Vec<UnitId>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a missing unit or a repeated order.
    async fn insert_lessons(
        &mut self,
        lessons: &[NewLessonRecord],
    ) -> Result<Vec<LessonId>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a missing lesson or a repeated order.
    async fn insert_challenges(
        &mut self,
        challenges: &[NewChallengeRecord],
    ) -> Result<Vec<ChallengeId>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a missing challenge.
    async fn insert_options(
        &mut self,
        options: &[NewChallengeOptionRecord],
    ) -> Result<(), StorageError>;

    /// Make every write visible.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the commit fails; the writes are then lost.
    async fn commit(self: Box<Self>) -> Result<(), StorageError>;

    /// Discard every write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend reports a rollback failure.
    async fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}

/// Content store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub content: Arc<dyn ContentStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            content: Arc::new(InMemoryContentStore::new()),
        }
    }
}
