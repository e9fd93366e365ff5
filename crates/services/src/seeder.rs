use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use course_core::model::{Catalog, CourseId, LessonDef, LessonId, UnitDef, UnitId};
use storage::repository::{
    ContentStore, ContentTable, ContentTransaction, NewCourseRecord, NewLessonRecord,
    NewUnitRecord,
};

use crate::challenges::plan_challenges;
use crate::error::SeedError;
use crate::options::build_options;

/// What a successful reseed wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub course_id: CourseId,
    pub units: usize,
    pub lessons: usize,
    pub challenges: usize,
    pub options: usize,
}

/// Replaces all course content in a store with one catalog.
///
/// The reset and every insert run in a single store transaction; the first
/// failure rolls everything back.
#[derive(Clone)]
pub struct CourseSeeder {
    store: Arc<dyn ContentStore>,
}

impl CourseSeeder {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Wipe existing content and learner state, then write `catalog`.
    ///
    /// `rng` drives distractor sampling and option order; pass a seeded rng
    /// for reproducible output.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Catalog` if the catalog is invalid (the store is
    /// not touched). Returns `SeedError::Storage` if any write or the commit
    /// fails; the store keeps its previous content.
    pub async fn seed<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<SeedReport, SeedError> {
        catalog.validate()?;

        let mut tx = self.store.begin().await?;
        match write_catalog(tx.as_mut(), catalog, rng).await {
            Ok(report) => {
                tx.commit().await?;
                info!(
                    course_id = %report.course_id,
                    units = report.units,
                    lessons = report.lessons,
                    challenges = report.challenges,
                    options = report.options,
                    "reseed committed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "reseed failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

async fn write_catalog<R: Rng + ?Sized>(
    tx: &mut dyn ContentTransaction,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<SeedReport, SeedError> {
    for table in ContentTable::RESET_ORDER {
        tx.clear_table(table).await?;
    }
    info!("cleared existing course content");

    let course_id = tx
        .insert_course(&NewCourseRecord::from_catalog(catalog))
        .await?;

    let unit_records: Vec<NewUnitRecord> = catalog
        .units()
        .iter()
        .map(|unit| NewUnitRecord::from_def(course_id, unit))
        .collect();
    let unit_ids = tx.insert_units(&unit_records).await?;

    let mut report = SeedReport {
        course_id,
        units: unit_ids.len(),
        lessons: 0,
        challenges: 0,
        options: 0,
    };
    for (unit, unit_id) in catalog.units().iter().zip(unit_ids) {
        write_unit(tx, unit, unit_id, rng, &mut report).await?;
    }
    Ok(report)
}

async fn write_unit<R: Rng + ?Sized>(
    tx: &mut dyn ContentTransaction,
    unit: &UnitDef,
    unit_id: UnitId,
    rng: &mut R,
    report: &mut SeedReport,
) -> Result<(), SeedError> {
    let lesson_records: Vec<NewLessonRecord> = (1_u32..)
        .zip(unit.lessons())
        .map(|(order, lesson)| NewLessonRecord {
            unit_id,
            title: lesson.title().to_owned(),
            order,
        })
        .collect();
    let lesson_ids = tx.insert_lessons(&lesson_records).await?;
    report.lessons += lesson_ids.len();

    for (lesson, lesson_id) in unit.lessons().iter().zip(lesson_ids) {
        let (challenges, options) = write_lesson(tx, lesson, lesson_id, rng).await?;
        report.challenges += challenges;
        report.options += options;
    }
    debug!(unit = unit.title(), order = unit.order(), "seeded unit");
    Ok(())
}

async fn write_lesson<R: Rng + ?Sized>(
    tx: &mut dyn ContentTransaction,
    lesson: &LessonDef,
    lesson_id: LessonId,
    rng: &mut R,
) -> Result<(usize, usize), SeedError> {
    let planned = plan_challenges(lesson)?;
    let records: Vec<_> = planned.iter().map(|c| c.to_record(lesson_id)).collect();
    let challenge_ids = tx.insert_challenges(&records).await?;

    let mut option_count = 0;
    for (challenge, challenge_id) in planned.iter().zip(challenge_ids.iter().copied()) {
        let options = build_options(
            challenge_id,
            challenge.kind,
            challenge.answer,
            lesson.vocab(),
            rng,
        )?;
        tx.insert_options(&options).await?;
        option_count += options.len();
    }

    debug!(
        lesson = lesson.title(),
        challenges = challenge_ids.len(),
        "seeded lesson"
    );
    Ok((challenge_ids.len(), option_count))
}
