use std::collections::HashSet;

use thiserror::Error;

use crate::model::challenge::{ASSIST_CHALLENGES_PER_LESSON, DISTRACTORS_PER_CHALLENGE};

/// Smallest vocabulary list that still leaves two distractors per challenge.
pub const MIN_LESSON_VOCAB: usize = DISTRACTORS_PER_CHALLENGE + 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course title cannot be empty")]
    EmptyCourseTitle,

    #[error("unit #{index} has an empty title")]
    EmptyUnitTitle { index: usize },

    #[error("unit \"{unit}\" has order 0; unit order is 1-based")]
    ZeroUnitOrder { unit: String },

    #[error("unit order {order} is used by more than one unit")]
    DuplicateUnitOrder { order: u32 },

    #[error("unit \"{unit}\" has a lesson with an empty title")]
    EmptyLessonTitle { unit: String },

    #[error("lesson \"{lesson}\" has no vocabulary")]
    EmptyLesson { lesson: String },

    #[error(
        "lesson \"{lesson}\" has {found} vocabulary items, at least {} are required",
        MIN_LESSON_VOCAB
    )]
    TooFewVocab { lesson: String, found: usize },

    #[error("lesson \"{lesson}\" repeats the target term \"{target}\"")]
    DuplicateTarget { lesson: String, target: String },

    #[error(
        "only {available} distractors available for \"{target}\", {} required",
        DISTRACTORS_PER_CHALLENGE
    )]
    NotEnoughDistractors { target: String, available: usize },
}

//
// ─── VOCABULARY ────────────────────────────────────────────────────────────────
//

/// One vocabulary pair: the learner's language (`source`) and the course
/// language (`target`), with optional media references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabItem {
    source: String,
    target: String,
    image_src: Option<String>,
    audio_src: Option<String>,
}

impl VocabItem {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            image_src: None,
            audio_src: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image_src: impl Into<String>) -> Self {
        self.image_src = Some(image_src.into());
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio_src: impl Into<String>) -> Self {
        self.audio_src = Some(audio_src.into());
        self
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    #[must_use]
    pub fn audio_src(&self) -> Option<&str> {
        self.audio_src.as_deref()
    }
}

//
// ─── HIERARCHY ─────────────────────────────────────────────────────────────────
//

/// A lesson definition. Lessons carry no explicit order; their position in
/// the unit is the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDef {
    title: String,
    vocab: Vec<VocabItem>,
}

impl LessonDef {
    #[must_use]
    pub fn new(title: impl Into<String>, vocab: Vec<VocabItem>) -> Self {
        Self {
            title: title.into(),
            vocab,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn vocab(&self) -> &[VocabItem] {
        &self.vocab
    }

    /// Number of challenges this lesson produces: one select challenge per
    /// vocabulary item plus the assisted-listening pair.
    #[must_use]
    pub fn challenge_count(&self) -> usize {
        if self.vocab.is_empty() {
            0
        } else {
            self.vocab.len() + ASSIST_CHALLENGES_PER_LESSON
        }
    }

    fn validate(&self, unit: &str) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::EmptyLessonTitle {
                unit: unit.to_owned(),
            });
        }
        if self.vocab.is_empty() {
            return Err(CatalogError::EmptyLesson {
                lesson: self.title.clone(),
            });
        }
        if self.vocab.len() < MIN_LESSON_VOCAB {
            return Err(CatalogError::TooFewVocab {
                lesson: self.title.clone(),
                found: self.vocab.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.vocab.len());
        for item in &self.vocab {
            if !seen.insert(item.target()) {
                return Err(CatalogError::DuplicateTarget {
                    lesson: self.title.clone(),
                    target: item.target().to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// A unit definition with its explicit, 1-based display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDef {
    title: String,
    description: String,
    order: u32,
    lessons: Vec<LessonDef>,
}

impl UnitDef {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        order: u32,
        lessons: Vec<LessonDef>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            order,
            lessons,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonDef] {
        &self.lessons
    }
}

/// Static course content handed to the seeder: the course row plus its
/// ordered units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    title: String,
    image_src: String,
    description: String,
    units: Vec<UnitDef>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        image_src: impl Into<String>,
        description: impl Into<String>,
        units: Vec<UnitDef>,
    ) -> Self {
        Self {
            title: title.into(),
            image_src: image_src.into(),
            description: description.into(),
            units,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.units.iter().map(|u| u.lessons.len()).sum()
    }

    #[must_use]
    pub fn challenge_count(&self) -> usize {
        self.units
            .iter()
            .flat_map(|u| u.lessons.iter())
            .map(LessonDef::challenge_count)
            .sum()
    }

    /// Check the catalog is something the seeder can turn into rows.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found, walking units and lessons in
    /// catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::EmptyCourseTitle);
        }

        let mut orders = HashSet::with_capacity(self.units.len());
        for (index, unit) in self.units.iter().enumerate() {
            if unit.title.trim().is_empty() {
                return Err(CatalogError::EmptyUnitTitle { index });
            }
            if unit.order == 0 {
                return Err(CatalogError::ZeroUnitOrder {
                    unit: unit.title.clone(),
                });
            }
            if !orders.insert(unit.order) {
                return Err(CatalogError::DuplicateUnitOrder { order: unit.order });
            }
            for lesson in &unit.lessons {
                lesson.validate(&unit.title)?;
            }
        }
        Ok(())
    }
}
