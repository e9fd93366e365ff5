mod catalog;
mod challenge;
mod ids;

pub use catalog::{Catalog, CatalogError, LessonDef, MIN_LESSON_VOCAB, UnitDef, VocabItem};
pub use challenge::{
    ASSIST_CHALLENGES_PER_LESSON, ChallengeKind, DISTRACTORS_PER_CHALLENGE,
    OPTIONS_PER_CHALLENGE, ParseChallengeKindError, assist_prompt, select_prompt,
};
pub use ids::{ChallengeId, ChallengeOptionId, CourseId, LessonId, ParseIdError, UnitId};
