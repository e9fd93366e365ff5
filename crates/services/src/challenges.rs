use course_core::model::{
    CatalogError, ChallengeKind, LessonDef, LessonId, VocabItem, assist_prompt, select_prompt,
};
use storage::repository::NewChallengeRecord;

/// A challenge ready to insert, still tied to the vocabulary entry it asks
/// about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChallenge<'a> {
    pub kind: ChallengeKind,
    pub question: String,
    pub order: u32,
    pub answer: &'a VocabItem,
}

impl PlannedChallenge<'_> {
    #[must_use]
    pub fn to_record(&self, lesson_id: LessonId) -> NewChallengeRecord {
        NewChallengeRecord {
            lesson_id,
            kind: self.kind,
            question: self.question.clone(),
            order: self.order,
        }
    }
}

/// Lay out the challenges of one lesson.
///
/// One select challenge per vocabulary entry (orders `1..=V`), then two
/// assisted-listening challenges on the first and last entries (orders `V+1`
/// and `V+2`).
///
/// # Errors
///
/// Returns `CatalogError::EmptyLesson` when the lesson has no vocabulary.
pub fn plan_challenges(lesson: &LessonDef) -> Result<Vec<PlannedChallenge<'_>>, CatalogError> {
    let vocab = lesson.vocab();
    let (Some(first), Some(last)) = (vocab.first(), vocab.last()) else {
        return Err(CatalogError::EmptyLesson {
            lesson: lesson.title().to_owned(),
        });
    };

    let mut planned = Vec::with_capacity(lesson.challenge_count());
    let mut order = 0_u32;
    let mut next_order = || {
        order += 1;
        order
    };

    for item in vocab {
        planned.push(PlannedChallenge {
            kind: ChallengeKind::Select,
            question: select_prompt(item.source()),
            order: next_order(),
            answer: item,
        });
    }
    for item in [first, last] {
        planned.push(PlannedChallenge {
            kind: ChallengeKind::Assist,
            question: assist_prompt(item.target()),
            order: next_order(),
            answer: item,
        });
    }

    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> LessonDef {
        LessonDef::new(
            "Numbers 1-4",
            vec![
                VocabItem::new("one", "un"),
                VocabItem::new("two", "deux"),
                VocabItem::new("three", "trois"),
                VocabItem::new("four", "quatre"),
            ],
        )
    }

    #[test]
    fn plans_select_then_assist_challenges() {
        let lesson = numbers();
        let planned = plan_challenges(&lesson).unwrap();
        assert_eq!(planned.len(), 6);

        let questions: Vec<&str> = planned.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(
            questions,
            vec![
                "Which one of these is \"one\"?",
                "Which one of these is \"two\"?",
                "Which one of these is \"three\"?",
                "Which one of these is \"four\"?",
                "\"un\" (listen and pick)",
                "\"quatre\" (listen and pick)",
            ]
        );

        let kinds: Vec<ChallengeKind> = planned.iter().map(|c| c.kind).collect();
        assert_eq!(&kinds[..4], &[ChallengeKind::Select; 4]);
        assert_eq!(&kinds[4..], &[ChallengeKind::Assist; 2]);

        let orders: Vec<u32> = planned.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn answers_are_carried_not_parsed() {
        let lesson = numbers();
        let planned = plan_challenges(&lesson).unwrap();
        let answers: Vec<&str> = planned.iter().map(|c| c.answer.target()).collect();
        assert_eq!(answers, vec!["un", "deux", "trois", "quatre", "un", "quatre"]);
        assert!(std::ptr::eq(planned[4].answer, &lesson.vocab()[0]));
    }

    #[test]
    fn quotes_inside_terms_do_not_change_the_answer() {
        let lesson = LessonDef::new(
            "Quoted",
            vec![
                VocabItem::new("say \"hi\"", "dis \"salut\""),
                VocabItem::new("yes", "oui"),
                VocabItem::new("no", "non"),
            ],
        );
        let planned = plan_challenges(&lesson).unwrap();
        assert_eq!(planned[0].answer.target(), "dis \"salut\"");
        assert_eq!(planned[3].answer.target(), "dis \"salut\"");
    }

    #[test]
    fn empty_lesson_is_an_error() {
        let lesson = LessonDef::new("Empty", Vec::new());
        assert_eq!(
            plan_challenges(&lesson),
            Err(CatalogError::EmptyLesson {
                lesson: "Empty".into()
            })
        );
    }

    #[test]
    fn record_keeps_order_and_kind() {
        let lesson = numbers();
        let planned = plan_challenges(&lesson).unwrap();
        let record = planned[5].to_record(LessonId::new(3));
        assert_eq!(record.lesson_id, LessonId::new(3));
        assert_eq!(record.kind, ChallengeKind::Assist);
        assert_eq!(record.order, 6);
    }
}
