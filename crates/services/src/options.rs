use rand::Rng;
use rand::seq::SliceRandom;

use course_core::model::{
    CatalogError, ChallengeId, ChallengeKind, DISTRACTORS_PER_CHALLENGE, OPTIONS_PER_CHALLENGE,
    VocabItem,
};
use storage::repository::NewChallengeOptionRecord;

/// Build the shuffled option set for one challenge.
///
/// The correct option shows `answer`; two distractors are drawn without
/// replacement from `pool` entries whose target term differs from the
/// answer's. Assisted-listening options never carry an image.
///
/// # Errors
///
/// Returns `CatalogError::NotEnoughDistractors` when fewer than two entries
/// of `pool` differ from `answer`.
pub fn build_options<R: Rng + ?Sized>(
    challenge_id: ChallengeId,
    kind: ChallengeKind,
    answer: &VocabItem,
    pool: &[VocabItem],
    rng: &mut R,
) -> Result<Vec<NewChallengeOptionRecord>, CatalogError> {
    let mut distractors: Vec<&VocabItem> = pool
        .iter()
        .filter(|item| item.target() != answer.target())
        .collect();
    if distractors.len() < DISTRACTORS_PER_CHALLENGE {
        return Err(CatalogError::NotEnoughDistractors {
            target: answer.target().to_owned(),
            available: distractors.len(),
        });
    }
    distractors.shuffle(rng);
    distractors.truncate(DISTRACTORS_PER_CHALLENGE);

    let mut options = Vec::with_capacity(OPTIONS_PER_CHALLENGE);
    options.push(NewChallengeOptionRecord::from_vocab(challenge_id, answer, true));
    options.extend(
        distractors
            .into_iter()
            .map(|item| NewChallengeOptionRecord::from_vocab(challenge_id, item, false)),
    );
    options.shuffle(rng);

    if !kind.shows_images() {
        for option in &mut options {
            option.image_src = None;
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool() -> Vec<VocabItem> {
        [("one", "un"), ("two", "deux"), ("three", "trois"), ("four", "quatre")]
            .into_iter()
            .map(|(en, fr)| {
                VocabItem::new(en, fr)
                    .with_image(format!("/{en}.svg"))
                    .with_audio(format!("/fr_{en}.mp3"))
            })
            .collect()
    }

    #[test]
    fn one_correct_and_two_distinct_distractors() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(7);
        for answer in &pool {
            for _ in 0..50 {
                let options = build_options(
                    ChallengeId::new(1),
                    ChallengeKind::Select,
                    answer,
                    &pool,
                    &mut rng,
                )
                .unwrap();
                assert_eq!(options.len(), 3);

                let correct: Vec<_> = options.iter().filter(|o| o.correct).collect();
                assert_eq!(correct.len(), 1);
                assert_eq!(correct[0].text, answer.target());

                let texts: HashSet<&str> = options.iter().map(|o| o.text.as_str()).collect();
                assert_eq!(texts.len(), 3);
                assert!(options
                    .iter()
                    .all(|o| pool.iter().any(|item| item.target() == o.text)));
            }
        }
    }

    #[test]
    fn select_options_keep_media_of_their_entry() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let options = build_options(
            ChallengeId::new(1),
            ChallengeKind::Select,
            &pool[1],
            &pool,
            &mut rng,
        )
        .unwrap();
        for option in &options {
            let item = pool.iter().find(|i| i.target() == option.text).unwrap();
            assert_eq!(option.image_src.as_deref(), item.image_src());
            assert_eq!(option.audio_src.as_deref(), item.audio_src());
        }
    }

    #[test]
    fn assist_options_drop_images_but_keep_audio() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(2);
        let options = build_options(
            ChallengeId::new(4),
            ChallengeKind::Assist,
            &pool[0],
            &pool,
            &mut rng,
        )
        .unwrap();
        assert!(options.iter().all(|o| o.image_src.is_none()));
        assert!(options.iter().all(|o| o.audio_src.is_some()));
        assert!(options.iter().all(|o| o.challenge_id == ChallengeId::new(4)));
    }

    #[test]
    fn correct_option_position_varies() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(42);
        let mut positions = HashSet::new();
        for _ in 0..200 {
            let options = build_options(
                ChallengeId::new(1),
                ChallengeKind::Select,
                &pool[0],
                &pool,
                &mut rng,
            )
            .unwrap();
            positions.insert(options.iter().position(|o| o.correct).unwrap());
        }
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn same_seed_gives_same_options() {
        let pool = pool();
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            build_options(
                ChallengeId::new(1),
                ChallengeKind::Select,
                &pool[2],
                &pool,
                &mut rng,
            )
            .unwrap()
        };
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn too_small_pool_is_a_catalog_error() {
        let pool = vec![VocabItem::new("yes", "oui"), VocabItem::new("no", "non")];
        let mut rng = StdRng::seed_from_u64(0);
        let err = build_options(
            ChallengeId::new(1),
            ChallengeKind::Select,
            &pool[0],
            &pool,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotEnoughDistractors {
                target: "oui".into(),
                available: 1
            }
        );
    }
}
