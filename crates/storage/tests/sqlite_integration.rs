use course_core::model::{ChallengeKind, CourseId};
use storage::repository::{
    ContentStore, ContentTable, NewChallengeOptionRecord, NewChallengeRecord, NewCourseRecord,
    NewLessonRecord, NewUnitRecord, StorageError, TableCounts,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn course() -> NewCourseRecord {
    NewCourseRecord {
        title: "French".into(),
        image_src: "/fr.svg".into(),
        description: "Comprehensive French beginner course".into(),
    }
}

#[tokio::test]
async fn sqlite_commits_full_hierarchy() {
    let repo = connect("memdb_hierarchy").await;

    let mut tx = repo.begin().await.unwrap();
    let course_id = tx.insert_course(&course()).await.unwrap();
    let unit_ids = tx
        .insert_units(&[NewUnitRecord {
            course_id,
            title: "Fundamentals".into(),
            description: "Greetings, numbers, colors and basic verbs".into(),
            order: 1,
        }])
        .await
        .unwrap();
    let lesson_ids = tx
        .insert_lessons(&[NewLessonRecord {
            unit_id: unit_ids[0],
            title: "Numbers 1-4".into(),
            order: 1,
        }])
        .await
        .unwrap();
    let challenge_ids = tx
        .insert_challenges(&[
            NewChallengeRecord {
                lesson_id: lesson_ids[0],
                kind: ChallengeKind::Select,
                question: "Which one of these is \"one\"?".into(),
                order: 1,
            },
            NewChallengeRecord {
                lesson_id: lesson_ids[0],
                kind: ChallengeKind::Assist,
                question: "\"un\" (listen and pick)".into(),
                order: 2,
            },
        ])
        .await
        .unwrap();
    assert_eq!(challenge_ids.len(), 2);
    assert_ne!(challenge_ids[0], challenge_ids[1]);

    tx.insert_options(&[NewChallengeOptionRecord {
        challenge_id: challenge_ids[1],
        text: "un".into(),
        correct: true,
        image_src: None,
        audio_src: Some("/fr_one.mp3".into()),
    }])
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let counts = repo.table_counts().await.unwrap();
    assert_eq!(counts.courses, 1);
    assert_eq!(counts.units, 1);
    assert_eq!(counts.lessons, 1);
    assert_eq!(counts.challenges, 2);
    assert_eq!(counts.challenge_options, 1);

    let row: (String, Option<String>, bool) = sqlx::query_as(
        "SELECT text, image_src, correct FROM challenge_options WHERE challenge_id = ?1",
    )
    .bind(i64::try_from(challenge_ids[1].value()).unwrap())
    .fetch_one(repo.pool())
    .await
    .unwrap();
    assert_eq!(row, ("un".to_string(), None, true));

    let kind: String = sqlx::query_scalar("SELECT type FROM challenges WHERE id = ?1")
        .bind(i64::try_from(challenge_ids[0].value()).unwrap())
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(kind.parse::<ChallengeKind>().unwrap(), ChallengeKind::Select);
}

#[tokio::test]
async fn sqlite_rollback_discards_writes() {
    let repo = connect("memdb_rollback").await;

    let mut tx = repo.begin().await.unwrap();
    tx.insert_course(&course()).await.unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(repo.table_counts().await.unwrap(), TableCounts::default());
}

#[tokio::test]
async fn sqlite_reports_constraint_violations_as_conflicts() {
    let repo = connect("memdb_conflicts").await;

    let mut tx = repo.begin().await.unwrap();
    let orphan = tx
        .insert_units(&[NewUnitRecord {
            course_id: CourseId::new(404),
            title: "Orphan".into(),
            description: String::new(),
            order: 1,
        }])
        .await;
    assert!(matches!(orphan, Err(StorageError::Conflict(_))));

    let course_id = tx.insert_course(&course()).await.unwrap();
    let unit = NewUnitRecord {
        course_id,
        title: "Fundamentals".into(),
        description: String::new(),
        order: 1,
    };
    tx.insert_units(std::slice::from_ref(&unit)).await.unwrap();
    let duplicate = tx.insert_units(&[unit]).await;
    assert!(matches!(duplicate, Err(StorageError::Conflict(_))));
}

#[tokio::test]
async fn sqlite_reset_order_clears_learner_rows() {
    let repo = connect("memdb_reset_order").await;

    let mut tx = repo.begin().await.unwrap();
    let course_id = tx.insert_course(&course()).await.unwrap();
    let unit_ids = tx
        .insert_units(&[NewUnitRecord {
            course_id,
            title: "Fundamentals".into(),
            description: String::new(),
            order: 1,
        }])
        .await
        .unwrap();
    let lesson_ids = tx
        .insert_lessons(&[NewLessonRecord {
            unit_id: unit_ids[0],
            title: "Greetings".into(),
            order: 1,
        }])
        .await
        .unwrap();
    let challenge_ids = tx
        .insert_challenges(&[NewChallengeRecord {
            lesson_id: lesson_ids[0],
            kind: ChallengeKind::Select,
            question: "Which one of these is \"the man\"?".into(),
            order: 1,
        }])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let course_key = i64::try_from(course_id.value()).unwrap();
    let challenge_key = i64::try_from(challenge_ids[0].value()).unwrap();
    sqlx::query("INSERT INTO user_progress (user_id, active_course_id) VALUES ('user_1', ?1)")
        .bind(course_key)
        .execute(repo.pool())
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO challenge_progress (user_id, challenge_id, completed) VALUES ('user_1', ?1, 1)",
    )
    .bind(challenge_key)
    .execute(repo.pool())
    .await
    .unwrap();
    sqlx::query("INSERT INTO user_subscription (user_id) VALUES ('user_1')")
        .execute(repo.pool())
        .await
        .unwrap();

    // Parents cannot go first while learner rows still point at them.
    let mut tx = repo.begin().await.unwrap();
    let err = tx.clear_table(ContentTable::Courses).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
    tx.rollback().await.unwrap();

    let mut tx = repo.begin().await.unwrap();
    for table in ContentTable::RESET_ORDER {
        tx.clear_table(table).await.unwrap();
    }
    tx.commit().await.unwrap();

    assert_eq!(repo.table_counts().await.unwrap(), TableCounts::default());
}
