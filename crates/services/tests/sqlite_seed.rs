use course_core::french_course;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::CourseSeeder;
use storage::sqlite::SqliteRepository;
use storage::repository::ContentStore;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_reseed_is_repeatable() {
    let repo = connect("memdb_seed_twice").await;
    let seeder = CourseSeeder::new(std::sync::Arc::new(repo.clone()));
    let mut rng = StdRng::seed_from_u64(21);

    seeder.seed(&french_course(), &mut rng).await.unwrap();
    let counts_after_first = repo.table_counts().await.unwrap();
    assert_eq!(counts_after_first.units, 3);
    assert_eq!(counts_after_first.lessons, 15);
    assert_eq!(counts_after_first.challenges, 90);
    assert_eq!(counts_after_first.challenge_options, 270);

    seeder.seed(&french_course(), &mut rng).await.unwrap();
    assert_eq!(repo.table_counts().await.unwrap(), counts_after_first);
}

#[tokio::test]
async fn sqlite_assist_options_have_null_images() {
    let repo = connect("memdb_seed_assist").await;
    let seeder = CourseSeeder::new(std::sync::Arc::new(repo.clone()));
    let mut rng = StdRng::seed_from_u64(22);
    seeder.seed(&french_course(), &mut rng).await.unwrap();

    let with_image: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*) FROM challenge_options o
        JOIN challenges c ON c.id = o.challenge_id
        WHERE c.type = 'ASSIST' AND o.image_src IS NOT NULL
        ",
    )
    .fetch_one(repo.pool())
    .await
    .unwrap();
    assert_eq!(with_image, 0);

    let bad_challenges: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*) FROM (
            SELECT challenge_id FROM challenge_options
            GROUP BY challenge_id
            HAVING COUNT(*) != 3 OR SUM(correct) != 1 OR COUNT(DISTINCT text) != 3
        )
        ",
    )
    .fetch_one(repo.pool())
    .await
    .unwrap();
    assert_eq!(bad_challenges, 0);
}
