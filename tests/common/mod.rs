use sqlx::PgPool;

use reelbase::modules::users::model::User;

/// Connects to the test database and applies migrations.
///
/// Tests using this helper are marked `#[ignore]` and run with
/// `cargo test -- --ignored` against a disposable database pointed to by
/// `TEST_DATABASE_URL`.
pub async fn setup_test_db() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");

    let pool = PgPool::connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// A unique email so tests don't trip the users_email_key constraint on
/// each other.
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_user(email: &str) -> User {
    let mut user = User {
        name: "Test User".to_string(),
        email: email.to_string(),
        activated: false,
        ..User::anonymous()
    };
    user.password.set("pa55word!").unwrap();
    user
}
