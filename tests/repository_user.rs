//! PostgreSQL user repository tests.
//!
//! Need a live database: `DATABASE_URL=... cargo test -- --ignored`.

use shortlink::AppError;
use shortlink::domain::entities::User;
use shortlink::domain::repositories::UserRepository;
use shortlink::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = User::new("id-1".into(), "alice".into(), "$argon2id$stub".into());

    repo.create(user.clone()).await.unwrap();

    let found = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found, user);
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_username_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(User::new("id-1".into(), "alice".into(), "h1".into()))
        .await
        .unwrap();

    let result = repo
        .create(User::new("id-2".into(), "alice".into(), "h2".into()))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
