//! PostgreSQL link repository tests.
//!
//! Need a live database: `DATABASE_URL=... cargo test -- --ignored`.

use shortlink::domain::entities::{NewLink, User};
use shortlink::domain::repositories::{LinkRepository, UserRepository};
use shortlink::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str, owner: Option<&str>) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        original_url: url.to_string(),
        owner_id: owner.map(str::to_string),
    }
}

async fn create_owner(pool: &PgPool, id: &str) {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(User::new(id.to_string(), id.to_string(), "hash".to_string()))
        .await
        .unwrap();
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find(pool: PgPool) {
    create_owner(&pool, "u1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert_if_absent(new_link("f0e6a6a9", "http://example.com", Some("u1")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(link.id, "f0e6a6a9");
    assert_eq!(link.short_code, "f0e6a6a9");
    assert_eq!(link.owner_id.as_deref(), Some("u1"));

    let by_code = repo.find_by_code("f0e6a6a9").await.unwrap().unwrap();
    assert_eq!(by_code.original_url, "http://example.com");

    let by_url = repo
        .find_by_original_url("http://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.id, "f0e6a6a9");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_if_absent_skips_existing_code_and_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_link("aaaaaaaa", "http://a.example", None))
        .await
        .unwrap()
        .unwrap();

    let same_code = repo
        .insert_if_absent(new_link("aaaaaaaa", "http://b.example", None))
        .await
        .unwrap();
    assert!(same_code.is_none());

    let same_url = repo
        .insert_if_absent(new_link("bbbbbbbb", "http://a.example", None))
        .await
        .unwrap();
    assert!(same_url.is_none());

    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("00000000").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    create_owner(&pool, "alice").await;
    create_owner(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_link("00000001", "http://1.example", Some("alice")))
        .await
        .unwrap();
    repo.insert_if_absent(new_link("00000002", "http://2.example", Some("bob")))
        .await
        .unwrap();
    repo.insert_if_absent(new_link("00000003", "http://3.example", Some("alice")))
        .await
        .unwrap();

    let links = repo.list_by_owner("alice").await.unwrap();
    let codes: Vec<&str> = links.iter().map(|l| l.short_code.as_str()).collect();

    assert_eq!(codes, vec!["00000003", "00000001"]);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_unknown_owner_violates_foreign_key(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo
        .insert_if_absent(new_link("cccccccc", "http://c.example", Some("ghost")))
        .await;

    assert!(result.is_err());
}
