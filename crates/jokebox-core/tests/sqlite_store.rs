//! Integration tests for the SQLite store.

use std::collections::HashSet;

use jokebox_core::{JokeId, JokeStore, NewJoke, SqliteStore};

fn new_joke(question: &str, answer: &str) -> NewJoke {
    NewJoke::new(question, answer).unwrap()
}

#[tokio::test]
async fn test_create_and_lookup() {
    let store = SqliteStore::open_in_memory().unwrap();

    let created = store.create(new_joke("Why?", "Because.")).await.unwrap();
    assert_eq!(created.id, JokeId(1));
    assert_eq!(created.question, "Why?");
    assert_eq!(created.answer, "Because.");

    let fetched = store.find_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
    assert_eq!(store.find_by_id(JokeId(2)).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_all_in_insertion_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.find_all().await.unwrap().is_empty());

    for i in 0..4 {
        store
            .create(new_joke(&format!("q{}", i), &format!("a{}", i)))
            .await
            .unwrap();
    }

    let ids: Vec<_> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.id.0)
        .collect();
    assert_eq!(ids, [1, 2, 3, 4]);
}

#[tokio::test]
async fn test_find_random() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.find_random().await.unwrap(), None);

    for i in 0..4 {
        store
            .create(new_joke(&format!("q{}", i), &format!("a{}", i)))
            .await
            .unwrap();
    }

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let joke = store.find_random().await.unwrap().unwrap();
        assert!((1..=4).contains(&joke.id.0));
        seen.insert(joke.id);
    }
    assert!(seen.len() > 1);
}

#[tokio::test]
async fn test_persistence_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jokes.db");

    let created = {
        let store = SqliteStore::open(&path).unwrap();
        store.create(new_joke("Why?", "Because.")).await.unwrap()
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created));

    let next = store.create(new_joke("And?", "Then.")).await.unwrap();
    assert_eq!(next.id, JokeId(2));
}

#[tokio::test]
async fn test_ping() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.ping().await.unwrap();
    assert_eq!(store.backend(), "sqlite");
}
