use spider::runtime::storage::{MessageStore, VisitedSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_claim_once_per_path() {
    let visited = VisitedSet::new();
    assert!(visited.is_empty());

    assert!(visited.claim("/"));
    assert!(!visited.claim("/"));
    assert!(visited.claim("/a"));
    // no normalization: these are different identifiers
    assert!(visited.claim("/a/"));
    assert!(visited.claim("a"));

    assert_eq!(visited.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_claims_win_exactly_once() {
    let visited = Arc::new(VisitedSet::new());
    let wins = Arc::new(AtomicUsize::new(0));
    let paths: Vec<String> = (0..200).map(|i| format!("/node/{}", i)).collect();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let visited = visited.clone();
        let wins = wins.clone();
        let paths = paths.clone();
        handles.push(tokio::spawn(async move {
            for path in &paths {
                if visited.claim(path) {
                    wins.fetch_add(1, Ordering::SeqCst);
                }
                tokio::task::yield_now().await;
            }
        }));
    }
    for h in handles {
        h.await.expect("claimer panicked");
    }

    assert_eq!(wins.load(Ordering::SeqCst), paths.len());
    assert_eq!(visited.len(), paths.len());
}

#[test]
fn test_drain_sorted_keeps_duplicates() {
    let store = MessageStore::new();
    store.append("pear");
    store.append("apple");
    store.append("Zebra");
    store.append("apple");

    assert_eq!(store.len(), 4);
    assert_eq!(store.drain_sorted(), vec!["Zebra", "apple", "apple", "pear"]);
    assert!(store.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_are_all_kept() {
    let store = Arc::new(MessageStore::new());

    let mut handles = Vec::new();
    for worker in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                store.append(format!("{:02}-{:02}", i, worker));
            }
        }));
    }
    for h in handles {
        h.await.expect("appender panicked");
    }

    let messages = store.drain_sorted();
    assert_eq!(messages.len(), 16 * 50);
    assert!(messages.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(messages.first().map(String::as_str), Some("00-00"));
    assert_eq!(messages.last().map(String::as_str), Some("49-15"));
}
