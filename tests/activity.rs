mod common;

use std::{sync::Arc, time::Duration};

use indexmap::IndexMap;
use progress_sync::{
    dao::models::LeaderboardEntry,
    services::{activity_service::ActivityNotifier, leaderboard_service::LeaderboardService},
    session::StaticSession,
};
use serde_json::{Map, Value, json};

use common::{Call, FakeStore, Failure, player};

fn details() -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("upgrade".into(), json!("oven"));
    details
}

#[tokio::test]
async fn signed_out_activity_is_not_recorded() {
    let remote = FakeStore::new();
    let notifier = ActivityNotifier::new(Arc::new(StaticSession::anonymous()), Arc::new(remote.clone()));

    notifier.record("purchase_upgrade", details()).await;

    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn signed_in_activity_is_recorded_with_identity() {
    let remote = FakeStore::new();
    let notifier = ActivityNotifier::new(
        Arc::new(StaticSession::signed_in(player())),
        Arc::new(remote.clone()),
    );

    notifier.record("purchase_upgrade", details()).await;

    match remote.calls().as_slice() {
        [Call::Activity(entry)] => {
            assert_eq!(entry.user_id, player());
            assert_eq!(entry.action, "purchase_upgrade");
            assert_eq!(entry.details["upgrade"], json!("oven"));
        }
        other => panic!("expected one activity write, got {other:?}"),
    }
}

#[tokio::test]
async fn activity_failures_are_absorbed() {
    let remote = FakeStore::new();
    remote.fail_activity(Failure::Transport);
    let notifier = ActivityNotifier::new(
        Arc::new(StaticSession::signed_in(player())),
        Arc::new(remote.clone()),
    );

    notifier.record("prestige", Map::new()).await;

    assert_eq!(remote.calls().len(), 1);
}

#[tokio::test]
async fn notify_records_in_the_background() {
    let remote = FakeStore::new();
    let notifier = ActivityNotifier::new(
        Arc::new(StaticSession::signed_in(player())),
        Arc::new(remote.clone()),
    );

    notifier.notify("prestige", Map::new());

    tokio::time::timeout(Duration::from_secs(1), async {
        while remote.calls().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("background activity write");
}

fn entry(total_bread: f64) -> LeaderboardEntry {
    LeaderboardEntry {
        username: Some(format!("baker-{total_bread}")),
        total_bread,
        prestige_level: 0,
        player_level: None,
        extra: IndexMap::new(),
    }
}

#[tokio::test]
async fn leaderboard_uses_default_limit_and_clamps_requests() {
    let remote = FakeStore::new();
    remote.set_leaderboard(vec![entry(3.0), entry(2.0), entry(1.0)]);
    let service = LeaderboardService::new(Arc::new(remote.clone()), 2);

    assert_eq!(service.top(None).await.len(), 2);
    assert_eq!(service.top(Some(0)).await.len(), 1);
    service.top(Some(10_000)).await;

    assert_eq!(
        remote.calls(),
        vec![Call::Leaderboard(2), Call::Leaderboard(1), Call::Leaderboard(100)]
    );
}

#[tokio::test]
async fn leaderboard_is_empty_when_remote_fails() {
    let remote = FakeStore::new();
    remote.set_leaderboard(vec![entry(3.0)]);
    remote.fail_fetch(Failure::Transport);
    let service = LeaderboardService::new(Arc::new(remote), 10);

    assert!(service.top(None).await.is_empty());
}
