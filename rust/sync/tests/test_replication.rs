use ledger_engine::betting::PlayerAction;
use ledger_engine::rules::TableRules;
use ledger_engine::state::GamePhase;
use ledger_sync::logging::TestLogSubscriber;
use ledger_sync::{ConflictPolicy, MemoryStore, Replica, SnapshotStore, SyncError};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn rules() -> TableRules {
    TableRules::default()
}

fn ann_creates(store: &Arc<MemoryStore>, game_id: &str) -> Replica<MemoryStore> {
    Replica::create_with_ids(Arc::clone(store), rules(), game_id, "p_ann", "Ann").unwrap()
}

fn bo_joins(store: &Arc<MemoryStore>, game_id: &str) -> Replica<MemoryStore> {
    Replica::join_with_id(Arc::clone(store), rules(), game_id, "p_bo", "Bo").unwrap()
}

/// Host and guest both at version 2, then a third player joins behind the
/// host's back (version 3).
fn table_with_stale_host(
    policy: ConflictPolicy,
) -> (Arc<MemoryStore>, Replica<MemoryStore>, Replica<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(policy));
    let mut host = ann_creates(&store, "RACE01");
    let guest = bo_joins(&store, "RACE01");
    assert!(host.refresh().unwrap());
    assert_eq!(host.version(), 2);

    Replica::join_with_id(Arc::clone(&store), rules(), "RACE01", "p_cy", "Cy").unwrap();
    (store, host, guest)
}

#[test]
fn last_writer_wins_drops_the_concurrent_join() {
    let subscriber = TestLogSubscriber::new();
    let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

    let (store, host) = tracing::subscriber::with_default(registry, || {
        let (store, mut host, _guest) = table_with_stale_host(ConflictPolicy::LastWriterWins);
        host.start_hand().unwrap();
        (store, host)
    });

    let slot = store.load("RACE01").unwrap().expect("slot");
    assert_eq!(slot.version, 4);
    assert_eq!(host.version(), 4);
    // Cy's seat was published at version 3 and is gone now
    assert_eq!(slot.state.seats.len(), 2);
    assert!(slot.state.seat_by_id("p_cy").is_none());

    let warnings = subscriber.entries_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "publishing over a newer snapshot");
    assert_eq!(warnings[0].field("base_version"), Some("2"));
    assert_eq!(warnings[0].field("overwritten_version"), Some("3"));
}

#[test]
fn reject_stale_keeps_the_join_and_the_local_copy() {
    let (store, mut host, _guest) = table_with_stale_host(ConflictPolicy::RejectStale);

    let err = host.start_hand().unwrap_err();
    assert!(matches!(
        err,
        SyncError::StaleSnapshot {
            expected: 2,
            actual: 3,
            ..
        }
    ));
    assert_eq!(host.state().game_phase, GamePhase::Waiting);
    assert_eq!(host.version(), 2);

    assert!(host.refresh().unwrap());
    host.start_hand().unwrap();
    let slot = store.load("RACE01").unwrap().expect("slot");
    assert_eq!(slot.version, 4);
    assert_eq!(slot.state.seats.len(), 3);
    assert_eq!(slot.state.game_phase, GamePhase::Betting);
}

#[test]
fn only_the_seat_to_act_may_act() {
    let store = Arc::new(MemoryStore::default());
    let mut host = ann_creates(&store, "TURN01");
    let mut guest = bo_joins(&store, "TURN01");
    guest.start_hand().unwrap();
    host.refresh().unwrap();

    // heads-up: seat 1 (Bo) posts the small blind and acts first
    assert!(!host.is_my_turn());
    let err = host.act(PlayerAction::Call).unwrap_err();
    assert!(matches!(err, SyncError::NotYourTurn { ref player_id } if player_id == "p_ann"));

    assert!(guest.is_my_turn());
    guest.act(PlayerAction::Fold).unwrap();
    assert_eq!(guest.state().game_phase, GamePhase::EndOfHand);

    host.refresh().unwrap();
    assert_eq!(host.state(), guest.state());
    assert_eq!(host.state().seats[0].stack, 1_010);
}

#[test]
fn illegal_raise_publishes_nothing() {
    let store = Arc::new(MemoryStore::default());
    let mut host = ann_creates(&store, "RAISE1");
    let mut guest = bo_joins(&store, "RAISE1");
    guest.start_hand().unwrap();
    let before = guest.version();

    let err = guest.act(PlayerAction::Raise(25)).unwrap_err();
    assert!(matches!(err, SyncError::Engine(_)));
    assert_eq!(guest.version(), before);
    assert_eq!(store.load("RAISE1").unwrap().map(|p| p.version), Some(before));
    host.refresh().unwrap();
    assert_eq!(host.state(), guest.state());
}

#[tokio::test]
async fn notifications_bring_other_sessions_up_to_date() {
    let store = Arc::new(MemoryStore::default());
    let mut host = ann_creates(&store, "LIVE01");
    let mut guest = bo_joins(&store, "LIVE01");
    let mut host_feed = host.subscribe();

    guest.start_hand().unwrap();

    let joined = tokio::time::timeout(Duration::from_secs(1), host_feed.receiver().recv())
        .await
        .expect("notification in time")
        .expect("open channel");
    assert_eq!(joined.version, 3);
    assert!(host.absorb(joined.clone()));
    assert_eq!(host.state(), guest.state());

    // replays and older versions are ignored
    assert!(!host.absorb(joined));
    assert_eq!(host.version(), 3);
}

#[tokio::test]
async fn events_for_other_games_are_ignored() {
    let store = Arc::new(MemoryStore::default());
    let mut first = ann_creates(&store, "GAMEA1");
    let other =
        Replica::create_with_ids(Arc::clone(&store), rules(), "GAMEB1", "p_bo", "Bo").unwrap();
    let mut feed = store.subscribe("GAMEB1");

    Replica::join_with_id(Arc::clone(&store), rules(), "GAMEB1", "p_cy", "Cy").unwrap();
    let event = feed.receiver().recv().await.expect("event");

    assert_eq!(event.game_id, other.game_id());
    assert!(!first.absorb(event));
    assert_eq!(first.state().seats.len(), 1);
}
