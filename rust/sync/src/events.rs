use ledger_engine::state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

pub type GameId = String;

// Slow subscribers are dropped once their buffer fills
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<SlotEvent>;
pub type EventReceiver = mpsc::Receiver<SlotEvent>;

/// Change notification: the slot of `game_id` now holds `state` at `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEvent {
    pub game_id: GameId,
    pub version: u64,
    pub state: Box<GameState>,
}

pub struct EventSubscription {
    bus: EventBus,
    game_id: GameId,
    subscriber_id: usize,
    receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.game_id, self.subscriber_id);
    }
}

/// Fans slot changes out to every subscriber of the game.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<GameId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, game_id: impl Into<GameId>) -> EventSubscription {
        let game_id = game_id.into();
        let (subscriber_id, receiver) = self.subscribe_raw(game_id.clone());
        EventSubscription {
            bus: self.clone(),
            game_id,
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, game_id: GameId) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        self.write()
            .entry(game_id.clone())
            .or_default()
            .push((id, tx));

        tracing::info!(
            game_id = %game_id,
            subscriber_id = id,
            "session subscribed to slot changes"
        );

        (id, rx)
    }

    pub fn broadcast(&self, event: SlotEvent) {
        let game_id = event.game_id.clone();
        let subscribers = self.read().get(&game_id).cloned();

        let Some(list) = subscribers else {
            tracing::debug!(game_id = %game_id, "no subscribers for game");
            return;
        };

        tracing::debug!(
            game_id = %game_id,
            version = event.version,
            subscriber_count = list.len(),
            "notifying subscribers"
        );

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(event.clone()) {
                tracing::warn!(
                    game_id = %game_id,
                    subscriber_id = id,
                    error = ?e,
                    "failed to notify subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&game_id, &failed);
        }
    }

    pub fn unsubscribe(&self, game_id: &str, subscriber_id: usize) {
        self.remove_subscribers(game_id, &[subscriber_id]);
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, game_id: &str, ids: &[usize]) {
        let mut guard = self.write();
        if let Some(list) = guard.get_mut(game_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(game_id);
            }
        }
    }

    // The map holds only channel handles, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<GameId, Vec<(usize, EventSender)>>> {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<GameId, Vec<(usize, EventSender)>>> {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
