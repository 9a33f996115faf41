//! Session store implementation
//!
//! This module keeps all live wizard sessions in process memory, keyed by
//! chat id. Each chat owns a slot whose lock serializes every transition
//! for that chat, including dispatch, while leaving other chats free to
//! proceed. A background sweeper evicts sessions that idled past expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::session::Session;

/// Per-chat session cell. Holding the lock grants exclusive ownership of
/// the chat's wizard state for the whole transition, dispatch included.
pub type SessionSlot = Arc<Mutex<Option<Session>>>;

/// In-memory store of wizard sessions, keyed by chat id
#[derive(Clone, Default)]
pub struct SessionStore {
    slots: Arc<Mutex<HashMap<i64, SessionSlot>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the slot for a chat, creating an empty one if none exists.
    ///
    /// The map lock is released before the returned slot is locked, so
    /// callers never hold both at once.
    pub async fn slot(&self, chat_id: i64) -> SessionSlot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(chat_id).or_default())
    }

    /// Get the slot for a chat only if one already exists
    pub async fn peek(&self, chat_id: i64) -> Option<SessionSlot> {
        let slots = self.slots.lock().await;
        slots.get(&chat_id).map(Arc::clone)
    }

    /// Drop a chat's slot from the map.
    ///
    /// Stale slot handles held elsewhere keep resolving against their own
    /// cell, which the caller has already emptied.
    pub async fn discard(&self, chat_id: i64) {
        let mut slots = self.slots.lock().await;
        if slots.remove(&chat_id).is_some() {
            debug!(chat_id = chat_id, "Session slot discarded");
        }
    }

    /// Number of chats with a live session
    pub async fn active_count(&self) -> usize {
        let slots = self.slots.lock().await;
        let mut count = 0;
        for slot in slots.values() {
            if let Ok(cell) = slot.try_lock() {
                if cell.is_some() {
                    count += 1;
                }
            } else {
                // A locked slot is mid-transition, so its session is live.
                count += 1;
            }
        }
        count
    }

    /// Evict sessions that expired before `now` and prune empty slots.
    ///
    /// Slots locked by an in-flight transition are left alone; the next
    /// sweep or the lazy expiry check in the engine picks them up.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut slots = self.slots.lock().await;
        let mut removed = 0;

        slots.retain(|chat_id, slot| match slot.try_lock() {
            Ok(mut cell) => match cell.as_ref() {
                Some(session) if session.expires_at <= now => {
                    cell.take();
                    removed += 1;
                    debug!(chat_id = chat_id, "Swept expired session");
                    false
                }
                Some(_) => true,
                None => false,
            },
            Err(_) => true,
        });

        removed
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

/// Periodic background sweeper evicting expired sessions from a store
#[derive(Debug)]
pub struct SessionSweeper {
    store: SessionStore,
    sweep_interval: Duration,
    sweep_handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionSweeper {
    /// Create a sweeper over the given store
    pub fn new(store: SessionStore, sweep_interval: Duration) -> Self {
        Self {
            store,
            sweep_interval,
            sweep_handle: None,
        }
    }

    /// Start the periodic sweep task
    pub fn start(&mut self) {
        if self.sweep_handle.is_some() {
            warn!("Sweep task is already running");
            return;
        }

        let store = self.store.clone();
        let interval = self.sweep_interval;

        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);

            loop {
                tick.tick().await;

                let removed = store.sweep_expired(Utc::now()).await;
                if removed > 0 {
                    let live = store.active_count().await;
                    info!(removed = removed, live = live, "Sweep task evicted expired sessions");
                }
            }
        });

        self.sweep_handle = Some(handle);
        info!("Started session sweep task with interval {:?}", self.sweep_interval);
    }

    /// Stop the periodic sweep task
    pub fn stop(&mut self) {
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
            info!("Stopped session sweep task");
        }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::TerminalVariant;
    use chrono::Duration as ChronoDuration;

    async fn put_session(store: &SessionStore, chat_id: i64) -> SessionSlot {
        let slot = store.slot(chat_id).await;
        let mut cell = slot.lock().await;
        *cell = Some(Session::new(
            chat_id,
            TerminalVariant::SingleWithAttachment,
            ChronoDuration::minutes(30),
        ));
        drop(cell);
        slot
    }

    #[tokio::test]
    async fn test_slot_create_peek_discard() {
        let store = SessionStore::new();
        assert!(store.peek(1).await.is_none());

        put_session(&store, 1).await;
        assert!(store.peek(1).await.is_some());
        assert_eq!(store.active_count().await, 1);

        store.discard(1).await;
        assert!(store.peek(1).await.is_none());
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_slots_are_isolated_per_chat() {
        let store = SessionStore::new();
        put_session(&store, 1).await;
        put_session(&store, 2).await;

        let slot = store.peek(1).await.unwrap();
        let mut cell = slot.lock().await;
        cell.as_mut().unwrap().from_name = Some("Ada".to_string());
        drop(cell);

        let other = store.peek(2).await.unwrap();
        let cell = other.lock().await;
        assert!(cell.as_ref().unwrap().from_name.is_none());
    }

    #[tokio::test]
    async fn test_sweep_evicts_only_expired_sessions() {
        let store = SessionStore::new();
        let expired = put_session(&store, 1).await;
        put_session(&store, 2).await;

        {
            let mut cell = expired.lock().await;
            cell.as_mut().unwrap().expires_at = Utc::now() - ChronoDuration::hours(1);
        }

        let removed = store.sweep_expired(Utc::now()).await;
        assert_eq!(removed, 1);
        assert!(store.peek(1).await.is_none());
        assert!(store.peek(2).await.is_some());
    }

    #[tokio::test]
    async fn test_sweep_skips_locked_slots() {
        let store = SessionStore::new();
        let slot = put_session(&store, 1).await;

        let mut cell = slot.lock().await;
        cell.as_mut().unwrap().expires_at = Utc::now() - ChronoDuration::hours(1);

        // Slot is mid-transition; the sweeper must leave it alone.
        assert_eq!(store.sweep_expired(Utc::now()).await, 0);
        assert!(store.peek(1).await.is_some());
        drop(cell);

        assert_eq!(store.sweep_expired(Utc::now()).await, 1);
        assert!(store.peek(1).await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_prunes_orphaned_empty_slots() {
        let store = SessionStore::new();
        let slot = store.slot(7).await;
        assert!(slot.lock().await.is_none());

        assert_eq!(store.sweep_expired(Utc::now()).await, 0);
        assert!(store.peek(7).await.is_none());
    }
}
