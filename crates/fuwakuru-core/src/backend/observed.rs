//! Change feed over any store.
//!
//! Every successful write or delete is published to all subscribers. A
//! subscriber that has been dropped is pruned on the next publish. There is
//! no cross-process push: only writes through this wrapper are seen.

use std::sync::mpsc::{channel, Receiver, Sender};

use super::KeyValueStore;
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Set,
    Deleted,
}

/// One published change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    pub kind: ChangeKind,
}

/// Wraps a store and publishes its mutations.
#[derive(Debug)]
pub struct ObservedStore<S> {
    inner: S,
    subscribers: Vec<Sender<StoreChange>>,
}

impl<S: KeyValueStore> ObservedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            subscribers: Vec::new(),
        }
    }

    /// Receive every change made from now on.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn publish(&mut self, key: &str, kind: ChangeKind) {
        let change = StoreChange {
            key: key.to_string(),
            kind,
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl<S: KeyValueStore> KeyValueStore for ObservedStore<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)?;
        self.publish(key, ChangeKind::Set);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key)?;
        self.publish(key, ChangeKind::Deleted);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DisabledStore, MemoryStore};

    #[test]
    fn subscribers_see_writes_and_deletes() {
        let mut store = ObservedStore::new(MemoryStore::new());
        let rx = store.subscribe();
        store.set("a", "1").unwrap();
        store.delete("a").unwrap();

        let changes: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                StoreChange { key: "a".into(), kind: ChangeKind::Set },
                StoreChange { key: "a".into(), kind: ChangeKind::Deleted },
            ]
        );
    }

    #[test]
    fn failed_writes_are_not_published() {
        let mut store = ObservedStore::new(DisabledStore);
        let rx = store.subscribe();
        assert!(store.set("a", "1").is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_pruned() {
        let mut store = ObservedStore::new(MemoryStore::new());
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);
        store.set("a", "1").unwrap();
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }
}
