use super::state::PlaybackSnapshot;

pub type Observer = Box<dyn Fn(&PlaybackSnapshot) + Send + Sync>;

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observers of the controller's snapshot, notified only when the snapshot changes.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    last: Option<PlaybackSnapshot>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Delivers `snapshot` to every observer unless it equals the last delivered one.
    pub fn notify(&mut self, snapshot: PlaybackSnapshot) {
        if self.last == Some(snapshot) {
            return;
        }
        self.last = Some(snapshot);
        for (_, observer) in &self.observers {
            observer(&snapshot);
        }
    }

    /// Delivers `snapshot` to a single observer, regardless of change tracking.
    pub fn deliver_to(&self, id: SubscriptionId, snapshot: &PlaybackSnapshot) {
        if let Some((_, observer)) = self.observers.iter().find(|(existing, _)| *existing == id) {
            observer(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::PlaybackState;
    use std::sync::{Arc, Mutex};

    fn snapshot(progress: f64, state: PlaybackState) -> PlaybackSnapshot {
        PlaybackSnapshot { progress, state }
    }

    fn recording_observer() -> (Observer, Arc<Mutex<Vec<PlaybackSnapshot>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer: Observer = Box::new(move |s| sink.lock().unwrap().push(*s));
        (observer, seen)
    }

    #[test]
    fn notify_skips_unchanged_snapshots() {
        let mut registry = ObserverRegistry::new();
        let (observer, seen) = recording_observer();
        registry.subscribe(observer);

        registry.notify(snapshot(0.0, PlaybackState::Idle));
        registry.notify(snapshot(0.0, PlaybackState::Idle));
        registry.notify(snapshot(0.0, PlaybackState::Playing));
        registry.notify(snapshot(0.125, PlaybackState::Playing));

        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn unsubscribed_observers_are_not_called() {
        let mut registry = ObserverRegistry::new();
        let (observer, seen) = recording_observer();
        let id = registry.subscribe(observer);
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.notify(snapshot(10.0, PlaybackState::PausedManual));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn deliver_to_reaches_only_the_named_observer() {
        let mut registry = ObserverRegistry::new();
        let (first, first_seen) = recording_observer();
        let (second, second_seen) = recording_observer();
        let first_id = registry.subscribe(first);
        registry.subscribe(second);

        registry.deliver_to(first_id, &snapshot(0.0, PlaybackState::Idle));
        assert_eq!(first_seen.lock().unwrap().len(), 1);
        assert!(second_seen.lock().unwrap().is_empty());
        assert_eq!(registry.len(), 2);
    }
}
