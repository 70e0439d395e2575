//! Toast store with auto-dismiss timers and ordered subscriber delivery.

use std::collections::{HashMap, VecDeque};
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::domain::notification::{Notification, NotificationId, NotificationKind};

type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync>;
type ListenerId = u64;

#[derive(Default)]
struct StoreState {
    notifications: Vec<Notification>,
    timers: HashMap<NotificationId, JoinHandle<()>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_id: NotificationId,
    next_listener_id: ListenerId,
    // Snapshots awaiting delivery, in mutation order.
    pending: VecDeque<Vec<Notification>>,
    // Set while some caller is draining `pending`.
    flushing: bool,
}

impl StoreState {
    fn listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    fn enqueue_snapshot(&mut self) {
        let snapshot = self.notifications.clone();
        self.pending.push_back(snapshot);
    }
}

struct StoreInner {
    state: Mutex<StoreState>,
}

impl StoreInner {
    fn remove(&self, id: NotificationId) -> bool {
        {
            let mut state = self.state.lock();
            let Some(index) = state.notifications.iter().position(|n| n.id == id) else {
                return false;
            };
            state.notifications.remove(index);
            if let Some(timer) = state.timers.remove(&id) {
                timer.abort();
            }
            state.enqueue_snapshot();
        }

        debug!(id, "Notification removed");
        self.flush();
        true
    }

    fn clear(&self) {
        {
            let mut state = self.state.lock();
            state.notifications.clear();
            for (_, timer) in state.timers.drain() {
                timer.abort();
            }
            state.enqueue_snapshot();
        }

        debug!("Notifications cleared");
        self.flush();
    }

    /// Delivers queued snapshots until none are left.
    ///
    /// Only the outermost caller drains. A mutation made by a listener, or
    /// by another thread while a drain is running, is queued behind the
    /// current snapshot, so every listener sees mutations in order and ends
    /// on the latest list.
    fn flush(&self) {
        {
            let mut state = self.state.lock();
            if state.flushing {
                return;
            }
            state.flushing = true;
        }

        loop {
            let (snapshot, listeners) = {
                let mut state = self.state.lock();
                let Some(snapshot) = state.pending.pop_front() else {
                    state.flushing = false;
                    return;
                };
                (snapshot, state.listeners())
            };
            deliver(&snapshot, &listeners);
        }
    }

    fn unsubscribe(&self, listener_id: ListenerId) {
        self.state
            .lock()
            .listeners
            .retain(|(id, _)| *id != listener_id);
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        for (_, timer) in self.state.get_mut().timers.drain() {
            timer.abort();
        }
    }
}

fn deliver(snapshot: &[Notification], listeners: &[Listener]) {
    for (index, listener) in listeners.iter().enumerate() {
        if panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))).is_err() {
            warn!(listener = index, "Notification listener panicked");
        }
    }
}

/// Process-wide list of active toasts.
///
/// Cloning yields another handle to the same store. Every mutation
/// (add, remove, clear) is delivered to all subscribers, in subscription
/// order, with a snapshot of the full list. Delivery is synchronous unless
/// one is already running, in which case the mutation is queued and the
/// running delivery hands it out next. A toast with a non-zero duration is
/// removed by a timer task on the ambient tokio runtime.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<StoreInner>,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore {
    /// Creates an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(StoreState {
                    next_id: 1,
                    ..StoreState::default()
                }),
            }),
        }
    }

    /// Appends a toast and schedules its removal when `duration` is non-zero.
    pub fn add(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> NotificationHandle {
        let notification = {
            let mut state = self.inner.state.lock();
            let id = state.next_id;
            state.next_id += 1;

            let notification = Notification::new(id, kind, message, duration);
            state.notifications.push(notification.clone());

            if !duration.is_zero()
                && let Some(timer) = self.schedule_removal(id, duration)
            {
                state.timers.insert(id, timer);
            }

            state.enqueue_snapshot();
            notification
        };

        debug!(
            id = notification.id,
            kind = %notification.kind,
            duration_ms = duration.as_millis(),
            "Notification added"
        );
        self.inner.flush();

        NotificationHandle {
            notification,
            store: Arc::downgrade(&self.inner),
        }
    }

    fn schedule_removal(&self, id: NotificationId, duration: Duration) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!(id, "No async runtime, notification will persist until dismissed");
            return None;
        };

        let store = Arc::downgrade(&self.inner);
        Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(store) = store.upgrade() {
                trace!(id, "Notification expired");
                store.remove(id);
            }
        }))
    }

    /// Removes a toast and cancels its timer. Unknown ids are ignored.
    ///
    /// Returns whether a toast was removed.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.inner.remove(id)
    }

    /// Removes every toast and cancels all timers. Subscribers are notified once.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Registers a listener called with the full list after every mutation.
    ///
    /// A panicking listener is logged and skipped; later listeners still run.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Returns a snapshot of the active toasts in display order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.state.lock().notifications.clone()
    }

    /// Number of active toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().notifications.len()
    }

    /// Whether no toast is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tears the store down without notifying: cancels timers, drops toasts
    /// and listeners. The id counter is kept.
    pub fn dispose(&self) {
        let mut state = self.inner.state.lock();
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        state.pending.clear();
        state.notifications.clear();
        state.listeners.clear();
    }
}

/// Created toast plus a bound `dismiss`.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    notification: Notification,
    store: Weak<StoreInner>,
}

impl NotificationHandle {
    /// Id of the toast.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.notification.id
    }

    /// The toast as it was created.
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Asks the store to remove this toast. Safe to call more than once.
    pub fn dismiss(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|store| store.remove(self.notification.id))
    }
}

impl Deref for NotificationHandle {
    type Target = Notification;

    fn deref(&self) -> &Self::Target {
        &self.notification
    }
}

/// Registration returned by [`NotificationStore::subscribe`].
#[derive(Debug)]
#[must_use = "dropping a subscription does not unsubscribe; call `unsubscribe`"]
pub struct Subscription {
    id: ListenerId,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Deregisters the listener.
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(store: &NotificationStore) -> (Arc<Mutex<Vec<Vec<NotificationId>>>>, Subscription) {
        let seen: Arc<Mutex<Vec<Vec<NotificationId>>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |list| {
            sink.lock().push(list.iter().map(|n| n.id).collect());
        });
        (seen, subscription)
    }

    #[test]
    fn test_ids_strictly_increase_and_are_not_reused() {
        let store = NotificationStore::new();

        let first = store.add(NotificationKind::Info, "one", Duration::ZERO);
        let second = store.add(NotificationKind::Info, "two", Duration::ZERO);
        assert!(store.remove(second.id()));
        let third = store.add(NotificationKind::Info, "three", Duration::ZERO);

        assert!(first.id() < second.id());
        assert!(second.id() < third.id());
        assert_eq!(
            store.notifications().iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![first.id(), third.id()]
        );
    }

    #[test]
    fn test_subscribers_receive_every_mutation() {
        let store = NotificationStore::new();
        let (seen, _subscription) = recorder(&store);

        let a = store.add(NotificationKind::Success, "a", Duration::ZERO);
        let b = store.add(NotificationKind::Error, "b", Duration::ZERO);
        store.remove(a.id());
        store.clear();

        assert_eq!(
            *seen.lock(),
            vec![vec![a.id()], vec![a.id(), b.id()], vec![b.id()], vec![]]
        );
    }

    #[test]
    fn test_remove_unknown_id_is_silent() {
        let store = NotificationStore::new();
        let (seen, _subscription) = recorder(&store);

        assert!(!store.remove(42));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_dismiss_notifies_exactly_once() {
        let store = NotificationStore::new();
        let loading = store.add(NotificationKind::Loading, "Saving...", Duration::ZERO);
        let (seen, _subscription) = recorder(&store);

        assert!(loading.is_persistent());
        assert!(loading.dismiss());
        assert!(!loading.dismiss());

        assert_eq!(*seen.lock(), vec![Vec::<NotificationId>::new()]);
    }

    #[test]
    fn test_listeners_called_in_subscription_order() {
        let store = NotificationStore::new();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::default();

        let first = Arc::clone(&order);
        let _a = store.subscribe(move |_| first.lock().push("first"));
        let second = Arc::clone(&order);
        let _b = store.subscribe(move |_| second.lock().push("second"));

        store.add(NotificationKind::Info, "hello", Duration::ZERO);

        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let store = NotificationStore::new();
        let _bad = store.subscribe(|_| panic!("listener failure"));
        let (seen, _subscription) = recorder(&store);

        let handle = store.add(NotificationKind::Warning, "careful", Duration::ZERO);

        assert_eq!(*seen.lock(), vec![vec![handle.id()]]);
        assert_eq!(store.len(), 1);
        assert!(store.remove(handle.id()));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = NotificationStore::new();
        let (seen, subscription) = recorder(&store);

        store.add(NotificationKind::Info, "one", Duration::ZERO);
        subscription.unsubscribe();
        store.add(NotificationKind::Info, "two", Duration::ZERO);

        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_listener_may_dismiss_from_callback() {
        let store = NotificationStore::new();
        let inner = store.clone();
        let _sub = store.subscribe(move |list| {
            if let Some(n) = list.iter().find(|n| n.kind == NotificationKind::Error) {
                inner.remove(n.id);
            }
        });

        store.add(NotificationKind::Error, "boom", Duration::ZERO);

        assert!(store.is_empty());
    }

    #[test]
    fn test_later_listener_ends_on_list_after_nested_removal() {
        let store = NotificationStore::new();
        let inner = store.clone();
        let _dismisser = store.subscribe(move |list| {
            if let Some(n) = list.iter().find(|n| n.kind == NotificationKind::Error) {
                inner.remove(n.id);
            }
        });
        let (seen, _subscription) = recorder(&store);

        let error = store.add(NotificationKind::Error, "boom", Duration::ZERO);

        assert!(store.is_empty());
        assert_eq!(*seen.lock(), vec![vec![error.id()], vec![]]);
    }

    #[test]
    fn test_nested_add_is_delivered_after_current_snapshot() {
        let store = NotificationStore::new();
        let inner = store.clone();
        let _follow_up = store.subscribe(move |list| {
            if list.len() == 1 && list[0].kind == NotificationKind::Loading {
                inner.add(NotificationKind::Info, "queued", Duration::ZERO);
            }
        });
        let (seen, _subscription) = recorder(&store);

        let loading = store.add(NotificationKind::Loading, "Saving...", Duration::ZERO);

        let ids: Vec<_> = store.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(*seen.lock(), vec![vec![loading.id()], ids]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_notification_expires() {
        let store = NotificationStore::new();
        let (seen, _subscription) = recorder(&store);

        let handle = store.add(NotificationKind::Success, "Saved", Duration::from_millis(100));
        assert_eq!(store.len(), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(store.is_empty());
        assert_eq!(*seen.lock(), vec![vec![handle.id()], vec![]]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_remove_cancels_timer() {
        let store = NotificationStore::new();
        let handle = store.add(NotificationKind::Info, "soon", Duration::from_millis(100));
        let keep = store.add(NotificationKind::Info, "stays", Duration::ZERO);
        let (seen, _subscription) = recorder(&store);

        assert!(store.remove(handle.id()));
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*seen.lock(), vec![vec![keep.id()]]);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_never_expires() {
        let store = NotificationStore::new();
        store.add(NotificationKind::Loading, "Uploading...", Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(3600)).await;

        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_all_timers() {
        let store = NotificationStore::new();
        store.add(NotificationKind::Info, "a", Duration::from_millis(50));
        store.add(NotificationKind::Error, "b", Duration::from_millis(80));
        let (seen, _subscription) = recorder(&store);

        store.clear();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(seen.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_drops_listeners_and_timers() {
        let store = NotificationStore::new();
        store.add(NotificationKind::Info, "a", Duration::from_millis(50));
        let (seen, _subscription) = recorder(&store);

        store.dispose();
        tokio::time::sleep(Duration::from_millis(100)).await;
        store.add(NotificationKind::Info, "b", Duration::ZERO);

        assert!(seen.lock().is_empty());
        assert_eq!(store.len(), 1);
    }
}
