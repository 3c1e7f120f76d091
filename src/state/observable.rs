//! Observable values backed by `tokio::sync::watch`

use tokio::sync::watch;

/// A value cell that notifies subscribers on every write.
///
/// Every `set` notifies, even when the new value equals the old one, so a
/// subscriber sees one notification per write.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    /// Create a new observable holding `initial`
    pub fn new(initial: T) -> Self {
        // send_replace works without live receivers, so the initial one can go
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Store a value and wake all subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Register a new listener
    pub fn subscribe(&self) -> Subscription<T> {
        let mut rx = self.tx.subscribe();
        let first = Some(rx.borrow_and_update().clone());
        Subscription { rx, first }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Listener side of an [`Observable`].
///
/// The first call to [`next`](Self::next) yields the value held when the
/// subscription was created; every later call waits for the next write.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    first: Option<T>,
}

impl<T: Clone> Subscription<T> {
    /// Latest value, without waiting
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Whether a write happened since the last value was taken
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next value. Returns `None` once the observable is gone.
    pub async fn next(&mut self) -> Option<T> {
        if let Some(first) = self.first.take() {
            return Some(first);
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
