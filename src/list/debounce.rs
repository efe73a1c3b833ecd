//! Cancellable delayed commit for typed search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value whose delay elapsed without being replaced
#[derive(Debug, Clone, PartialEq, Eq)]
struct Debounced<T> {
    generation: u64,
    value: T,
}

/// Delays values until input pauses for `delay`.
///
/// Scheduling a new value cancels the pending one. Values that fire after being
/// replaced or cancelled are dropped on receipt, so only the latest one is ever
/// delivered.
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: bool,
    task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Debounced<T>>,
    rx: mpsc::UnboundedReceiver<Debounced<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: false,
            task: None,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing anything still pending.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        self.pending = true;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Debounced { generation, value });
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Wait for the pending value to fire.
    ///
    /// Never resolves while nothing is pending; check `is_pending` first or use
    /// inside `select!`.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            let fired = self.rx.recv().await?;
            if fired.generation == self.generation && self.pending {
                self.pending = false;
                self.task = None;
                return Some(fired.value);
            }
            tracing::trace!("dropping superseded debounced value");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
