// ── Debounce ──
//
// Coalesces bursts of values: every `push` restarts a cancellable delay and
// only the value whose delay runs out without being superseded is delivered.
// Delays run as spawned tokio tasks, so `push` must be called from within a
// runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct Debouncer<T> {
    delay: Duration,
    /// Sequence number and cancel handle of the latest push.
    pending: Option<(u64, CancellationToken)>,
    seq: u64,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            seq: 0,
            tx,
            rx,
        }
    }

    /// Whether a pushed value has not been delivered yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule `value`, superseding any value still waiting.
    pub fn push(&mut self, value: T) {
        self.cancel();
        self.seq += 1;

        let seq = self.seq;
        let token = CancellationToken::new();
        let cancel = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let _ = tx.send((seq, value));
                }
            }
        });

        self.pending = Some((seq, token));
    }

    /// Wait for the latest pushed value to fire.
    ///
    /// Returns `None` straight away when nothing is pending. Values from
    /// superseded pushes that fired before being cancelled are discarded.
    pub async fn settled(&mut self) -> Option<T> {
        let want = self.pending.as_ref()?.0;
        while let Some((seq, value)) = self.rx.recv().await {
            if seq == want {
                self.pending = None;
                return Some(value);
            }
        }
        None
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some((_, token)) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some((_, token)) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn burst_delivers_only_the_last_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(1);
        debouncer.push(2);
        debouncer.push(3);
        assert_eq!(debouncer.settled().await, Some(3));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_pending_returns_none() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(DELAY);
        assert_eq!(debouncer.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("x");
        debouncer.cancel();
        assert_eq!(debouncer.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn value_that_already_fired_is_skipped_when_superseded() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(1);
        tokio::time::sleep(DELAY * 2).await;
        debouncer.push(2);
        assert_eq!(debouncer.settled().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_the_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(7);
        let early = tokio::time::timeout(DELAY / 2, debouncer.settled()).await;
        assert!(early.is_err());
        assert_eq!(debouncer.settled().await, Some(7));
    }
}
