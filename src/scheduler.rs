//! Deferred, cancellable opponent moves.
//!
//! The opponent waits a short moment before playing so its reply reads as a
//! separate move. A pending reply is a spawned tokio task that sleeps and then
//! posts an [`OpponentDue`] to the UI loop. The scheduler keeps at most one
//! pending task. A due message is honoured only if its ticket still matches
//! the pending one, so a reply that was already in flight when it was
//! cancelled changes nothing.

use std::time::Duration;

use derive_more::Display;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Identifies one scheduled opponent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("#{_0}")]
pub struct Ticket(u64);

/// Message posted when a scheduled move's delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentDue {
    /// Ticket of the task that fired.
    pub ticket: Ticket,
}

#[derive(Debug)]
struct Pending {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

/// Schedules at most one delayed opponent move at a time.
#[derive(Debug)]
pub struct OpponentScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<OpponentDue>,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl OpponentScheduler {
    /// Creates a scheduler and the receiver its due messages arrive on.
    #[instrument]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<OpponentDue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            pending: None,
            next_ticket: 0,
        };
        (scheduler, rx)
    }

    /// True while a scheduled move has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket of the pending move, if any.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Schedules a move after the delay, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn schedule(&mut self) -> Ticket {
        self.cancel();

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let tx = self.tx.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(%ticket, "Opponent move due");
            // Receiver gone means the UI loop ended; nothing left to do.
            let _ = tx.send(OpponentDue { ticket });
        });

        debug!(%ticket, delay_ms = delay.as_millis() as u64, "Scheduled opponent move");
        self.pending = Some(Pending { ticket, handle });
        ticket
    }

    /// Cancels the pending move. Returns whether one was pending.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.handle.abort();
                debug!(ticket = %pending.ticket, "Cancelled opponent move");
                true
            }
            None => false,
        }
    }

    /// Accepts `due` if it belongs to the pending move, clearing it.
    ///
    /// Stale messages from replaced or cancelled moves return `false`.
    #[instrument(skip(self))]
    pub fn claim(&mut self, due: OpponentDue) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == due.ticket => {
                self.pending = None;
                true
            }
            _ => {
                debug!(ticket = %due.ticket, "Ignoring stale opponent move");
                false
            }
        }
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(250);

    #[tokio::test(start_paused = true)]
    async fn test_due_arrives_after_delay() {
        let (mut scheduler, mut rx) = OpponentScheduler::new(DELAY);
        let ticket = scheduler.schedule();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        let due = rx.recv().await.unwrap();
        assert_eq!(due.ticket, ticket);
        assert!(scheduler.claim(due));
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let (mut scheduler, mut rx) = OpponentScheduler::new(DELAY);
        let first = scheduler.schedule();
        let second = scheduler.schedule();
        assert_ne!(first, second);
        assert_eq!(scheduler.pending_ticket(), Some(second));

        tokio::time::sleep(DELAY * 4).await;
        let due = rx.recv().await.unwrap();
        assert_eq!(due.ticket, second);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_move_never_fires() {
        let (mut scheduler, mut rx) = OpponentScheduler::new(DELAY);
        scheduler.schedule();
        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());

        tokio::time::sleep(DELAY * 4).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_due_is_stale_after_cancel() {
        let (mut scheduler, mut rx) = OpponentScheduler::new(DELAY);
        scheduler.schedule();
        tokio::time::sleep(DELAY * 2).await;
        let due = rx.recv().await.unwrap();

        // Fired before the cancel reached it.
        scheduler.cancel();
        assert!(!scheduler.claim(due));
    }
}
