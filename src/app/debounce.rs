// src/app/debounce.rs
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Identity of one scheduled action. Only the ticket that is still pending
/// when its event is processed may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

struct Pending {
    ticket: Ticket,
    timer: JoinHandle<()>,
}

/// Owns at most one outstanding timer. When the quiet period elapses the
/// prepared event is sent to the owner's channel; the owner calls
/// [`Debouncer::claim`] before acting on it.
///
/// Must be used from inside a tokio runtime (timers are spawned tasks).
pub struct Debouncer<E> {
    tx: UnboundedSender<E>,
    pending: Option<Pending>,
    issued: u64,
}

impl<E: Send + 'static> Debouncer<E> {
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self {
            tx,
            pending: None,
            issued: 0,
        }
    }

    /// Replace whatever is pending with a new delayed event.
    pub fn schedule(&mut self, delay: Duration, make: impl FnOnce(Ticket) -> E) -> Ticket {
        self.cancel_pending();

        self.issued += 1;
        let ticket = Ticket(self.issued);
        let event = make(ticket);
        let tx = self.tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });

        self.pending = Some(Pending { ticket, timer });
        ticket
    }

    /// Returns true if something was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(p) => {
                p.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Accept a fired event. A ticket that was cancelled or superseded after its
    /// timer already sent is rejected here.
    pub fn claim(&mut self, ticket: Ticket) -> bool {
        match &self.pending {
            Some(p) if p.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<E> Drop for Debouncer<E> {
    fn drop(&mut self) {
        if let Some(p) = self.pending.take() {
            p.timer.abort();
        }
    }
}
