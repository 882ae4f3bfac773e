//! Per-device playback store
//!
//! One [`PlaybackStore`] exists per selected device. All writes go through
//! a single lock so optimistic and authoritative writers are serialized,
//! and every committed state is published on a watch channel.
//!
//! # Precedence
//!
//! ```text
//! optimistic write ──▶ field value + pending mark (ticket keeps prior value)
//! authoritative    ──▶ field value, pending mark cleared
//! rollback(ticket) ──▶ prior value, only if the mark is still the ticket's
//! ```
//!
//! An authoritative value therefore survives a later rollback of the
//! command that was in flight when it arrived.

use std::collections::HashMap;

use beo_api::PlaybackSnapshot;
use beo_stream::{CancellationToken, Notification};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::trace;

use crate::decoder::{decode_notification, decode_snapshot};
use crate::model::PlaybackState;
use crate::write::{Field, FieldValue, Write};

/// Receipt for an optimistic write, used to confirm or roll it back
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an optimistic ticket should be confirmed or rolled back"]
pub struct OptimisticTicket {
    entries: Vec<TicketEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TicketEntry {
    field: Field,
    seq: u64,
    prior: FieldValue,
}

impl OptimisticTicket {
    /// Fields this ticket wrote
    pub fn fields(&self) -> Vec<Field> {
        self.entries.iter().map(|e| e.field).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct StoreInner {
    state: PlaybackState,
    pending: HashMap<Field, u64>,
    next_seq: u64,
}

/// Canonical playback record for one device
pub struct PlaybackStore {
    inner: Mutex<StoreInner>,
    tx: watch::Sender<PlaybackState>,
}

impl PlaybackStore {
    /// Store holding the default state
    pub fn new() -> Self {
        Self::with_state(PlaybackState::default())
    }

    pub fn with_state(state: PlaybackState) -> Self {
        let state = state.normalized();
        let (tx, _) = watch::channel(state.clone());
        Self {
            inner: Mutex::new(StoreInner {
                state,
                pending: HashMap::new(),
                next_seq: 1,
            }),
            tx,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> PlaybackState {
        self.inner.lock().state.clone()
    }

    /// Subscribe to committed states
    pub fn watch(&self) -> watch::Receiver<PlaybackState> {
        self.tx.subscribe()
    }

    /// True while an optimistic write to `field` awaits its command
    pub fn is_pending(&self, field: Field) -> bool {
        self.inner.lock().pending.contains_key(&field)
    }

    /// Apply a single tagged write
    pub fn apply(&self, write: Write) {
        self.apply_batch([write]);
    }

    /// Apply several writes as one processing step
    ///
    /// Within a batch an authoritative write to a field beats every
    /// optimistic write to the same field, whatever their order. Writes to
    /// different fields are independent.
    pub fn apply_batch(&self, writes: impl IntoIterator<Item = Write>) {
        let writes: Vec<Write> = writes.into_iter().collect();
        let mut inner = self.inner.lock();
        self.apply_locked(&mut inner, writes);
    }

    /// Apply local guesses for a command and return a ticket for them
    pub fn apply_optimistic(&self, values: impl IntoIterator<Item = FieldValue>) -> OptimisticTicket {
        let mut inner = self.inner.lock();
        let mut entries = Vec::new();

        for value in values {
            let field = value.field();
            let prior = FieldValue::read(field, &inner.state);
            let seq = inner.next_seq;
            inner.next_seq += 1;
            inner.pending.insert(field, seq);
            value.apply_to(&mut inner.state);
            entries.push(TicketEntry { field, seq, prior });
        }
        self.commit(&mut inner);
        OptimisticTicket { entries }
    }

    /// Apply device-reported values
    pub fn apply_authoritative(&self, values: impl IntoIterator<Item = FieldValue>) {
        self.apply_batch(values.into_iter().map(Write::Authoritative));
    }

    /// The command behind `ticket` succeeded; drop its pending marks
    pub fn confirm(&self, ticket: &OptimisticTicket) {
        let mut inner = self.inner.lock();
        for entry in &ticket.entries {
            if inner.pending.get(&entry.field) == Some(&entry.seq) {
                inner.pending.remove(&entry.field);
            }
        }
    }

    /// The command behind `ticket` failed; restore prior values
    ///
    /// Only fields still marked by this ticket are restored. A field that
    /// has since received an authoritative value or a newer optimistic write
    /// keeps it. Returns whether anything was restored.
    pub fn rollback(&self, ticket: &OptimisticTicket) -> bool {
        let mut inner = self.inner.lock();
        let mut restored = false;

        for entry in &ticket.entries {
            if inner.pending.get(&entry.field) == Some(&entry.seq) {
                inner.pending.remove(&entry.field);
                entry.prior.clone().apply_to(&mut inner.state);
                restored = true;
            }
        }
        if restored {
            self.commit(&mut inner);
        }
        restored
    }

    /// Reconcile a stream notification
    ///
    /// Decoding reads the current record, so it happens under the same lock
    /// as the write.
    pub fn apply_notification(&self, notification: &Notification) {
        let mut inner = self.inner.lock();
        self.reconcile_locked(&mut inner, notification);
    }

    /// Reconcile a stream notification while `token` is live
    ///
    /// The token is checked under the store lock. A writer that cancels the
    /// token before calling [`reset`](Self::reset) therefore never sees this
    /// notification land on the reset record. Returns whether it was applied.
    pub fn apply_notification_unless_cancelled(
        &self,
        notification: &Notification,
        token: &CancellationToken,
    ) -> bool {
        let mut inner = self.inner.lock();
        if token.is_cancelled() {
            return false;
        }
        self.reconcile_locked(&mut inner, notification);
        true
    }

    /// Reconcile a directly fetched snapshot; every field is overwritten
    pub fn apply_snapshot(&self, snapshot: &PlaybackSnapshot) {
        self.apply_authoritative(decode_snapshot(snapshot));
    }

    /// Back to defaults with nothing pending
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = PlaybackState::default();
        inner.pending.clear();
        self.commit(&mut inner);
    }

    fn reconcile_locked(&self, inner: &mut StoreInner, notification: &Notification) {
        let values = decode_notification(notification, &inner.state);
        if !values.is_empty() {
            self.apply_locked(inner, values.into_iter().map(Write::Authoritative).collect());
        }
    }

    fn apply_locked(&self, inner: &mut StoreInner, writes: Vec<Write>) {
        let mut authoritative_fields: Vec<Field> = writes
            .iter()
            .filter(|w| matches!(w, Write::Authoritative(_)))
            .map(Write::field)
            .collect();
        authoritative_fields.sort();
        authoritative_fields.dedup();

        for write in writes {
            match write {
                Write::Optimistic(value) => {
                    if authoritative_fields.binary_search(&value.field()).is_ok() {
                        trace!(field = %value.field(), "Optimistic write superseded in batch");
                        continue;
                    }
                    let seq = inner.next_seq;
                    inner.next_seq += 1;
                    inner.pending.insert(value.field(), seq);
                    value.apply_to(&mut inner.state);
                }
                Write::Authoritative(value) => {
                    inner.pending.remove(&value.field());
                    value.apply_to(&mut inner.state);
                }
            }
        }
        self.commit(inner);
    }

    fn commit(&self, inner: &mut StoreInner) {
        inner.state.normalize();
        let state = inner.state.clone();
        self.tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PlaybackStore")
            .field("state", &inner.state)
            .field("pending", &inner.pending.len())
            .finish()
    }
}
