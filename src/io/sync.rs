// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Debounced persistence of the annotation set.
//!
//! The coordinator subscribes to the annotation store and schedules a
//! wholesale write after a quiet period measured from the most recent
//! mutation; each new mutation replaces the armed deadline (trailing
//! debounce, so a burst of edits produces one write). Writes run on a
//! worker thread and report back through a channel polled by the UI
//! thread, so drawing never blocks on I/O.
//!
//! Dropping the coordinator (or calling [`SyncCoordinator::cancel_pending`])
//! disarms the timer; a write already in flight runs to completion but
//! its result is reported nowhere.

use crate::io::repository::{AnnotationRepository, RepositoryError};
use crate::models::annotation::Annotation;
use crate::models::store::Listener;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Quiet period between the last mutation and the write it schedules.
pub const QUIET_PERIOD: Duration = Duration::from_secs(2);

/// How long the `Saved` indicator lingers before reverting to `Idle`.
pub const SAVED_DECAY: Duration = Duration::from_secs(2);

/// Tri-state (plus idle) save indicator shown in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// Debounces store mutations into wholesale repository writes.
pub struct SyncCoordinator {
    repository: Arc<dyn AnnotationRepository>,
    video_id: String,
    mutations_tx: Sender<Vec<Annotation>>,
    mutations_rx: Receiver<Vec<Annotation>>,
    /// Latest snapshot awaiting its quiet period, with the deadline.
    pending: Option<(Vec<Annotation>, Instant)>,
    /// Result channel of the write currently on a worker thread.
    in_flight: Option<Receiver<Result<(), RepositoryError>>>,
    status: SaveStatus,
    saved_at: Option<Instant>,
}

impl SyncCoordinator {
    pub fn new(repository: Arc<dyn AnnotationRepository>, video_id: String) -> Self {
        let (mutations_tx, mutations_rx) = channel();
        Self {
            repository,
            video_id,
            mutations_tx,
            mutations_rx,
            pending: None,
            in_flight: None,
            status: SaveStatus::Idle,
            saved_at: None,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Store listener feeding this coordinator. Every mutation sends the
    /// post-mutation snapshot; the latest one received wins.
    pub fn mutation_listener(&self) -> Listener {
        let tx = self.mutations_tx.clone();
        Box::new(move |annotations| {
            let _ = tx.send(annotations.to_vec());
        })
    }

    /// Whether the coordinator still needs ticks soon (armed timer,
    /// write in flight, or a `Saved` indicator waiting to decay).
    pub fn has_pending_work(&self) -> bool {
        self.pending.is_some() || self.in_flight.is_some() || self.saved_at.is_some()
    }

    /// Disarm the debounce timer and abandon any in-flight result.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
        self.in_flight = None;
    }

    /// Drive the coordinator. Called once per UI frame with the current
    /// instant; tests pass synthetic instants instead.
    pub fn tick(&mut self, now: Instant) {
        self.drain_mutations(now);
        self.poll_in_flight();
        self.fire_due_write(now);
        self.decay_saved_status(now);
    }

    fn drain_mutations(&mut self, now: Instant) {
        let mut latest = None;
        while let Ok(snapshot) = self.mutations_rx.try_recv() {
            latest = Some(snapshot);
        }
        if let Some(snapshot) = latest {
            self.pending = Some((snapshot, now + QUIET_PERIOD));
            self.status = SaveStatus::Saving;
            self.saved_at = None;
        }
    }

    fn poll_in_flight(&mut self) {
        let Some(rx) = &self.in_flight else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(())) => {
                self.in_flight = None;
                self.status = SaveStatus::Saved;
                log::info!("Saved annotations for {}", self.video_id);
            }
            Ok(Err(err)) => {
                self.in_flight = None;
                self.status = SaveStatus::Error;
                log::error!("Failed to save annotations for {}: {}", self.video_id, err);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                self.status = SaveStatus::Error;
                log::error!("Annotation save worker died for {}", self.video_id);
            }
        }
    }

    fn fire_due_write(&mut self, now: Instant) {
        // Writes are serialized: a due payload waits for the in-flight
        // one to finish, so results can never arrive out of order.
        if self.in_flight.is_some() {
            return;
        }
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if !due {
            return;
        }
        if let Some((payload, _)) = self.pending.take() {
            let (tx, rx) = channel();
            let repository = Arc::clone(&self.repository);
            let video_id = self.video_id.clone();
            std::thread::spawn(move || {
                let result = repository.save_annotations(&video_id, &payload);
                // Receiver may be gone if the view was torn down.
                let _ = tx.send(result);
            });
            self.in_flight = Some(rx);
        }
    }

    fn decay_saved_status(&mut self, now: Instant) {
        if self.status != SaveStatus::Saved {
            self.saved_at = None;
            return;
        }
        match self.saved_at {
            None => self.saved_at = Some(now),
            Some(at) if now.duration_since(at) >= SAVED_DECAY => {
                self.status = SaveStatus::Idle;
                self.saved_at = None;
            }
            Some(_) => {}
        }
    }
}
