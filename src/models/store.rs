// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory annotation set for one video session.
//!
//! The store owns the ordered annotation list for the lifetime of a
//! session and notifies subscribers synchronously after every mutation.
//! All mutation happens on the interaction thread; each public
//! operation is atomic with respect to the UI event loop.

use super::annotation::Annotation;

/// Callback invoked with the full annotation set after each mutation.
pub type Listener = Box<dyn FnMut(&[Annotation])>;

/// Handle returned by [`AnnotationStore::subscribe`], used to detach
/// the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Ordered collection of annotations with subscriber notification.
#[derive(Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener called synchronously after each mutation.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Detach a previously registered listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    /// Read-only view of the current annotation set.
    pub fn snapshot(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Install the initially fetched annotation set.
    ///
    /// Counts as a mutation like any other, so the freshly loaded set is
    /// announced to subscribers (and thereby re-persisted once the sync
    /// quiet period elapses, which is an idempotent wholesale write).
    pub fn load(&mut self, initial: Vec<Annotation>) {
        self.annotations = initial;
        self.notify();
    }

    /// Replace the whole set.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
        self.notify();
    }

    /// Append one committed annotation.
    pub fn append(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
        self.notify();
    }

    /// Remove every annotation matching the predicate. Notifies exactly
    /// once even when nothing matched.
    pub fn remove_where<F>(&mut self, predicate: F)
    where
        F: Fn(&Annotation) -> bool,
    {
        self.annotations.retain(|ann| !predicate(ann));
        self.notify();
    }

    fn notify(&mut self) {
        let annotations = &self.annotations;
        for (_, listener) in &mut self.listeners {
            listener(annotations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn line_at(ts: f64) -> Annotation {
        Annotation::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), ts, "#3B82F6")
    }

    fn counting_listener(counter: &Rc<RefCell<usize>>) -> Listener {
        let counter = Rc::clone(counter);
        Box::new(move |_| *counter.borrow_mut() += 1)
    }

    #[test]
    fn test_one_notification_per_mutation() {
        let counter = Rc::new(RefCell::new(0));
        let mut store = AnnotationStore::new();
        store.subscribe(counting_listener(&counter));

        store.load(vec![line_at(1.0)]);
        store.append(line_at(2.0));
        store.append(line_at(3.0));
        store.remove_where(|ann| ann.timestamp > 2.5);
        store.replace_all(Vec::new());

        assert_eq!(*counter.borrow(), 5);
    }

    #[test]
    fn test_remove_where_with_no_match_still_notifies() {
        let counter = Rc::new(RefCell::new(0));
        let mut store = AnnotationStore::new();
        store.append(line_at(1.0));
        store.subscribe(counting_listener(&counter));

        store.remove_where(|_| false);

        assert_eq!(store.len(), 1);
        assert_eq!(*counter.borrow(), 1);
    }

    #[test]
    fn test_listener_sees_post_mutation_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = AnnotationStore::new();
        {
            let seen = Rc::clone(&seen);
            store.subscribe(Box::new(move |anns| {
                seen.borrow_mut().push(anns.len());
            }));
        }

        store.append(line_at(1.0));
        store.append(line_at(2.0));
        store.remove_where(|_| true);

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let counter = Rc::new(RefCell::new(0));
        let mut store = AnnotationStore::new();
        let id = store.subscribe(counting_listener(&counter));

        store.append(line_at(1.0));
        store.unsubscribe(id);
        store.append(line_at(2.0));

        assert_eq!(*counter.borrow(), 1);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = AnnotationStore::new();
        store.append(line_at(3.0));
        store.append(line_at(1.0));
        store.append(line_at(2.0));

        let stamps: Vec<f64> = store.snapshot().iter().map(|a| a.timestamp).collect();
        assert_eq!(stamps, vec![3.0, 1.0, 2.0]);
    }
}
