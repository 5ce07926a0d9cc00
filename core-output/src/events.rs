//! # Control Event Queue
//!
//! Device callbacks run on a real-time thread and must not stop or reset the
//! session inline. They post events into a bounded queue instead; a control
//! thread drains the queue and applies the requested transitions.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Control events posted from the device-callback side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    /// Playback should stop once the control thread gets to it.
    StopRequested,
    /// The driver asked for a full re-initialization.
    ResetNeeded,
    /// The driver detected a processing overload.
    Overload,
}

/// Bounded FIFO of [`OutputEvent`]s shared between callback and control
/// threads. Cloning shares the queue.
///
/// `post` never blocks: when the queue is full the event is dropped and
/// counted, because a stalled control thread must not stall the audio
/// callback.
#[derive(Clone)]
pub struct EventQueue {
    inner: Arc<EventQueueInner>,
}

struct EventQueueInner {
    events: Mutex<VecDeque<OutputEvent>>,
    capacity: usize,
    dropped: AtomicU64,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` pending events.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(EventQueueInner {
                events: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Post an event. Returns `false` if the queue was full and the event was
    /// dropped.
    pub fn post(&self, event: OutputEvent) -> bool {
        let mut events = self.inner.events.lock();
        if events.len() >= self.inner.capacity {
            self.inner.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        events.push_back(event);
        true
    }

    /// Take every pending event in posting order.
    pub fn drain(&self) -> Vec<OutputEvent> {
        let mut events = self.inner.events.lock();
        events.drain(..).collect()
    }

    /// Number of events currently pending.
    pub fn len(&self) -> usize {
        self.inner.events.lock().len()
    }

    /// Returns `true` if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total events dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }
}
