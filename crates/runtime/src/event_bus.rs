use std::collections::VecDeque;

use crate::update::UpdateSource;

/// Trace record of something the explorer did in response to an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub sequence: u64,
    pub source: Option<UpdateSource>,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded, ordered trace of explorer events. Oldest events are dropped
/// once `capacity` is reached.
#[derive(Debug)]
pub struct EventBus {
    next_sequence: u64,
    capacity: usize,
    events: VecDeque<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_sequence: 0,
            capacity: capacity.max(1),
            events: VecDeque::new(),
        }
    }

    pub fn emit(
        &mut self,
        source: Option<UpdateSource>,
        kind: &'static str,
        message: impl Into<String>,
    ) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(Event {
            sequence: self.next_sequence,
            source,
            kind,
            message: message.into(),
        });
        self.next_sequence += 1;
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn last(&self, kind: &str) -> Option<&Event> {
        self.events.iter().rev().find(|e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}
