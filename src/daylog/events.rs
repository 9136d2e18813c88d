//! Change notifications for presentation layers.
//!
//! The core never renders; instead it announces that the record sequence or
//! the filter criteria changed, and whoever draws lists, menus or charts
//! subscribes here.

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The record sequence was mutated (add/update/remove/undo/redo/import).
    SequenceChanged,
    /// The filter criteria changed; views should reset pagination.
    CriteriaChanged,
}

type Subscriber = Box<dyn Fn(ChangeEvent)>;

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(ChangeEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&self, event: ChangeEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
