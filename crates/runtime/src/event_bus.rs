use crate::frame::Frame;

/// Minimal event type for traceability.
///
/// For now this is just structured text; viewport publishes and store signals
/// log through it so a session can be replayed and inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

/// Observer registry with a payload-free change contract.
///
/// `notify` hands every subscriber a shared read handle (`&T`); subscribers are
/// expected to re-read whatever they display from it rather than receive the
/// changed values. Callbacks run in subscription order.
pub struct Notifier<T: ?Sized> {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&T)>)>,
}

impl<T: ?Sized> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: ?Sized> Notifier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `true` if the subscriber was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Invokes every subscriber once. Returns how many were notified.
    pub fn notify(&mut self, payload: &T) -> usize {
        for (_id, callback) in self.subscribers.iter_mut() {
            callback(payload);
        }
        self.subscribers.len()
    }
}
