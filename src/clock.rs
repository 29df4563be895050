use std::time::Duration;

/// Events reported by the media engine's playback clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Current playback position.
    Tick(Duration),
    /// Media is ready; carries the total duration.
    Ready(Duration),
    /// End of media reached.
    Ended,
}

/// Handle returned by [`PlaybackClock::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Explicit observer registration for playback position updates.
///
/// This replaces implicit reactive property bindings: a controller subscribes
/// when it takes ownership of a track and unsubscribes when the track is
/// replaced, so no stale callback can fire against a disposed track.
///
/// Deliberately single-threaded. Cross-thread time updates must be marshalled
/// onto the owning context before reaching the clock; everything downstream
/// then needs no locking.
#[derive(Default)]
pub struct PlaybackClock {
    next_id: u64,
    observers: Vec<(Subscription, Box<dyn FnMut(ClockEvent)>)>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(ClockEvent) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer. Unsubscribing a handle that was already removed
    /// (or never existed) is a no-op, not an error.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.observers.retain(|(id, _)| *id != subscription);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver the current playback position to all observers, in
    /// subscription order.
    pub fn tick(&mut self, time: Duration) {
        self.emit(ClockEvent::Tick(time));
    }

    pub fn ready(&mut self, total: Duration) {
        self.emit(ClockEvent::Ready(total));
    }

    pub fn ended(&mut self) {
        self.emit(ClockEvent::Ended);
    }

    fn emit(&mut self, event: ClockEvent) {
        for (_, callback) in &mut self.observers {
            callback(event);
        }
    }
}
