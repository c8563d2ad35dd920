use heapless::Deque;

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::timer::{elapsed, Instant, DEBOUNCE_DELAY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Switch to the next plant profile
    AdvanceMode,
    /// Stop irrigation
    Acknowledge,
    /// Silence everything and restart the board
    Reboot,
}

impl Button {
    const fn slot(self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
        }
    }

    /// The event a press of this button stands for
    pub const fn event(self) -> Event {
        match self {
            Button::A => Event::AdvanceMode,
            #[cfg(not(feature = "reboot-button"))]
            Button::B => Event::Acknowledge,
            #[cfg(feature = "reboot-button")]
            Button::B => Event::Reboot,
        }
    }
}

/// Remembers the last accepted edge of every button
#[derive(Debug, Default)]
pub struct Debouncer {
    last_accepted: [Option<Instant>; 2],
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            last_accepted: [None, None],
        }
    }

    /// Whether an edge seen at `now` counts as a press
    /// Accepted edges restart the debounce window for that button only
    pub fn accept(&mut self, button: Button, now: Instant) -> bool {
        let slot = &mut self.last_accepted[button.slot()];
        match *slot {
            Some(last) if elapsed(last, now) < DEBOUNCE_DELAY => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}

/// Bounded FIFO of pending events; pushes beyond capacity are dropped
#[derive(Debug)]
pub struct EventQueue {
    pending: Deque<Event, EVENT_QUEUE_CAPACITY>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// returns false if the queue was full and the event got dropped
    pub fn push(&mut self, event: Event) -> bool {
        self.pending.push_back(event).is_ok()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for EventQueue {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.pop()
    }
}
