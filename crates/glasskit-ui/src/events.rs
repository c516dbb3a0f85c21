//! Target-action style control events.
//!
//! Controls queue events while their state is borrowed and dispatch them
//! only after the borrow is released, so listeners are free to read or
//! mutate the control that notified them.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    TouchDown,
    ValueChanged,
    TouchUpInside,
    TouchCancel,
}

impl ControlEvent {
    fn bit(self) -> u8 {
        match self {
            ControlEvent::TouchDown => 1 << 0,
            ControlEvent::ValueChanged => 1 << 1,
            ControlEvent::TouchUpInside => 1 << 2,
            ControlEvent::TouchCancel => 1 << 3,
        }
    }
}

/// Set of [`ControlEvent`]s a listener subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlEvents(u8);

impl ControlEvents {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);
    pub const VALUE_CHANGED: Self = Self(1 << 1);

    pub fn with(mut self, event: ControlEvent) -> Self {
        self.insert(event);
        self
    }

    pub fn insert(&mut self, event: ControlEvent) {
        self.0 |= event.bit();
    }

    pub fn contains(&self, event: ControlEvent) -> bool {
        (self.0 & event.bit()) != 0
    }
}

impl Default for ControlEvents {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<ControlEvent> for ControlEvents {
    fn from(event: ControlEvent) -> Self {
        Self::NONE.with(event)
    }
}

pub type ListenerId = u64;

type Callback = Rc<RefCell<dyn FnMut(ControlEvent)>>;

struct Listener {
    id: ListenerId,
    events: ControlEvents,
    callback: Callback,
}

#[derive(Default)]
struct ListenerTable {
    next_id: ListenerId,
    listeners: Vec<Listener>,
}

#[derive(Clone, Default)]
pub struct EventListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &self,
        events: ControlEvents,
        callback: impl FnMut(ControlEvent) + 'static,
    ) -> ListenerId {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = table.next_id;
        table.listeners.push(Listener {
            id,
            events,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut table = self.table.borrow_mut();
        let before = table.listeners.len();
        table.listeners.retain(|listener| listener.id != id);
        before != table.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dispatch(&self, events: impl IntoIterator<Item = ControlEvent>) {
        for event in events {
            let callbacks: Vec<Callback> = self
                .table
                .borrow()
                .listeners
                .iter()
                .filter(|listener| listener.events.contains(event))
                .map(|listener| Rc::clone(&listener.callback))
                .collect();
            for callback in callbacks {
                match callback.try_borrow_mut() {
                    Ok(mut callback) => (*callback)(event),
                    Err(_) => log::warn!("listener re-entered while handling {event:?}; skipped"),
                }
            }
        }
    }
}
