//! Named build events with synchronous, registration-order dispatch.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ListenerError, MixError, Result};

/// Event emitted once by the build driver after the build completes.
pub const BUILD_EVENT: &str = "build";

pub type Listener = Box<dyn FnMut(&Value) -> std::result::Result<(), ListenerError>>;

/// Subscriber lists keyed by event name.
///
/// Dispatch is fail-fast: the first listener that returns an error stops the
/// remaining listeners for that `emit` call and the error reaches the caller.
#[derive(Default)]
pub struct EventBus {
    listeners: IndexMap<String, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. Registering the same closure logic twice means it
    /// runs twice.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F)
    where
        F: FnMut(&Value) -> std::result::Result<(), ListenerError> + 'static,
    {
        let event = event.into();
        let slot = self.listeners.entry(event.clone()).or_default();
        slot.push(Box::new(listener));
        debug!(%event, listeners = slot.len(), "listener registered");
    }

    /// Invoke every listener for `event` in subscription order.
    ///
    /// Returns the number of listeners that ran. Emitting an event nobody
    /// subscribed to is not an error.
    pub fn emit(&mut self, event: &str, payload: &Value) -> Result<usize> {
        let Some(listeners) = self.listeners.get_mut(event) else {
            trace!(%event, "no listeners");
            return Ok(0);
        };

        for (index, listener) in listeners.iter_mut().enumerate() {
            trace!(%event, index, "dispatching");
            listener(payload).map_err(|source| MixError::Listener {
                event: event.to_string(),
                source,
            })?;
        }

        debug!(%event, count = listeners.len(), "event dispatched");
        Ok(listeners.len())
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Event names with at least one listener, in first-subscription order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.listeners.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event, listeners) in &self.listeners {
            map.entry(event, &listeners.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn dispatches_in_subscription_order() {
        let calls = recorder();
        let mut bus = EventBus::new();

        let log = calls.clone();
        bus.on(BUILD_EVENT, move |_| {
            log.borrow_mut().push("f1");
            Ok(())
        });
        let log = calls.clone();
        bus.on(BUILD_EVENT, move |_| {
            log.borrow_mut().push("f2");
            Ok(())
        });

        assert_eq!(bus.emit(BUILD_EVENT, &json!({})).unwrap(), 2);
        assert_eq!(*calls.borrow(), vec!["f1", "f2"]);
    }

    #[test]
    fn failing_listener_stops_dispatch() {
        let calls = recorder();
        let mut bus = EventBus::new();

        let log = calls.clone();
        bus.on(BUILD_EVENT, move |_| {
            log.borrow_mut().push("first");
            Err("broken hook".into())
        });
        let log = calls.clone();
        bus.on(BUILD_EVENT, move |_| {
            log.borrow_mut().push("second");
            Ok(())
        });

        let err = bus.emit(BUILD_EVENT, &Value::Null).unwrap_err();
        assert!(matches!(err, MixError::Listener { ref event, .. } if event == "build"));
        assert_eq!(*calls.borrow(), vec!["first"]);
    }

    #[test]
    fn unknown_events_never_fire() {
        let calls = recorder();
        let mut bus = EventBus::new();
        let log = calls.clone();
        bus.on("watch", move |_| {
            log.borrow_mut().push("watch");
            Ok(())
        });

        assert_eq!(bus.emit(BUILD_EVENT, &Value::Null).unwrap(), 0);
        assert!(calls.borrow().is_empty());
        assert_eq!(bus.listener_count("watch"), 1);
        assert_eq!(bus.events().collect::<Vec<_>>(), vec!["watch"]);
    }

    #[test]
    fn listeners_see_payload() {
        let seen = Rc::new(RefCell::new(Value::Null));
        let mut bus = EventBus::new();
        let slot = seen.clone();
        bus.on(BUILD_EVENT, move |payload| {
            *slot.borrow_mut() = payload.clone();
            Ok(())
        });
        bus.emit(BUILD_EVENT, &json!({ "tasks": 3 })).unwrap();
        assert_eq!(*seen.borrow(), json!({ "tasks": 3 }));
    }
}
