//! DOM Events
//!
//! Event targets, listener registration and three-phase dispatch.
//!
//! Listener identity follows `addEventListener`: the same listener (by
//! `Rc` pointer) registered twice for the same type and capture flag is
//! only stored once, and `removeEventListener` needs that same `Rc`.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event listener. The `NodeId` argument is the receiver the listener is
/// invoked on (`this`), which for a plain listener is the current target.
pub type EventListener = Rc<dyn Fn(&mut Document, NodeId, &mut Event)>;

/// `addEventListener` options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Fire during the capture phase instead of the bubble phase
    pub capture: bool,
    /// Remove after the first invocation
    pub once: bool,
    /// `prevent_default` is ignored while this listener runs
    pub passive: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }

    pub fn once() -> Self {
        Self { once: true, ..Self::default() }
    }
}

impl From<bool> for ListenerOptions {
    /// The legacy boolean form is the capture flag
    fn from(capture: bool) -> Self {
        Self { capture, ..Self::default() }
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventPhase {
    None = 0,
    Capturing = 1,
    AtTarget = 2,
    Bubbling = 3,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Create an event that neither bubbles nor can be canceled
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            current_target: None,
            phase: EventPhase::None,
            bubbles: false,
            cancelable: false,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            in_passive_listener: false,
        }
    }

    /// Create a bubbling, cancelable event (what `click()` dispatches)
    pub fn bubbling(event_type: impl Into<String>) -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            ..Self::new(event_type)
        }
    }

    /// Event type name
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched to
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listeners are currently running
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop propagation to further nodes
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners on this node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Clone)]
struct Registration {
    event_type: String,
    listener: EventListener,
    options: ListenerOptions,
    removed: Rc<Cell<bool>>,
}

impl Registration {
    fn same(&self, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        self.event_type == event_type
            && self.options.capture == capture
            && Rc::ptr_eq(&self.listener, listener)
    }
}

/// Listener storage for every event target of a document
#[derive(Default)]
pub struct EventTargets {
    listeners: HashMap<NodeId, Vec<Registration>>,
}

impl std::fmt::Debug for EventTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTargets")
            .field("targets", &self.listeners.len())
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl EventTargets {
    fn add(&mut self, target: NodeId, event_type: &str, listener: EventListener, options: ListenerOptions) -> bool {
        let list = self.listeners.entry(target).or_default();
        if list.iter().any(|r| r.same(event_type, &listener, options.capture)) {
            return false;
        }
        list.push(Registration {
            event_type: event_type.to_string(),
            listener,
            options,
            removed: Rc::new(Cell::new(false)),
        });
        true
    }

    fn remove(&mut self, target: NodeId, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        let Some(list) = self.listeners.get_mut(&target) else {
            return false;
        };
        let Some(pos) = list.iter().position(|r| r.same(event_type, listener, capture)) else {
            return false;
        };
        let registration = list.remove(pos);
        registration.removed.set(true);
        if list.is_empty() {
            self.listeners.remove(&target);
        }
        true
    }

    fn snapshot(&self, target: NodeId, event_type: &str, phase: EventPhase) -> Vec<Registration> {
        self.listeners
            .get(&target)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event_type == event_type)
                    .filter(|r| match phase {
                        EventPhase::Capturing => r.options.capture,
                        EventPhase::Bubbling => !r.options.capture,
                        _ => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn count(&self, target: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&target)
            .map(|list| list.iter().filter(|r| r.event_type == event_type).count())
            .unwrap_or(0)
    }
}

impl Document {
    /// `target.addEventListener(type, listener, options)`
    ///
    /// Returns false when an identical registration already exists.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: EventListener,
        options: ListenerOptions,
    ) -> bool {
        if !self.tree.contains_id(target) {
            return false;
        }
        self.events.add(target, event_type, listener, options)
    }

    /// `target.removeEventListener(type, listener, capture)`
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> bool {
        self.events.remove(target, event_type, listener, capture)
    }

    /// Number of listeners registered on `target` for `event_type`
    pub fn listener_count(&self, target: NodeId, event_type: &str) -> usize {
        self.events.count(target, event_type)
    }

    /// `target.dispatchEvent(event)`
    ///
    /// Runs capture (root to parent), target, then bubble (parent to root)
    /// phases. Returns false if a listener canceled the event.
    pub fn dispatch_event(&mut self, target: NodeId, event: &mut Event) -> bool {
        if !self.tree.contains_id(target) {
            return false;
        }
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .collect();
        tracing::debug!(event = event.event_type(), ?target, depth = path.len(), "dispatching event");

        event.target = Some(target);
        event.propagation_stopped = false;
        event.immediate_propagation_stopped = false;

        for &node in path.iter().skip(1).rev() {
            if event.propagation_stopped {
                break;
            }
            self.invoke(node, event, EventPhase::Capturing);
        }
        if !event.propagation_stopped {
            self.invoke(target, event, EventPhase::AtTarget);
        }
        if event.bubbles {
            for &node in path.iter().skip(1) {
                if event.propagation_stopped {
                    break;
                }
                self.invoke(node, event, EventPhase::Bubbling);
            }
        }

        event.phase = EventPhase::None;
        event.current_target = None;
        !event.default_prevented
    }

    /// `element.click()`
    pub fn click(&mut self, target: NodeId) -> bool {
        let mut event = Event::bubbling("click");
        self.dispatch_event(target, &mut event)
    }

    fn invoke(&mut self, node: NodeId, event: &mut Event, phase: EventPhase) {
        let snapshot = self.events.snapshot(node, &event.event_type, phase);
        if snapshot.is_empty() {
            return;
        }
        event.current_target = Some(node);
        event.phase = phase;
        for registration in snapshot {
            if registration.removed.get() {
                continue;
            }
            if registration.options.once {
                self.events.remove(
                    node,
                    &registration.event_type,
                    &registration.listener,
                    registration.options.capture,
                );
            }
            event.in_passive_listener = registration.options.passive;
            (registration.listener)(self, node, event);
            event.in_passive_listener = false;
            if event.immediate_propagation_stopped {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &'static str) -> EventListener {
        let log = Rc::clone(log);
        Rc::new(move |_doc: &mut Document, _this: NodeId, event: &mut Event| {
            log.borrow_mut().push(format!("{}:{:?}", label, event.phase()));
        })
    }

    fn nested() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("about:blank");
        let body = doc.body().unwrap();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(body, outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        (doc, outer, inner)
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));

        doc.add_event_listener(outer, "click", recorder(&log, "outer-bubble"), ListenerOptions::default());
        doc.add_event_listener(outer, "click", recorder(&log, "outer-capture"), ListenerOptions::capture());
        doc.add_event_listener(inner, "click", recorder(&log, "inner"), ListenerOptions::default());

        assert!(doc.click(inner));
        assert_eq!(
            *log.borrow(),
            vec!["outer-capture:Capturing", "inner:AtTarget", "outer-bubble:Bubbling"]
        );
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let (mut doc, outer, _) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = recorder(&log, "l");

        assert!(doc.add_event_listener(outer, "click", listener.clone(), ListenerOptions::default()));
        assert!(!doc.add_event_listener(outer, "click", listener.clone(), ListenerOptions::default()));
        assert_eq!(doc.listener_count(outer, "click"), 1);

        assert!(doc.remove_event_listener(outer, "click", &listener, false));
        doc.click(outer);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_once_and_stop_propagation() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));

        doc.add_event_listener(outer, "click", recorder(&log, "outer"), ListenerOptions::default());
        let stopper: EventListener = Rc::new(|_: &mut Document, _: NodeId, e: &mut Event| e.stop_propagation());
        doc.add_event_listener(inner, "click", stopper, ListenerOptions::once());

        doc.click(inner);
        assert!(log.borrow().is_empty());
        assert_eq!(doc.listener_count(inner, "click"), 0);

        doc.click(inner);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_prevent_default_respects_passive() {
        let (mut doc, outer, _) = nested();
        let cancel: EventListener = Rc::new(|_: &mut Document, _: NodeId, e: &mut Event| e.prevent_default());
        doc.add_event_listener(outer, "click", cancel.clone(), ListenerOptions { passive: true, ..Default::default() });
        assert!(doc.click(outer));

        doc.remove_event_listener(outer, "click", &cancel, false);
        doc.add_event_listener(outer, "click", cancel, ListenerOptions::default());
        assert!(!doc.click(outer));
    }

    #[test]
    fn test_non_bubbling_event_stays_at_target() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_event_listener(outer, "focus", recorder(&log, "outer"), ListenerOptions::default());

        let mut event = Event::new("focus");
        doc.dispatch_event(inner, &mut event);
        assert!(log.borrow().is_empty());
        assert_eq!(event.target(), Some(inner));
        assert_eq!(event.current_target(), None);
    }
}
