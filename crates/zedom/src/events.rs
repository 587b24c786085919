//! Event helpers: `on`, `off`, with selector-based delegation
//!
//! A delegated listener is a wrapper the caller never sees. The wrapper for
//! each `(element, event name, handler)` is kept in a [`DelegateRegistry`]
//! so `off` can remove it given only the original handler.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use zedom_css::SelectorList;
use zedom_dom::{Document, Event, EventListener, ListenerOptions, NodeId};

use crate::{Result, Window};

/// What `on` attaches
#[derive(Clone)]
pub enum Listen {
    /// Plain listener on the element
    Direct(EventListener),
    /// Handler called for events whose target is, or sits inside, a
    /// descendant matching `selector`
    Delegate { selector: String, handler: EventListener },
}

impl Listen {
    pub fn delegate(selector: &str, handler: EventListener) -> Self {
        Listen::Delegate { selector: selector.to_string(), handler }
    }
}

impl From<EventListener> for Listen {
    fn from(listener: EventListener) -> Self {
        Listen::Direct(listener)
    }
}

impl std::fmt::Debug for Listen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Listen::Direct(_) => f.write_str("Direct"),
            Listen::Delegate { selector, .. } => f.debug_struct("Delegate").field("selector", selector).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DelegateKey {
    element: NodeId,
    event_name: String,
    handler: *const (),
}

struct Delegation {
    /// Keeps the handler alive so its address stays unique
    _handler: EventListener,
    wrapper: EventListener,
    capture: bool,
    /// Set once a `once` wrapper has run; the document has dropped it by then
    fired: Option<Rc<Cell<bool>>>,
}

impl Delegation {
    fn is_live(&self) -> bool {
        !self.fired.as_ref().is_some_and(|fired| fired.get())
    }
}

/// Installed delegation wrappers, keyed by element, event name and the
/// identity of the caller's handler
#[derive(Default)]
pub struct DelegateRegistry {
    entries: HashMap<DelegateKey, Vec<Delegation>>,
}

impl std::fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateRegistry")
            .field("wrappers", &self.entries.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl DelegateRegistry {
    fn key(element: NodeId, event_name: &str, handler: &EventListener) -> DelegateKey {
        DelegateKey {
            element,
            event_name: event_name.to_string(),
            handler: Rc::as_ptr(handler) as *const (),
        }
    }

    fn insert(&mut self, element: NodeId, event_name: &str, handler: &EventListener, delegation: Delegation) {
        self.prune();
        self.entries
            .entry(Self::key(element, event_name, handler))
            .or_default()
            .push(delegation);
    }

    /// Drop wrappers the document already discarded
    fn prune(&mut self) {
        self.entries.retain(|_, list| {
            list.retain(Delegation::is_live);
            !list.is_empty()
        });
    }

    /// Take the wrappers registered with this capture flag
    fn take(&mut self, element: NodeId, event_name: &str, handler: &EventListener, capture: bool) -> Vec<EventListener> {
        self.prune();
        let key = Self::key(element, event_name, handler);
        let Some(list) = self.entries.get_mut(&key) else {
            return Vec::new();
        };
        let (taken, kept): (Vec<Delegation>, Vec<Delegation>) = list.drain(..).partition(|d| d.capture == capture);
        if kept.is_empty() {
            self.entries.remove(&key);
        } else {
            *list = kept;
        }
        taken.into_iter().map(|d| d.wrapper).collect()
    }

    /// Number of live wrappers for `element` and `event_name`
    pub fn count(&self, element: NodeId, event_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.element == element && k.event_name == event_name)
            .map(|(_, v)| v.iter().filter(|d| d.is_live()).count())
            .sum()
    }
}

/// Walk from the event target toward `root`, invoking `handler` on the first
/// node matching `selectors`. `root` itself is tested last.
fn delegate(selectors: SelectorList, handler: EventListener, fired: Option<Rc<Cell<bool>>>) -> EventListener {
    Rc::new(move |doc: &mut Document, root: NodeId, event: &mut Event| {
        if let Some(fired) = &fired {
            fired.set(true);
        }
        let mut current = event.target();
        while let Some(node) = current {
            if selectors.matches(doc.tree(), node) {
                tracing::trace!(?node, "delegated match");
                handler(doc, node, event);
                return;
            }
            if node == root {
                return;
            }
            current = doc.parent(node);
        }
    })
}

/// Attach a listener to `el`. Returns `el`, or `None` when `el` is missing,
/// `event_name` is empty or a delegate selector is empty. An invalid
/// selector is an error.
///
/// ```ignore
/// on(&mut window, list, "click", Listen::delegate("li.item", handler), None)?;
/// ```
pub fn on(
    window: &mut Window,
    el: impl Into<Option<NodeId>>,
    event_name: &str,
    listen: impl Into<Listen>,
    options: impl Into<Option<ListenerOptions>>,
) -> Result<Option<NodeId>> {
    let Some(el) = el.into() else { return Ok(None) };
    if event_name.is_empty() {
        return Ok(None);
    }
    let options = options.into().unwrap_or(window.config().listener_options);

    match listen.into() {
        Listen::Direct(listener) => {
            window.document_mut().add_event_listener(el, event_name, listener, options);
        }
        Listen::Delegate { selector, handler } => {
            if selector.is_empty() {
                return Ok(None);
            }
            let selectors = SelectorList::parse(&selector)?;
            let fired = options.once.then(|| Rc::new(Cell::new(false)));
            let wrapper = delegate(selectors, Rc::clone(&handler), fired.clone());
            tracing::debug!(?el, event = event_name, %selector, "delegating listener");
            let delegation = Delegation {
                _handler: Rc::clone(&handler),
                wrapper: Rc::clone(&wrapper),
                capture: options.capture,
                fired,
            };
            window.delegates.insert(el, event_name, &handler, delegation);
            window.document_mut().add_event_listener(el, event_name, wrapper, options);
        }
    }
    Ok(Some(el))
}

/// Remove `handler` from `el`, whether it was attached directly or through
/// delegation. Returns `el`, or `None` when `el` is missing or `event_name`
/// is empty.
pub fn off(
    window: &mut Window,
    el: impl Into<Option<NodeId>>,
    event_name: &str,
    handler: &EventListener,
    options: impl Into<Option<ListenerOptions>>,
) -> Option<NodeId> {
    let el = el.into()?;
    if event_name.is_empty() {
        return None;
    }
    let capture = options.into().unwrap_or(window.config().listener_options).capture;

    window.document_mut().remove_event_listener(el, event_name, handler, capture);
    for wrapper in window.delegates.take(el, event_name, handler, capture) {
        window.document_mut().remove_event_listener(el, event_name, &wrapper, capture);
    }
    Some(el)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<usize>>, EventListener) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let handler: EventListener = Rc::new(move |_: &mut Document, _: NodeId, _: &mut Event| {
            sink.set(sink.get() + 1);
        });
        (count, handler)
    }

    #[test]
    fn test_registry_take_by_capture() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("div");
        let (_, handler) = counter();

        on(&mut window, el, "click", Listen::delegate("p", Rc::clone(&handler)), ListenerOptions::capture()).unwrap();
        on(&mut window, el, "click", Listen::delegate("p", Rc::clone(&handler)), None).unwrap();
        assert_eq!(window.delegates.count(el, "click"), 2);

        off(&mut window, el, "click", &handler, ListenerOptions::capture());
        assert_eq!(window.delegates.count(el, "click"), 1);
        assert_eq!(window.document().listener_count(el, "click"), 1);

        off(&mut window, el, "click", &handler, None);
        assert_eq!(window.delegates.count(el, "click"), 0);
        assert_eq!(window.document().listener_count(el, "click"), 0);
    }

    #[test]
    fn test_once_delegations_do_not_accumulate() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("div");
        let p = window.document_mut().create_element("p");
        window.document_mut().append_child(el, p).unwrap();
        let (count, handler) = counter();

        for _ in 0..100 {
            on(&mut window, el, "click", Listen::delegate("p", Rc::clone(&handler)), ListenerOptions::once()).unwrap();
            window.document_mut().click(p);
        }
        assert_eq!(count.get(), 100);
        assert_eq!(window.document().listener_count(el, "click"), 0);
        assert_eq!(window.delegates.count(el, "click"), 0);
        assert!(window.delegates.entries.len() <= 1);

        off(&mut window, el, "click", &handler, None);
        assert!(window.delegates.entries.is_empty());
    }

    #[test]
    fn test_once_delegation_removable_before_firing() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("div");
        let (count, handler) = counter();

        on(&mut window, el, "click", Listen::delegate("div", Rc::clone(&handler)), ListenerOptions::once()).unwrap();
        assert_eq!(window.delegates.count(el, "click"), 1);
        off(&mut window, el, "click", &handler, None);
        window.document_mut().click(el);
        assert_eq!(count.get(), 0);
        assert_eq!(window.delegates.count(el, "click"), 0);
    }

    #[test]
    fn test_short_circuits() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("div");
        let (_, handler) = counter();

        assert_eq!(on(&mut window, None, "click", Rc::clone(&handler), None).unwrap(), None);
        assert_eq!(on(&mut window, el, "", Rc::clone(&handler), None).unwrap(), None);
        assert_eq!(on(&mut window, el, "click", Listen::delegate("", Rc::clone(&handler)), None).unwrap(), None);
        assert_eq!(off(&mut window, None, "click", &handler, None), None);
        assert_eq!(off(&mut window, el, "", &handler, None), None);
        assert_eq!(window.document().listener_count(el, "click"), 0);
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("div");
        let (_, handler) = counter();
        assert!(on(&mut window, el, "click", Listen::delegate("p[", handler), None).is_err());
        assert_eq!(window.document().listener_count(el, "click"), 0);
    }

    #[test]
    fn test_once_option() {
        let mut window = Window::default();
        let el = window.document_mut().create_element("button");
        let (count, handler) = counter();
        on(&mut window, el, "click", handler, ListenerOptions::once()).unwrap();
        window.document_mut().click(el);
        window.document_mut().click(el);
        assert_eq!(count.get(), 1);
    }
}
