// ============================================================================
// revar - Event Bus
// Explicitly-constructed typed event bus with consumable propagation
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A handler registered on an [`EventBus`].
pub trait EventListener<E> {
    /// Handle one event. Returning `true` consumes the event and stops
    /// propagation to the remaining listeners of that fire pass.
    fn handle(&self, event: &E, bus: &EventBus<E>) -> bool;

    /// Retired listeners are swept from the bus after a fire pass.
    fn should_retire(&self) -> bool {
        false
    }
}

fn same_event_listener<E>(a: &Rc<dyn EventListener<E>>, b: &Rc<dyn EventListener<E>>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// A typed event bus.
///
/// Buses are constructed explicitly and passed to whoever needs them; there
/// is no process-wide default instance. Cloning the handle aliases the same
/// bus.
///
/// Delivery runs in reverse registration order, so the most recently added
/// listener sees the event first and may consume it before earlier listeners
/// do. A listener panic aborts the rest of the pass and propagates.
pub struct EventBus<E> {
    inner: Rc<BusInner<E>>,
}

struct BusInner<E> {
    listeners: RefCell<Vec<Rc<dyn EventListener<E>>>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(BusInner {
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. Registering the same handle twice delivers the
    /// event to it twice.
    pub fn add_listener(&self, listener: Rc<dyn EventListener<E>>) {
        self.inner.listeners.borrow_mut().push(listener);
    }

    /// Remove every registration of `listener`, by pointer identity. No-op
    /// if absent.
    pub fn remove_listener(&self, listener: &Rc<dyn EventListener<E>>) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|l| !same_event_listener(l, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Deliver `event` to the listeners, newest first, stopping at the first
    /// one that consumes it. Retired listeners are swept afterwards, whether
    /// or not they were reached in this pass.
    pub fn fire(&self, event: &E) {
        // Snapshot so handlers can add or remove listeners mid-pass.
        let snapshot: Vec<Rc<dyn EventListener<E>>> = self.inner.listeners.borrow().clone();

        for listener in snapshot.iter().rev() {
            let consumed = listener.handle(event, self);
            if consumed {
                break;
            }
        }

        self.inner
            .listeners
            .borrow_mut()
            .retain(|l| !l.should_retire());
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CLOSURE AND ONE-TIME LISTENERS
// =============================================================================

struct FnEventListener<E, F: Fn(&E, &EventBus<E>) -> bool> {
    callback: F,
    _marker: std::marker::PhantomData<fn(&E)>,
}

impl<E, F: Fn(&E, &EventBus<E>) -> bool> EventListener<E> for FnEventListener<E, F> {
    fn handle(&self, event: &E, bus: &EventBus<E>) -> bool {
        (self.callback)(event, bus)
    }
}

/// Wrap a closure into an event listener handle. Keep the returned `Rc` if
/// you intend to remove the listener later.
pub fn handler<E, F>(callback: F) -> Rc<dyn EventListener<E>>
where
    E: 'static,
    F: Fn(&E, &EventBus<E>) -> bool + 'static,
{
    Rc::new(FnEventListener {
        callback,
        _marker: std::marker::PhantomData,
    })
}

struct OneTimeEventListener<E> {
    inner: Rc<dyn EventListener<E>>,
    fired: Cell<bool>,
}

impl<E> EventListener<E> for OneTimeEventListener<E> {
    fn handle(&self, event: &E, bus: &EventBus<E>) -> bool {
        if self.fired.get() {
            return false;
        }
        self.fired.set(true);
        self.inner.handle(event, bus)
    }

    fn should_retire(&self) -> bool {
        self.fired.get()
    }
}

/// A listener that handles at most one event, then retires itself. It is
/// swept from the bus at the end of the pass that fired it.
pub fn one_time<E, F>(callback: F) -> Rc<dyn EventListener<E>>
where
    E: 'static,
    F: Fn(&E, &EventBus<E>) -> bool + 'static,
{
    Rc::new(OneTimeEventListener {
        inner: handler(callback),
        fired: Cell::new(false),
    })
}

// =============================================================================
// TESTS
// =============================================================================
