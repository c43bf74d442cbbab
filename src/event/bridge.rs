// ============================================================================
// revar - Event-to-Cell Bridge
// Adapts the push-based event bus into the pull-based cell graph
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::core::types::{AnyVar, ReadVar};
use crate::event::bus::{EventBus, one_time};
use crate::primitives::var::Var;

/// Arm a one-shot bridge: the next event fired on `bus` writes its mapped
/// payload into the returned cell. Later events are ignored; the listener
/// retires after the first delivery and is swept from the bus.
///
/// The bridged cell starts at `initial` and behaves like any other cell:
/// dependents that read it are invalidated when the event lands.
pub fn once_into_var<E, T, F>(bus: &EventBus<E>, initial: T, mapping: F) -> Var<T>
where
    E: 'static,
    T: PartialEq + 'static,
    F: Fn(&E) -> T + 'static,
{
    let cell = Var::new(initial);
    bus.add_listener(one_time({
        let cell = cell.clone();
        move |event: &E, _| {
            cell.set(mapping(event));
            false
        }
    }));
    cell
}

/// A cell fed by an event bus.
///
/// Holds the mapped payload of the most recent captured event, starting at
/// `initial`. One one-shot listener is armed on the bus at a time: the next
/// event consumes it and lands in the cell, and the next read re-arms it.
/// Events that land between a delivery and the next read are dropped.
///
/// Reading through a context makes the underlying cell an ordinary
/// dependency, so a computation that samples an `EventVar` is invalidated
/// once per captured event.
///
/// # Example
///
/// ```
/// use revar::{EventBus, EventVar, cloned, computed};
///
/// let bus: EventBus<u32> = EventBus::new();
/// let stream = EventVar::new(&bus, 0, |e| e * 2);
/// let doubled = computed(cloned!(stream => move |ctx| ctx.read(&stream)));
///
/// assert_eq!(doubled.get(), 0);
/// bus.fire(&21);
/// assert_eq!(doubled.get(), 42);
/// ```
pub struct EventVar<E: 'static, T: 'static> {
    bus: EventBus<E>,
    cell: Var<T>,
    mapping: Rc<dyn Fn(&E) -> T>,
    armed: Rc<Cell<bool>>,
}

impl<E: 'static, T: PartialEq + 'static> EventVar<E, T> {
    pub fn new<F>(bus: &EventBus<E>, initial: T, mapping: F) -> Self
    where
        F: Fn(&E) -> T + 'static,
    {
        let bridged = Self {
            bus: bus.clone(),
            cell: Var::new(initial),
            mapping: Rc::new(mapping),
            armed: Rc::new(Cell::new(false)),
        };
        bridged.arm();
        bridged
    }

    /// Register a fresh one-shot listener unless one is already waiting, so
    /// repeated reads between events never stack listeners on the bus.
    fn arm(&self) {
        if self.armed.get() {
            return;
        }
        self.armed.set(true);

        let cell = self.cell.clone();
        let mapping = self.mapping.clone();
        let armed = self.armed.clone();
        self.bus.add_listener(one_time(move |event: &E, _| {
            armed.set(false);
            cell.set(mapping(event));
            false
        }));
    }

    /// The bridged cell itself, for listener registration or `bind_var`.
    pub fn var(&self) -> &Var<T> {
        &self.cell
    }
}

impl<E: 'static, T: Clone + PartialEq + 'static> ReadVar<T> for EventVar<E, T> {
    /// Returns the latest captured payload and re-arms the bridge.
    fn get(&self) -> T {
        self.arm();
        self.cell.get()
    }

    fn as_dep(&self) -> Rc<dyn AnyVar> {
        self.cell.as_dep()
    }
}

impl<E: 'static, T: 'static> Clone for EventVar<E, T> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            cell: self.cell.clone(),
            mapping: self.mapping.clone(),
            armed: self.armed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::var::{computed, var};

    #[test]
    fn once_into_var_captures_the_first_event_only() {
        let bus: EventBus<u32> = EventBus::new();
        let cell = once_into_var(&bus, 0, |e| e * 10);

        assert_eq!(cell.get(), 0);

        bus.fire(&3);
        assert_eq!(cell.get(), 30);

        bus.fire(&9);
        assert_eq!(cell.get(), 30, "the bridge is one-shot");
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn event_var_exposes_the_latest_payload_across_recomputations() {
        let bus: EventBus<String> = EventBus::new();
        let label = var(String::from("label: "));
        let stream = EventVar::new(&bus, String::from("none"), |e: &String| e.clone());

        let display = computed({
            let label = label.clone();
            let stream = stream.clone();
            move |ctx| {
                let prefix = ctx.read(&label);
                let payload = ctx.read(&stream);
                format!("{prefix}{payload}")
            }
        });

        assert_eq!(display.get(), "label: none");
        assert_eq!(bus.listener_count(), 1);

        bus.fire(&String::from("first"));
        assert_eq!(display.get(), "label: first");

        // Reading re-armed a fresh listener; the fired one was swept.
        assert_eq!(bus.listener_count(), 1);

        bus.fire(&String::from("second"));
        assert_eq!(display.get(), "label: second");
    }

    #[test]
    fn events_landing_while_disarmed_are_dropped() {
        let bus: EventBus<u32> = EventBus::new();
        let stream = EventVar::new(&bus, 0, |e| *e);

        let last = computed({
            let stream = stream.clone();
            move |ctx| ctx.read(&stream)
        });
        assert_eq!(last.get(), 0);

        // The first event consumes the armed one-shot; the second finds no
        // listener waiting and is lost.
        bus.fire(&1);
        bus.fire(&2);
        assert_eq!(last.get(), 1);

        bus.fire(&3);
        assert_eq!(last.get(), 3);
    }

    #[test]
    fn recomputations_without_events_do_not_stack_listeners() {
        let bus: EventBus<u32> = EventBus::new();
        let label = var(0);
        let stream = EventVar::new(&bus, 0, |e| *e);

        let display = computed({
            let label = label.clone();
            let stream = stream.clone();
            move |ctx| ctx.read(&label) + ctx.read(&stream)
        });

        // Recompute repeatedly via the other dependency.
        for i in 1..=5 {
            label.set(i);
            display.get();
        }
        assert_eq!(bus.listener_count(), 1, "one armed one-shot at a time");

        bus.fire(&100);
        assert_eq!(display.get(), 105);
    }
}
