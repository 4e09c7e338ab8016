//! Listener broadcasting between components.
//!
//! Widgets expose a [`Signal`](Signal) of [`PointerEvent`](PointerEvent)s which
//! [`Globals`](core::Globals) emits into after hit-testing; reactions and managed listeners subscribe to it.

use crate::core;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerRef(u64);

/// Signal type which broadcasts events to listeners, in the order they were added.
///
/// Listeners receive the [`Globals`](core::Globals) so that they can reach back into the component tree;
/// for that reason a signal owned by a component must be taken out of it before emitting.
pub struct Signal<T> {
    listeners: Vec<(ListenerRef, Box<dyn FnMut(&mut core::Globals, &T)>)>,
    next_id: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal {
            listeners: Default::default(),
            next_id: 0,
        }
    }
}

impl<T> Signal<T> {
    /// Creates a new signal.
    ///
    /// Identical to `Signal::default()`.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a listener to the signal.
    pub fn listen(
        &mut self,
        listener: impl FnMut(&mut core::Globals, &T) + 'static,
    ) -> ListenerRef {
        let id = ListenerRef(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes an existing listener from the signal.
    pub fn remove_listener(&mut self, listener: ListenerRef) {
        self.listeners.retain(|(id, _)| *id != listener);
    }

    /// Broadcasts an event to all the listeners.
    pub fn emit(&mut self, globals: &mut core::Globals, event: &T) {
        for (_, listener) in &mut self.listeners {
            listener(globals, event);
        }
    }

    /// Number of listeners currently attached.
    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Pointer events dispatched by [`Globals`](core::Globals) to the component under the cursor.
///
/// Positions are local to the receiving component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Entered,
    Exited,
    Pressed(reclutch::display::Point),
    Released(reclutch::display::Point),
    Clicked(reclutch::display::Point),
}
