//! Change notifications fired after each committed transition.

/// Payload of a committed transition.
///
/// Built and delivered synchronously inside the transition; listeners only
/// ever see it by reference.
pub struct StateChangeEvent<'a, O, S> {
    owner: &'a O,
    previous: &'a S,
    current: &'a S,
}

impl<'a, O, S> StateChangeEvent<'a, O, S> {
    pub(crate) fn new(owner: &'a O, previous: &'a S, current: &'a S) -> Self {
        Self {
            owner,
            previous,
            current,
        }
    }

    pub fn owner(&self) -> &'a O {
        self.owner
    }

    /// The state that was just exited.
    pub fn previous(&self) -> &'a S {
        self.previous
    }

    /// The state that was just entered.
    pub fn current(&self) -> &'a S {
        self.current
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boxed change listener.
pub type Listener<O, S> = Box<dyn FnMut(&StateChangeEvent<'_, O, S>)>;

/// Ordered listener registry.
pub(crate) struct Listeners<O, S> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<O, S>)>,
}

impl<O, S> Default for Listeners<O, S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<O, S> Listeners<O, S> {
    pub(crate) fn add(&mut self, listener: Listener<O, S>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver `event` to every listener in registration order.
    pub(crate) fn notify(&mut self, event: &StateChangeEvent<'_, O, S>) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }
}
