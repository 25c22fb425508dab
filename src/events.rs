//! Synchronous event subscription: `node_added` / `node_removed`.
//!
//! Grounded on `original_source`'s `core/tree.py` (`TreeEvent`, `_event_subscribers`, a
//! `defaultdict(dict)` mapping event to `{subscription_id: callback}`). Subscription ids here are
//! plain sequential integers — the specification only requires `unsubscribe` be exact and
//! O(#subscriptions), which a `Vec` scan over a typically tiny subscriber list satisfies without
//! needing anything fancier.

use crate::id::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    NodeAdded,
    NodeRemoved,
}

/// An opaque handle returned by [`subscribe`](crate::tree::Tree::subscribe), used to
/// [`unsubscribe`](crate::tree::Tree::unsubscribe) later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) struct EventBus<Data> {
    next_id: u64,
    node_added: Vec<(u64, Box<dyn FnMut(&[NodeId]) + 'static>)>,
    node_removed: Vec<(u64, Box<dyn FnMut(&[NodeId]) + 'static>)>,
    _marker: std::marker::PhantomData<Data>,
}

impl<Data> Default for EventBus<Data> {
    // Written by hand because `#[derive(Default)]` would add a spurious `Data: Default` bound
    // even though `Data` only ever appears inside a `PhantomData`.
    fn default() -> Self {
        EventBus { next_id: 0, node_added: Vec::new(), node_removed: Vec::new(), _marker: std::marker::PhantomData }
    }
}

impl<Data> EventBus<Data> {
    pub(crate) fn subscribe(
        &mut self,
        event: TreeEvent,
        callback: impl FnMut(&[NodeId]) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        let list = match event {
            TreeEvent::NodeAdded => &mut self.node_added,
            TreeEvent::NodeRemoved => &mut self.node_removed,
        };
        list.push((id, Box::new(callback)));
        SubscriptionId(id)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) {
        self.node_added.retain(|(sub_id, _)| *sub_id != id.0);
        self.node_removed.retain(|(sub_id, _)| *sub_id != id.0);
    }

    /// Invokes every subscriber for `event`, in subscription order, with `nodes`. Per the
    /// specification, a subscriber that panics is not caught here: it unwinds out of this call
    /// (and whichever public `Tree` method triggered it) after the mutation has already been
    /// committed, and later subscribers for the same event are skipped.
    pub(crate) fn publish(&mut self, event: TreeEvent, nodes: &[NodeId]) {
        if nodes.is_empty() {
            return;
        }
        let list = match event {
            TreeEvent::NodeAdded => &mut self.node_added,
            TreeEvent::NodeRemoved => &mut self.node_removed,
        };
        for (_, callback) in list.iter_mut() {
            callback(nodes);
        }
    }
}

impl<Data> std::fmt::Debug for EventBus<Data> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("node_added_subscribers", &self.node_added.len())
            .field("node_removed_subscribers", &self.node_removed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_are_invoked_in_order_and_unsubscribe_is_exact() {
        let mut bus = EventBus::<()>::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_a = log.clone();
        let a = bus.subscribe(TreeEvent::NodeAdded, move |_| log_a.borrow_mut().push('a'));
        let log_b = log.clone();
        bus.subscribe(TreeEvent::NodeAdded, move |_| log_b.borrow_mut().push('b'));

        bus.publish(TreeEvent::NodeAdded, &[NodeId(1)]);
        assert_eq!(*log.borrow(), vec!['a', 'b']);

        bus.unsubscribe(a);
        bus.publish(TreeEvent::NodeAdded, &[NodeId(1)]);
        assert_eq!(*log.borrow(), vec!['a', 'b', 'b']);
    }
}
