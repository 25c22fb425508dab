//! Node storage: every node lives in one flat map, keyed by [`NodeId`], with parent/child links
//! expressed as ids rather than references. This is the idiom the teacher's own `Tiles<Pane>`
//! uses, generalized with a stored `parent` field per node (so ancestor walks, which resize,
//! remove and navigation all do constantly here, are O(depth) instead of a linear scan over
//! every node as the teacher's `parent_of` does).

use std::collections::HashMap;

use nohash_hasher::BuildNoHashHasher;

use crate::id::{NodeId, Sequence};
use crate::node::{Node, NodeKind, PaneNode, SplitContainerNode, TabContainerNode, TabNode};

type NodeMap<Data> = HashMap<NodeId, Node<Data>, BuildNoHashHasher<NodeId>>;

/// The arena owning every node of a single tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "Data: serde::Serialize", deserialize = "Data: serde::de::DeserializeOwned")))]
pub struct Tiles<Data> {
    #[cfg_attr(feature = "serde", serde(with = "node_map_serde"))]
    nodes: NodeMap<Data>,
    ids: Sequence,
}

impl<Data> Default for Tiles<Data> {
    fn default() -> Self {
        Tiles { nodes: NodeMap::default(), ids: Sequence::default() }
    }
}

impl<Data> Tiles<Data> {
    fn alloc_id(&mut self) -> NodeId {
        NodeId(self.ids.next())
    }

    /// The current value of the id sequence; restored verbatim on deserialize.
    pub(crate) fn id_sequence(&self) -> u64 {
        self.ids.current()
    }

    pub(crate) fn restore_id_sequence(&mut self, value: u64) {
        self.ids.restore(value);
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<Data>> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<Data>> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(Node::children).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, parent: Option<NodeId>, kind: NodeKind<Data>) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(id, Node { id, parent, kind });
        id
    }

    pub(crate) fn insert_tab_container(&mut self, parent: Option<NodeId>, tc: TabContainerNode) -> NodeId {
        self.insert(parent, NodeKind::TabContainer(tc))
    }

    pub(crate) fn insert_tab(&mut self, parent: NodeId, tab: TabNode) -> NodeId {
        self.insert(Some(parent), NodeKind::Tab(tab))
    }

    pub(crate) fn insert_split_container(&mut self, parent: NodeId, sc: SplitContainerNode) -> NodeId {
        self.insert(Some(parent), NodeKind::SplitContainer(sc))
    }

    pub(crate) fn insert_pane(&mut self, parent: NodeId, pane: PaneNode<Data>) -> NodeId {
        self.insert(Some(parent), NodeKind::Pane(pane))
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    /// Appends `child` to a `SplitContainer`'s or `TabContainer`'s child list. Panics (a bug, not
    /// a caller error) if `id` doesn't name a container kind that can hold `child`'s kind.
    pub(crate) fn push_child(&mut self, id: NodeId, child: NodeId) {
        let node = self.nodes.get_mut(&id).expect("push_child: unknown parent id");
        match &mut node.kind {
            NodeKind::SplitContainer(sc) => sc.children.push(child),
            NodeKind::TabContainer(tc) => tc.children.push(child),
            _ => panic!("push_child: {id} is not a container"),
        }
    }

    pub(crate) fn insert_child_at(&mut self, id: NodeId, index: usize, child: NodeId) {
        let node = self.nodes.get_mut(&id).expect("insert_child_at: unknown parent id");
        match &mut node.kind {
            NodeKind::SplitContainer(sc) => sc.children.insert(index, child),
            NodeKind::TabContainer(tc) => tc.children.insert(index, child),
            _ => panic!("insert_child_at: {id} is not a container"),
        }
    }

    /// Removes `child` from its parent's child list, wherever it is. A no-op if `child` isn't
    /// actually in `id`'s child list.
    pub(crate) fn remove_child(&mut self, id: NodeId, child: NodeId) {
        let node = self.nodes.get_mut(&id).expect("remove_child: unknown parent id");
        match &mut node.kind {
            NodeKind::SplitContainer(sc) => sc.children.retain(|c| *c != child),
            NodeKind::TabContainer(tc) => tc.children.retain(|c| *c != child),
            _ => panic!("remove_child: {id} is not a container"),
        }
    }

    /// Removes a single node from the arena without touching its parent's child list or its own
    /// children's parent pointers. Callers that need cascading removal should use
    /// [`Tiles::remove_subtree`].
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node<Data>> {
        self.nodes.remove(&id)
    }

    /// Removes `id` and everything beneath it, detaching it from its parent's child list first.
    /// Returns every removed node in bottom-up order (children before the parent that held them),
    /// matching the order `node_removed` events are published in.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Vec<Node<Data>> {
        if let Some(parent) = self.parent_of(id) {
            self.remove_child(parent, id);
        }
        let mut removed = Vec::new();
        self.collect_subtree_bottom_up(id, &mut removed);
        removed
    }

    fn collect_subtree_bottom_up(&mut self, id: NodeId, out: &mut Vec<Node<Data>>) {
        let children: Vec<NodeId> = self.children_of(id).to_vec();
        for child in children {
            self.collect_subtree_bottom_up(child, out);
        }
        if let Some(node) = self.nodes.remove(&id) {
            out.push(node);
        }
    }

    /// Ancestors of `id`, nearest first. Includes `id` itself if `include_self`.
    pub fn ancestors(&self, id: NodeId, include_self: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        if include_self {
            out.push(id);
        }
        let mut cur = self.parent_of(id);
        while let Some(node_id) = cur {
            out.push(node_id);
            cur = self.parent_of(node_id);
        }
        out
    }

    /// The nearest ancestor of `id` for which `pred` holds, or `None`.
    pub fn first_ancestor(&self, id: NodeId, pred: impl Fn(&Node<Data>) -> bool) -> Option<NodeId> {
        let mut cur = self.parent_of(id);
        while let Some(node_id) = cur {
            if let Some(node) = self.get(node_id) {
                if pred(node) {
                    return Some(node_id);
                }
            }
            cur = self.parent_of(node_id);
        }
        None
    }

    /// `Some(index)` of `child` within its parent's child list.
    pub fn index_in_parent(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent_of(child)?;
        self.children_of(parent).iter().position(|c| *c == child)
    }

    /// The "operational sibling" of `id`: its right sibling if any, else its left sibling, else
    /// `None` if `id` is a sole child or has no parent.
    pub fn operational_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        if siblings.len() < 2 {
            return None;
        }
        let index = siblings.iter().position(|c| *c == id)?;
        if index + 1 < siblings.len() {
            Some(siblings[index + 1])
        } else {
            Some(siblings[index - 1])
        }
    }

    /// `(left, right)` operational pair for `id`: `id` paired with its operational sibling, in
    /// left-to-right tree order. `None` if `id` is a sole child.
    pub fn operational_pair(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        if siblings.len() < 2 {
            return None;
        }
        let index = siblings.iter().position(|c| *c == id)?;
        if index + 1 == siblings.len() {
            Some((siblings[index - 1], id))
        } else {
            Some((id, siblings[index + 1]))
        }
    }

    /// The sibling of `id` offset by `n` positions, optionally wrapping around the parent's
    /// child list.
    pub fn sibling(&self, id: NodeId, n: i32, wrap: bool) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        let total = siblings.len() as i32;
        let index = siblings.iter().position(|c| *c == id)? as i32;
        let mut requested = index + n;
        if wrap {
            requested = requested.rem_euclid(total);
        } else if requested < 0 || requested >= total {
            return None;
        }
        Some(siblings[requested as usize])
    }

    /// Depth-first walk starting at `start` (root-first, pre-order), yielding every node id
    /// including `start`.
    pub fn iter_walk(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        WalkIter { tiles: self, stack: vec![start] }
    }
}

struct WalkIter<'a, Data> {
    tiles: &'a Tiles<Data>,
    stack: Vec<NodeId>,
}

impl<'a, Data> Iterator for WalkIter<'a, Data> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.tiles.children_of(id);
        for child in children.iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}

#[cfg(feature = "serde")]
mod node_map_serde {
    use std::collections::HashMap;

    use nohash_hasher::BuildNoHashHasher;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::id::NodeId;
    use crate::node::Node;

    use super::NodeMap;

    pub(super) fn serialize<S, Data>(map: &NodeMap<Data>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Data: Serialize,
    {
        let plain: HashMap<u64, &Node<Data>> = map.iter().map(|(id, node)| (id.0, node)).collect();
        plain.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D, Data>(deserializer: D) -> Result<NodeMap<Data>, D::Error>
    where
        D: Deserializer<'de>,
        Data: Deserialize<'de>,
    {
        let plain: HashMap<u64, Node<Data>> = HashMap::deserialize(deserializer)?;
        let mut map = NodeMap::with_capacity_and_hasher(plain.len(), BuildNoHashHasher::default());
        for (id, node) in plain {
            map.insert(NodeId(id), node);
        }
        Ok(map)
    }
}
