//! Post-removal pruning: the four-row table that collapses a node now left as a sole child back
//! into canonical form.
//!
//! Grounded directly on `original_source`'s `core/tree.py` (`_prunable_chains`,
//! `_is_prunable_chain`, `_do_post_removal_pruning`): a single check against `(n1, n2, n3) =
//! (node.parent.parent, node.parent, node)`, applied once, not re-checked recursively further up
//! after a splice — the original doesn't loop either, and nothing in the four patterns can create
//! a *new* sole-child situation one level further up (n1 always keeps at least one other child
//! besides whatever n3 contributed, since n2 was never n1's only child to begin with — if it had
//! been, the branch-identification walk in `remove` would already have walked past it).

use crate::arena::Tiles;
use crate::id::NodeId;
use crate::node::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    TabContainer,
    Tab,
    SplitContainer,
    Pane,
}

fn tag<Data>(tiles: &Tiles<Data>, id: NodeId) -> Option<Tag> {
    tiles.get(id).map(|node| match node.kind {
        NodeKind::TabContainer(_) => Tag::TabContainer,
        NodeKind::Tab(_) => Tag::Tab,
        NodeKind::SplitContainer(_) => Tag::SplitContainer,
        NodeKind::Pane(_) => Tag::Pane,
    })
}

/// If `n3` is now a sole child whose `(n1, n2, n3)` ancestor chain matches one of the four
/// prunable patterns, applies the corresponding collapse and returns the ids of every node that
/// got deleted (for the caller to fold into its `node_removed` event payload). Returns an empty
/// list if nothing was prunable.
pub(crate) fn maybe_prune<Data>(tiles: &mut Tiles<Data>, n3: NodeId) -> Vec<NodeId> {
    let Some(n2) = tiles.parent_of(n3) else { return Vec::new() };
    if tiles.children_of(n2).len() != 1 {
        return Vec::new();
    }
    let Some(n1) = tiles.parent_of(n2) else { return Vec::new() };

    let (Some(tag1), Some(tag2), Some(tag3)) = (tag(tiles, n1), tag(tiles, n2), tag(tiles, n3)) else {
        return Vec::new();
    };

    let prunable = matches!(
        (tag1, tag2, tag3),
        (Tag::SplitContainer, Tag::SplitContainer, Tag::Pane)
            | (Tag::Tab, Tag::SplitContainer, Tag::SplitContainer)
            | (Tag::SplitContainer, Tag::SplitContainer, Tag::SplitContainer)
            | (Tag::SplitContainer, Tag::SplitContainer, Tag::TabContainer)
    );
    if !prunable {
        return Vec::new();
    }

    let index = tiles.index_in_parent(n2).expect("n2 must have an index under n1 to be prunable");
    tiles.remove_child(n1, n2);

    if tag1 == Tag::SplitContainer && tag3 == Tag::SplitContainer {
        // n3 is itself spliced away: only n1 remains, absorbing n3's children in place.
        let grandchildren: Vec<NodeId> = tiles.children_of(n3).to_vec();
        for (offset, grandchild) in grandchildren.into_iter().enumerate() {
            tiles.set_parent(grandchild, Some(n1));
            tiles.insert_child_at(n1, index + offset, grandchild);
        }
        tiles.remove_node(n3);
        tiles.remove_node(n2);
        vec![n2, n3]
    } else {
        tiles.set_parent(n3, Some(n1));
        tiles.insert_child_at(n1, index, n3);
        tiles.remove_node(n2);
        vec![n2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, BoxGeom};
    use crate::node::{PaneNode, SplitContainerNode, TabContainerNode, TabNode};

    fn pane(tiles: &mut Tiles<()>, parent: NodeId) -> NodeId {
        tiles.insert_pane(parent, PaneNode { box_: BoxGeom::default(), mru: 0, data: () })
    }

    #[test]
    fn sc_sc_p_collapses_n2_away() {
        let mut tiles = Tiles::<()>::default();
        let outer = tiles.insert_split_container(
            tiles.insert_tab_container(None, TabContainerNode::new(BoxGeom::default())),
            SplitContainerNode::new(Axis::X),
        );
        let sibling = pane(&mut tiles, outer);
        let inner = tiles.insert_split_container(outer, SplitContainerNode::new(Axis::Y));
        let leaf = pane(&mut tiles, inner);
        tiles.push_child(outer, sibling);
        tiles.push_child(outer, inner);
        tiles.push_child(inner, leaf);

        let removed = maybe_prune(&mut tiles, leaf);
        assert_eq!(removed, vec![inner]);
        assert_eq!(tiles.children_of(outer), &[sibling, leaf]);
        assert_eq!(tiles.parent_of(leaf), Some(outer));
        assert!(!tiles.contains(inner));
    }

    #[test]
    fn sc_sc_sc_splices_grandchildren_into_n1() {
        let mut tiles = Tiles::<()>::default();
        let outer = tiles.insert_split_container(
            tiles.insert_tab_container(None, TabContainerNode::new(BoxGeom::default())),
            SplitContainerNode::new(Axis::X),
        );
        let sibling = pane(&mut tiles, outer);
        let middle = tiles.insert_split_container(outer, SplitContainerNode::new(Axis::Y));
        let inner = tiles.insert_split_container(middle, SplitContainerNode::new(Axis::X));
        let leaf_a = pane(&mut tiles, inner);
        let leaf_b = pane(&mut tiles, inner);
        tiles.push_child(outer, sibling);
        tiles.push_child(outer, middle);
        tiles.push_child(middle, inner);
        tiles.push_child(inner, leaf_a);
        tiles.push_child(inner, leaf_b);

        let removed = maybe_prune(&mut tiles, inner);
        assert_eq!(removed, vec![middle, inner]);
        assert_eq!(tiles.children_of(outer), &[sibling, leaf_a, leaf_b]);
        assert_eq!(tiles.parent_of(leaf_a), Some(outer));
        assert_eq!(tiles.parent_of(leaf_b), Some(outer));
    }

    #[test]
    fn t_sc_tc_does_not_prune() {
        let mut tiles = Tiles::<()>::default();
        let tc = tiles.insert_tab_container(None, TabContainerNode::new(BoxGeom::default()));
        let t = tiles.insert_tab(tc, TabNode { child: NodeId(0), title: "1".into() });
        let sc = tiles.insert_split_container(t, SplitContainerNode::new(Axis::X));
        tiles.get_mut(t).unwrap().as_tab_mut().unwrap().child = sc;
        tiles.push_child(tc, t);
        let nested_tc = tiles.insert_tab_container(sc.into(), TabContainerNode::new(BoxGeom::default()));
        tiles.push_child(sc, nested_tc);

        let removed = maybe_prune(&mut tiles, nested_tc);
        assert!(removed.is_empty());
    }
}
