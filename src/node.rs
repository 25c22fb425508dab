//! The tagged-variant node type: `TabContainer | Tab | SplitContainer | Pane`.
//!
//! Nodes never hold direct references to each other; every link (`parent`, a container's
//! children, a `TabContainer`'s `active_child`) is a [`NodeId`] resolved through the owning
//! [`Tiles`](crate::arena::Tiles) arena. This sidesteps the cyclic parent/child ownership that a
//! directly-referencing tree would need `Rc`/`RefCell` or unsafe code to express.

use crate::geometry::{Axis, BoxGeom};
use crate::id::NodeId;

/// A single node in the tree, tagged by [`NodeKind`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "Data: serde::Serialize", deserialize = "Data: serde::de::DeserializeOwned")))]
pub struct Node<Data> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: NodeKind<Data>,
}

impl<Data> Node<Data> {
    /// The kind-short used by the stable repr format: `tc`, `t`, `sc.x`/`sc.y`, `p`.
    pub fn kind_short(&self) -> String {
        match &self.kind {
            NodeKind::TabContainer(_) => "tc".to_owned(),
            NodeKind::Tab(_) => "t".to_owned(),
            NodeKind::SplitContainer(sc) => format!("sc.{}", sc.axis),
            NodeKind::Pane(_) => "p".to_owned(),
        }
    }

    /// This node's children, in order. Empty for a [`NodeKind::Pane`].
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::TabContainer(tc) => &tc.children,
            NodeKind::Tab(t) => std::slice::from_ref(&t.child),
            NodeKind::SplitContainer(sc) => &sc.children,
            NodeKind::Pane(_) => &[],
        }
    }

    pub fn is_pane(&self) -> bool {
        matches!(self.kind, NodeKind::Pane(_))
    }

    pub fn is_tab(&self) -> bool {
        matches!(self.kind, NodeKind::Tab(_))
    }

    pub fn is_tab_container(&self) -> bool {
        matches!(self.kind, NodeKind::TabContainer(_))
    }

    pub fn is_split_container(&self) -> bool {
        matches!(self.kind, NodeKind::SplitContainer(_))
    }

    pub fn as_pane(&self) -> Option<&PaneNode<Data>> {
        match &self.kind {
            NodeKind::Pane(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pane_mut(&mut self) -> Option<&mut PaneNode<Data>> {
        match &mut self.kind {
            NodeKind::Pane(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_split_container(&self) -> Option<&SplitContainerNode> {
        match &self.kind {
            NodeKind::SplitContainer(sc) => Some(sc),
            _ => None,
        }
    }

    pub fn as_split_container_mut(&mut self) -> Option<&mut SplitContainerNode> {
        match &mut self.kind {
            NodeKind::SplitContainer(sc) => Some(sc),
            _ => None,
        }
    }

    pub fn as_tab_container(&self) -> Option<&TabContainerNode> {
        match &self.kind {
            NodeKind::TabContainer(tc) => Some(tc),
            _ => None,
        }
    }

    pub fn as_tab_container_mut(&mut self) -> Option<&mut TabContainerNode> {
        match &mut self.kind {
            NodeKind::TabContainer(tc) => Some(tc),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<&TabNode> {
        match &self.kind {
            NodeKind::Tab(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut TabNode> {
        match &mut self.kind {
            NodeKind::Tab(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "Data: serde::Serialize", deserialize = "Data: serde::de::DeserializeOwned")))]
pub enum NodeKind<Data> {
    TabContainer(TabContainerNode),
    Tab(TabNode),
    SplitContainer(SplitContainerNode),
    Pane(PaneNode<Data>),
}

/// Owns a tab bar rectangle and an ordered list of [`TabNode`] children, exactly one of which is
/// active at a time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabContainerNode {
    pub children: Vec<NodeId>,
    pub active_child: Option<NodeId>,
    pub tab_bar: BoxGeom,
}

impl TabContainerNode {
    pub(crate) fn new(tab_bar: BoxGeom) -> TabContainerNode {
        TabContainerNode { children: Vec::new(), active_child: None, tab_bar }
    }
}

/// A single tab slot under a [`TabContainerNode`]: a title and exactly one
/// [`SplitContainerNode`] child.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabNode {
    pub child: NodeId,
    pub title: String,
}

/// Arranges its children end-to-end along `axis`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitContainerNode {
    pub children: Vec<NodeId>,
    pub axis: Axis,
}

impl SplitContainerNode {
    pub(crate) fn new(axis: Axis) -> SplitContainerNode {
        SplitContainerNode { children: Vec::new(), axis }
    }
}

/// A leaf: a geometry box, an MRU counter, and an opaque caller-supplied payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "Data: serde::Serialize", deserialize = "Data: serde::de::DeserializeOwned")))]
pub struct PaneNode<Data> {
    pub box_: BoxGeom,
    pub mru: u64,
    pub data: Data,
}
