//! # tiling layout engine
//! A headless tiling layout engine: tabs, splits and panes arranged over a fixed-size screen
//! area, with a CSS-like box model, a two-level config surface, event subscription, and
//! MRU-aware navigation/resize/removal. Nothing here draws anything — the crate computes where
//! every pane sits; a UI layer renders it.
//!
//! ## Overview
//! The fundamental unit is the node, one of a tab container, a tab, a split container, or a pane
//! (a leaf holding the caller's opaque `Data`). Nodes are stored in an arena ([`Tiles`]) and
//! addressed by [`NodeId`], never by direct reference. The entire state lives in a single
//! [`Tree`] struct: an arena, a root id, a [`Config`], and an MRU sequence used to break focus
//! ties during navigation and removal.
//!
//! ## Example
//! ```
//! use tiletree::{Axis, Tree};
//!
//! let mut tree: Tree<String> = Tree::new(800, 600, None).unwrap();
//! let first = tree.tab("left".to_string(), None, false, None).unwrap();
//! let second = tree.split(first, Axis::X, Some(0.5), true, "right".to_string()).unwrap();
//! assert_eq!(tree.right(first, false), second);
//! ```
//!
//! ## Shortcomings
//! The implementation is recursive, so if your trees get too deep you will get a stack overflow.

#![forbid(unsafe_code)]

mod arena;
mod config;
mod error;
mod events;
mod geometry;
mod id;
mod layout;
mod node;
mod prune;
mod tree;

pub use arena::Tiles;
pub use config::{Config, ConfigKey, ConfigValue, HideWhen, TabWidth};
pub use error::{TreeError, TreeResult};
pub use events::{SubscriptionId, TreeEvent};
pub use geometry::{Axis, BoxGeom, Direction, Perimeter, Rect};
pub use id::NodeId;
pub use node::{Node, NodeKind, PaneNode, SplitContainerNode, TabContainerNode, TabNode};
pub use tree::Tree;
