//! `Tree<Data>`: the public surface tying the arena, config, events, layout math and pruning
//! table together into the tab/split/remove/resize/navigation operations.

use std::fmt;

use crate::arena::Tiles;
use crate::config::{self, Config, ConfigKey, ConfigValue};
use crate::error::{invalid_tree_structure, TreeError, TreeResult};
use crate::events::{EventBus, SubscriptionId, TreeEvent};
use crate::geometry::{Axis, BoxGeom, Direction, Rect};
use crate::id::{NodeId, Sequence};
use crate::layout;
use crate::node::{NodeKind, PaneNode, SplitContainerNode, TabContainerNode, TabNode};
use crate::prune;

/// A tiling layout tree: tabs, splits and panes over a fixed `(width, height)` screen area.
///
/// Generic over `Data`, an opaque payload attached to every pane (a window handle, a title, a
/// terminal session — whatever the collaborator needs). The tree never inspects `Data`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "Data: serde::Serialize", deserialize = "Data: serde::de::DeserializeOwned")))]
pub struct Tree<Data> {
    tiles: Tiles<Data>,
    root: Option<NodeId>,
    config: Config,
    width: i32,
    height: i32,
    mru: Sequence,
    #[cfg_attr(feature = "serde", serde(skip))]
    events: EventBus<Data>,
}

impl<Data: PartialEq> PartialEq for Tree<Data> {
    /// Ignores `events`: subscriber closures aren't comparable and aren't part of a tree's
    /// persisted state (they're `#[serde(skip)]`'d for the same reason).
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
            && self.root == other.root
            && self.config == other.config
            && self.width == other.width
            && self.height == other.height
            && self.mru == other.mru
    }
}

impl<Data> Tree<Data> {
    pub fn new(width: i32, height: i32, config: Option<Config>) -> TreeResult<Tree<Data>> {
        if width <= 0 || height <= 0 {
            return Err(TreeError::NonPositiveDimension { width, height });
        }
        Ok(Tree {
            tiles: Tiles::default(),
            root: None,
            config: config.unwrap_or_default(),
            width,
            height,
            mru: Sequence::default(),
            events: EventBus::default(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn tiles(&self) -> &Tiles<Data> {
        &self.tiles
    }

    pub fn subscribe(&mut self, event: TreeEvent, callback: impl FnMut(&[NodeId]) + 'static) -> SubscriptionId {
        self.events.subscribe(event, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    pub fn set_config(&mut self, key: ConfigKey, value: ConfigValue, level: Option<i32>) -> TreeResult<()> {
        self.config.set(key, value, level)
    }

    /// Looks up `key`, trying `(key, level)` then `(key, None)`; if neither is set, returns the
    /// built-in default only when `fall_back_to_default` is true, else `None`.
    pub fn get_config(&self, key: ConfigKey, level: Option<i32>, fall_back_to_default: bool) -> Option<ConfigValue> {
        if let Some(level) = level {
            if let Some(value) = self.config.find(key, Some(level)) {
                return Some(value);
            }
        }
        if let Some(value) = self.config.find(key, None) {
            return Some(value);
        }
        fall_back_to_default.then(|| config::default_for(key))
    }

    fn next_mru(&mut self) -> u64 {
        self.mru.next()
    }

    fn pane_box(&self, rect: Rect, level: i32) -> BoxGeom {
        let margin = self.config.get(ConfigKey::WindowMargin, Some(level)).as_perimeter().unwrap_or_default();
        let border = self.config.get(ConfigKey::WindowBorderSize, Some(level)).as_perimeter().unwrap_or_default();
        let padding = self.config.get(ConfigKey::WindowPadding, Some(level)).as_perimeter().unwrap_or_default();
        BoxGeom::new(margin, border, padding, rect)
    }

    fn tab_bar_box(&self, rect: Rect, level: i32) -> BoxGeom {
        let margin = self.config.get(ConfigKey::TabBarMargin, Some(level)).as_perimeter().unwrap_or_default();
        let border = self.config.get(ConfigKey::TabBarBorderSize, Some(level)).as_perimeter().unwrap_or_default();
        let padding = self.config.get(ConfigKey::TabBarPadding, Some(level)).as_perimeter().unwrap_or_default();
        BoxGeom::new(margin, border, padding, rect)
    }

    // ---- construction -----------------------------------------------------------------------

    fn validate_tab_args(&self, at_pane: Option<NodeId>, new_level: bool, level: Option<i32>) -> TreeResult<()> {
        if self.root.is_none() && at_pane.is_some() {
            return Err(TreeError::AtPaneOnEmptyTree);
        }
        if (new_level || level.is_some()) && at_pane.is_none() {
            return Err(TreeError::AncestorTargetWithoutAtPane);
        }
        if let Some(level) = level {
            if level < 1 {
                return Err(TreeError::LevelBelowOne { level });
            }
        }
        Ok(())
    }

    /// Creates a new tab and the pane inside it, returning the pane's id.
    pub fn tab(&mut self, data: Data, at_pane: Option<NodeId>, new_level: bool, level: Option<i32>) -> TreeResult<NodeId> {
        self.validate_tab_args(at_pane, new_level, level)?;

        if self.root.is_none() {
            return Ok(self.create_first_pane(data));
        }

        if new_level {
            let pane = at_pane.expect("validated above");
            return Ok(self.tab_new_level(pane, data));
        }

        let target_tc = match (at_pane, level) {
            (Some(pane), Some(level)) => self.tc_at_level(pane, level)?,
            (Some(pane), None) => match self.tiles.first_ancestor(pane, |n| n.is_tab_container()) {
                Some(tc) => tc,
                None => return Err(invalid_tree_structure(format!("pane {pane} has no ancestor tab container"))),
            },
            (None, _) => self.root.expect("checked above"),
        };
        Ok(self.append_tab(target_tc, data))
    }

    fn tc_at_level(&self, pane: NodeId, level: i32) -> TreeResult<NodeId> {
        let from_root: Vec<NodeId> = self
            .tiles
            .ancestors(pane, false)
            .into_iter()
            .filter(|id| self.tiles.get(*id).is_some_and(|n| n.is_tab_container()))
            .rev()
            .collect();
        let available = from_root.len() as i32;
        if level > available {
            return Err(TreeError::LevelExceedsAncestors { level, available });
        }
        Ok(from_root[(level - 1) as usize])
    }

    fn create_first_pane(&mut self, data: Data) -> NodeId {
        let bar_height = self.config.tab_bar_height(Some(1));
        let bar_rect = Rect::new(0, 0, self.width, bar_height);
        let bar_box = self.tab_bar_box(bar_rect, 1);
        let tc = self.tiles.insert_tab_container(None, TabContainerNode::new(bar_box));
        self.root = Some(tc);

        let t = self.tiles.insert_tab(tc, TabNode { child: NodeId(0), title: "1".into() });
        let sc = self.tiles.insert_split_container(t, SplitContainerNode::new(Axis::X));
        self.tiles.get_mut(t).unwrap().as_tab_mut().unwrap().child = sc;

        let inner = Rect::new(0, bar_height, self.width, self.height - bar_height);
        let mru = self.next_mru();
        let pane_box_ = self.pane_box(inner, 1);
        let p = self.tiles.insert_pane(sc, PaneNode { box_: pane_box_, mru, data });

        self.tiles.push_child(tc, t);
        self.tiles.push_child(sc, p);
        self.tiles.get_mut(tc).unwrap().as_tab_container_mut().unwrap().active_child = Some(t);

        self.events.publish(TreeEvent::NodeAdded, &[tc, t, sc, p]);
        log::debug!("created root tab container {tc} with first pane {p}");
        p
    }

    fn append_tab(&mut self, tc: NodeId, data: Data) -> NodeId {
        let level = layout::tc_level(&self.tiles, tc);
        let title = (self.tiles.children_of(tc).len() + 1).to_string();

        let t = self.tiles.insert_tab(tc, TabNode { child: NodeId(0), title });
        let sc = self.tiles.insert_split_container(t, SplitContainerNode::new(Axis::X));
        self.tiles.get_mut(t).unwrap().as_tab_mut().unwrap().child = sc;

        let existing_tab = *self.tiles.children_of(tc).first().expect("a TabContainer always holds at least one tab");
        let rect = layout::rect_of(&self.tiles, existing_tab);
        let mru = self.next_mru();
        let pane_box_ = self.pane_box(rect, level);
        let p = self.tiles.insert_pane(sc, PaneNode { box_: pane_box_, mru, data });

        self.tiles.push_child(tc, t);
        self.tiles.push_child(sc, p);
        self.tiles.get_mut(tc).unwrap().as_tab_container_mut().unwrap().active_child = Some(t);

        self.events.publish(TreeEvent::NodeAdded, &[t, sc, p]);
        log::debug!("added tab {t} to tab container {tc}");
        p
    }

    fn tab_new_level(&mut self, pane: NodeId, data: Data) -> NodeId {
        let parent_sc = self.tiles.parent_of(pane).expect("a pane always has an SC parent");
        let index = self.tiles.index_in_parent(pane).expect("pane must be indexed under its parent");
        let old_rect = layout::rect_of(&self.tiles, pane);
        let new_level = layout::pane_level(&self.tiles, pane) + 1;
        let bar_height = self.config.tab_bar_height(Some(new_level));
        let bar_rect = Rect::new(old_rect.x, old_rect.y, old_rect.w, bar_height);
        let inner_rect = Rect::new(old_rect.x, old_rect.y + bar_height, old_rect.w, old_rect.h - bar_height);
        let bar_box = self.tab_bar_box(bar_rect, new_level);

        self.tiles.remove_child(parent_sc, pane);
        let new_tc = self.tiles.insert_tab_container(Some(parent_sc), TabContainerNode::new(bar_box));
        self.tiles.insert_child_at(parent_sc, index, new_tc);

        let t1 = self.tiles.insert_tab(new_tc, TabNode { child: NodeId(0), title: "1".into() });
        let sc1 = self.tiles.insert_split_container(t1, SplitContainerNode::new(Axis::X));
        self.tiles.get_mut(t1).unwrap().as_tab_mut().unwrap().child = sc1;
        self.tiles.set_parent(pane, Some(sc1));
        self.tiles.push_child(sc1, pane);
        self.tiles.push_child(new_tc, t1);

        let t2 = self.tiles.insert_tab(new_tc, TabNode { child: NodeId(0), title: "2".into() });
        let sc2 = self.tiles.insert_split_container(t2, SplitContainerNode::new(Axis::X));
        self.tiles.get_mut(t2).unwrap().as_tab_mut().unwrap().child = sc2;
        let mru = self.next_mru();
        let pane_box_ = self.pane_box(inner_rect, new_level);
        let p2 = self.tiles.insert_pane(sc2, PaneNode { box_: pane_box_, mru, data });
        self.tiles.push_child(sc2, p2);
        self.tiles.push_child(new_tc, t2);

        self.tiles.get_mut(new_tc).unwrap().as_tab_container_mut().unwrap().active_child = Some(t2);

        self.events.publish(TreeEvent::NodeAdded, &[new_tc, t1, sc1, t2, sc2, p2]);
        log::debug!("wrapped pane {pane} under new nested tab container {new_tc}");
        p2
    }

    /// Splits `pane` along `axis`, returning the new pane.
    pub fn split(&mut self, pane: NodeId, axis: Axis, ratio: Option<f64>, normalize: bool, data: Data) -> TreeResult<NodeId> {
        let ratio = ratio.unwrap_or(0.5);
        if !(0.0..=1.0).contains(&ratio) {
            return Err(TreeError::RatioOutOfRange { ratio });
        }

        let sc = self.tiles.parent_of(pane).expect("a pane always has an SC parent");
        let nested_under_tc = self.tiles.parent_of(sc).is_some_and(|gp| self.tiles.get(gp).is_some_and(|n| n.is_tab()));
        if nested_under_tc && self.tiles.children_of(sc).len() == 1 {
            self.tiles.get_mut(sc).unwrap().as_split_container_mut().unwrap().axis = axis;
        }
        let sc_axis = self.tiles.get(sc).unwrap().as_split_container().unwrap().axis;
        let level = layout::pane_level(&self.tiles, pane);
        let old_rect = layout::rect_of(&self.tiles, pane);
        let (r1, r2) = old_rect.split(axis, ratio);
        let mru = self.next_mru();

        let new_pane = if sc_axis == axis {
            self.tiles.get_mut(pane).unwrap().as_pane_mut().unwrap().box_.set_principal_rect(r1);
            let box_ = self.pane_box(r2, level);
            let p = self.tiles.insert_pane(sc, PaneNode { box_, mru, data });
            let index = self.tiles.index_in_parent(pane).unwrap() + 1;
            self.tiles.insert_child_at(sc, index, p);
            self.events.publish(TreeEvent::NodeAdded, &[p]);
            p
        } else {
            let index = self.tiles.index_in_parent(pane).unwrap();
            self.tiles.remove_child(sc, pane);
            let sc_new = self.tiles.insert_split_container(sc, SplitContainerNode::new(axis));
            self.tiles.insert_child_at(sc, index, sc_new);
            self.tiles.set_parent(pane, Some(sc_new));
            self.tiles.push_child(sc_new, pane);
            self.tiles.get_mut(pane).unwrap().as_pane_mut().unwrap().box_.set_principal_rect(r1);
            let box_ = self.pane_box(r2, level);
            let p = self.tiles.insert_pane(sc_new, PaneNode { box_, mru, data });
            self.tiles.push_child(sc_new, p);
            self.events.publish(TreeEvent::NodeAdded, &[sc_new, p]);
            p
        };

        if normalize {
            let container = self.tiles.parent_of(new_pane).unwrap();
            let container_axis = self.tiles.get(container).unwrap().as_split_container().unwrap().axis;
            self.normalize_along(container, container_axis);
        }

        log::debug!("split pane {pane} along {axis} into {new_pane}");
        Ok(new_pane)
    }

    /// Equalizes every child of `parent` along `axis`, preserving their order and the container's
    /// own start coordinate. Implemented as a sequence of [`layout::grow`]/[`layout::shrink`]
    /// calls rather than direct rect surgery, so the same box-model and min-size clamping the
    /// resize path uses applies here too.
    fn normalize_along(&mut self, parent: NodeId, axis: Axis) {
        let children = self.tiles.children_of(parent).to_vec();
        if children.is_empty() {
            return;
        }
        let start = layout::rect_of(&self.tiles, children[0]).coord(axis);
        let n = children.len() as i32;
        let total: i32 = children.iter().map(|c| layout::rect_of(&self.tiles, *c).dim(axis)).sum();
        let mut remaining = total;
        let mut s = start;
        for (i, child) in children.iter().enumerate() {
            let target = if i as i32 + 1 == n { remaining } else { total / n };
            remaining -= target;
            let current = layout::rect_of(&self.tiles, *child).dim(axis);
            let delta = target - current;
            match delta.cmp(&0) {
                std::cmp::Ordering::Greater => layout::grow(&mut self.tiles, &self.config, *child, axis, delta, s),
                std::cmp::Ordering::Less => layout::shrink(&mut self.tiles, &self.config, *child, axis, -delta, s),
                std::cmp::Ordering::Equal => {}
            }
            s += target;
        }
    }

    // ---- removal ------------------------------------------------------------------------------

    /// Removes `pane`, returning the pane that should receive focus next (`None` if the tree is
    /// now empty). Removing an id not present in the tree is a caller bug, not a validated
    /// failure mode — see the error-handling design's treatment of `remove`.
    pub fn remove(&mut self, pane: NodeId, normalize: bool) -> Option<NodeId> {
        let mut branch_root = pane;
        loop {
            match self.tiles.parent_of(branch_root) {
                None => break,
                Some(parent) if self.tiles.children_of(parent).len() == 1 => branch_root = parent,
                Some(_) => break,
            }
        }

        if Some(branch_root) == self.root {
            let removed = self.tiles.remove_subtree(branch_root);
            self.root = None;
            let ids: Vec<NodeId> = removed.iter().map(|n| n.id).collect();
            self.events.publish(TreeEvent::NodeRemoved, &ids);
            log::debug!("removed the entire tree (root was {branch_root})");
            return None;
        }

        let c = self.tiles.parent_of(branch_root).expect("a non-root branch root always has a parent");
        let c_is_split_container = self.tiles.get(c).unwrap().is_split_container();
        let s = self.tiles.operational_sibling(branch_root).expect("a non-root branch root always has a sibling");
        let freed_rect = layout::rect_of(&self.tiles, branch_root);
        let old_index = self.tiles.children_of(c).iter().position(|child| *child == branch_root);

        let removed = self.tiles.remove_subtree(branch_root);

        if c_is_split_container {
            let c_axis = self.tiles.get(c).unwrap().as_split_container().unwrap().axis;
            if normalize {
                self.normalize_along(c, c_axis);
            } else {
                let s_rect = layout::rect_of(&self.tiles, s);
                let start_pos = freed_rect.coord(c_axis).min(s_rect.coord(c_axis));
                layout::grow(&mut self.tiles, &self.config, s, c_axis, freed_rect.dim(c_axis), start_pos);
            }
        } else {
            let remaining_len = self.tiles.children_of(c).len();
            let index = old_index.expect("branch_root was a child of c before removal") % remaining_len;
            let new_active = self.tiles.children_of(c)[index];
            self.tiles.get_mut(c).unwrap().as_tab_container_mut().unwrap().active_child = Some(new_active);
        }

        let n1 = self.tiles.parent_of(c);
        let pruned = prune::maybe_prune(&mut self.tiles, s);
        let walk_start =
            if self.tiles.contains(s) { s } else { n1.expect("a prune that deletes the operational sibling always has a grandparent") };

        let mut removed_ids: Vec<NodeId> = removed.iter().map(|n| n.id).collect();
        removed_ids.extend(pruned);
        self.events.publish(TreeEvent::NodeRemoved, &removed_ids);

        let next_focus = self.mru_highest_visible(walk_start);
        log::debug!("removed pane {pane}, next focus is {next_focus}");
        Some(next_focus)
    }

    fn collect_visible_panes(&self, start: NodeId, out: &mut Vec<NodeId>) {
        match &self.tiles.get(start).expect("collect_visible_panes: unknown node").kind {
            NodeKind::Pane(_) => out.push(start),
            NodeKind::Tab(t) => self.collect_visible_panes(t.child, out),
            NodeKind::SplitContainer(sc) => {
                for c in &sc.children {
                    self.collect_visible_panes(*c, out);
                }
            }
            NodeKind::TabContainer(tc) => {
                if let Some(active) = tc.active_child {
                    self.collect_visible_panes(active, out);
                }
            }
        }
    }

    fn mru_highest_visible(&self, start: NodeId) -> NodeId {
        let mut panes = Vec::new();
        self.collect_visible_panes(start, &mut panes);
        panes
            .into_iter()
            .max_by_key(|p| self.tiles.get(*p).unwrap().as_pane().unwrap().mru)
            .expect("a subtree reachable through active tabs always contains at least one pane")
    }

    // ---- resize -------------------------------------------------------------------------------

    /// Grows (`amount_px > 0`) or shrinks `pane` along `axis`, bounded by available shrink
    /// capacity on the losing side. A no-op if there is no valid super-node/sibling pair or the
    /// losing side has no shrinkability left.
    pub fn resize(&mut self, pane: NodeId, axis: Axis, amount_px: i32) {
        if amount_px == 0 {
            return;
        }
        let Some(n) = self.super_node_for_resize(pane, axis) else { return };
        let Some(n_prime) = self.tiles.operational_sibling(n) else { return };

        let shrink_target = if amount_px > 0 { n_prime } else { n };
        let br_shrink = layout::shrinkability(&self.tiles, &self.config, shrink_target, axis);
        let actual = amount_px.abs().min(br_shrink.max(0));
        if actual == 0 {
            return;
        }

        let n_rect = layout::rect_of(&self.tiles, n);
        let s = n_rect.coord(axis);
        let e = n_rect.coord2(axis);
        if amount_px > 0 {
            layout::grow(&mut self.tiles, &self.config, n, axis, actual, s);
            layout::shrink(&mut self.tiles, &self.config, n_prime, axis, actual, e + actual);
        } else {
            layout::shrink(&mut self.tiles, &self.config, n, axis, actual, s);
            layout::grow(&mut self.tiles, &self.config, n_prime, axis, actual, e - actual);
        }
        log::debug!("resized pane {pane} axis {axis} by {amount_px}px (actual {actual}px)");
    }

    /// Walks up from `pane`, skipping any ancestor that is a sole child nested directly under a
    /// Tab (which is treated as part of its containing `TabContainer`'s resize unit, not resized
    /// independently — see the design note on the nested-under-TC resize skip).
    fn super_node_for_resize(&self, pane: NodeId, axis: Axis) -> Option<NodeId> {
        let mut candidate = pane;
        loop {
            let parent = self.tiles.parent_of(candidate)?;
            if let Some(sc) = self.tiles.get(parent).and_then(|n| n.as_split_container()) {
                if sc.axis == axis {
                    let sole_nested_under_tc = sc.children.len() == 1
                        && self.tiles.parent_of(parent).is_some_and(|gp| self.tiles.get(gp).is_some_and(|n| n.is_tab()));
                    if !sole_nested_under_tc {
                        return Some(candidate);
                    }
                    let tab = self.tiles.parent_of(parent)?;
                    let tc = self.tiles.parent_of(tab)?;
                    candidate = tc;
                    continue;
                }
            }
            candidate = parent;
        }
    }

    // ---- navigation ---------------------------------------------------------------------------

    pub fn left(&self, pane: NodeId, wrap: bool) -> NodeId {
        self.navigate(pane, Direction::Left, wrap)
    }

    pub fn right(&self, pane: NodeId, wrap: bool) -> NodeId {
        self.navigate(pane, Direction::Right, wrap)
    }

    pub fn up(&self, pane: NodeId, wrap: bool) -> NodeId {
        self.navigate(pane, Direction::Up, wrap)
    }

    pub fn down(&self, pane: NodeId, wrap: bool) -> NodeId {
        self.navigate(pane, Direction::Down, wrap)
    }

    fn navigate(&self, pane: NodeId, direction: Direction, wrap: bool) -> NodeId {
        let Some(n) = self.oriented_super_node(pane, direction, wrap) else { return pane };
        let Some(s) = self.tiles.sibling(n, direction.axis_unit(), wrap) else { return pane };

        let mut candidates = Vec::new();
        self.border_sweep(s, direction, &mut candidates);

        let pane_rect = layout::rect_of(&self.tiles, pane);
        let inv = direction.axis().inv();
        candidates
            .into_iter()
            .filter(|c| layout::rect_of(&self.tiles, *c).overlaps_on(inv, &pane_rect))
            .max_by_key(|c| self.tiles.get(*c).unwrap().as_pane().unwrap().mru)
            .unwrap_or(pane)
    }

    /// The first ancestor whose parent SC matches `direction.axis()` and isn't the edge child in
    /// the direction of travel; if none, and `wrap` is set, falls back to the nearest such
    /// ancestor even if it is an edge child (so the caller can wrap around it).
    fn oriented_super_node(&self, pane: NodeId, direction: Direction, wrap: bool) -> Option<NodeId> {
        let axis = direction.axis();
        let unit = direction.axis_unit();
        let mut candidate = pane;
        let mut edge_fallback = None;
        loop {
            let Some(parent) = self.tiles.parent_of(candidate) else { break };
            if let Some(sc) = self.tiles.get(parent).and_then(|n| n.as_split_container()) {
                if sc.axis == axis {
                    let idx = sc.children.iter().position(|c| *c == candidate).expect("candidate must be a child of its parent");
                    let is_edge = if unit > 0 { idx + 1 == sc.children.len() } else { idx == 0 };
                    if !is_edge {
                        return Some(candidate);
                    }
                    edge_fallback.get_or_insert(candidate);
                }
            }
            candidate = parent;
        }
        if wrap {
            edge_fallback
        } else {
            None
        }
    }

    /// Collects the panes along `node`'s border facing back toward the pane that's navigating,
    /// per the border-sweep rules: a Pane is itself the sole candidate, a TC recurses into its
    /// active tab, an SC along the travel axis recurses into its near edge child, and an SC
    /// against the travel axis recurses into every child.
    fn border_sweep(&self, node: NodeId, direction: Direction, out: &mut Vec<NodeId>) {
        let axis = direction.axis();
        let unit = direction.axis_unit();
        match &self.tiles.get(node).expect("border_sweep: unknown node").kind {
            NodeKind::Pane(_) => out.push(node),
            NodeKind::Tab(t) => self.border_sweep(t.child, direction, out),
            NodeKind::TabContainer(tc) => {
                if let Some(active) = tc.active_child {
                    self.border_sweep(active, direction, out);
                }
            }
            NodeKind::SplitContainer(sc) => {
                if sc.axis == axis {
                    let edge_child = if unit > 0 { sc.children.first() } else { sc.children.last() };
                    if let Some(c) = edge_child {
                        self.border_sweep(*c, direction, out);
                    }
                } else {
                    for c in &sc.children {
                        self.border_sweep(*c, direction, out);
                    }
                }
            }
        }
    }

    pub fn next_tab(&self, node: NodeId, wrap: bool) -> Option<NodeId> {
        self.adjacent_tab(node, 1, wrap)
    }

    pub fn prev_tab(&self, node: NodeId, wrap: bool) -> Option<NodeId> {
        self.adjacent_tab(node, -1, wrap)
    }

    fn adjacent_tab(&self, node: NodeId, offset: i32, wrap: bool) -> Option<NodeId> {
        let t = if self.tiles.get(node).is_some_and(|n| n.is_tab()) {
            node
        } else {
            self.tiles.first_ancestor(node, |n| n.is_tab())?
        };
        let sibling_tab = self.tiles.sibling(t, offset, wrap)?;
        Some(self.mru_highest_visible(sibling_tab))
    }

    /// Walks up the ancestor chain from `pane`, setting every traversed Tab as its parent
    /// TabContainer's active child, then assigns `pane` a fresh MRU counter. The only write to
    /// `active_child` outside tab creation and removal.
    pub fn focus(&mut self, pane: NodeId) {
        for ancestor in self.tiles.ancestors(pane, false) {
            if self.tiles.get(ancestor).is_some_and(|n| n.is_tab()) {
                if let Some(tc) = self.tiles.parent_of(ancestor) {
                    if let Some(tc_node) = self.tiles.get_mut(tc).and_then(|n| n.as_tab_container_mut()) {
                        tc_node.active_child = Some(ancestor);
                    }
                }
            }
        }
        let mru = self.next_mru();
        if let Some(p) = self.tiles.get_mut(pane).and_then(|n| n.as_pane_mut()) {
            p.mru = mru;
        }
        log::debug!("focused pane {pane}, mru={mru}");
    }

    /// Grows or shrinks the root along each axis by the delta between the new and current
    /// dimensions, starting at coordinate 0. A no-op if `width`/`height` are unchanged.
    pub fn reset_dimensions(&mut self, width: i32, height: i32) {
        if width == self.width && height == self.height {
            return;
        }
        if let Some(root) = self.root {
            let dw = width - self.width;
            let dh = height - self.height;
            if dw > 0 {
                layout::grow(&mut self.tiles, &self.config, root, Axis::X, dw, 0);
            } else if dw < 0 {
                layout::shrink(&mut self.tiles, &self.config, root, Axis::X, -dw, 0);
            }
            if dh > 0 {
                layout::grow(&mut self.tiles, &self.config, root, Axis::Y, dh, 0);
            } else if dh < 0 {
                layout::shrink(&mut self.tiles, &self.config, root, Axis::Y, -dh, 0);
            }
        }
        self.width = width;
        self.height = height;
    }

    // ---- traversal ------------------------------------------------------------------------------

    /// Depth-first, root-first walk from `start` (defaulting to the tree root). When
    /// `only_visible`, a `TabContainer` only descends into its active tab.
    pub fn iter_walk(&self, start: Option<NodeId>, only_visible: bool) -> Vec<NodeId> {
        let Some(root) = start.or(self.root) else { return Vec::new() };
        let mut out = Vec::new();
        self.walk_collect(root, only_visible, &mut out);
        out
    }

    fn walk_collect(&self, id: NodeId, only_visible: bool, out: &mut Vec<NodeId>) {
        out.push(id);
        match &self.tiles.get(id).expect("walk_collect: unknown node").kind {
            NodeKind::TabContainer(tc) => {
                if only_visible {
                    if let Some(active) = tc.active_child {
                        self.walk_collect(active, only_visible, out);
                    }
                } else {
                    for c in &tc.children {
                        self.walk_collect(*c, only_visible, out);
                    }
                }
            }
            NodeKind::Tab(t) => self.walk_collect(t.child, only_visible, out),
            NodeKind::SplitContainer(sc) => {
                for c in &sc.children {
                    self.walk_collect(*c, only_visible, out);
                }
            }
            NodeKind::Pane(_) => {}
        }
    }

    pub fn iter_panes(&self, visible: bool, start: Option<NodeId>) -> Vec<NodeId> {
        self.iter_walk(start, visible).into_iter().filter(|id| self.tiles.get(*id).is_some_and(|n| n.is_pane())).collect()
    }

    fn repr_lines(&self, id: NodeId, depth: usize, out: &mut Vec<String>) {
        let node = self.tiles.get(id).expect("repr_lines: unknown node");
        let mut line = format!("{}- {}:{}", "    ".repeat(depth), node.kind_short(), id);
        if let Some(pane) = node.as_pane() {
            line.push_str(&format!(" | {}", pane.box_.principal_rect()));
        }
        out.push(line);
        match &node.kind {
            NodeKind::TabContainer(tc) => {
                for c in &tc.children {
                    self.repr_lines(*c, depth + 1, out);
                }
            }
            NodeKind::Tab(t) => self.repr_lines(t.child, depth + 1, out),
            NodeKind::SplitContainer(sc) => {
                for c in &sc.children {
                    self.repr_lines(*c, depth + 1, out);
                }
            }
            NodeKind::Pane(_) => {}
        }
    }
}

impl<Data> fmt::Display for Tree<Data> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else { return write!(f, "<empty>") };
        let mut lines = Vec::new();
        self.repr_lines(root, 0, &mut lines);
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Perimeter;

    fn repr(tree: &Tree<()>) -> String {
        format!("{tree}")
    }

    #[test]
    fn empty_tree_reprs_as_empty() {
        let tree = Tree::<()>::new(400, 300, None).unwrap();
        assert_eq!(repr(&tree), "<empty>");
    }

    #[test]
    fn nested_split_layout_matches_scenario_one() {
        let mut config = Config::default();
        config.set(ConfigKey::WindowMinSize, ConfigValue::Perimeter(Perimeter::uniform(10)), None).unwrap();
        config.set(ConfigKey::TabBarHeight, ConfigValue::Perimeter(Perimeter::uniform(20)), None).unwrap();
        let mut tree = Tree::<()>::new(400, 300, Some(config)).unwrap();

        let p1 = tree.tab((), None, false, None).unwrap();
        let p2 = tree.split(p1, Axis::X, None, false, ()).unwrap();
        let p3 = tree.split(p2, Axis::Y, None, false, ()).unwrap();
        let p4 = tree.split(p3, Axis::X, None, false, ()).unwrap();

        assert_eq!(layout::rect_of(&tree.tiles, p1), Rect::new(0, 20, 200, 280));
        assert_eq!(layout::rect_of(&tree.tiles, p2), Rect::new(200, 20, 200, 140));
        assert_eq!(layout::rect_of(&tree.tiles, p3), Rect::new(200, 160, 100, 140));
        assert_eq!(layout::rect_of(&tree.tiles, p4), Rect::new(300, 160, 100, 140));
    }

    #[test]
    fn remove_prunes_sc_sc_p_chain() {
        let mut tree = Tree::<()>::new(400, 300, None).unwrap();
        let p1 = tree.tab((), None, false, None).unwrap();
        let p2 = tree.split(p1, Axis::X, None, false, ()).unwrap();
        let p3 = tree.split(p2, Axis::Y, None, false, ()).unwrap();

        tree.remove(p3, false);

        let outer_sc = tree.tiles.parent_of(p1).unwrap();
        assert_eq!(tree.tiles.children_of(outer_sc), &[p1, p2]);
        assert_eq!(layout::rect_of(&tree.tiles, p2).w, 200);
    }

    #[test]
    fn wrap_behavior_on_right_navigation() {
        let mut tree = Tree::<()>::new(400, 300, None).unwrap();
        let p1 = tree.tab((), None, false, None).unwrap();
        let p2 = tree.split(p1, Axis::X, None, false, ()).unwrap();
        let p3 = tree.split(p2, Axis::X, None, false, ()).unwrap();

        assert_eq!(tree.right(p3, true), p1);
        assert_eq!(tree.right(p3, false), p3);
    }

    #[test]
    fn mru_tiebreak_picks_most_recently_focused() {
        let mut tree = Tree::<()>::new(400, 300, None).unwrap();
        let p1 = tree.tab((), None, false, None).unwrap();
        let p2 = tree.split(p1, Axis::X, None, false, ()).unwrap();
        let p3 = tree.split(p2, Axis::Y, None, false, ()).unwrap();
        let p4 = tree.split(p3, Axis::Y, None, false, ()).unwrap();
        let p5 = tree.split(p4, Axis::Y, None, false, ()).unwrap();

        tree.focus(p5);
        tree.focus(p3);
        tree.focus(p4);

        assert_eq!(tree.right(p1, false), p4);
    }

    #[test]
    fn nested_tab_container_survives_removal_of_outer_sibling() {
        let mut tree = Tree::<()>::new(400, 300, None).unwrap();
        let p1 = tree.tab((), None, false, None).unwrap();
        let p2 = tree.split(p1, Axis::X, None, false, ()).unwrap();
        tree.tab((), Some(p2), true, None).unwrap();

        tree.remove(p1, false);

        assert!(tree.iter_panes(false, None).len() >= 2);
    }

    #[test]
    fn reset_dimensions_is_idempotent() {
        let mut tree = Tree::<()>::new(400, 300, None).unwrap();
        tree.tab((), None, false, None).unwrap();
        tree.reset_dimensions(500, 400);
        let after_first = format!("{tree}");
        tree.reset_dimensions(500, 400);
        assert_eq!(format!("{tree}"), after_first);
    }
}
