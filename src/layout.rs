//! Recursive rect/shrinkability/grow/shrink math, dispatched by node kind.
//!
//! Grounded directly on `original_source`'s `core/nodes.py`: `Pane`/`SplitContainer`/`Tab`/
//! `TabContainer` each implement `rect`, `shrinkability`, `shrink` and `grow` there as methods
//! dispatched by subtype polymorphism. Here the dispatch is a `match` over [`NodeKind`] instead,
//! per the arena design in `SPEC_FULL.md` §9 — the algorithms themselves (proportional
//! distribution by size on grow, by shrinkability on shrink, tab-bar-preserving resize for
//! `TabContainer`) are carried over unchanged.

use crate::arena::Tiles;
use crate::config::Config;
use crate::geometry::{Axis, Rect};
use crate::id::NodeId;
use crate::node::NodeKind;

/// The 1-based nesting depth of `id`, counting every `TabContainer` ancestor from the root down
/// to and including `id` itself if it is one.
pub(crate) fn tc_level<Data>(tiles: &Tiles<Data>, id: NodeId) -> i32 {
    let mut level = 0;
    let mut current = Some(id);
    while let Some(cur) = current {
        if tiles.get(cur).is_some_and(|n| n.is_tab_container()) {
            level += 1;
        }
        current = tiles.parent_of(cur);
    }
    level
}

/// The level of the nearest ancestor `TabContainer` of `id` — what `window.*` config keys are
/// looked up at for a pane.
pub(crate) fn pane_level<Data>(tiles: &Tiles<Data>, id: NodeId) -> i32 {
    match tiles.first_ancestor(id, |n| n.is_tab_container()) {
        Some(tc) => tc_level(tiles, tc),
        None => 1,
    }
}

pub(crate) fn rect_of<Data>(tiles: &Tiles<Data>, id: NodeId) -> Rect {
    let node = tiles.get(id).expect("rect_of: unknown node");
    match &node.kind {
        NodeKind::Pane(pane) => pane.box_.principal_rect(),
        NodeKind::SplitContainer(sc) => {
            let mut children = sc.children.iter();
            let first = *children.next().expect("SplitContainer must have at least one child");
            children.fold(rect_of(tiles, first), |acc, child| acc.union(&rect_of(tiles, *child)))
        }
        NodeKind::Tab(tab) => rect_of(tiles, tab.child),
        NodeKind::TabContainer(tc) => {
            let first_tab = *tc.children.first().expect("TabContainer must have at least one tab");
            rect_of(tiles, first_tab).union(&tc.tab_bar.principal_rect())
        }
    }
}

pub(crate) fn shrinkability<Data>(tiles: &Tiles<Data>, config: &Config, id: NodeId, axis: Axis) -> i32 {
    let node = tiles.get(id).expect("shrinkability: unknown node");
    match &node.kind {
        NodeKind::Pane(_) => {
            let min = config.min_size(Some(pane_level(tiles, id)));
            rect_of(tiles, id).dim(axis) - min
        }
        NodeKind::SplitContainer(sc) => {
            let per_child = sc.children.iter().map(|c| shrinkability(tiles, config, *c, axis));
            if sc.axis == axis {
                per_child.sum()
            } else {
                per_child.min().unwrap_or(0)
            }
        }
        NodeKind::Tab(tab) => shrinkability(tiles, config, tab.child, axis),
        NodeKind::TabContainer(tc) => {
            tc.children.iter().map(|c| shrinkability(tiles, config, *c, axis)).min().unwrap_or(0)
        }
    }
}

enum Shape {
    Pane,
    SplitContainer { axis: Axis, children: Vec<NodeId> },
    Tab { child: NodeId },
    TabContainer { children: Vec<NodeId> },
}

fn shape_of<Data>(tiles: &Tiles<Data>, id: NodeId) -> Shape {
    let node = tiles.get(id).expect("shape_of: unknown node");
    match &node.kind {
        NodeKind::Pane(_) => Shape::Pane,
        NodeKind::SplitContainer(sc) => Shape::SplitContainer { axis: sc.axis, children: sc.children.clone() },
        NodeKind::Tab(tab) => Shape::Tab { child: tab.child },
        NodeKind::TabContainer(tc) => Shape::TabContainer { children: tc.children.clone() },
    }
}

/// Proportionally splits `amount` across `weights`, giving the last element whatever remains
/// after rounding the others, so the parts always sum exactly to `amount`.
fn proportional_split(amount: i32, weights: &[i32]) -> Vec<i32> {
    let total: i32 = weights.iter().sum();
    let n = weights.len();
    let mut remaining = amount;
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let share = if i + 1 == n {
                remaining
            } else if total > 0 {
                ((f64::from(*w) / f64::from(total)) * f64::from(amount)).round() as i32
            } else {
                0
            };
            remaining -= share;
            share
        })
        .collect()
}

pub(crate) fn grow<Data>(tiles: &mut Tiles<Data>, config: &Config, id: NodeId, axis: Axis, amount: i32, start_pos: i32) {
    match shape_of(tiles, id) {
        Shape::Pane => {
            let min = config.min_size(Some(pane_level(tiles, id)));
            let pane = tiles.get_mut(id).unwrap().as_pane_mut().unwrap();
            let mut rect = pane.box_.principal_rect();
            rect.set_coord(axis, start_pos);
            rect.set_dim(axis, (rect.dim(axis) + amount).max(min));
            pane.box_.set_principal_rect(rect);
        }
        Shape::SplitContainer { axis: sc_axis, children } => {
            if sc_axis == axis {
                let sizes: Vec<i32> = children.iter().map(|c| rect_of(tiles, *c).dim(axis)).collect();
                let allotments = proportional_split(amount, &sizes);
                let mut s = start_pos;
                for ((child, size), allotment) in children.iter().zip(sizes.iter()).zip(allotments.iter()) {
                    grow(tiles, config, *child, axis, *allotment, s);
                    s += size + allotment;
                }
            } else {
                for child in children {
                    grow(tiles, config, child, axis, amount, start_pos);
                }
            }
        }
        Shape::Tab { child } => grow(tiles, config, child, axis, amount, start_pos),
        Shape::TabContainer { children } => {
            let inner_start = grow_tab_bar(tiles, id, axis, amount, start_pos);
            for child in children {
                grow(tiles, config, child, axis, amount, inner_start);
            }
        }
    }
}

pub(crate) fn shrink<Data>(tiles: &mut Tiles<Data>, config: &Config, id: NodeId, axis: Axis, amount: i32, start_pos: i32) {
    match shape_of(tiles, id) {
        Shape::Pane => {
            let min = config.min_size(Some(pane_level(tiles, id)));
            let pane = tiles.get_mut(id).unwrap().as_pane_mut().unwrap();
            let mut rect = pane.box_.principal_rect();
            rect.set_coord(axis, start_pos);
            rect.set_dim(axis, (rect.dim(axis) - amount).max(min));
            pane.box_.set_principal_rect(rect);
        }
        Shape::SplitContainer { axis: sc_axis, children } => {
            if sc_axis == axis {
                let branch_shrinkability: i32 = children.iter().map(|c| shrinkability(tiles, config, *c, axis)).sum();
                let actual = amount.min(branch_shrinkability.max(0));
                let shrinks: Vec<i32> = children.iter().map(|c| shrinkability(tiles, config, *c, axis)).collect();
                let allotments = proportional_split(actual, &shrinks);
                let mut s = start_pos;
                for (child, allotment) in children.iter().zip(allotments.iter()) {
                    shrink(tiles, config, *child, axis, *allotment, s);
                    s += rect_of(tiles, *child).dim(axis);
                }
            } else {
                for child in children {
                    shrink(tiles, config, child, axis, amount, start_pos);
                }
            }
        }
        Shape::Tab { child } => shrink(tiles, config, child, axis, amount, start_pos),
        Shape::TabContainer { children } => {
            let actual = amount.min(shrinkability(tiles, config, id, axis).max(0));
            let inner_start = shrink_tab_bar(tiles, id, axis, actual, start_pos);
            for child in children {
                shrink(tiles, config, child, axis, actual, inner_start);
            }
        }
    }
}

/// Moves/grows the tab bar rect, returning the coordinate children should start at (past the bar
/// on a `y`-axis resize, since the bar sits above them and its height is preserved).
fn grow_tab_bar<Data>(tiles: &mut Tiles<Data>, id: NodeId, axis: Axis, amount: i32, start_pos: i32) -> i32 {
    let tc = tiles.get_mut(id).unwrap().as_tab_container_mut().unwrap();
    let mut bar_rect = tc.tab_bar.principal_rect();
    let inner_start = match axis {
        Axis::X => {
            bar_rect.set_coord(Axis::X, start_pos);
            bar_rect.set_dim(Axis::X, bar_rect.dim(Axis::X) + amount);
            start_pos
        }
        Axis::Y => {
            bar_rect.set_coord(Axis::Y, start_pos);
            start_pos + bar_rect.dim(Axis::Y)
        }
    };
    tc.tab_bar.set_principal_rect(bar_rect);
    inner_start
}

fn shrink_tab_bar<Data>(tiles: &mut Tiles<Data>, id: NodeId, axis: Axis, actual: i32, start_pos: i32) -> i32 {
    let tc = tiles.get_mut(id).unwrap().as_tab_container_mut().unwrap();
    let mut bar_rect = tc.tab_bar.principal_rect();
    let inner_start = match axis {
        Axis::X => {
            bar_rect.set_coord(Axis::X, start_pos);
            bar_rect.set_dim(Axis::X, (bar_rect.dim(Axis::X) - actual).max(0));
            start_pos
        }
        Axis::Y => {
            bar_rect.set_coord(Axis::Y, start_pos);
            start_pos + bar_rect.dim(Axis::Y)
        }
    };
    tc.tab_bar.set_principal_rect(bar_rect);
    inner_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeom;
    use crate::node::{PaneNode, SplitContainerNode, TabContainerNode};

    fn make_pane(tiles: &mut Tiles<()>, parent: NodeId, rect: Rect) -> NodeId {
        let mut box_ = BoxGeom::default();
        box_.set_principal_rect(rect);
        tiles.insert_pane(parent, PaneNode { box_, mru: 0, data: () })
    }

    #[test]
    fn sc_grow_distributes_proportionally_to_size() {
        let mut tiles = Tiles::<()>::default();
        let config = Config::default();
        let tc = tiles.insert_tab_container(None, TabContainerNode::new(BoxGeom::default()));
        let sc = tiles.insert_split_container(tc, SplitContainerNode::new(Axis::X));
        let p1 = make_pane(&mut tiles, sc, Rect::new(0, 0, 50, 100));
        let p2 = make_pane(&mut tiles, sc, Rect::new(50, 0, 150, 100));
        tiles.push_child(sc, p1);
        tiles.push_child(sc, p2);

        grow(&mut tiles, &config, sc, Axis::X, 20, 0);

        let r1 = rect_of(&tiles, p1);
        let r2 = rect_of(&tiles, p2);
        assert_eq!(r1.w + r2.w, 220);
        assert_eq!(r1.x, 0);
        assert_eq!(r2.x, r1.x2());
    }

    #[test]
    fn pane_shrink_clamps_to_min_size() {
        let mut tiles = Tiles::<()>::default();
        let config = Config::default();
        let tc = tiles.insert_tab_container(None, TabContainerNode::new(BoxGeom::default()));
        let p = make_pane(&mut tiles, tc, Rect::new(0, 0, 30, 100));
        shrink(&mut tiles, &config, p, Axis::X, 1000, 0);
        assert_eq!(rect_of(&tiles, p).w, config.min_size(Some(1)));
    }
}
