/// QuadTree: static quad tree spatial system.
///
/// The world box is split on X and Z only; every node keeps the full
/// vertical extent of the root. The tree shape is pre-allocated at
/// construction and never changes afterwards.
///
/// Each entry is stored in exactly one node: the deepest node whose box
/// fully contains the entry volume, scanning children in index order.
/// An entry straddling a quadrant boundary stays in the parent, and an
/// entry that fits nowhere is owned by the root.
///
/// Queries descend only into nodes whose box intersects the shape, except
/// that the root's own entries are always tested. Those may lie outside the
/// world box and must never be skipped.

use glam::Vec3;
use slotmap::SlotMap;
use crate::engine_debug;
use crate::engine_trace;
use crate::engine_warn;
use crate::math::{AABB, BoundingVolume, QueryShape};
use super::spatial_system::{EntryKey, NodeId, SpatialEntry, SpatialSystem};
use super::spatial_system_component::MAX_QUAD_TREE_DEPTH;

/// A single node in the quad tree.
#[derive(Debug, Clone)]
pub struct QuadNode {
    /// World-space box of this node, fixed after construction
    volume: AABB,
    /// Depth of this node (root = 0)
    level: u32,
    parent: Option<NodeId>,
    /// Quadrants: bit0 = high X, bit1 = high Z
    children: Option<[NodeId; 4]>,
    /// Entries owned by this node, in insertion order
    entries: Vec<EntryKey>,
}

impl QuadNode {
    pub fn volume(&self) -> &AABB {
        &self.volume
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> Option<&[NodeId; 4]> {
        self.children.as_ref()
    }

    pub fn entries(&self) -> &[EntryKey] {
        &self.entries
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Static quad tree.
///
/// Nodes live in a flat array (depth-first order, root first) and entries in
/// a slot map. Both back-references (`parent`, `SpatialEntry::node`) are
/// plain indices into those arenas.
pub struct QuadTree<T> {
    nodes: Vec<QuadNode>,
    entries: SlotMap<EntryKey, SpatialEntry<T>>,
    max_depth: u32,
}

impl<T: Copy> QuadTree<T> {
    /// Create a quad tree spanning `min..max`.
    ///
    /// Every node down to level `max_depth` is split into 4 quadrants, so
    /// the leaves sit at level `max_depth + 1`.
    /// Total nodes = (4^(d+2) - 1) / 3.
    ///
    /// Depths above `MAX_QUAD_TREE_DEPTH` are clamped to it.
    pub fn create(min: Vec3, max: Vec3, max_depth: u32) -> Self {
        let max_depth = if max_depth > MAX_QUAD_TREE_DEPTH {
            engine_warn!(
                "galaxy3d::QuadTree",
                "Depth {} clamped to {}",
                max_depth, MAX_QUAD_TREE_DEPTH
            );
            MAX_QUAD_TREE_DEPTH
        } else {
            max_depth
        };
        let total_nodes = Self::total_node_count(max_depth);
        let mut nodes = Vec::with_capacity(total_nodes);

        Self::subdivide(&mut nodes, AABB::new(min, max), 0, None, max_depth);

        debug_assert_eq!(nodes.len(), total_nodes);

        engine_debug!(
            "galaxy3d::QuadTree",
            "Created quad tree {:?}..{:?} max_depth={} nodes={}",
            min, max, max_depth, nodes.len()
        );

        Self {
            nodes,
            entries: SlotMap::with_key(),
            max_depth,
        }
    }

    /// Node count for a tree of the given depth: sum of 4^i for i=0..=d+1
    fn total_node_count(max_depth: u32) -> usize {
        let mut count = 0usize;
        let mut level_count = 1usize;
        for _ in 0..=max_depth + 1 {
            count += level_count;
            level_count *= 4;
        }
        count
    }

    /// Push a node and its subtree (depth-first), returning its id.
    fn subdivide(
        nodes: &mut Vec<QuadNode>,
        volume: AABB,
        level: u32,
        parent: Option<NodeId>,
        max_depth: u32,
    ) -> NodeId {
        let id = NodeId(nodes.len());
        nodes.push(QuadNode {
            volume,
            level,
            parent,
            children: None,
            entries: Vec::new(),
        });

        // Nodes at max_depth are split too, their children are the leaves
        if level <= max_depth {
            let center = Self::split_point(&volume);
            let mut children = [NodeId::ROOT; 4];
            for (quadrant, child) in children.iter_mut().enumerate() {
                let child_volume = Self::quadrant_aabb(&volume, center, quadrant);
                *child = Self::subdivide(nodes, child_volume, level + 1, Some(id), max_depth);
            }
            nodes[id.0].children = Some(children);
        }

        id
    }

    /// Midpoint on X and Z, clamped so children never leave the parent box.
    fn split_point(volume: &AABB) -> Vec3 {
        let half = (volume.max - volume.min) * 0.5;
        (volume.min + half).clamp(volume.min, volume.max)
    }

    /// Box of quadrant 0..3. Bit layout: bit0 = X, bit1 = Z (0 = low, 1 = high).
    /// Y is never split.
    fn quadrant_aabb(parent: &AABB, center: Vec3, quadrant: usize) -> AABB {
        AABB {
            min: Vec3::new(
                if quadrant & 1 == 0 { parent.min.x } else { center.x },
                parent.min.y,
                if quadrant & 2 == 0 { parent.min.z } else { center.z },
            ),
            max: Vec3::new(
                if quadrant & 1 == 0 { center.x } else { parent.max.x },
                parent.max.y,
                if quadrant & 2 == 0 { center.z } else { parent.max.z },
            ),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&QuadNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, depth-first, root first.
    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of entries (attached or not).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the node that should own `volume`, starting the search at `start`.
    ///
    /// If `start` contains the volume, descend through the first child that
    /// also contains it. Otherwise climb to the first ancestor that contains
    /// it, or stop at the root.
    pub fn fit_from(&self, start: NodeId, volume: &BoundingVolume) -> NodeId {
        let Some(node) = self.nodes.get(start.0) else {
            return NodeId::ROOT;
        };
        if volume.contained_by_box(&node.volume) {
            self.test_down(start, volume)
        } else {
            self.test_up(start, volume)
        }
    }

    fn test_down(&self, start: NodeId, volume: &BoundingVolume) -> NodeId {
        let mut current = start;
        while let Some(children) = &self.nodes[current.0].children {
            match children
                .iter()
                .find(|child| volume.contained_by_box(&self.nodes[child.0].volume))
            {
                Some(&child) => current = child,
                None => break,
            }
        }
        current
    }

    fn test_up(&self, start: NodeId, volume: &BoundingVolume) -> NodeId {
        let mut current = start;
        while let Some(parent) = self.nodes[current.0].parent {
            if volume.contained_by_box(&self.nodes[parent.0].volume) {
                return parent;
            }
            current = parent;
        }
        engine_trace!(
            "galaxy3d::QuadTree",
            "Volume {:?} exceeds the world bounds, owned by root",
            volume
        );
        current
    }

    /// Number of entries owned by `id` and all of its descendants.
    pub fn subtree_entry_count(&self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get(id.0) else {
            return 0;
        };
        let below: usize = node
            .children
            .iter()
            .flatten()
            .map(|&child| self.subtree_entry_count(child))
            .sum();
        node.entries.len() + below
    }

    /// Recursive query.
    ///
    /// Own entries are tested when the node box intersects the shape or the
    /// node is the root. Children are visited only when the box intersects.
    fn test_volume(&self, id: NodeId, shape: &QueryShape, out: &mut Vec<T>) -> bool {
        let node = &self.nodes[id.0];
        let intersects = shape.intersects_aabb(&node.volume);

        if intersects || node.parent.is_none() {
            for key in &node.entries {
                if let Some(entry) = self.entries.get(*key) {
                    if shape.intersects_volume(&entry.volume) {
                        out.push(entry.element);
                    }
                }
            }
        }

        if intersects {
            if let Some(children) = &node.children {
                for &child in children {
                    self.test_volume(child, shape, out);
                }
            }
        }

        intersects
    }
}

// ===== SPATIAL SYSTEM TRAIT =====

impl<T: Copy + Send + Sync> SpatialSystem<T> for QuadTree<T> {
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn bounds(&self) -> AABB {
        self.nodes[NodeId::ROOT.0].volume
    }

    fn fit(&self, volume: &BoundingVolume) -> NodeId {
        self.fit_from(NodeId::ROOT, volume)
    }

    fn create_entry(&mut self, element: T, volume: BoundingVolume) -> EntryKey {
        self.entries.insert(SpatialEntry { element, volume, node: None })
    }

    fn destroy_entry(&mut self, key: EntryKey) -> Option<SpatialEntry<T>> {
        let node = self.entries.get(key)?.node;
        if let Some(node) = node {
            self.remove(node, key);
        }
        self.entries.remove(key)
    }

    fn entry(&self, key: EntryKey) -> Option<&SpatialEntry<T>> {
        self.entries.get(key)
    }

    fn update_entry_volume(&mut self, key: EntryKey, volume: BoundingVolume) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.volume = volume;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, node: NodeId, key: EntryKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(target) = self.nodes.get_mut(node.0) else {
            return false;
        };
        if target.entries.contains(&key) {
            return false;
        }
        target.entries.push(key);
        entry.node = Some(node);
        true
    }

    fn remove(&mut self, node: NodeId, key: EntryKey) -> bool {
        let Some(target) = self.nodes.get_mut(node.0) else {
            return false;
        };
        let Some(pos) = target.entries.iter().position(|&k| k == key) else {
            return false;
        };
        target.entries.remove(pos);
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.node == Some(node) {
                entry.node = None;
            }
        }
        true
    }

    fn entries_at(&self, node: NodeId) -> &[EntryKey] {
        self.nodes
            .get(node.0)
            .map(|n| n.entries.as_slice())
            .unwrap_or(&[])
    }

    fn test_shape(&self, shape: &QueryShape, out: &mut Vec<T>) -> bool {
        let before = out.len();
        let intersects = self.test_volume(NodeId::ROOT, shape, out);
        engine_trace!(
            "galaxy3d::QuadTree",
            "Query {} intersects={} matches={}",
            shape.kind(), intersects, out.len() - before
        );
        intersects
    }
}

#[cfg(test)]
#[path = "quad_tree_tests.rs"]
mod tests;
