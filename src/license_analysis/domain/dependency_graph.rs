use super::{PackageId, Version};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Depth reserved for the synthetic project root
pub const ROOT_DEPTH: i32 = -1;

/// Upper bound on the number of paths `paths_to` enumerates
const MAX_REPORTED_PATHS: usize = 64;

/// One package in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    package_id: PackageId,
    version: Version,
    depth: i32,
    children: Vec<PackageId>,
    origin_path: Vec<PackageId>,
    truncated: bool,
    cycle_children: Vec<PackageId>,
}

impl DependencyNode {
    pub fn new(
        package_id: PackageId,
        version: Version,
        depth: i32,
        origin_path: Vec<PackageId>,
    ) -> Self {
        Self {
            package_id,
            version,
            depth,
            children: Vec::new(),
            origin_path,
            truncated: false,
            cycle_children: Vec::new(),
        }
    }

    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// BFS depth: -1 for the root, 0 for direct dependencies
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Children in provider order, duplicates removed
    pub fn children(&self) -> &[PackageId] {
        &self.children
    }

    /// Package ids from the root down to this node's BFS parent
    pub fn origin_path(&self) -> &[PackageId] {
        &self.origin_path
    }

    /// Whether the node was cut off by the depth bound and left unexpanded
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Children whose edge closes a cycle; never descended into
    pub fn cycle_children(&self) -> &[PackageId] {
        &self.cycle_children
    }

    pub fn is_root(&self) -> bool {
        self.depth == ROOT_DEPTH
    }

    pub(crate) fn push_child(&mut self, child: PackageId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub(crate) fn push_cycle_child(&mut self, child: PackageId) {
        if !self.cycle_children.contains(&child) {
            self.cycle_children.push(child);
        }
    }
}

/// A detected dependency cycle
///
/// The path is rotated so its smallest package id comes first, which makes
/// two discoveries of the same cycle compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CycleRecord {
    path: Vec<PackageId>,
}

impl CycleRecord {
    pub fn new(mut path: Vec<PackageId>) -> Self {
        if let Some(start) = path
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(index, _)| index)
        {
            path.rotate_left(start);
        }
        Self { path }
    }

    pub fn path(&self) -> &[PackageId] {
        &self.path
    }

    /// Renders the cycle as `a -> b -> c -> a`
    pub fn describe(&self) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(|id| id.as_str()).collect();
        if let Some(first) = self.path.first() {
            parts.push(first.as_str());
        }
        parts.join(" -> ")
    }
}

/// DependencyGraph aggregate: an arena of nodes in BFS discovery order
///
/// The root is always the first node. Every other node is reachable from it.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
    root: PackageId,
    nodes: Vec<DependencyNode>,
    cycles: Vec<CycleRecord>,
    #[serde(skip)]
    index: HashMap<PackageId, usize>,
}

impl DependencyGraph {
    /// Assembles a graph from nodes in discovery order; the first node is the root
    pub fn new(nodes: Vec<DependencyNode>, cycles: Vec<CycleRecord>) -> crate::shared::Result<Self> {
        let root = match nodes.first() {
            Some(node) if node.is_root() => node.package_id().clone(),
            _ => anyhow::bail!("Dependency graph must start with a root node"),
        };

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.package_id().clone(), i))
            .collect();

        Ok(Self {
            root,
            nodes,
            cycles,
            index,
        })
    }

    pub fn root(&self) -> &DependencyNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: &PackageId) -> Option<&DependencyNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// All nodes, root first, in BFS order
    pub fn nodes(&self) -> &[DependencyNode] {
        &self.nodes
    }

    /// All nodes except the root
    pub fn dependencies(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter().skip(1)
    }

    pub fn direct_dependencies(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes_at_depth(0)
    }

    pub fn nodes_at_depth(&self, depth: i32) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.iter().filter(move |node| node.depth() == depth)
    }

    /// Deepest depth reached, or `None` when the root has no dependencies
    pub fn max_depth(&self) -> Option<i32> {
        self.dependencies().map(|node| node.depth()).max()
    }

    pub fn cycles(&self) -> &[CycleRecord] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn dependency_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn contains(&self, id: &PackageId) -> bool {
        self.index.contains_key(id)
    }

    /// Every acyclic path from a direct dependency down to `target`
    ///
    /// Paths exclude the root and end with `target`. Cycle-closing edges are
    /// not followed. Enumeration stops after a fixed number of paths.
    pub fn paths_to(&self, target: &PackageId) -> Vec<Vec<PackageId>> {
        let mut paths = Vec::new();
        if !self.contains(target) || target == &self.root {
            return paths;
        }

        // Explicit stack of (node, next child position)
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        let mut on_path: HashSet<usize> = HashSet::from([0]);

        while let Some(frame) = stack.last_mut() {
            let (node_index, child_pos) = *frame;
            let node = &self.nodes[node_index];

            if paths.len() >= MAX_REPORTED_PATHS {
                break;
            }

            let Some(child_id) = node.children().get(child_pos) else {
                on_path.remove(&node_index);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if node.cycle_children().contains(child_id) {
                continue;
            }
            let Some(&child_index) = self.index.get(child_id) else {
                continue;
            };
            if on_path.contains(&child_index) {
                continue;
            }

            if child_id == target {
                let mut path: Vec<PackageId> = stack
                    .iter()
                    .skip(1)
                    .map(|&(i, _)| self.nodes[i].package_id().clone())
                    .collect();
                path.push(child_id.clone());
                paths.push(path);
                continue;
            }

            on_path.insert(child_index);
            stack.push((child_index, 0));
        }

        paths
    }
}
