use crate::license_analysis::domain::{
    CycleRecord, DependencyGraph, DependencyNode, Package, PackageId, ROOT_DEPTH,
};
use crate::shared::Result;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Upper bound on the cycles reported for one graph
const MAX_REPORTED_CYCLES: usize = 64;

/// Upper bound on edge visits while enumerating cycles
const MAX_CYCLE_SEARCH_STEPS: usize = 200_000;

/// DependencyGraphBuilder service assembling the transitive dependency graph
///
/// Discovery is breadth-first, so every node keeps the smallest depth at which
/// it can be reached. Cycle detection runs afterwards and reports each
/// distinct cycle once, however many other cycles share its nodes.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Builds the graph rooted at `root`
    ///
    /// # Arguments
    /// * `root` - The project itself; it gets depth -1
    /// * `max_depth` - Nodes deeper than this are recorded as truncated and not expanded
    /// * `edges` - Returns the direct dependencies of a package
    ///
    /// # Errors
    /// Propagates the first error returned by `edges`.
    pub fn build<F>(root: &Package, max_depth: Option<u32>, mut edges: F) -> Result<DependencyGraph>
    where
        F: FnMut(&PackageId) -> Result<Vec<Package>>,
    {
        let mut nodes = vec![DependencyNode::new(
            root.id().clone(),
            root.version().clone(),
            ROOT_DEPTH,
            Vec::new(),
        )];
        let mut index: HashMap<PackageId, usize> = HashMap::from([(root.id().clone(), 0)]);
        let mut queue = VecDeque::from([0usize]);

        while let Some(current) = queue.pop_front() {
            let children = edges(nodes[current].package_id())?;
            let child_depth = nodes[current].depth() + 1;

            for child in children {
                nodes[current].push_child(child.id().clone());
                if index.contains_key(child.id()) {
                    continue;
                }

                let mut origin_path = nodes[current].origin_path().to_vec();
                origin_path.push(nodes[current].package_id().clone());

                let mut node = DependencyNode::new(
                    child.id().clone(),
                    child.version().clone(),
                    child_depth,
                    origin_path,
                );
                let position = nodes.len();
                if Self::within_bound(child_depth, max_depth) {
                    queue.push_back(position);
                } else {
                    node.mark_truncated();
                }

                index.insert(child.id().clone(), position);
                nodes.push(node);
            }
        }

        let cycles = Self::detect_cycles(&mut nodes, &index);
        DependencyGraph::new(nodes, cycles)
    }

    fn within_bound(depth: i32, max_depth: Option<u32>) -> bool {
        match max_depth {
            Some(limit) => i64::from(depth) <= i64::from(limit),
            None => true,
        }
    }

    /// Enumerates the distinct elementary cycles and marks their closing edges
    ///
    /// Every cycle is found once, from its earliest discovered node, by a
    /// depth-first walk restricted to nodes discovered no earlier than that
    /// start. The edge returning to the start is the closing edge. The walk
    /// stops after `MAX_REPORTED_CYCLES` cycles or `MAX_CYCLE_SEARCH_STEPS`
    /// edge visits.
    fn detect_cycles(
        nodes: &mut [DependencyNode],
        index: &HashMap<PackageId, usize>,
    ) -> Vec<CycleRecord> {
        let adjacency: Vec<Vec<usize>> = nodes
            .iter()
            .map(|node| {
                node.children()
                    .iter()
                    .filter_map(|child| index.get(child).copied())
                    .collect()
            })
            .collect();

        let mut cycles = Vec::new();
        let mut seen: HashSet<CycleRecord> = HashSet::new();
        let mut closing_edges: BTreeSet<(usize, usize)> = BTreeSet::new();
        let mut on_path = vec![false; nodes.len()];
        let mut steps = 0usize;

        'search: for start in 0..nodes.len() {
            // (node, next child position)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            on_path[start] = true;

            while let Some(frame) = stack.last_mut() {
                let (node, child_pos) = *frame;
                let Some(&child) = adjacency[node].get(child_pos) else {
                    on_path[node] = false;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                steps += 1;
                if steps > MAX_CYCLE_SEARCH_STEPS {
                    break 'search;
                }

                if child == start {
                    let path = stack
                        .iter()
                        .map(|&(i, _)| nodes[i].package_id().clone())
                        .collect();
                    closing_edges.insert((node, child));
                    let record = CycleRecord::new(path);
                    if seen.insert(record.clone()) {
                        cycles.push(record);
                        if cycles.len() >= MAX_REPORTED_CYCLES {
                            break 'search;
                        }
                    }
                } else if child > start && !on_path[child] {
                    on_path[child] = true;
                    stack.push((child, 0));
                }
            }
        }

        for (node, child) in closing_edges {
            let child_id = nodes[child].package_id().clone();
            nodes[node].push_cycle_child(child_id);
        }

        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pkg(name: &str) -> Package {
        Package::new(name.to_string(), "1.0.0".to_string()).unwrap()
    }

    fn id(name: &str) -> PackageId {
        PackageId::new(name.to_string()).unwrap()
    }

    fn build(edges: &[(&str, &[&str])], max_depth: Option<u32>) -> DependencyGraph {
        let map: HashMap<String, Vec<String>> = edges
            .iter()
            .map(|(from, to)| (from.to_string(), to.iter().map(|s| s.to_string()).collect()))
            .collect();
        DependencyGraphBuilder::build(&pkg("app"), max_depth, |package| {
            Ok(map
                .get(package.as_str())
                .map(|children| children.iter().map(|c| pkg(c)).collect())
                .unwrap_or_default())
        })
        .unwrap()
    }

    #[test]
    fn test_build_assigns_bfs_depths() {
        let graph = build(&[("app", &["a", "b"]), ("a", &["c"]), ("c", &["d"])], None);

        assert_eq!(graph.root().depth(), -1);
        assert_eq!(graph.node(&id("a")).unwrap().depth(), 0);
        assert_eq!(graph.node(&id("c")).unwrap().depth(), 1);
        assert_eq!(graph.node(&id("d")).unwrap().depth(), 2);
        assert_eq!(graph.dependency_count(), 4);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_depth_is_minimum_over_paths() {
        // target is reachable at depths 2, 1 and 3
        let graph = build(
            &[
                ("app", &["p1", "q", "s1"]),
                ("p1", &["p2"]),
                ("p2", &["target"]),
                ("q", &["target"]),
                ("s1", &["s2"]),
                ("s2", &["s3"]),
                ("s3", &["target"]),
            ],
            None,
        );

        let target = graph.node(&id("target")).unwrap();
        assert_eq!(target.depth(), 1);
        assert_eq!(target.origin_path(), &[id("app"), id("q")]);
        assert_eq!(graph.paths_to(&id("target")).len(), 3);
    }

    #[test]
    fn test_three_node_cycle_detected_once() {
        let graph = build(&[("app", &["a"]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])], None);

        assert_eq!(graph.cycles().len(), 1);
        assert_eq!(graph.cycles()[0].path(), &[id("a"), id("b"), id("c")]);
        assert_eq!(graph.node(&id("c")).unwrap().cycle_children(), &[id("a")]);
        assert_eq!(graph.dependency_count(), 3);
    }

    #[test]
    fn test_self_loop_is_trivial_cycle() {
        let graph = build(&[("app", &["a"]), ("a", &["a"])], None);

        assert_eq!(graph.cycles().len(), 1);
        assert_eq!(graph.cycles()[0].path(), &[id("a")]);
    }

    #[test]
    fn test_cycle_does_not_affect_rest_of_graph() {
        let graph = build(
            &[("app", &["a", "x"]), ("a", &["b"]), ("b", &["a"]), ("x", &["y"])],
            None,
        );

        assert_eq!(graph.cycles().len(), 1);
        assert!(graph.node(&id("y")).is_some());
        assert_eq!(graph.node(&id("y")).unwrap().depth(), 1);
    }

    #[test]
    fn test_two_distinct_cycles() {
        let graph = build(
            &[("app", &["a", "c"]), ("a", &["b"]), ("b", &["a"]), ("c", &["d"]), ("d", &["c"])],
            None,
        );
        assert_eq!(graph.cycles().len(), 2);
    }

    #[test]
    fn test_cycles_sharing_nodes_are_each_reported() {
        let graph = build(
            &[("app", &["a"]), ("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])],
            None,
        );

        let described: Vec<String> = graph.cycles().iter().map(CycleRecord::describe).collect();
        assert_eq!(described, vec!["a -> b -> c -> a", "a -> c -> a"]);
        assert_eq!(graph.node(&id("c")).unwrap().cycle_children(), &[id("a")]);
        assert!(graph.node(&id("b")).unwrap().cycle_children().is_empty());
    }

    #[test]
    fn test_cycle_through_root() {
        let graph = build(&[("app", &["a"]), ("a", &["app"])], None);

        assert_eq!(graph.cycles().len(), 1);
        assert_eq!(graph.node(&id("a")).unwrap().cycle_children(), &[id("app")]);
    }

    #[test]
    fn test_reported_cycles_are_capped() {
        // Every hub node points back at the hub: one two-node cycle per spoke
        let spokes: Vec<String> = (0..100).map(|i| format!("s{:03}", i)).collect();
        let spoke_refs: Vec<&str> = spokes.iter().map(String::as_str).collect();
        let hub: &[&str] = &["hub"];
        let mut edges: Vec<(&str, &[&str])> = vec![("app", hub), ("hub", spoke_refs.as_slice())];
        for spoke in &spoke_refs {
            edges.push((*spoke, hub));
        }

        let graph = build(&edges, None);
        assert_eq!(graph.cycles().len(), MAX_REPORTED_CYCLES);
    }

    #[test]
    fn test_max_depth_records_cut_off_nodes() {
        let graph = build(&[("app", &["a"]), ("a", &["b"]), ("b", &["c"])], Some(0));

        assert!(!graph.node(&id("a")).unwrap().truncated());
        let cut = graph.node(&id("b")).unwrap();
        assert!(cut.truncated());
        assert_eq!(cut.depth(), 1);
        assert!(graph.node(&id("c")).is_none());
    }

    #[test]
    fn test_duplicate_edges_are_collapsed() {
        let graph = build(&[("app", &["a", "a"])], None);
        assert_eq!(graph.root().children(), &[id("a")]);
        assert_eq!(graph.dependency_count(), 1);
    }

    #[test]
    fn test_provider_error_propagates() {
        let result = DependencyGraphBuilder::build(&pkg("app"), None, |package| {
            if package.as_str() == "app" {
                Ok(vec![pkg("a")])
            } else {
                anyhow::bail!("registry unavailable")
            }
        });
        assert!(result.unwrap_err().to_string().contains("registry unavailable"));
    }
}
