//! Dependency correlation
//!
//! Two files are considered related when they import at least one module of
//! the same name. The relation is recorded from each side, so every shared
//! module yields a pair of opposite edges.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use crate::import_map::ImportMap;

/// Inverted import map: module name to the files importing it.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    owners: BTreeMap<String, BTreeSet<String>>,
}

impl ModuleIndex {
    pub fn from_import_map(import_map: &ImportMap) -> Self {
        let mut owners: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (file, imports) in import_map.iter() {
            for module in imports {
                owners
                    .entry(module.clone())
                    .or_default()
                    .insert(file.clone());
            }
        }
        Self { owners }
    }

    /// Files importing `module`.
    pub fn owners(&self, module: &str) -> Option<&BTreeSet<String>> {
        self.owners.get(module)
    }

    /// Modules imported by two or more files, with their importers.
    pub fn shared(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.owners.iter().filter(|(_, files)| files.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Mapping from file name to the other files it is inferred to depend on.
///
/// Only files with at least one dependency have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Correlate files through the modules they have in common.
    ///
    /// Every module owned by more than one file connects each ordered pair of
    /// distinct owners, so the work is proportional to the number of edges
    /// rather than to the square of the file count.
    pub fn from_import_map(import_map: &ImportMap) -> Self {
        let index = ModuleIndex::from_import_map(import_map);
        let mut graph = Self::default();

        for (_, owners) in index.shared() {
            for from in owners {
                for to in owners {
                    if from != to {
                        graph.add_edge(from, to);
                    }
                }
            }
        }

        debug!(
            modules = index.len(),
            files = graph.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    pub fn dependencies_of(&self, file: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(file)
    }

    /// Iterate entries in file name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.edges.iter()
    }

    /// All recorded edges as (from, to) pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    /// Number of files with at least one dependency.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Build the directed graph used for rendering.
    ///
    /// Only files that sit on an edge become nodes, in name order.
    pub fn to_digraph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for file in self.edges.keys() {
            nodes.insert(file.as_str(), graph.add_node(file.clone()));
        }
        for (from, to) in self.edges() {
            let a = nodes[&from];
            let b = *nodes
                .entry(to)
                .or_insert_with(|| graph.add_node(to.to_string()));
            graph.add_edge(a, b, ());
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn import_map(entries: &[(&str, &[&str])]) -> ImportMap {
        entries
            .iter()
            .map(|(file, imports)| (file.to_string(), set(imports)))
            .collect()
    }

    /// Direct pairwise scan: every (file, module) checked against every other file.
    fn correlate_pairwise(import_map: &ImportMap) -> BTreeMap<String, BTreeSet<String>> {
        let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (file, imports) in import_map.iter() {
            for module in imports {
                for (other, other_imports) in import_map.iter() {
                    if other != file && other_imports.contains(module) {
                        graph.entry(file.clone()).or_default().insert(other.clone());
                    }
                }
            }
        }
        graph
    }

    #[test]
    fn test_shared_import_gives_both_directions() {
        let map = import_map(&[("a.py", &["os", "mymod"]), ("b.py", &["mymod"])]);
        let graph = DependencyGraph::from_import_map(&map);

        assert_eq!(graph.dependencies_of("a.py"), Some(&set(&["b.py"])));
        assert_eq!(graph.dependencies_of("b.py"), Some(&set(&["a.py"])));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_unrelated_files_have_no_entry() {
        let map = import_map(&[("a.py", &["os"]), ("b.py", &["sys"]), ("c.py", &[])]);
        let graph = DependencyGraph::from_import_map(&map);
        assert!(graph.is_empty());
        assert_eq!(graph.dependencies_of("c.py"), None);
    }

    #[test]
    fn test_no_self_edges() {
        let map = import_map(&[
            ("a.py", &["os", "sys"]),
            ("b.py", &["os"]),
            ("c.py", &["sys"]),
        ]);
        let graph = DependencyGraph::from_import_map(&map);
        for (from, to) in graph.edges() {
            assert_ne!(from, to);
        }
    }

    #[test]
    fn test_multiple_shared_modules_single_edge() {
        let map = import_map(&[
            ("a.py", &["os", "sys", "re"]),
            ("b.py", &["os", "sys", "re"]),
        ]);
        let graph = DependencyGraph::from_import_map(&map);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("a.py", "b.py"), ("b.py", "a.py")]
        );
    }

    #[test]
    fn test_edges_are_symmetric() {
        let map = import_map(&[
            ("a.py", &["os", "json"]),
            ("b.py", &["json"]),
            ("c.py", &["os", "re"]),
            ("d.py", &["re"]),
            ("e.py", &["typing"]),
        ]);
        let graph = DependencyGraph::from_import_map(&map);
        for (from, to) in graph.edges() {
            assert!(
                graph.dependencies_of(to).is_some_and(|deps| deps.contains(from)),
                "missing reverse edge {} -> {}",
                to,
                from
            );
        }
        assert_eq!(graph.dependencies_of("a.py"), Some(&set(&["b.py", "c.py"])));
        assert_eq!(graph.dependencies_of("d.py"), Some(&set(&["c.py"])));
    }

    #[test]
    fn test_index_matches_pairwise_scan() {
        let map = import_map(&[
            ("a.py", &["os", "mymod", "pkg.sub"]),
            ("b.py", &["mymod"]),
            ("c.py", &["pkg.sub", "os"]),
            ("d.py", &["pkg"]),
            ("e.py", &[]),
            ("f.py", &["os"]),
        ]);
        let graph = DependencyGraph::from_import_map(&map);
        assert_eq!(graph.edges, correlate_pairwise(&map));
    }

    #[test]
    fn test_module_index_owners() {
        let map = import_map(&[("a.py", &["os", "mymod"]), ("b.py", &["mymod"])]);
        let index = ModuleIndex::from_import_map(&map);
        assert_eq!(index.len(), 2);
        assert_eq!(index.owners("mymod"), Some(&set(&["a.py", "b.py"])));
        assert_eq!(index.owners("os"), Some(&set(&["a.py"])));
        assert_eq!(index.shared().count(), 1);
    }

    #[test]
    fn test_to_digraph() {
        let map = import_map(&[
            ("a.py", &["mymod"]),
            ("b.py", &["mymod"]),
            ("c.py", &["os"]),
        ]);
        let digraph = DependencyGraph::from_import_map(&map).to_digraph();

        assert_eq!(digraph.node_count(), 2, "isolated files are not drawn");
        assert_eq!(digraph.edge_count(), 2);
        let names: Vec<&str> = digraph.node_indices().map(|i| digraph[i].as_str()).collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }

    #[test]
    fn test_empty_import_map() {
        let graph = DependencyGraph::from_import_map(&ImportMap::new());
        assert!(graph.is_empty());
        assert_eq!(graph.to_digraph().node_count(), 0);
    }
}
