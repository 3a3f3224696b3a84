//! Emission ordering of object types.
//!
//! A generated class file may refer to its parent's tag type and to enums and
//! classes named in its method signatures, so every file has to be loaded
//! after the files of the types it depends on.
//!
//! The analyzer builds a `petgraph::DiGraph` with one node per class and one
//! edge per dependency (dependent -> dependency). Strongly connected
//! components with more than one member are cycles.
//!
//! Edges are not equally strong. A parent or argument type is named in a
//! declaration and must exist when the file is loaded; a return type is only
//! touched inside a stub body, at call time. Cycles are broken by dropping
//! return edges inside them first. Argument edges are dropped only from
//! components that are still cyclic after that. Inheritance edges always form
//! a tree, so the remaining graph is acyclic.
//!
//! Ordering itself is a fixed-point relocation over the initial sequence: a
//! class that sits before one of its dependencies is moved to just after the
//! furthest one, and the scan resumes at the same position.

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use julia_bindgen_core::{ClassEntry, TypeEntry};

use crate::TypeRegistry;

/// Why one class depends on another, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Dependency {
    Parent,
    /// Named in an argument annotation; needed at load time.
    Argument,
    /// Only produced by a return conversion; needed at call time.
    Return,
}

/// A set of classes whose method signatures refer to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCycle {
    /// Member class names, sorted.
    pub classes: Vec<String>,
    /// Argument dependencies inside the cycle had to be ignored, so some
    /// argument annotation names a class loaded later.
    pub forward_arguments: bool,
}

/// Computes dependency sets and the emission order of classes.
pub struct DependencyAnalyzer<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> DependencyAnalyzer<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Classes `class` depends on: its parent, plus every class and enum owner
    /// referenced by a method signature. Never contains `class` itself.
    pub fn dependencies(&self, class: &ClassEntry) -> BTreeSet<String> {
        self.classified_dependencies(class)
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Dependencies in first-seen order, each with its strongest kind.
    fn classified_dependencies(&self, class: &ClassEntry) -> Vec<(String, Dependency)> {
        let mut out: Vec<(String, Dependency)> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        let mut add = |name: &str, kind: Dependency| {
            if name == class.name {
                return;
            }
            match index.get(name) {
                Some(&i) => out[i].1 = out[i].1.min(kind),
                None => {
                    index.insert(name.to_string(), out.len());
                    out.push((name.to_string(), kind));
                }
            }
        };

        if let Some(parent) = &class.parent {
            add(parent.as_str(), Dependency::Parent);
        }

        for method in &class.methods {
            let arguments = method
                .arguments
                .iter()
                .map(|argument| (&argument.type_ref, Dependency::Argument));
            let signature =
                std::iter::once((&method.return_type, Dependency::Return)).chain(arguments);

            for (type_ref, kind) in signature {
                let dependency = match self.registry.resolve(type_ref) {
                    Some(TypeEntry::Class(entry)) => Some(entry.name.as_str()),
                    Some(TypeEntry::Enum(entry)) => entry.owner.as_deref(),
                    _ => None,
                };
                if let Some(name) = dependency {
                    add(name, kind);
                }
            }
        }

        out
    }

    /// Order `classes` so that each one follows its dependencies.
    ///
    /// The input order is the initial sequence and breaks ties. Dependencies
    /// outside `classes` are ignored. Cycles are broken as described in the
    /// module docs and returned next to the order.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn order<'c>(
        &self,
        classes: impl IntoIterator<Item = &'c ClassEntry>,
    ) -> (Vec<String>, Vec<DependencyCycle>) {
        let classes: Vec<&ClassEntry> = classes.into_iter().collect();

        let mut graph: DiGraph<&str, Dependency> = DiGraph::with_capacity(classes.len(), 0);
        let mut nodes: FxHashMap<&str, NodeIndex> = FxHashMap::default();
        for class in &classes {
            nodes.insert(class.name.as_str(), graph.add_node(class.name.as_str()));
        }

        for class in &classes {
            let from = nodes[class.name.as_str()];
            for (name, kind) in self.classified_dependencies(class) {
                if let Some(&to) = nodes.get(name.as_str()) {
                    graph.add_edge(from, to, kind);
                }
            }
        }

        let cycles = break_cycles(&mut graph);

        let dependencies: Vec<Vec<usize>> = graph
            .node_indices()
            .map(|node| graph.edges(node).map(|e| e.target().index()).collect())
            .collect();
        let sequence = relocate(&dependencies);

        let order = sequence
            .into_iter()
            .map(|i| graph[NodeIndex::new(i)].to_string())
            .collect();
        (order, cycles)
    }
}

/// Break every cycle, dropping return edges before argument edges.
fn break_cycles(graph: &mut DiGraph<&str, Dependency>) -> Vec<DependencyCycle> {
    let components = cyclic_components(graph);
    if components.is_empty() {
        return Vec::new();
    }

    drop_edges_within(graph, &components, Dependency::Return);
    let stubborn = cyclic_components(graph);
    drop_edges_within(graph, &stubborn, Dependency::Argument);

    let stubborn: FxHashSet<NodeIndex> = stubborn.into_iter().flatten().collect();
    components
        .into_iter()
        .map(|component| {
            let forward_arguments = component.iter().any(|n| stubborn.contains(n));
            let mut classes: Vec<String> =
                component.iter().map(|&n| graph[n].to_string()).collect();
            classes.sort();

            if forward_arguments {
                warn!(
                    classes = ?classes,
                    "argument types form a dependency cycle; some files refer to classes loaded later"
                );
            } else {
                debug!(classes = ?classes, "dependency cycle broken at return types");
            }
            DependencyCycle {
                classes,
                forward_arguments,
            }
        })
        .collect()
}

/// Strongly connected components with more than one member.
fn cyclic_components(graph: &DiGraph<&str, Dependency>) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .collect()
}

/// Remove every `kind` edge whose ends lie in the same component.
fn drop_edges_within(
    graph: &mut DiGraph<&str, Dependency>,
    components: &[Vec<NodeIndex>],
    kind: Dependency,
) {
    let component_of: FxHashMap<NodeIndex, usize> = components
        .iter()
        .enumerate()
        .flat_map(|(i, members)| members.iter().map(move |&n| (n, i)))
        .collect();

    let mut doomed: Vec<_> = graph
        .edge_references()
        .filter(|e| *e.weight() == kind)
        .filter(|e| {
            let source = component_of.get(&e.source());
            source.is_some() && source == component_of.get(&e.target())
        })
        .map(|e| e.id())
        .collect();

    // Removal swaps the last edge into the hole, so go from the back.
    doomed.sort_unstable_by(|a, b| b.cmp(a));
    for edge in doomed {
        graph.remove_edge(edge);
    }
}

/// Fixed-point relocation over `0..n`, where `dependencies[i]` lists the items
/// item `i` must follow. The graph must be acyclic.
fn relocate(dependencies: &[Vec<usize>]) -> Vec<usize> {
    let mut sequence: Vec<usize> = (0..dependencies.len()).collect();
    let mut position: Vec<usize> = sequence.clone();

    let mut i = 0;
    while i < sequence.len() {
        let current = sequence[i];
        let furthest = dependencies[current]
            .iter()
            .map(|&d| position[d])
            .max();

        match furthest {
            Some(target) if target > i => {
                sequence.remove(i);
                sequence.insert(target, current);
                for (offset, &item) in sequence[i..=target].iter().enumerate() {
                    position[item] = i + offset;
                }
            }
            _ => i += 1,
        }
    }

    sequence
}
