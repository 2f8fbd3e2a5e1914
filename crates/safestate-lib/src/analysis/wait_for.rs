//! Wait-for graph construction and cycle search
//!
//! Nodes are processes; an edge `Pi -> Pj` means `Pi` requests some
//! resource whose holder is `Pj`. Each resource is assumed to have a single
//! effective holder (the last process with a positive allocation of it), so
//! the cycle list is exact only for single-instance resources. Multi-instance
//! states should rely on the reclamation fixed point in
//! [`detection`](super::detection) for the verdict.

use crate::model::{AnalysisError, Matrix, validate_matrix, validate_names};
use petgraph::algo::is_cyclic_directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A closed wait chain; the last process waits on the first
pub type Cycle = Vec<String>;

/// One level of the cycle search: a node and how far through its
/// successors the search has got
struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

impl Frame {
    fn new(node: NodeIndex, successors: Vec<NodeIndex>) -> Self {
        Self {
            node,
            successors,
            next: 0,
        }
    }
}

/// Directed wait-for relation between processes
pub struct WaitForGraph {
    graph: DiGraph<String, ()>,
    /// Process name to node index
    node_map: HashMap<String, NodeIndex>,
    /// Sole holder of each resource, in resource order
    holders: Vec<(String, Option<String>)>,
}

impl WaitForGraph {
    /// Build the graph from allocation and request matrices
    pub fn build(
        processes: &[String],
        resources: &[String],
        allocation: &Matrix,
        request: &Matrix,
    ) -> Result<Self, AnalysisError> {
        let (n, m) = (processes.len(), resources.len());
        validate_names("process", processes)?;
        validate_names("resource", resources)?;
        validate_matrix("allocation", allocation, n, m)?;
        validate_matrix("request", request, n, m)?;

        let mut graph = DiGraph::with_capacity(n, n);
        let mut node_map = HashMap::with_capacity(n);
        let nodes: Vec<NodeIndex> = processes
            .iter()
            .map(|p| {
                let idx = graph.add_node(p.clone());
                node_map.insert(p.clone(), idx);
                idx
            })
            .collect();

        // Last process with a positive allocation wins
        let holder_of: Vec<Option<usize>> = (0..m)
            .map(|j| (0..n).rev().find(|&i| allocation[i][j] > 0))
            .collect();

        for i in 0..n {
            let mut seen = HashSet::new();
            for j in 0..m {
                if request[i][j] == 0 {
                    continue;
                }
                let Some(h) = holder_of[j] else {
                    trace!("{} requests unheld resource {}", processes[i], resources[j]);
                    continue;
                };
                if h != i && seen.insert(h) {
                    trace!(
                        "{} waits on {} for {}",
                        processes[i], processes[h], resources[j]
                    );
                    graph.add_edge(nodes[i], nodes[h], ());
                }
            }
        }

        let holders = resources
            .iter()
            .zip(&holder_of)
            .map(|(r, h)| (r.clone(), h.map(|i| processes[i].clone())))
            .collect();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built wait-for graph"
        );

        Ok(Self {
            graph,
            node_map,
            holders,
        })
    }

    /// Successors of a node in the order their edges were added.
    ///
    /// petgraph walks adjacency lists newest-first, so reverse it.
    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        out.reverse();
        out
    }

    /// Every process with the processes it waits on, in process order
    pub fn adjacency(&self) -> Vec<(String, Vec<String>)> {
        self.graph
            .node_indices()
            .map(|idx| {
                let targets = self
                    .successors(idx)
                    .into_iter()
                    .map(|t| self.graph[t].clone())
                    .collect();
                (self.graph[idx].clone(), targets)
            })
            .collect()
    }

    /// Processes `process` waits on, or `None` if it is unknown
    pub fn waits_on(&self, process: &str) -> Option<Vec<String>> {
        let idx = self.node_map.get(process)?;
        Some(
            self.successors(*idx)
                .into_iter()
                .map(|t| self.graph[t].clone())
                .collect(),
        )
    }

    /// Effective holder of each resource, in resource order
    pub fn holders(&self) -> &[(String, Option<String>)] {
        &self.holders
    }

    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Enumerate cycles by depth-first search from every unvisited process.
    ///
    /// Each node is expanded once. Reaching a node that is still on the
    /// search stack yields the stack slice from that node to the top. The
    /// stack lives on the heap, so long wait chains cannot overflow.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut visited = HashSet::new();
        let mut cycles = Vec::new();

        for node in self.graph.node_indices() {
            if !visited.contains(&node) {
                self.dfs_cycles(node, &mut visited, &mut cycles);
            }
        }

        debug!(cycles = cycles.len(), "Cycle search complete");
        cycles
    }

    fn dfs_cycles(
        &self,
        start: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        cycles: &mut Vec<Cycle>,
    ) {
        let mut on_stack = HashSet::new();
        let mut stack = vec![Frame::new(start, self.successors(start))];
        visited.insert(start);
        on_stack.insert(start);

        while let Some(frame) = stack.last_mut() {
            let Some(&neighbor) = frame.successors.get(frame.next) else {
                on_stack.remove(&frame.node);
                stack.pop();
                continue;
            };
            frame.next += 1;

            if visited.insert(neighbor) {
                on_stack.insert(neighbor);
                stack.push(Frame::new(neighbor, self.successors(neighbor)));
            } else if on_stack.contains(&neighbor) {
                if let Some(start) = stack.iter().position(|f| f.node == neighbor) {
                    let cycle: Cycle = stack[start..]
                        .iter()
                        .map(|f| self.graph[f.node].clone())
                        .collect();
                    trace!("Found cycle: {}", cycle.join(" -> "));
                    cycles.push(cycle);
                }
            }
        }
    }

    /// Render as Graphviz DOT, filling `highlight` processes in red
    pub fn to_dot(&self, highlight: &[String]) -> String {
        // Unit edge weights have no Display impl
        let labelled = self.graph.map(|_, name| name.clone(), |_, _| "");
        let edge_attrs = |_, _| String::new();
        let node_attrs = |_, (_, name): (NodeIndex, &String)| {
            if highlight.contains(name) {
                "style=filled, fillcolor=\"#e74c3c\"".to_string()
            } else {
                String::new()
            }
        };

        let dot = Dot::with_attr_getters(
            &labelled,
            &[Config::EdgeNoLabel],
            &edge_attrs,
            &node_attrs,
        );
        format!("{dot}")
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, process: &str) -> bool {
        self.node_map.contains_key(process)
    }
}

#[cfg(test)]
mod tests {
    include!("wait_for.test.rs");
}
