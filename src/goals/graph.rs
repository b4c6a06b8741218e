//! Flat goal graph: named nodes with predecessor names

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalNode {
    pub name: String,
    pub predecessors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub order: Vec<String>,
    pub has_cycle: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalGraph {
    nodes: Vec<GoalNode>,
}

impl GoalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, merging predecessors into an existing node of the same name
    pub fn add_node(&mut self, name: &str, predecessors: &[String]) {
        let idx = match self.nodes.iter().position(|n| n.name == name) {
            Some(idx) => idx,
            None => {
                self.nodes.push(GoalNode {
                    name: name.to_string(),
                    predecessors: Vec::new(),
                });
                self.nodes.len() - 1
            }
        };
        let node = &mut self.nodes[idx];
        for pred in predecessors {
            if pred != name && !node.predecessors.contains(pred) {
                node.predecessors.push(pred.clone());
            }
        }
    }

    pub fn nodes(&self) -> &[GoalNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&GoalNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Topological order, ties broken by insertion order.
    ///
    /// Predecessors that are not nodes of this graph are ignored. Nodes caught
    /// in a cycle are appended in insertion order and `has_cycle` is set.
    pub fn execution_order(&self) -> ExecutionOrder {
        let index: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.as_str(), i))
            .collect();

        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];

        for (i, node) in self.nodes.iter().enumerate() {
            for pred in &node.predecessors {
                if let Some(&p) = index.get(pred.as_str()) {
                    in_degree[i] += 1;
                    dependents[p].push(i);
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();

        while let Some(i) = queue.pop_front() {
            visited[i] = true;
            order.push(self.nodes[i].name.clone());

            for &d in &dependents[i] {
                in_degree[d] -= 1;
                if in_degree[d] == 0 {
                    queue.push_back(d);
                }
            }
        }

        let has_cycle = order.len() < self.nodes.len();
        if has_cycle {
            order.extend(
                self.nodes
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !visited[*i])
                    .map(|(_, n)| n.name.clone()),
            );
        }

        ExecutionOrder { order, has_cycle }
    }
}
