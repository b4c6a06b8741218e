//! Named, ordered plans of goals and nested groups

use super::goal::Goal;
use super::graph::GoalGraph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanNode {
    Goal(Goal),
    Group(GoalGroup),
}

impl PlanNode {
    pub fn name(&self) -> &str {
        match self {
            PlanNode::Goal(goal) => &goal.name,
            PlanNode::Group(group) => &group.name,
        }
    }
}

impl From<Goal> for PlanNode {
    fn from(goal: Goal) -> Self {
        PlanNode::Goal(goal)
    }
}

impl From<GoalGroup> for PlanNode {
    fn from(group: GoalGroup) -> Self {
        PlanNode::Group(group)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub node: PlanNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

/// Goals planned in order; `after` constraints refer to goal names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalGroup {
    pub name: String,
    pub items: Vec<PlannedItem>,
}

impl GoalGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    pub fn plan(mut self, node: impl Into<PlanNode>) -> Self {
        self.items.push(PlannedItem {
            node: node.into(),
            after: Vec::new(),
        });
        self
    }

    /// Order the most recently planned item after `goal`
    pub fn after(self, goal: &Goal) -> Self {
        self.after_name(&goal.name)
    }

    pub fn after_name(mut self, name: &str) -> Self {
        if let Some(item) = self.items.last_mut() {
            if !item.after.iter().any(|a| a == name) {
                item.after.push(name.to_string());
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[PlannedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All goals, nested groups flattened depth-first
    pub fn goals(&self) -> Vec<&Goal> {
        let mut goals = Vec::new();
        self.collect_goals(&mut goals);
        goals
    }

    fn collect_goals<'a>(&'a self, out: &mut Vec<&'a Goal>) {
        for item in &self.items {
            match &item.node {
                PlanNode::Goal(goal) => out.push(goal),
                PlanNode::Group(group) => group.collect_goals(out),
            }
        }
    }

    pub fn contains_goal(&self, name: &str) -> bool {
        self.goals().iter().any(|g| g.name == name)
    }

    /// Flatten into a goal graph. Goals inside a nested group inherit the
    /// predecessors of the item that planned the group.
    pub fn to_graph(&self) -> GoalGraph {
        let mut graph = GoalGraph::new();
        self.add_to_graph(&mut graph, &[]);
        graph
    }

    pub(crate) fn add_to_graph(&self, graph: &mut GoalGraph, inherited: &[String]) {
        for item in &self.items {
            let mut predecessors = inherited.to_vec();
            predecessors.extend(item.after.iter().cloned());

            match &item.node {
                PlanNode::Goal(goal) => graph.add_node(&goal.name, &predecessors),
                PlanNode::Group(group) => group.add_to_graph(graph, &predecessors),
            }
        }
    }
}
