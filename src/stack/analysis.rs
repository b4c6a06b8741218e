use super::node::{NodeStack, TechnologyClassification, NODE_STACK_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One technology's contribution to a project analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technology", rename_all = "lowercase")]
#[non_exhaustive]
pub enum TechnologyElement {
    Node(NodeStack),
}

impl TechnologyElement {
    pub fn name(&self) -> &str {
        match self {
            TechnologyElement::Node(_) => NODE_STACK_NAME,
        }
    }
}

/// Everything the scanners found in one project, keyed by technology name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub elements: BTreeMap<String, TechnologyElement>,
    pub classifications: Vec<TechnologyClassification>,
}

impl ProjectAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: TechnologyElement) -> Self {
        self.add_element(element);
        self
    }

    pub fn add_element(&mut self, element: TechnologyElement) {
        self.elements.insert(element.name().to_string(), element);
    }

    pub fn node(&self) -> Option<&NodeStack> {
        match self.elements.get(NODE_STACK_NAME) {
            Some(TechnologyElement::Node(stack)) => Some(stack),
            _ => None,
        }
    }

    /// Advice collected during classification, flattened
    pub fn messages(&self) -> Vec<&str> {
        self.classifications
            .iter()
            .flat_map(|c| c.messages.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::PackageJsonSummary;

    #[test]
    fn test_node_lookup() {
        let analysis = ProjectAnalysis::new()
            .with_element(TechnologyElement::Node(NodeStack::new(PackageJsonSummary::default())));

        assert!(analysis.node().is_some());
        assert!(ProjectAnalysis::new().node().is_none());
    }

    #[test]
    fn test_messages_flattened() {
        let analysis = ProjectAnalysis {
            classifications: vec![TechnologyClassification {
                name: "node".to_string(),
                tags: vec!["node".to_string()],
                messages: vec!["add build".to_string(), "add test".to_string()],
            }],
            ..Default::default()
        };

        assert_eq!(analysis.messages(), vec!["add build", "add test"]);
    }
}
