//! Bundles everything needed to support one technology stack

use crate::interpret::{Interpreter, NodeBuildInterpreter, NodeDeliveryOptions};
use crate::stack::{NodeScanner, ScanConfig, TechnologyScanner};
use crate::transform::{CodeTransformRegistration, PackageScriptTransform};

/// Scanners, interpreters and transforms a host registers for a stack
pub struct StackSupport {
    pub scanners: Vec<Box<dyn TechnologyScanner>>,
    pub interpreters: Vec<Box<dyn Interpreter>>,
    pub code_transforms: Vec<CodeTransformRegistration>,
}

impl StackSupport {
    /// Append another stack's support, keeping registration order
    pub fn merge(mut self, other: StackSupport) -> Self {
        self.scanners.extend(other.scanners);
        self.interpreters.extend(other.interpreters);
        for transform in other.code_transforms {
            if !self.code_transforms.iter().any(|t| t.name == transform.name) {
                self.code_transforms.push(transform);
            }
        }
        self
    }
}

impl std::fmt::Debug for StackSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackSupport")
            .field(
                "scanners",
                &self.scanners.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field(
                "interpreters",
                &self.interpreters.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("code_transforms", &self.code_transforms)
            .finish()
    }
}

/// Node stack support with default scanning
pub fn node_stack_support(options: NodeDeliveryOptions) -> StackSupport {
    node_stack_support_with_config(options, ScanConfig::default())
}

pub fn node_stack_support_with_config(
    options: NodeDeliveryOptions,
    scan_config: ScanConfig,
) -> StackSupport {
    StackSupport {
        scanners: vec![Box::new(NodeScanner::with_config(scan_config))],
        interpreters: vec![Box::new(NodeBuildInterpreter::new(options))],
        code_transforms: vec![PackageScriptTransform::registration()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_stack_support() {
        let support = node_stack_support(NodeDeliveryOptions::default());

        assert_eq!(support.scanners.len(), 1);
        assert_eq!(support.scanners[0].name(), "node");
        assert_eq!(support.interpreters.len(), 1);
        assert_eq!(support.interpreters[0].name(), "NodeBuildInterpreter");
        assert_eq!(support.code_transforms[0].name, "PackageScriptCodeTransform");
    }

    #[test]
    fn test_merge_deduplicates_transforms() {
        let merged = node_stack_support(NodeDeliveryOptions::default())
            .merge(node_stack_support(NodeDeliveryOptions::default()));

        assert_eq!(merged.scanners.len(), 2);
        assert_eq!(merged.interpreters.len(), 2);
        assert_eq!(merged.code_transforms.len(), 1);
    }
}
