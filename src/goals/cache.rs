//! Goal cache descriptions for dependency installs and compiled output

use super::goal::ProjectListener;
use super::push_test::PushTest;
use serde::{Deserialize, Serialize};

pub const NODE_MODULES_CLASSIFIER: &str = "nodeModules";
pub const COMPILED_TYPESCRIPT_CLASSIFIER: &str = "compiledTypescript";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePattern {
    Directory(String),
    Glob(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub classifier: String,
    pub pattern: CachePattern,
}

/// What to cache, when the cache applies, and what to run on a miss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheOptions {
    pub entries: Vec<CacheEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_test: Option<PushTest>,
    pub on_cache_miss: Vec<ProjectListener>,
}

impl CacheOptions {
    /// Comma-joined classifiers of all entries
    pub fn classifiers(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.classifier.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `node_modules`, repopulated by `npm install` on a miss
pub fn node_modules_cache() -> CacheOptions {
    CacheOptions {
        entries: vec![CacheEntry {
            classifier: NODE_MODULES_CLASSIFIER.to_string(),
            pattern: CachePattern::Directory("node_modules".to_string()),
        }],
        push_test: None,
        on_cache_miss: vec![ProjectListener::NpmInstall],
    }
}

/// Compiler output of TypeScript projects, recompiled on a miss
pub fn compiled_typescript_cache() -> CacheOptions {
    CacheOptions {
        entries: vec![CacheEntry {
            classifier: COMPILED_TYPESCRIPT_CLASSIFIER.to_string(),
            pattern: CachePattern::Glob(vec![
                "**/*.{js,js.map,d.ts}".to_string(),
                "!node_modules/**/*".to_string(),
            ]),
        }],
        push_test: Some(PushTest::HasTypescript),
        on_cache_miss: vec![ProjectListener::NpmCompile],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_modules_cache() {
        let cache = node_modules_cache();
        assert_eq!(cache.classifiers(), "nodeModules");
        assert!(cache.push_test.is_none());
        assert_eq!(cache.on_cache_miss, vec![ProjectListener::NpmInstall]);
    }

    #[test]
    fn test_compiled_typescript_cache_is_gated() {
        let cache = compiled_typescript_cache();
        assert_eq!(cache.classifiers(), "compiledTypescript");
        assert_eq!(cache.push_test, Some(PushTest::HasTypescript));
        assert_eq!(cache.on_cache_miss, vec![ProjectListener::NpmCompile]);
    }
}
