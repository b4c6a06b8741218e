//! Delivery goal model
//!
//! Goals are descriptions of work (build, test, tag, ...) arranged into named
//! groups with ordering constraints. Executing them is up to the host; this
//! module only provides the data, a flattened graph view and the push tests
//! that gate caches and goals.

pub mod cache;
pub mod goal;
pub mod graph;
pub mod group;
pub mod registration;

pub use cache::{
    compiled_typescript_cache, node_modules_cache, CacheEntry, CacheOptions, CachePattern,
    COMPILED_TYPESCRIPT_CLASSIFIER, NODE_MODULES_CLASSIFIER,
};
pub use goal::{Command, Goal, GoalDescriptions, GoalKind, ProjectListener};
pub use graph::{ExecutionOrder, GoalGraph, GoalNode};
pub use group::{GoalGroup, PlanNode, PlannedItem};
pub use push_test::{MaterialChange, Push, PushTest};
pub use registration::{AutofixRegistration, InspectionRegistration};
