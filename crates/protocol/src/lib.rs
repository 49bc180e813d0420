//! Workflow-rule table and compliance bookkeeping for Foreman.
//!
//! A fixed set of mandatory workflow rules plus a per-task flag tracker
//! that answers "may this phase begin" checks. No routing logic lives
//! here; the coordinator references rule labels in plan protocol tags.

pub mod rules;
pub mod tracker;

pub use rules::WorkflowRule;
pub use tracker::{
    can_deploy, is_decision_point, requires_command_validation, validate_test_results, Gate,
    ProtocolTracker, ReflectionPrompt, TestReport, REFLECTION_PROMPTS,
};
