//! Per-task compliance bookkeeping against the workflow rules.
//!
//! A flag map per task, checked by simple gates. Arithmetic only; the
//! routing and planning logic lives in `foreman-coordinator`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Outcome of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub allowed: bool,
    pub message: String,
}

impl Gate {
    fn allowed(message: impl Into<String>) -> Self {
        Self {
            allowed: true,
            message: message.into(),
        }
    }

    fn blocked(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: message.into(),
        }
    }
}

/// Self-assessment prompt surfaced after tests are written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectionPrompt {
    pub question: &'static str,
    pub focus: &'static str,
}

pub const REFLECTION_PROMPTS: [ReflectionPrompt; 5] = [
    ReflectionPrompt {
        question: "Does the test suite cover every stated requirement?",
        focus: "test_coverage",
    },
    ReflectionPrompt {
        question: "Are edge cases and boundary conditions exercised?",
        focus: "edge_cases",
    },
    ReflectionPrompt {
        question: "Which scenarios or use cases are still uncovered?",
        focus: "scenarios",
    },
    ReflectionPrompt {
        question: "Would these tests catch a plausible implementation bug?",
        focus: "quality",
    },
    ReflectionPrompt {
        question: "Are the assertions specific enough to be meaningful?",
        focus: "assertions",
    },
];

#[derive(Debug, Clone, Copy, Default)]
struct TaskState {
    requirements_gathered: bool,
    tests_written: bool,
    tests_approved: bool,
    reflection_complete: bool,
    implementation_complete: bool,
    todo_updated: bool,
}

/// Tracks per-task workflow flags and answers gate checks.
#[derive(Debug, Default)]
pub struct ProtocolTracker {
    states: RwLock<HashMap<String, TaskState>>,
}

impl ProtocolTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, task_id: &str, apply: impl FnOnce(&mut TaskState)) {
        let mut states = self.states.write().unwrap_or_else(|e| e.into_inner());
        apply(states.entry(task_id.to_string()).or_default());
    }

    fn state(&self, task_id: &str) -> TaskState {
        self.states
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(task_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn mark_requirements_gathered(&self, task_id: &str) {
        debug!(task_id = %task_id, "Requirements gathered");
        self.update(task_id, |s| s.requirements_gathered = true);
    }

    pub fn mark_tests_written(&self, task_id: &str) {
        self.update(task_id, |s| s.tests_written = true);
    }

    pub fn mark_tests_approved(&self, task_id: &str) {
        self.update(task_id, |s| s.tests_approved = true);
    }

    pub fn mark_reflection_complete(&self, task_id: &str) {
        self.update(task_id, |s| s.reflection_complete = true);
    }

    pub fn mark_implementation_complete(&self, task_id: &str) {
        self.update(task_id, |s| s.implementation_complete = true);
    }

    pub fn mark_todo_updated(&self, task_id: &str) {
        self.update(task_id, |s| s.todo_updated = true);
    }

    /// Drop all recorded flags for a task.
    pub fn reset(&self, task_id: &str) {
        self.states
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(task_id);
    }

    pub fn check_requirements_gathered(&self, task_id: &str) -> Gate {
        if self.state(task_id).requirements_gathered {
            Gate::allowed("Requirements gathered")
        } else {
            Gate::blocked("Requirements must be gathered before implementation")
        }
    }

    pub fn check_tests_written(&self, task_id: &str) -> Gate {
        if self.state(task_id).tests_written {
            Gate::allowed("Tests written")
        } else {
            Gate::blocked("Tests must be written before implementation")
        }
    }

    /// Reflection is mandatory once tests are written.
    pub fn reflection_required(&self, task_id: &str) -> bool {
        let state = self.state(task_id);
        state.tests_written && !state.reflection_complete
    }

    /// Whether implementation may begin for this task.
    ///
    /// Tests must be written and approved; once tests exist, reflection must
    /// be completed first. When nothing has been recorded at all, the
    /// requirements message takes priority.
    pub fn check_can_implement(&self, task_id: &str) -> Gate {
        let state = self.state(task_id);

        if state.tests_written && !state.reflection_complete {
            return Gate::blocked(
                "Self-reflection required after writing tests before implementation",
            );
        }

        if state.tests_written && state.tests_approved {
            return Gate::allowed("Can proceed with implementation");
        }

        if !state.requirements_gathered && !state.tests_written {
            return Gate::blocked("Requirements must be gathered before implementation");
        }

        Gate::blocked("Tests must be written and approved before implementation")
    }
}

/// Result counts from a test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestReport {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// The local-testing rule demands a 100% pass rate.
pub fn validate_test_results(report: &TestReport) -> Gate {
    if report.total == 0 {
        return Gate::blocked("No tests found");
    }
    let rate = report.pass_rate();
    Gate {
        allowed: rate == 1.0,
        message: format!("Pass rate: {:.1}% (must be 100%)", rate * 100.0),
    }
}

/// Deployment gate: blocked without tests, blocked on any failure.
pub fn can_deploy(report: &TestReport) -> Gate {
    if report.total == 0 {
        return Gate::blocked("No tests found - cannot deploy without tests");
    }
    if report.failed > 0 {
        return Gate::blocked(format!("{} tests failed - deployment blocked", report.failed));
    }
    if report.passed == report.total {
        return Gate::allowed("All tests passed - ready for deployment");
    }
    Gate::blocked("Not all tests passed - deployment blocked")
}

const MATH_KEYWORDS: [&str; 6] = [
    "calculate",
    "computation",
    "percentage",
    "math",
    "formula",
    "arithmetic",
];

/// Whether a task involves calculation logic that must be validated with
/// executable checks.
pub fn requires_command_validation(task: &str) -> bool {
    let task_lower = task.to_lowercase();
    MATH_KEYWORDS.iter().any(|kw| task_lower.contains(kw))
}

/// Whether a task asks the user to make a choice.
pub fn is_decision_point(task: &str) -> bool {
    let task_lower = task.to_lowercase();
    let has_word = |word: &str| {
        task_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == word)
    };

    has_word("choose")
        || has_word("select")
        || has_word("decide")
        || has_word("vs")
        || has_word("option")
        || task_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| *token == "or")
            .count()
            >= 2
}
