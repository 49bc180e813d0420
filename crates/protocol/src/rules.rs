//! The mandatory workflow rules every specialist follows.

use serde::{Deserialize, Serialize};

/// The fixed rule table. Plan steps reference these by label; the tracker
/// checks per-task flags against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRule {
    RequirementsFirst,
    TestFirst,
    GitCheckpoint,
    LoggingStandards,
    CommandValidation,
    CodeOrganization,
    LocalTesting,
    ProductionReadyCode,
    UserDecisionPoints,
    CopyPasteReadyCommands,
    TodoTracking,
}

impl WorkflowRule {
    pub const ALL: [WorkflowRule; 11] = [
        WorkflowRule::RequirementsFirst,
        WorkflowRule::TestFirst,
        WorkflowRule::GitCheckpoint,
        WorkflowRule::LoggingStandards,
        WorkflowRule::CommandValidation,
        WorkflowRule::CodeOrganization,
        WorkflowRule::LocalTesting,
        WorkflowRule::ProductionReadyCode,
        WorkflowRule::UserDecisionPoints,
        WorkflowRule::CopyPasteReadyCommands,
        WorkflowRule::TodoTracking,
    ];

    /// Stable label used in plan protocol tags and rendered summaries.
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowRule::RequirementsFirst => "Requirements gathering first",
            WorkflowRule::TestFirst => "Test-first development",
            WorkflowRule::GitCheckpoint => "Git commit checkpoints",
            WorkflowRule::LoggingStandards => "Logging standards",
            WorkflowRule::CommandValidation => "Command validation",
            WorkflowRule::CodeOrganization => "Code organization",
            WorkflowRule::LocalTesting => "Local testing",
            WorkflowRule::ProductionReadyCode => "Production-ready code",
            WorkflowRule::UserDecisionPoints => "User decision points",
            WorkflowRule::CopyPasteReadyCommands => "Copy-paste ready commands",
            WorkflowRule::TodoTracking => "TODO tracking",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowRule::RequirementsFirst => {
                "Gather and document requirements before any implementation work"
            }
            WorkflowRule::TestFirst => "Write and approve tests before implementing",
            WorkflowRule::GitCheckpoint => "Commit at every meaningful checkpoint",
            WorkflowRule::LoggingStandards => "No debug logging left in delivered code",
            WorkflowRule::CommandValidation => "Validate calculation logic with executable checks",
            WorkflowRule::CodeOrganization => "No duplicate definitions across the codebase",
            WorkflowRule::LocalTesting => "All tests pass locally before handoff",
            WorkflowRule::ProductionReadyCode => {
                "No commented-out code or unresolved markers in deliverables"
            }
            WorkflowRule::UserDecisionPoints => "Surface open decisions instead of guessing",
            WorkflowRule::CopyPasteReadyCommands => "Commands are runnable without placeholders",
            WorkflowRule::TodoTracking => "Keep the task list current while working",
        }
    }
}
