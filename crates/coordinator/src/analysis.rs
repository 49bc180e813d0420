//! Matcher result types.

use foreman_common::SpecialistRecord;
use serde::{Deserialize, Serialize};

/// A specialist paired with its score for one matching pass. Ephemeral;
/// built fresh per analysis and not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub specialist: SpecialistRecord,

    /// Non-negative keyword score, pattern boosts included
    pub score: f64,
}

/// The result of analyzing a task description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAnalysis {
    /// Whether the task needs more than one specialist
    pub is_multi_specialist: bool,

    /// Required specialists, primary first; one to five entries
    pub required_specialists: Vec<SpecialistRecord>,

    /// Heuristic match certainty in [0.0, 1.0]
    pub confidence_score: f64,
}

impl TaskAnalysis {
    /// The primary specialist for the task.
    pub fn primary(&self) -> Option<&SpecialistRecord> {
        self.required_specialists.first()
    }
}
