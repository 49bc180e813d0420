//! Rendering helpers for coordination plans.
//!
//! Pure formatting over the plan types; no new decisions are made here.

use crate::planner::{CoordinationPlan, Handoff};

/// Longest slice of action text shown in a diagram node.
const NODE_ACTION_LEN: usize = 40;

impl Handoff {
    /// Human-readable handoff message for communication between
    /// specialists.
    pub fn to_message(&self) -> String {
        let mut message = format!(
            "**Handoff: {} → {}**\n\n**Deliverable:** {}\n\n**Success Criteria:**\n",
            self.from_specialist, self.to_specialist, self.deliverable
        );
        for criterion in &self.success_criteria {
            message.push_str(&format!("- {}\n", criterion));
        }
        message
    }
}

impl CoordinationPlan {
    /// Mermaid flowchart of the plan: one node per step, edges from the
    /// dependency chain, handoffs as comment annotations.
    pub fn to_mermaid(&self) -> String {
        let mut diagram = String::from("graph TD\n");

        for step in &self.sequence {
            let specialist = step.specialist.replace(' ', "_");
            let action: String = step.action.chars().take(NODE_ACTION_LEN).collect();
            diagram.push_str(&format!(
                "    Step{}[\"{}. {}: {}\"]\n",
                step.step_number, step.step_number, specialist, action
            ));
        }

        for (step_number, deps) in &self.dependencies {
            for dep in deps {
                diagram.push_str(&format!("    Step{} --> Step{}\n", dep, step_number));
            }
        }

        for handoff in &self.handoffs {
            diagram.push_str(&format!(
                "    %% Handoff: {} to {}\n",
                handoff.from_specialist, handoff.to_specialist
            ));
        }

        diagram
    }

    /// Markdown digest of the plan: specialists, sequence, handoffs, time
    /// estimate and parallel-work groups.
    pub fn to_summary(&self) -> String {
        let mut summary = format!("## Coordination Plan: {}\n\n", self.task);

        summary.push_str(&format!(
            "**Specialists Involved:** {} specialists\n",
            self.specialists.len()
        ));
        for specialist in &self.specialists {
            summary.push_str(&format!(
                "- **{}** ({})\n",
                specialist.name, specialist.category
            ));
        }
        summary.push('\n');

        summary.push_str(&format!(
            "**Execution Sequence:** {} steps\n",
            self.sequence.len()
        ));
        for step in &self.sequence {
            summary.push_str(&format!(
                "{}. {}: {} ({} hours)\n",
                step.step_number, step.specialist, step.action, step.duration_hours
            ));
        }
        summary.push('\n');

        if !self.handoffs.is_empty() {
            summary.push_str(&format!("**Handoff Points:** {}\n", self.handoffs.len()));
            for (i, handoff) in self.handoffs.iter().enumerate() {
                summary.push_str(&format!(
                    "{}. {} → {}\n",
                    i + 1,
                    handoff.from_specialist,
                    handoff.to_specialist
                ));
            }
            summary.push('\n');
        }

        summary.push_str(&format!(
            "**Estimated Time:** {} {}\n",
            self.estimated_time.total_hours, self.estimated_time.unit
        ));

        if !self.parallel_groups.is_empty() {
            summary.push_str(&format!(
                "\n**Parallel Work Opportunities:** {} groups\n",
                self.parallel_groups.len()
            ));
            for (i, group) in self.parallel_groups.iter().enumerate() {
                summary.push_str(&format!("{}. {}\n", i + 1, group.join(", ")));
            }
        }

        summary
    }
}
