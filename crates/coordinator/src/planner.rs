//! Coordination planning for multi-specialist tasks.
//!
//! Consumes the matcher's analysis and builds an ordered step sequence
//! with handoff contracts, a strictly linear dependency chain, duration
//! estimates, and advisory parallel-work groups.

use crate::matcher::Matcher;
use foreman_catalog::Catalog;
use foreman_common::{Category, Role, SpecialistRecord};
use foreman_protocol::WorkflowRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

const REQUIREMENTS_HOURS: f64 = 2.0;
const DESIGN_HOURS: f64 = 4.0;
const IMPLEMENTATION_HOURS: f64 = 6.0;
const TESTING_HOURS: f64 = 3.0;
const DEPLOYMENT_HOURS: f64 = 4.0;

/// Task phrases that warrant a dedicated testing step.
const TESTING_TRIGGERS: [&str; 4] = ["build", "implement", "create", "develop"];
/// Task phrases that warrant a dedicated deployment step.
const DEPLOYMENT_TRIGGERS: [&str; 4] = ["deploy", "deployment", "production", "release"];

/// One step in a coordination plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    /// 1-based, contiguous
    pub step_number: usize,
    pub specialist: String,
    pub action: String,
    pub deliverable: String,
    pub duration_hours: f64,
    /// Protocol-rule labels relevant to this phase
    pub protocols: Vec<String>,
}

/// The transfer point between two consecutive steps run by different
/// specialists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Handoff {
    pub from_specialist: String,
    pub to_specialist: String,
    /// Carried over from the preceding step
    pub deliverable: String,
    pub success_criteria: Vec<String>,
}

/// Per-specialist view of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistDetail {
    pub name: String,
    pub category: Category,
    pub role: Role,
    pub responsibilities: Vec<String>,
}

/// Total duration plus the per-step breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub total_hours: f64,
    pub unit: String,
    pub breakdown: BTreeMap<usize, f64>,
}

/// A complete coordination plan for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationPlan {
    /// The original task text
    pub task: String,
    pub specialists: Vec<SpecialistDetail>,
    pub sequence: Vec<PlanStep>,
    /// One handoff per adjacent pair of steps with differing specialists
    pub handoffs: Vec<Handoff>,
    /// Step n depends on exactly [n-1]; step 1 has no entry
    pub dependencies: BTreeMap<usize, Vec<usize>>,
    pub estimated_time: TimeEstimate,
    /// Advisory: groups that could work concurrently. Not reflected in
    /// `dependencies`, which stays strictly linear.
    pub parallel_groups: Vec<Vec<String>>,
}

/// Builds coordination plans on top of a [`Matcher`].
pub struct Planner {
    matcher: Matcher,
}

impl Planner {
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self::new(Matcher::new(catalog))
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Generate a coordination plan for a task.
    ///
    /// Multi-specialist analyses plan around the full required list;
    /// everything else gets a single-specialist plan. Never fails,
    /// whatever the input text.
    pub fn generate_plan(&self, task: &str) -> CoordinationPlan {
        let analysis = self.matcher.analyze_task(task);

        let mut specialists = analysis.required_specialists;
        if !analysis.is_multi_specialist {
            specialists.truncate(1);
        }
        if specialists.is_empty() {
            // The matcher always falls back to the default; guard anyway.
            warn!("Task analysis produced no specialists, planning around the default");
            specialists.push(self.matcher.catalog().default_record().clone());
        }

        let task_lower = task.to_lowercase();
        let sequence = build_sequence(&specialists, &task_lower);
        let handoffs = build_handoffs(&sequence);
        let dependencies = map_dependencies(&sequence);
        let estimated_time = estimate_time(&sequence);
        let parallel_groups = identify_parallel_work(&specialists);

        info!(
            task_preview = %task.chars().take(50).collect::<String>(),
            specialists = specialists.len(),
            steps = sequence.len(),
            handoffs = handoffs.len(),
            total_hours = estimated_time.total_hours,
            "Coordination plan generated"
        );

        CoordinationPlan {
            task: task.to_string(),
            specialists: specialists.iter().map(specialist_detail).collect(),
            sequence,
            handoffs,
            dependencies,
            estimated_time,
            parallel_groups,
        }
    }
}

fn specialist_detail(specialist: &SpecialistRecord) -> SpecialistDetail {
    SpecialistDetail {
        name: specialist.name.clone(),
        category: specialist.category,
        role: specialist.role,
        responsibilities: responsibilities(specialist),
    }
}

fn responsibilities(specialist: &SpecialistRecord) -> Vec<String> {
    let items: &[&str] = match specialist.category {
        Category::Design => &[
            "Create design mockups and wireframes",
            "Define user experience flows",
            "Establish design system and components",
        ],
        Category::Engineering => match specialist.role {
            Role::Frontend => &[
                "Implement UI components",
                "Integrate with backend APIs",
                "Ensure responsive design",
            ],
            Role::Backend => &[
                "Design and implement API endpoints",
                "Set up database schema",
                "Handle business logic",
            ],
            _ => &[
                "Gather and document requirements",
                "Design technical architecture",
                "Implement core functionality",
            ],
        },
        Category::Testing => &[
            "Write comprehensive test cases",
            "Perform integration testing",
            "Validate against requirements",
        ],
        Category::Product => &[
            "Define product requirements",
            "Prioritize features",
            "Coordinate between teams",
        ],
        _ => &[
            "Complete assigned tasks",
            "Follow development protocols",
            "Deliver quality work",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Requirements first, one design step when a designer is involved, one
/// implementation step per implementer role, then testing and deployment
/// steps when the task calls for them.
fn build_sequence(specialists: &[SpecialistRecord], task_lower: &str) -> Vec<PlanStep> {
    let mut sequence = Vec::new();
    let primary = &specialists[0];

    sequence.push(PlanStep {
        step_number: sequence.len() + 1,
        specialist: primary.name.clone(),
        action: "Gather and document requirements".to_string(),
        deliverable: "Requirements document with clear specifications".to_string(),
        duration_hours: REQUIREMENTS_HOURS,
        protocols: vec![
            WorkflowRule::RequirementsFirst.label().to_string(),
            WorkflowRule::TodoTracking.label().to_string(),
            "Git branch setup".to_string(),
        ],
    });

    if let Some(designer) = specialists.iter().find(|s| s.role == Role::Designer) {
        sequence.push(PlanStep {
            step_number: sequence.len() + 1,
            specialist: designer.name.clone(),
            action: "Design system architecture and user interface".to_string(),
            deliverable: "Design mockups, wireframes, and component library".to_string(),
            duration_hours: DESIGN_HOURS,
            protocols: vec![
                "Follow design system".to_string(),
                "Create reusable components".to_string(),
                "Document decisions".to_string(),
            ],
        });
    }

    for specialist in specialists.iter().filter(|s| s.role.is_implementer()) {
        let (action, deliverable) = implementation_step(specialist.role);
        sequence.push(PlanStep {
            step_number: sequence.len() + 1,
            specialist: specialist.name.clone(),
            action: action.to_string(),
            deliverable: deliverable.to_string(),
            duration_hours: IMPLEMENTATION_HOURS,
            protocols: vec![
                WorkflowRule::TestFirst.label().to_string(),
                WorkflowRule::GitCheckpoint.label().to_string(),
                "Follow the task list".to_string(),
            ],
        });
    }

    if TESTING_TRIGGERS.iter().any(|w| task_lower.contains(w)) {
        let tester = specialists
            .iter()
            .find(|s| s.role == Role::Tester)
            .unwrap_or(primary);
        sequence.push(PlanStep {
            step_number: sequence.len() + 1,
            specialist: tester.name.clone(),
            action: "Test implementation and validate requirements".to_string(),
            deliverable: "Test results, bug reports, and validation report".to_string(),
            duration_hours: TESTING_HOURS,
            protocols: vec![
                WorkflowRule::LocalTesting.label().to_string(),
                "Test coverage".to_string(),
                "QA checklist".to_string(),
            ],
        });
    }

    if DEPLOYMENT_TRIGGERS.iter().any(|w| task_lower.contains(w)) {
        let devops = specialists
            .iter()
            .find(|s| s.role == Role::Devops)
            .unwrap_or(primary);
        sequence.push(PlanStep {
            step_number: sequence.len() + 1,
            specialist: devops.name.clone(),
            action: "Deploy to production and setup monitoring".to_string(),
            deliverable: "Deployed application with monitoring and CI/CD pipeline".to_string(),
            duration_hours: DEPLOYMENT_HOURS,
            protocols: vec![
                "Infrastructure as code".to_string(),
                "Automated deployment".to_string(),
                "Monitoring setup".to_string(),
            ],
        });
    }

    sequence
}

/// Action and deliverable text for an implementation step, keyed on the
/// specialist's role tag.
fn implementation_step(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Frontend => (
            "Implement frontend components and user interface",
            "Working frontend with all UI components",
        ),
        Role::Backend => (
            "Implement backend APIs and business logic",
            "Functional backend with tested API endpoints",
        ),
        Role::Mobile => (
            "Implement mobile application features",
            "Tested mobile application build",
        ),
        Role::Ai => (
            "Implement AI models and integration",
            "Trained models and integration code",
        ),
        Role::Devops => (
            "Setup deployment pipeline and infrastructure",
            "Deployment pipeline and infrastructure code",
        ),
        _ => (
            "Implement core functionality and features",
            "Implemented functionality with tests",
        ),
    }
}

/// One handoff per adjacent pair of steps whose specialist differs,
/// carrying the earlier step's deliverable.
fn build_handoffs(sequence: &[PlanStep]) -> Vec<Handoff> {
    sequence
        .windows(2)
        .filter(|pair| pair[0].specialist != pair[1].specialist)
        .map(|pair| Handoff {
            from_specialist: pair[0].specialist.clone(),
            to_specialist: pair[1].specialist.clone(),
            deliverable: pair[0].deliverable.clone(),
            success_criteria: success_criteria(&pair[0]),
        })
        .collect()
}

/// Two generic criteria plus phase-specific ones selected by the action
/// text of the step being handed off.
fn success_criteria(from_step: &PlanStep) -> Vec<String> {
    let mut criteria = vec![
        "All deliverables completed and documented".to_string(),
        "Code committed to the repository".to_string(),
    ];

    let action = from_step.action.to_lowercase();
    if action.contains("requirements") {
        criteria.push("Requirements clearly defined and validated".to_string());
        criteria.push("Acceptance criteria documented".to_string());
    }
    if action.contains("design") {
        criteria.push("Design approved by stakeholders".to_string());
        criteria.push("All components documented".to_string());
    }
    if action.contains("implement") {
        criteria.push("All tests passing".to_string());
        criteria.push("Code review completed".to_string());
    }

    criteria
}

/// Strictly linear execution: step n depends on step n-1 alone.
fn map_dependencies(sequence: &[PlanStep]) -> BTreeMap<usize, Vec<usize>> {
    sequence
        .iter()
        .skip(1)
        .map(|step| (step.step_number, vec![step.step_number - 1]))
        .collect()
}

fn estimate_time(sequence: &[PlanStep]) -> TimeEstimate {
    let breakdown: BTreeMap<usize, f64> = sequence
        .iter()
        .map(|step| (step.step_number, step.duration_hours))
        .collect();

    TimeEstimate {
        total_hours: breakdown.values().sum(),
        unit: "hours".to_string(),
        breakdown,
    }
}

/// Advisory parallel-work heuristic, independent of the dependency chain:
/// a frontend/backend pair can work concurrently, and with three or more
/// specialists the implementers form a second candidate group.
fn identify_parallel_work(specialists: &[SpecialistRecord]) -> Vec<Vec<String>> {
    let mut groups = Vec::new();

    let frontend = specialists.iter().find(|s| s.role == Role::Frontend);
    let backend = specialists.iter().find(|s| s.role == Role::Backend);
    if let (Some(frontend), Some(backend)) = (frontend, backend) {
        groups.push(vec![frontend.name.clone(), backend.name.clone()]);
    }

    if specialists.len() >= 3 {
        let implementers: Vec<String> = specialists
            .iter()
            .filter(|s| {
                s.role != Role::Designer
                    && s.role != Role::Tester
                    && s.category != Category::Product
            })
            .map(|s| s.name.clone())
            .collect();
        if implementers.len() >= 2 {
            groups.push(implementers);
        }
    }

    groups
}
