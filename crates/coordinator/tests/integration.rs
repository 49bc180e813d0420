//! Integration tests for the matcher and planner against the built-in
//! catalog.

use foreman_catalog::{builtin, Catalog};
use foreman_common::Category;
use foreman_coordinator::{Matcher, Planner};
use std::sync::Arc;

fn matcher() -> Matcher {
    Matcher::new(Arc::new(Catalog::builtin()))
}

fn planner() -> Planner {
    Planner::with_catalog(Arc::new(Catalog::builtin()))
}

// ============================================================================
// Specialist selection
// ============================================================================

#[test]
fn test_selection_is_deterministic() {
    let m = matcher();
    let task = "Build a React dashboard with user authentication";

    let first = m.select_specialist(task);
    let second = m.select_specialist(task);
    assert_eq!(first, second);
}

#[test]
fn test_empty_and_whitespace_tasks_select_default() {
    let m = matcher();
    assert_eq!(m.select_specialist("").name, builtin::SENIOR_DEVELOPER);
    assert_eq!(m.select_specialist("   ").name, builtin::SENIOR_DEVELOPER);
    assert_eq!(m.select_specialist("\n\t ").name, builtin::SENIOR_DEVELOPER);
}

#[test]
fn test_react_dashboard_selects_frontend_specialist() {
    let m = matcher();
    let specialist = m.select_specialist("Build a React dashboard with user authentication");

    assert_eq!(specialist.name, builtin::FRONTEND_DEVELOPER);
    assert_eq!(specialist.category, Category::Engineering);
}

#[test]
fn test_api_task_selects_backend_specialist() {
    let m = matcher();
    let specialist =
        m.select_specialist("Design a REST API with database schema and authentication");
    assert_eq!(specialist.name, builtin::BACKEND_ARCHITECT);
}

#[test]
fn test_machine_learning_task_selects_ai_specialist() {
    let m = matcher();
    let specialist =
        m.select_specialist("Train a machine learning model for churn prediction with nlp");
    assert_eq!(specialist.name, builtin::AI_ENGINEER);
}

#[test]
fn test_ambiguous_task_selects_default() {
    let m = matcher();
    let specialist = m.select_specialist("Help me with my project");
    assert_eq!(specialist.name, builtin::SENIOR_DEVELOPER);
}

#[test]
fn test_verbatim_name_wins_selection() {
    let m = matcher();
    let specialist = m.select_specialist("The Backend Architect should own this work");
    assert_eq!(specialist.name, builtin::BACKEND_ARCHITECT);
}

#[test]
fn test_case_insensitive_matching() {
    let m = matcher();
    let specialist = m.select_specialist("BUILD A REACT DASHBOARD WITH CSS STYLING");
    assert_eq!(specialist.name, builtin::FRONTEND_DEVELOPER);
}

#[test]
fn test_hostile_inputs_degrade_to_default() {
    let m = matcher();

    assert_eq!(m.select_specialist("???!!!...,,,").name, builtin::SENIOR_DEVELOPER);
    assert_eq!(m.select_specialist("日本語のタスク").name, builtin::SENIOR_DEVELOPER);

    let very_long = "nothing relevant here ".repeat(5_000);
    assert_eq!(m.select_specialist(&very_long).name, builtin::SENIOR_DEVELOPER);
}

// ============================================================================
// Task analysis
// ============================================================================

#[test]
fn test_confidence_always_within_bounds() {
    let m = matcher();
    let tasks = [
        "",
        "Help me with my project",
        "Fix CSS styling issues on mobile",
        "Build a React dashboard with user authentication",
        "Build full-stack dashboard with React frontend and Node.js API",
        "react react react css css frontend dashboard responsive styling",
    ];

    for task in tasks {
        let analysis = m.analyze_task(task);
        assert!(
            (0.0..=1.0).contains(&analysis.confidence_score),
            "confidence {} out of bounds for task {:?}",
            analysis.confidence_score,
            task
        );
    }
}

#[test]
fn test_frontend_backend_combination_is_multi_specialist() {
    let m = matcher();
    let analysis = m.analyze_task("We need both frontend and backend work for this feature");

    assert!(analysis.is_multi_specialist);
    let names: Vec<&str> = analysis
        .required_specialists
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert!(names.contains(&builtin::FRONTEND_DEVELOPER));
    assert!(names.contains(&builtin::BACKEND_ARCHITECT));
}

#[test]
fn test_css_fix_is_single_specialist() {
    let m = matcher();
    let analysis = m.analyze_task("Fix CSS styling issues on mobile");

    assert!(!analysis.is_multi_specialist);
    assert_eq!(analysis.required_specialists.len(), 1);
}

#[test]
fn test_full_stack_scenario_includes_both_halves() {
    let m = matcher();
    let analysis =
        m.analyze_task("Build full-stack dashboard with React frontend and Node.js API");

    assert!(analysis.is_multi_specialist);
    let names: Vec<&str> = analysis
        .required_specialists
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert!(names.contains(&builtin::FRONTEND_DEVELOPER));
    assert!(names.contains(&builtin::BACKEND_ARCHITECT));
}

#[test]
fn test_multi_specialist_capped_at_five() {
    let m = matcher();
    let analysis = m.analyze_task(
        "Design and build a full-stack dashboard with frontend, backend api, \
         mobile app, machine learning and deploy to production with tests and qa",
    );

    assert!(analysis.required_specialists.len() <= 5);
    assert!(!analysis.required_specialists.is_empty());
}

#[test]
fn test_analysis_never_returns_empty_specialists() {
    let m = matcher();
    for task in ["", "unmatched gibberish zzz", "Fix CSS styling issues on mobile"] {
        let analysis = m.analyze_task(task);
        assert!(!analysis.required_specialists.is_empty());
    }
}

// ============================================================================
// Plan structure
// ============================================================================

#[test]
fn test_plan_step_numbers_contiguous_and_dependencies_linear() {
    let p = planner();
    let plan = p.generate_plan("Build full-stack dashboard with React frontend and Node.js API");

    for (i, step) in plan.sequence.iter().enumerate() {
        assert_eq!(step.step_number, i + 1);
    }

    assert!(!plan.dependencies.contains_key(&1));
    for step in plan.sequence.iter().skip(1) {
        assert_eq!(
            plan.dependencies[&step.step_number],
            vec![step.step_number - 1]
        );
    }
}

#[test]
fn test_handoff_participants_are_plan_specialists() {
    let p = planner();
    let tasks = [
        "Build full-stack dashboard with React frontend and Node.js API",
        "Design and build a responsive frontend",
        "Build and deploy the backend api with tests",
    ];

    for task in tasks {
        let plan = p.generate_plan(task);
        let names: Vec<&str> = plan.specialists.iter().map(|s| s.name.as_str()).collect();
        for handoff in &plan.handoffs {
            assert!(names.contains(&handoff.from_specialist.as_str()));
            assert!(names.contains(&handoff.to_specialist.as_str()));
        }
    }
}

#[test]
fn test_estimated_time_equals_sum_of_durations() {
    let p = planner();
    let plan = p.generate_plan("Build full-stack dashboard with React frontend and Node.js API");

    let expected: f64 = plan.sequence.iter().map(|s| s.duration_hours).sum();
    assert_eq!(plan.estimated_time.total_hours, expected);
    assert_eq!(plan.estimated_time.breakdown.len(), plan.sequence.len());
}

#[test]
fn test_requirements_and_design_precede_implementation() {
    let p = planner();
    let plan = p.generate_plan("Build full-stack dashboard with React frontend and Node.js API");

    let requirements = plan
        .sequence
        .iter()
        .position(|s| s.action.to_lowercase().contains("requirements"))
        .unwrap();
    let design = plan
        .sequence
        .iter()
        .position(|s| s.action.starts_with("Design"))
        .unwrap();
    let implementations: Vec<usize> = plan
        .sequence
        .iter()
        .enumerate()
        .filter(|(_, s)| s.action.starts_with("Implement"))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(requirements, 0);
    assert!(implementations.len() >= 2);
    for implementation in implementations {
        assert!(design < implementation);
    }
}

#[test]
fn test_build_task_gets_testing_step() {
    let p = planner();
    let plan = p.generate_plan("Build a React dashboard with user authentication");

    assert!(plan
        .sequence
        .iter()
        .any(|s| s.action.starts_with("Test implementation")));
}

#[test]
fn test_deploy_task_gets_deployment_step_owned_by_devops() {
    let p = planner();
    let plan = p.generate_plan(
        "Build the app with frontend and backend api and deploy to production",
    );

    let deployment = plan
        .sequence
        .iter()
        .find(|s| s.action.starts_with("Deploy"))
        .unwrap();
    assert_eq!(deployment.specialist, builtin::DEVOPS_ENGINEER);
}

#[test]
fn test_unmatched_task_plans_around_default_with_no_handoffs() {
    let p = planner();
    let plan = p.generate_plan("Help me with my project");

    assert_eq!(plan.specialists.len(), 1);
    assert_eq!(plan.specialists[0].name, builtin::SENIOR_DEVELOPER);
    assert!(plan.handoffs.is_empty());
    assert!(!plan.sequence.is_empty());
}

#[test]
fn test_parallel_groups_for_full_stack_plan() {
    let p = planner();
    let plan = p.generate_plan("Build full-stack dashboard with React frontend and Node.js API");

    assert!(!plan.parallel_groups.is_empty());
    assert!(plan.parallel_groups[0].contains(&builtin::FRONTEND_DEVELOPER.to_string()));
    assert!(plan.parallel_groups[0].contains(&builtin::BACKEND_ARCHITECT.to_string()));
}

#[test]
fn test_every_step_has_protocol_tags_and_positive_duration() {
    let p = planner();
    let plan = p.generate_plan("Design, build and deploy a full-stack dashboard with tests");

    for step in &plan.sequence {
        assert!(!step.protocols.is_empty(), "step {} has no protocols", step.step_number);
        assert!(step.duration_hours > 0.0);
    }
}

#[test]
fn test_plan_serializes_to_json() {
    let p = planner();
    let plan = p.generate_plan("Build a React dashboard");

    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"sequence\""));
    assert!(json.contains("\"handoffs\""));
    assert!(json.contains("\"parallel_groups\""));
}
