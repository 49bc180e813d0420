//! Task-to-specialist matching and coordination planning.
//!
//! The coordinator is the decision core of Foreman:
//! 1. The [`Matcher`] scores every catalog specialist against a task
//!    description and decides single- versus multi-specialist need.
//! 2. The [`Planner`] consumes that analysis and builds a sequenced
//!    workflow with handoff contracts, dependency edges, duration
//!    estimates, and advisory parallel-work groups.
//!
//! # Architecture
//!
//! ```text
//! Task description
//!      │
//!      ▼
//! ┌─────────────┐     ┌──────────────┐
//! │   Matcher   │ ──► │   Planner    │
//! │  (scoring)  │     │ (sequencing) │
//! └──────┬──────┘     └──────┬───────┘
//!        │ reads             │ renders
//!        ▼                   ▼
//!   [ Catalog ]       summary / mermaid /
//!   (immutable)        handoff messages
//! ```
//!
//! Both components are synchronous and side-effect-free per call; a single
//! instance can be shared by concurrent callers.

pub mod analysis;
pub mod matcher;
pub mod planner;
pub mod render;

pub use analysis::{ScoredCandidate, TaskAnalysis};
pub use matcher::Matcher;
pub use planner::{
    CoordinationPlan, Handoff, PlanStep, Planner, SpecialistDetail, TimeEstimate,
};
