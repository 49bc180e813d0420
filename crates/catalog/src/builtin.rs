//! The stock specialist roster.
//!
//! The matcher's pattern detectors emit names from this roster, so the
//! constants here are the single source of truth for those spellings.

use crate::Catalog;
use foreman_common::{Category, Role, SpecialistRecord};

pub const FRONTEND_DEVELOPER: &str = "Frontend Developer";
pub const BACKEND_ARCHITECT: &str = "Backend Architect";
pub const MOBILE_DEVELOPER: &str = "Mobile Developer";
pub const AI_ENGINEER: &str = "AI Engineer";
pub const DEVOPS_ENGINEER: &str = "DevOps Engineer";
pub const SENIOR_DEVELOPER: &str = "Senior Developer";
pub const UI_DESIGNER: &str = "UI Designer";
pub const UX_RESEARCHER: &str = "UX Researcher";
pub const REALITY_CHECKER: &str = "Reality Checker";
pub const API_TESTER: &str = "API Tester";
pub const GROWTH_HACKER: &str = "Growth Hacker";
pub const CONTENT_CREATOR: &str = "Content Creator";
pub const PRODUCT_MANAGER: &str = "Product Manager";
pub const SUPPORT_SPECIALIST: &str = "Support Specialist";

impl Catalog {
    /// The built-in catalog. Covers all six categories; "Senior Developer"
    /// is the default fallback specialist.
    pub fn builtin() -> Catalog {
        let records = vec![
            SpecialistRecord::new(FRONTEND_DEVELOPER, Category::Engineering, Role::Frontend)
                .with_keywords([
                    "react",
                    "vue",
                    "angular",
                    "css",
                    "html",
                    "frontend",
                    "ui component",
                    "dashboard",
                    "responsive",
                    "styling",
                ]),
            SpecialistRecord::new(BACKEND_ARCHITECT, Category::Engineering, Role::Backend)
                .with_keywords([
                    "api",
                    "backend",
                    "database",
                    "server",
                    "authentication",
                    "microservices",
                    "rest api",
                    "graphql",
                    "node.js",
                    "endpoint",
                ]),
            SpecialistRecord::new(MOBILE_DEVELOPER, Category::Engineering, Role::Mobile)
                .with_keywords([
                    "mobile",
                    "ios",
                    "android",
                    "react native",
                    "flutter",
                    "app store",
                    "swift",
                    "kotlin",
                ]),
            SpecialistRecord::new(AI_ENGINEER, Category::Engineering, Role::Ai).with_keywords([
                "machine learning",
                "ml",
                "llm",
                "neural network",
                "model training",
                "nlp",
                "embeddings",
                "ai",
            ]),
            SpecialistRecord::new(DEVOPS_ENGINEER, Category::Engineering, Role::Devops)
                .with_keywords([
                    "deploy",
                    "deployment",
                    "ci/cd",
                    "docker",
                    "kubernetes",
                    "infrastructure",
                    "monitoring",
                    "pipeline",
                    "devops",
                ]),
            SpecialistRecord::new(SENIOR_DEVELOPER, Category::Engineering, Role::Generalist)
                .with_keywords([
                    "architecture",
                    "refactor",
                    "code review",
                    "best practices",
                    "technical debt",
                    "algorithm",
                    "performance",
                ])
                .as_default(),
            SpecialistRecord::new(UI_DESIGNER, Category::Design, Role::Designer).with_keywords([
                "design",
                "mockup",
                "wireframe",
                "figma",
                "user interface",
                "design system",
                "visual design",
                "branding",
            ]),
            SpecialistRecord::new(UX_RESEARCHER, Category::Design, Role::Designer).with_keywords([
                "ux",
                "user research",
                "usability",
                "user experience",
                "personas",
                "user testing",
                "accessibility",
            ]),
            SpecialistRecord::new(REALITY_CHECKER, Category::Testing, Role::Tester).with_keywords([
                "test",
                "qa",
                "quality",
                "validation",
                "verify",
                "bug",
                "regression",
                "test coverage",
            ]),
            SpecialistRecord::new(API_TESTER, Category::Testing, Role::Tester).with_keywords([
                "api testing",
                "integration test",
                "postman",
                "load testing",
                "contract testing",
            ]),
            SpecialistRecord::new(GROWTH_HACKER, Category::Marketing, Role::Generalist)
                .with_keywords([
                    "growth",
                    "marketing",
                    "seo",
                    "analytics",
                    "campaign",
                    "conversion",
                    "acquisition",
                ]),
            SpecialistRecord::new(CONTENT_CREATOR, Category::Marketing, Role::Generalist)
                .with_keywords([
                    "content",
                    "blog",
                    "copywriting",
                    "social media",
                    "newsletter",
                    "video script",
                ]),
            SpecialistRecord::new(PRODUCT_MANAGER, Category::Product, Role::Generalist)
                .with_keywords([
                    "roadmap",
                    "product strategy",
                    "user stories",
                    "prioritization",
                    "stakeholder",
                    "feature planning",
                    "backlog",
                ]),
            SpecialistRecord::new(SUPPORT_SPECIALIST, Category::Support, Role::Generalist)
                .with_keywords([
                    "customer support",
                    "troubleshoot",
                    "ticket",
                    "user issue",
                    "onboarding",
                    "faq",
                ]),
        ];

        // Safe because the roster above satisfies every catalog invariant.
        Catalog::from_records(records).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_categories() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            assert!(
                !catalog.by_category(category).is_empty(),
                "no specialists in category {}",
                category
            );
        }
    }

    #[test]
    fn test_builtin_default_is_senior_developer() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.default_record().name, SENIOR_DEVELOPER);
    }

    #[test]
    fn test_builtin_contains_pattern_detector_names() {
        let catalog = Catalog::builtin();
        for name in [
            FRONTEND_DEVELOPER,
            BACKEND_ARCHITECT,
            UI_DESIGNER,
            REALITY_CHECKER,
            DEVOPS_ENGINEER,
        ] {
            assert!(catalog.by_name(name).unwrap().is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_builtin_every_record_has_keywords() {
        let catalog = Catalog::builtin();
        for record in catalog.all() {
            assert!(!record.keywords.is_empty(), "{} has no keywords", record.name);
        }
    }
}
