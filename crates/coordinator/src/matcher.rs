//! Task-to-specialist matching.
//!
//! Scores every catalog specialist against a task description, applies
//! pattern-based boosts for combinations keyword scores miss (full-stack
//! work, design-plus-build, deployment), and decides whether the task
//! needs one specialist or several.

use crate::analysis::{ScoredCandidate, TaskAnalysis};
use foreman_catalog::builtin::{
    BACKEND_ARCHITECT, DEVOPS_ENGINEER, FRONTEND_DEVELOPER, REALITY_CHECKER, UI_DESIGNER,
};
use foreman_catalog::Catalog;
use foreman_common::SpecialistRecord;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Score for a whole-word keyword match.
const KEYWORD_WORD_SCORE: f64 = 2.0;
/// Extra score per additional word in a multi-word keyword.
const KEYWORD_SPECIFICITY_BONUS: f64 = 0.5;
/// Score for a substring-only keyword match.
const KEYWORD_SUBSTRING_SCORE: f64 = 1.0;
/// Flat boost when the specialist's own name appears in the task.
const NAME_BOOST: f64 = 5.0;
/// Flat boost for specialists named by a pattern detector.
const PATTERN_BOOST: f64 = 3.0;
/// Below this top score the task falls back to the default specialist.
const MIN_CONFIDENCE_THRESHOLD: f64 = 2.0;
/// Candidates within this fraction of the top score count as similar.
const SIMILARITY_WINDOW: f64 = 0.6;
/// Distinct-name multi-specialist detection needs at least this top score.
const MULTI_SCORE_FLOOR: f64 = 2.5;
/// Upper bound on required specialists for a multi-specialist task.
const MAX_REQUIRED_SPECIALISTS: usize = 5;

/// A compiled text pattern. Invalid patterns degrade to never-matching
/// instead of failing matcher construction.
struct Pattern(Option<Regex>);

impl Pattern {
    fn new(pattern: &str) -> Self {
        Self(Regex::new(pattern).ok())
    }

    /// Whole-word pattern for an already-lowercased phrase.
    fn word(phrase: &str) -> Self {
        Self::new(&format!(r"\b{}\b", regex::escape(phrase)))
    }

    fn matches(&self, text: &str) -> bool {
        self.0.as_ref().is_some_and(|re| re.is_match(text))
    }
}

struct CompiledKeyword {
    phrase: String,
    word_count: usize,
    whole_word: Pattern,
}

struct CompiledSpecialist {
    name_lower: String,
    keywords: Vec<CompiledKeyword>,
}

/// The fixed pattern detectors: pure predicates over the lowercased task
/// that directly imply specialists, independent of keyword scores.
struct PatternDetectors {
    design_then_build: Pattern,
    build_then_design: Pattern,
    build_word: Pattern,
    test_word: Pattern,
    test_artifact: Pattern,
    design_word: Pattern,
    scoped_design: Pattern,
}

impl PatternDetectors {
    fn new() -> Self {
        Self {
            design_then_build: Pattern::new(r"\bdesign\b.*\b(build|implement|create|develop)\b"),
            build_then_design: Pattern::new(r"\b(build|implement|create|develop)\b.*\bdesign\b"),
            build_word: Pattern::new(r"\b(build|implement|create)\b"),
            test_word: Pattern::new(r"\b(test|qa|quality)\b"),
            test_artifact: Pattern::new(r"test\s+(report|documentation|evidence)"),
            design_word: Pattern::new(r"\bdesign\b"),
            scoped_design: Pattern::new(
                r"design\s+(architecture|database|api|event-driven|microservices)",
            ),
        }
    }

    /// Run every detector and union the implied specialist names.
    /// Detectors are order-independent; results are deduplicated.
    fn detect(&self, task_lower: &str) -> BTreeSet<&'static str> {
        let mut names = BTreeSet::new();

        // Full-stack work needs both halves.
        if task_lower.contains("full-stack") || task_lower.contains("fullstack") {
            names.insert(FRONTEND_DEVELOPER);
            names.insert(BACKEND_ARCHITECT);
        }

        // Design paired with implementation, in either order.
        if self.design_then_build.matches(task_lower) || self.build_then_design.matches(task_lower)
        {
            names.insert(UI_DESIGNER);
            names.insert(FRONTEND_DEVELOPER);
        }

        // Explicit frontend plus backend (or API) work.
        if task_lower.contains("frontend")
            && (task_lower.contains("backend") || task_lower.contains("api"))
        {
            names.insert(FRONTEND_DEVELOPER);
            names.insert(BACKEND_ARCHITECT);
        }

        // Build plus test, unless "test" names an artifact like a report.
        if self.build_word.matches(task_lower)
            && self.test_word.matches(task_lower)
            && !self.test_artifact.matches(task_lower)
        {
            names.insert(REALITY_CHECKER);
            if task_lower.contains("api")
                || task_lower.contains("backend")
                || task_lower.contains("endpoint")
            {
                names.insert(BACKEND_ARCHITECT);
            } else if task_lower.contains("frontend")
                || task_lower.contains("ui")
                || task_lower.contains("component")
            {
                names.insert(FRONTEND_DEVELOPER);
            }
        }

        // Deployment work.
        if task_lower.contains("deploy")
            || task_lower.contains("deployment")
            || task_lower.contains("devops")
        {
            names.insert(DEVOPS_ENGINEER);
        }

        // Standalone "design" implies UI work unless it scopes system design.
        if self.design_word.matches(task_lower) && !self.scoped_design.matches(task_lower) {
            names.insert(UI_DESIGNER);
        }

        // Dashboards are UI-heavy by default.
        if task_lower.contains("dashboard") {
            names.insert(UI_DESIGNER);
            names.insert(FRONTEND_DEVELOPER);
        }

        names
    }
}

/// Matches task descriptions against the specialist catalog.
///
/// Keyword and name patterns are compiled once at construction; every
/// analysis call is side-effect-free, so one matcher can be shared by
/// concurrent callers.
pub struct Matcher {
    catalog: Arc<Catalog>,
    compiled: Vec<CompiledSpecialist>,
    detectors: PatternDetectors,
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let compiled = catalog
            .all()
            .iter()
            .map(|record| CompiledSpecialist {
                name_lower: record.name.to_lowercase(),
                keywords: record
                    .keywords
                    .iter()
                    .map(|keyword| {
                        let phrase = keyword.to_lowercase();
                        CompiledKeyword {
                            word_count: phrase.split_whitespace().count(),
                            whole_word: Pattern::word(&phrase),
                            phrase,
                        }
                    })
                    .collect(),
            })
            .collect();

        info!(specialists = catalog.len(), "Matcher initialized");

        Self {
            catalog,
            compiled,
            detectors: PatternDetectors::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Select the best specialist for a task.
    ///
    /// Empty or whitespace-only tasks select the catalog default; so does
    /// any task nothing matches. Never fails, whatever the input text.
    pub fn select_specialist(&self, task: &str) -> SpecialistRecord {
        if task.trim().is_empty() {
            debug!("Empty task, selecting default specialist");
            return self.catalog.default_record().clone();
        }

        let analysis = self.analyze_task(task);
        match analysis.required_specialists.into_iter().next() {
            Some(specialist) => specialist,
            None => self.catalog.default_record().clone(),
        }
    }

    /// Analyze a task: score every specialist, apply pattern boosts, and
    /// decide between a single specialist and a ranked multi-specialist set.
    pub fn analyze_task(&self, task: &str) -> TaskAnalysis {
        let task_lower = task.to_lowercase();
        let pattern_names = self.detectors.detect(&task_lower);

        let mut candidates: Vec<ScoredCandidate> = Vec::new();
        for (record, compiled) in self.catalog.all().iter().zip(&self.compiled) {
            let mut score = keyword_score(compiled, &task_lower);
            if pattern_names.contains(record.name.as_str()) {
                score += PATTERN_BOOST;
            }
            if score > 0.0 {
                candidates.push(ScoredCandidate {
                    specialist: record.clone(),
                    score,
                });
            }
        }

        // Stable sort: ties keep catalog authoring order.
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let analysis = self.decide(candidates, &pattern_names);

        debug!(
            task_preview = %task.chars().take(50).collect::<String>(),
            multi = analysis.is_multi_specialist,
            primary = analysis.primary().map(|s| s.name.as_str()).unwrap_or("-"),
            confidence = analysis.confidence_score,
            "Task analyzed"
        );

        analysis
    }

    /// Apply the decision rule to the ranked candidates.
    fn decide(
        &self,
        candidates: Vec<ScoredCandidate>,
        pattern_names: &BTreeSet<&'static str>,
    ) -> TaskAnalysis {
        // No candidates, or too weak a top score: fall back to the default.
        if candidates
            .first()
            .map_or(true, |top| top.score < MIN_CONFIDENCE_THRESHOLD)
        {
            let confidence = match candidates.first() {
                None => 0.0,
                Some(top) => (0.1 + top.score * 0.05).min(0.3),
            };
            return TaskAnalysis {
                is_multi_specialist: false,
                required_specialists: vec![self.catalog.default_record().clone()],
                confidence_score: confidence,
            };
        }

        let top_score = candidates[0].score;
        let confidence = (0.3 + top_score * 0.1).min(1.0);

        if candidates.len() == 1 {
            return TaskAnalysis {
                is_multi_specialist: false,
                required_specialists: vec![candidates[0].specialist.clone()],
                confidence_score: confidence,
            };
        }

        // Candidates scoring close to the top...
        let mut similar: Vec<&ScoredCandidate> = candidates
            .iter()
            .filter(|c| c.score >= top_score * SIMILARITY_WINDOW)
            .collect();

        // ...plus pattern-detected specialists with a reasonable score.
        for candidate in &candidates {
            if pattern_names.contains(candidate.specialist.name.as_str())
                && candidate.score >= MIN_CONFIDENCE_THRESHOLD
                && !similar
                    .iter()
                    .any(|s| s.specialist.name == candidate.specialist.name)
            {
                similar.push(candidate);
            }
        }

        let mut is_multi = false;
        let required_specialists = if similar.len() > 1 {
            let categories: HashSet<_> = similar.iter().map(|s| s.specialist.category).collect();
            let names: HashSet<_> = similar.iter().map(|s| s.specialist.name.as_str()).collect();

            if categories.len() > 1
                || (names.len() > 1 && top_score >= MULTI_SCORE_FLOOR)
                || pattern_names.len() > 1
            {
                is_multi = true;
                similar
                    .iter()
                    .take(MAX_REQUIRED_SPECIALISTS)
                    .map(|s| s.specialist.clone())
                    .collect()
            } else {
                vec![candidates[0].specialist.clone()]
            }
        } else {
            vec![candidates[0].specialist.clone()]
        };

        TaskAnalysis {
            is_multi_specialist: is_multi,
            required_specialists,
            confidence_score: confidence,
        }
    }
}

/// Keyword score for one specialist: whole-word matches score higher than
/// substring hits, multi-word keywords earn a specificity bonus, and a
/// verbatim name appearance adds a flat boost.
fn keyword_score(compiled: &CompiledSpecialist, task_lower: &str) -> f64 {
    let mut score = 0.0;

    for keyword in &compiled.keywords {
        if keyword.whole_word.matches(task_lower) {
            score += KEYWORD_WORD_SCORE
                + KEYWORD_SPECIFICITY_BONUS * keyword.word_count.saturating_sub(1) as f64;
        } else if task_lower.contains(keyword.phrase.as_str()) {
            score += KEYWORD_SUBSTRING_SCORE;
        }
    }

    if task_lower.contains(&compiled.name_lower) {
        score += NAME_BOOST;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use foreman_catalog::builtin;

    fn matcher() -> Matcher {
        Matcher::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn test_whole_word_beats_substring() {
        let m = matcher();
        let compiled = &m.compiled[0]; // Frontend Developer

        // "react" as a whole word scores 2.0; inside another word only 1.0.
        assert_eq!(keyword_score(compiled, "use react here"), 2.0);
        assert_eq!(keyword_score(compiled, "reaction time matters"), 1.0);
    }

    #[test]
    fn test_multi_word_keyword_specificity_bonus() {
        let m = matcher();
        let ai = m
            .catalog
            .all()
            .iter()
            .position(|r| r.name == builtin::AI_ENGINEER)
            .unwrap();

        // "machine learning" is two words: 2.0 + 0.5.
        let score = keyword_score(&m.compiled[ai], "machine learning pipeline");
        assert!(score >= 2.5);
    }

    #[test]
    fn test_verbatim_name_boost() {
        let m = matcher();
        let backend = m
            .catalog
            .all()
            .iter()
            .position(|r| r.name == builtin::BACKEND_ARCHITECT)
            .unwrap();

        let without = keyword_score(&m.compiled[backend], "review the api");
        let with = keyword_score(&m.compiled[backend], "ask the backend architect to review the api");
        assert_eq!(with - without, NAME_BOOST + KEYWORD_WORD_SCORE); // "backend" word now also hits
    }

    #[test]
    fn test_detector_full_stack() {
        let detectors = PatternDetectors::new();
        let names = detectors.detect("build a full-stack application");
        assert!(names.contains(builtin::FRONTEND_DEVELOPER));
        assert!(names.contains(builtin::BACKEND_ARCHITECT));
    }

    #[test]
    fn test_detector_dashboard() {
        let detectors = PatternDetectors::new();
        let names = detectors.detect("create an analytics dashboard");
        assert!(names.contains(builtin::UI_DESIGNER));
        assert!(names.contains(builtin::FRONTEND_DEVELOPER));
    }

    #[test]
    fn test_detector_scoped_design_excluded() {
        let detectors = PatternDetectors::new();

        let standalone = detectors.detect("design the landing page");
        assert!(standalone.contains(builtin::UI_DESIGNER));

        let scoped = detectors.detect("design database schema for orders");
        assert!(!scoped.contains(builtin::UI_DESIGNER));
    }

    #[test]
    fn test_detector_test_artifact_excluded() {
        let detectors = PatternDetectors::new();

        let build_and_test = detectors.detect("build the api and test it thoroughly");
        assert!(build_and_test.contains(builtin::REALITY_CHECKER));
        assert!(build_and_test.contains(builtin::BACKEND_ARCHITECT));

        let artifact = detectors.detect("create the test report for the release");
        assert!(!artifact.contains(builtin::REALITY_CHECKER));
    }

    #[test]
    fn test_detector_deploy() {
        let detectors = PatternDetectors::new();
        let names = detectors.detect("deploy the service to production");
        assert!(names.contains(builtin::DEVOPS_ENGINEER));
    }

    #[test]
    fn test_low_score_falls_back_to_default() {
        let m = matcher();
        // One weak substring hit stays under the confidence threshold.
        let analysis = m.analyze_task("reaction");
        assert!(!analysis.is_multi_specialist);
        assert_eq!(
            analysis.primary().unwrap().name,
            builtin::SENIOR_DEVELOPER
        );
        assert!(analysis.confidence_score <= 0.3);
    }

    #[test]
    fn test_no_candidates_has_zero_confidence() {
        let m = matcher();
        let analysis = m.analyze_task("zzz qqq xxx");
        assert_eq!(analysis.confidence_score, 0.0);
        assert_eq!(
            analysis.primary().unwrap().name,
            builtin::SENIOR_DEVELOPER
        );
    }

    #[test]
    fn test_same_category_tie_collapses_to_top() {
        let m = matcher();
        // Frontend outscores Mobile here; the similarity window excludes the
        // weaker same-category hit, so the analysis stays single-specialist.
        let analysis = m.analyze_task("Fix CSS styling issues on mobile");
        assert!(!analysis.is_multi_specialist);
        assert_eq!(analysis.required_specialists.len(), 1);
    }
}
