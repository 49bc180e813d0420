//! Profile-document parsing.
//!
//! Specialist profiles are markdown documents with optional YAML front
//! matter. Parsing is pure text extraction; nothing here makes routing
//! decisions.

use crate::Catalog;
use foreman_common::{ForemanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A named deliverable template extracted from a profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverableTemplate {
    pub title: String,
    pub content: String,
}

/// Structured narrative fields extracted from a profile document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialistProfile {
    pub name: String,
    pub description: String,
    pub mission: Vec<String>,
    pub tone: Vec<String>,
    pub examples: Vec<String>,
    pub deliverables: Vec<DeliverableTemplate>,
    pub workflow: Vec<String>,
    pub metrics: Vec<String>,
}

/// YAML front matter block at the top of a profile document.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a profile document. Never fails: malformed front matter is
/// tolerated and missing sections default to empty lists.
pub fn parse_profile(content: &str) -> SpecialistProfile {
    let (front_matter, body) = split_front_matter(content);

    let mut profile = SpecialistProfile {
        name: front_matter.name.unwrap_or_default(),
        description: front_matter.description.unwrap_or_default(),
        ..SpecialistProfile::default()
    };

    let sections = split_into_sections(body);

    if let Some(text) = section(&sections, &["core mission", "mission"]) {
        profile.mission = extract_list_items(text);
    }
    if let Some(text) = section(&sections, &["communication style"]) {
        profile.tone = extract_tone(text);
        profile.examples = extract_examples(text);
    }
    if let Some(text) = section(&sections, &["technical deliverables", "deliverables"]) {
        profile.deliverables = extract_deliverables(text);
    }
    if let Some(text) = section(&sections, &["workflow process", "workflow"]) {
        profile.workflow = extract_list_items(text);
    }
    if let Some(text) = section(&sections, &["success metrics", "metrics"]) {
        profile.metrics = extract_list_items(text);
    }

    profile
}

/// Prefix content with the acting-as header used in rendered responses.
pub fn format_response(specialist_name: &str, content: &str) -> String {
    format!("Acting as: {}\n\n{}", specialist_name, content)
}

/// Loads profile documents for catalog records and caches them by name.
pub struct ProfileStore {
    catalog: Arc<Catalog>,
    cache: RwLock<HashMap<String, Arc<SpecialistProfile>>>,
}

impl ProfileStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load the profile for a named specialist.
    ///
    /// `Ok(None)` when the specialist is unknown, has no profile path, or
    /// the document does not exist on disk. A present-but-unreadable file
    /// is an error. Blank names are a caller contract violation.
    pub fn load(&self, specialist_name: &str) -> Result<Option<Arc<SpecialistProfile>>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(specialist_name)
        {
            return Ok(Some(cached.clone()));
        }

        let Some(record) = self.catalog.by_name(specialist_name)? else {
            return Ok(None);
        };
        let Some(path) = record.profile_path.as_ref() else {
            return Ok(None);
        };
        if !path.exists() {
            debug!(
                specialist = %specialist_name,
                path = %path.display(),
                "Profile document missing"
            );
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ForemanError::Profile(format!(
                "failed to read profile '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut profile = parse_profile(&content);
        if profile.name.is_empty() {
            profile.name = record.name.clone();
        }

        let profile = Arc::new(profile);
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(specialist_name.to_string(), profile.clone());

        Ok(Some(profile))
    }

    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

fn split_front_matter(content: &str) -> (FrontMatter, &str) {
    if !content.trim_start().starts_with("---") {
        return (FrontMatter::default(), content);
    }

    let parts: Vec<&str> = content.splitn(3, "---").collect();
    if parts.len() < 3 {
        return (FrontMatter::default(), content);
    }

    // Malformed YAML is tolerated; the body is still parsed.
    let front_matter = serde_yaml::from_str(parts[1]).unwrap_or_default();
    (front_matter, parts[2])
}

/// Split markdown into `## `-level sections, keyed by normalized header
/// text. Subsections (`###`) stay with their parent section.
fn split_into_sections(body: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();
    let mut current: Option<String> = None;
    let mut content: Vec<&str> = Vec::new();

    for line in body.lines() {
        if let Some(header) = line.strip_prefix("## ") {
            if let Some(name) = current.take() {
                sections.insert(name, content.join("\n"));
            }
            current = Some(normalize_header(header));
            content.clear();
        } else if current.is_some() {
            content.push(line);
        }
    }
    if let Some(name) = current {
        sections.insert(name, content.join("\n"));
    }

    sections
}

/// Strip emoji and punctuation, lowercase, and drop a leading "your ".
fn normalize_header(header: &str) -> String {
    let cleaned: String = header
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();
    let lowered = cleaned.trim().to_lowercase();
    lowered
        .strip_prefix("your ")
        .map(str::to_string)
        .unwrap_or(lowered)
}

fn section<'a>(sections: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| sections.get(*key))
        .map(String::as_str)
}

/// Strip a bullet or numbered-list marker, returning the item text.
fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let marker_len = trimmed
        .find(|c: char| !(c == '-' || c == '*' || c.is_ascii_digit()))
        .unwrap_or(trimmed.len());
    if marker_len == 0 {
        return None;
    }
    let rest = trimmed[marker_len..].trim_start_matches(['.', ')']);
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let item = rest.trim();
    (!item.is_empty()).then_some(item)
}

fn extract_list_items(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(strip_bullet)
        .map(str::to_string)
        .collect()
}

/// Tone bullets following a "Tone:" marker, else the section's first
/// three list items.
fn extract_tone(text: &str) -> Vec<String> {
    let mut tone = Vec::new();
    let mut in_tone = false;

    for line in text.lines() {
        if line.to_lowercase().contains("tone:") {
            in_tone = true;
            continue;
        }
        if !in_tone {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('-') || trimmed.starts_with('*') {
            tone.push(trimmed.trim_start_matches(['-', '*']).trim().to_string());
        } else if !trimmed.is_empty()
            && !trimmed.starts_with('#')
            && trimmed.chars().any(char::is_alphabetic)
        {
            break;
        }
    }

    if tone.is_empty() {
        tone = extract_list_items(text).into_iter().take(3).collect();
    }
    tone
}

/// Quoted lines, else up to three lines following an "example" marker,
/// else a single generic entry.
fn extract_examples(text: &str) -> Vec<String> {
    let mut examples: Vec<String> = text
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            trimmed
                .strip_prefix('"')
                .or_else(|| trimmed.strip_prefix('>'))
                .map(|rest| rest.trim_end_matches('"').trim().to_string())
        })
        .filter(|e| !e.is_empty())
        .collect();

    if examples.is_empty() {
        let mut in_example = false;
        for line in text.lines() {
            if line.to_lowercase().contains("example") {
                in_example = true;
                continue;
            }
            if in_example && !line.trim().is_empty() {
                examples.push(line.trim().to_string());
                if examples.len() >= 3 {
                    break;
                }
            }
        }
    }

    if examples.is_empty() {
        examples.push("Professional and technical communication".to_string());
    }
    examples
}

/// Deliverable templates from `###` subsections, else from top-level
/// bullets, else a single generic template.
fn extract_deliverables(text: &str) -> Vec<DeliverableTemplate> {
    let mut deliverables = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_content: Vec<&str> = Vec::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if let Some(title) = line.trim().strip_prefix("### ") {
            if let Some(finished) = current_title.take() {
                deliverables.push(DeliverableTemplate {
                    title: finished,
                    content: current_content.join("\n").trim().to_string(),
                });
            }
            current_title = Some(title.trim().to_string());
            current_content.clear();
            continue;
        }

        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
            if current_title.is_some() {
                current_content.push(line);
            }
            continue;
        }

        // Bullets only seed deliverables when no subsection structure exists.
        if deliverables.is_empty() && current_title.is_none() && !in_code_block {
            if let Some(item) = strip_bullet(line) {
                current_title = Some(item.to_string());
                current_content.clear();
                continue;
            }
        }

        if current_title.is_some() {
            current_content.push(line);
        }
    }

    if let Some(finished) = current_title {
        deliverables.push(DeliverableTemplate {
            title: finished,
            content: current_content.join("\n").trim().to_string(),
        });
    }

    if deliverables.is_empty() {
        deliverables.push(DeliverableTemplate {
            title: "Technical Implementation".to_string(),
            content: "Detailed implementation according to requirements".to_string(),
        });
    }
    deliverables
}
