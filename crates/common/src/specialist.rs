//! Specialist record types shared across Foreman crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Category a specialist belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Engineering,
    Design,
    Testing,
    Marketing,
    Product,
    Support,
}

impl Category {
    /// All categories, in catalog authoring order.
    pub const ALL: [Category; 6] = [
        Category::Engineering,
        Category::Design,
        Category::Testing,
        Category::Marketing,
        Category::Product,
        Category::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Engineering => "engineering",
            Category::Design => "design",
            Category::Testing => "testing",
            Category::Marketing => "marketing",
            Category::Product => "product",
            Category::Support => "support",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role tag assigned at catalog-authoring time.
///
/// The planner keys sequencing and action lookup on this tag rather than
/// inferring roles from name substrings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "implementer-frontend")]
    Frontend,
    #[serde(rename = "implementer-backend")]
    Backend,
    #[serde(rename = "implementer-mobile")]
    Mobile,
    #[serde(rename = "implementer-ai")]
    Ai,
    #[serde(rename = "designer")]
    Designer,
    #[serde(rename = "tester")]
    Tester,
    #[serde(rename = "devops")]
    Devops,
    #[default]
    #[serde(rename = "generalist")]
    Generalist,
}

impl Role {
    /// Whether this role contributes an implementation step to a plan.
    /// Designers and testers get dedicated phases instead.
    pub fn is_implementer(&self) -> bool {
        !matches!(self, Role::Designer | Role::Tester)
    }
}

/// A specialist entry from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistRecord {
    /// Globally unique display name, e.g. "Frontend Developer"
    pub name: String,

    /// Catalog category
    pub category: Category,

    /// Role tag driving plan sequencing and action lookup
    #[serde(default)]
    pub role: Role,

    /// Case-insensitive phrases matched against task text
    pub keywords: Vec<String>,

    /// Path to the profile markdown document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<PathBuf>,

    /// Fallback specialist for unmatched tasks; at most one per catalog
    #[serde(default)]
    pub is_default: bool,
}

impl SpecialistRecord {
    pub fn new(name: impl Into<String>, category: Category, role: Role) -> Self {
        Self {
            name: name.into(),
            category,
            role,
            keywords: Vec::new(),
            profile_path: None,
            is_default: false,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_profile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile_path = Some(path.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}
