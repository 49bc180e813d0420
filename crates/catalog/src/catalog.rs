//! Immutable specialist catalog: loading, validation and lookup.

use foreman_common::{Category, ForemanError, Result, SpecialistRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// On-disk catalog document: a `[[specialists]]` array of tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    specialists: Vec<SpecialistRecord>,
}

/// An immutable snapshot of the specialist catalog.
///
/// Constructed once and injected into the matcher and planner. Reloading
/// produces a fresh snapshot; state visible to in-flight calls never mutates.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<SpecialistRecord>,
}

impl Catalog {
    /// Build a catalog from explicit records, validating required invariants:
    /// non-empty catalog, unique non-blank names, at least one keyword per
    /// record, at most one default record.
    pub fn from_records(records: Vec<SpecialistRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(ForemanError::Catalog("catalog has no specialists".into()));
        }

        let mut names = HashSet::new();
        let mut defaults = 0usize;

        for record in &records {
            if record.name.trim().is_empty() {
                return Err(ForemanError::Catalog(
                    "specialist with blank name".into(),
                ));
            }
            if !names.insert(record.name.as_str()) {
                return Err(ForemanError::Catalog(format!(
                    "duplicate specialist name: {}",
                    record.name
                )));
            }
            if record.keywords.is_empty() {
                return Err(ForemanError::Catalog(format!(
                    "specialist {} has no keywords",
                    record.name
                )));
            }
            if record.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ForemanError::Catalog(format!(
                    "specialist {} has a blank keyword",
                    record.name
                )));
            }
            if record.is_default {
                defaults += 1;
            }
        }

        if defaults > 1 {
            return Err(ForemanError::Catalog(
                "more than one default specialist".into(),
            ));
        }

        info!(specialists = records.len(), "Catalog validated");
        Ok(Self { records })
    }

    /// Load and validate a catalog from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ForemanError::Catalog(format!(
                "failed to read catalog '{}': {}",
                path.display(),
                e
            ))
        })?;

        let parsed: CatalogFile = toml::from_str(&content)
            .map_err(|e| ForemanError::Catalog(format!("invalid catalog TOML: {}", e)))?;

        Self::from_records(parsed.specialists)
    }

    /// Load a fresh snapshot from disk. Callers swap the returned catalog in
    /// for the old one; existing references keep seeing the old snapshot.
    pub fn reload(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file(path)
    }

    /// All specialists in authoring order.
    pub fn all(&self) -> &[SpecialistRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a specialist up by exact name. Unknown names are `Ok(None)`;
    /// a blank name is a caller contract violation.
    pub fn by_name(&self, name: &str) -> Result<Option<&SpecialistRecord>> {
        if name.trim().is_empty() {
            return Err(ForemanError::InvalidName(
                "specialist name cannot be blank".into(),
            ));
        }
        Ok(self.records.iter().find(|r| r.name == name))
    }

    /// All specialists in a category, in authoring order.
    pub fn by_category(&self, category: Category) -> Vec<&SpecialistRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// The default specialist: the flagged record, else the first
    /// engineering record, else the first record.
    pub fn default_record(&self) -> &SpecialistRecord {
        self.records
            .iter()
            .find(|r| r.is_default)
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| r.category == Category::Engineering)
            })
            .unwrap_or(&self.records[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foreman_common::Role;

    fn record(name: &str, category: Category) -> SpecialistRecord {
        SpecialistRecord::new(name, category, Role::Generalist).with_keywords(["keyword"])
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = Catalog::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, ForemanError::Catalog(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let records = vec![
            record("Senior Developer", Category::Engineering),
            record("Senior Developer", Category::Engineering),
        ];
        let err = Catalog::from_records(records).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_keywords_rejected() {
        let bare = SpecialistRecord::new("Bare", Category::Support, Role::Generalist);
        let err = Catalog::from_records(vec![bare]).unwrap_err();
        assert!(err.to_string().contains("keywords"));
    }

    #[test]
    fn test_two_defaults_rejected() {
        let records = vec![
            record("One", Category::Engineering).as_default(),
            record("Two", Category::Engineering).as_default(),
        ];
        let err = Catalog::from_records(records).unwrap_err();
        assert!(err.to_string().contains("default"));
    }

    #[test]
    fn test_blank_name_lookup_is_contract_violation() {
        let catalog = Catalog::from_records(vec![record("One", Category::Engineering)]).unwrap();

        assert!(matches!(
            catalog.by_name("   "),
            Err(ForemanError::InvalidName(_))
        ));
    }

    #[test]
    fn test_unknown_name_is_not_found_not_error() {
        let catalog = Catalog::from_records(vec![record("One", Category::Engineering)]).unwrap();
        assert!(catalog.by_name("Nobody").unwrap().is_none());
    }

    #[test]
    fn test_default_record_fallback_order() {
        // No flagged default: first engineering record wins.
        let catalog = Catalog::from_records(vec![
            record("Designer", Category::Design),
            record("Engineer", Category::Engineering),
        ])
        .unwrap();
        assert_eq!(catalog.default_record().name, "Engineer");

        // No engineering record either: first record wins.
        let catalog = Catalog::from_records(vec![
            record("Designer", Category::Design),
            record("Support", Category::Support),
        ])
        .unwrap();
        assert_eq!(catalog.default_record().name, "Designer");
    }
}
