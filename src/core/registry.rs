use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::types::Source;

/// On-disk registry shape (the `public_sources.json` file owned by the
/// registry collaborator).
#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    public_sources: Vec<Source>,
}

/// Read-only view over the configured public sources. Mutation (add/remove)
/// belongs to the external registry collaborator, not to this crate.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn from_sources(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Load the registry from a JSON file.
    ///
    /// Missing file or parse error degrades to an empty registry with a
    /// warning; search then simply finds no sources.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "Source registry not found at {}: {} — using empty registry",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<RegistryFile>(&contents) {
            Ok(file) => {
                info!(
                    "Loaded {} public sources from {}",
                    file.public_sources.len(),
                    path.display()
                );
                Self {
                    sources: file.public_sources,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to parse source registry at {}: {} — using empty registry",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn all_sources(&self) -> &[Source] {
        &self.sources
    }

    /// Sources eligible for search.
    pub fn list_enabled_sources(&self) -> Vec<&Source> {
        self.sources.iter().filter(|s| s.search_enabled).collect()
    }

    pub fn get_source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_registry() -> SourceRegistry {
        let json = r#"{
            "public_sources": [
                {
                    "id": "rust-docs",
                    "name": "Rust Documentation",
                    "base_url": "https://doc.rust-lang.org",
                    "search_enabled": true
                },
                {
                    "id": "disabled",
                    "name": "Disabled Source",
                    "base_url": "https://example.com",
                    "search_enabled": false
                }
            ]
        }"#;
        let file: RegistryFile = serde_json::from_str(json).unwrap();
        SourceRegistry::from_sources(file.public_sources)
    }

    #[test]
    fn test_enabled_filter() {
        let registry = sample_registry();
        assert_eq!(registry.len(), 2);
        let enabled = registry.list_enabled_sources();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id, "rust-docs");
    }

    #[test]
    fn test_get_source_by_id() {
        let registry = sample_registry();
        assert!(registry.get_source("rust-docs").is_some());
        assert!(registry.get_source("disabled").is_some());
        assert!(registry.get_source("missing").is_none());
    }

    #[test]
    fn test_load_missing_file_yields_empty_registry() {
        let registry = SourceRegistry::load(Path::new("/nonexistent/sources.json"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_malformed_file_yields_empty_registry() {
        let mut file = tempfile_like();
        write!(file.1, "{{not json").unwrap();
        let registry = SourceRegistry::load(&file.0);
        assert!(registry.is_empty());
        let _ = std::fs::remove_file(&file.0);
    }

    fn tempfile_like() -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!(
            "doc-scout-registry-test-{}.json",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
