//! Resource lookup: resolves `directory/language/file` to script text.

use rustc_hash::FxHashMap;
use std::path::PathBuf;
use tracing::debug;

/// Source of dialogue script text. A missing resource is not an error.
pub trait ResourceLoader {
    fn load(&self, directory: &str, language_code: &str, file_name: &str) -> Option<String>;
}

/// Reads resources from `root/directory/language/file_name` on disk.
#[derive(Debug, Clone)]
pub struct FsResources {
    root: PathBuf,
}

impl FsResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for FsResources {
    fn load(&self, directory: &str, language_code: &str, file_name: &str) -> Option<String> {
        let path = self.root.join(directory).join(language_code).join(file_name);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "resource not available");
                None
            }
        }
    }
}

/// In-memory resources keyed by `directory/language/file_name`.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: FxHashMap<String, String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, directory: &str, language_code: &str, file_name: &str, contents: &str) {
        self.entries
            .insert(resource_key(directory, language_code, file_name), contents.to_string());
    }

    /// Chaining form of `insert`.
    pub fn with(mut self, directory: &str, language_code: &str, file_name: &str, contents: &str) -> Self {
        self.insert(directory, language_code, file_name, contents);
        self
    }
}

impl ResourceLoader for MemoryResources {
    fn load(&self, directory: &str, language_code: &str, file_name: &str) -> Option<String> {
        self.entries
            .get(&resource_key(directory, language_code, file_name))
            .cloned()
    }
}

fn resource_key(directory: &str, language_code: &str, file_name: &str) -> String {
    format!("{}/{}/{}", directory, language_code, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_lookup() {
        let resources = MemoryResources::new().with("Dialogues", "en", "intro", "Hello.");
        assert_eq!(resources.load("Dialogues", "en", "intro").as_deref(), Some("Hello."));
        assert!(resources.load("Dialogues", "ru", "intro").is_none());
        assert!(resources.load("Other", "en", "intro").is_none());
    }

    #[test]
    fn fs_lookup() {
        let resources = FsResources::new("tests/fixtures");
        let text = resources.load("Dialogues", "en", "intro.ink").unwrap();
        assert!(text.contains("Speaker"));
        assert!(resources.load("Dialogues", "de", "intro.ink").is_none());
    }
}
