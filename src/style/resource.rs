use super::{StyleError, StyleSheet};
use crate::core::constants::STYLE_EXTENSION;
use crate::prelude::HashMap;
use std::path::{Path, PathBuf};

/// Raw style document located by a [`StyleResourceProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDocument {
    pub sheet_id: String,
    /// Where the document was read from, if it came from disk
    pub location: Option<PathBuf>,
    pub contents: String,
}

impl StyleDocument {
    pub fn parse(&self) -> Result<StyleSheet, StyleError> {
        StyleSheet::from_json(&self.contents).map_err(|source| StyleError::Malformed {
            sheet_id: self.sheet_id.clone(),
            source,
        })
    }
}

/// Resolves a style sheet id to its document.
pub trait StyleResourceProvider: Send + Sync {
    /// `None` means the resource does not exist.
    fn locate(&self, sheet_id: &str) -> Option<StyleDocument>;
}

/// Looks up `<root>/<sheet_id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, sheet_id: &str) -> Option<PathBuf> {
        // Ids name a file directly inside the root, nothing else.
        if sheet_id.is_empty() || sheet_id.contains(['/', '\\']) || sheet_id.starts_with('.') {
            return None;
        }
        Some(self.root.join(format!("{}.{}", sheet_id, STYLE_EXTENSION)))
    }
}

impl StyleResourceProvider for DirectoryResources {
    fn locate(&self, sheet_id: &str) -> Option<StyleDocument> {
        let path = self.path_for(sheet_id)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(StyleDocument {
                sheet_id: sheet_id.to_string(),
                location: Some(path),
                contents,
            }),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("failed to read style sheet {}: {}", path.display(), e);
                }
                None
            }
        }
    }
}

/// Style documents held in memory, keyed by sheet id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResources {
    documents: HashMap<String, String>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, sheet_id: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(sheet_id, contents);
        self
    }

    pub fn insert(&mut self, sheet_id: impl Into<String>, contents: impl Into<String>) {
        self.documents.insert(sheet_id.into(), contents.into());
    }
}

impl StyleResourceProvider for InMemoryResources {
    fn locate(&self, sheet_id: &str) -> Option<StyleDocument> {
        self.documents.get(sheet_id).map(|contents| StyleDocument {
            sheet_id: sheet_id.to_string(),
            location: None,
            contents: contents.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stylemap-resource-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_directory_lookup() {
        let dir = scratch_dir("lookup");
        std::fs::write(dir.join("maptiler_basic.json"), r#"{"version": 8}"#).unwrap();

        let resources = DirectoryResources::new(&dir);
        let doc = resources.locate("maptiler_basic").unwrap();
        assert_eq!(doc.location, Some(dir.join("maptiler_basic.json")));
        assert_eq!(doc.parse().unwrap().version, 8);

        assert!(resources.locate("maptiler_streets").is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_rejects_path_like_ids() {
        let resources = DirectoryResources::new("/tmp");
        assert!(resources.path_for("../secret").is_none());
        assert!(resources.path_for("a/b").is_none());
        assert!(resources.path_for("").is_none());
        assert!(resources.path_for("maptiler_basic").is_some());
    }

    #[test]
    fn test_in_memory_lookup_and_malformed() {
        let resources = InMemoryResources::new().with_document("broken", "{ nope");
        let doc = resources.locate("broken").unwrap();
        assert!(doc.location.is_none());
        match doc.parse() {
            Err(StyleError::Malformed { sheet_id, .. }) => assert_eq!(sheet_id, "broken"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(resources.locate("missing").is_none());
    }
}
