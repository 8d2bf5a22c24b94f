//! Template discovery
//!
//! The set of supported templates is fixed at startup: one scan of the
//! configured folder, collecting the stems of `{name}.pdf` files. Changing
//! the folder contents requires a restart.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    root: PathBuf,
    names: BTreeSet<String>,
}

impl TemplateRegistry {
    /// Scan `root` for template files.
    ///
    /// A missing or unreadable directory yields an empty registry; the
    /// server still starts and serves an empty listing.
    pub fn scan(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut names = BTreeSet::new();

        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Cannot read template folder {}: {}", root.display(), err);
                return Self { root, names };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if !is_pdf {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.insert(stem.to_string());
            }
        }

        Self { root, names }
    }

    /// Registered template names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The folder the registry was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a registered template; `None` for unknown names.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.contains(name)
            .then(|| self.root.join(format!("{name}.pdf")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("invoice.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(dir.path().join("Lease.PDF"), b"%PDF-1.4").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"not a template").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("hidden.pdf"), b"%PDF-1.4").unwrap();
        dir
    }

    #[test]
    fn scan_collects_pdf_stems_only() {
        let dir = fixture_dir();
        let registry = TemplateRegistry::scan(dir.path());

        assert_eq!(registry.names(), vec!["Lease".to_string(), "invoice".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn nested_files_are_ignored() {
        let dir = fixture_dir();
        let registry = TemplateRegistry::scan(dir.path());
        assert!(!registry.contains("hidden"));
    }

    #[test]
    fn missing_folder_yields_empty_registry() {
        let registry = TemplateRegistry::scan("/definitely/not/a/real/folder");
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("anything"), None);
    }

    #[test]
    fn resolve_joins_root_for_known_names() {
        let dir = fixture_dir();
        let registry = TemplateRegistry::scan(dir.path());

        assert_eq!(
            registry.resolve("invoice"),
            Some(dir.path().join("invoice.pdf"))
        );
        assert_eq!(registry.resolve("readme"), None);
    }

    #[test]
    fn lookups_are_case_sensitive_on_the_stem() {
        let dir = fixture_dir();
        let registry = TemplateRegistry::scan(dir.path());

        assert!(registry.contains("Lease"));
        assert!(!registry.contains("lease"));
    }

    proptest! {
        #[test]
        fn unknown_names_never_resolve(name in "[a-z]{5,20}") {
            let dir = fixture_dir();
            let registry = TemplateRegistry::scan(dir.path());
            prop_assume!(!registry.contains(&name));
            prop_assert_eq!(registry.resolve(&name), None);
        }
    }
}
