//! Template and seal image lookup.
//!
//! Prebuilt document template images and the coat-of-arms seal live in a
//! directory on the host. Absence of any asset is a normal, expected
//! outcome: the renderer degrades to its vector or generic layout.

use crate::record::DocumentType;
use std::fs;
use std::path::{Path, PathBuf};

/// Files smaller than this are placeholders, not usable images.
const MIN_ASSET_BYTES: u64 = 10;

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File name of the template image for a document type, when one is
    /// part of the shipped asset set at all.
    fn template_file(document_type: &DocumentType) -> Option<&'static str> {
        match document_type {
            DocumentType::PermanentResidence => Some("permanent-residence.png"),
            DocumentType::NaturalizationCertificate => Some("naturalisation.png"),
            DocumentType::GeneralWorkPermit => Some("work-permit.png"),
            DocumentType::RelativesPermit => Some("relatives-permit.png"),
            _ => None,
        }
    }

    /// Whether a usable template image exists for this document type.
    pub fn has_template(&self, document_type: &DocumentType) -> bool {
        Self::template_file(document_type)
            .map(|name| usable(&self.root.join(name)))
            .unwrap_or(false)
    }

    /// Template image bytes, or `None` when absent/unreadable.
    pub fn template_bytes(&self, document_type: &DocumentType) -> Option<Vec<u8>> {
        let name = Self::template_file(document_type)?;
        read_usable(&self.root.join(name))
    }

    /// Coat-of-arms seal used in headers and the office stamp box.
    pub fn coat_of_arms(&self) -> Option<Vec<u8>> {
        read_usable(&self.root.join("coat-of-arms.png"))
    }
}

fn usable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() >= MIN_ASSET_BYTES)
        .unwrap_or(false)
}

fn read_usable(path: &Path) -> Option<Vec<u8>> {
    if !usable(path) {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "asset unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_assets_are_a_normal_outcome() {
        let store = AssetStore::new("/nonexistent/assets");
        assert!(!store.has_template(&DocumentType::PermanentResidence));
        assert!(store.template_bytes(&DocumentType::PermanentResidence).is_none());
        assert!(store.coat_of_arms().is_none());
    }

    #[test]
    fn types_without_templates_never_report_one() {
        let store = AssetStore::new(".");
        assert!(!store.has_template(&DocumentType::BirthCertificate));
        assert!(!store.has_template(&DocumentType::RefugeeStatus));
        assert!(!store.has_template(&DocumentType::Other("Anything".into())));
    }

    #[test]
    fn placeholder_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("permanent-residence.png")).unwrap();
        f.write_all(b"x").unwrap();
        let store = AssetStore::new(dir.path());
        assert!(!store.has_template(&DocumentType::PermanentResidence));
    }

    #[test]
    fn real_files_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("work-permit.png"), vec![0u8; 64]).unwrap();
        let store = AssetStore::new(dir.path());
        assert!(store.has_template(&DocumentType::GeneralWorkPermit));
        assert_eq!(
            store.template_bytes(&DocumentType::GeneralWorkPermit).unwrap().len(),
            64
        );
    }
}
