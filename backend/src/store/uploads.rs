//! Flat directory of stored applicant files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Derives the on-disk name for one uploaded file.
///
/// Grouping by applicant identity and category keeps a submission's files
/// together and collision-resistant across categories.
pub fn stored_name(nom: &str, prenom: &str, categorie: &str, original: &str) -> String {
    format!(
        "{}_{}_{}_{}",
        sanitize(nom),
        sanitize(prenom),
        categorie,
        sanitize(original)
    )
}

/// Squashes separators and whitespace so the value stays a single path
/// component.
pub(crate) fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// Handle on the upload directory.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        UploadStore { dir: dir.into() }
    }

    /// Creates the directory if needed.
    pub fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Storage(format!("creating {}: {}", self.dir.display(), e)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Opens a new stored file for writing.
    pub fn create(&self, name: &str) -> Result<fs::File, AppError> {
        fs::File::create(self.path(name))
            .map_err(|e| AppError::Storage(format!("creating {}: {}", name, e)))
    }

    /// Removes one stored file. A file already gone is not an error.
    pub fn delete(&self, name: &str) -> Result<(), AppError> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("deleting {}: {}", name, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stored_name_joins_identity_category_and_original() {
        assert_eq!(
            stored_name("Martin", "Lea", "id", "cni.pdf"),
            "Martin_Lea_id_cni.pdf"
        );
    }

    #[test]
    fn stored_name_squashes_path_hostile_characters() {
        assert_eq!(
            stored_name("De La Cruz", "Ana", "domicile", "../facture edf.pdf"),
            "De_La_Cruz_Ana_domicile_.._facture_edf.pdf"
        );
    }

    #[test]
    fn delete_tolerates_missing_files() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path());
        store.delete("absent.pdf").unwrap();

        fs::write(store.path("present.pdf"), b"x").unwrap();
        store.delete("present.pdf").unwrap();
        assert!(!store.exists("present.pdf"));
    }
}
