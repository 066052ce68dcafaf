//! Append-only list of submission records backed by a flat JSON file.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use common::model::submission::Submission;

use crate::error::AppError;

/// Handle on the submission list.
///
/// Every mutation runs under the internal lock and rewrites the list to a
/// sibling temp file before renaming it into place, so a half-written file
/// is never observable and concurrent handlers cannot lose each other's
/// writes.
pub struct SubmissionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SubmissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SubmissionStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads the whole list. A missing file is an empty list; a file that
    /// exists but does not parse is a reported error, not silent data loss.
    pub fn load(&self) -> Result<Vec<Submission>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read(&self.path)
            .map_err(|e| AppError::Storage(format!("reading {}: {}", self.path.display(), e)))?;
        serde_json::from_slice(&raw)
            .map_err(|e| AppError::Storage(format!("parsing {}: {}", self.path.display(), e)))
    }

    /// First record matching the (nom, prenom) key, if any.
    pub fn get(&self, nom: &str, prenom: &str) -> Result<Option<Submission>, AppError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|s| s.nom == nom && s.prenom == prenom))
    }

    /// Appends one record and commits.
    pub fn append(&self, record: Submission) -> Result<(), AppError> {
        let _guard = self.guard()?;
        let mut all = self.load()?;
        all.push(record);
        self.commit(&all)
    }

    /// Drops the first record matching the key and commits the shortened
    /// list. Returns the removed record so the caller can clean up its
    /// files; `None` means the key was absent and nothing was written.
    pub fn remove(&self, nom: &str, prenom: &str) -> Result<Option<Submission>, AppError> {
        let _guard = self.guard()?;
        let mut all = self.load()?;
        let Some(pos) = all.iter().position(|s| s.nom == nom && s.prenom == prenom) else {
            return Ok(None);
        };
        let removed = all.remove(pos);
        self.commit(&all)?;
        Ok(Some(removed))
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, AppError> {
        self.lock
            .lock()
            .map_err(|_| AppError::Storage("submission store lock poisoned".to_string()))
    }

    /// Writes the full list to a temp file, then renames it over the store.
    /// The rename is the commit point.
    fn commit(&self, all: &[Submission]) -> Result<(), AppError> {
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(all)
            .map_err(|e| AppError::Storage(format!("encoding submission list: {}", e)))?;
        fs::write(&tmp, body)
            .map_err(|e| AppError::Storage(format!("writing {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| AppError::Storage(format!("committing {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(nom: &str, prenom: &str, fichiers: &[&str]) -> Submission {
        Submission {
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            email: format!("{}@example.org", prenom.to_lowercase()),
            timestamp: "2026-08-07 10:00:00".to_string(),
            fichiers: fichiers.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn append_then_load_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let store = SubmissionStore::new(tmp.path().join("data.json"));

        store.append(record("Martin", "Lea", &["Martin_Lea_id_cni.pdf"])).unwrap();
        store.append(record("Durand", "Paul", &[])).unwrap();

        let all = store.load().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nom, "Martin");
        assert_eq!(all[1].nom, "Durand");
    }

    #[test]
    fn remove_returns_record_and_second_call_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = SubmissionStore::new(tmp.path().join("data.json"));
        store.append(record("Martin", "Lea", &["a.pdf", "b.pdf"])).unwrap();

        let removed = store.remove("Martin", "Lea").unwrap().unwrap();
        assert_eq!(removed.fichiers, vec!["a.pdf", "b.pdf"]);
        assert!(store.remove("Martin", "Lea").unwrap().is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let store = SubmissionStore::new(tmp.path().join("data.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn legacy_entry_without_files_gets_empty_list() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(
            &path,
            r#"[{"nom":"Martin","prenom":"Lea","email":"lea@x.com","timestamp":"2024-01-01 09:00:00"}]"#,
        )
        .unwrap();

        let store = SubmissionStore::new(&path);
        let all = store.load().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].fichiers.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error_not_an_empty_list() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "{not json").unwrap();

        let store = SubmissionStore::new(&path);
        assert!(matches!(store.load(), Err(AppError::Storage(_))));
    }

    #[test]
    fn commit_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        let store = SubmissionStore::new(&path);
        store.append(record("Martin", "Lea", &[])).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
