//! Repository over the `dossiers` table.

use std::path::PathBuf;

use common::model::dossier::Dossier;
use rusqlite::{params, Connection};

use crate::error::AppError;

const DOSSIER_COLUMNS: &str =
    "id, nom, prenom, formation, session, statut, statut_cnaps, commentaire";

/// Columns an admin is allowed to rewrite, one per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DossierField {
    Statut,
    StatutCnaps,
    Commentaire,
}

impl DossierField {
    fn column(self) -> &'static str {
        match self {
            DossierField::Statut => "statut",
            DossierField::StatutCnaps => "statut_cnaps",
            DossierField::Commentaire => "commentaire",
        }
    }
}

/// Handle on the dossier database.
///
/// A connection is opened per operation and every statement addresses rows
/// by id, so there is no read-modify-write cycle to race.
#[derive(Clone)]
pub struct DossierStore {
    path: PathBuf,
}

impl DossierStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DossierStore { path: path.into() }
    }

    fn open(&self) -> Result<Connection, AppError> {
        Connection::open(&self.path).map_err(AppError::from)
    }

    /// Creates the table on first start. Rows are seeded out of band.
    pub fn init_schema(&self) -> Result<(), AppError> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dossiers (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 nom TEXT NOT NULL,
                 prenom TEXT NOT NULL,
                 formation TEXT NOT NULL,
                 session TEXT NOT NULL,
                 statut TEXT NOT NULL DEFAULT '',
                 statut_cnaps TEXT NOT NULL DEFAULT '',
                 commentaire TEXT NOT NULL DEFAULT ''
             )",
            [],
        )?;
        Ok(())
    }

    /// All dossiers, or only those whose CNAPS status equals `filter`.
    pub fn list(&self, filter: Option<&str>) -> Result<Vec<Dossier>, AppError> {
        let conn = self.open()?;
        let mut out = Vec::new();
        match filter {
            Some(statut_cnaps) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM dossiers WHERE statut_cnaps = ?1 ORDER BY id",
                    DOSSIER_COLUMNS
                ))?;
                let rows = stmt.query_map(params![statut_cnaps], row_to_dossier)?;
                for row in rows {
                    out.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM dossiers ORDER BY id",
                    DOSSIER_COLUMNS
                ))?;
                let rows = stmt.query_map([], row_to_dossier)?;
                for row in rows {
                    out.push(row?);
                }
            }
        }
        Ok(out)
    }

    /// The sorted, distinct, non-empty CNAPS statuses currently in use.
    pub fn distinct_statuts_cnaps(&self) -> Result<Vec<String>, AppError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT statut_cnaps FROM dossiers
             WHERE statut_cnaps <> '' ORDER BY statut_cnaps",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn get(&self, id: i64) -> Result<Dossier, AppError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM dossiers WHERE id = ?1",
            DOSSIER_COLUMNS
        ))?;
        stmt.query_row(params![id], row_to_dossier).map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                AppError::NotFound(format!("dossier {} not found", id))
            }
            other => AppError::from(other),
        })
    }

    /// Rewrites a single column on a single row. An unknown id is an error.
    pub fn update_field(
        &self,
        id: i64,
        field: DossierField,
        value: &str,
    ) -> Result<(), AppError> {
        let conn = self.open()?;
        let sql = format!("UPDATE dossiers SET {} = ?1 WHERE id = ?2", field.column());
        let changed = conn.execute(&sql, params![value, id])?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("dossier {} not found", id)));
        }
        Ok(())
    }

    /// Removes the row. Deleting an unknown id is not an error.
    pub fn delete(&self, id: i64) -> Result<bool, AppError> {
        let conn = self.open()?;
        let changed = conn.execute("DELETE FROM dossiers WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn row_to_dossier(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dossier> {
    Ok(Dossier {
        id: row.get(0)?,
        nom: row.get(1)?,
        prenom: row.get(2)?,
        formation: row.get(3)?,
        session: row.get(4)?,
        statut: row.get(5)?,
        statut_cnaps: row.get(6)?,
        commentaire: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> DossierStore {
        let store = DossierStore::new(tmp.path().join("cnaps.db"));
        store.init_schema().unwrap();
        store
    }

    fn seed(store: &DossierStore, nom: &str, statut_cnaps: &str) -> i64 {
        let conn = Connection::open(&store.path).unwrap();
        conn.execute(
            "INSERT INTO dossiers (nom, prenom, formation, session, statut, statut_cnaps, commentaire)
             VALUES (?1, 'Alex', 'SSIAP 1', '2026-09', '', ?2, '')",
            params![nom, statut_cnaps],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn filter_returns_exact_subset() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        seed(&store, "Martin", "Accordé");
        seed(&store, "Durand", "Refusé");
        seed(&store, "Petit", "Accordé");

        let accorded = store.list(Some("Accordé")).unwrap();
        assert_eq!(accorded.len(), 2);
        assert!(accorded.iter().all(|d| d.statut_cnaps == "Accordé"));

        let all = store.list(None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn distinct_statuses_skip_empty_and_sort() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        seed(&store, "Martin", "Refusé");
        seed(&store, "Durand", "");
        seed(&store, "Petit", "Accordé");
        seed(&store, "Noel", "Accordé");

        let statuts = store.distinct_statuts_cnaps().unwrap();
        assert_eq!(statuts, vec!["Accordé".to_string(), "Refusé".to_string()]);
    }

    #[test]
    fn update_touches_one_field_on_one_row() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let target = seed(&store, "Martin", "En cours");
        let other = seed(&store, "Durand", "En cours");

        let before = store.list(None).unwrap();
        store
            .update_field(target, DossierField::StatutCnaps, "Accordé")
            .unwrap();
        let after = store.list(None).unwrap();

        for (b, a) in before.iter().zip(after.iter()) {
            if b.id == target {
                assert_eq!(a.statut_cnaps, "Accordé");
                assert_eq!((&a.nom, &a.statut, &a.commentaire), (&b.nom, &b.statut, &b.commentaire));
            } else {
                assert_eq!(a, b);
            }
        }
        assert_eq!(store.get(other).unwrap().statut_cnaps, "En cours");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let err = store
            .update_field(42, DossierField::Statut, "Complet")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let id = seed(&store, "Martin", "");
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.list(None).unwrap().is_empty());
    }
}
