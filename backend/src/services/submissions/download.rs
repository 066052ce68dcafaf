use std::fs;
use std::io::{Cursor, Write};

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use common::requests::SubmissionKey;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::uploads::{sanitize, UploadStore};

/// `POST /api/submissions/download`: bundles a record's stored files into a
/// single zip. A key with no record, or a record none of whose files still
/// exist, is a 404.
pub async fn process(
    state: web::Data<AppState>,
    key: web::Json<SubmissionKey>,
) -> Result<HttpResponse, AppError> {
    let Some(record) = state.submissions.get(&key.nom, &key.prenom)? else {
        return Err(AppError::NotFound(format!(
            "no submission for {} {}",
            key.prenom, key.nom
        )));
    };
    let archive = build_archive(&state.uploads, &record.fichiers)?.ok_or_else(|| {
        AppError::NotFound(format!("no stored files for {} {}", key.prenom, key.nom))
    })?;

    let filename = format!(
        "{}_{}_documents.zip",
        sanitize(&key.nom),
        sanitize(&key.prenom)
    );
    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(archive))
}

/// Zips every listed file that still exists, preserving stored names.
/// Returns `None` when not a single listed file is present on disk.
pub fn build_archive(
    uploads: &UploadStore,
    fichiers: &[String],
) -> Result<Option<Vec<u8>>, AppError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let mut packed = 0usize;

    for name in fichiers {
        // Names that stopped resolving are skipped, not errors.
        let Ok(bytes) = fs::read(uploads.path(name)) else {
            continue;
        };
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| AppError::Storage(format!("archiving {}: {}", name, e)))?;
        writer
            .write_all(&bytes)
            .map_err(|e| AppError::Storage(format!("archiving {}: {}", name, e)))?;
        packed += 1;
    }

    if packed == 0 {
        return Ok(None);
    }
    let cursor = writer
        .finish()
        .map_err(|e| AppError::Storage(format!("finishing archive: {}", e)))?;
    Ok(Some(cursor.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn archive_contains_exactly_the_existing_files() {
        let tmp = TempDir::new().unwrap();
        let uploads = UploadStore::new(tmp.path());
        fs::write(uploads.path("Martin_Lea_id_cni.pdf"), b"pdf-a").unwrap();
        fs::write(uploads.path("Martin_Lea_domicile_edf.pdf"), b"pdf-b").unwrap();

        let fichiers = vec![
            "Martin_Lea_id_cni.pdf".to_string(),
            "Martin_Lea_domicile_edf.pdf".to_string(),
            "Martin_Lea_hebergeur_gone.pdf".to_string(),
        ];
        let bytes = build_archive(&uploads, &fichiers).unwrap().unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Martin_Lea_id_cni.pdf"));
        assert!(names.contains(&"Martin_Lea_domicile_edf.pdf"));
    }

    #[test]
    fn all_files_missing_yields_none() {
        let tmp = TempDir::new().unwrap();
        let uploads = UploadStore::new(tmp.path());

        let fichiers = vec!["gone.pdf".to_string()];
        assert!(build_archive(&uploads, &fichiers).unwrap().is_none());
        assert!(build_archive(&uploads, &[]).unwrap().is_none());
    }
}
