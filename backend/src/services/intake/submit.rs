use std::io::{BufWriter, Write};

use actix_multipart::{Field, Multipart};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Local;
use futures_util::StreamExt;
use log::info;

use common::model::submission::Submission;

use crate::error::AppError;
use crate::mailer::Notice;
use crate::state::AppState;
use crate::store::uploads::stored_name;

/// Maps a multipart field name to its category slot. The slot index is the
/// position of the category's files in the record: identity documents,
/// residence proof, host documents, host identity, host attestation.
fn category_for(field_name: &str) -> Option<(usize, &'static str)> {
    match field_name {
        "id_files[]" => Some((0, "id")),
        "domicile_file" => Some((1, "domicile")),
        "hebergeur_files[]" => Some((2, "hebergeur")),
        "identite_hebergeant" => Some((3, "identite_hebergeant")),
        "attestation_hebergement" => Some((4, "attestation_hebergement")),
        _ => None,
    }
}

/// `POST /submit`: persists the files and the record, queues the
/// notification, redirects back to the form.
pub async fn process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let record = save_submission(&state, payload).await?;
    info!(
        "submission stored for {} {} ({} file(s))",
        record.prenom,
        record.nom,
        record.fichiers.len()
    );

    // Fire-and-forget; delivery failures are the mailer's problem, not the
    // applicant's.
    state.mailer.notify(Notice {
        nom: record.nom.clone(),
        prenom: record.prenom.clone(),
        email: record.email.clone(),
    });

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/?submitted=true"))
        .finish())
}

/// Reads the multipart stream, writing file parts straight to the upload
/// directory as they arrive. Stored names are derived from the applicant
/// identity, so the text fields must precede any file part; the form lists
/// its inputs in that order.
pub async fn save_submission(
    state: &AppState,
    mut payload: Multipart,
) -> Result<Submission, AppError> {
    let mut nom: Option<String> = None;
    let mut prenom: Option<String> = None;
    let mut email: Option<String> = None;
    // One list per category, concatenated in slot order at the end.
    let mut by_category: [Vec<String>; 5] = Default::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::Validation(format!("multipart: {}", e)))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();

        match name.as_str() {
            "nom" => nom = Some(read_text(&mut field).await?),
            "prenom" => prenom = Some(read_text(&mut field).await?),
            "email" => email = Some(read_text(&mut field).await?),
            other => {
                let Some((slot, categorie)) = category_for(other) else {
                    drain(&mut field).await?;
                    continue;
                };
                let original = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                if original.is_empty() {
                    // An untouched file input still sends an empty part.
                    drain(&mut field).await?;
                    continue;
                }
                let (Some(nom), Some(prenom)) = (nom.as_deref(), prenom.as_deref()) else {
                    return Err(AppError::Validation(
                        "applicant fields must be sent before file uploads".to_string(),
                    ));
                };
                let stored = stored_name(nom, prenom, categorie, &original);
                write_file(state, &mut field, &stored).await?;
                by_category[slot].push(stored);
            }
        }
    }

    let record = Submission {
        nom: require_field(nom, "nom")?,
        prenom: require_field(prenom, "prenom")?,
        email: require_field(email, "email")?,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        fichiers: by_category.into_iter().flatten().collect(),
    };

    // Files are already on disk; persisting the record last means a crash
    // can only leave unreferenced files, never a record pointing at nothing.
    state.submissions.append(record.clone())?;
    Ok(record)
}

fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "missing required field: {}",
            name
        ))),
    }
}

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::Validation(format!("multipart: {}", e)))?;
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| AppError::Validation("form field is not valid UTF-8".to_string()))
}

async fn drain(field: &mut Field) -> Result<(), AppError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::Validation(format!("multipart: {}", e)))?;
    }
    Ok(())
}

async fn write_file(state: &AppState, field: &mut Field, stored: &str) -> Result<(), AppError> {
    let mut out = BufWriter::new(state.uploads.create(stored)?);
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::Validation(format!("multipart: {}", e)))?;
        out.write_all(&chunk)
            .map_err(|e| AppError::Storage(format!("writing {}: {}", stored, e)))?;
    }
    out.flush()
        .map_err(|e| AppError::Storage(format!("writing {}: {}", stored, e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_record_order() {
        let fields = [
            "id_files[]",
            "domicile_file",
            "hebergeur_files[]",
            "identite_hebergeant",
            "attestation_hebergement",
        ];
        let slots: Vec<usize> = fields
            .iter()
            .map(|f| category_for(f).unwrap().0)
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4]);
        assert!(category_for("autre_champ").is_none());
    }
}
