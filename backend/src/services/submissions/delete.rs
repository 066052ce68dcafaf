use actix_web::{web, HttpResponse};
use log::{info, warn};

use common::requests::SubmissionKey;

use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/submissions/delete`: removes the record addressed by the
/// (nom, prenom) key and every file it references. Deleting an absent key
/// is a no-op.
pub async fn process(
    state: web::Data<AppState>,
    key: web::Json<SubmissionKey>,
) -> Result<HttpResponse, AppError> {
    let deleted = delete_submission(&state, &key)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted })))
}

/// Drops the record first: the atomic store rewrite is the commit point,
/// and once the record is gone its files can only be orphans, never
/// dangling references. Unlink failures after the commit are therefore
/// logged and tolerated; a store failure leaves everything untouched.
pub fn delete_submission(state: &AppState, key: &SubmissionKey) -> Result<bool, AppError> {
    let Some(record) = state.submissions.remove(&key.nom, &key.prenom)? else {
        return Ok(false);
    };
    for name in &record.fichiers {
        if let Err(e) = state.uploads.delete(name) {
            warn!("cleanup after delete: {}", e);
        }
    }
    info!(
        "submission deleted for {} {} ({} file(s))",
        key.prenom,
        key.nom,
        record.fichiers.len()
    );
    Ok(true)
}
