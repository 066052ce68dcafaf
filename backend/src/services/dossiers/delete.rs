use actix_web::{web, HttpResponse};
use log::info;

use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/dossiers/{id}/supprimer`: drops the row. Unknown ids are a
/// no-op so the admin page can re-issue a delete safely. Dossier rows have
/// no associated files.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = state.dossiers.delete(*id)?;
    if deleted {
        info!("dossier {} deleted", id);
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted })))
}
