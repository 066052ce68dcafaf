use actix_web::{web, HttpResponse};

use common::requests::{CommentaireForm, StatutCnapsForm, StatutForm};

use crate::error::AppError;
use crate::state::AppState;
use crate::store::dossiers::DossierField;

/// `POST /api/dossiers/{id}/statut`
pub async fn statut(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<StatutForm>,
) -> Result<HttpResponse, AppError> {
    apply(&state, *id, DossierField::Statut, &form.statut)
}

/// `POST /api/dossiers/{id}/statut_cnaps`
pub async fn statut_cnaps(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<StatutCnapsForm>,
) -> Result<HttpResponse, AppError> {
    apply(&state, *id, DossierField::StatutCnaps, &form.statut_cnaps)
}

/// `POST /api/dossiers/{id}/commentaire`
pub async fn commentaire(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<CommentaireForm>,
) -> Result<HttpResponse, AppError> {
    apply(&state, *id, DossierField::Commentaire, &form.commentaire)
}

/// Rewrites exactly one field on exactly one row; unknown ids are a 404.
fn apply(
    state: &AppState,
    id: i64,
    field: DossierField,
    value: &str,
) -> Result<HttpResponse, AppError> {
    state.dossiers.update_field(id, field, value)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "updated": id })))
}
