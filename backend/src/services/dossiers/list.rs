use actix_web::{web, HttpResponse};

use common::requests::DossierFilter;

use crate::error::AppError;
use crate::state::AppState;

/// Sentinel filter value meaning "no filter".
const FILTER_ALL: &str = "Tous";

/// `GET /api/dossiers`: the dossier table plus the distinct CNAPS statuses
/// feeding the filter dropdown.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<DossierFilter>,
) -> Result<HttpResponse, AppError> {
    let filtre = query
        .filtre_cnaps
        .as_deref()
        .filter(|f| *f != FILTER_ALL);
    let dossiers = state.dossiers.list(filtre)?;
    let statuts_disponibles = state.dossiers.distinct_statuts_cnaps()?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "dossiers": dossiers,
        "statuts_disponibles": statuts_disponibles,
        "filtre_cnaps": query.filtre_cnaps.as_deref().unwrap_or(FILTER_ALL),
    })))
}
