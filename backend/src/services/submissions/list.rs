use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/submissions`: every submission record, oldest first.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let all = state.submissions.load()?;
    Ok(HttpResponse::Ok().json(all))
}
