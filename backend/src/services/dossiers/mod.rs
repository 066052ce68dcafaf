//! # Dossier Admin Service
//!
//! Aggregates the endpoints staff use to review dossier case files. Rows are
//! seeded out of band; this surface only lists, annotates and deletes them,
//! and produces the attestation document.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/dossiers`** (`list::process`): the dossier table, filtered
//!     by `?filtre_cnaps=` unless the sentinel `Tous` is passed, plus the
//!     distinct CNAPS statuses feeding the filter dropdown.
//! *   **`POST /api/dossiers/{id}/statut`** (`update::statut`): rewrite the
//!     admin status of one row.
//! *   **`POST /api/dossiers/{id}/statut_cnaps`** (`update::statut_cnaps`):
//!     rewrite the CNAPS status of one row.
//! *   **`POST /api/dossiers/{id}/commentaire`** (`update::commentaire`):
//!     rewrite the free-text comment of one row.
//! *   **`POST /api/dossiers/{id}/supprimer`** (`delete::process`): drop the
//!     row; unknown ids are a no-op.
//! *   **`GET /api/dossiers/{id}/attestation`** (`attestation::process`):
//!     render and download the pre-registration attestation for one row.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod attestation;
mod delete;
mod list;
mod update;

const API_PATH: &str = "/api/dossiers";

/// Configures the dossier admin scope.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{id}/statut", post().to(update::statut))
        .route("/{id}/statut_cnaps", post().to(update::statut_cnaps))
        .route("/{id}/commentaire", post().to(update::commentaire))
        .route("/{id}/supprimer", post().to(delete::process))
        .route("/{id}/attestation", get().to(attestation::process))
}
