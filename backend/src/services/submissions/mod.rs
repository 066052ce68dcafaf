//! # Submission Admin Service
//!
//! Endpoints over the file-bearing submission records. Records enter the
//! store through the public intake; this surface lists them, deletes one
//! together with every file it references, or bundles a record's files into
//! a single downloadable archive.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/submissions`** (`list::process`): every submission
//!     record, oldest first.
//! *   **`POST /api/submissions/delete`** (`delete::process`): removes the
//!     record addressed by a `{nom, prenom}` key and unlinks its stored
//!     files. An absent key is a no-op.
//! *   **`POST /api/submissions/download`** (`download::process`): returns a
//!     zip of the record's stored files; missing files are skipped, a key
//!     with no record or no remaining files is a 404.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod delete;
mod download;
mod list;

const API_PATH: &str = "/api/submissions";

/// Configures the submission admin scope.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/delete", post().to(delete::process))
        .route("/download", post().to(download::process))
}
