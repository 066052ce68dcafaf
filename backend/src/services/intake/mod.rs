//! # Public Intake Service
//!
//! This module receives pre-registration submissions from the public form.
//! The form page itself is a static embedded asset; only the multipart
//! `POST /submit` lands here.
//!
//! ## Registered Routes:
//!
//! *   **`POST /submit`**:
//!     - **Handler**: `submit::process`
//!     - **Description**: Accepts the applicant fields (`nom`, `prenom`,
//!       `email`) followed by the optional categorized file parts
//!       (`id_files[]`, `domicile_file`, `identite_hebergeant`,
//!       `attestation_hebergement`, `hebergeur_files[]`). Each file is
//!       stored under a name derived from the applicant identity and the
//!       field's category, the submission record is appended to the store,
//!       a confirmation email is queued fire-and-forget, and the browser is
//!       redirected to `/?submitted=true`.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod submit;

const API_PATH: &str = "/submit";

/// Configures the intake scope.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(submit::process))
}
