//! Shared application state injected into every handler.

use std::path::PathBuf;

use crate::mailer::Mailer;
use crate::store::dossiers::DossierStore;
use crate::store::submissions::SubmissionStore;
use crate::store::uploads::UploadStore;

/// Everything a handler needs: the stores and the notification handle.
pub struct AppState {
    pub dossiers: DossierStore,
    pub submissions: SubmissionStore,
    pub uploads: UploadStore,
    pub mailer: Mailer,
    pub fonts_dir: PathBuf,
}
