use serde::Deserialize;

/// Identity key addressing one submission record.
/// Duplicate (nom, prenom) pairs resolve to the first match.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionKey {
    pub nom: String,
    pub prenom: String,
}

/// Form payload for the admin-status update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatutForm {
    pub statut: String,
}

/// Form payload for the CNAPS-status update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatutCnapsForm {
    pub statut_cnaps: String,
}

/// Form payload for the comment update endpoint.
#[derive(Debug, Deserialize)]
pub struct CommentaireForm {
    pub commentaire: String,
}

/// Query string accepted by the dossier list endpoint.
#[derive(Debug, Deserialize)]
pub struct DossierFilter {
    pub filtre_cnaps: Option<String>,
}
