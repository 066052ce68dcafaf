use serde::{Deserialize, Serialize};

/// One administrative case file, tracked through its review statuses.
///
/// Rows are seeded out of band; the admin interface only mutates the three
/// free-text status fields and deletes rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub formation: String,
    pub session: String,
    pub statut: String,
    pub statut_cnaps: String,
    pub commentaire: String,
}
