use serde::{Deserialize, Serialize};

/// One applicant form entry, with the stored names of its uploaded files.
///
/// `fichiers` lists names under the upload directory, in category order.
/// Entries written before file uploads existed have no `fichiers` key and
/// deserialize with an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub timestamp: String,
    #[serde(default)]
    pub fichiers: Vec<String>,
}
