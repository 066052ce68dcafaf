use std::fs::File;
use std::path::{Path, PathBuf};

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web;
use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::SimplePageDecorator;
use log::info;

use common::model::dossier::Dossier;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::uploads::sanitize;

/// `GET /api/dossiers/{id}/attestation`: renders the pre-registration
/// attestation for one dossier and returns it as a download.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<NamedFile, AppError> {
    let dossier = state.dossiers.get(*id)?;
    let path = generate(&state, &dossier)?;

    let file = NamedFile::open_async(&path)
        .await
        .map_err(|e| AppError::Storage(format!("opening {}: {}", path.display(), e)))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attestation.pdf")
        .to_string();
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }))
}

/// Renders the document and persists it next to the uploaded files, under a
/// name derived from the applicant identity.
fn generate(state: &AppState, dossier: &Dossier) -> Result<PathBuf, AppError> {
    let font_family = load_font(&state.fonts_dir)?;
    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Attestation de Préinscription");
    doc.set_font_size(11);
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let mut heading = Paragraph::new("");
    heading.push(StyledString::new(
        "Attestation de Préinscription",
        Style::new().bold().with_font_size(18),
    ));
    doc.push(heading);
    doc.push(Break::new(2));
    doc.push(Paragraph::new(attestation_sentence(dossier)));

    let name = format!(
        "attestation_{}_{}.pdf",
        sanitize(&dossier.nom),
        sanitize(&dossier.prenom)
    );
    let path = state.uploads.path(&name);
    let mut out = File::create(&path)
        .map_err(|e| AppError::Storage(format!("creating {}: {}", path.display(), e)))?;
    doc.render(&mut out)
        .map_err(|e| AppError::Storage(format!("rendering {}: {}", name, e)))?;
    info!("attestation generated: {}", name);
    Ok(path)
}

/// The fixed single-sentence body.
fn attestation_sentence(d: &Dossier) -> String {
    format!(
        "{} {} est préinscrit(e) à la formation {} le {}.",
        d.prenom, d.nom, d.formation, d.session
    )
}

/// Loads the font family from the fonts directory: Arial when its TTFs are
/// installed there, LiberationSans otherwise.
fn load_font(
    dir: &Path,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, AppError> {
    if let Ok(family) = genpdf::fonts::from_files(dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(dir, "LiberationSans", None)
        .map_err(|e| AppError::Storage(format!("loading fonts from {}: {}", dir.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_fills_the_template() {
        let d = Dossier {
            id: 7,
            nom: "Martin".to_string(),
            prenom: "Lea".to_string(),
            formation: "SSIAP 1".to_string(),
            session: "2026-09-14".to_string(),
            statut: String::new(),
            statut_cnaps: String::new(),
            commentaire: String::new(),
        };
        assert_eq!(
            attestation_sentence(&d),
            "Lea Martin est préinscrit(e) à la formation SSIAP 1 le 2026-09-14."
        );
    }
}
